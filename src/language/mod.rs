// Types representing parsed experiment logs

mod error;
mod sparse;
mod types;
mod version;

// Re-export all public symbols
pub use error::*;
pub use sparse::*;
pub use types::*;
pub use version::*;
