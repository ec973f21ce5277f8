use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{TimeZone, Utc};
use tempfile::TempDir;

mod answers;
mod info;

/// A scratch directory laid out like a site's data directory, returning the
/// guard and the terminal directory files should be written into.
pub fn site(name: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::Builder::new()
        .prefix("eim")
        .tempdir()
        .unwrap();
    let terminal = dir
        .path()
        .join(name)
        .join("T1");
    std::fs::create_dir_all(&terminal).unwrap();
    (dir, terminal)
}

pub fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Set the file's modification time to noon UTC on the given day.
pub fn backdate(path: &Path, year: i32, month: u32, day: u32) {
    let moment = Utc
        .with_ymd_and_hms(year, month, day, 12, 0, 0)
        .unwrap();
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(SystemTime::from(moment))
        .unwrap();
}
