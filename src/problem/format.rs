use super::messages::{generate_error_message, generate_file_message};
use eim::language::{FileError, LineError};
use owo_colors::OwoColorize;

/// Format a skipped line with full details including the source line.
pub fn full_line_error(error: &LineError) -> String {
    let (problem, details) = generate_error_message(error);

    let code = error
        .text()
        .trim_end();
    let line = error.line();
    let width = 3.max(
        line.to_string()
            .len(),
    );

    format!(
        r#"
{}: {}:{} {}

{:width$} {}
{:width$} {} {}
{:width$} {} {}

{}
        "#,
        "warning".bright_yellow(),
        error
            .filename()
            .to_string_lossy(),
        line,
        problem.bold(),
        ' ',
        '|'.bright_blue(),
        line.bright_blue(),
        '|'.bright_blue(),
        code,
        ' ',
        '|'.bright_blue(),
        "^".repeat(
            code.chars()
                .count()
                .max(1)
        )
        .bright_red(),
        details
    )
    .trim_ascii()
    .to_string()
}

/// Format a skipped line with concise single-line output.
pub fn concise_line_error(error: &LineError) -> String {
    let (problem, _) = generate_error_message(error);

    format!(
        "{}: {}:{} {}",
        "warning".bright_yellow(),
        error
            .filename()
            .to_string_lossy(),
        error.line(),
        problem.bold(),
    )
}

/// Format a fatal file problem with concise single-line output.
pub fn concise_file_error(error: &FileError) -> String {
    let (problem, _) = generate_file_message(error);

    format!(
        "{}: {}: {}",
        "error".bright_red(),
        error
            .filename()
            .display(),
        problem.bold()
    )
}

/// Format a fatal file problem along with an explanation, if there is one.
pub fn full_file_error(error: &FileError) -> String {
    let (_, details) = generate_file_message(error);

    if details.is_empty() {
        concise_file_error(error)
    } else {
        format!("{}\n\n{}", concise_file_error(error), details)
    }
}
