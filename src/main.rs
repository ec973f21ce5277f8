use clap::{Arg, ArgAction, Command};
use owo_colors::OwoColorize;
use std::path::Path;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use eim::batch;
use eim::output;
use eim::parsing::{self, Silent, Tracing};

mod problem;

fn main() {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    let matches = Command::new("eim")
        .version(VERSION)
        .propagate_version(true)
        .author("Andrew Cowie")
        .about("Parse Emotion in Motion experiment logs into JSON documents.")
        .disable_help_subcommand(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log progress in detail. The EIM_LOG environment variable, if set, takes precedence."),
        )
        .subcommand(
            Command::new("check")
                .about("Parse the given file and report every line that had to be skipped")
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The experiment log file to check."),
                ),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse the given file and emit its JSON document")
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help("Write the document to this file rather than to standard output."),
                )
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The experiment log file to parse."),
                ),
        )
        .subcommand(
            Command::new("walk")
                .about("Parse every experiment log file below a directory")
                .arg(
                    Arg::new("dir")
                        .short('d')
                        .long("dir")
                        .env("EIM_ROOT")
                        .default_value(".")
                        .help("The directory to search for experiment log files."),
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .action(ArgAction::SetTrue)
                        .help("Parse files and print the summary, but do not write any JSON."),
                ),
        )
        .subcommand(
            Command::new("compile")
                .about("Merge the JSON documents of each session into one document per session")
                .arg(
                    Arg::new("dir")
                        .short('d')
                        .long("dir")
                        .env("EIM_ROOT")
                        .default_value(".")
                        .help("The directory to search for JSON documents."),
                ),
        )
        .get_matches();

    let verbose = matches.get_flag("verbose");
    let filter = EnvFilter::try_from_env("EIM_LOG")
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!("Starting eim {}", VERSION);

    match matches.subcommand() {
        Some(("check", submatches)) => {
            let filename = submatches
                .get_one::<String>("filename")
                .unwrap(); // argument is required

            let outcome = match parsing::parse(Path::new(filename), &Silent) {
                Ok(outcome) => outcome,
                Err(error) => {
                    eprintln!("{}", problem::full_file_error(&error));
                    std::process::exit(1);
                }
            };

            for error in &outcome.skipped {
                eprintln!("{}\n", problem::full_line_error(error));
            }

            if outcome
                .skipped
                .is_empty()
            {
                eprintln!("{}: {}", "ok".bright_green(), filename);
            } else {
                eprintln!(
                    "{}: {} line{} skipped",
                    filename,
                    outcome
                        .skipped
                        .len(),
                    if outcome
                        .skipped
                        .len()
                        == 1
                    {
                        ""
                    } else {
                        "s"
                    }
                );
            }
        }
        Some(("parse", submatches)) => {
            let filename = submatches
                .get_one::<String>("filename")
                .unwrap(); // argument is required

            let outcome = match parsing::parse(Path::new(filename), &Tracing) {
                Ok(outcome) => outcome,
                Err(error) => {
                    eprintln!("{}", problem::concise_file_error(&error));
                    std::process::exit(1);
                }
            };

            for error in &outcome.skipped {
                eprintln!("{}", problem::concise_line_error(error));
            }

            let json = match serde_json::to_string_pretty(&outcome.document) {
                Ok(json) => json,
                Err(error) => {
                    eprintln!("{}: {}", "error".bright_red(), error);
                    std::process::exit(1);
                }
            };

            match submatches.get_one::<String>("output") {
                Some(target) => {
                    if let Err(error) = std::fs::write(target, json) {
                        eprintln!("{}: {}: {}", "error".bright_red(), target, error);
                        std::process::exit(1);
                    }
                }
                None => println!("{}", json),
            }
        }
        Some(("walk", submatches)) => {
            let dir = submatches
                .get_one::<String>("dir")
                .unwrap(); // has a default
            let emit = !submatches.get_flag("dry-run");

            let tally = batch::run(Path::new(dir), &Tracing, emit);

            match output::summary(&tally) {
                Ok(text) => print!("{}", text),
                Err(error) => {
                    eprintln!("{}: {}", "error".bright_red(), error);
                    std::process::exit(1);
                }
            }

            if tally.failed > 0 {
                std::process::exit(1);
            }
        }
        Some(("compile", submatches)) => {
            let dir = submatches
                .get_one::<String>("dir")
                .unwrap(); // has a default

            match output::compile(Path::new(dir)) {
                Ok(count) => println!("compiled: {}", count),
                Err(error) => {
                    eprintln!("{}: {}", "error".bright_red(), error);
                    std::process::exit(1);
                }
            }
        }
        Some(_) => {
            println!("No valid subcommand was used")
        }
        None => {
            println!("usage: eim [COMMAND] ...");
            println!("Try '--help' for more information.");
        }
    }
}
