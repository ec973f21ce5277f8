use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use tempfile::TempDir;

use eim::batch;
use eim::output;
use eim::parsing::Silent;

fn session() -> (TempDir, PathBuf) {
    let dir = tempfile::Builder::new()
        .prefix("eim")
        .tempdir()
        .unwrap();
    let terminal = dir
        .path()
        .join("DUBLIN")
        .join("T2");
    std::fs::create_dir_all(&terminal).unwrap();

    let files = [
        (
            "T2_S0448_answers.txt",
            "\"01a_Sex\" , symbol Female ;\n\"EmotionIndex1\" , 0.5 ;\nSOME CRAZY LINE\n",
        ),
        (
            "T2_S0448_1nfo.txt",
            "DATE, 12-20-2012;\nSONGS, R014.wav-S001.wav;\nSTART, 12:57:39;\n",
        ),
        ("T2_S0448_TEST.txt", "00:00.000 143 145.000 1 0 72.289 1\n"),
        ("T2_S0448_R014.txt", "00:00.000 150 151.000 0 0 80.000 0\n"),
        ("T2_S0448_RESET.txt", ""),
        ("T2_S0448_email.txt", "subject@example.com\n"),
        ("T2_S0448_notes.txt", "nothing to see\n"),
        ("T2_S0449_RESET.txt", "no slide here\n"),
    ];
    for (name, content) in files {
        std::fs::write(terminal.join(name), content).unwrap();
    }

    (dir, terminal)
}

fn read(path: &Path) -> Value {
    let content = std::fs::read_to_string(path).unwrap();
    serde_json::from_str(&content).unwrap()
}

#[test]
fn discovery_is_sorted() {
    let (dir, terminal) = session();
    let files = batch::discover(dir.path());

    assert_eq!(files.len(), 8);
    assert_eq!(files[0], terminal.join("T2_S0448_1nfo.txt"));
    let mut sorted = files.clone();
    sorted.sort();
    assert_eq!(files, sorted);
}

#[test]
fn batch_run_tallies_every_file() {
    let (dir, terminal) = session();
    let tally = batch::run(dir.path(), &Silent, true);

    assert_eq!(tally.by_kind["answers"], 1);
    assert_eq!(tally.by_kind["info"], 1);
    assert_eq!(tally.by_kind["test"], 1);
    assert_eq!(tally.by_kind["song"], 1);
    assert_eq!(tally.by_kind["reset"], 1);
    assert_eq!(tally.parsed(), 5);
    assert_eq!(tally.unknown, 1);
    assert_eq!(tally.failed, 1);
    assert_eq!(tally.skipped_lines, 1);

    assert!(terminal
        .join("T2_S0448_answers.json")
        .exists());
    assert!(!terminal
        .join("T2_S0449_RESET.json")
        .exists());
    assert!(!terminal
        .join("T2_S0448_email.json")
        .exists());
}

#[test]
fn dry_run_writes_nothing() {
    let (dir, terminal) = session();
    let tally = batch::run(dir.path(), &Silent, false);

    assert_eq!(tally.parsed(), 5);
    assert!(!terminal
        .join("T2_S0448_answers.json")
        .exists());
}

#[test]
fn sessions_compile_into_one_document() {
    let (dir, terminal) = session();
    batch::run(dir.path(), &Silent, true);

    let count = output::compile(dir.path()).unwrap();
    assert_eq!(count, 1);

    let compiled = read(&terminal.join("T2_S0448.json"));
    assert!(output::is_complete(&compiled));
    assert_eq!(
        compiled["metadata"],
        json!({ "location": "dublin", "terminal": 2, "session_number": 448 })
    );
    assert_eq!(compiled["answers"]["sex"], "female");
    assert_eq!(compiled["info"]["timestamps"]["start"], "2012-12-20T12:57:39");
    assert_eq!(compiled["reset"], json!(true));

    let signals = compiled["signals"]
        .as_object()
        .unwrap();
    assert!(signals.contains_key("test"));
    assert!(signals.contains_key("R014"));
}

#[test]
fn compiling_again_keeps_earlier_fields() {
    let (dir, terminal) = session();
    batch::run(dir.path(), &Silent, true);
    output::compile(dir.path()).unwrap();

    // a later fragment replaces leaves but keeps everything else
    std::fs::remove_file(terminal.join("T2_S0448_answers.json")).unwrap();
    std::fs::write(
        terminal.join("T2_S0448_debug.json"),
        r#"{ "debug": [ { "start": "12:58:30", "end": "13:01:04", "length": 154213.0 } ] }"#,
    )
    .unwrap();

    let count = output::compile(dir.path()).unwrap();
    assert_eq!(count, 1);

    let compiled = read(&terminal.join("T2_S0448.json"));
    assert_eq!(compiled["answers"]["sex"], "female");
    assert_eq!(compiled["debug"][0]["start"], "12:58:30");
}
