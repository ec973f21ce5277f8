#[cfg(test)]
mod info {
    use serde_json::json;

    use eim::language::{LineError, Tag};
    use eim::parsing::{self, Silent};

    use crate::{site, write};

    #[test]
    fn session_with_numbered_songs() {
        let (_guard, dir) = site("DUBLIN");
        let content = r#"SONGS , symbol "R014.wav-S001.wav-S012.wav" ;
START , symbol "12:57:39" ;
TEST , symbol "12:58:04" ;
"song1" , symbol "12:59:30" ;
"song3" , symbol "13:03:10" ;
"song2" , symbol "13:01:04" ;
END , symbol "13:05:29" ;
DATE , symbol "12-20-2012" ;
"#;
        let path = write(&dir, "T1_S0127_1nfo.txt", content);

        let outcome = parsing::parse(&path, &Silent).unwrap();
        assert!(outcome
            .skipped
            .is_empty());

        let document = serde_json::to_value(&outcome.document).unwrap();
        assert_eq!(
            document["info"],
            json!({
                "date": "2012-12-20",
                "media": ["R014", "S001", "S012"],
                "timestamps": {
                    "start": "2012-12-20T12:57:39",
                    "test": "2012-12-20T12:58:04",
                    "end": "2012-12-20T13:05:29",
                    "media": [
                        "2012-12-20T12:59:30",
                        "2012-12-20T13:01:04",
                        "2012-12-20T13:03:10"
                    ]
                }
            })
        );
    }

    #[test]
    fn session_with_coded_songs() {
        let (_guard, dir) = site("DUBLIN");
        let content = "DATE, 08-05-2010;\n\
                       SONGS, H015.wav-T001.wav;\n\
                       START, 17:20:00;\n\
                       T001, 17:29:38;\n\
                       H015, 17:24:02;\n\
                       R014, 17:35:00;\n\
                       END, 17:40:12;\n";
        let path = write(&dir, "T1_S0127_1nfo.txt", content);

        let outcome = parsing::parse(&path, &Silent).unwrap();
        assert!(outcome
            .skipped
            .is_empty());

        let document = serde_json::to_value(&outcome.document).unwrap();
        let info = &document["info"];
        assert_eq!(info["media"], json!(["H015", "T001"]));
        assert_eq!(
            info["timestamps"]["media"],
            json!(["2010-08-05T17:24:02", "2010-08-05T17:29:38"])
        );
        assert_eq!(info["timestamps"]["test"], json!(null));
    }

    #[test]
    fn timestamps_without_a_date_are_skipped() {
        let (_guard, dir) = site("DUBLIN");
        let content = "SONGS, R014.wav-S001.wav-S012.wav;\nSTART, 12:57:39;\nLANGUAGE, English;\n";
        let path = write(&dir, "T1_S0127_1nfo.txt", content);

        let outcome = parsing::parse(&path, &Silent).unwrap();
        assert_eq!(
            outcome
                .skipped
                .len(),
            2
        );
        assert_eq!(outcome.skipped[0].tag(), Tag::StartTimestamp);
        assert_eq!(outcome.skipped[0].line(), 2);
        assert!(matches!(outcome.skipped[1], LineError::Unprocessed { line: 3, .. }));

        let document = serde_json::to_value(&outcome.document).unwrap();
        assert_eq!(document["info"]["date"], json!(null));
        assert_eq!(document["info"]["media"], json!(["R014", "S001", "S012"]));
    }
}
