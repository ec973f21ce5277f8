#[cfg(test)]
mod answers {
    use serde_json::json;

    use eim::language::{FileVersion, LineError, Payload, Tag};
    use eim::parsing::{self, Parser, Silent};

    use crate::{backdate, site, write};

    const QUESTIONNAIRE: &str = r#""01a_Sex" , symbol Female ;
"01b_DOB" , 1983 ;
"02_Nationality" , symbol Filipino ;
"03_Musical_Background" , symbol No ;
"03_Musical_Expertise" , 3 ;
"04_Hearing_Impairments" , symbol No ;
"04_Visual_Impairments" , symbol Yes ;
"05_Music_Style_Pop" , 1 ;
"05_Music_Style_Jazz" , 1 ;
"05_Music_Style_Dance" , 1 ;
"05_Music_Style_Jazz" , 1 ;
"05_Music_Style_Hip_Hop" , 1 ;
"05_Music_Style_None" , 0 ;
"Song2_Scale1_Engagement" , 4 ;
"Song1_Scale1_Engagement" , 3 ;
"Song1_Scale4_Power" , 2 ;
"Song3_Scale6_Like_Dislike" , 5 ;
"FinalQ_Most_Enjoyed" , 2 ;
"FinalQ_Most_Engaged" , 1 ;
"EmotionIndex2" , 36.4641 ;
"EmotionIndex1" , 0.598997 ;
"#;

    #[test]
    fn complete_questionnaire() {
        let (_guard, dir) = site("DUBLIN");
        let path = write(&dir, "T1_S0127_answers.txt", QUESTIONNAIRE);

        let outcome = parsing::parse(&path, &Silent).unwrap();
        assert!(outcome
            .skipped
            .is_empty());

        let document = serde_json::to_value(&outcome.document).unwrap();
        assert_eq!(
            document["metadata"],
            json!({ "location": "dublin", "terminal": 1, "session_number": 127 })
        );

        let answers = &document["answers"];
        assert_eq!(answers["sex"], "female");
        assert_eq!(answers["dob"], 1983);
        assert_eq!(answers["nationality"], "filipino");
        assert_eq!(answers["musical_background"], false);
        assert_eq!(answers["musical_expertise"], 3);
        assert_eq!(answers["hearing_impairments"], false);
        assert_eq!(answers["visual_impairments"], true);
        assert_eq!(answers["most_enjoyed"], 2);
        assert_eq!(answers["most_engaged"], 1);
        assert_eq!(answers["music_styles"], json!(["pop", "jazz", "dance", "hip_hop"]));
        assert_eq!(answers["emotion_indices"], json!([0.598997, 36.4641]));
        assert_eq!(answers["song_ratings"]["engagement"], json!([3, 4]));
        assert_eq!(answers["song_ratings"]["power"], json!([2]));
        assert_eq!(answers["song_ratings"]["like_dislike"], json!([null, null, 5]));
    }

    #[test]
    fn one_bad_line_does_not_lose_the_file() {
        let (_guard, dir) = site("DUBLIN");

        let mut content = String::new();
        for line in QUESTIONNAIRE
            .lines()
            .take(10)
        {
            content.push_str(line);
            content.push('\n');
        }
        content.push_str("SOME CRAZY LINE\n");
        let path = write(&dir, "T1_S0127_answers.txt", &content);

        let outcome = parsing::parse(&path, &Silent).unwrap();

        assert_eq!(
            outcome
                .skipped
                .len(),
            1
        );
        let skipped = &outcome.skipped[0];
        assert!(matches!(skipped, LineError::Unprocessed { .. }));
        assert_eq!(skipped.line(), 11);
        assert_eq!(skipped.text(), "SOME CRAZY LINE");

        let Payload::Answers(answers) = outcome
            .document
            .payload
        else {
            panic!("expected answers");
        };
        assert_eq!(answers.sex, Some("female".to_string()));
        assert_eq!(answers.dob, Some(1983));
        assert_eq!(answers.nationality, Some("filipino".to_string()));
        assert_eq!(answers.musical_background, Some(false));
        assert_eq!(answers.musical_expertise, Some(3));
        assert_eq!(answers.hearing_impairments, Some(false));
        assert_eq!(answers.visual_impairments, Some(true));
        assert_eq!(answers.music_styles, vec!["pop", "jazz", "dance"]);
    }

    #[test]
    fn malformed_fields_are_named() {
        let (_guard, dir) = site("DUBLIN");
        let content = r#""01a_Sex" , symbol Female ;
"FinalQ_Most_Engaged" , lots ;
"EmotionIndex1" ;
"#;
        let path = write(&dir, "T1_S0127_answers.txt", content);

        let outcome = parsing::parse(&path, &Silent).unwrap();
        let tags: Vec<Tag> = outcome
            .skipped
            .iter()
            .map(|error| error.tag())
            .collect();
        assert_eq!(tags, vec![Tag::MostEnjoyedEngaged, Tag::EmotionIndex]);
    }

    #[test]
    fn out_of_range_values_skipped() {
        let (_guard, dir) = site("DUBLIN");
        let content = r#""01a_Sex" , symbol Female ;
"Song4611686018427387904_Scale1_Engagement" , 3 ;
"EmotionIndex1" , NaN ;
"EmotionIndex2" , 0.5 ;
"01b_DOB" , 1983 ;
"#;
        let path = write(&dir, "T1_S0127_answers.txt", content);

        let outcome = parsing::parse(&path, &Silent).unwrap();
        let tags: Vec<Tag> = outcome
            .skipped
            .iter()
            .map(|error| error.tag())
            .collect();
        assert_eq!(tags, vec![Tag::SongScale, Tag::EmotionIndex]);

        let document = serde_json::to_value(&outcome.document).unwrap();
        let answers = &document["answers"];
        assert_eq!(answers["sex"], "female");
        assert_eq!(answers["dob"], 1983);
        assert_eq!(answers["song_ratings"], json!({}));
        assert_eq!(answers["emotion_indices"], json!([null, 0.5]));
    }

    #[test]
    fn unanswered_questions_stay_null() {
        let (_guard, dir) = site("DUBLIN");
        let content = r#""01a_Sex" , symbol ;
"01b_DOB" , 0 ;
"03_Musical_Background"
"Song1_Scale1_Engagement" ;
"#;
        let path = write(&dir, "T1_S0127_answers.txt", content);

        let outcome = parsing::parse(&path, &Silent).unwrap();
        assert!(outcome
            .skipped
            .is_empty());

        let document = serde_json::to_value(&outcome.document).unwrap();
        let answers = &document["answers"];
        assert_eq!(answers["sex"], json!(null));
        assert_eq!(answers["dob"], json!(null));
        assert_eq!(answers["musical_background"], json!(null));
        assert_eq!(answers["song_ratings"], json!({}));
    }

    #[test]
    fn historical_window_excludes_boilerplate() {
        let (_guard, dir) = site("DUBLIN");

        // one field outside the window, then exactly 41 lines inside it
        let mut content = String::from("\"01a_Sex\" , symbol Male ;\n");
        content.push_str("\"01b_DOB\" , 1979 ;\n");
        for i in 1..=40 {
            content.push_str(&format!("\"EmotionIndex{}\" , {}.5 ;\n", i, i));
        }
        let path = write(&dir, "T1_S0127_answers.txt", &content);
        backdate(&path, 2010, 10, 15);

        let mut parser = Parser::new(&path, &Silent).unwrap();
        assert_eq!(parser.version(), Some(FileVersion::V2));

        parser.scan(&parsing::load(&path).unwrap());
        let outcome = parser
            .finish()
            .unwrap();

        let Payload::Answers(answers) = outcome
            .document
            .payload
        else {
            panic!("expected answers");
        };
        assert_eq!(answers.sex, None);
        assert_eq!(answers.dob, Some(1979));
        assert_eq!(
            answers
                .emotion_indices
                .len(),
            40
        );
        assert_eq!(answers.emotion_indices[39], Some(40.5));
    }

    #[test]
    fn current_files_are_read_whole() {
        let (_guard, dir) = site("DUBLIN");

        let mut content = String::from("\"01a_Sex\" , symbol Male ;\n");
        for i in 1..=100 {
            content.push_str(&format!("\"EmotionIndex{}\" , {} ;\n", i, i));
        }
        let path = write(&dir, "T1_S0127_answers.txt", &content);
        backdate(&path, 2012, 12, 20);

        let outcome = parsing::parse(&path, &Silent).unwrap();
        let Payload::Answers(answers) = outcome
            .document
            .payload
        else {
            panic!("expected answers");
        };
        assert_eq!(answers.sex, Some("male".to_string()));
        assert_eq!(
            answers
                .emotion_indices
                .len(),
            100
        );
    }

    #[test]
    fn intermediate_state_is_dense() {
        let (_guard, dir) = site("DUBLIN");
        let path = write(&dir, "T1_S0127_answers.txt", "");

        let mut parser = Parser::with_version(&path, FileVersion::V5, &Silent).unwrap();

        parser
            .parse_line(r#""Song3_Scale2_Positivity" , 3 ;"#, 1)
            .unwrap();
        assert_eq!(
            parser
                .answers()
                .unwrap()
                .song_ratings["positivity"],
            vec![None, None, Some(3)]
        );

        parser
            .parse_line(r#""Song1_Scale2_Positivity" , 4 ;"#, 2)
            .unwrap();
        parser
            .parse_line(r#""Song2_Scale2_Positivity" , 1 ;"#, 3)
            .unwrap();
        assert_eq!(
            parser
                .answers()
                .unwrap()
                .song_ratings["positivity"],
            vec![Some(4), Some(1), Some(3)]
        );
    }
}
