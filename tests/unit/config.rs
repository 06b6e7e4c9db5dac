use super::*;

#[test]
fn empty_object_takes_defaults() {
    let s = Settings::from_reader("{}".as_bytes()).unwrap();
    assert_eq!(s, Settings::default());
    assert_eq!(s.fps().unwrap(), Fps::integer(30).unwrap());
    assert_eq!(s.generator_opts(), GeneratorOpts::default());
}

#[test]
fn partial_override() {
    let s = Settings::from_reader(r#"{"fps": 24, "hands_dir": "assets/hands"}"#.as_bytes())
        .unwrap();
    assert_eq!(s.fps, 24);
    assert_eq!(s.video_crf, 23);
    assert_eq!(s.hands_dir.as_deref(), Some(Path::new("assets/hands")));
}

#[test]
fn rejects_bad_values() {
    assert!(Settings::from_reader(r#"{"fps": 0}"#.as_bytes()).is_err());
    assert!(Settings::from_reader(r#"{"video_crf": 60}"#.as_bytes()).is_err());
    assert!(Settings::from_reader(r#"{"trailing_hold_secs": -1.0}"#.as_bytes()).is_err());
    assert!(Settings::from_reader("not json".as_bytes()).is_err());
}

#[test]
fn missing_file_is_a_validation_error() {
    let err = Settings::from_path("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().starts_with("validation error:"));
}
