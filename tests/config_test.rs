// Configuration file handling
//
// Config files are partial: unset keys keep their defaults, and the resulting
// Config builds a working engine.

use anyhow::Result;
use std::io::Write;
use talksafe::config::{load_config_from_path, Config};

fn config_file(contents: &str) -> Result<tempfile::NamedTempFile> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    file.write_all(contents.as_bytes())?;
    Ok(file)
}

#[test]
fn test_config_builds_engine_with_external_catalog() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let catalog_path = dir.path().join("catalog.toml");
    std::fs::write(
        &catalog_path,
        r#"
default_language = "english"

[languages.english]
fallback_category = "chat"
crisis_category = "urgent"

[[languages.english.topics]]
name = "chat"
patterns = ["hello"]
responses = ["Custom hello"]

[[languages.english.topics]]
name = "urgent"
patterns = ["suicide"]
responses = ["Call 112"]
"#,
    )?;

    let file = config_file(&format!(
        "catalog_path = {:?}\nseed = 5\nturn_window = 2\nmax_input_chars = 40\n",
        catalog_path.display().to_string()
    ))?;
    let config = load_config_from_path(file.path())?;
    assert_eq!(config.mood_window, Config::default().mood_window);

    let mut engine = config.build_engine()?;
    let mut state = engine.new_conversation_state();
    for _ in 0..3 {
        let reply = engine.generate("hello", &mut state);
        assert_eq!(reply.response, "Custom hello");
    }
    assert_eq!(state.turn_count(), 2);

    let long = "x".repeat(100);
    engine.generate(&long, &mut state);
    let last = state.last_turn().expect("turn recorded");
    assert_eq!(last.user_text.chars().count(), 40);
    Ok(())
}

#[test]
fn test_external_crisis_keywords() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let keywords = dir.path().join("crisis_keywords.json");
    std::fs::write(
        &keywords,
        r#"{"crisis_keywords": ["i no fit again"], "severity_indicators": ["now now"]}"#,
    )?;

    let config = Config {
        crisis_keywords_path: Some(keywords),
        seed: Some(1),
        ..Config::default()
    };
    let mut engine = config.build_engine()?;
    let mut state = engine.new_conversation_state();

    assert!(engine.generate("I no fit again", &mut state).is_crisis);

    // Catalog crisis patterns alone never select the crisis replies
    let reply = engine.generate("I want to die", &mut state);
    assert!(!reply.is_crisis);
    assert_ne!(reply.topic.as_str(), "crisis");
    assert_eq!(reply.topic.as_str(), "greetings");
    assert!(!reply.response.contains("112"));
    Ok(())
}

#[test]
fn test_invalid_values_rejected() -> Result<()> {
    let file = config_file("mood_window = 0\n")?;
    assert!(load_config_from_path(file.path()).is_err());

    let file = config_file("turn_window = \"eight\"\n")?;
    assert!(load_config_from_path(file.path()).is_err());
    Ok(())
}

#[test]
fn test_missing_catalog_fails_build() {
    let config = Config {
        catalog_path: Some("/nonexistent/talksafe/catalog.toml".into()),
        ..Config::default()
    };
    let err = config.build_engine().err().expect("build should fail");
    assert!(format!("{:#}", err).contains("Failed to load catalog"));
}
