// End-to-end conversation engine behaviour
//
// This test suite verifies that:
// 1. Crisis keywords always yield an emergency reply
// 2. Language, topic and mood follow the documented scenarios
// 3. Histories stay bounded and can be reset
// 4. Seeded engines are reproducible

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use talksafe::catalog::{CatalogFile, LanguageSection, ResponseCatalog, TopicCategory, TopicEntry};
use talksafe::crisis::CrisisDetector;
use talksafe::{ConversationEngine, LanguageCode, MoodLabel};

fn engine(seed: u64) -> Result<ConversationEngine> {
    Ok(ConversationEngine::seeded(
        ResponseCatalog::shared_builtin()?,
        CrisisDetector::builtin()?,
        seed,
    )?)
}

fn candidates(engine: &ConversationEngine, language: LanguageCode, topic: &str) -> Vec<String> {
    engine
        .catalog()
        .responses(language, &TopicCategory::from(topic))
        .map(<[String]>::to_vec)
        .unwrap_or_default()
}

#[test]
fn test_every_crisis_keyword_triggers_crisis() -> Result<()> {
    let mut engine = engine(1)?;
    let detector = CrisisDetector::builtin()?;

    for keyword in detector.all_keywords() {
        for text in [
            keyword.clone(),
            format!("honestly {} now", keyword.to_uppercase()),
            format!("wetin I go do, {}", keyword),
        ] {
            let mut state = engine.new_conversation_state();
            let reply = engine.generate(&text, &mut state);
            assert!(reply.is_crisis, "not flagged: {:?}", text);
            assert!(reply.response.contains("112"), "no directive for {:?}", text);
            assert_eq!(reply.topic.as_str(), "crisis");
        }
    }
    Ok(())
}

#[test]
fn test_scenario_kill_myself_tonight() -> Result<()> {
    let mut engine = engine(2)?;
    let mut state = engine.new_conversation_state();

    let reply = engine.generate("I want to kill myself tonight", &mut state);
    assert!(reply.is_crisis);
    assert!(reply.response.contains("112"));
    Ok(())
}

#[test]
fn test_scenario_pidgin_greeting() -> Result<()> {
    let mut engine = engine(3)?;
    let mut state = engine.new_conversation_state();

    let reply = engine.generate("wetin dey happen, how far", &mut state);
    assert_eq!(reply.language, LanguageCode::Pidgin);
    assert_eq!(reply.topic.as_str(), "greetings");
    assert!(candidates(&engine, LanguageCode::Pidgin, "greetings").contains(&reply.response));
    Ok(())
}

#[test]
fn test_scenario_exam_stress() -> Result<()> {
    let mut engine = engine(4)?;
    let mut state = engine.new_conversation_state();

    let reply = engine.generate("I have an exam tomorrow and I'm so stressed", &mut state);
    assert_eq!(reply.language, LanguageCode::English);
    assert_eq!(reply.topic.as_str(), "academic_stress");
    assert!(!reply.is_crisis);
    let expected = candidates(&engine, LanguageCode::English, "academic_stress");
    assert!(expected.contains(&reply.response));
    Ok(())
}

#[test]
fn test_scenario_hello() -> Result<()> {
    let mut engine = engine(5)?;
    let mut state = engine.new_conversation_state();

    let reply = engine.generate("hello", &mut state);
    assert_eq!(reply.mood, MoodLabel::Okay);
    assert_eq!(reply.topic.as_str(), "greetings");
    Ok(())
}

#[test]
fn test_pidgin_topics_missing_in_pidgin_still_answer() -> Result<()> {
    let mut engine = engine(6)?;
    let mut state = engine.new_conversation_state();

    // Pidgin has no relationship topic; the reply still comes from a real set
    let reply = engine.generate("my boyfriend wahala", &mut state);
    assert_eq!(reply.language, LanguageCode::Pidgin);
    assert!(!reply.response.is_empty());
    let expected = candidates(&engine, LanguageCode::Pidgin, reply.topic.as_str());
    assert!(expected.contains(&reply.response));
    Ok(())
}

#[test]
fn test_history_keeps_most_recent_turns_in_order() -> Result<()> {
    let mut engine = engine(7)?;
    let mut state = engine.new_conversation_state();
    let capacity = state.turn_capacity();

    let messages: Vec<String> = (0..capacity + 5).map(|i| format!("hello {}", i)).collect();
    for message in &messages {
        engine.generate(message, &mut state);
    }

    let kept: Vec<&str> = state.turns().map(|t| t.user_text.as_str()).collect();
    let expected: Vec<&str> = messages[5..].iter().map(String::as_str).collect();
    assert_eq!(kept, expected);
    assert!(state.turns().all(|t| t.timestamp.is_some()));
    Ok(())
}

#[test]
fn test_reset_history_starts_fresh() -> Result<()> {
    let mut engine = engine(8)?;
    let mut state = engine.new_conversation_state();
    engine.generate("I feel anxious", &mut state);
    engine.generate("thanks, better now", &mut state);

    engine.reset_history(&mut state);
    assert!(state.is_empty());
    assert!(state.recent_moods(5).is_empty());
    Ok(())
}

#[test]
fn test_same_seed_same_replies() -> Result<()> {
    let texts = ["hello", "I feel so sad and empty", "school fees", "how far"];

    let mut a = engine(99)?;
    let mut b = engine(99)?;
    let mut sa = a.new_conversation_state();
    let mut sb = b.new_conversation_state();

    for text in texts {
        assert_eq!(a.generate(text, &mut sa), b.generate(text, &mut sb));
    }
    Ok(())
}

#[test]
fn test_engines_share_one_catalog() -> Result<()> {
    let catalog = ResponseCatalog::shared_builtin()?;
    let first = ConversationEngine::seeded(Arc::clone(&catalog), CrisisDetector::builtin()?, 1)?;
    let second = ConversationEngine::with_rng(
        Arc::clone(&catalog),
        CrisisDetector::builtin()?,
        StdRng::seed_from_u64(2),
    )?;

    assert!(Arc::ptr_eq(first.catalog(), second.catalog()));
    Ok(())
}

#[test]
fn test_mood_is_deterministic() -> Result<()> {
    let mut engine = engine(10)?;
    let mut state = engine.new_conversation_state();

    let a = engine.generate("I'm happy but stressed", &mut state).mood;
    let b = engine.generate("things are fine, just awful exams", &mut state).mood;
    assert_eq!(a, MoodLabel::Okay);
    assert_eq!(a, b);
    Ok(())
}

#[test]
fn test_custom_catalog_crisis_in_second_language() -> Result<()> {
    let mut languages = std::collections::BTreeMap::new();
    languages.insert(
        "english".to_string(),
        LanguageSection {
            fallback_category: "greetings".to_string(),
            crisis_category: Some("crisis".to_string()),
            topics: vec![
                TopicEntry::new("greetings", ["hello"], ["Hello"]),
                TopicEntry::new("crisis", ["suicide"], ["Call 112 now"]),
            ],
        },
    );
    languages.insert(
        "pidgin".to_string(),
        LanguageSection {
            fallback_category: "greetings".to_string(),
            crisis_category: Some("wahala_crisis".to_string()),
            topics: vec![
                TopicEntry::new("greetings", ["how far"], ["How far!"]),
                TopicEntry::new("wahala_crisis", ["i wan die"], ["Abeg call 112 now now"]),
            ],
        },
    );
    let catalog = ResponseCatalog::new(CatalogFile {
        default_language: "english".to_string(),
        emergency_contact: "112".to_string(),
        languages,
    })?;

    let mut engine = ConversationEngine::seeded(Arc::new(catalog), CrisisDetector::builtin()?, 1)?;
    let mut state = engine.new_conversation_state();

    let reply = engine.generate("how far, I wan die", &mut state);
    assert!(reply.is_crisis);
    assert_eq!(reply.topic.as_str(), "wahala_crisis");
    assert_eq!(reply.response, "Abeg call 112 now now");
    Ok(())
}
