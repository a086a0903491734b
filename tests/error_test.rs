//! Tests for error display and conversions.

use deckhand::{DeckhandError, Result};

#[test]
fn display_messages_name_the_failing_concern() {
    assert_eq!(
        DeckhandError::Search("store offline".to_string()).to_string(),
        "card search failed: store offline"
    );
    assert_eq!(
        DeckhandError::Generation("model timeout".to_string()).to_string(),
        "response generation failed: model timeout"
    );
    assert_eq!(
        DeckhandError::InvalidInput("empty user id".to_string()).to_string(),
        "invalid input: empty user id"
    );
    assert_eq!(
        DeckhandError::NoSearchProvider.to_string(),
        "no card search provider configured"
    );
    assert_eq!(
        DeckhandError::NoGenerator.to_string(),
        "no response generator configured"
    );
    assert_eq!(
        DeckhandError::Configuration("ttl must be non-zero".to_string()).to_string(),
        "configuration error: ttl must be non-zero"
    );
}

#[test]
fn json_errors_convert_automatically() {
    fn parse(raw: &str) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(raw)?)
    }

    let err = parse("{not json").unwrap_err();
    assert!(matches!(err, DeckhandError::Json(_)));
    assert!(err.to_string().starts_with("JSON error:"));
}
