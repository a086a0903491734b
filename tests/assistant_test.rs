//! End-to-end tests for the assistant with mocked collaborators.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio_test::assert_ok;
use deckhand::cache::lock;
use deckhand::types::{CardFilter, CardRecord};
use deckhand::{CardSearchProvider, Deckhand, DeckhandError, ResponseGenerator, Result};

/// Search provider returning a fixed card list and logging every call.
struct StaticSearch {
    cards: Vec<CardRecord>,
    calls: Mutex<Vec<String>>,
}

impl StaticSearch {
    fn new(cards: Vec<CardRecord>) -> Arc<Self> {
        Arc::new(Self {
            cards,
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CardSearchProvider for StaticSearch {
    async fn search(&self, filter: &CardFilter) -> Result<Vec<CardRecord>> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("filter:{:?}", filter.card_types));
        Ok(self.cards.clone())
    }

    async fn search_text(&self, query: &str, limit: usize) -> Result<Vec<CardRecord>> {
        self.calls.lock().unwrap().push(format!("text:{query}:{limit}"));
        Ok(self.cards.clone())
    }
}

/// Search provider that always fails.
struct FailingSearch;

#[async_trait]
impl CardSearchProvider for FailingSearch {
    async fn search(&self, _filter: &CardFilter) -> Result<Vec<CardRecord>> {
        Err(DeckhandError::Search("store offline".to_string()))
    }

    async fn search_text(&self, _query: &str, _limit: usize) -> Result<Vec<CardRecord>> {
        Err(DeckhandError::Search("store offline".to_string()))
    }
}

/// Generator that echoes the message and captures every prompt context.
struct EchoGenerator {
    contexts: Mutex<Vec<String>>,
}

impl EchoGenerator {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            contexts: Mutex::new(Vec::new()),
        })
    }

    fn contexts(&self) -> Vec<String> {
        self.contexts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResponseGenerator for EchoGenerator {
    async fn generate(&self, context: &str, message: &str) -> Result<String> {
        self.contexts.lock().unwrap().push(context.to_string());
        Ok(format!("echo: {message}"))
    }
}

fn creature(id: &str, name: &str) -> CardRecord {
    CardRecord::new(id, name).with_card_type("Creature")
}

#[test]
fn builder_requires_both_collaborators() {
    let err = Deckhand::builder().build().unwrap_err();
    assert!(matches!(err, DeckhandError::NoSearchProvider));

    let err = Deckhand::builder()
        .search_provider(StaticSearch::new(Vec::new()))
        .build()
        .unwrap_err();
    assert!(matches!(err, DeckhandError::NoGenerator));
}

#[tokio::test]
async fn first_message_seeds_the_session() {
    let search = StaticSearch::new(vec![creature("c1", "Alpha"), creature("c2", "Beta")]);
    let generator = EchoGenerator::new();
    let assistant = Deckhand::builder()
        .search_provider(search.clone())
        .response_generator(generator)
        .build()
        .unwrap();

    let response = tokio_test::assert_ok!(
        assistant.handle_message("u1", Some("d1"), "hello there").await
    );

    assert!(response.searched);
    assert_eq!(response.cards_found.len(), 2);
    assert_eq!(response.reply, "echo: hello there");
    assert_eq!(response.progress.total_discovered, 2);
    assert_eq!(response.progress.searches, 1);
}

#[tokio::test]
async fn follow_up_question_is_answered_from_cache() {
    let search = StaticSearch::new(vec![creature("c1", "Alpha")]);
    let generator = EchoGenerator::new();
    let assistant = Deckhand::builder()
        .search_provider(search.clone())
        .response_generator(generator)
        .build()
        .unwrap();

    assistant
        .handle_message("u1", None, "hello there")
        .await
        .unwrap();
    let response = assistant
        .handle_message("u1", None, "what should i add next")
        .await
        .unwrap();

    assert!(!response.searched);
    assert!(response.cards_found.is_empty());
    // No provider call beyond the first, and no extra history entry.
    assert_eq!(search.calls().len(), 1);
    assert_eq!(response.progress.searches, 1);
    assert_eq!(response.progress.total_discovered, 1);
}

#[tokio::test]
async fn provider_failure_degrades_to_cache() {
    let generator = EchoGenerator::new();
    let assistant = Deckhand::builder()
        .search_provider(Arc::new(FailingSearch))
        .response_generator(generator)
        .build()
        .unwrap();

    let response = assistant
        .handle_message("u1", None, "hello there")
        .await
        .unwrap();

    assert!(response.searched);
    assert!(response.cards_found.is_empty());
    assert_eq!(response.reply, "echo: hello there");
    // The failed search still leaves a history trace.
    assert_eq!(response.progress.searches, 1);
}

#[tokio::test]
async fn generation_context_carries_the_discovery_summary() {
    let search = StaticSearch::new(vec![creature("c1", "Alpha")]);
    let generator = EchoGenerator::new();
    let assistant = Deckhand::builder()
        .search_provider(search)
        .response_generator(generator.clone())
        .build()
        .unwrap();

    assistant
        .handle_message("u1", None, "hello there")
        .await
        .unwrap();

    let contexts = generator.contexts();
    assert_eq!(contexts.len(), 1);
    assert!(contexts[0].contains("## Discovery Summary"));
    assert!(contexts[0].contains("**Total Cards Discovered**: 1"));
    assert!(contexts[0].contains("### Next Search Suggestion:"));
}

#[tokio::test]
async fn declared_strategy_biases_scoring_in_the_same_turn() {
    let search = StaticSearch::new(vec![CardRecord::new("f1", "Emberstorm Fox")]);
    let generator = EchoGenerator::new();
    let assistant = Deckhand::builder()
        .search_provider(search)
        .response_generator(generator)
        .build()
        .unwrap();

    assistant
        .handle_message("u1", Some("d1"), "My strategy is emberstorm aggro")
        .await
        .unwrap();

    let handle = assistant.registry().get_or_create("u1", Some("d1"));
    let cache = lock(&handle);
    assert_eq!(cache.strategy_context(), "emberstorm aggro");
    // Base 1.0 plus the strategy-word name bonus.
    let score = cache.get("f1").unwrap().relevance_score;
    assert!((score - 1.4).abs() < 1e-6);
}

#[tokio::test]
async fn concept_messages_route_to_text_search() {
    let search = StaticSearch::new(Vec::new());
    let generator = EchoGenerator::new();
    let assistant = Deckhand::builder()
        .search_provider(search.clone())
        .response_generator(generator)
        .build()
        .unwrap();

    assistant
        .handle_message("u1", None, "find spread damage cards")
        .await
        .unwrap();

    assert_eq!(search.calls(), vec!["text:damage to each:50"]);
}

#[tokio::test]
async fn category_messages_route_to_filtered_search() {
    let search = StaticSearch::new(Vec::new());
    let generator = EchoGenerator::new();
    let assistant = Deckhand::builder()
        .search_provider(search.clone())
        .response_generator(generator)
        .build()
        .unwrap();

    assistant
        .handle_message("u1", None, "find energy cards")
        .await
        .unwrap();

    assert_eq!(search.calls(), vec![r#"filter:["Energy"]"#]);
}
