//! Tests for the search decision tree.

use deckhand::cache::SessionCache;
use deckhand::policy::SearchPolicy;
use deckhand::types::CardRecord;

fn seeded(creatures: usize, supports: usize, energies: usize) -> SessionCache {
    let mut cache = SessionCache::new("u1", None);
    let mut cards = Vec::new();
    for (card_type, count) in [
        ("Creature", creatures),
        ("Support", supports),
        ("Energy", energies),
    ] {
        for i in 0..count {
            cards.push(
                CardRecord::new(format!("{card_type}-{i}"), format!("{card_type} {i}"))
                    .with_card_type(card_type),
            );
        }
    }
    cache.add_discovered_cards(&cards, "seed batch");
    cache
}

#[test]
fn empty_cache_always_searches() {
    let policy = SearchPolicy::new();
    let cache = SessionCache::new("u1", None);

    assert!(policy.should_search("hello", &cache));
    // Even question phrasing seeds an empty session.
    assert!(policy.should_search("what cards do we have so far", &cache));
}

#[test]
fn explicit_support_request_searches_below_the_cap() {
    let policy = SearchPolicy::new();
    let cache = seeded(1, 0, 0);

    assert!(policy.should_search("find trainer cards", &cache));
}

#[test]
fn support_request_at_cap_with_full_deck_is_suppressed() {
    let policy = SearchPolicy::new();
    let cache = seeded(0, 60, 0);

    assert!(!policy.should_search("find support cards", &cache));
}

#[test]
fn energy_request_searches_below_the_cap() {
    let policy = SearchPolicy::new();
    let cache = seeded(1, 0, 0);

    assert!(policy.should_search("i need energy for my deck", &cache));
}

#[test]
fn creature_request_at_cap_falls_through_to_question_handling() {
    let policy = SearchPolicy::new();
    let cache = seeded(20, 0, 0);

    // "can you" is question phrasing; with twenty creatures cached the
    // category rule no longer overrides it.
    assert!(!policy.should_search("can you find attackers", &cache));
}

#[test]
fn unexplored_concept_triggers_a_search() {
    let policy = SearchPolicy::new();
    let cache = seeded(1, 0, 0);

    assert!(policy.should_search("find spread damage cards", &cache));
}

#[test]
fn explored_concept_defers_to_the_cache() {
    let policy = SearchPolicy::new();
    let mut cache = seeded(1, 0, 0);
    cache.add_discovered_cards(&[], "spread damage sweep");

    assert!(!policy.should_search("can you find spread damage synergies", &cache));
}

#[test]
fn plain_questions_answer_from_cache() {
    let policy = SearchPolicy::new();
    let cache = seeded(1, 0, 0);

    assert!(!policy.should_search("what should i add next", &cache));
    assert!(!policy.should_search("how is the deck shaping up", &cache));
}

#[test]
fn neutral_messages_search_until_the_deck_is_full() {
    let policy = SearchPolicy::new();

    let partial = seeded(3, 0, 0);
    assert!(policy.should_search("tell me more", &partial));

    let full = seeded(30, 20, 10);
    assert!(!policy.should_search("thanks, this deck looks solid", &full));
}
