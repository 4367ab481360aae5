//! Integration tests for storing an event's brackets in one text slot.

use pentathlon_scoring::{
    advance_winner, generate_de_bracket, seeds_from_ranking, AgeCategory, BracketBook, BracketKey,
    DEBracket, Gender, MatchResult, RankingResult,
};
use uuid::Uuid;

fn ranked_bracket(names: &[&str]) -> DEBracket {
    let results: Vec<RankingResult> = names
        .iter()
        .enumerate()
        .map(|(i, n)| RankingResult::new(*n, 20 - i as u32, 300 - 7 * i as i32))
        .collect();
    generate_de_bracket(Uuid::new_v4(), &seeds_from_ranking(&results)).unwrap()
}

fn book() -> (BracketBook, BracketKey, BracketKey) {
    let men = BracketKey::new(Gender::Male, AgeCategory::Senior);
    let girls = BracketKey::new(Gender::Female, AgeCategory::U15);
    let mut book = BracketBook::new();
    book.insert(men, ranked_bracket(&["A", "B", "C", "D", "E"]));
    book.insert(girls, ranked_bracket(&["F", "G", "H"]));
    (book, men, girls)
}

#[test]
fn config_text_uses_string_keys_and_round_trips() {
    let (mut book, men, _) = book();
    let bracket = book.get_mut(&men).unwrap();
    let m = bracket.rounds[0].iter().find(|m| !m.is_bye).unwrap().clone();
    let winner = m.athlete_2.as_ref().unwrap().athlete_id;
    advance_winner(
        bracket,
        &MatchResult {
            match_id: m.id,
            winner_id: winner,
            score_1: 12,
            score_2: 15,
        },
    )
    .unwrap();

    let text = book.to_config_text().unwrap();
    let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert!(doc.get("male:senior").is_some());
    assert!(doc.get("female:u15").is_some());

    assert_eq!(BracketBook::from_config_text(&text), book);
}

#[test]
fn unreadable_text_means_no_brackets() {
    assert!(BracketBook::from_config_text("").is_empty());
    assert!(BracketBook::from_config_text("{ not json").is_empty());
    assert!(BracketBook::from_config_text("[1, 2, 3]").is_empty());
}

#[test]
fn bad_entries_are_skipped_individually() {
    let (book, men, girls) = book();
    let mut doc: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(&book.to_config_text().unwrap()).unwrap();
    doc.insert("male:veteran".into(), doc["male:senior"].clone());
    doc["female:u15"]["tableau_size"] = serde_json::json!(16);
    let text = serde_json::to_string(&doc).unwrap();

    let loaded = BracketBook::from_config_text(&text);
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded.get(&men), book.get(&men));
    assert!(loaded.get(&girls).is_none());
}

#[test]
fn reset_clears_only_that_group() {
    let (mut book, men, girls) = book();
    let men_ids = book.get(&men).unwrap().athlete_ids();
    let girls_before = book.get(&girls).cloned();

    let cleared = book.reset(&men);
    assert_eq!(cleared, men_ids);
    assert_eq!(cleared.len(), 5);
    assert!(book.get(&men).is_none());
    assert_eq!(book.get(&girls).cloned(), girls_before);

    assert!(book.reset(&men).is_empty());
    assert_eq!(book.keys().copied().collect::<Vec<_>>(), vec![girls]);
}
