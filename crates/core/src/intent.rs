use crate::models::{Intent, IntentRule};

/// Ordered routing table. Transfer and fixture intents are the only ones that
/// trigger a network call, so their keywords are checked before anything falls
/// through to the local knowledge lookup. New intents are added by appending a
/// rule, not by adding branches.
const INTENT_RULES: &[IntentRule] = &[
    IntentRule {
        keywords: &[
            "transfer", "signed", "signing", "bought", "sold", "rumor", "news",
        ],
        intent: Intent::TransferNews,
    },
    IntentRule {
        keywords: &[
            "match", "fixture", "game", "playing", "next", "upcoming", "schedule",
        ],
        intent: Intent::Fixtures,
    },
];

pub fn intent_rules() -> &'static [IntentRule] {
    INTENT_RULES
}

pub fn normalize_text(input: &str) -> String {
    input
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Walks the rule table in order and returns the intent of the first rule with
/// a keyword occurring in the lower-cased query. Pure function over the rule
/// table and the input.
pub fn classify(query: &str) -> Intent {
    let lower = query.to_lowercase();

    INTENT_RULES
        .iter()
        .find(|rule| contains_any(&lower, rule.keywords))
        .map(|rule| rule.intent)
        .unwrap_or(Intent::KnowledgeLookup)
}

fn contains_any(input: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| input.contains(needle))
}
