use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::KnowledgeEntry;

/// Guidance shown when neither the knowledge base nor the pattern responder
/// has anything to say.
pub const FALLBACK_GUIDANCE: &str =
    "I'm still learning about football. Try asking about transfers, upcoming matches, clubs, or players!";

/// Static in-memory fact table, built once at startup and read-only after.
/// Lookup is two-tier: key containment first, token overlap second; in both
/// tiers the first entry in insertion order wins, so duplicate matches resolve
/// deterministically.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeEntry>,
}

impl KnowledgeBase {
    pub fn new(entries: Vec<KnowledgeEntry>) -> Self {
        Self { entries }
    }

    /// The seed facts carried by every deployment: league basics, the big
    /// clubs, transfer windows, positions, and a few star players.
    pub fn with_default_facts() -> Self {
        let mut entries = Vec::new();

        entries.push(KnowledgeEntry::new(
            "league",
            "premier league",
            "The Premier League is the top football league in England: 20 clubs play each other home and away across a 38-game season.",
        ));

        for (key, text) in [
            (
                "manchester united",
                "Manchester United are one of England's most decorated clubs, part of the Premier League's big six and based at Old Trafford.",
            ),
            (
                "manchester city",
                "Manchester City have dominated recent Premier League seasons and play their home games at the Etihad Stadium.",
            ),
            (
                "liverpool",
                "Liverpool are a historic English club based at Anfield, with a long record of league titles and European Cups.",
            ),
            (
                "arsenal",
                "Arsenal are a North London club based at the Emirates Stadium, famous for their unbeaten Invincibles season.",
            ),
            (
                "chelsea",
                "Chelsea are a West London club based at Stamford Bridge, with multiple Premier League and Champions League titles.",
            ),
            (
                "tottenham",
                "Tottenham Hotspur are a North London club playing at the Tottenham Hotspur Stadium, long-time rivals of Arsenal.",
            ),
        ] {
            entries.push(KnowledgeEntry::new("clubs", key, text));
        }

        entries.push(KnowledgeEntry::new(
            "transfers",
            "transfer window",
            "Transfers happen during two windows: the summer window from June to August and the winter window in January.",
        ));
        entries.push(KnowledgeEntry::new(
            "basics",
            "positions",
            "The main football positions are goalkeeper, defender, midfielder, and forward.",
        ));

        for (key, text) in [
            (
                "cristiano ronaldo",
                "Cristiano Ronaldo is a Portuguese forward and five-time Ballon d'Or winner, one of the highest goalscorers in the game's history.",
            ),
            (
                "lionel messi",
                "Lionel Messi is an Argentine forward, an eight-time Ballon d'Or winner and 2022 World Cup champion.",
            ),
            (
                "kylian mbappe",
                "Kylian Mbappe is a French forward who won the 2018 World Cup as a teenager and is known for his pace.",
            ),
            (
                "erling haaland",
                "Erling Haaland is a Norwegian striker who broke the Premier League single-season scoring record in his debut year.",
            ),
        ] {
            entries.push(KnowledgeEntry::new("players", key, text));
        }

        Self::new(entries)
    }

    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    /// Two-tier match against the lower-cased query. Absence is `None`, not an
    /// error; the caller decides what to fall through to.
    pub fn lookup(&self, query: &str) -> Option<&str> {
        let lower = query.trim().to_lowercase();
        if lower.is_empty() {
            return None;
        }

        // tier 1: key contained in the query, or the query contained in a key
        if let Some(entry) = self
            .entries
            .iter()
            .find(|entry| lower.contains(&entry.key) || entry.key.contains(&lower))
        {
            return Some(&entry.text);
        }

        // tier 2: any query token occurring inside a key
        let tokens = tokenize(&lower);
        self.entries
            .iter()
            .find(|entry| tokens.iter().any(|token| entry.key.contains(token.as_str())))
            .map(|entry| entry.text.as_str())
    }
}

fn tokenize(input: &str) -> Vec<String> {
    static CLEANER: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"[^\p{Latin}\p{Nd}\s]+").expect("valid tokenizer regex"));

    let normalized = CLEANER.replace_all(input, " ");
    normalized
        .split_whitespace()
        .filter(|token| token.chars().count() > 1)
        .map(|token| token.to_string())
        .collect()
}

/// Canned replies for conversational patterns that deserve better than the
/// generic guidance line. Checked only after the knowledge base misses.
pub fn pattern_reply(query: &str) -> Option<&'static str> {
    let lower = query.to_lowercase();

    if contains_any(&lower, &["hello", "hi ", "hey", "good morning", "good evening"])
        || lower == "hi"
    {
        return Some("Hello! Ask me about transfer news, upcoming matches, clubs, or players.");
    }

    if contains_any(&lower, &["thank", "cheers"]) {
        return Some("You're welcome! Anything else about football?");
    }

    if contains_any(&lower, &["who are you", "what can you do", "help"]) {
        return Some(
            "I'm a football assistant. I can fetch the latest transfer news, look up upcoming fixtures, and answer questions about clubs and players.",
        );
    }

    None
}

fn contains_any(input: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| input.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_key_containment_matches() {
        let kb = KnowledgeBase::with_default_facts();
        let text = kb.lookup("Tell me about Manchester United").unwrap();
        assert!(text.contains("Manchester United"));
    }

    #[test]
    fn query_contained_in_key_matches() {
        let kb = KnowledgeBase::with_default_facts();
        // "haaland" is a substring of the "erling haaland" key
        let text = kb.lookup("haaland").unwrap();
        assert!(text.contains("Erling Haaland"));
    }

    #[test]
    fn token_overlap_matches_when_containment_does_not() {
        let kb = KnowledgeBase::with_default_facts();
        let text = kb.lookup("is united any good?").unwrap();
        assert!(text.contains("Manchester United"));
    }

    #[test]
    fn duplicate_matches_resolve_in_insertion_order() {
        let kb = KnowledgeBase::new(vec![
            KnowledgeEntry::new("a", "alpha club", "first"),
            KnowledgeEntry::new("b", "alpha town", "second"),
        ]);
        // "alpha" overlaps both keys; the first inserted entry must win
        assert_eq!(kb.lookup("alpha?"), Some("first"));
        assert_eq!(kb.lookup("alpha?"), Some("first"));
    }

    #[test]
    fn miss_returns_none() {
        let kb = KnowledgeBase::with_default_facts();
        assert_eq!(kb.lookup("xyzzy"), None);
        assert_eq!(kb.lookup("   "), None);
    }

    #[test]
    fn pattern_responder_greets() {
        assert!(pattern_reply("hello there").is_some());
        assert!(pattern_reply("thank you!").is_some());
        assert!(pattern_reply("xyzzy").is_none());
    }

    #[test]
    fn tokenizer_strips_punctuation_and_short_tokens() {
        let tokens = tokenize("who's playing, a united fan?");
        assert!(tokens.iter().any(|t| t == "united"));
        assert!(!tokens.iter().any(|t| t == "a"));
    }
}
