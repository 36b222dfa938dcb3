pub mod format;
pub mod intent;
pub mod knowledge;
pub mod models;

pub use intent::{classify, intent_rules, normalize_text};
pub use knowledge::{pattern_reply, KnowledgeBase, FALLBACK_GUIDANCE};
pub use models::*;
