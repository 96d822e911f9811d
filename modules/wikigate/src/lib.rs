pub mod equality;
pub mod events;
pub mod explorers;
pub mod links;
pub mod media;
pub mod metadata;
pub mod pipeline;
pub mod score;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod text;

pub use equality::{is_deep_equal, is_unchanged};
pub use explorers::{ExplorerCache, ExplorerLookup, ExplorerSnapshot, ExplorerSource, StaticExplorers};
pub use pipeline::{
    validate_static, Rule, ValidationError, ValidationIssue, ValidationMode, Validator, Verdict,
};
pub use score::{score, score_breakdown, ScoreBreakdown};
pub use text::{count_words, is_valid_url};
