// Core algorithm exports
pub mod filters;
pub mod matcher;
pub mod scoring;

pub use filters::{is_eligible_candidate, matches_age, matches_college, matches_criteria};
pub use matcher::{MatchError, Matcher};
pub use scoring::{calculate_compatibility, score_breakdown, Factor, FactorScore, ScoreBreakdown};
