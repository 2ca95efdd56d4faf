use thiserror::Error;

use crate::core::{
    filters::{is_eligible_candidate, matches_criteria},
    scoring::{calculate_compatibility, score_breakdown},
};
use crate::models::{CompatibilityResult, FilterCriteria, PublicUser, UserRecord};

/// Errors raised before ranking starts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("User not found: {0}")]
    NotFound(String),
}

/// Ranking orchestrator - implements the candidate pipeline
///
/// # Pipeline Stages
/// 1. Drop the requester and anyone without a completed profile and survey
/// 2. Strip credentials and score each remaining candidate
/// 3. Stable sort by descending score
/// 4. Apply the caller's filters
#[derive(Debug, Clone, Copy, Default)]
pub struct Matcher;

impl Matcher {
    pub fn new() -> Self {
        Self
    }

    /// Rank a candidate pool for a requester
    ///
    /// # Arguments
    /// * `requester` - The user asking for matches
    /// * `candidates` - A point-in-time view of all users
    /// * `criteria` - Filters to apply after scoring
    ///
    /// # Returns
    /// Every surviving candidate, highest score first. Candidates with equal
    /// scores keep their order from `candidates`.
    pub fn rank(
        &self,
        requester: &UserRecord,
        candidates: Vec<UserRecord>,
        criteria: &FilterCriteria,
    ) -> Vec<CompatibilityResult> {
        let total_candidates = candidates.len();

        if let (Some(min), Some(max)) = (criteria.min_age, criteria.max_age) {
            if min > max {
                tracing::warn!(min_age = min, max_age = max, "ignoring inverted age range filter");
            }
        }

        let mut ranked: Vec<CompatibilityResult> = candidates
            .into_iter()
            // Stage 1: Eligibility
            .filter(|candidate| is_eligible_candidate(candidate, &requester.id))
            // Stage 2: Scoring
            .map(|candidate| {
                let compatibility_score = calculate_compatibility(requester, &candidate);
                if tracing::enabled!(tracing::Level::TRACE) {
                    if let Some(breakdown) = score_breakdown(requester, &candidate) {
                        tracing::trace!(
                            candidate = %candidate.id,
                            earned = breakdown.earned(),
                            possible = breakdown.possible(),
                            factors = ?breakdown.factors,
                            "scored candidate"
                        );
                    }
                }
                CompatibilityResult {
                    user: PublicUser::from(candidate),
                    compatibility_score,
                }
            })
            .collect();

        // Stage 3: Stable sort, highest first
        ranked.sort_by(|a, b| b.compatibility_score.cmp(&a.compatibility_score));

        // Stage 4: Filters
        if !criteria.is_empty() {
            ranked.retain(|result| matches_criteria(&result.user, criteria));
        }

        tracing::debug!(
            requester = %requester.id,
            total_candidates,
            returned = ranked.len(),
            "ranked candidates"
        );

        ranked
    }

    /// Rank candidates for the user with `requester_id`, looked up in the same
    /// pool view
    ///
    /// Fails with [`MatchError::NotFound`] if the requester is not in the pool.
    pub fn rank_for(
        &self,
        requester_id: &str,
        candidates: Vec<UserRecord>,
        criteria: &FilterCriteria,
    ) -> Result<Vec<CompatibilityResult>, MatchError> {
        let requester = candidates
            .iter()
            .find(|user| user.id == requester_id)
            .cloned()
            .ok_or_else(|| MatchError::NotFound(requester_id.to_string()))?;

        Ok(self.rank(&requester, candidates, criteria))
    }
}
