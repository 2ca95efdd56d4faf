use serde::{Deserialize, Serialize};
use crate::models::domain::{CompatibilityResult, MatchRecord, PreferenceProfile, PublicUser, UserRecord};

/// Response for the potential matches endpoint
#[derive(Debug, Clone, Serialize)]
pub struct PotentialMatchesResponse {
    pub matches: Vec<CompatibilityResult>,
    pub total: usize,
}

/// A match together with the other participant's public profile
#[derive(Debug, Clone, Serialize)]
pub struct MatchWithUser {
    #[serde(flatten)]
    pub record: MatchRecord,
    #[serde(rename = "otherUser", skip_serializing_if = "Option::is_none")]
    pub other_user: Option<PublicUser>,
}

/// Confirmation message carrying the affected user
#[derive(Debug, Clone, Serialize)]
pub struct UserMessageResponse {
    pub message: String,
    pub user: PublicUser,
}

/// Confirmation message carrying the affected match
#[derive(Debug, Clone, Serialize)]
pub struct MatchMessageResponse {
    pub message: String,
    #[serde(rename = "match")]
    pub record: MatchRecord,
}

/// Plain confirmation message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Stored survey answers with defaults for anything unanswered
#[derive(Debug, Clone, Serialize)]
pub struct SurveyResponses {
    pub preferences: PreferenceProfile,
    pub interests: Vec<String>,
    #[serde(rename = "dealBreakers")]
    pub deal_breakers: Vec<String>,
    #[serde(rename = "additionalInfo")]
    pub additional_info: String,
    #[serde(rename = "surveyCompleted")]
    pub survey_completed: bool,
}

impl From<UserRecord> for SurveyResponses {
    fn from(user: UserRecord) -> Self {
        Self {
            preferences: user.preferences.unwrap_or_default(),
            interests: user.interests,
            deal_breakers: user.deal_breakers,
            additional_info: user.additional_info.unwrap_or_default(),
            survey_completed: user.survey_completed,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}
