// Model exports
pub mod domain;
pub mod requests;
pub mod responses;
pub mod survey;

pub use domain::{
    Cleanliness, CompatibilityResult, FilterCriteria, Gender, MatchRecord, MatchStatus,
    NoiseTolerance, PreferenceProfile, PublicUser, RoomType, SleepSchedule, SocialLevel,
    StudyStyle, UnknownChoice, UserRecord,
};
pub use requests::{
    CreateMatchRequest, FilterParseError, PotentialMatchesQuery, SurveyPreferences,
    SurveySubmission, UpdateMatchStatusRequest, UpdateProfileRequest,
};
pub use responses::{
    ErrorResponse, HealthResponse, MatchMessageResponse, MatchWithUser, MessageResponse,
    PotentialMatchesResponse, SurveyResponses, UserMessageResponse,
};
pub use survey::{survey_questions, SurveyOption, SurveyQuestion};
