use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::models::{survey_questions, SurveyResponses, SurveySubmission, UserMessageResponse, UserRecord};
use crate::routes::{auth::AuthUser, error::ApiError, AppState};

/// Configure all survey routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/survey/questions", web::get().to(get_questions))
        .route("/survey/submit", web::post().to(submit_survey))
        .route("/survey/responses", web::get().to(get_responses))
        .route("/survey/responses", web::put().to(update_responses));
}

/// GET /api/v1/survey/questions (no authentication)
async fn get_questions() -> HttpResponse {
    HttpResponse::Ok().json(survey_questions())
}

/// Survey submission endpoint
///
/// POST /api/v1/survey/submit
///
/// Request body:
/// ```json
/// {
///   "preferences": {
///     "sleepSchedule": "early-bird|night-owl|flexible",
///     "cleanliness": "very-clean|moderately-clean|relaxed",
///     "studyStyle": "quiet-study|background-music|group-study",
///     "socialLevel": "social-butterfly|moderate-social|prefer-quiet"
///   },
///   "interests": ["string"],
///   "dealBreakers": ["string"],
///   "additionalInfo": "string"
/// }
/// ```
async fn submit_survey(
    state: web::Data<AppState>,
    auth: AuthUser,
    req: web::Json<SurveySubmission>,
) -> Result<HttpResponse, ApiError> {
    save_survey(&state, &auth, req.into_inner(), "Survey submitted successfully").await
}

/// PUT /api/v1/survey/responses
async fn update_responses(
    state: web::Data<AppState>,
    auth: AuthUser,
    req: web::Json<SurveySubmission>,
) -> Result<HttpResponse, ApiError> {
    save_survey(&state, &auth, req.into_inner(), "Survey responses updated successfully").await
}

async fn save_survey(
    state: &AppState,
    auth: &AuthUser,
    submission: SurveySubmission,
    message: &str,
) -> Result<HttpResponse, ApiError> {
    submission.validate()?;

    let user = state
        .store
        .update_user(&auth.user_id, Box::new(move |user: &mut UserRecord| submission.apply_to(user)))
        .await
        .map_err(|e| ApiError::from_store_miss(e, "User not found"))?;

    tracing::info!("Stored survey for {}", user.id);

    Ok(HttpResponse::Ok().json(UserMessageResponse {
        message: message.to_string(),
        user: user.into(),
    }))
}

/// GET /api/v1/survey/responses
async fn get_responses(state: web::Data<AppState>, auth: AuthUser) -> Result<HttpResponse, ApiError> {
    let user = state
        .store
        .find_user_by_id(&auth.user_id)
        .await
        .map_err(|e| ApiError::from_store_miss(e, "User not found"))?;

    Ok(HttpResponse::Ok().json(SurveyResponses::from(user)))
}
