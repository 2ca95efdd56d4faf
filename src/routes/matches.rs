use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::core::calculate_compatibility;
use crate::models::{
    CreateMatchRequest, MatchMessageResponse, MatchRecord, MatchStatus, MatchWithUser,
    PotentialMatchesQuery, PotentialMatchesResponse, PublicUser, UpdateMatchStatusRequest,
};
use crate::routes::{auth::AuthUser, error::ApiError, AppState};

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/matches/potential", web::get().to(potential_matches))
        .route("/matches/current", web::get().to(current_matches))
        .route("/matches/create", web::post().to(create_match))
        .route("/matches/{match_id}/status", web::put().to(update_match_status));
}

/// Potential matches endpoint
///
/// GET /api/v1/matches/potential?college=&gender=&minAge=&maxAge=&sleepSchedule=&cleanliness=
///
/// Returns every other user with a completed profile and survey, ranked by
/// compatibility with the caller and narrowed by the optional filters.
async fn potential_matches(
    state: web::Data<AppState>,
    auth: AuthUser,
    query: web::Query<PotentialMatchesQuery>,
) -> Result<HttpResponse, ApiError> {
    let criteria = query.into_inner().into_criteria()?;

    tracing::info!("Finding potential matches for user: {}", auth.user_id);

    // One snapshot serves as both the requester lookup and the candidate pool
    let pool = state.store.list_users().await?;
    let matches = state.matcher.rank_for(&auth.user_id, pool, &criteria)?;

    tracing::info!(
        "Returning {} potential matches for user {}",
        matches.len(),
        auth.user_id
    );

    Ok(HttpResponse::Ok().json(PotentialMatchesResponse {
        total: matches.len(),
        matches,
    }))
}

/// Caller's matches, each with the other participant attached
///
/// GET /api/v1/matches/current
async fn current_matches(state: web::Data<AppState>, auth: AuthUser) -> Result<HttpResponse, ApiError> {
    let records = state.store.matches_for_user(&auth.user_id).await?;

    let mut result = Vec::with_capacity(records.len());
    for record in records {
        let other_user = state
            .store
            .find_user_by_id(record.other_party(&auth.user_id))
            .await
            .ok()
            .map(PublicUser::from);

        result.push(MatchWithUser { record, other_user });
    }

    Ok(HttpResponse::Ok().json(result))
}

/// Create match endpoint
///
/// POST /api/v1/matches/create
///
/// Request body:
/// ```json
/// { "otherUserId": "string" }
/// ```
async fn create_match(
    state: web::Data<AppState>,
    auth: AuthUser,
    req: web::Json<CreateMatchRequest>,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = req.validate() {
        return Err(ApiError::bad_request("Other user ID is required", errors.to_string()));
    }

    let other_user_id = &req.other_user_id;
    if *other_user_id == auth.user_id {
        return Err(ApiError::bad_request(
            "Invalid match",
            "Cannot create a match with yourself",
        ));
    }

    let other = state
        .store
        .find_user_by_id(other_user_id)
        .await
        .map_err(|e| ApiError::from_store_miss(e, "Other user not found"))?;

    let me = state
        .store
        .find_user_by_id(&auth.user_id)
        .await
        .map_err(|e| ApiError::from_store_miss(e, "User not found"))?;
    let compatibility_score = Some(calculate_compatibility(&me, &other));

    let record = state
        .store
        .insert_match(MatchRecord::pending(&auth.user_id, other_user_id, compatibility_score))
        .await?;

    tracing::info!(
        "Created match {} between {} and {} (score: {:?})",
        record.id,
        record.user1_id,
        record.user2_id,
        record.compatibility_score
    );

    Ok(HttpResponse::Created().json(MatchMessageResponse {
        message: "Match created successfully".to_string(),
        record,
    }))
}

/// Update match status endpoint
///
/// PUT /api/v1/matches/{match_id}/status
///
/// Request body:
/// ```json
/// { "status": "pending|accepted|rejected" }
/// ```
async fn update_match_status(
    state: web::Data<AppState>,
    auth: AuthUser,
    path: web::Path<String>,
    req: web::Json<UpdateMatchStatusRequest>,
) -> Result<HttpResponse, ApiError> {
    let match_id = path.into_inner();

    let status = req
        .status
        .parse::<MatchStatus>()
        .map_err(|e| ApiError::bad_request("Invalid status", e.to_string()))?;

    let existing = state
        .store
        .find_match_by_id(&match_id)
        .await
        .map_err(|e| ApiError::from_store_miss(e, "Match not found"))?;

    if !existing.involves(&auth.user_id) {
        return Err(ApiError::forbidden(
            "Not authorized to update this match",
            format!("User {} is not part of match {}", auth.user_id, match_id),
        ));
    }

    let record = state
        .store
        .update_match(
            &match_id,
            Box::new(move |record: &mut MatchRecord| {
                record.status = status;
                record.updated_at = chrono::Utc::now();
            }),
        )
        .await
        .map_err(|e| ApiError::from_store_miss(e, "Match not found"))?;

    tracing::info!("Match {} is now {}", record.id, record.status);

    Ok(HttpResponse::Ok().json(MatchMessageResponse {
        message: "Match status updated successfully".to_string(),
        record,
    }))
}
