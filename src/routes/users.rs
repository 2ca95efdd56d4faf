use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::models::{MessageResponse, PublicUser, UpdateProfileRequest, UserMessageResponse, UserRecord};
use crate::routes::{auth::AuthUser, error::ApiError, AppState};

/// Configure all user profile routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/users/profile", web::get().to(get_profile))
        .route("/users/profile", web::put().to(update_profile))
        .route("/users/profile", web::delete().to(delete_account))
        .route("/users/all", web::get().to(list_other_users))
        .route("/users/{id}", web::get().to(get_user));
}

/// GET /api/v1/users/profile
async fn get_profile(state: web::Data<AppState>, auth: AuthUser) -> Result<HttpResponse, ApiError> {
    let user = state
        .store
        .find_user_by_id(&auth.user_id)
        .await
        .map_err(|e| ApiError::from_store_miss(e, "User not found"))?;

    Ok(HttpResponse::Ok().json(PublicUser::from(user)))
}

/// Update profile endpoint
///
/// PUT /api/v1/users/profile
///
/// Only the fields present in the body are changed. The profile is marked
/// complete once first name, last name, college, gender and room type are all
/// set.
async fn update_profile(
    state: web::Data<AppState>,
    auth: AuthUser,
    req: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for profile update of {}: {}", auth.user_id, errors);
        return Err(errors.into());
    }

    let patch = req.into_inner();
    let user = state
        .store
        .update_user(&auth.user_id, Box::new(move |user: &mut UserRecord| patch.apply_to(user)))
        .await
        .map_err(|e| ApiError::from_store_miss(e, "User not found"))?;

    tracing::info!(
        "Updated profile for {} (profile completed: {})",
        user.id,
        user.profile_completed
    );

    Ok(HttpResponse::Ok().json(UserMessageResponse {
        message: "Profile updated successfully".to_string(),
        user: user.into(),
    }))
}

/// DELETE /api/v1/users/profile
async fn delete_account(state: web::Data<AppState>, auth: AuthUser) -> Result<HttpResponse, ApiError> {
    state
        .store
        .delete_user(&auth.user_id)
        .await
        .map_err(|e| ApiError::from_store_miss(e, "User not found"))?;

    tracing::info!("Deleted account {}", auth.user_id);

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Account deleted successfully".to_string(),
    }))
}

/// Every other user with a completed profile
///
/// GET /api/v1/users/all
async fn list_other_users(state: web::Data<AppState>, auth: AuthUser) -> Result<HttpResponse, ApiError> {
    state
        .store
        .find_user_by_id(&auth.user_id)
        .await
        .map_err(|e| ApiError::from_store_miss(e, "User not found"))?;

    let others: Vec<PublicUser> = state
        .store
        .list_users()
        .await?
        .into_iter()
        .filter(|u| u.id != auth.user_id && u.profile_completed)
        .map(PublicUser::from)
        .collect();

    Ok(HttpResponse::Ok().json(others))
}

/// GET /api/v1/users/{id}
async fn get_user(
    state: web::Data<AppState>,
    _auth: AuthUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let user = state
        .store
        .find_user_by_id(&path)
        .await
        .map_err(|e| ApiError::from_store_miss(e, "User not found"))?;

    Ok(HttpResponse::Ok().json(PublicUser::from(user)))
}
