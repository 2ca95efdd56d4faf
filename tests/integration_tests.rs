// Integration tests for Roomie Match

use actix_web::{http::StatusCode, test as actix_test, web, App};
use roomie_match::core::{MatchError, Matcher};
use roomie_match::models::{
    Cleanliness, FilterCriteria, PreferenceProfile, SleepSchedule, SocialLevel, StudyStyle, UserRecord,
};
use roomie_match::routes::{
    self,
    auth::JwtKeys,
    error::{handle_json_payload_error, handle_query_payload_error},
    AppState,
};
use roomie_match::services::{MemoryStore, SeedData, UserStore};
use serde_json::{json, Value};
use std::sync::Arc;

const SECRET: &str = "integration-secret";

fn create_test_user(
    id: &str,
    college: &str,
    age: Option<u8>,
    sleep: Option<SleepSchedule>,
    clean: Option<Cleanliness>,
    study: Option<StudyStyle>,
    social: Option<SocialLevel>,
) -> UserRecord {
    UserRecord {
        id: id.to_string(),
        email: format!("{}@example.edu", id),
        password_hash: Some("$2a$10$hash".to_string()),
        first_name: Some(format!("First {}", id)),
        last_name: Some(format!("Last {}", id)),
        college: college.to_string(),
        age,
        preferences: Some(PreferenceProfile {
            sleep_schedule: sleep,
            cleanliness: clean,
            study_style: study,
            social_level: social,
            ..Default::default()
        }),
        profile_completed: true,
        survey_completed: true,
        ..Default::default()
    }
}

fn requester() -> UserRecord {
    create_test_user(
        "me",
        "State University",
        Some(21),
        Some(SleepSchedule::EarlyBird),
        Some(Cleanliness::VeryClean),
        Some(StudyStyle::QuietStudy),
        Some(SocialLevel::ModerateSocial),
    )
}

/// Scores 92 against `requester()`: 60 of 65 points, no college or cleanliness
fn candidate_92() -> UserRecord {
    create_test_user(
        "c92",
        "",
        None,
        Some(SleepSchedule::EarlyBird),
        None,
        Some(StudyStyle::QuietStudy),
        Some(SocialLevel::SocialButterfly),
    )
}

/// Scores 85 against `requester()`
fn candidate_85() -> UserRecord {
    create_test_user(
        "c85",
        "State University",
        Some(22),
        Some(SleepSchedule::EarlyBird),
        Some(Cleanliness::ModeratelyClean),
        Some(StudyStyle::QuietStudy),
        Some(SocialLevel::SocialButterfly),
    )
}

/// Scores 45 against `requester()`
fn candidate_45() -> UserRecord {
    create_test_user(
        "c45",
        "Tech Institute",
        Some(30),
        Some(SleepSchedule::EarlyBird),
        Some(Cleanliness::Relaxed),
        Some(StudyStyle::GroupStudy),
        Some(SocialLevel::SocialButterfly),
    )
}

fn incomplete_candidate() -> UserRecord {
    let mut user = candidate_85();
    user.id = "incomplete".to_string();
    user.survey_completed = false;
    user
}

fn scores(ranked: &[roomie_match::CompatibilityResult]) -> Vec<(String, u8)> {
    ranked
        .iter()
        .map(|r| (r.user.id.clone(), r.compatibility_score))
        .collect()
}

#[test]
fn test_integration_ranking_order_independent_of_input() {
    let matcher = Matcher::new();
    let me = requester();

    let expected = vec![
        ("c92".to_string(), 92),
        ("c85".to_string(), 85),
        ("c45".to_string(), 45),
    ];

    let pools = [
        vec![candidate_92(), candidate_45(), candidate_85()],
        vec![candidate_45(), candidate_85(), candidate_92()],
        vec![candidate_85(), me.clone(), candidate_92(), candidate_45()],
    ];

    for pool in pools {
        let ranked = matcher.rank(&me, pool, &FilterCriteria::default());
        assert_eq!(scores(&ranked), expected);
    }
}

#[test]
fn test_integration_incomplete_candidates_excluded() {
    let matcher = Matcher::new();
    let me = requester();

    let mut no_profile = candidate_92();
    no_profile.id = "no-profile".to_string();
    no_profile.profile_completed = false;

    let ranked = matcher.rank(
        &me,
        vec![incomplete_candidate(), no_profile, candidate_45()],
        &FilterCriteria::default(),
    );
    assert_eq!(scores(&ranked), vec![("c45".to_string(), 45)]);
}

#[test]
fn test_integration_filters_combine() {
    let matcher = Matcher::new();
    let me = requester();
    let pool = vec![candidate_45(), candidate_85(), candidate_92()];

    let by_age = FilterCriteria {
        min_age: Some(20),
        max_age: Some(25),
        ..Default::default()
    };
    let ranked = matcher.rank(&me, pool.clone(), &by_age);
    assert_eq!(scores(&ranked), vec![("c92".to_string(), 92), ("c85".to_string(), 85)]);

    let by_college_and_cleanliness = FilterCriteria {
        college: Some("state".to_string()),
        cleanliness: Some(Cleanliness::ModeratelyClean),
        ..Default::default()
    };
    let ranked = matcher.rank(&me, pool, &by_college_and_cleanliness);
    assert_eq!(scores(&ranked), vec![("c85".to_string(), 85)]);
}

#[test]
fn test_integration_unknown_requester() {
    let matcher = Matcher::new();
    let result = matcher.rank_for("ghost", vec![candidate_85()], &FilterCriteria::default());
    assert_eq!(result, Err(MatchError::NotFound("ghost".to_string())));
}

fn seeded_store() -> Arc<MemoryStore> {
    let unfinished = UserRecord {
        id: "newbie".to_string(),
        email: "newbie@example.edu".to_string(),
        first_name: Some("New".to_string()),
        ..Default::default()
    };

    Arc::new(MemoryStore::with_seed(SeedData {
        users: vec![
            requester(),
            candidate_45(),
            incomplete_candidate(),
            candidate_85(),
            candidate_92(),
            unfinished,
        ],
        matches: vec![],
    }))
}

fn bearer(user_id: &str) -> (&'static str, String) {
    let token = JwtKeys::from_secret(SECRET)
        .issue(user_id, chrono::Duration::hours(1))
        .unwrap();
    ("Authorization", format!("Bearer {}", token))
}

macro_rules! init_app {
    ($store:expr) => {{
        let store: Arc<dyn UserStore> = $store;
        actix_test::init_service(
            App::new()
                .app_data(web::Data::new(AppState {
                    store,
                    matcher: Matcher::new(),
                }))
                .app_data(web::Data::new(JwtKeys::from_secret(SECRET)))
                .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
                .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
                .configure(routes::configure_routes),
        )
        .await
    }};
}

#[actix_web::test]
async fn test_http_potential_matches_ranked_and_filtered() {
    let app = init_app!(seeded_store());

    let req = actix_test::TestRequest::get()
        .uri("/api/v1/matches/potential")
        .insert_header(bearer("me"))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["total"], 3);
    let ids: Vec<&str> = body["matches"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["c92", "c85", "c45"]);
    assert_eq!(body["matches"][0]["compatibilityScore"], 92);
    assert!(body["matches"][0].get("password").is_none());

    let req = actix_test::TestRequest::get()
        .uri("/api/v1/matches/potential?minAge=20&maxAge=25&gender=any&college=")
        .insert_header(bearer("me"))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 2);
}

#[actix_web::test]
async fn test_http_potential_matches_errors() {
    let app = init_app!(seeded_store());

    let req = actix_test::TestRequest::get()
        .uri("/api/v1/matches/potential")
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = actix_test::TestRequest::get()
        .uri("/api/v1/matches/potential")
        .insert_header(bearer("ghost"))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = actix_test::TestRequest::get()
        .uri("/api/v1/matches/potential?sleepSchedule=never")
        .insert_header(bearer("me"))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_http_profile_and_survey_flow() {
    let store = seeded_store();
    let app = init_app!(store.clone());

    let req = actix_test::TestRequest::put()
        .uri("/api/v1/users/profile")
        .insert_header(bearer("newbie"))
        .set_json(json!({
            "lastName": "Student",
            "college": "State University",
            "gender": "female",
            "roomType": "shared",
            "age": 19
        }))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Profile updated successfully");
    assert_eq!(body["user"]["profileCompleted"], true);

    let req = actix_test::TestRequest::put()
        .uri("/api/v1/users/profile")
        .insert_header(bearer("newbie"))
        .set_json(json!({ "age": 12 }))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = actix_test::TestRequest::post()
        .uri("/api/v1/survey/submit")
        .insert_header(bearer("newbie"))
        .set_json(json!({
            "preferences": {
                "sleepSchedule": "early-bird",
                "cleanliness": "very-clean",
                "studyStyle": "quiet-study",
                "socialLevel": "moderate-social"
            },
            "interests": ["climbing"]
        }))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["user"]["surveyCompleted"], true);

    let req = actix_test::TestRequest::get()
        .uri("/api/v1/survey/responses")
        .insert_header(bearer("newbie"))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["preferences"]["cleanliness"], "very-clean");
    assert_eq!(body["interests"], json!(["climbing"]));
    assert_eq!(body["additionalInfo"], "");

    // The newcomer is now a candidate for everyone else
    let users = store.list_users().await.unwrap();
    let newbie = users.iter().find(|u| u.id == "newbie").unwrap();
    assert!(newbie.is_match_ready());

    let req = actix_test::TestRequest::get()
        .uri("/api/v1/matches/potential")
        .insert_header(bearer("me"))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 4);
    assert_eq!(body["matches"][0]["id"], "newbie");
    assert_eq!(body["matches"][0]["compatibilityScore"], 100);
}

#[actix_web::test]
async fn test_http_survey_rejects_invalid_choice() {
    let app = init_app!(seeded_store());

    let req = actix_test::TestRequest::post()
        .uri("/api/v1/survey/submit")
        .insert_header(bearer("me"))
        .set_json(json!({
            "preferences": {
                "sleepSchedule": "whenever",
                "cleanliness": "very-clean",
                "studyStyle": "quiet-study",
                "socialLevel": "moderate-social"
            }
        }))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = actix_test::TestRequest::get().uri("/api/v1/survey/questions").to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.as_array().unwrap().len(), 6);
}

#[actix_web::test]
async fn test_http_match_lifecycle() {
    let app = init_app!(seeded_store());

    let req = actix_test::TestRequest::post()
        .uri("/api/v1/matches/create")
        .insert_header(bearer("me"))
        .set_json(json!({ "otherUserId": "c85" }))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(resp).await;
    assert_eq!(body["match"]["status"], "pending");
    assert_eq!(body["match"]["compatibilityScore"], 85);
    let match_id = body["match"]["id"].as_str().unwrap().to_string();

    // Same pair, opposite direction
    let req = actix_test::TestRequest::post()
        .uri("/api/v1/matches/create")
        .insert_header(bearer("c85"))
        .set_json(json!({ "otherUserId": "me" }))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = actix_test::TestRequest::post()
        .uri("/api/v1/matches/create")
        .insert_header(bearer("me"))
        .set_json(json!({ "otherUserId": "nobody" }))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = actix_test::TestRequest::post()
        .uri("/api/v1/matches/create")
        .insert_header(bearer("me"))
        .set_json(json!({}))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let status_uri = format!("/api/v1/matches/{}/status", match_id);

    let req = actix_test::TestRequest::put()
        .uri(&status_uri)
        .insert_header(bearer("c45"))
        .set_json(json!({ "status": "accepted" }))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = actix_test::TestRequest::put()
        .uri(&status_uri)
        .insert_header(bearer("c85"))
        .set_json(json!({ "status": "maybe" }))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = actix_test::TestRequest::put()
        .uri("/api/v1/matches/missing/status")
        .insert_header(bearer("c85"))
        .set_json(json!({ "status": "accepted" }))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = actix_test::TestRequest::put()
        .uri(&status_uri)
        .insert_header(bearer("c85"))
        .set_json(json!({ "status": "accepted" }))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["match"]["status"], "accepted");

    let req = actix_test::TestRequest::get()
        .uri("/api/v1/matches/current")
        .insert_header(bearer("me"))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;
    let current = body.as_array().unwrap();
    assert_eq!(current.len(), 1);
    assert_eq!(current[0]["otherUser"]["id"], "c85");
    assert!(current[0]["otherUser"].get("password").is_none());
}

#[actix_web::test]
async fn test_http_create_match_requires_existing_proposer() {
    let store = seeded_store();
    let app = init_app!(store.clone());

    store.delete_user("me").await.unwrap();

    let req = actix_test::TestRequest::post()
        .uri("/api/v1/matches/create")
        .insert_header(bearer("me"))
        .set_json(json!({ "otherUserId": "c85" }))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(resp).await;
    assert_eq!(body["error"], "User not found");

    assert!(store.matches_for_user("c85").await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_http_users_endpoints() {
    let app = init_app!(seeded_store());

    let req = actix_test::TestRequest::get()
        .uri("/api/v1/users/all")
        .insert_header(bearer("me"))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;
    // Everyone else with a completed profile, surveys not required
    assert_eq!(body.as_array().unwrap().len(), 4);

    let req = actix_test::TestRequest::get()
        .uri("/api/v1/users/c45")
        .insert_header(bearer("me"))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["college"], "Tech Institute");

    let req = actix_test::TestRequest::delete()
        .uri("/api/v1/users/profile")
        .insert_header(bearer("me"))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = actix_test::TestRequest::get()
        .uri("/api/v1/users/profile")
        .insert_header(bearer("me"))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[test]
fn test_seed_file_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/seed.json");
    let store = tokio_test::block_on(MemoryStore::from_seed_file(path)).unwrap();

    let users = tokio_test::block_on(store.list_users()).unwrap();
    assert_eq!(users.len(), 5);
    assert!(tokio_test::block_on(store.find_match_between("user-4", "user-1"))
        .unwrap()
        .is_some());

    let ranked = Matcher::new()
        .rank_for("user-1", users, &FilterCriteria::default())
        .unwrap();
    // user-5 has not finished the survey
    assert_eq!(ranked.len(), 3);
    assert_eq!(ranked[0].user.id, "user-4");
    assert_eq!(ranked[0].compatibility_score, 95);

    let stored = tokio_test::block_on(store.find_match_by_id("match-1")).unwrap();
    assert_eq!(stored.compatibility_score, Some(ranked[0].compatibility_score));
}
