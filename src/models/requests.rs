use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationError};

use crate::models::domain::{
    Cleanliness, FilterCriteria, Gender, NoiseTolerance, PreferenceProfile, RoomType,
    SleepSchedule, SocialLevel, StudyStyle, UnknownChoice, UserRecord,
};

/// Partial profile update; only the fields present are applied
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 2, max = 50))]
    #[serde(rename = "firstName", default)]
    pub first_name: Option<String>,
    #[validate(length(min = 2, max = 50))]
    #[serde(rename = "lastName", default)]
    pub last_name: Option<String>,
    #[validate(length(min = 2, max = 100))]
    #[serde(default)]
    pub college: Option<String>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(rename = "roomType", default)]
    pub room_type: Option<RoomType>,
    #[validate(length(max = 500))]
    #[serde(default)]
    pub bio: Option<String>,
    #[validate(range(min = 18, max = 100))]
    #[serde(default)]
    pub age: Option<u8>,
    #[validate(custom(function = "validate_interests"))]
    #[serde(default)]
    pub interests: Option<Vec<String>>,
    #[serde(default)]
    pub preferences: Option<PreferenceProfile>,
}

impl UpdateProfileRequest {
    /// Apply the patch field by field, then re-check profile completion
    pub fn apply_to(self, user: &mut UserRecord) {
        if let Some(first_name) = self.first_name {
            user.first_name = Some(first_name);
        }
        if let Some(last_name) = self.last_name {
            user.last_name = Some(last_name);
        }
        if let Some(college) = self.college {
            user.college = college;
        }
        if let Some(gender) = self.gender {
            user.gender = Some(gender);
        }
        if let Some(room_type) = self.room_type {
            user.room_type = Some(room_type);
        }
        if let Some(bio) = self.bio {
            user.bio = Some(bio);
        }
        if let Some(age) = self.age {
            user.age = Some(age);
        }
        if let Some(interests) = self.interests {
            user.interests = interests;
        }
        if let Some(preferences) = self.preferences {
            user.preferences
                .get_or_insert_with(PreferenceProfile::default)
                .merge(preferences);
        }

        user.refresh_profile_completed();
        user.touch();
    }
}

/// Survey answers; the four scored dimensions are mandatory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyPreferences {
    #[serde(rename = "sleepSchedule")]
    pub sleep_schedule: SleepSchedule,
    pub cleanliness: Cleanliness,
    #[serde(rename = "studyStyle")]
    pub study_style: StudyStyle,
    #[serde(rename = "socialLevel")]
    pub social_level: SocialLevel,
    #[serde(rename = "noiseTolerance", default)]
    pub noise_tolerance: Option<NoiseTolerance>,
    #[serde(rename = "petFriendly", default)]
    pub pet_friendly: Option<bool>,
    #[serde(default)]
    pub smoking: Option<bool>,
    #[serde(default)]
    pub drinking: Option<bool>,
}

impl From<SurveyPreferences> for PreferenceProfile {
    fn from(value: SurveyPreferences) -> Self {
        Self {
            sleep_schedule: Some(value.sleep_schedule),
            cleanliness: Some(value.cleanliness),
            study_style: Some(value.study_style),
            social_level: Some(value.social_level),
            noise_tolerance: value.noise_tolerance,
            pet_friendly: value.pet_friendly,
            smoking: value.smoking,
            drinking: value.drinking,
        }
    }
}

/// Full survey submission, used for both first submission and updates
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SurveySubmission {
    pub preferences: SurveyPreferences,
    #[validate(length(max = 20), custom(function = "validate_interests"))]
    #[serde(default)]
    pub interests: Option<Vec<String>>,
    #[validate(length(max = 10), custom(function = "validate_deal_breakers"))]
    #[serde(rename = "dealBreakers", default)]
    pub deal_breakers: Option<Vec<String>>,
    #[validate(length(max = 500))]
    #[serde(rename = "additionalInfo", default)]
    pub additional_info: Option<String>,
}

impl SurveySubmission {
    pub fn apply_to(self, user: &mut UserRecord) {
        user.preferences = Some(self.preferences.into());
        if let Some(interests) = self.interests {
            user.interests = interests;
        }
        if let Some(deal_breakers) = self.deal_breakers {
            user.deal_breakers = deal_breakers;
        }
        if let Some(additional_info) = self.additional_info {
            user.additional_info = Some(additional_info);
        }
        user.survey_completed = true;
        user.touch();
    }
}

fn validate_items(items: &[String], max_len: usize, code: &'static str) -> Result<(), ValidationError> {
    if items.iter().any(|item| item.chars().count() > max_len) {
        return Err(ValidationError::new(code));
    }
    Ok(())
}

fn validate_interests(items: &[String]) -> Result<(), ValidationError> {
    validate_items(items, 50, "interest_too_long")
}

fn validate_deal_breakers(items: &[String]) -> Result<(), ValidationError> {
    validate_items(items, 100, "deal_breaker_too_long")
}

/// Request to propose a match with another user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateMatchRequest {
    #[validate(length(min = 1, message = "Other user ID is required"))]
    #[serde(rename = "otherUserId", default)]
    pub other_user_id: String,
}

/// Request to move a match to a new status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateMatchStatusRequest {
    #[serde(default)]
    pub status: String,
}

/// Raw query string filters for the potential matches endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PotentialMatchesQuery {
    pub college: Option<String>,
    pub gender: Option<String>,
    #[serde(rename = "minAge")]
    pub min_age: Option<String>,
    #[serde(rename = "maxAge")]
    pub max_age: Option<String>,
    #[serde(rename = "sleepSchedule")]
    pub sleep_schedule: Option<String>,
    pub cleanliness: Option<String>,
}

/// A query string filter that could not be parsed
#[derive(Debug, Error)]
pub enum FilterParseError {
    #[error(transparent)]
    UnknownChoice(#[from] UnknownChoice),

    #[error("invalid {field} value '{value}', expected a whole number")]
    InvalidAge { field: &'static str, value: String },
}

impl PotentialMatchesQuery {
    /// Parse into typed criteria. Empty values count as absent, and a gender
    /// of `any` disables the gender filter.
    pub fn into_criteria(self) -> Result<FilterCriteria, FilterParseError> {
        let present = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        let gender = match present(self.gender) {
            Some(value) if value == "any" => None,
            Some(value) => Some(value.parse::<Gender>()?),
            None => None,
        };

        Ok(FilterCriteria {
            college: present(self.college),
            gender,
            min_age: parse_age("minAge", present(self.min_age))?,
            max_age: parse_age("maxAge", present(self.max_age))?,
            sleep_schedule: present(self.sleep_schedule)
                .map(|v| v.parse::<SleepSchedule>())
                .transpose()?,
            cleanliness: present(self.cleanliness)
                .map(|v| v.parse::<Cleanliness>())
                .transpose()?,
        })
    }
}

fn parse_age(field: &'static str, value: Option<String>) -> Result<Option<u8>, FilterParseError> {
    value
        .map(|v| {
            v.trim()
                .parse::<u8>()
                .map_err(|_| FilterParseError::InvalidAge { field, value: v.clone() })
        })
        .transpose()
}
