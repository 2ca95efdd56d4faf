use serde::{Deserialize, Serialize};
use std::ops::Deref;
use thiserror::Error;

/// A string that is not one of the accepted values for a categorical field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field} value '{value}', expected one of: {expected}")]
pub struct UnknownChoice {
    pub field: &'static str,
    pub value: String,
    pub expected: String,
}

/// Declares a closed set of string-valued choices.
///
/// Every categorical field gets its wire names, its `FromStr` parsing and its
/// list of valid values from this one declaration, so request validation and
/// scoring can never disagree about which values exist.
macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($field:literal) {
            $($variant:ident => $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownChoice;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)+
                    _ => Err(UnknownChoice {
                        field: $field,
                        value: s.to_string(),
                        expected: [$($value),+].join(", "),
                    }),
                }
            }
        }
    };
}

choice_enum! {
    SleepSchedule("sleepSchedule") {
        EarlyBird => "early-bird",
        NightOwl => "night-owl",
        Flexible => "flexible",
    }
}

choice_enum! {
    /// Ordered from tidiest to most relaxed; see [`Cleanliness::level`]
    Cleanliness("cleanliness") {
        VeryClean => "very-clean",
        ModeratelyClean => "moderately-clean",
        Relaxed => "relaxed",
    }
}

impl Cleanliness {
    /// Position on the cleanliness scale: relaxed = 0 up to very-clean = 2
    pub fn level(&self) -> u8 {
        match self {
            Cleanliness::Relaxed => 0,
            Cleanliness::ModeratelyClean => 1,
            Cleanliness::VeryClean => 2,
        }
    }
}

choice_enum! {
    StudyStyle("studyStyle") {
        QuietStudy => "quiet-study",
        BackgroundMusic => "background-music",
        GroupStudy => "group-study",
    }
}

choice_enum! {
    SocialLevel("socialLevel") {
        SocialButterfly => "social-butterfly",
        ModerateSocial => "moderate-social",
        PreferQuiet => "prefer-quiet",
    }
}

choice_enum! {
    NoiseTolerance("noiseTolerance") {
        QuietPreferred => "quiet-preferred",
        Moderate => "moderate",
        LoudOk => "loud-ok",
    }
}

choice_enum! {
    Gender("gender") {
        Male => "male",
        Female => "female",
        NonBinary => "non-binary",
        PreferNotToSay => "prefer-not-to-say",
    }
}

choice_enum! {
    RoomType("roomType") {
        Single => "single",
        Shared => "shared",
        Studio => "studio",
        House => "house",
    }
}

choice_enum! {
    /// Lifecycle state of a proposed match
    MatchStatus("status") {
        Pending => "pending",
        Accepted => "accepted",
        Rejected => "rejected",
    }
}

/// Lifestyle answers collected by the survey
///
/// Every field is optional: an absent answer is "unknown" and is left out of
/// scoring instead of counting as a mismatch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceProfile {
    #[serde(rename = "sleepSchedule", default, skip_serializing_if = "Option::is_none")]
    pub sleep_schedule: Option<SleepSchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleanliness: Option<Cleanliness>,
    #[serde(rename = "studyStyle", default, skip_serializing_if = "Option::is_none")]
    pub study_style: Option<StudyStyle>,
    #[serde(rename = "socialLevel", default, skip_serializing_if = "Option::is_none")]
    pub social_level: Option<SocialLevel>,
    #[serde(rename = "noiseTolerance", default, skip_serializing_if = "Option::is_none")]
    pub noise_tolerance: Option<NoiseTolerance>,
    #[serde(rename = "petFriendly", default, skip_serializing_if = "Option::is_none")]
    pub pet_friendly: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smoking: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drinking: Option<bool>,
}

impl PreferenceProfile {
    /// Overwrite the fields that are set in `other`, keeping the rest
    pub fn merge(&mut self, other: PreferenceProfile) {
        if other.sleep_schedule.is_some() {
            self.sleep_schedule = other.sleep_schedule;
        }
        if other.cleanliness.is_some() {
            self.cleanliness = other.cleanliness;
        }
        if other.study_style.is_some() {
            self.study_style = other.study_style;
        }
        if other.social_level.is_some() {
            self.social_level = other.social_level;
        }
        if other.noise_tolerance.is_some() {
            self.noise_tolerance = other.noise_tolerance;
        }
        if other.pet_friendly.is_some() {
            self.pet_friendly = other.pet_friendly;
        }
        if other.smoking.is_some() {
            self.smoking = other.smoking;
        }
        if other.drinking.is_some() {
            self.drinking = other.drinking;
        }
    }
}

/// A stored user as owned by the storage layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    #[serde(default)]
    pub email: String,
    /// Credential; stripped before a record leaves the service
    #[serde(rename = "password", default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    #[serde(rename = "firstName", default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName", default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default)]
    pub college: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(rename = "roomType", default, skip_serializing_if = "Option::is_none")]
    pub room_type: Option<RoomType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(rename = "dealBreakers", default)]
    pub deal_breakers: Vec<String>,
    #[serde(rename = "additionalInfo", default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<PreferenceProfile>,
    #[serde(rename = "profileCompleted", default)]
    pub profile_completed: bool,
    #[serde(rename = "surveyCompleted", default)]
    pub survey_completed: bool,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl UserRecord {
    /// Both the profile and the survey have been completed
    pub fn is_match_ready(&self) -> bool {
        self.profile_completed && self.survey_completed
    }

    /// Mark the profile complete once every required field is filled in.
    ///
    /// The flag is never cleared again by a later patch.
    pub fn refresh_profile_completed(&mut self) {
        let has_text = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.is_empty());

        if has_text(&self.first_name)
            && has_text(&self.last_name)
            && !self.college.is_empty()
            && self.gender.is_some()
            && self.room_type.is_some()
        {
            self.profile_completed = true;
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Some(chrono::Utc::now());
    }
}

/// A user record with its credentials removed
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PublicUser(UserRecord);

impl From<UserRecord> for PublicUser {
    fn from(mut user: UserRecord) -> Self {
        user.password_hash = None;
        Self(user)
    }
}

impl Deref for PublicUser {
    type Target = UserRecord;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A candidate annotated with its compatibility against the requester
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompatibilityResult {
    #[serde(flatten)]
    pub user: PublicUser,
    #[serde(rename = "compatibilityScore")]
    pub compatibility_score: u8,
}

/// A proposed pairing between two users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: String,
    #[serde(rename = "user1Id")]
    pub user1_id: String,
    #[serde(rename = "user2Id")]
    pub user2_id: String,
    pub status: MatchStatus,
    #[serde(rename = "compatibilityScore", default, skip_serializing_if = "Option::is_none")]
    pub compatibility_score: Option<u8>,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl MatchRecord {
    /// Create a pending match proposed by `proposer_id`
    pub fn pending(proposer_id: &str, other_user_id: &str, compatibility_score: Option<u8>) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user1_id: proposer_id.to_string(),
            user2_id: other_user_id.to_string(),
            status: MatchStatus::Pending,
            compatibility_score,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn involves(&self, user_id: &str) -> bool {
        self.user1_id == user_id || self.user2_id == user_id
    }

    /// True if this match pairs the two users, in either order
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.user1_id == a && self.user2_id == b) || (self.user1_id == b && self.user2_id == a)
    }

    /// The participant that is not `user_id`
    pub fn other_party(&self, user_id: &str) -> &str {
        if self.user1_id == user_id {
            &self.user2_id
        } else {
            &self.user1_id
        }
    }
}

/// Typed, already-parsed filters for a ranking request
///
/// Every field is an independent predicate; a candidate must pass all of the
/// ones that are set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Case-insensitive substring of the candidate's college
    pub college: Option<String>,
    /// `None` means any gender
    pub gender: Option<Gender>,
    pub min_age: Option<u8>,
    pub max_age: Option<u8>,
    pub sleep_schedule: Option<SleepSchedule>,
    pub cleanliness: Option<Cleanliness>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        *self == FilterCriteria::default()
    }
}
