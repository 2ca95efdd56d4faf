use crate::models::{Cleanliness, PreferenceProfile, SleepSchedule, SocialLevel, StudyStyle, UserRecord};

pub const SLEEP_SCHEDULE_WEIGHT: u32 = 30;
pub const CLEANLINESS_WEIGHT: u32 = 25;
pub const STUDY_STYLE_WEIGHT: u32 = 20;
pub const SOCIAL_LEVEL_WEIGHT: u32 = 15;
pub const COLLEGE_WEIGHT: u32 = 10;

/// A dimension that contributes to the compatibility score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Factor {
    SleepSchedule,
    Cleanliness,
    StudyStyle,
    SocialLevel,
    College,
}

impl Factor {
    /// Maximum points this factor can contribute
    pub fn weight(&self) -> u32 {
        match self {
            Factor::SleepSchedule => SLEEP_SCHEDULE_WEIGHT,
            Factor::Cleanliness => CLEANLINESS_WEIGHT,
            Factor::StudyStyle => STUDY_STYLE_WEIGHT,
            Factor::SocialLevel => SOCIAL_LEVEL_WEIGHT,
            Factor::College => COLLEGE_WEIGHT,
        }
    }
}

/// Points earned on one factor both users answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactorScore {
    pub factor: Factor,
    pub earned: u32,
}

/// Per-factor detail behind a compatibility score
///
/// Only factors both users provided data for appear here, so `possible()` is
/// the sum of the applicable weights rather than a fixed 100.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub factors: Vec<FactorScore>,
}

impl ScoreBreakdown {
    pub fn earned(&self) -> u32 {
        self.factors.iter().map(|f| f.earned).sum()
    }

    pub fn possible(&self) -> u32 {
        self.factors.iter().map(|f| f.factor.weight()).sum()
    }

    /// Earned points as a percentage of the possible points, rounded half up
    pub fn percentage(&self) -> u8 {
        let possible = self.possible();
        if possible == 0 {
            return 0;
        }
        let earned = self.earned();
        // Integer form of round(earned / possible * 100)
        ((earned * 100 + possible / 2) / possible) as u8
    }

    fn push(&mut self, factor: Factor, earned: u32) {
        self.factors.push(FactorScore { factor, earned });
    }
}

/// Calculate the 0-100 compatibility of two users
///
/// Returns 0 if either user has no preference profile, or if the two users
/// share no comparable data at all.
pub fn calculate_compatibility(a: &UserRecord, b: &UserRecord) -> u8 {
    score_breakdown(a, b).map_or(0, |breakdown| breakdown.percentage())
}

/// Evaluate every factor both users can be compared on
///
/// Returns `None` when either user lacks a preference profile.
pub fn score_breakdown(a: &UserRecord, b: &UserRecord) -> Option<ScoreBreakdown> {
    let (prefs_a, prefs_b) = match (&a.preferences, &b.preferences) {
        (Some(pa), Some(pb)) => (pa, pb),
        _ => return None,
    };

    let mut breakdown = ScoreBreakdown::default();
    score_preferences(prefs_a, prefs_b, &mut breakdown);

    if !a.college.is_empty() && !b.college.is_empty() {
        breakdown.push(Factor::College, college_points(&a.college, &b.college));
    }

    Some(breakdown)
}

fn score_preferences(a: &PreferenceProfile, b: &PreferenceProfile, breakdown: &mut ScoreBreakdown) {
    if let (Some(x), Some(y)) = (a.sleep_schedule, b.sleep_schedule) {
        breakdown.push(Factor::SleepSchedule, sleep_schedule_points(x, y));
    }
    if let (Some(x), Some(y)) = (a.cleanliness, b.cleanliness) {
        breakdown.push(Factor::Cleanliness, cleanliness_points(x, y));
    }
    if let (Some(x), Some(y)) = (a.study_style, b.study_style) {
        breakdown.push(Factor::StudyStyle, study_style_points(x, y));
    }
    if let (Some(x), Some(y)) = (a.social_level, b.social_level) {
        breakdown.push(Factor::SocialLevel, social_level_points(x, y));
    }
}

#[inline]
fn sleep_schedule_points(a: SleepSchedule, b: SleepSchedule) -> u32 {
    if a == b {
        SLEEP_SCHEDULE_WEIGHT
    } else if a == SleepSchedule::Flexible || b == SleepSchedule::Flexible {
        20
    } else {
        0
    }
}

#[inline]
fn cleanliness_points(a: Cleanliness, b: Cleanliness) -> u32 {
    match a.level().abs_diff(b.level()) {
        0 => CLEANLINESS_WEIGHT,
        1 => 15,
        2 => 5,
        _ => 0,
    }
}

#[inline]
fn study_style_points(a: StudyStyle, b: StudyStyle) -> u32 {
    if a == b {
        STUDY_STYLE_WEIGHT
    } else if a == StudyStyle::BackgroundMusic || b == StudyStyle::BackgroundMusic {
        10
    } else {
        0
    }
}

#[inline]
fn social_level_points(a: SocialLevel, b: SocialLevel) -> u32 {
    if a == b {
        SOCIAL_LEVEL_WEIGHT
    } else if a == SocialLevel::ModerateSocial || b == SocialLevel::ModerateSocial {
        10
    } else {
        0
    }
}

/// Exact, case-sensitive comparison
#[inline]
fn college_points(a: &str, b: &str) -> u32 {
    if a == b {
        COLLEGE_WEIGHT
    } else {
        0
    }
}
