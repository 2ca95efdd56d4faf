use crate::models::{FilterCriteria, UserRecord};

/// Check if a user may appear in another user's candidate list
///
/// This is Stage 1 of the ranking pipeline: the requester is never their own
/// candidate, and only users who finished both the profile and the survey are
/// eligible.
#[inline]
pub fn is_eligible_candidate(candidate: &UserRecord, requester_id: &str) -> bool {
    candidate.id != requester_id && candidate.is_match_ready()
}

/// Check a candidate against every filter that is set
#[inline]
pub fn matches_criteria(candidate: &UserRecord, criteria: &FilterCriteria) -> bool {
    matches_college(candidate, criteria.college.as_deref())
        && matches_gender(candidate, criteria)
        && matches_age(candidate, criteria.min_age, criteria.max_age)
        && matches_sleep_schedule(candidate, criteria)
        && matches_cleanliness(candidate, criteria)
}

/// Case-insensitive substring match on the college name
#[inline]
pub fn matches_college(candidate: &UserRecord, college: Option<&str>) -> bool {
    match college {
        Some(needle) if !needle.is_empty() => candidate
            .college
            .to_lowercase()
            .contains(&needle.to_lowercase()),
        _ => true,
    }
}

#[inline]
fn matches_gender(candidate: &UserRecord, criteria: &FilterCriteria) -> bool {
    match criteria.gender {
        Some(gender) => candidate.gender == Some(gender),
        None => true,
    }
}

/// Inclusive age range check
///
/// Candidates without a recorded age always pass. A range whose minimum is
/// above its maximum cannot be evaluated and is ignored.
#[inline]
pub fn matches_age(candidate: &UserRecord, min_age: Option<u8>, max_age: Option<u8>) -> bool {
    if let (Some(min), Some(max)) = (min_age, max_age) {
        if min > max {
            return true;
        }
    }

    let Some(age) = candidate.age else {
        return true;
    };

    min_age.map_or(true, |min| age >= min) && max_age.map_or(true, |max| age <= max)
}

#[inline]
fn matches_sleep_schedule(candidate: &UserRecord, criteria: &FilterCriteria) -> bool {
    match criteria.sleep_schedule {
        Some(wanted) => candidate
            .preferences
            .as_ref()
            .is_some_and(|p| p.sleep_schedule == Some(wanted)),
        None => true,
    }
}

#[inline]
fn matches_cleanliness(candidate: &UserRecord, criteria: &FilterCriteria) -> bool {
    match criteria.cleanliness {
        Some(wanted) => candidate
            .preferences
            .as_ref()
            .is_some_and(|p| p.cleanliness == Some(wanted)),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Cleanliness, Gender, PreferenceProfile, SleepSchedule};

    fn create_test_candidate(college: &str, gender: Gender, age: Option<u8>) -> UserRecord {
        UserRecord {
            id: "candidate".to_string(),
            college: college.to_string(),
            gender: Some(gender),
            age,
            preferences: Some(PreferenceProfile {
                sleep_schedule: Some(SleepSchedule::NightOwl),
                cleanliness: Some(Cleanliness::Relaxed),
                ..Default::default()
            }),
            profile_completed: true,
            survey_completed: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_eligibility_excludes_self_and_incomplete() {
        let mut candidate = create_test_candidate("MIT", Gender::Female, Some(21));
        assert!(is_eligible_candidate(&candidate, "requester"));
        assert!(!is_eligible_candidate(&candidate, "candidate"));

        candidate.survey_completed = false;
        assert!(!is_eligible_candidate(&candidate, "requester"));

        candidate.survey_completed = true;
        candidate.profile_completed = false;
        assert!(!is_eligible_candidate(&candidate, "requester"));
    }

    #[test]
    fn test_college_substring_ignores_case() {
        let candidate = create_test_candidate("Stanford University", Gender::Male, None);
        assert!(matches_college(&candidate, Some("stanford")));
        assert!(matches_college(&candidate, Some("UNIVERSITY")));
        assert!(matches_college(&candidate, Some("")));
        assert!(!matches_college(&candidate, Some("berkeley")));
    }

    #[test]
    fn test_age_range() {
        let thirty = create_test_candidate("MIT", Gender::Male, Some(30));
        let twenty_two = create_test_candidate("MIT", Gender::Male, Some(22));
        let unknown = create_test_candidate("MIT", Gender::Male, None);

        assert!(!matches_age(&thirty, Some(20), Some(25)));
        assert!(matches_age(&twenty_two, Some(20), Some(25)));
        assert!(matches_age(&unknown, Some(20), Some(25)));
        assert!(matches_age(&thirty, Some(25), None));
        assert!(!matches_age(&twenty_two, None, Some(21)));
    }

    #[test]
    fn test_inverted_age_range_passes() {
        let candidate = create_test_candidate("MIT", Gender::Male, Some(30));
        assert!(matches_age(&candidate, Some(40), Some(20)));
    }

    #[test]
    fn test_criteria_are_conjunctive() {
        let candidate = create_test_candidate("MIT", Gender::Female, Some(22));

        let matching = FilterCriteria {
            college: Some("mit".to_string()),
            gender: Some(Gender::Female),
            sleep_schedule: Some(SleepSchedule::NightOwl),
            cleanliness: Some(Cleanliness::Relaxed),
            ..Default::default()
        };
        assert!(matches_criteria(&candidate, &matching));

        let wrong_cleanliness = FilterCriteria {
            cleanliness: Some(Cleanliness::VeryClean),
            ..matching.clone()
        };
        assert!(!matches_criteria(&candidate, &wrong_cleanliness));

        let wrong_gender = FilterCriteria {
            gender: Some(Gender::Male),
            ..matching
        };
        assert!(!matches_criteria(&candidate, &wrong_gender));
    }

    #[test]
    fn test_preference_filters_fail_without_preferences() {
        let mut candidate = create_test_candidate("MIT", Gender::Female, None);
        candidate.preferences = None;

        let criteria = FilterCriteria {
            sleep_schedule: Some(SleepSchedule::NightOwl),
            ..Default::default()
        };
        assert!(!matches_criteria(&candidate, &criteria));
        assert!(matches_criteria(&candidate, &FilterCriteria::default()));
    }
}
