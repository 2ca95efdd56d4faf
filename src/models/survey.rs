use serde::Serialize;

use crate::models::domain::{Cleanliness, SleepSchedule, SocialLevel, StudyStyle};

/// One selectable answer to a survey question
#[derive(Debug, Clone, Serialize)]
pub struct SurveyOption {
    pub value: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

/// A survey question as presented to the client
#[derive(Debug, Clone, Serialize)]
pub struct SurveyQuestion {
    pub id: &'static str,
    pub question: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SurveyOption>,
    pub required: bool,
}

fn sleep_schedule_text(value: SleepSchedule) -> (&'static str, &'static str) {
    match value {
        SleepSchedule::EarlyBird => ("Early Bird", "Up early, asleep early"),
        SleepSchedule::NightOwl => ("Night Owl", "Late to bed, late to rise"),
        SleepSchedule::Flexible => ("Flexible", "Can adapt to various schedules"),
    }
}

fn cleanliness_text(value: Cleanliness) -> (&'static str, &'static str) {
    match value {
        Cleanliness::VeryClean => ("Very Clean", "Everything in its place, daily cleaning"),
        Cleanliness::ModeratelyClean => ("Moderately Clean", "Regular cleaning, organized most of the time"),
        Cleanliness::Relaxed => ("Relaxed", "Lived-in feel, clean when needed"),
    }
}

fn study_style_text(value: StudyStyle) -> (&'static str, &'static str) {
    match value {
        StudyStyle::QuietStudy => ("Quiet Environment", "Need silence to focus and concentrate"),
        StudyStyle::BackgroundMusic => ("Background Music", "Light music or ambient sounds help"),
        StudyStyle::GroupStudy => ("Group Study", "Prefer studying with others"),
    }
}

fn social_level_text(value: SocialLevel) -> (&'static str, &'static str) {
    match value {
        SocialLevel::SocialButterfly => ("Social Butterfly", "Love having friends over regularly"),
        SocialLevel::ModerateSocial => ("Moderate Social", "Occasional gatherings are perfect"),
        SocialLevel::PreferQuiet => ("Prefer Quiet", "Like a peaceful, calm environment"),
    }
}

fn options<T: Copy>(
    values: &[T],
    value_str: fn(&T) -> &'static str,
    text: fn(T) -> (&'static str, &'static str),
) -> Vec<SurveyOption> {
    values
        .iter()
        .map(|v| {
            let (label, description) = text(*v);
            SurveyOption {
                value: value_str(v),
                label,
                description,
            }
        })
        .collect()
}

fn single_choice(id: &'static str, question: &'static str, options: Vec<SurveyOption>) -> SurveyQuestion {
    SurveyQuestion {
        id,
        question,
        kind: "single-choice",
        description: None,
        options,
        required: true,
    }
}

fn free_text(id: &'static str, question: &'static str, description: &'static str) -> SurveyQuestion {
    SurveyQuestion {
        id,
        question,
        kind: "multiple-text",
        description: Some(description),
        options: Vec::new(),
        required: false,
    }
}

/// The survey questionnaire, built from the preference enums so the offered
/// options always match what the service accepts
pub fn survey_questions() -> Vec<SurveyQuestion> {
    vec![
        single_choice(
            "sleepSchedule",
            "What is your preferred sleep schedule?",
            options(SleepSchedule::ALL, SleepSchedule::as_str, sleep_schedule_text),
        ),
        single_choice(
            "cleanliness",
            "How clean do you keep your living space?",
            options(Cleanliness::ALL, Cleanliness::as_str, cleanliness_text),
        ),
        single_choice(
            "studyStyle",
            "How do you prefer to study?",
            options(StudyStyle::ALL, StudyStyle::as_str, study_style_text),
        ),
        single_choice(
            "socialLevel",
            "What are your social preferences?",
            options(SocialLevel::ALL, SocialLevel::as_str, social_level_text),
        ),
        free_text(
            "interests",
            "What are your interests and hobbies?",
            "Add up to 20 interests",
        ),
        free_text(
            "dealBreakers",
            "What are your deal breakers?",
            "What would make living together difficult?",
        ),
    ]
}
