//! The four questions and their answer vocabulary.
//!
//! Front ends present these options; the engine itself accepts any
//! non-empty answer. [`unrecognized_answers`] lets callers warn about values
//! outside the vocabulary without rejecting them.

use serde::Serialize;

use crate::schema::UserResponses;

/// One questionnaire step.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    /// Wire key of the answer in [`UserResponses`].
    pub id: &'static str,
    pub text: &'static str,
    pub options: &'static [&'static str],
}

pub const QUESTIONS: [Question; 4] = [
    Question {
        id: "userType",
        text: "Which best describes you?",
        options: &[
            "Solopreneur",
            "Freelancer",
            "Small business owner",
            "Agency owner",
            "Coach or consultant",
            "E-commerce founder",
            "Content creator",
        ],
    },
    Question {
        id: "focusArea",
        text: "What do you want help with right now?",
        options: &[
            "Content & marketing",
            "Business operations",
            "Learning AI basics",
            "Clarifying what to build",
        ],
    },
    Question {
        id: "aiLevel",
        text: "How comfortable are you with AI tools today?",
        options: &["New to AI", "Tried a few tools", "Comfortable but unfocused"],
    },
    Question {
        id: "priority",
        text: "What matters most for you this month?",
        options: &[
            "Save time",
            "Reduce confusion",
            "Launch something",
            "Learn AI efficiently",
        ],
    },
];

impl Question {
    pub fn for_field(id: &str) -> Option<&'static Question> {
        QUESTIONS.iter().find(|q| q.id == id)
    }

    pub fn accepts(&self, answer: &str) -> bool {
        self.options.contains(&answer)
    }
}

/// `(field, value)` pairs whose value is not one of the listed options.
pub fn unrecognized_answers(responses: &UserResponses) -> Vec<(&'static str, String)> {
    responses
        .fields()
        .into_iter()
        .filter(|(key, value)| Question::for_field(key).is_some_and(|q| !q.accepts(value)))
        .map(|(key, value)| (key, value.to_string()))
        .collect()
}
