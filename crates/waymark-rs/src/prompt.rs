//! Versioned generation instructions and the strict output schema.
//!
//! Everything that defines the product's voice lives in [`PromptTemplate`]:
//! persona, constraints, the forbidden-word list and the output contract.
//! Changing wording means shipping a new template (or loading one from a
//! JSON file with [`PromptTemplate::from_file`]); the backend and resolver
//! never inspect its contents.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::schema::UserResponses;

/// Schema name sent with the `json_schema` response format.
pub const RESPONSE_SCHEMA_NAME: &str = "ai_starting_roadmap";

/// The instruction set sent to the generative backend.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PromptTemplate {
    /// Bumped whenever wording or constraints change.
    pub version: String,
    /// Role the model is asked to play.
    pub persona: String,
    /// Task statement. `{user_type}`, `{focus_area}`, `{ai_level}` and
    /// `{priority}` are substituted with the user's answers.
    pub instruction: String,
    /// Hard content rules, rendered as a bulleted list.
    pub constraints: Vec<String>,
    /// Words the output must never contain.
    pub forbidden_words: Vec<String>,
    /// Description of the expected JSON document.
    pub output_contract: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            version: "2025-01.1".to_string(),
            persona: "You are a Senior AI Strategist.".to_string(),
            instruction: "Generate a high-substance, two-tier \"AI Starting Roadmap\" for:\n\
                          - User Type: {user_type}\n\
                          - Strategic Focus: {focus_area}\n\
                          - AI Experience: {ai_level}\n\
                          - Priority: {priority}"
                .to_string(),
            constraints: vec![
                "NO products.".to_string(),
                "NO prices.".to_string(),
                "NO links.".to_string(),
                "NO motivational fluff.".to_string(),
                "NO promotional language; keep a neutral, professional register.".to_string(),
            ],
            forbidden_words: [
                "game-changer",
                "revolutionary",
                "cutting-edge",
                "skyrocket",
                "supercharge",
                "unleash",
                "unlock",
                "effortless",
                "guaranteed",
                "secret",
                "hack",
                "10x",
            ]
            .iter()
            .map(|w| w.to_string())
            .collect(),
            output_contract: "OUTPUT JSON with keys: situation, focus, ignore, oneStep, \
                              next30Days, nextStep.\n\
                              Each section needs a 'preview' (list) and 'comprehensive' \
                              (detailed) part."
                .to_string(),
        }
    }
}

/// A prompt ready to be sent: system and user message bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPrompt {
    pub system: String,
    pub user: String,
}

impl PromptTemplate {
    /// Load a template from a JSON file. Missing keys take default values.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read prompt config '{}': {e}", path.display()))?;
        serde_json::from_str(&content)
            .map_err(|e| format!("failed to parse prompt config '{}': {e}", path.display()))
    }

    /// Build the system and user messages for a set of answers.
    pub fn render(&self, responses: &UserResponses) -> RenderedPrompt {
        let mut system = self.persona.clone();

        if !self.constraints.is_empty() {
            system.push_str("\n\nSTRICT CONSTRAINTS:");
            for c in &self.constraints {
                system.push_str(&format!("\n- {c}"));
            }
        }

        if !self.forbidden_words.is_empty() {
            system.push_str(&format!(
                "\n\nNever use these words: {}.",
                self.forbidden_words.join(", ")
            ));
        }

        if !self.output_contract.is_empty() {
            system.push_str("\n\n");
            system.push_str(&self.output_contract);
        }

        let user = substitute(&self.instruction, responses);

        RenderedPrompt { system, user }
    }

    /// Forbidden words that appear as whole words in `text`
    /// (case-insensitive).
    pub fn forbidden_words_in(&self, text: &str) -> Vec<&str> {
        let lower = text.to_lowercase();
        self.forbidden_words
            .iter()
            .filter(|w| contains_word(&lower, &w.to_lowercase()))
            .map(String::as_str)
            .collect()
    }
}

/// Replace `{user_type}`, `{focus_area}`, `{ai_level}` and `{priority}` in
/// one pass. Answer text is emitted as-is and never scanned for tokens.
fn substitute(template: &str, responses: &UserResponses) -> String {
    let answer = |name: &str| match name {
        "user_type" => Some(responses.user_type.as_str()),
        "focus_area" => Some(responses.focus_area.as_str()),
        "ai_level" => Some(responses.ai_level.as_str()),
        "priority" => Some(responses.priority.as_str()),
        _ => None,
    };

    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some((before, after)) = rest.split_once('{') {
        out.push_str(before);
        let token = after
            .split_once('}')
            .and_then(|(name, tail)| answer(name).map(|value| (value, tail)));
        match token {
            Some((value, tail)) => {
                out.push_str(value);
                rest = tail;
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// `word` occurs in `haystack` with no alphanumeric character on either side.
fn contains_word(haystack: &str, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    haystack.match_indices(word).any(|(start, m)| {
        let before = haystack.get(..start).and_then(|s| s.chars().next_back());
        let after = haystack.get(start + m.len()..).and_then(|s| s.chars().next());
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

fn list_section() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "preview": {"type": "array", "items": {"type": "string"}},
            "comprehensive": {"type": "array", "items": {"type": "string"}}
        },
        "required": ["preview", "comprehensive"],
        "additionalProperties": false
    })
}

fn text_section() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "preview": {"type": "string"},
            "comprehensive": {"type": "string"}
        },
        "required": ["preview", "comprehensive"],
        "additionalProperties": false
    })
}

/// Strict structural schema the backend must emit.
///
/// List-like sections (`situation`, `focus`, `ignore`) are arrays of strings
/// on both tiers; singular sections and the four weeks are strings. This is
/// narrower than [`crate::schema::roadmap_json_schema`], which also accepts
/// mixed shapes.
pub fn response_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "situation": list_section(),
            "focus": list_section(),
            "ignore": list_section(),
            "oneStep": text_section(),
            "next30Days": {
                "type": "object",
                "properties": {
                    "week1": text_section(),
                    "week2": text_section(),
                    "week3": text_section(),
                    "week4": text_section()
                },
                "required": ["week1", "week2", "week3", "week4"],
                "additionalProperties": false
            },
            "nextStep": text_section()
        },
        "required": ["situation", "focus", "ignore", "oneStep", "next30Days", "nextStep"],
        "additionalProperties": false
    })
}
