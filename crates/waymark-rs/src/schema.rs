//! Dual-tier roadmap data model shared by every producer and consumer.
//!
//! A roadmap is a closed record of six slots. Each slot holds a
//! [`RoadmapSection`] with a terse `preview` and a detailed `comprehensive`
//! rendering; either side may be a single string or a list of strings.
//!
//! Producers that cannot guarantee a conforming [`RoadmapData`] must fail
//! instead of returning. Use [`conformance_errors`] / [`is_conforming`] to
//! check an untyped JSON candidate before deserializing it.

use std::fmt;
use std::sync::LazyLock;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::json_schema_for;

// ── User input ─────────────────────────────────────────────────────

/// The four questionnaire answers a roadmap is generated from.
///
/// Values normally come from the questionnaire vocabulary
/// ([`crate::questionnaire`]), but nothing in the engine relies on that.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserResponses {
    pub user_type: String,
    pub focus_area: String,
    pub ai_level: String,
    pub priority: String,
}

/// Invalid questionnaire input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResponsesError {
    #[error("answer for '{0}' must not be empty")]
    EmptyField(&'static str),
}

impl UserResponses {
    pub fn new(
        user_type: impl Into<String>,
        focus_area: impl Into<String>,
        ai_level: impl Into<String>,
        priority: impl Into<String>,
    ) -> Self {
        Self {
            user_type: user_type.into(),
            focus_area: focus_area.into(),
            ai_level: ai_level.into(),
            priority: priority.into(),
        }
    }

    /// Answers as `(wire key, value)` pairs in questionnaire order.
    pub fn fields(&self) -> [(&'static str, &str); 4] {
        [
            ("userType", &self.user_type),
            ("focusArea", &self.focus_area),
            ("aiLevel", &self.ai_level),
            ("priority", &self.priority),
        ]
    }

    /// Reject blank answers. Reports the first offending field.
    pub fn validate(&self) -> Result<(), ResponsesError> {
        match self.fields().iter().find(|(_, v)| v.trim().is_empty()) {
            Some((key, _)) => Err(ResponsesError::EmptyField(key)),
            None => Ok(()),
        }
    }
}

// ── Sections ───────────────────────────────────────────────────────

/// One side of a section: a single paragraph or an ordered list.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum SectionContent {
    Text(String),
    List(Vec<String>),
}

impl SectionContent {
    pub fn is_list(&self) -> bool {
        matches!(self, SectionContent::List(_))
    }

    /// The content as a slice of items. A scalar yields one item.
    pub fn items(&self) -> Vec<&str> {
        match self {
            SectionContent::Text(s) => vec![s.as_str()],
            SectionContent::List(items) => items.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for SectionContent {
    fn from(s: &str) -> Self {
        SectionContent::Text(s.to_string())
    }
}

impl From<String> for SectionContent {
    fn from(s: String) -> Self {
        SectionContent::Text(s)
    }
}

impl From<Vec<String>> for SectionContent {
    fn from(items: Vec<String>) -> Self {
        SectionContent::List(items)
    }
}

impl<const N: usize> From<[&str; N]> for SectionContent {
    fn from(items: [&str; N]) -> Self {
        SectionContent::List(items.iter().map(|s| s.to_string()).collect())
    }
}

/// Level of detail a consumer wants to show.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Preview,
    Comprehensive,
}

/// The dual-tier unit of roadmap content.
///
/// `preview` and `comprehensive` are expected to share a shape, but this is
/// not enforced: consumers must accept any combination.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RoadmapSection {
    pub preview: SectionContent,
    pub comprehensive: SectionContent,
}

impl RoadmapSection {
    pub fn new(preview: impl Into<SectionContent>, comprehensive: impl Into<SectionContent>) -> Self {
        Self {
            preview: preview.into(),
            comprehensive: comprehensive.into(),
        }
    }

    pub fn tier(&self, tier: Tier) -> &SectionContent {
        match tier {
            Tier::Preview => &self.preview,
            Tier::Comprehensive => &self.comprehensive,
        }
    }

    /// Whether both tiers have the same shape (both scalar or both lists).
    pub fn is_uniform(&self) -> bool {
        self.preview.is_list() == self.comprehensive.is_list()
    }
}

/// The 30-day outlook: exactly four weekly sections.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ThirtyDayPlan {
    pub week1: RoadmapSection,
    pub week2: RoadmapSection,
    pub week3: RoadmapSection,
    pub week4: RoadmapSection,
}

impl ThirtyDayPlan {
    /// `(week number, section)` pairs, week 1 first.
    pub fn weeks(&self) -> [(u8, &RoadmapSection); 4] {
        [
            (1, &self.week1),
            (2, &self.week2),
            (3, &self.week3),
            (4, &self.week4),
        ]
    }
}

/// A complete roadmap document.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RoadmapData {
    pub situation: RoadmapSection,
    pub focus: RoadmapSection,
    pub ignore: RoadmapSection,
    #[serde(rename = "oneStep")]
    pub one_step: RoadmapSection,
    #[serde(rename = "next30Days")]
    pub next_30_days: ThirtyDayPlan,
    #[serde(rename = "nextStep")]
    pub next_step: RoadmapSection,
}

/// The six top-level slots, in document order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionSlot {
    Situation,
    Focus,
    Ignore,
    OneStep,
    Next30Days,
    NextStep,
}

impl SectionSlot {
    pub const ALL: [SectionSlot; 6] = [
        SectionSlot::Situation,
        SectionSlot::Focus,
        SectionSlot::Ignore,
        SectionSlot::OneStep,
        SectionSlot::Next30Days,
        SectionSlot::NextStep,
    ];

    /// JSON key of this slot.
    pub fn key(self) -> &'static str {
        match self {
            SectionSlot::Situation => "situation",
            SectionSlot::Focus => "focus",
            SectionSlot::Ignore => "ignore",
            SectionSlot::OneStep => "oneStep",
            SectionSlot::Next30Days => "next30Days",
            SectionSlot::NextStep => "nextStep",
        }
    }
}

impl fmt::Display for SectionSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl RoadmapData {
    /// The five plain sections with their slot, in document order.
    /// `next30Days` is reached through [`ThirtyDayPlan::weeks`].
    pub fn sections(&self) -> [(SectionSlot, &RoadmapSection); 5] {
        [
            (SectionSlot::Situation, &self.situation),
            (SectionSlot::Focus, &self.focus),
            (SectionSlot::Ignore, &self.ignore),
            (SectionSlot::OneStep, &self.one_step),
            (SectionSlot::NextStep, &self.next_step),
        ]
    }

    /// Labels of sections whose two tiers disagree in shape.
    pub fn non_uniform_sections(&self) -> Vec<String> {
        let mut out: Vec<String> = self
            .sections()
            .iter()
            .filter(|(_, s)| !s.is_uniform())
            .map(|(slot, _)| slot.key().to_string())
            .collect();
        out.extend(
            self.next_30_days
                .weeks()
                .iter()
                .filter(|(_, s)| !s.is_uniform())
                .map(|(n, _)| format!("next30Days.week{n}")),
        );
        out
    }

    /// Check conformance, then deserialize.
    pub fn from_value(value: serde_json::Value) -> Result<Self, Vec<String>> {
        let errors = conformance_errors(&value);
        if !errors.is_empty() {
            return Err(errors);
        }
        serde_json::from_value(value).map_err(|e| vec![e.to_string()])
    }
}

// ── Conformance ────────────────────────────────────────────────────

static ROADMAP_SCHEMA: LazyLock<serde_json::Value> = LazyLock::new(json_schema_for::<RoadmapData>);

/// JSON Schema describing a conforming [`RoadmapData`] (either shape per
/// tier, all slots required, no extra keys).
pub fn roadmap_json_schema() -> &'static serde_json::Value {
    &ROADMAP_SCHEMA
}

static ROADMAP_VALIDATOR: LazyLock<Result<jsonschema::Validator, String>> = LazyLock::new(|| {
    jsonschema::validator_for(roadmap_json_schema())
        .map_err(|e| format!("roadmap schema failed to compile: {e}"))
});

/// Validate an untyped candidate against the roadmap schema.
///
/// Returns one line per violation; an empty vector means the value conforms.
pub fn conformance_errors(value: &serde_json::Value) -> Vec<String> {
    let validator = match &*ROADMAP_VALIDATOR {
        Ok(v) => v,
        Err(e) => return vec![e.clone()],
    };

    validator
        .iter_errors(value)
        .map(|e| {
            let path = e.instance_path().to_string();
            if path.is_empty() {
                format!("(root): {e}")
            } else {
                format!("{path}: {e}")
            }
        })
        .collect()
}

/// Conformance predicate: six slots present, both tiers present in every
/// section, exactly four week keys, nothing else.
pub fn is_conforming(value: &serde_json::Value) -> bool {
    conformance_errors(value).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> serde_json::Value {
        let week = json!({"preview": "p", "comprehensive": "c"});
        json!({
            "situation": {"preview": ["a", "b"], "comprehensive": ["c"]},
            "focus": {"preview": ["a"], "comprehensive": ["Title: detail"]},
            "ignore": {"preview": ["a"], "comprehensive": ["b"]},
            "oneStep": {"preview": "do it", "comprehensive": "do it well"},
            "next30Days": {"week1": week, "week2": week, "week3": week, "week4": week},
            "nextStep": {"preview": "next", "comprehensive": "next, in detail"}
        })
    }

    #[test]
    fn sample_conforms_and_deserializes() {
        let value = sample();
        assert!(is_conforming(&value), "{:?}", conformance_errors(&value));
        let data = RoadmapData::from_value(value).unwrap();
        assert_eq!(data.one_step.preview, SectionContent::Text("do it".into()));
        assert!(data.situation.preview.is_list());
    }

    #[test]
    fn validator_compiles_once_and_is_reused() {
        assert!(ROADMAP_VALIDATOR.is_ok());
        let first: *const jsonschema::Validator = ROADMAP_VALIDATOR.as_ref().unwrap();
        assert!(is_conforming(&sample()));
        assert!(!is_conforming(&serde_json::json!({})));
        let second: *const jsonschema::Validator = ROADMAP_VALIDATOR.as_ref().unwrap();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn missing_slot_is_rejected() {
        let mut value = sample();
        value.as_object_mut().unwrap().remove("nextStep");
        assert!(!is_conforming(&value));
        assert!(RoadmapData::from_value(value).is_err());
    }

    #[test]
    fn extra_slot_is_rejected() {
        let mut value = sample();
        value["bonus"] = json!({"preview": "x", "comprehensive": "y"});
        assert!(!is_conforming(&value));
    }

    #[test]
    fn week_keys_must_be_exact() {
        let mut value = sample();
        value["next30Days"]
            .as_object_mut()
            .unwrap()
            .remove("week4");
        assert!(!is_conforming(&value));

        let mut value = sample();
        value["next30Days"]["week5"] = json!({"preview": "p", "comprehensive": "c"});
        assert!(!is_conforming(&value));
    }

    #[test]
    fn section_needs_both_tiers() {
        let mut value = sample();
        value["focus"].as_object_mut().unwrap().remove("comprehensive");
        let errors = conformance_errors(&value);
        assert!(!errors.is_empty());
        assert!(errors.iter().any(|e| e.contains("focus")), "{errors:?}");
    }

    #[test]
    fn mixed_shapes_are_tolerated() {
        let mut value = sample();
        value["situation"]["comprehensive"] = json!("one paragraph");
        let data = RoadmapData::from_value(value).unwrap();
        assert!(!data.situation.is_uniform());
        assert_eq!(data.non_uniform_sections(), vec!["situation".to_string()]);
    }

    #[test]
    fn wrong_item_type_is_rejected() {
        let mut value = sample();
        value["ignore"]["preview"] = json!([1, 2]);
        assert!(!is_conforming(&value));
    }

    #[test]
    fn serializes_with_wire_keys() {
        let data = RoadmapData::from_value(sample()).unwrap();
        let json = serde_json::to_value(&data).unwrap();
        for slot in SectionSlot::ALL {
            assert!(json.get(slot.key()).is_some(), "missing {slot}");
        }
        assert_eq!(json["oneStep"]["preview"], "do it");
    }

    #[test]
    fn validate_reports_first_empty_field() {
        let ok = UserResponses::new("Freelancer", "Content & marketing", "New to AI", "Save time");
        assert!(ok.validate().is_ok());

        let bad = UserResponses::new("Freelancer", "  ", "New to AI", "");
        assert_eq!(bad.validate(), Err(ResponsesError::EmptyField("focusArea")));
    }

    #[test]
    fn user_responses_use_camel_case() {
        let r: UserResponses = serde_json::from_value(json!({
            "userType": "Solopreneur",
            "focusArea": "Business operations",
            "aiLevel": "Tried a few tools",
            "priority": "Reduce confusion"
        }))
        .unwrap();
        assert_eq!(r.focus_area, "Business operations");
    }

    #[test]
    fn tier_selects_side() {
        let s = RoadmapSection::new("short", "long");
        assert_eq!(s.tier(Tier::Preview).items(), vec!["short"]);
        assert_eq!(s.tier(Tier::Comprehensive).items(), vec!["long"]);
    }
}
