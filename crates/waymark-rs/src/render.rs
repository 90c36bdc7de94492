//! Markdown rendering of a roadmap at a chosen depth.
//!
//! Every field may be a paragraph or a list; both are rendered. List items
//! in the focus section are shown as numbered "Title: detail" entries.

use serde::{Deserialize, Serialize};

use crate::schema::{RoadmapData, RoadmapSection, SectionContent, SectionSlot, Tier, UserResponses};

/// How much of each section to render.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RenderTier {
    Preview,
    Comprehensive,
    #[default]
    Both,
}

impl RenderTier {
    fn tiers(self) -> &'static [Tier] {
        match self {
            RenderTier::Preview => &[Tier::Preview],
            RenderTier::Comprehensive => &[Tier::Comprehensive],
            RenderTier::Both => &[Tier::Preview, Tier::Comprehensive],
        }
    }
}

/// Phase heading for each slot.
pub fn phase_label(slot: SectionSlot) -> &'static str {
    match slot {
        SectionSlot::Situation => "Phase 01: The Landscape",
        SectionSlot::Focus => "Phase 02: High-Impact Focus",
        SectionSlot::Ignore => "Phase 03: Operational Clarity",
        SectionSlot::OneStep => "Phase 04: The First Wedge",
        SectionSlot::Next30Days => "Phase 05: 30-Day Outlook",
        SectionSlot::NextStep => "Phase 06: Immediate Momentum",
    }
}

fn tier_label(slot: SectionSlot, tier: Tier) -> &'static str {
    match (slot, tier) {
        (SectionSlot::OneStep, Tier::Preview) => "Strategic Logic",
        (SectionSlot::OneStep, Tier::Comprehensive) => "Tactical Execution",
        (_, Tier::Preview) => "Executive Summary",
        (_, Tier::Comprehensive) => "Tactical Implementation",
    }
}

/// Split "Title: detail" into its parts; items without a colon become
/// "Priority N".
pub fn split_titled(item: &str, index: usize) -> (String, String) {
    match item.split_once(':') {
        Some((title, detail)) => (title.trim().to_string(), detail.trim().to_string()),
        None => (format!("Priority {}", index + 1), item.trim().to_string()),
    }
}

fn write_content(out: &mut String, content: &SectionContent, numbered: bool) {
    match content {
        SectionContent::Text(text) => out.push_str(&format!("{text}\n\n")),
        SectionContent::List(items) if numbered => {
            for (i, item) in items.iter().enumerate() {
                let (title, detail) = split_titled(item, i);
                out.push_str(&format!("{}. **{title}** {detail}\n", i + 1));
            }
            out.push('\n');
        }
        SectionContent::List(items) => {
            for item in items {
                out.push_str(&format!("- {item}\n"));
            }
            out.push('\n');
        }
    }
}

fn write_section(out: &mut String, slot: SectionSlot, section: &RoadmapSection, depth: RenderTier) {
    out.push_str(&format!("## {}\n\n", phase_label(slot)));
    let tiers = depth.tiers();
    for &tier in tiers {
        if tiers.len() > 1 {
            out.push_str(&format!("### {}\n\n", tier_label(slot, tier)));
        }
        write_content(out, section.tier(tier), slot == SectionSlot::Focus);
    }
}

/// Render a complete roadmap document as Markdown.
pub fn render_markdown(data: &RoadmapData, profile: &UserResponses, depth: RenderTier) -> String {
    let mut out = String::new();
    out.push_str("# Strategic AI Roadmap\n\n");
    out.push_str(&format!(
        "> {} · {} · {} · {}\n\n",
        profile.user_type, profile.focus_area, profile.ai_level, profile.priority
    ));

    for (slot, section) in data.sections() {
        if slot == SectionSlot::NextStep {
            write_outlook(&mut out, data, depth);
        }
        write_section(&mut out, slot, section, depth);
    }

    out.trim_end().to_string() + "\n"
}

fn write_outlook(out: &mut String, data: &RoadmapData, depth: RenderTier) {
    out.push_str(&format!("## {}\n\n", phase_label(SectionSlot::Next30Days)));
    for (n, week) in data.next_30_days.weeks() {
        out.push_str(&format!("### Week 0{n}\n\n"));
        for &tier in depth.tiers() {
            let items = week.tier(tier).items().join(" ");
            match tier {
                Tier::Preview => out.push_str(&format!("**{items}**\n\n")),
                Tier::Comprehensive => out.push_str(&format!("{items}\n\n")),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprints::{FocusArea, blueprint};

    fn profile() -> UserResponses {
        UserResponses::new("Freelancer", "Content & marketing", "New to AI", "Save time")
    }

    #[test]
    fn phases_appear_in_document_order() {
        let md = render_markdown(blueprint(FocusArea::ContentMarketing), &profile(), RenderTier::Both);
        let positions: Vec<usize> = SectionSlot::ALL
            .iter()
            .map(|s| md.find(phase_label(*s)).unwrap_or_else(|| panic!("missing {s}")))
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
        assert!(md.contains("> Freelancer · Content & marketing · New to AI · Save time"));
    }

    #[test]
    fn preview_omits_comprehensive_text() {
        let data = blueprint(FocusArea::BusinessOperations);
        let md = render_markdown(data, &profile(), RenderTier::Preview);
        assert!(md.contains("- Fragmented administrative workflows"));
        assert!(md.contains("**Admin Time Audit**"));
        assert!(!md.contains("Track every task you do for 5 days."));
        assert!(!md.contains("### Executive Summary"));
    }

    #[test]
    fn comprehensive_numbers_focus_items() {
        let data = blueprint(FocusArea::BusinessOperations);
        let md = render_markdown(data, &profile(), RenderTier::Comprehensive);
        assert!(md.contains("1. **Email Triage** Implement AI-assisted categorization"));
        assert!(md.contains("3. **Document Synthesis**"));
        assert!(md.contains("Track every task you do for 5 days."));
    }

    #[test]
    fn document_layout() {
        let md = render_markdown(blueprint(FocusArea::BusinessOperations), &profile(), RenderTier::Preview);
        assert!(md.starts_with(
            "# Strategic AI Roadmap\n\n\
             > Freelancer · Content & marketing · New to AI · Save time\n\n\
             ## Phase 01: The Landscape\n\n\
             - Fragmented administrative workflows\n"
        ));
        assert!(md.contains("### Week 01\n\n**Admin Time Audit**\n\n### Week 02\n"));
        assert!(md.ends_with("Conduct a 5-day time audit.\n"));
    }

    #[test]
    fn untitled_focus_items_get_priority_titles() {
        assert_eq!(
            split_titled("Standardize prompt frameworks", 0),
            ("Priority 1".to_string(), "Standardize prompt frameworks".to_string())
        );
        assert_eq!(
            split_titled("Title: a: b", 2),
            ("Title".to_string(), "a: b".to_string())
        );
    }

    #[test]
    fn mixed_shapes_render() {
        let mut data = blueprint(FocusArea::LearningAiBasics).clone();
        data.situation = RoadmapSection::new(["one", "two"], "A single paragraph.");
        data.one_step = RoadmapSection::new(["listed step"], "Plain step.");
        let md = render_markdown(&data, &profile(), RenderTier::Both);
        assert!(md.contains("- one\n- two"));
        assert!(md.contains("A single paragraph."));
        assert!(md.contains("- listed step"));
    }

    #[test]
    fn render_tier_parses_from_cli_values() {
        use clap::ValueEnum;
        assert_eq!(RenderTier::from_str("preview", true), Ok(RenderTier::Preview));
        assert_eq!(RenderTier::default(), RenderTier::Both);
    }
}
