//! Pre-authored roadmaps used when the generative backend is unavailable.
//!
//! The table is keyed by [`FocusArea`], a closed set of known focus areas.
//! String lookups go through [`lookup`], which falls back to
//! [`FocusArea::DEFAULT`] for anything that is not an exact label match, so
//! the store is total over all inputs and never fails.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::schema::{RoadmapData, RoadmapSection, ThirtyDayPlan};

/// Focus areas that have a hand-written blueprint.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FocusArea {
    ContentMarketing,
    BusinessOperations,
    LearningAiBasics,
    ClarifyingWhatToBuild,
}

impl FocusArea {
    pub const ALL: [FocusArea; 4] = [
        FocusArea::ContentMarketing,
        FocusArea::BusinessOperations,
        FocusArea::LearningAiBasics,
        FocusArea::ClarifyingWhatToBuild,
    ];

    /// Blueprint served for unrecognized focus areas.
    pub const DEFAULT: FocusArea = FocusArea::BusinessOperations;

    /// Questionnaire label for this focus area.
    pub fn label(self) -> &'static str {
        match self {
            FocusArea::ContentMarketing => "Content & marketing",
            FocusArea::BusinessOperations => "Business operations",
            FocusArea::LearningAiBasics => "Learning AI basics",
            FocusArea::ClarifyingWhatToBuild => "Clarifying what to build",
        }
    }

    /// Exact-match a questionnaire label. No trimming or case folding.
    pub fn parse_label(label: &str) -> Option<FocusArea> {
        FocusArea::ALL.into_iter().find(|a| a.label() == label)
    }
}

impl fmt::Display for FocusArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FocusArea {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FocusArea::parse_label(s).ok_or_else(|| format!("unknown focus area '{s}'"))
    }
}

static BLUEPRINTS: LazyLock<[RoadmapData; 4]> = LazyLock::new(|| FocusArea::ALL.map(author));

/// The blueprint for a known focus area.
pub fn blueprint(area: FocusArea) -> &'static RoadmapData {
    &BLUEPRINTS[area as usize]
}

/// The focus area a raw key resolves to, and whether it matched exactly.
pub fn resolve_focus(key: &str) -> (FocusArea, bool) {
    match FocusArea::parse_label(key) {
        Some(area) => (area, true),
        None => {
            debug!("no blueprint for focus area {key:?}, using '{}'", FocusArea::DEFAULT);
            (FocusArea::DEFAULT, false)
        }
    }
}

/// Exact-match lookup with the default entry for unknown keys.
pub fn lookup(key: &str) -> &'static RoadmapData {
    blueprint(resolve_focus(key).0)
}

// ── Content ────────────────────────────────────────────────────────

fn week(preview: &str, comprehensive: &str) -> RoadmapSection {
    RoadmapSection::new(preview, comprehensive)
}

fn author(area: FocusArea) -> RoadmapData {
    match area {
        FocusArea::ContentMarketing => content_marketing(),
        FocusArea::BusinessOperations => business_operations(),
        FocusArea::LearningAiBasics => learning_ai_basics(),
        FocusArea::ClarifyingWhatToBuild => clarifying_what_to_build(),
    }
}

fn content_marketing() -> RoadmapData {
    RoadmapData {
        situation: RoadmapSection::new(
            [
                "High manual effort in content production",
                "Inconsistent brand voice across channels",
                "Underutilized historical data for new campaigns",
            ],
            [
                "Your current workflow relies heavily on manual ideation, causing bottlenecks.",
                "Content distribution is reactive rather than strategic.",
                "The lack of an automated 'content engine' results in high overhead for low-volume output.",
                "Engagement data is gathered but rarely used to inform the next 30 days of production.",
            ],
        ),
        focus: RoadmapSection::new(
            [
                "Standardize prompt frameworks",
                "Automate research gathering",
                "Centralize asset management",
            ],
            [
                "Standardize Prompts: Develop a library of 'Golden Prompts' that mirror your specific brand voice to ensure consistency.",
                "Research Automation: Use AI tools to aggregate trending industry topics into a weekly digest for your review.",
                "Centralize Assets: Create a structured digital vault for all AI-assisted drafts to facilitate faster editing cycles.",
            ],
        ),
        ignore: RoadmapSection::new(
            [
                "Complex video avatars",
                "Real-time AI chatbots",
                "Generic SEO automation",
            ],
            [
                "Video Avatars: These require high technical oversight and often appear 'uncanny,' distracting from your authentic authority.",
                "Real-time Chatbots: Without deep data integration, these often provide poor customer experiences and require constant monitoring.",
                "Generic SEO: Auto-blogging tools often trigger quality filters; focus on quality over sheer AI-generated volume.",
            ],
        ),
        one_step: RoadmapSection::new(
            "Create a 'Brand Voice Sheet' for AI referencing.",
            "Document your top 3 performing articles or posts. Feed them into a standard LLM with the instruction: 'Analyze the tone, cadence, and vocabulary of these texts to create a style guide for future outputs.' Use this as the base for all content work.",
        ),
        next_30_days: ThirtyDayPlan {
            week1: week(
                "Audit and Voice Mapping",
                "Identify your top 5 content categories. Run style analysis on existing content to create your primary AI instruction set.",
            ),
            week2: week(
                "Workflow Prototyping",
                "Select one high-frequency task (e.g., LinkedIn posts) and move it entirely into an AI-assisted workflow using your new style guide.",
            ),
            week3: week(
                "Optimization & Expansion",
                "Review Week 2 outputs. Refine the prompts based on what felt 'off' and expand the workflow to include email subject lines and hooks.",
            ),
            week4: week(
                "Performance Review",
                "Compare content volume and time-spent metrics against previous months. Solidify the workflow into a repeatable SOP.",
            ),
        },
        next_step: RoadmapSection::new(
            "Move into the 'Workflow Prototyping' phase.",
            "Start by selecting your most time-consuming recurring content task. Apply the Brand Voice Sheet to this specific task tomorrow morning.",
        ),
    }
}

fn business_operations() -> RoadmapData {
    RoadmapData {
        situation: RoadmapSection::new(
            [
                "Fragmented administrative workflows",
                "High volume of repetitive email communication",
                "Manual data entry between disconnected tools",
            ],
            [
                "Administrative tasks are consuming 30% of your billable or creative hours.",
                "Client onboarding feels disjointed and relies on manual document creation.",
                "Valuable business data is trapped in silos (emails, PDFs, spreadsheets).",
                "Your current 'system' is dependent on your memory rather than documented automation.",
            ],
        ),
        focus: RoadmapSection::new(
            [
                "Email triage automation",
                "Meeting summarization workflows",
                "Document synthesis",
            ],
            [
                "Email Triage: Implement AI-assisted categorization to separate urgent client needs from general industry noise.",
                "Meeting Summarization: Move from manual note-taking to automated transcription and action-item extraction.",
                "Document Synthesis: Use AI to analyze lengthy reports or contracts and extract key deliverables in seconds.",
            ],
        ),
        ignore: RoadmapSection::new(
            [
                "Fully automated customer support",
                "Predictive financial modeling",
                "AI-based hiring tools",
            ],
            [
                "Automated Support: For solopreneurs, personal touch is your competitive advantage. Don't outsource the 'human' element entirely yet.",
                "Predictive Modeling: Unless you have massive datasets, the output will be speculative and potentially misleading.",
                "Hiring Tools: These often add unnecessary complexity to the simple freelancer/contractor vetting process you need.",
            ],
        ),
        one_step: RoadmapSection::new(
            "Automate your next internal meeting summary.",
            "Download a simple transcription tool. Record your next 'thinking out loud' session or client call. Pass the text through an AI with the prompt: 'Extract exactly 3 action items and 2 key decisions from this transcript.' Experience the time savings immediately.",
        ),
        next_30_days: ThirtyDayPlan {
            week1: week(
                "Admin Time Audit",
                "Track every task you do for 5 days. Identify the 3 most repetitive administrative 'time-leaks' for AI intervention.",
            ),
            week2: week(
                "Tool Integration",
                "Select one tool for automated transcription or document processing. Set up a basic Zapier or manual workflow for it.",
            ),
            week3: week(
                "Data Consolidation",
                "Collect scattered notes and documents. Use AI to synthesize them into a single 'Knowledge Base' for your business operations.",
            ),
            week4: week(
                "SOP Documentation",
                "Ask AI to help you write Standard Operating Procedures (SOPs) for your new automated workflows so they become permanent.",
            ),
        },
        next_step: RoadmapSection::new(
            "Conduct a 5-day time audit.",
            "Before adding tools, you must know exactly where the time is going. Start the audit on your next working day.",
        ),
    }
}

fn learning_ai_basics() -> RoadmapData {
    RoadmapData {
        situation: RoadmapSection::new(
            [
                "Overwhelmed by AI hype and terminology",
                "Unsure where to start with limited time",
                "Concerned about wasting money on wrong tools",
            ],
            [
                "The AI landscape feels chaotic with new tools launching daily.",
                "You're spending more time reading about AI than actually using it.",
                "There's a disconnect between theoretical knowledge and practical application.",
                "Decision paralysis is preventing you from making any meaningful progress.",
            ],
        ),
        focus: RoadmapSection::new(
            [
                "Master one foundational tool first",
                "Build practical muscle memory",
                "Create a personal AI toolkit",
            ],
            [
                "Single Tool Mastery: Start with ChatGPT or Claude and become genuinely proficient before exploring alternatives.",
                "Practical Application: Focus on solving one real problem in your business rather than theoretical exercises.",
                "Personal Toolkit: Document your go-to prompts and workflows in a simple reference guide you'll actually use.",
            ],
        ),
        ignore: RoadmapSection::new(
            [
                "Advanced technical courses",
                "Every new AI tool announcement",
                "Complex automation setups",
            ],
            [
                "Technical Courses: You don't need to understand neural networks to use AI effectively in your business.",
                "Tool Chasing: New tools are marketing noise. Master the fundamentals first.",
                "Complex Automation: Start with simple, manual AI-assisted workflows before attempting sophisticated integrations.",
            ],
        ),
        one_step: RoadmapSection::new(
            "Solve one real problem with AI today.",
            "Pick the most annoying recurring task you did this week. Open ChatGPT or Claude and ask it to help you solve or automate it. Don't read about AI—use it to solve something real right now.",
        ),
        next_30_days: ThirtyDayPlan {
            week1: week(
                "Foundation Building",
                "Choose your primary AI tool (ChatGPT or Claude). Spend 30 minutes daily solving actual business problems with it. Document what works.",
            ),
            week2: week(
                "Pattern Recognition",
                "Identify 3-5 recurring tasks where AI consistently saves you time. Create simple prompt templates for each.",
            ),
            week3: week(
                "Skill Deepening",
                "Learn one advanced technique (like few-shot prompting or chain-of-thought reasoning) and apply it to your established workflows.",
            ),
            week4: week(
                "System Creation",
                "Compile your best prompts and workflows into a personal 'AI Playbook' you can reference and refine over time.",
            ),
        },
        next_step: RoadmapSection::new(
            "Pick your primary AI tool and solve one problem.",
            "Don't delay. Open ChatGPT or Claude right now and use it to solve a real task you need to complete today.",
        ),
    }
}

fn clarifying_what_to_build() -> RoadmapData {
    RoadmapData {
        situation: RoadmapSection::new(
            [
                "Multiple ideas competing for attention",
                "Unclear on market validation",
                "Analysis paralysis preventing action",
            ],
            [
                "You have several potential AI-enhanced products or services but no clear winner.",
                "Market research is consuming time without providing decisive direction.",
                "You're stuck in planning mode, perfecting ideas rather than testing them.",
                "The fear of choosing 'wrong' is preventing you from choosing anything.",
            ],
        ),
        focus: RoadmapSection::new(
            [
                "Rapid prototype testing",
                "Customer feedback loops",
                "Minimum viable validation",
            ],
            [
                "Quick Prototyping: Build the simplest version possible to test your core assumption.",
                "Feedback First: Get your idea in front of 5-10 potential customers before building more.",
                "Validation Over Perfection: Focus on proving one key hypothesis rather than creating a complete product.",
            ],
        ),
        ignore: RoadmapSection::new(
            [
                "Perfect business plans",
                "Comprehensive market analysis",
                "Full feature specifications",
            ],
            [
                "Extensive Planning: The market will teach you more in one week than planning will in one month.",
                "Deep Market Analysis: For solopreneurs, talking to 10 real customers beats reading 100 reports.",
                "Feature Completeness: Build the absolute minimum needed to test if anyone will pay for the core value.",
            ],
        ),
        one_step: RoadmapSection::new(
            "Write your one-sentence value proposition.",
            "Complete this sentence: 'I help [specific person] achieve [specific outcome] using [your AI-enhanced approach].' Share it with 5 people in your target market this week and record their reactions.",
        ),
        next_30_days: ThirtyDayPlan {
            week1: week(
                "Hypothesis Formation",
                "Define the single core problem you're solving and the simplest AI-enhanced solution. Write it down in one paragraph.",
            ),
            week2: week(
                "Minimum Viable Test",
                "Create the absolute simplest version to test your hypothesis. It should take 1-2 days maximum to build.",
            ),
            week3: week(
                "Customer Conversations",
                "Show your prototype to 10 people. Ask: 'Would you pay for this?' Document their exact words and objections.",
            ),
            week4: week(
                "Pivot or Proceed",
                "Analyze feedback. Either commit to building version 1.0 or pivot based on what you learned. Make a decision.",
            ),
        },
        next_step: RoadmapSection::new(
            "Write your value proposition and test it.",
            "Stop planning. Write your one-sentence value proposition today and share it with 5 potential customers by end of week.",
        ),
    }
}
