//! Offline answers for the assistant.
//!
//! Rules are evaluated in order against the case-folded query and the first
//! rule with a matching keyword wins. The answers are fixed text.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackTopic {
    GettingStarted,
    Features,
    Risk,
    Partners,
    Competitors,
    Scoring,
    Market,
    Menu,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackRule {
    pub topic: FallbackTopic,
    pub keywords: &'static [&'static str],
    pub answer: &'static str,
}

impl FallbackRule {
    fn matches(&self, normalized: &str) -> bool {
        self.keywords.iter().any(|keyword| normalized.contains(keyword))
    }
}

const GETTING_STARTED_ANSWER: &str = "Getting started:\n\
1. Sign in or create an account.\n\
2. Open the dashboard.\n\
3. Pick the industry that fits your idea.\n\
4. Describe the idea in two or three sentences.\n\
5. Generate ideas and pick one of the refined versions.\n\
6. Review the full analysis for the idea you picked.";

const FEATURES_ANSWER: &str = "What you can do here:\n\
1. Idea refinement: three polished takes on your pitch.\n\
2. Market insights: industry trends and customer segments.\n\
3. Competitor analysis: similar startups and the gap they leave.\n\
4. Risk assessment: opportunities, risks and mitigation.\n\
5. Validation score: feasibility, novelty and market readiness.\n\
6. Partner matching: potential co-founders.\n\
7. This assistant, for questions along the way.";

const RISK_ANSWER: &str = "Risk assessment:\n\
After generating ideas, analyze one of them and open the\n\
Risks & Opportunities view. It lists:\n\
- growth opportunities\n\
- potential risks\n\
- a mitigation strategy";

const PARTNERS_ANSWER: &str = "Finding partners:\n\
1. Fill in your profile with interests and skills.\n\
2. Generate and analyze an idea.\n\
3. Open the Partners view.\n\
Each match shows an overlap score, skills and a way to get in touch.";

const COMPETITORS_ANSWER: &str = "Competitor analysis:\n\
Your idea is compared against a catalogue of existing startups.\n\
The closest matches are listed with a short description,\n\
and the summary points out the market gap they leave open.";

const SCORING_ANSWER: &str = "Validation scoring:\n\
- Feasibility (0-100): how buildable the idea is.\n\
- Novelty (0-100): how different it is from what exists.\n\
- Market readiness: High, Medium or Low.\n\
Scores use the market and competitor results for your idea.";

const MARKET_ANSWER: &str = "Market insights:\n\
- the industry your idea belongs to\n\
- the top trends in that industry\n\
- customer segments worth targeting\n\
Use them to position the idea before you build.";

const MENU_ANSWER: &str = "I can help with:\n\
- getting started\n\
- features such as market insights and competitor analysis\n\
- risk assessment and mitigation\n\
- finding co-founders\n\
- how validation scores work\n\
What would you like to know?";

pub const FALLBACK_RULES: [FallbackRule; 7] = [
    FallbackRule {
        topic: FallbackTopic::GettingStarted,
        keywords: &["start", "begin", "how do i"],
        answer: GETTING_STARTED_ANSWER,
    },
    FallbackRule {
        topic: FallbackTopic::Features,
        keywords: &["feature", "what can", "offer"],
        answer: FEATURES_ANSWER,
    },
    FallbackRule {
        topic: FallbackTopic::Risk,
        keywords: &["risk", "opportunity"],
        answer: RISK_ANSWER,
    },
    FallbackRule {
        topic: FallbackTopic::Partners,
        keywords: &["partner", "co-founder", "cofounder"],
        answer: PARTNERS_ANSWER,
    },
    FallbackRule {
        topic: FallbackTopic::Competitors,
        keywords: &["competitor", "competition"],
        answer: COMPETITORS_ANSWER,
    },
    FallbackRule {
        topic: FallbackTopic::Scoring,
        keywords: &["score", "validation", "feasibility"],
        answer: SCORING_ANSWER,
    },
    FallbackRule {
        topic: FallbackTopic::Market,
        keywords: &["market", "trend", "industry"],
        answer: MARKET_ANSWER,
    },
];

/// Case-folds and collapses runs of whitespace so multi-word keywords match.
pub fn normalize_query(query: &str) -> String {
    query
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

pub fn classify(query: &str) -> FallbackTopic {
    let normalized = normalize_query(query);
    FALLBACK_RULES
        .iter()
        .find(|rule| rule.matches(&normalized))
        .map_or(FallbackTopic::Menu, |rule| rule.topic)
}

pub fn answer_for(topic: FallbackTopic) -> &'static str {
    FALLBACK_RULES
        .iter()
        .find(|rule| rule.topic == topic)
        .map_or(MENU_ANSWER, |rule| rule.answer)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FallbackResponseEngine;

impl FallbackResponseEngine {
    pub fn respond(&self, query: &str) -> &'static str {
        answer_for(classify(query))
    }
}
