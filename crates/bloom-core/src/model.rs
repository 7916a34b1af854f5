use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

use crate::error::ValidationError;

pub const MIN_IDEA_CHARS: usize = 5;
pub const MAX_IDEA_CHARS: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Industry {
    #[serde(rename = "edtech")]
    EdTech,
    #[serde(rename = "fintech")]
    FinTech,
    #[serde(rename = "healthtech")]
    HealthTech,
    #[serde(rename = "agritech")]
    AgriTech,
    #[serde(rename = "cleantech")]
    CleanTech,
    #[serde(rename = "ecommerce")]
    ECommerce,
    #[serde(rename = "saas")]
    SaaS,
    #[serde(rename = "foodtech")]
    FoodTech,
    #[serde(rename = "logistics")]
    Logistics,
    #[serde(rename = "social-impact")]
    SocialImpact,
}

pub const INDUSTRIES: [Industry; 10] = [
    Industry::EdTech,
    Industry::FinTech,
    Industry::HealthTech,
    Industry::AgriTech,
    Industry::CleanTech,
    Industry::ECommerce,
    Industry::SaaS,
    Industry::FoodTech,
    Industry::Logistics,
    Industry::SocialImpact,
];

impl Industry {
    pub fn id(self) -> &'static str {
        match self {
            Self::EdTech => "edtech",
            Self::FinTech => "fintech",
            Self::HealthTech => "healthtech",
            Self::AgriTech => "agritech",
            Self::CleanTech => "cleantech",
            Self::ECommerce => "ecommerce",
            Self::SaaS => "saas",
            Self::FoodTech => "foodtech",
            Self::Logistics => "logistics",
            Self::SocialImpact => "social-impact",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::EdTech => "EdTech",
            Self::FinTech => "FinTech",
            Self::HealthTech => "HealthTech",
            Self::AgriTech => "AgriTech",
            Self::CleanTech => "CleanTech",
            Self::ECommerce => "E-Commerce",
            Self::SaaS => "SaaS",
            Self::FoodTech => "FoodTech",
            Self::Logistics => "Logistics",
            Self::SocialImpact => "Social Impact",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::EdTech => "🎓",
            Self::FinTech => "💳",
            Self::HealthTech => "🩺",
            Self::AgriTech => "🌾",
            Self::CleanTech => "♻️",
            Self::ECommerce => "🛒",
            Self::SaaS => "☁️",
            Self::FoodTech => "🍽️",
            Self::Logistics => "🚚",
            Self::SocialImpact => "🤝",
        }
    }

    /// Accepts either the id (`social-impact`) or the display name (`Social Impact`).
    pub fn parse(input: &str) -> Option<Self> {
        let wanted = input.trim();
        INDUSTRIES.into_iter().find(|industry| {
            industry.id().eq_ignore_ascii_case(wanted) || industry.name().eq_ignore_ascii_case(wanted)
        })
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The text sent to refinement: the industry is folded into the prompt.
pub fn fold_industry(raw_text: &str, industry: Industry) -> String {
    format!("[{}] {}", industry.name(), raw_text.trim())
}

/// Checks the bounds the remote service enforces on idea text and returns the
/// trimmed text.
pub fn validate_idea_text(text: &str) -> Result<&str, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyIdea);
    }
    let chars = trimmed.chars().count();
    if chars < MIN_IDEA_CHARS {
        return Err(ValidationError::IdeaTooShort {
            min: MIN_IDEA_CHARS,
        });
    }
    if chars > MAX_IDEA_CHARS {
        return Err(ValidationError::IdeaTooLong {
            max: MAX_IDEA_CHARS,
        });
    }
    Ok(trimmed)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawIdea {
    text: String,
    industry: Industry,
}

impl RawIdea {
    pub fn new(text: &str, industry: Option<Industry>) -> Result<Self, ValidationError> {
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyIdea);
        }
        let industry = industry.ok_or(ValidationError::MissingIndustry)?;
        let trimmed = validate_idea_text(text)?;
        let prefix_chars = fold_industry("", industry).chars().count();
        if prefix_chars + trimmed.chars().count() > MAX_IDEA_CHARS {
            return Err(ValidationError::IdeaTooLong {
                max: MAX_IDEA_CHARS - prefix_chars,
            });
        }
        Ok(Self {
            text: trimmed.to_string(),
            industry,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn industry(&self) -> Industry {
        self.industry
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefinedIdea {
    pub name: String,
    pub problem: String,
    pub solution: String,
    pub value_proposition: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketInsight {
    pub industry: String,
    pub top_trends: Vec<String>,
    pub customer_segments: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Competitor {
    pub name: String,
    pub short_description: String,
    pub url_if_known: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompetitorSnapshot {
    pub competitors: Vec<Competitor>,
    pub market_gap: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskAssessment {
    pub opportunities: Vec<String>,
    pub risks: Vec<String>,
    pub mitigation: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum MarketReadiness {
    High,
    Medium,
    #[default]
    Low,
}

impl MarketReadiness {
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl<'de> Deserialize<'de> for MarketReadiness {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        Ok(match raw.trim().to_ascii_lowercase().as_str() {
            "high" => Self::High,
            "medium" => Self::Medium,
            _ => Self::Low,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationScores {
    #[serde(deserialize_with = "percent_score")]
    pub feasibility_score: u8,
    #[serde(deserialize_with = "percent_score")]
    pub novelty_score: u8,
    pub market_readiness: MarketReadiness,
}

fn percent_score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let raw = Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0);
    if raw.is_nan() {
        return Ok(0);
    }
    Ok(raw.round().clamp(0.0, 100.0) as u8)
}

fn unit_score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let raw = Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0);
    if raw.is_nan() {
        return Ok(0.0);
    }
    Ok(raw.clamp(0.0, 1.0))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Partner {
    pub name: String,
    pub skills: Vec<String>,
    #[serde(deserialize_with = "unit_score")]
    pub interest_overlap_score: f64,
    pub contact_hint: String,
}

/// Market, competitor, risk and score results are all present or the bundle
/// does not exist. `partners` may be empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisBundle {
    pub market: MarketInsight,
    pub competitors: CompetitorSnapshot,
    pub risks: RiskAssessment,
    pub scores: ValidationScores,
    pub partners: Vec<Partner>,
}

impl AnalysisBundle {
    pub fn new(
        market: MarketInsight,
        competitors: CompetitorSnapshot,
        risks: RiskAssessment,
        scores: ValidationScores,
        partners: Vec<Partner>,
    ) -> Self {
        Self {
            market,
            competitors,
            risks,
            scores,
            partners,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioRecord {
    pub portfolio_id: String,
    pub idea: RefinedIdea,
    pub market: MarketInsight,
    pub competitors: CompetitorSnapshot,
    pub risks: RiskAssessment,
    pub scores: ValidationScores,
    pub partners: Vec<Partner>,
    pub export_ref: Option<String>,
}

/// Authenticated-session context attached to every request. Owned by the auth
/// collaborator; clients only read it.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    user: Option<String>,
}

impl Session {
    pub fn new(token: impl Into<String>, user: Option<String>) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}
