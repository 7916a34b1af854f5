use bloom_core::model::AnalysisBundle;
use bloom_core::model::CompetitorSnapshot;
use bloom_core::model::MarketInsight;
use bloom_core::model::Partner;
use bloom_core::model::PortfolioRecord;
use bloom_core::model::RefinedIdea;
use bloom_core::model::RiskAssessment;
use bloom_core::model::ValidationScores;
use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeaRequest<'a> {
    pub idea: &'a str,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IdeaGenerationResponse {
    pub ideas: Vec<RefinedIdea>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationRequest<'a> {
    pub idea: &'a RefinedIdea,
    pub market: &'a MarketInsight,
    pub competitors: &'a CompetitorSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRequest<'a> {
    pub idea: &'a RefinedIdea,
    pub market_insight: &'a MarketInsight,
    pub competitor_snapshot: &'a CompetitorSnapshot,
    pub risk_opportunity: &'a RiskAssessment,
    pub validation_score: &'a ValidationScores,
    pub partners: &'a [Partner],
}

impl<'a> SummaryRequest<'a> {
    pub fn new(idea: &'a RefinedIdea, bundle: &'a AnalysisBundle) -> Self {
        Self {
            idea,
            market_insight: &bundle.market,
            competitor_snapshot: &bundle.competitors,
            risk_opportunity: &bundle.risks,
            validation_score: &bundle.scores,
            partners: &bundle.partners,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SummaryResponse {
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    pub interests: &'a [String],
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    pub skills: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<&'a str>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Server-side portfolio shape: the aggregate lives under `data`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PortfolioResponse {
    pub portfolio_id: String,
    pub pdf_url: Option<String>,
    pub data: PortfolioData,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PortfolioData {
    pub idea: RefinedIdea,
    pub market: MarketInsight,
    pub competitors: CompetitorSnapshot,
    pub risks: RiskAssessment,
    pub scores: ValidationScores,
    pub partners: Vec<Partner>,
}

impl From<PortfolioResponse> for PortfolioRecord {
    fn from(response: PortfolioResponse) -> Self {
        let PortfolioData {
            idea,
            market,
            competitors,
            risks,
            scores,
            partners,
        } = response.data;
        Self {
            portfolio_id: response.portfolio_id,
            idea,
            market,
            competitors,
            risks,
            scores,
            partners,
            export_ref: response.pdf_url.filter(|url| !url.trim().is_empty()),
        }
    }
}

/// FastAPI-style error body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ErrorBody {
    pub detail: Option<serde_json::Value>,
    pub message: Option<String>,
}
