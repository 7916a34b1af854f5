use async_trait::async_trait;
use bloom_core::error::RemoteError;
use bloom_core::model::AnalysisBundle;
use bloom_core::model::CompetitorSnapshot;
use bloom_core::model::Industry;
use bloom_core::model::MarketInsight;
use bloom_core::model::Partner;
use bloom_core::model::PortfolioRecord;
use bloom_core::model::RefinedIdea;
use bloom_core::model::RiskAssessment;
use bloom_core::model::Session;
use bloom_core::model::ValidationScores;

/// One remote capability of the analysis service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    RefineIdea,
    MarketInsight,
    Competitors,
    RiskAssessment,
    ValidationScores,
    Partners,
    BuildPortfolio,
    Chat,
    RenderSummary,
    Login,
    Register,
}

impl Operation {
    pub fn label(self) -> &'static str {
        match self {
            Self::RefineIdea => "refine_idea",
            Self::MarketInsight => "market_insight",
            Self::Competitors => "competitors",
            Self::RiskAssessment => "risk_assessment",
            Self::ValidationScores => "validation_scores",
            Self::Partners => "partners",
            Self::BuildPortfolio => "build_portfolio",
            Self::Chat => "chat",
            Self::RenderSummary => "render_summary",
            Self::Login => "login",
            Self::Register => "register",
        }
    }

    /// Sign-in calls answer 401 for bad credentials, not for an expired
    /// session.
    pub fn exchanges_credentials(self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }
}

/// Typed request/response boundary to the analysis service.
///
/// Implementations hold no workflow state and never retry. Every failure is a
/// [`RemoteError`]; missing fields in a successful reply decode as defaults.
#[async_trait]
pub trait AnalysisClient: Send + Sync {
    /// Turns free text into candidate ideas. The industry is folded into the
    /// text before it is sent.
    async fn refine_idea(
        &self,
        raw_text: &str,
        industry: Industry,
    ) -> Result<Vec<RefinedIdea>, RemoteError>;

    async fn market_insight(&self, idea: &RefinedIdea) -> Result<MarketInsight, RemoteError>;

    async fn competitors(&self, idea: &RefinedIdea) -> Result<CompetitorSnapshot, RemoteError>;

    async fn risk_assessment(&self, idea: &RefinedIdea) -> Result<RiskAssessment, RemoteError>;

    /// Must only be issued once both `market` and `competitors` are known.
    async fn validation_scores(
        &self,
        idea: &RefinedIdea,
        market: &MarketInsight,
        competitors: &CompetitorSnapshot,
    ) -> Result<ValidationScores, RemoteError>;

    /// Keyed by the session, not the idea.
    async fn partners(&self) -> Result<Vec<Partner>, RemoteError>;

    async fn build_portfolio(&self, raw_text: &str) -> Result<PortfolioRecord, RemoteError>;

    async fn send_chat_message(&self, text: &str) -> Result<String, RemoteError>;

    async fn render_summary(
        &self,
        idea: &RefinedIdea,
        bundle: &AnalysisBundle,
    ) -> Result<String, RemoteError>;

    async fn login(&self, email: &str, password: &str) -> Result<Session, RemoteError>;

    /// Creates an account and signs it in.
    async fn register(
        &self,
        email: &str,
        password: &str,
        profile: &Registration,
    ) -> Result<Session, RemoteError>;
}

/// Optional profile sent with a new account; feeds partner matching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registration {
    pub interests: Vec<String>,
    pub skills: Vec<String>,
    pub location: Option<String>,
}

/// Notified when the service rejects the session token.
pub trait AuthObserver: Send + Sync {
    fn session_expired(&self);
}
