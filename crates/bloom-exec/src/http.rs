//! reqwest-backed [`AnalysisClient`] speaking the analysis service's JSON API.

use std::sync::Arc;

use async_trait::async_trait;
use bloom_core::error::RemoteError;
use bloom_core::model::fold_industry;
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
use reqwest::Client;
use reqwest::RequestBuilder;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use tracing::warn;

use crate::client::AnalysisClient;
use crate::client::AuthObserver;
use crate::client::Operation;
use crate::client::Registration;
use crate::contracts::ChatRequest;
use crate::contracts::ChatResponse;
use crate::contracts::ErrorBody;
use crate::contracts::IdeaGenerationResponse;
use crate::contracts::IdeaRequest;
use crate::contracts::LoginRequest;
use crate::contracts::PortfolioResponse;
use crate::contracts::RegisterRequest;
use crate::contracts::SummaryRequest;
use crate::contracts::SummaryResponse;
use crate::contracts::TokenResponse;
use crate::contracts::ValidationRequest;

pub const DEFAULT_USER_AGENT: &str = concat!("bloom/", env!("CARGO_PKG_VERSION"));

pub struct HttpAnalysisClient {
    http: Client,
    base_url: String,
    session: Option<Session>,
    observer: Option<Arc<dyn AuthObserver>>,
}

impl HttpAnalysisClient {
    pub fn new(base_url: &str, session: Option<Session>) -> Result<Self, RemoteError> {
        Self::with_user_agent(base_url, session, DEFAULT_USER_AGENT)
    }

    pub fn with_user_agent(
        base_url: &str,
        session: Option<Session>,
        user_agent: &str,
    ) -> Result<Self, RemoteError> {
        let http = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|err| RemoteError::Transport(err.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
            observer: None,
        })
    }

    pub fn with_observer(mut self, observer: Arc<dyn AuthObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.session {
            Some(session) => request.header(reqwest::header::AUTHORIZATION, session.bearer()),
            None => request,
        }
    }

    async fn post_json<B, T>(&self, op: Operation, path: &str, body: &B) -> Result<T, RemoteError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = join_url(&self.base_url, path);
        debug!(operation = op.label(), %url, "POST");
        let request = self.authorized(self.http.post(&url).json(body));
        self.send(op, request).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        op: Operation,
        path: &str,
    ) -> Result<T, RemoteError> {
        let url = join_url(&self.base_url, path);
        debug!(operation = op.label(), %url, "GET");
        let request = self.authorized(self.http.get(&url));
        self.send(op, request).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        op: Operation,
        request: RequestBuilder,
    ) -> Result<T, RemoteError> {
        let response = request
            .send()
            .await
            .map_err(|err| RemoteError::Transport(err.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| RemoteError::Transport(err.to_string()))?;

        if status == StatusCode::UNAUTHORIZED && !op.exchanges_credentials() {
            warn!(operation = op.label(), "session rejected by analysis service");
            if let Some(observer) = &self.observer {
                observer.session_expired();
            }
            return Err(RemoteError::AuthExpired);
        }
        if !status.is_success() {
            let message = parse_error_message(&body).unwrap_or_default();
            warn!(
                operation = op.label(),
                status = status.as_u16(),
                %message,
                "analysis service request failed"
            );
            return Err(RemoteError::Status {
                status: status.as_u16(),
                message,
            });
        }
        decode_body(&body)
    }
}

#[async_trait]
impl AnalysisClient for HttpAnalysisClient {
    async fn refine_idea(
        &self,
        raw_text: &str,
        industry: Industry,
    ) -> Result<Vec<RefinedIdea>, RemoteError> {
        let folded = fold_industry(raw_text, industry);
        let response: IdeaGenerationResponse = self
            .post_json(
                Operation::RefineIdea,
                "/ideas/generate",
                &IdeaRequest { idea: &folded },
            )
            .await?;
        Ok(response.ideas)
    }

    async fn market_insight(&self, idea: &RefinedIdea) -> Result<MarketInsight, RemoteError> {
        self.post_json(Operation::MarketInsight, "/ideas/insights", idea)
            .await
    }

    async fn competitors(&self, idea: &RefinedIdea) -> Result<CompetitorSnapshot, RemoteError> {
        self.post_json(Operation::Competitors, "/ideas/competitors", idea)
            .await
    }

    async fn risk_assessment(&self, idea: &RefinedIdea) -> Result<RiskAssessment, RemoteError> {
        self.post_json(Operation::RiskAssessment, "/ideas/assessment", idea)
            .await
    }

    async fn validation_scores(
        &self,
        idea: &RefinedIdea,
        market: &MarketInsight,
        competitors: &CompetitorSnapshot,
    ) -> Result<ValidationScores, RemoteError> {
        let body = ValidationRequest {
            idea,
            market,
            competitors,
        };
        self.post_json(Operation::ValidationScores, "/ideas/validate", &body)
            .await
    }

    async fn partners(&self) -> Result<Vec<Partner>, RemoteError> {
        self.get_json(Operation::Partners, "/partners/suggest").await
    }

    async fn build_portfolio(&self, raw_text: &str) -> Result<PortfolioRecord, RemoteError> {
        let response: PortfolioResponse = self
            .post_json(
                Operation::BuildPortfolio,
                "/portfolio/build",
                &IdeaRequest {
                    idea: raw_text.trim(),
                },
            )
            .await?;
        Ok(response.into())
    }

    async fn send_chat_message(&self, text: &str) -> Result<String, RemoteError> {
        let response: ChatResponse = self
            .post_json(Operation::Chat, "/chat", &ChatRequest { message: text })
            .await?;
        Ok(response.response)
    }

    async fn render_summary(
        &self,
        idea: &RefinedIdea,
        bundle: &AnalysisBundle,
    ) -> Result<String, RemoteError> {
        let response: SummaryResponse = self
            .post_json(
                Operation::RenderSummary,
                "/ideas/summary",
                &SummaryRequest::new(idea, bundle),
            )
            .await?;
        Ok(response.html)
    }

    async fn login(&self, email: &str, password: &str) -> Result<Session, RemoteError> {
        let response: TokenResponse = self
            .post_json(
                Operation::Login,
                "/auth/login",
                &LoginRequest { email, password },
            )
            .await?;
        issued_session(Operation::Login, response, email)
    }

    async fn register(
        &self,
        email: &str,
        password: &str,
        profile: &Registration,
    ) -> Result<Session, RemoteError> {
        let body = RegisterRequest {
            email,
            password,
            interests: &profile.interests,
            skills: &profile.skills,
            location: profile.location.as_deref(),
        };
        let response: TokenResponse = self
            .post_json(Operation::Register, "/auth/register", &body)
            .await?;
        issued_session(Operation::Register, response, email)
    }
}

fn issued_session(
    op: Operation,
    response: TokenResponse,
    email: &str,
) -> Result<Session, RemoteError> {
    if response.access_token.trim().is_empty() {
        return Err(RemoteError::Malformed(format!(
            "{} reply carried no access token",
            op.label()
        )));
    }
    Ok(Session::new(response.access_token, Some(email.to_string())))
}

fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Pulls a human-readable message out of an error body: `detail` as a string,
/// the first `msg` of a `detail` list, or a top-level `message`.
pub fn parse_error_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    let from_detail = match parsed.detail {
        Some(serde_json::Value::String(text)) => Some(text),
        Some(serde_json::Value::Array(items)) => items
            .iter()
            .find_map(|item| item.get("msg").and_then(|msg| msg.as_str()))
            .map(str::to_string),
        _ => None,
    };
    from_detail
        .or(parsed.message)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, RemoteError> {
    // Empty 2xx bodies decode like `{}` so defaulted records still come back.
    let body = if body.trim().is_empty() { "{}" } else { body };
    serde_json::from_str(body).map_err(|err| RemoteError::Malformed(err.to_string()))
}
