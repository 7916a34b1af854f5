use std::sync::Arc;

use bloom_core::error::AnalysisError;
use bloom_core::error::RemoteError;
use bloom_core::model::AnalysisBundle;
use bloom_core::model::RefinedIdea;
use bloom_core::workflow::AnalysisStage;
use bloom_core::workflow::DependencyKind;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::client::AnalysisClient;

/// Runs the per-idea analysis once and produces a complete bundle or the
/// stage that failed.
///
/// Market, competitor and risk requests are issued together. Scoring waits
/// for market and competitors. Partners run last and are soft: a failure is
/// logged and replaced by an empty list.
pub struct IdeaAnalysisOrchestrator<C: ?Sized> {
    client: Arc<C>,
}

impl<C: ?Sized> Clone for IdeaAnalysisOrchestrator<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

impl<C> IdeaAnalysisOrchestrator<C>
where
    C: AnalysisClient + ?Sized,
{
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Arc<C> {
        &self.client
    }

    pub async fn analyze(&self, idea: &RefinedIdea) -> Result<AnalysisBundle, AnalysisError> {
        let client = self.client.as_ref();
        info!(idea = %idea.name, "analysis started");

        let (market, competitors, risks) = tokio::join!(
            client.market_insight(idea),
            client.competitors(idea),
            client.risk_assessment(idea),
        );
        let market = settle(AnalysisStage::Market, market)?;
        let competitors = settle(AnalysisStage::Competitors, competitors)?;
        let risks = settle(AnalysisStage::Risks, risks)?;

        let scores = settle(
            AnalysisStage::Validate,
            client
                .validation_scores(idea, &market, &competitors)
                .await,
        )?;
        let partners = settle(AnalysisStage::Partners, client.partners().await)?;

        info!(
            idea = %idea.name,
            feasibility = scores.feasibility_score,
            novelty = scores.novelty_score,
            partners = partners.len(),
            "analysis completed"
        );
        Ok(AnalysisBundle::new(
            market,
            competitors,
            risks,
            scores,
            partners,
        ))
    }
}

/// Applies the stage's dependency kind to one sub-call result.
fn settle<T: Default>(
    stage: AnalysisStage,
    result: Result<T, RemoteError>,
) -> Result<T, AnalysisError> {
    match result {
        Ok(value) => {
            debug!(stage = stage.label(), "stage completed");
            Ok(value)
        }
        Err(cause) => match stage.dependency() {
            DependencyKind::Soft => {
                warn!(stage = stage.label(), error = %cause, "soft stage failed, continuing");
                Ok(T::default())
            }
            DependencyKind::Hard => {
                warn!(stage = stage.label(), error = %cause, "analysis aborted");
                Err(AnalysisError::new(stage, cause))
            }
        },
    }
}
