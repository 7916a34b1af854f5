use std::sync::Arc;

use bloom_core::error::RemoteError;
use bloom_core::error::ValidationError;
use bloom_core::model::validate_idea_text;
use bloom_core::model::PortfolioRecord;
use thiserror::Error;
use tracing::info;
use tracing::warn;

use crate::client::AnalysisClient;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortfolioError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Single round trip: the service refines, analyzes and aggregates server-side.
/// The record is produced whole or not at all.
pub struct PortfolioBuilder<C: ?Sized> {
    client: Arc<C>,
}

impl<C> PortfolioBuilder<C>
where
    C: AnalysisClient + ?Sized,
{
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    pub async fn build(&self, raw_text: &str) -> Result<PortfolioRecord, RemoteError> {
        info!("portfolio build requested");
        match self.client.build_portfolio(raw_text).await {
            Ok(record) => {
                info!(
                    portfolio_id = %record.portfolio_id,
                    export = record.export_ref.is_some(),
                    "portfolio built"
                );
                Ok(record)
            }
            Err(err) => {
                warn!(error = %err, "portfolio build failed");
                Err(err)
            }
        }
    }

    /// Rejects text the service would refuse before spending the round trip.
    pub async fn build_checked(&self, raw_text: &str) -> Result<PortfolioRecord, PortfolioError> {
        let text = validate_idea_text(raw_text)?;
        Ok(self.build(text).await?)
    }
}
