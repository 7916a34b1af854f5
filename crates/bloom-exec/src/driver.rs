use std::collections::VecDeque;
use std::sync::Arc;

use bloom_core::actions::RuntimeAction;
use bloom_core::actions::WorkflowAction;
use bloom_core::reducer::reduce;
use bloom_core::reducer::WorkflowEffect;
use bloom_core::state::WorkflowState;
use tracing::debug;
use tracing::warn;

use crate::client::AnalysisClient;
use crate::orchestrator::IdeaAnalysisOrchestrator;

/// Runs reducer effects against the analysis client and folds each result
/// back in as the matching runtime action.
pub struct WorkflowDriver<C: ?Sized> {
    client: Arc<C>,
    orchestrator: IdeaAnalysisOrchestrator<C>,
}

impl<C> WorkflowDriver<C>
where
    C: AnalysisClient + ?Sized,
{
    pub fn new(client: Arc<C>) -> Self {
        let orchestrator = IdeaAnalysisOrchestrator::new(Arc::clone(&client));
        Self {
            client,
            orchestrator,
        }
    }

    pub fn orchestrator(&self) -> &IdeaAnalysisOrchestrator<C> {
        &self.orchestrator
    }

    /// Performs one effect. The returned action carries the effect's
    /// generation, so applying it after a reset is a no-op.
    pub async fn execute(&self, effect: WorkflowEffect) -> WorkflowAction {
        match effect {
            WorkflowEffect::RequestRefinement {
                generation,
                text,
                industry,
            } => {
                debug!(generation, industry = industry.id(), "refining idea");
                match self.client.refine_idea(&text, industry).await {
                    Ok(ideas) => RuntimeAction::IdeasRefined { generation, ideas }.into(),
                    Err(error) => {
                        warn!(generation, error = %error, "refinement failed");
                        RuntimeAction::RefinementFailed { generation, error }.into()
                    }
                }
            }
            WorkflowEffect::RequestAnalysis { generation, idea } => {
                debug!(generation, idea = %idea.name, "analyzing idea");
                match self.orchestrator.analyze(&idea).await {
                    Ok(bundle) => RuntimeAction::AnalysisCompleted {
                        generation,
                        idea,
                        bundle,
                    }
                    .into(),
                    Err(error) => RuntimeAction::AnalysisFailed { generation, error }.into(),
                }
            }
        }
    }

    /// Reduces `action`, then executes every effect it and its follow-ups
    /// emit, one pass each, and returns the final snapshot.
    pub async fn dispatch(&self, state: &WorkflowState, action: WorkflowAction) -> WorkflowState {
        let transition = reduce(state, action);
        let mut current = transition.state;
        let mut pending: VecDeque<WorkflowEffect> = transition.effects.into();

        while let Some(effect) = pending.pop_front() {
            let follow_up = self.execute(effect).await;
            let next = reduce(&current, follow_up);
            current = next.state;
            pending.extend(next.effects);
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use bloom_core::actions::UserAction;
    use bloom_core::model::Industry;
    use bloom_core::state::WorkflowStage;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::client::Operation;
    use crate::simulated::SimulatedAnalysisClient;

    async fn defined(driver: &WorkflowDriver<SimulatedAnalysisClient>) -> WorkflowState {
        let state = WorkflowState::new();
        let state = driver
            .dispatch(
                &state,
                UserAction::SetIdeaText("crop disease alerts for smallholders".to_string()).into(),
            )
            .await;
        driver
            .dispatch(&state, UserAction::SetIndustry(Some(Industry::AgriTech)).into())
            .await
    }

    #[tokio::test]
    async fn submit_refines_and_lands_in_select() {
        let client = Arc::new(SimulatedAnalysisClient::new());
        let driver = WorkflowDriver::new(Arc::clone(&client));
        let state = defined(&driver).await;

        let state = driver.dispatch(&state, UserAction::SubmitIdea.into()).await;
        assert_eq!(state.stage, WorkflowStage::Select);
        assert_eq!(state.ideas.len(), 3);
        assert_eq!(state.highlighted, Some(0));
        assert!(!state.loading);
        assert_eq!(client.calls(Operation::RefineIdea), 1);
    }

    #[tokio::test]
    async fn analyze_lands_in_insights() {
        let client = Arc::new(SimulatedAnalysisClient::new());
        let driver = WorkflowDriver::new(Arc::clone(&client));
        let state = defined(&driver).await;
        let state = driver.dispatch(&state, UserAction::SubmitIdea.into()).await;

        let state = driver
            .dispatch(&state, UserAction::Analyze { index: 1 }.into())
            .await;
        assert_eq!(state.stage, WorkflowStage::Insights);
        assert_eq!(state.selected.as_ref().map(|idea| idea.name.as_str()), Some("Idea Beta"));
        let bundle = state.bundle.expect("bundle");
        assert_eq!(bundle.partners[0].name, "Kofi A.");
    }

    #[tokio::test]
    async fn execute_tags_result_with_effect_generation() {
        let client = Arc::new(SimulatedAnalysisClient::new());
        let driver = WorkflowDriver::new(client);
        let action = driver
            .execute(WorkflowEffect::RequestRefinement {
                generation: 7,
                text: "crop disease alerts".to_string(),
                industry: Industry::AgriTech,
            })
            .await;
        match action {
            WorkflowAction::Runtime(runtime) => assert_eq!(runtime.generation(), 7),
            other => panic!("unexpected action: {other:?}"),
        }
    }
}
