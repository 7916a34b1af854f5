use pretty_assertions::assert_eq;

pub(super) use super::reduce;
pub(super) use super::Transition;
pub(super) use super::WorkflowEffect;
pub(super) use crate::actions::RuntimeAction;
pub(super) use crate::actions::UserAction;
pub(super) use crate::actions::WorkflowAction;
pub(super) use crate::error::AnalysisError;
pub(super) use crate::error::RemoteError;
pub(super) use crate::model::AnalysisBundle;
pub(super) use crate::model::CompetitorSnapshot;
pub(super) use crate::model::Industry;
pub(super) use crate::model::MarketInsight;
pub(super) use crate::model::MarketReadiness;
pub(super) use crate::model::RefinedIdea;
pub(super) use crate::model::RiskAssessment;
pub(super) use crate::model::ValidationScores;
pub(super) use crate::state::InsightsTab;
pub(super) use crate::state::WorkflowStage;
pub(super) use crate::state::WorkflowState;
pub(super) use crate::workflow::AnalysisStage;

mod effects;
mod stale_responses;

fn idea(name: &str) -> RefinedIdea {
    RefinedIdea {
        name: name.to_string(),
        problem: format!("{name} problem"),
        solution: format!("{name} solution"),
        value_proposition: format!("{name} value"),
    }
}

fn bundle() -> AnalysisBundle {
    AnalysisBundle::new(
        MarketInsight {
            industry: "EdTech".to_string(),
            top_trends: vec!["AI tutors".to_string()],
            customer_segments: vec!["Parents".to_string()],
        },
        CompetitorSnapshot {
            competitors: Vec::new(),
            market_gap: "No async feedback loop".to_string(),
        },
        RiskAssessment {
            opportunities: vec!["Schools".to_string()],
            risks: vec!["Procurement cycles".to_string()],
            mitigation: "Start with parents".to_string(),
        },
        ValidationScores {
            feasibility_score: 70,
            novelty_score: 80,
            market_readiness: MarketReadiness::Low,
        },
        Vec::new(),
    )
}

fn user(state: &WorkflowState, action: UserAction) -> Transition {
    reduce(state, WorkflowAction::User(action))
}

fn runtime(state: &WorkflowState, action: RuntimeAction) -> Transition {
    reduce(state, WorkflowAction::Runtime(action))
}

fn apply_user(state: WorkflowState, action: UserAction) -> WorkflowState {
    user(&state, action).state
}

/// Define stage with text and industry filled in, refinement not yet requested.
fn ready_to_submit() -> WorkflowState {
    let state = WorkflowState::new();
    let state = apply_user(state, UserAction::SetIdeaText("peer tutoring for night-shift nurses".to_string()));
    apply_user(state, UserAction::SetIndustry(Some(Industry::EdTech)))
}

/// Select stage holding three candidates.
fn selecting() -> WorkflowState {
    let submitted = user(&ready_to_submit(), UserAction::SubmitIdea).state;
    let generation = submitted.generation;
    runtime(
        &submitted,
        RuntimeAction::IdeasRefined {
            generation,
            ideas: vec![idea("Alpha"), idea("Beta"), idea("Gamma")],
        },
    )
    .state
}

/// Insights stage for the candidate at `index`.
fn insights(index: usize) -> WorkflowState {
    let pending = user(&selecting(), UserAction::Analyze { index }).state;
    let generation = pending.generation;
    let chosen = pending.selected.clone().expect("selected");
    runtime(
        &pending,
        RuntimeAction::AnalysisCompleted {
            generation,
            idea: chosen,
            bundle: bundle(),
        },
    )
    .state
}

fn assert_unchanged(before: &WorkflowState, transition: &Transition) {
    assert_eq!(&transition.state, before);
    assert!(transition.effects.is_empty());
}
