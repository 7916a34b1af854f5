use tracing::debug;

use super::actions::RuntimeAction;
use super::actions::UserAction;
use super::actions::WorkflowAction;
use super::model::Industry;
use super::model::RawIdea;
use super::model::RefinedIdea;
use super::state::InsightsTab;
use super::state::WorkflowError;
use super::state::WorkflowStage;
use super::state::WorkflowState;

/// Remote work requested by a transition. The caller executes it and feeds the
/// result back as a `RuntimeAction` carrying the same generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowEffect {
    RequestRefinement {
        generation: u64,
        text: String,
        industry: Industry,
    },
    RequestAnalysis {
        generation: u64,
        idea: RefinedIdea,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: WorkflowState,
    pub effects: Vec<WorkflowEffect>,
}

impl Transition {
    fn unchanged(state: &WorkflowState) -> Self {
        Self {
            state: state.clone(),
            effects: Vec::new(),
        }
    }
}

pub fn reduce(state: &WorkflowState, action: WorkflowAction) -> Transition {
    match action {
        WorkflowAction::User(user) => reduce_user(state, user),
        WorkflowAction::Runtime(runtime) => reduce_runtime(state, runtime),
    }
}

fn reduce_user(state: &WorkflowState, action: UserAction) -> Transition {
    let mut next = state.clone();
    let mut effects = Vec::new();

    match action {
        UserAction::SetIdeaText(text) => {
            if state.stage != WorkflowStage::Define || state.loading {
                return Transition::unchanged(state);
            }
            next.idea_text = text;
        }
        UserAction::SetIndustry(industry) => {
            if state.stage != WorkflowStage::Define || state.loading {
                return Transition::unchanged(state);
            }
            next.industry = industry;
        }
        UserAction::SubmitIdea => {
            // Disabled, not failed: blank text or no industry is a silent no-op.
            if !state.can_submit() {
                return Transition::unchanged(state);
            }
            match RawIdea::new(&state.idea_text, state.industry) {
                Ok(raw) => {
                    next.loading = true;
                    next.error = None;
                    effects.push(WorkflowEffect::RequestRefinement {
                        generation: state.generation,
                        text: raw.text().to_string(),
                        industry: raw.industry(),
                    });
                    next.submitted = Some(raw);
                }
                Err(err) => {
                    next.error = Some(WorkflowError::validation(&err));
                }
            }
        }
        UserAction::Highlight { index } => {
            if state.stage != WorkflowStage::Select || state.loading || index >= state.ideas.len()
            {
                return Transition::unchanged(state);
            }
            next.highlighted = Some(index);
        }
        UserAction::Analyze { index } => {
            if !state.can_analyze(index) {
                return Transition::unchanged(state);
            }
            let idea = state.ideas[index].clone();
            next.highlighted = Some(index);
            next.selected = Some(idea.clone());
            next.loading = true;
            next.error = None;
            effects.push(WorkflowEffect::RequestAnalysis {
                generation: state.generation,
                idea,
            });
        }
        UserAction::SelectTab(tab) => {
            if state.stage != WorkflowStage::Insights {
                return Transition::unchanged(state);
            }
            next.tab = tab;
        }
        UserAction::NextTab => {
            if state.stage != WorkflowStage::Insights {
                return Transition::unchanged(state);
            }
            next.tab = state.tab.next();
        }
        UserAction::PrevTab => {
            if state.stage != WorkflowStage::Insights {
                return Transition::unchanged(state);
            }
            next.tab = state.tab.prev();
        }
        UserAction::DismissError => {
            next.error = None;
        }
        UserAction::Reset => {
            next.stage = WorkflowStage::Define;
            next.submitted = None;
            next.ideas = Vec::new();
            next.highlighted = None;
            next.selected = None;
            next.bundle = None;
            next.error = None;
            next.loading = false;
            next.tab = InsightsTab::Overview;
            next.generation = state.generation.saturating_add(1);
        }
    }

    Transition {
        state: next,
        effects,
    }
}

fn reduce_runtime(state: &WorkflowState, action: RuntimeAction) -> Transition {
    if action.generation() != state.generation {
        debug!(
            response_generation = action.generation(),
            current_generation = state.generation,
            "dropping stale response"
        );
        return Transition::unchanged(state);
    }

    let mut next = state.clone();
    match action {
        RuntimeAction::IdeasRefined { ideas, .. } => {
            if state.stage != WorkflowStage::Define || !state.loading {
                return Transition::unchanged(state);
            }
            next.loading = false;
            if ideas.is_empty() {
                next.error = Some(WorkflowError::empty_refinement());
            } else {
                next.stage = WorkflowStage::Select;
                next.ideas = ideas;
                next.highlighted = Some(0);
                next.selected = None;
                next.bundle = None;
                next.error = None;
            }
        }
        RuntimeAction::RefinementFailed { error, .. } => {
            if state.stage != WorkflowStage::Define || !state.loading {
                return Transition::unchanged(state);
            }
            next.loading = false;
            next.error = Some(WorkflowError::refinement(&error));
        }
        RuntimeAction::AnalysisCompleted { idea, bundle, .. } => {
            if state.stage != WorkflowStage::Select
                || !state.loading
                || state.selected.as_ref() != Some(&idea)
            {
                return Transition::unchanged(state);
            }
            next.stage = WorkflowStage::Insights;
            next.bundle = Some(bundle);
            next.loading = false;
            next.error = None;
            next.tab = InsightsTab::Overview;
        }
        RuntimeAction::AnalysisFailed { error, .. } => {
            if state.stage != WorkflowStage::Select || !state.loading {
                return Transition::unchanged(state);
            }
            next.loading = false;
            next.selected = None;
            next.error = Some(WorkflowError::analysis(&error));
        }
    }

    Transition {
        state: next,
        effects: Vec::new(),
    }
}

#[cfg(test)]
mod tests;
