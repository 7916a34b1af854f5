use super::*;
use pretty_assertions::assert_eq;

fn remote(status: u16, message: &str) -> RemoteError {
    RemoteError::Status {
        status,
        message: message.to_string(),
    }
}

#[test]
fn refinement_failure_keeps_define_and_allows_retry() {
    let pending = user(&ready_to_submit(), UserAction::SubmitIdea).state;
    let failed = runtime(
        &pending,
        RuntimeAction::RefinementFailed {
            generation: 0,
            error: remote(503, "Idea service is warming up"),
        },
    )
    .state;

    assert_eq!(failed.stage, WorkflowStage::Define);
    assert!(!failed.loading);
    assert_eq!(failed.error_message(), Some("Idea service is warming up"));

    let retry = user(&failed, UserAction::SubmitIdea);
    assert_eq!(retry.effects.len(), 1);
    assert_eq!(retry.state.error, None);
}

#[test]
fn empty_refinement_is_reported_and_stays_in_define() {
    let pending = user(&ready_to_submit(), UserAction::SubmitIdea).state;
    let state = runtime(
        &pending,
        RuntimeAction::IdeasRefined {
            generation: 0,
            ideas: Vec::new(),
        },
    )
    .state;
    assert_eq!(state.stage, WorkflowStage::Define);
    assert!(state.error.is_some());
    assert!(state.ideas.is_empty());
}

#[test]
fn analysis_failure_produces_no_bundle() {
    let pending = user(&selecting(), UserAction::Analyze { index: 0 }).state;
    let failed = runtime(
        &pending,
        RuntimeAction::AnalysisFailed {
            generation: 0,
            error: AnalysisError::new(
                AnalysisStage::Market,
                RemoteError::Transport("connection reset".to_string()),
            ),
        },
    )
    .state;

    assert_eq!(failed.stage, WorkflowStage::Select);
    assert_eq!(failed.bundle, None);
    assert_eq!(failed.selected, None);
    assert!(!failed.loading);
    let error = failed.error.clone().expect("error");
    assert_eq!(error.failed_step, Some(AnalysisStage::Market));
    assert_eq!(
        error.message.as_ref(),
        "Something went wrong. Please try again."
    );

    let retry = user(&failed, UserAction::Analyze { index: 0 });
    assert_eq!(retry.effects.len(), 1);
}

#[test]
fn newer_error_replaces_older_one() {
    let pending = user(&selecting(), UserAction::Analyze { index: 0 }).state;
    let first = runtime(
        &pending,
        RuntimeAction::AnalysisFailed {
            generation: 0,
            error: AnalysisError::new(AnalysisStage::Risks, remote(500, "risk model down")),
        },
    )
    .state;
    let pending = user(&first, UserAction::Analyze { index: 1 }).state;
    assert_eq!(pending.error, None);
    let second = runtime(
        &pending,
        RuntimeAction::AnalysisFailed {
            generation: 0,
            error: AnalysisError::new(AnalysisStage::Validate, remote(500, "scoring down")),
        },
    )
    .state;
    assert_eq!(second.error_message(), Some("scoring down"));
}

#[test]
fn dismiss_clears_error_without_changing_stage() {
    let pending = user(&ready_to_submit(), UserAction::SubmitIdea).state;
    let failed = runtime(
        &pending,
        RuntimeAction::RefinementFailed {
            generation: 0,
            error: RemoteError::AuthExpired,
        },
    )
    .state;
    assert_eq!(
        failed.error_message(),
        Some("Your session has expired. Please sign in again.")
    );
    let dismissed = apply_user(failed, UserAction::DismissError);
    assert_eq!(dismissed.error, None);
    assert_eq!(dismissed.stage, WorkflowStage::Define);
}

#[test]
fn completion_for_a_different_idea_is_ignored() {
    let pending = user(&selecting(), UserAction::Analyze { index: 0 }).state;
    let transition = runtime(
        &pending,
        RuntimeAction::AnalysisCompleted {
            generation: 0,
            idea: idea("Gamma"),
            bundle: bundle(),
        },
    );
    assert_unchanged(&pending, &transition);
}
