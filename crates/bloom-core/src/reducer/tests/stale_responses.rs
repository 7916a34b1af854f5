use super::*;
use pretty_assertions::assert_eq;

#[test]
fn analysis_result_after_reset_is_dropped() {
    let pending = user(&selecting(), UserAction::Analyze { index: 0 });
    let Some(WorkflowEffect::RequestAnalysis { generation, idea }) =
        pending.effects.first().cloned()
    else {
        panic!("expected analysis request");
    };

    let reset = apply_user(pending.state, UserAction::Reset);
    let late = runtime(
        &reset,
        RuntimeAction::AnalysisCompleted {
            generation,
            idea,
            bundle: bundle(),
        },
    );

    assert_unchanged(&reset, &late);
    assert_eq!(late.state.bundle, None);
    assert_eq!(late.state.stage, WorkflowStage::Define);
}

#[test]
fn refinement_result_after_reset_is_dropped() {
    let pending = user(&ready_to_submit(), UserAction::SubmitIdea);
    let reset = apply_user(pending.state, UserAction::Reset);
    let late = runtime(
        &reset,
        RuntimeAction::IdeasRefined {
            generation: 0,
            ideas: vec![idea("Late")],
        },
    );
    assert_unchanged(&reset, &late);
    assert!(late.state.ideas.is_empty());
}

#[test]
fn stale_failure_does_not_raise_error_banner() {
    let pending = user(&selecting(), UserAction::Analyze { index: 0 });
    let reset = apply_user(pending.state, UserAction::Reset);
    let late = runtime(
        &reset,
        RuntimeAction::AnalysisFailed {
            generation: 0,
            error: AnalysisError::new(
                AnalysisStage::Competitors,
                RemoteError::Transport("timeout".to_string()),
            ),
        },
    );
    assert_unchanged(&reset, &late);
    assert_eq!(late.state.error, None);
}

#[test]
fn new_run_after_reset_uses_new_generation() {
    let reset = apply_user(insights(0), UserAction::Reset);
    let transition = user(&reset, UserAction::SubmitIdea);
    assert!(matches!(
        transition.effects.as_slice(),
        [WorkflowEffect::RequestRefinement { generation: 1, .. }]
    ));

    let stale = runtime(
        &transition.state,
        RuntimeAction::IdeasRefined {
            generation: 0,
            ideas: vec![idea("Old")],
        },
    );
    assert_unchanged(&transition.state, &stale);

    let fresh = runtime(
        &transition.state,
        RuntimeAction::IdeasRefined {
            generation: 1,
            ideas: vec![idea("New")],
        },
    );
    assert_eq!(fresh.state.stage, WorkflowStage::Select);
    assert_eq!(fresh.state.ideas, vec![idea("New")]);
}
