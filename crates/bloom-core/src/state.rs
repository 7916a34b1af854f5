use std::sync::Arc;

use crate::error::AnalysisError;
use crate::error::RemoteError;
use crate::error::ValidationError;
use crate::model::AnalysisBundle;
use crate::model::Industry;
use crate::model::RawIdea;
use crate::model::RefinedIdea;
use crate::workflow::AnalysisStage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStage {
    Define,
    Select,
    Insights,
}

impl WorkflowStage {
    pub fn label(self) -> &'static str {
        match self {
            Self::Define => "Define",
            Self::Select => "Select",
            Self::Insights => "Insights",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::Define => 0,
            Self::Select => 1,
            Self::Insights => 2,
        }
    }
}

/// Read-only views inside `Insights`. Switching tabs is navigation, not a
/// stage transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightsTab {
    Overview,
    Market,
    Competitors,
    Risks,
    Score,
    Partners,
}

impl InsightsTab {
    pub fn next(self) -> Self {
        match self {
            Self::Overview => Self::Market,
            Self::Market => Self::Competitors,
            Self::Competitors => Self::Risks,
            Self::Risks => Self::Score,
            Self::Score => Self::Partners,
            Self::Partners => Self::Overview,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Overview => Self::Partners,
            Self::Market => Self::Overview,
            Self::Competitors => Self::Market,
            Self::Risks => Self::Competitors,
            Self::Score => Self::Risks,
            Self::Partners => Self::Score,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Market => "Market",
            Self::Competitors => "Competitors",
            Self::Risks => "Risks & Opportunities",
            Self::Score => "Validation",
            Self::Partners => "Partners",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowError {
    pub message: Arc<str>,
    pub stage: WorkflowStage,
    pub failed_step: Option<AnalysisStage>,
}

impl WorkflowError {
    pub fn validation(err: &ValidationError) -> Self {
        Self {
            message: err.to_string().into(),
            stage: WorkflowStage::Define,
            failed_step: None,
        }
    }

    pub fn refinement(err: &RemoteError) -> Self {
        Self {
            message: err.user_message().into(),
            stage: WorkflowStage::Define,
            failed_step: Some(AnalysisStage::Refine),
        }
    }

    pub fn analysis(err: &AnalysisError) -> Self {
        Self {
            message: err.user_message().into(),
            stage: WorkflowStage::Select,
            failed_step: Some(err.stage),
        }
    }

    pub fn empty_refinement() -> Self {
        Self {
            message: "No ideas came back. Try describing your idea differently.".into(),
            stage: WorkflowStage::Define,
            failed_step: Some(AnalysisStage::Refine),
        }
    }
}

/// Immutable snapshot of the three-stage idea workflow. New snapshots are
/// produced by `reduce`.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowState {
    pub stage: WorkflowStage,
    pub idea_text: String,
    pub industry: Option<Industry>,
    pub submitted: Option<RawIdea>,
    pub ideas: Vec<RefinedIdea>,
    pub highlighted: Option<usize>,
    pub selected: Option<RefinedIdea>,
    pub bundle: Option<AnalysisBundle>,
    pub error: Option<WorkflowError>,
    pub loading: bool,
    /// Bumped on every reset. Responses tagged with an older generation are
    /// dropped.
    pub generation: u64,
    pub tab: InsightsTab,
}

impl Default for WorkflowState {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkflowState {
    pub fn new() -> Self {
        Self {
            stage: WorkflowStage::Define,
            idea_text: String::new(),
            industry: None,
            submitted: None,
            ideas: Vec::new(),
            highlighted: None,
            selected: None,
            bundle: None,
            error: None,
            loading: false,
            generation: 0,
            tab: InsightsTab::Overview,
        }
    }

    /// Generate is enabled only with non-blank text and a chosen industry.
    pub fn can_submit(&self) -> bool {
        self.stage == WorkflowStage::Define
            && !self.loading
            && !self.idea_text.trim().is_empty()
            && self.industry.is_some()
    }

    pub fn can_analyze(&self, index: usize) -> bool {
        self.stage == WorkflowStage::Select && !self.loading && index < self.ideas.len()
    }

    pub fn highlighted_idea(&self) -> Option<&RefinedIdea> {
        self.highlighted.and_then(|idx| self.ideas.get(idx))
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|err| err.message.as_ref())
    }
}
