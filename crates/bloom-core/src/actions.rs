use super::error::AnalysisError;
use super::error::RemoteError;
use super::model::AnalysisBundle;
use super::model::Industry;
use super::model::RefinedIdea;
use super::state::InsightsTab;

#[derive(Debug, Clone)]
pub enum WorkflowAction {
    User(UserAction),
    Runtime(RuntimeAction),
}

#[derive(Debug, Clone)]
pub enum UserAction {
    SetIdeaText(String),
    SetIndustry(Option<Industry>),
    SubmitIdea,
    Highlight { index: usize },
    Analyze { index: usize },
    SelectTab(InsightsTab),
    NextTab,
    PrevTab,
    DismissError,
    Reset,
}

/// Results of remote calls, tagged with the generation of the request that
/// produced them.
#[derive(Debug, Clone)]
pub enum RuntimeAction {
    IdeasRefined {
        generation: u64,
        ideas: Vec<RefinedIdea>,
    },
    RefinementFailed {
        generation: u64,
        error: RemoteError,
    },
    AnalysisCompleted {
        generation: u64,
        idea: RefinedIdea,
        bundle: AnalysisBundle,
    },
    AnalysisFailed {
        generation: u64,
        error: AnalysisError,
    },
}

impl RuntimeAction {
    pub fn generation(&self) -> u64 {
        match self {
            Self::IdeasRefined { generation, .. }
            | Self::RefinementFailed { generation, .. }
            | Self::AnalysisCompleted { generation, .. }
            | Self::AnalysisFailed { generation, .. } => *generation,
        }
    }
}

impl From<UserAction> for WorkflowAction {
    fn from(action: UserAction) -> Self {
        Self::User(action)
    }
}

impl From<RuntimeAction> for WorkflowAction {
    fn from(action: RuntimeAction) -> Self {
        Self::Runtime(action)
    }
}
