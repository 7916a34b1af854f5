use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStage {
    Refine,
    Market,
    Competitors,
    Risks,
    Validate,
    Partners,
}

impl AnalysisStage {
    pub fn label(self) -> &'static str {
        match self {
            Self::Refine => "idea refinement",
            Self::Market => "market insight",
            Self::Competitors => "competitor snapshot",
            Self::Risks => "risk assessment",
            Self::Validate => "validation scoring",
            Self::Partners => "partner matching",
        }
    }

    pub fn dependency(self) -> DependencyKind {
        analysis_template()
            .steps
            .iter()
            .find(|step| step.stage == self)
            .map_or(DependencyKind::Hard, |step| step.dependency)
    }
}

/// Whether a failing stage aborts the run (hard) or is absorbed (soft).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyKind {
    Hard,
    Soft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisStepSpec {
    pub stage: AnalysisStage,
    pub dependency: DependencyKind,
    pub requires: &'static [AnalysisStage],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisTemplate {
    pub steps: &'static [AnalysisStepSpec],
}

const ANALYSIS_STEPS: [AnalysisStepSpec; 5] = [
    AnalysisStepSpec {
        stage: AnalysisStage::Market,
        dependency: DependencyKind::Hard,
        requires: &[],
    },
    AnalysisStepSpec {
        stage: AnalysisStage::Competitors,
        dependency: DependencyKind::Hard,
        requires: &[],
    },
    AnalysisStepSpec {
        stage: AnalysisStage::Risks,
        dependency: DependencyKind::Hard,
        requires: &[],
    },
    AnalysisStepSpec {
        stage: AnalysisStage::Validate,
        dependency: DependencyKind::Hard,
        requires: &[AnalysisStage::Market, AnalysisStage::Competitors],
    },
    AnalysisStepSpec {
        stage: AnalysisStage::Partners,
        dependency: DependencyKind::Soft,
        requires: &[],
    },
];

const ANALYSIS_TEMPLATE: AnalysisTemplate = AnalysisTemplate {
    steps: &ANALYSIS_STEPS,
};

/// Per-idea analysis steps in display order. Refinement precedes the template
/// and is driven by the Define stage.
pub fn analysis_template() -> &'static AnalysisTemplate {
    &ANALYSIS_TEMPLATE
}
