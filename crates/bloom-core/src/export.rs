use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::model::AnalysisBundle;
use crate::model::PortfolioRecord;
use crate::model::RefinedIdea;

pub const EXPORT_SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    #[default]
    Json,
    Yaml,
}

impl ExportFormat {
    /// `.yaml`/`.yml` select YAML; anything else falls back to `default`.
    pub fn from_path(path: &Path, default: ExportFormat) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => Self::Yaml,
            Some("json") => Self::Json,
            _ => default,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportKind {
    Analysis,
    Portfolio,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisExport {
    pub idea: RefinedIdea,
    #[serde(flatten)]
    pub bundle: AnalysisBundle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportEnvelope<T> {
    pub version: u8,
    pub exported_at_ms: i64,
    pub kind: ExportKind,
    pub payload: T,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub fn write_bundle(
    path: impl AsRef<Path>,
    format: ExportFormat,
    idea: &RefinedIdea,
    bundle: &AnalysisBundle,
) -> Result<PathBuf, ExportError> {
    let payload = AnalysisExport {
        idea: idea.clone(),
        bundle: bundle.clone(),
    };
    write_envelope(path.as_ref(), format, ExportKind::Analysis, payload)
}

pub fn write_portfolio(
    path: impl AsRef<Path>,
    format: ExportFormat,
    record: &PortfolioRecord,
) -> Result<PathBuf, ExportError> {
    write_envelope(path.as_ref(), format, ExportKind::Portfolio, record.clone())
}

pub fn read_export<T: DeserializeOwned>(
    path: impl AsRef<Path>,
    format: ExportFormat,
) -> Result<ExportEnvelope<T>, ExportError> {
    let bytes = std::fs::read(path.as_ref())?;
    Ok(match format {
        ExportFormat::Json => serde_json::from_slice(&bytes)?,
        ExportFormat::Yaml => serde_yaml::from_slice(&bytes)?,
    })
}

fn write_envelope<T: Serialize>(
    path: &Path,
    format: ExportFormat,
    kind: ExportKind,
    payload: T,
) -> Result<PathBuf, ExportError> {
    let envelope = ExportEnvelope {
        version: EXPORT_SCHEMA_VERSION,
        exported_at_ms: chrono::Utc::now().timestamp_millis(),
        kind,
        payload,
    };
    let mut encoded = match format {
        ExportFormat::Json => serde_json::to_string_pretty(&envelope)?,
        ExportFormat::Yaml => serde_yaml::to_string(&envelope)?,
    };
    if !encoded.ends_with('\n') {
        encoded.push('\n');
    }
    write_file(path, encoded.as_bytes())
}

/// Writes `contents` owner-only, creating missing parent directories.
pub fn write_file(path: &Path, contents: &[u8]) -> Result<PathBuf, ExportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut opts = OpenOptions::new();
    opts.create(true).write(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o600);
    }
    let mut file = opts.open(path)?;
    file.write_all(contents)?;
    file.flush()?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;
    use crate::model::CompetitorSnapshot;
    use crate::model::MarketInsight;
    use crate::model::MarketReadiness;
    use crate::model::Partner;
    use crate::model::RiskAssessment;
    use crate::model::ValidationScores;

    fn idea() -> RefinedIdea {
        RefinedIdea {
            name: "ShiftTutor".to_string(),
            problem: "Night-shift nurses cannot attend classes".to_string(),
            solution: "Async peer tutoring".to_string(),
            value_proposition: "Certification on your own clock".to_string(),
        }
    }

    fn bundle() -> AnalysisBundle {
        AnalysisBundle::new(
            MarketInsight {
                industry: "EdTech".to_string(),
                top_trends: vec!["Micro-credentials".to_string()],
                customer_segments: vec!["Hospitals".to_string()],
            },
            CompetitorSnapshot::default(),
            RiskAssessment {
                opportunities: vec!["Hospital L&D budgets".to_string()],
                risks: vec!["Accreditation".to_string()],
                mitigation: "Partner with an accredited body".to_string(),
            },
            ValidationScores {
                feasibility_score: 80,
                novelty_score: 80,
                market_readiness: MarketReadiness::Low,
            },
            vec![Partner {
                name: "Maya".to_string(),
                skills: vec!["Nursing education".to_string()],
                interest_overlap_score: 0.81,
                contact_hint: "maya@example.com".to_string(),
            }],
        )
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            ExportFormat::from_path(Path::new("out/report.YML"), ExportFormat::Json),
            ExportFormat::Yaml
        );
        assert_eq!(
            ExportFormat::from_path(Path::new("report.json"), ExportFormat::Yaml),
            ExportFormat::Json
        );
        assert_eq!(
            ExportFormat::from_path(Path::new("report"), ExportFormat::Yaml),
            ExportFormat::Yaml
        );
    }

    #[test]
    fn analysis_export_is_readable_as_json() {
        let dir = tempdir().expect("tmpdir");
        let path = dir.path().join("nested").join("analysis.json");
        let written = write_bundle(&path, ExportFormat::Json, &idea(), &bundle()).expect("write");
        assert_eq!(written, path);

        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).expect("read")).expect("json");
        assert_eq!(raw["kind"], "analysis");
        assert_eq!(raw["version"], 1);
        assert_eq!(raw["payload"]["idea"]["name"], "ShiftTutor");
        assert_eq!(raw["payload"]["scores"]["market_readiness"], "Low");
        assert!(raw["exported_at_ms"].as_i64().expect("timestamp") > 0);
    }

    #[test]
    fn portfolio_export_as_yaml() {
        let dir = tempdir().expect("tmpdir");
        let path = dir.path().join("portfolio.yaml");
        let bundle = bundle();
        let record = PortfolioRecord {
            portfolio_id: "portfolio-001".to_string(),
            idea: idea(),
            market: bundle.market,
            competitors: bundle.competitors,
            risks: bundle.risks,
            scores: bundle.scores,
            partners: bundle.partners,
            export_ref: Some("/exports/portfolio.pdf".to_string()),
        };
        write_portfolio(&path, ExportFormat::Yaml, &record).expect("write");

        let envelope: ExportEnvelope<PortfolioRecord> =
            read_export(&path, ExportFormat::Yaml).expect("read");
        assert_eq!(envelope.kind, ExportKind::Portfolio);
        assert_eq!(envelope.payload.portfolio_id, "portfolio-001");
        assert_eq!(
            envelope.payload.export_ref.as_deref(),
            Some("/exports/portfolio.pdf")
        );
    }

    #[test]
    fn rewriting_replaces_previous_export() {
        let dir = tempdir().expect("tmpdir");
        let path = dir.path().join("analysis.json");
        write_bundle(&path, ExportFormat::Json, &idea(), &bundle()).expect("first");
        let mut renamed = idea();
        renamed.name = "ShiftTutor Pro".to_string();
        write_bundle(&path, ExportFormat::Json, &renamed, &bundle()).expect("second");

        let envelope: ExportEnvelope<AnalysisExport> =
            read_export(&path, ExportFormat::Json).expect("read");
        assert_eq!(envelope.payload.idea.name, "ShiftTutor Pro");
    }

    #[test]
    fn raw_write_creates_missing_directories() {
        let dir = tempdir().expect("tmpdir");
        let path = dir.path().join("reports").join("2024").join("summary.html");
        let written = write_file(&path, b"<h1>ShiftTutor</h1>").expect("write");
        assert_eq!(written, path);
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "<h1>ShiftTutor</h1>");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).expect("metadata").permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }
}
