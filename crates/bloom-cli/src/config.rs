use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use bloom_core::config::BloomConfig;

pub const ENV_API_URL: &str = "BLOOM_API_URL";
pub const ENV_TOKEN: &str = "BLOOM_TOKEN";

/// `<config_dir>/bloom/config.toml`, when the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("bloom").join("config.toml"))
}

/// Loads the explicit file (which must exist), else the default file if
/// present, else defaults. Environment overrides are applied last.
pub fn load(explicit: Option<&Path>) -> Result<BloomConfig> {
    let mut config = match explicit {
        Some(path) => read_file(path)?,
        None => match default_config_path().filter(|path| path.is_file()) {
            Some(path) => read_file(&path)?,
            None => BloomConfig::default(),
        },
    };
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

pub fn read_file(path: &Path) -> Result<BloomConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    parse(&raw).with_context(|| format!("invalid config {}", path.display()))
}

pub fn parse(raw: &str) -> Result<BloomConfig> {
    Ok(toml::from_str(raw)?)
}

pub fn apply_env_overrides(config: &mut BloomConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(url) = lookup(ENV_API_URL).filter(|value| !value.trim().is_empty()) {
        config.api.base_url = url.trim().to_string();
    }
    if let Some(token) = lookup(ENV_TOKEN).filter(|value| !value.trim().is_empty()) {
        config.auth.token = Some(token.trim().to_string());
    }
}

/// Relative export paths land under `export.dir` when one is configured.
pub fn resolve_export_path(config: &BloomConfig, path: &Path) -> PathBuf {
    match &config.export.dir {
        Some(dir) if path.is_relative() => dir.join(path),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use bloom_core::config::DEFAULT_BASE_URL;
    use bloom_core::export::ExportFormat;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = parse(
            r#"
[auth]
token = "abc123"
user = "ada@example.com"
"#,
        )
        .expect("config");
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.export.format, ExportFormat::Json);
        let session = config.session().expect("session");
        assert_eq!(session.user(), Some("ada@example.com"));
    }

    #[test]
    fn full_toml_round_trips_every_section() {
        let config = parse(
            r#"
[api]
base_url = "https://bloom.example.com/api"
user_agent = "bloom-ci"

[export]
format = "yaml"
dir = "/tmp/bloom-exports"
"#,
        )
        .expect("config");
        assert_eq!(config.api.base_url, "https://bloom.example.com/api");
        assert_eq!(config.api.user_agent.as_deref(), Some("bloom-ci"));
        assert_eq!(config.export.format, ExportFormat::Yaml);
        assert_eq!(
            config.export.dir.as_deref(),
            Some(Path::new("/tmp/bloom-exports"))
        );
    }

    #[test]
    fn env_overrides_win_over_file() {
        let mut config = parse("[api]\nbase_url = \"http://file/api\"\n").expect("config");
        apply_env_overrides(&mut config, |key| match key {
            ENV_API_URL => Some("http://env/api".to_string()),
            ENV_TOKEN => Some("  env-token ".to_string()),
            _ => None,
        });
        assert_eq!(config.api.base_url, "http://env/api");
        assert_eq!(config.auth.token.as_deref(), Some("env-token"));
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let mut config = BloomConfig::default();
        apply_env_overrides(&mut config, |_| Some("   ".to_string()));
        assert_eq!(config, BloomConfig::default());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempdir().expect("tmpdir");
        let err = read_file(&dir.path().join("absent.toml")).expect_err("missing");
        assert!(err.to_string().contains("failed to read config"));
    }

    #[test]
    fn reads_config_from_disk() {
        let dir = tempdir().expect("tmpdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[export]\nformat = \"yaml\"\n").expect("write");
        let config = read_file(&path).expect("config");
        assert_eq!(config.export.format, ExportFormat::Yaml);
    }

    #[test]
    fn export_dir_applies_to_relative_paths_only() {
        let mut config = BloomConfig::default();
        config.export.dir = Some(PathBuf::from("/srv/exports"));
        assert_eq!(
            resolve_export_path(&config, Path::new("idea.json")),
            PathBuf::from("/srv/exports/idea.json")
        );
        assert_eq!(
            resolve_export_path(&config, Path::new("/abs/idea.json")),
            PathBuf::from("/abs/idea.json")
        );
    }
}
