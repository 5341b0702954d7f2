//! Engine configuration and loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::scale::GradeScale;

/// Default score suggested for assessment types the optimizer does not need
/// to push.
pub const DEFAULT_MINIMUM_FLOOR_SCORE: f64 = 60.0;

/// Default program length in semesters.
pub const DEFAULT_TOTAL_SEMESTERS: u32 = 8;

/// Tunable constants shared by all engines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Percentage cutoffs and grade points.
    #[serde(default)]
    pub scale: GradeScale,
    /// Floor score assigned to types the optimizer leaves untouched.
    #[serde(default = "default_floor")]
    pub minimum_floor_score: f64,
    /// Program length used when a gradebook does not state one.
    #[serde(default = "default_total_semesters")]
    pub total_semesters: u32,
}

fn default_floor() -> f64 {
    DEFAULT_MINIMUM_FLOOR_SCORE
}
fn default_total_semesters() -> u32 {
    DEFAULT_TOTAL_SEMESTERS
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scale: GradeScale::standard(),
            minimum_floor_score: default_floor(),
            total_semesters: default_total_semesters(),
        }
    }
}

impl EngineConfig {
    /// Check the scale, floor and program length.
    pub fn validate(&self) -> Result<()> {
        self.scale.validate()?;
        anyhow::ensure!(
            (0.0..=100.0).contains(&self.minimum_floor_score),
            "minimum_floor_score must be between 0 and 100, got {}",
            self.minimum_floor_score
        );
        anyhow::ensure!(
            self.total_semesters >= 1,
            "total_semesters must be at least 1"
        );
        Ok(())
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `gradecalc.toml` in the current directory
/// 2. `~/.config/gradecalc/config.toml`
///
/// Environment variable overrides: `GRADECALC_TOTAL_SEMESTERS`, `GRADECALC_MIN_FLOOR`.
pub fn load_config() -> Result<EngineConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<EngineConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("gradecalc.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            parse_config(
                &std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config: {}", path.display()))?,
            )
            .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => EngineConfig::default(),
    };

    apply_env_overrides(&mut config)?;
    config.validate().context("invalid configuration")?;
    Ok(config)
}

/// Parse a TOML config string.
pub fn parse_config(content: &str) -> Result<EngineConfig> {
    Ok(toml::from_str::<EngineConfig>(content)?)
}

fn apply_env_overrides(config: &mut EngineConfig) -> Result<()> {
    if let Ok(value) = std::env::var("GRADECALC_TOTAL_SEMESTERS") {
        config.total_semesters = value
            .trim()
            .parse()
            .with_context(|| format!("invalid GRADECALC_TOTAL_SEMESTERS: '{value}'"))?;
    }
    if let Ok(value) = std::env::var("GRADECALC_MIN_FLOOR") {
        config.minimum_floor_score = value
            .trim()
            .parse()
            .with_context(|| format!("invalid GRADECALC_MIN_FLOOR: '{value}'"))?;
    }
    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gradecalc"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::LetterGrade;

    #[test]
    fn default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.minimum_floor_score, 60.0);
        assert_eq!(config.total_semesters, 8);
        assert_eq!(config.scale.bands.len(), 11);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config = parse_config("minimum_floor_score = 70.0\n").unwrap();
        assert_eq!(config.minimum_floor_score, 70.0);
        assert_eq!(config.total_semesters, 8);
        assert_eq!(config.scale, GradeScale::standard());
    }

    #[test]
    fn config_with_custom_scale() {
        let toml_str = r#"
total_semesters = 10

[[scale.bands]]
letter = "A"
min_percentage = 85.0
grade_points = 4.0

[[scale.bands]]
letter = "C"
min_percentage = 50.0
grade_points = 2.0
"#;
        let config = parse_config(toml_str).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.total_semesters, 10);
        assert_eq!(config.scale.letter_for(86.0), LetterGrade::A);
        assert_eq!(config.scale.letter_for(60.0), LetterGrade::C);
    }

    #[test]
    fn invalid_floor_is_rejected() {
        let config = EngineConfig {
            minimum_floor_score: 120.0,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = load_config_from(Some(Path::new("/no/such/gradecalc.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "total_semesters = 6\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.total_semesters, 6);
    }
}
