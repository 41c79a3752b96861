use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::Utc;

use crate::validation::duration::YearMonth;
use crate::validation::skills::{default_skill_synonyms, SkillSynonyms};
use crate::validation::CvValidationError;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or out of range.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub port: u16,
    pub rust_log: String,
    pub validation: Arc<ValidationConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_credential("OPENAI_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            validation: Arc::new(ValidationConfig::from_env()?),
        })
    }
}

/// Thresholds and tables used by every validation call.
/// Built once at startup, shared read-only behind an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationConfig {
    pub name_threshold: f64,
    pub email_threshold: f64,
    pub phone_threshold: f64,
    pub experience_threshold: f64,
    pub skills_threshold: f64,
    pub overall_threshold: f64,
    /// ± years allowed between form and resume experience.
    pub experience_tolerance: f64,
    /// At or below this many years a candidate counts as a fresher.
    pub fresher_threshold: f64,
    /// Maximum resume text length, in characters.
    pub max_resume_chars: usize,
    /// Maximum uploaded PDF size, in bytes.
    pub max_upload_bytes: usize,
    pub skill_synonyms: SkillSynonyms,
    /// Reference month for open-ended date ranges.
    pub reference_month: YearMonth,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            name_threshold: 0.8,
            email_threshold: 0.9,
            phone_threshold: 0.85,
            experience_threshold: 0.7,
            skills_threshold: 0.6,
            overall_threshold: 0.7,
            experience_tolerance: 0.5,
            fresher_threshold: 0.1,
            max_resume_chars: 100_000,
            max_upload_bytes: 5 * 1024 * 1024,
            skill_synonyms: default_skill_synonyms(),
            reference_month: YearMonth::from_date(&Utc::now().date_naive()),
        }
    }
}

impl ValidationConfig {
    /// Defaults overridden by `VALIDATION_*` variables, then checked.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let skill_synonyms = match std::env::var("SKILL_SYNONYMS_PATH") {
            Ok(path) => {
                let table = SkillSynonyms::from_json_file(&PathBuf::from(&path))?;
                if table.is_empty() {
                    bail!("SKILL_SYNONYMS_PATH {path} contains no synonym families");
                }
                table
            }
            Err(_) => defaults.skill_synonyms,
        };

        let reference_month = match std::env::var("VALIDATION_REFERENCE_MONTH") {
            Ok(raw) => YearMonth::parse(&raw).with_context(|| {
                format!("VALIDATION_REFERENCE_MONTH must be YYYY-MM, got '{raw}'")
            })?,
            Err(_) => defaults.reference_month,
        };

        let config = Self {
            name_threshold: env_or("VALIDATION_NAME_THRESHOLD", defaults.name_threshold)?,
            email_threshold: env_or("VALIDATION_EMAIL_THRESHOLD", defaults.email_threshold)?,
            phone_threshold: env_or("VALIDATION_PHONE_THRESHOLD", defaults.phone_threshold)?,
            experience_threshold: env_or(
                "VALIDATION_EXPERIENCE_THRESHOLD",
                defaults.experience_threshold,
            )?,
            skills_threshold: env_or("VALIDATION_SKILLS_THRESHOLD", defaults.skills_threshold)?,
            overall_threshold: env_or("VALIDATION_OVERALL_THRESHOLD", defaults.overall_threshold)?,
            experience_tolerance: env_or(
                "VALIDATION_EXPERIENCE_TOLERANCE",
                defaults.experience_tolerance,
            )?,
            fresher_threshold: env_or("VALIDATION_FRESHER_THRESHOLD", defaults.fresher_threshold)?,
            max_resume_chars: env_or("VALIDATION_MAX_RESUME_CHARS", defaults.max_resume_chars)?,
            max_upload_bytes: env_or("VALIDATION_MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            skill_synonyms,
            reference_month,
        };

        config.validate()?;
        Ok(config)
    }

    /// Rejects thresholds outside [0, 1] and non-positive limits.
    pub fn validate(&self) -> Result<()> {
        let thresholds = [
            ("name_threshold", self.name_threshold),
            ("email_threshold", self.email_threshold),
            ("phone_threshold", self.phone_threshold),
            ("experience_threshold", self.experience_threshold),
            ("skills_threshold", self.skills_threshold),
            ("overall_threshold", self.overall_threshold),
        ];
        for (name, value) in thresholds {
            if !(0.0..=1.0).contains(&value) {
                bail!("{name} must be within [0, 1], got {value}");
            }
        }

        for (name, value) in [
            ("experience_tolerance", self.experience_tolerance),
            ("fresher_threshold", self.fresher_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                bail!("{name} must be a non-negative number, got {value}");
            }
        }

        if self.max_resume_chars == 0 {
            bail!("max_resume_chars must be greater than zero");
        }
        if self.max_upload_bytes == 0 {
            bail!("max_upload_bytes must be greater than zero");
        }

        Ok(())
    }
}

fn require_credential(key: &str) -> Result<String> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(CvValidationError::MissingServiceCredential(key.to_string()).into()),
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}
