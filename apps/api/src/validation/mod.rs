//! CV Validation — checks a candidate's form submission against their resume.
//!
//! Flow: check_submission → PromptBuilder → TextGenerator (one call) →
//!       parse_assessments → DecisionEngine → report_mismatches → verdict.
//!
//! All LLM calls go through the injected `TextGenerator`; nothing in here knows
//! which provider sits behind it. No retries, no partial verdicts.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::config::ValidationConfig;
use crate::llm_client::{LlmError, TextGenerator};

pub mod decision;
pub mod duration;
pub mod handlers;
pub mod mismatch;
pub mod models;
pub mod prompts;
pub mod response_parser;
pub mod skills;
pub mod submission;
pub mod upload;

use decision::DecisionEngine;
use duration::DurationParser;
use mismatch::report_mismatches;
use models::{FieldAssessmentSet, FieldValue, FormSubmission, ValidationVerdict};
use prompts::{PromptBuilder, CV_VALIDATION_PROMPT_TEMPLATE};
use response_parser::parse_assessments;
use skills::SkillMatcher;
use submission::{check_resume_text, check_submission};

#[derive(Debug, Error)]
pub enum CvValidationError {
    #[error("Missing credential for the text-generation service: {0}")]
    MissingServiceCredential(String),

    #[error("Malformed text-generation response: {0}")]
    MalformedServiceResponse(String),

    #[error("Text-generation call failed: {0}")]
    ServiceCallFailure(#[from] LlmError),

    #[error("Invalid submission: {0}")]
    InvalidSubmission(String),

    #[error("Resume text too large: {length} characters (max {max})")]
    ResumeTooLarge { length: usize, max: usize },
}

/// Deterministic cross-checks computed locally from the service's extracted
/// values. Logged for diagnostics; they never change the verdict.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalChecks {
    pub skills_coverage: f64,
    pub skills_match: bool,
    pub resume_years: Option<f64>,
    pub experience_within_tolerance: Option<bool>,
}

/// Stateless validation engine. Cheap to share behind an `Arc`; every call
/// reads the same immutable config.
pub struct CvValidationEngine {
    generator: Arc<dyn TextGenerator>,
    config: Arc<ValidationConfig>,
    prompt_builder: PromptBuilder,
}

impl CvValidationEngine {
    /// Engine using the stock prompt template.
    pub fn new(generator: Arc<dyn TextGenerator>, config: Arc<ValidationConfig>) -> Self {
        let prompt_builder = PromptBuilder::new(
            CV_VALIDATION_PROMPT_TEMPLATE,
            config.experience_tolerance,
            config.fresher_threshold,
        );
        Self::with_prompt_builder(generator, config, prompt_builder)
    }

    pub fn with_prompt_builder(
        generator: Arc<dyn TextGenerator>,
        config: Arc<ValidationConfig>,
        prompt_builder: PromptBuilder,
    ) -> Self {
        Self {
            generator,
            config,
            prompt_builder,
        }
    }

    pub fn skill_matcher(&self) -> SkillMatcher<'_> {
        SkillMatcher::new(&self.config.skill_synonyms)
    }

    pub fn duration_parser(&self) -> DurationParser {
        DurationParser::new(self.config.reference_month)
    }

    /// Runs the full pipeline for one submission.
    pub async fn validate(
        &self,
        form: &FormSubmission,
        resume_text: &str,
    ) -> Result<ValidationVerdict, CvValidationError> {
        check_submission(form)?;
        check_resume_text(resume_text, self.config.max_resume_chars)?;

        let prompt = self.prompt_builder.build(form, resume_text);
        debug!(
            "Sending validation prompt ({} chars, resume {} chars)",
            prompt.len(),
            resume_text.len()
        );

        let reply = self.generator.generate(&prompt).await?;
        debug!("Received validation reply ({} chars)", reply.len());

        let assessments = parse_assessments(&reply)?;
        let validity = DecisionEngine::new(&self.config).decide(form, &assessments);
        let mismatches = report_mismatches(form, &assessments);

        let local = self.local_checks(form, &assessments);
        debug!(?validity, ?local, "Validation decision computed");

        info!(
            "CV validation finished: is_valid={}, confidence={:.2}, mismatches={}",
            validity.overall,
            assessments.overall_confidence,
            mismatches.len()
        );

        Ok(ValidationVerdict {
            is_valid: validity.overall,
            mismatches,
            confidence_score: assessments.overall_confidence,
            summary: assessments.summary,
        })
    }

    /// Re-derives skill coverage and experience tolerance from the values the
    /// service extracted, using the local matcher and duration parser.
    pub fn local_checks(&self, form: &FormSubmission, set: &FieldAssessmentSet) -> LocalChecks {
        let matcher = self.skill_matcher();
        let resume_skills = match &set.skills.extracted_value {
            Some(FieldValue::List(items)) => items.clone(),
            Some(FieldValue::Text(text)) => text.split(',').map(|s| s.trim().to_string()).collect(),
            _ => Vec::new(),
        };
        let skills_coverage = matcher.coverage(form.provided_skills(), &resume_skills);

        let resume_years = match &set.experience.extracted_value {
            Some(FieldValue::Number(years)) => Some(*years),
            Some(FieldValue::Text(text)) => text
                .trim()
                .parse::<f64>()
                .ok()
                .or_else(|| Some(self.duration_parser().years(text))),
            _ => None,
        };
        let experience_within_tolerance = resume_years.map(|years| {
            DecisionEngine::new(&self.config)
                .experience_within_tolerance(form.years_experience, years)
        });

        LocalChecks {
            skills_coverage,
            skills_match: matcher.skills_match(form.provided_skills(), &resume_skills),
            resume_years,
            experience_within_tolerance,
        }
    }
}
