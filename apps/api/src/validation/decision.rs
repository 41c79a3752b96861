//! Decision Engine — applies the configured confidence thresholds to the
//! service's per-field assessments and produces the pass/fail decision.
//!
//! Only name, email and experience (plus the overall confidence) gate the
//! verdict. Phone and skills validity are computed and reported but never
//! block a submission.

use crate::config::ValidationConfig;
use crate::validation::models::{FieldAssessment, FieldAssessmentSet, FormSubmission};

/// Minimum confidence for the partial-name rule to apply.
const NAME_SUBSET_MIN_CONFIDENCE: f64 = 0.7;

/// Threshold-adjusted validity of each field plus the overall decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldValidity {
    pub name: bool,
    pub email: bool,
    pub phone: bool,
    pub experience: bool,
    pub skills: bool,
    pub overall: bool,
}

pub struct DecisionEngine<'a> {
    config: &'a ValidationConfig,
}

impl<'a> DecisionEngine<'a> {
    pub fn new(config: &'a ValidationConfig) -> Self {
        Self { config }
    }

    pub fn decide(&self, form: &FormSubmission, set: &FieldAssessmentSet) -> FieldValidity {
        let config = self.config;

        let name = self.name_valid(form, &set.name);
        let email = matches_above(&set.email, config.email_threshold);
        // Phone is optional: a reported mismatch is tolerated.
        let phone = !set.phone.is_match || set.phone.confidence >= config.phone_threshold;
        let experience = matches_above(&set.experience, config.experience_threshold);
        let skills = matches_above(&set.skills, config.skills_threshold);

        let overall =
            name && email && experience && set.overall_confidence >= config.overall_threshold;

        FieldValidity {
            name,
            email,
            phone,
            experience,
            skills,
            overall,
        }
    }

    fn name_valid(&self, form: &FormSubmission, assessment: &FieldAssessment) -> bool {
        let resume_name = assessment
            .extracted_value
            .as_ref()
            .and_then(|v| v.as_text());

        let accepted = assessment.is_match
            || resume_name.is_some_and(|resume_name| {
                is_name_subset(&form.full_name, resume_name, assessment.confidence)
            });

        accepted && assessment.confidence >= self.config.name_threshold
    }

    /// Experience counts as matching when both sides are freshers, or when
    /// they differ by no more than the configured tolerance.
    pub fn experience_within_tolerance(&self, form_years: f64, resume_years: f64) -> bool {
        let fresher = self.config.fresher_threshold;
        if form_years <= fresher && resume_years <= fresher {
            return true;
        }
        (form_years - resume_years).abs() <= self.config.experience_tolerance
    }
}

fn matches_above(assessment: &FieldAssessment, threshold: f64) -> bool {
    assessment.is_match && assessment.confidence >= threshold
}

/// True when every token of one name appears in the other (either direction)
/// and the service is at least moderately confident.
pub fn is_name_subset(form_name: &str, resume_name: &str, confidence: f64) -> bool {
    let form_parts = name_tokens(form_name);
    let resume_parts = name_tokens(resume_name);

    if form_parts.is_empty() || resume_parts.is_empty() {
        return false;
    }

    let form_in_resume = form_parts.iter().all(|p| resume_parts.contains(p));
    let resume_in_form = resume_parts.iter().all(|p| form_parts.contains(p));

    (form_in_resume || resume_in_form) && confidence >= NAME_SUBSET_MIN_CONFIDENCE
}

fn name_tokens(name: &str) -> Vec<String> {
    name.split_whitespace().map(str::to_lowercase).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::models::FieldValue;

    fn assessment(is_match: bool, confidence: f64, value: Option<FieldValue>) -> FieldAssessment {
        FieldAssessment {
            is_match,
            confidence,
            extracted_value: value,
            reason: None,
        }
    }

    fn form() -> FormSubmission {
        FormSubmission {
            full_name: "Manohar Sai".to_string(),
            email: "manohar@example.com".to_string(),
            phone: None,
            years_experience: 2.0,
            skills: None,
        }
    }

    fn passing_set() -> FieldAssessmentSet {
        FieldAssessmentSet {
            name: assessment(true, 0.95, Some(FieldValue::Text("Manohar Sai".to_string()))),
            email: assessment(true, 0.99, None),
            phone: assessment(true, 0.9, None),
            experience: assessment(true, 0.85, Some(FieldValue::Number(2.0))),
            skills: assessment(true, 0.8, None),
            overall_confidence: 0.9,
            summary: String::new(),
        }
    }

    #[test]
    fn test_all_fields_confident_passes() {
        let config = ValidationConfig::default();
        let validity = DecisionEngine::new(&config).decide(&form(), &passing_set());
        assert_eq!(
            validity,
            FieldValidity {
                name: true,
                email: true,
                phone: true,
                experience: true,
                skills: true,
                overall: true,
            }
        );
    }

    #[test]
    fn test_name_subset_with_confidence_point_seven_five() {
        assert!(is_name_subset("Manohar Sai", "Phani Manohar Sai", 0.75));
        assert!(is_name_subset("PHANI manohar sai", "Manohar Sai", 0.75));
        assert!(!is_name_subset("Manohar Sai", "Phani Manohar Sai", 0.65));
        assert!(!is_name_subset("Manohar Kumar", "Phani Manohar Sai", 0.9));
        assert!(!is_name_subset("", "Phani", 0.9));
    }

    #[test]
    fn test_subset_name_still_needs_name_threshold() {
        let config = ValidationConfig::default();
        let engine = DecisionEngine::new(&config);
        let mut set = passing_set();

        set.name = assessment(false, 0.75, Some(FieldValue::Text("Phani Manohar Sai".into())));
        assert!(!engine.decide(&form(), &set).name, "0.75 is below the 0.8 name threshold");

        set.name = assessment(false, 0.85, Some(FieldValue::Text("Phani Manohar Sai".into())));
        assert!(engine.decide(&form(), &set).name);
    }

    #[test]
    fn test_subset_name_with_lowered_threshold() {
        let config = ValidationConfig {
            name_threshold: 0.7,
            ..ValidationConfig::default()
        };
        let mut set = passing_set();
        set.name = assessment(false, 0.75, Some(FieldValue::Text("Phani Manohar Sai".into())));
        let validity = DecisionEngine::new(&config).decide(&form(), &set);
        assert!(validity.name);
        assert!(validity.overall);
    }

    #[test]
    fn test_email_below_threshold_fails_overall() {
        let config = ValidationConfig::default();
        let mut set = passing_set();
        set.email = assessment(true, 0.85, None);
        let validity = DecisionEngine::new(&config).decide(&form(), &set);
        assert!(!validity.email);
        assert!(!validity.overall);
    }

    #[test]
    fn test_phone_rule_tolerates_mismatch() {
        let config = ValidationConfig::default();
        let engine = DecisionEngine::new(&config);
        let mut set = passing_set();

        set.phone = assessment(false, 0.2, None);
        assert!(engine.decide(&form(), &set).phone);

        set.phone = assessment(true, 0.5, None);
        assert!(!engine.decide(&form(), &set).phone);
    }

    #[test]
    fn test_phone_and_skills_do_not_gate_overall() {
        let config = ValidationConfig::default();
        let mut set = passing_set();
        set.phone = assessment(true, 0.1, None);
        set.skills = assessment(false, 0.2, None);
        let validity = DecisionEngine::new(&config).decide(&form(), &set);
        assert!(!validity.phone);
        assert!(!validity.skills);
        assert!(validity.overall);
    }

    #[test]
    fn test_experience_mismatch_fails_overall() {
        let config = ValidationConfig::default();
        let mut set = passing_set();
        set.experience = assessment(false, 0.9, Some(FieldValue::Number(6.0)));
        assert!(!DecisionEngine::new(&config).decide(&form(), &set).overall);
    }

    #[test]
    fn test_low_overall_confidence_fails() {
        let config = ValidationConfig::default();
        let mut set = passing_set();
        set.overall_confidence = 0.69;
        let validity = DecisionEngine::new(&config).decide(&form(), &set);
        assert!(validity.name && validity.email && validity.experience);
        assert!(!validity.overall);
    }

    #[test]
    fn test_experience_tolerance() {
        let config = ValidationConfig::default();
        let engine = DecisionEngine::new(&config);
        assert!(engine.experience_within_tolerance(3.0, 3.5));
        assert!(engine.experience_within_tolerance(3.0, 2.5));
        assert!(!engine.experience_within_tolerance(3.0, 3.6));
        assert!(engine.experience_within_tolerance(0.0, 0.1));
        assert!(engine.experience_within_tolerance(0.1, 0.05));
        assert!(!engine.experience_within_tolerance(0.0, 0.8));
    }
}
