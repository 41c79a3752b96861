//! Server-side copies of the web form's input rules. Run before any LLM call so
//! obviously bad submissions never cost a round trip.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::validation::models::FormSubmission;
use crate::validation::CvValidationError;

const MAX_NAME_CHARS: usize = 100;
const MAX_EMAIL_CHARS: usize = 255;
const MAX_YEARS_EXPERIENCE: f64 = 30.0;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));
static PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[1-9]\d{0,15}$").expect("phone pattern"));

pub fn check_submission(form: &FormSubmission) -> Result<(), CvValidationError> {
    let name = form.full_name.trim();
    if name.is_empty() {
        return Err(invalid("fullName is required"));
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(invalid(format!(
            "fullName must be at most {MAX_NAME_CHARS} characters"
        )));
    }

    if form.email.chars().count() > MAX_EMAIL_CHARS || !EMAIL.is_match(form.email.trim()) {
        return Err(invalid("email must be a valid email address"));
    }

    if let Some(phone) = form.provided_phone() {
        if !PHONE.is_match(phone) {
            return Err(invalid("phone must be a valid phone number"));
        }
    }

    let years = form.years_experience;
    if !years.is_finite() || !(0.0..=MAX_YEARS_EXPERIENCE).contains(&years) {
        return Err(invalid(format!(
            "yearsExperience must be between 0 and {MAX_YEARS_EXPERIENCE}"
        )));
    }

    if form.provided_skills().iter().any(|s| s.trim().is_empty()) {
        return Err(invalid("skills cannot contain empty entries"));
    }

    Ok(())
}

/// Rejects empty resumes and resumes longer than `max_chars` characters.
pub fn check_resume_text(text: &str, max_chars: usize) -> Result<(), CvValidationError> {
    if text.trim().is_empty() {
        return Err(invalid("resume text is empty"));
    }

    let length = text.chars().count();
    if length > max_chars {
        return Err(CvValidationError::ResumeTooLarge {
            length,
            max: max_chars,
        });
    }

    Ok(())
}

fn invalid(message: impl Into<String>) -> CvValidationError {
    CvValidationError::InvalidSubmission(message.into())
}
