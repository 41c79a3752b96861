use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Inbound
// ────────────────────────────────────────────────────────────────────────────

/// Candidate data as typed into the web form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSubmission {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub years_experience: f64,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
}

impl FormSubmission {
    /// The phone number, if one was actually entered. Blank counts as absent.
    pub fn provided_phone(&self) -> Option<&str> {
        self.phone
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }

    /// The submitted skills, or an empty slice when none were given.
    pub fn provided_skills(&self) -> &[String] {
        self.skills.as_deref().unwrap_or(&[])
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Service assessments
// ────────────────────────────────────────────────────────────────────────────

/// A value pulled out of the resume, or a form value echoed into a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    List(Vec<String>),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Collapses list values into a comma-separated string for display.
    pub fn flattened(&self) -> FieldValue {
        match self {
            FieldValue::List(items) => FieldValue::Text(items.join(", ")),
            other => other.clone(),
        }
    }
}

/// Per-field verdict returned by the text-generation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldAssessment {
    pub is_match: bool,
    pub confidence: f64,
    #[serde(rename = "cvValue", default)]
    pub extracted_value: Option<FieldValue>,
    #[serde(default)]
    pub reason: Option<String>,
}

/// The fully decoded service reply. Built once by the response parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldAssessmentSet {
    pub name: FieldAssessment,
    pub email: FieldAssessment,
    pub phone: FieldAssessment,
    pub experience: FieldAssessment,
    pub skills: FieldAssessment,
    pub overall_confidence: f64,
    pub summary: String,
}

impl FieldAssessmentSet {
    pub fn fields(&self) -> [(&'static str, &FieldAssessment); 5] {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("experience", &self.experience),
            ("skills", &self.skills),
        ]
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Outbound
// ────────────────────────────────────────────────────────────────────────────

/// One field where the resume disagrees with the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MismatchRecord {
    pub field_name: String,
    pub form_value: FieldValue,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub resume_value: Option<FieldValue>,
    pub confidence: f64,
    pub reason: String,
}

/// Final outcome of a validation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationVerdict {
    pub is_valid: bool,
    pub mismatches: Vec<MismatchRecord>,
    pub confidence_score: f64,
    pub summary: String,
}
