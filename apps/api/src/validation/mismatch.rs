use crate::validation::models::{
    FieldAssessment, FieldAssessmentSet, FieldValue, FormSubmission, MismatchRecord,
};

/// Lists every field whose raw `isMatch` flag is false.
///
/// This deliberately ignores the threshold-adjusted validity from the decision
/// engine. Phone is only reported when the form supplied one; skills only when
/// the form supplied a non-empty list.
pub fn report_mismatches(form: &FormSubmission, set: &FieldAssessmentSet) -> Vec<MismatchRecord> {
    let mut mismatches = Vec::new();

    push_if_mismatched(
        &mut mismatches,
        "fullName",
        FieldValue::Text(form.full_name.clone()),
        &set.name,
        "Name mismatch detected",
    );

    push_if_mismatched(
        &mut mismatches,
        "email",
        FieldValue::Text(form.email.clone()),
        &set.email,
        "Email mismatch detected",
    );

    if let Some(phone) = form.provided_phone() {
        push_if_mismatched(
            &mut mismatches,
            "phone",
            FieldValue::Text(phone.to_string()),
            &set.phone,
            "Phone mismatch detected",
        );
    }

    push_if_mismatched(
        &mut mismatches,
        "yearsExperience",
        FieldValue::Number(form.years_experience),
        &set.experience,
        "Experience mismatch detected",
    );

    let skills = form.provided_skills();
    if !skills.is_empty() {
        push_if_mismatched(
            &mut mismatches,
            "skills",
            FieldValue::Text(skills.join(", ")),
            &set.skills,
            "Skills mismatch detected",
        );
    }

    mismatches
}

fn push_if_mismatched(
    out: &mut Vec<MismatchRecord>,
    field_name: &str,
    form_value: FieldValue,
    assessment: &FieldAssessment,
    default_reason: &str,
) {
    if assessment.is_match {
        return;
    }

    let reason = assessment
        .reason
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .unwrap_or(default_reason);

    out.push(MismatchRecord {
        field_name: field_name.to_string(),
        form_value,
        resume_value: assessment.extracted_value.as_ref().map(FieldValue::flattened),
        confidence: assessment.confidence,
        reason: reason.to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assessment(is_match: bool, reason: Option<&str>) -> FieldAssessment {
        FieldAssessment {
            is_match,
            confidence: 0.3,
            extracted_value: None,
            reason: reason.map(String::from),
        }
    }

    fn all_mismatched() -> FieldAssessmentSet {
        FieldAssessmentSet {
            name: assessment(false, Some("Different surname")),
            email: assessment(false, None),
            phone: assessment(false, None),
            experience: assessment(false, Some("")),
            skills: FieldAssessment {
                extracted_value: Some(FieldValue::List(vec!["Go".into(), "C".into()])),
                ..assessment(false, None)
            },
            overall_confidence: 0.2,
            summary: String::new(),
        }
    }

    fn full_form() -> FormSubmission {
        FormSubmission {
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: Some("+441234567890".to_string()),
            years_experience: 4.0,
            skills: Some(vec!["Rust".to_string(), "SQL".to_string()]),
        }
    }

    #[test]
    fn test_every_mismatched_field_is_reported() {
        let records = report_mismatches(&full_form(), &all_mismatched());
        let names: Vec<&str> = records.iter().map(|r| r.field_name.as_str()).collect();
        assert_eq!(names, ["fullName", "email", "phone", "yearsExperience", "skills"]);
    }

    #[test]
    fn test_reasons_fall_back_to_defaults() {
        let records = report_mismatches(&full_form(), &all_mismatched());
        assert_eq!(records[0].reason, "Different surname");
        assert_eq!(records[1].reason, "Email mismatch detected");
        assert_eq!(records[3].reason, "Experience mismatch detected");
    }

    #[test]
    fn test_skill_lists_are_flattened() {
        let records = report_mismatches(&full_form(), &all_mismatched());
        let skills = records.last().unwrap();
        assert_eq!(skills.form_value, FieldValue::Text("Rust, SQL".to_string()));
        assert_eq!(skills.resume_value, Some(FieldValue::Text("Go, C".to_string())));
    }

    #[test]
    fn test_optional_fields_skipped_when_not_submitted() {
        let form = FormSubmission {
            phone: None,
            skills: Some(vec![]),
            ..full_form()
        };
        let records = report_mismatches(&form, &all_mismatched());
        let names: Vec<&str> = records.iter().map(|r| r.field_name.as_str()).collect();
        assert_eq!(names, ["fullName", "email", "yearsExperience"]);
    }

    #[test]
    fn test_matching_fields_are_never_reported() {
        let mut set = all_mismatched();
        set.name.is_match = true;
        set.skills.is_match = true;
        let records = report_mismatches(&full_form(), &set);
        assert!(records.iter().all(|r| r.field_name != "fullName" && r.field_name != "skills"));
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_experience_form_value_is_numeric() {
        let records = report_mismatches(&full_form(), &all_mismatched());
        assert_eq!(records[3].form_value, FieldValue::Number(4.0));
    }
}
