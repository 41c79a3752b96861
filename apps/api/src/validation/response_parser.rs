//! Response Parser — pulls the JSON object out of a free-form LLM reply and
//! decodes it into a typed `FieldAssessmentSet`. All-or-nothing: any missing
//! key or out-of-range confidence rejects the whole reply.

use tracing::warn;

use crate::validation::models::FieldAssessmentSet;
use crate::validation::CvValidationError;

pub fn parse_assessments(raw: &str) -> Result<FieldAssessmentSet, CvValidationError> {
    let payload = extract_json_object(raw).ok_or_else(|| {
        warn!("LLM reply contained no JSON object ({} chars)", raw.len());
        CvValidationError::MalformedServiceResponse("no JSON object found in reply".to_string())
    })?;

    let set: FieldAssessmentSet = serde_json::from_str(payload).map_err(|e| {
        warn!("LLM reply failed to decode: {e}");
        CvValidationError::MalformedServiceResponse(e.to_string())
    })?;

    check_confidences(&set)?;
    Ok(set)
}

/// The span from the first `{` to the last `}`, inclusive.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

fn check_confidences(set: &FieldAssessmentSet) -> Result<(), CvValidationError> {
    let in_range = |value: f64| (0.0..=1.0).contains(&value);

    for (field, assessment) in set.fields() {
        if !in_range(assessment.confidence) {
            return Err(CvValidationError::MalformedServiceResponse(format!(
                "{field}.confidence must be within [0, 1], got {}",
                assessment.confidence
            )));
        }
    }

    if !in_range(set.overall_confidence) {
        return Err(CvValidationError::MalformedServiceResponse(format!(
            "overallConfidence must be within [0, 1], got {}",
            set.overall_confidence
        )));
    }

    Ok(())
}
