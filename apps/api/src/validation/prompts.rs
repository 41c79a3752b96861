// Prompt template and renderer for CV validation.
// The template is data: the engine receives a `PromptBuilder` so tests can swap it.

use crate::validation::models::FormSubmission;

/// Default validation prompt. Placeholders are `{name}` tokens; everything
/// else, including the JSON schema braces, is copied through untouched.
pub const CV_VALIDATION_PROMPT_TEMPLATE: &str = r#"You are an expert CV validation assistant. Your task is to compare form data with CV content and determine if they match.

CV Content:
{cvText}

Form Data:
- Full Name: {fullName}
- Email: {email}
- Phone: {phone}
- Years of Experience: {yearsExperience}
- Skills: {skills}

Validation Rules:
1. Names: Case-insensitive match. A partial name is acceptable when every part of the shorter name appears in the longer one (e.g. "Manohar Sai" matches "Phani Manohar Sai").
2. Email: Exact match required.
3. Phone: Exact match required if provided in the form.
4. Experience: ±{experienceTolerance} years tolerance. Candidates with 0 to {fresherThreshold} years count as freshers and match each other.
5. Skills: Semantic matching (React.js = ReactJS = React, K8s = Kubernetes).

Analyze each field and provide:
1. Is the field a match? (true/false)
2. Confidence score (0.0-1.0)
3. Extracted value from the CV (null if not found)
4. Reason for a mismatch (if applicable)

Respond in JSON format only:
{
  "name": {
    "isMatch": boolean,
    "confidence": number,
    "cvValue": string,
    "reason": string
  },
  "email": {
    "isMatch": boolean,
    "confidence": number,
    "cvValue": string,
    "reason": string
  },
  "phone": {
    "isMatch": boolean,
    "confidence": number,
    "cvValue": string,
    "reason": string
  },
  "experience": {
    "isMatch": boolean,
    "confidence": number,
    "cvValue": number,
    "reason": string
  },
  "skills": {
    "isMatch": boolean,
    "confidence": number,
    "cvValue": string[],
    "reason": string
  },
  "overallConfidence": number,
  "summary": string
}
"#;

const NOT_PROVIDED: &str = "Not provided";

/// Renders a submission and resume text into one instruction string.
///
/// Submitted values are embedded verbatim, without escaping.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    template: String,
    experience_tolerance: f64,
    fresher_threshold: f64,
}

impl PromptBuilder {
    pub fn new(
        template: impl Into<String>,
        experience_tolerance: f64,
        fresher_threshold: f64,
    ) -> Self {
        Self {
            template: template.into(),
            experience_tolerance,
            fresher_threshold,
        }
    }

    pub fn build(&self, form: &FormSubmission, resume_text: &str) -> String {
        let years = form.years_experience.to_string();
        let tolerance = self.experience_tolerance.to_string();
        let fresher = self.fresher_threshold.to_string();
        let skills = if form.provided_skills().is_empty() {
            NOT_PROVIDED.to_string()
        } else {
            form.provided_skills().join(", ")
        };

        render(
            &self.template,
            &[
                ("cvText", resume_text),
                ("fullName", &form.full_name),
                ("email", &form.email),
                ("phone", form.provided_phone().unwrap_or(NOT_PROVIDED)),
                ("yearsExperience", &years),
                ("skills", &skills),
                ("experienceTolerance", &tolerance),
                ("fresherThreshold", &fresher),
            ],
        )
    }
}

/// Single-pass placeholder substitution. Substituted text is never rescanned,
/// so `{email}` inside a resume stays literal.
fn render(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + 256);
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];

        let hit = values.iter().find(|(key, _)| {
            tail.strip_prefix(key)
                .is_some_and(|after| after.starts_with('}'))
        });

        match hit {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len() + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> PromptBuilder {
        PromptBuilder::new(CV_VALIDATION_PROMPT_TEMPLATE, 0.5, 0.1)
    }

    fn form() -> FormSubmission {
        FormSubmission {
            full_name: "Manohar Sai".to_string(),
            email: "manohar@example.com".to_string(),
            phone: Some("+919876543210".to_string()),
            years_experience: 2.5,
            skills: Some(vec!["React".to_string(), "Node.js".to_string()]),
        }
    }

    #[test]
    fn test_prompt_embeds_form_values_and_resume() {
        let prompt = builder().build(&form(), "Phani Manohar Sai\nReact developer");
        assert!(prompt.contains("- Full Name: Manohar Sai"));
        assert!(prompt.contains("- Email: manohar@example.com"));
        assert!(prompt.contains("- Phone: +919876543210"));
        assert!(prompt.contains("- Years of Experience: 2.5"));
        assert!(prompt.contains("- Skills: React, Node.js"));
        assert!(prompt.contains("Phani Manohar Sai\nReact developer"));
    }

    #[test]
    fn test_prompt_states_rules_and_schema() {
        let prompt = builder().build(&form(), "cv");
        assert!(prompt.contains("Case-insensitive"));
        assert!(prompt.contains("±0.5 years tolerance"));
        assert!(prompt.contains("0 to 0.1 years count as freshers"));
        assert!(prompt.contains("Semantic matching"));
        for key in ["\"isMatch\"", "\"confidence\"", "\"cvValue\"", "\"reason\""] {
            assert!(prompt.contains(key), "schema is missing {key}");
        }
        assert!(prompt.contains("\"overallConfidence\": number"));
        assert!(prompt.contains("\"summary\": string"));
    }

    #[test]
    fn test_missing_optional_fields_render_not_provided() {
        let form = FormSubmission {
            phone: None,
            skills: Some(vec![]),
            ..form()
        };
        let prompt = builder().build(&form, "cv");
        assert!(prompt.contains("- Phone: Not provided"));
        assert!(prompt.contains("- Skills: Not provided"));
    }

    #[test]
    fn test_whole_years_render_without_fraction() {
        let form = FormSubmission {
            years_experience: 3.0,
            ..form()
        };
        let prompt = builder().build(&form, "cv");
        assert!(prompt.contains("- Years of Experience: 3\n"));
    }

    #[test]
    fn test_placeholders_in_resume_are_not_expanded() {
        let prompt = builder().build(&form(), "contact me at {email}");
        assert!(prompt.contains("contact me at {email}"));
    }

    #[test]
    fn test_render_keeps_unknown_braces() {
        let out = render("{a} {\"b\": {c}} {", &[("a", "1"), ("c", "3")]);
        assert_eq!(out, "1 {\"b\": 3} {");
    }

    #[test]
    fn test_custom_template_is_used() {
        let builder = PromptBuilder::new("Check {fullName} <{email}>", 0.5, 0.1);
        assert_eq!(
            builder.build(&form(), "cv"),
            "Check Manohar Sai <manohar@example.com>"
        );
    }
}
