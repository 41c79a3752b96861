//! Skill Matcher — decides whether two skill names denote the same technology,
//! and whether a form's skill list is covered by the skills found in a resume.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Minimum share of form skills that must be found in the resume.
pub const SKILL_COVERAGE_THRESHOLD: f64 = 0.7;

/// Canonical skill families: base term → accepted aliases.
///
/// Keys and aliases are stored lowercased and trimmed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Vec<String>>")]
pub struct SkillSynonyms(BTreeMap<String, BTreeSet<String>>);

impl From<BTreeMap<String, Vec<String>>> for SkillSynonyms {
    fn from(raw: BTreeMap<String, Vec<String>>) -> Self {
        let mut table = BTreeMap::new();
        for (base, aliases) in raw {
            let entry: &mut BTreeSet<String> = table.entry(normalize(&base)).or_default();
            entry.extend(aliases.iter().map(|a| normalize(a)).filter(|a| !a.is_empty()));
        }
        Self(table)
    }
}

impl SkillSynonyms {
    pub fn from_pairs(pairs: &[(&str, &[&str])]) -> Self {
        pairs
            .iter()
            .map(|(base, aliases)| {
                (
                    base.to_string(),
                    aliases.iter().map(|a| a.to_string()).collect(),
                )
            })
            .collect::<BTreeMap<String, Vec<String>>>()
            .into()
    }

    /// Loads a `{"base": ["alias", ...]}` JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read skill synonyms from {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Invalid skill synonyms JSON in {}", path.display()))
    }

    pub fn aliases(&self, base: &str) -> Option<&BTreeSet<String>> {
        self.0.get(base)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Stock synonym table for common technologies.
pub fn default_skill_synonyms() -> SkillSynonyms {
    SkillSynonyms::from_pairs(&[
        ("react", &["reactjs", "react.js", "react js"]),
        ("javascript", &["js", "ecmascript", "es6"]),
        ("typescript", &["ts"]),
        ("node.js", &["nodejs", "node"]),
        ("python", &["py", "python3", "python 3"]),
        ("java", &["java 8", "java 11", "java 17"]),
        ("sql", &["mysql", "postgresql", "postgres", "database"]),
        ("aws", &["amazon web services", "amazon aws"]),
        ("docker", &["containerization", "containers"]),
        ("kubernetes", &["k8s", "kube", "container orchestration"]),
    ])
}

/// Compares skills using exact (case-insensitive) equality plus the synonym table.
#[derive(Debug, Clone)]
pub struct SkillMatcher<'a> {
    synonyms: &'a SkillSynonyms,
}

impl<'a> SkillMatcher<'a> {
    pub fn new(synonyms: &'a SkillSynonyms) -> Self {
        Self { synonyms }
    }

    /// True when both names denote the same technology.
    pub fn matches(&self, left: &str, right: &str) -> bool {
        let left = normalize(left);
        let right = normalize(right);

        if left == right {
            return true;
        }

        self.is_alias_of(&left, &right) || self.is_alias_of(&right, &left)
    }

    fn is_alias_of(&self, base: &str, candidate: &str) -> bool {
        self.synonyms
            .aliases(base)
            .is_some_and(|aliases| aliases.contains(candidate))
    }

    /// Share of form skills with at least one equivalent in the resume skills.
    /// An empty form list is fully covered.
    pub fn coverage(&self, form_skills: &[String], resume_skills: &[String]) -> f64 {
        if form_skills.is_empty() {
            return 1.0;
        }

        let matched = form_skills
            .iter()
            .filter(|form_skill| {
                resume_skills
                    .iter()
                    .any(|resume_skill| self.matches(form_skill, resume_skill))
            })
            .count();

        matched as f64 / form_skills.len() as f64
    }

    pub fn skills_match(&self, form_skills: &[String], resume_skills: &[String]) -> bool {
        self.coverage(form_skills, resume_skills) >= SKILL_COVERAGE_THRESHOLD
    }
}

fn normalize(skill: &str) -> String {
    skill.trim().to_lowercase()
}
