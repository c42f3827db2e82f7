//! Fact Extractor: pulls contact info, skills, education signals and
//! experience out of free resume text with fixed regexes and vocabularies.
//!
//! Total: every input yields a `ResumeFacts`. Missing signals become sentinels.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const NOT_FOUND: &str = "not found";
pub const NOT_SPECIFIED: &str = "not specified";

pub const SKILL_VOCABULARY: &[&str] = &[
    "python",
    "java",
    "javascript",
    "react",
    "node.js",
    "sql",
    "nosql",
    "aws",
    "docker",
    "kubernetes",
    "machine learning",
    "deep learning",
    "tensorflow",
    "pytorch",
    "data analysis",
    "tableau",
    "power bi",
    "agile",
    "scrum",
    "devops",
    "ci/cd",
    "git",
    "rest api",
    "graphql",
    "html",
    "css",
    "typescript",
    "angular",
    "vue",
    "mongodb",
    "postgresql",
    "mysql",
    "redis",
    "linux",
    "unix",
    "bash",
    "shell",
    "powershell",
];

pub const EDUCATION_VOCABULARY: &[&str] = &[
    "bachelor",
    "master",
    "phd",
    "mba",
    "degree",
    "university",
    "college",
    "b.sc",
    "m.sc",
];

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid email regex")
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[+(]?[1-9][0-9 .\-()]{8,}[0-9]").expect("valid phone regex"));

static EXPERIENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)\s*(?:years?|yrs?)").expect("valid experience regex"));

static SKILL_MATCHERS: Lazy<Vec<(&'static str, Regex)>> =
    Lazy::new(|| compile_vocabulary(SKILL_VOCABULARY));

static EDUCATION_MATCHERS: Lazy<Vec<(&'static str, Regex)>> =
    Lazy::new(|| compile_vocabulary(EDUCATION_VOCABULARY));

/// One case-insensitive whole-word matcher per term. "Whole word" means no
/// word character directly before or after, which also works for terms that
/// start or end with punctuation (`ci/cd`, `b.sc`).
fn compile_vocabulary(terms: &[&'static str]) -> Vec<(&'static str, Regex)> {
    terms
        .iter()
        .map(|term| {
            let pattern = format!(r"(?i)(?:^|\W){}(?:\W|$)", regex::escape(term));
            (*term, Regex::new(&pattern).expect("escaped vocabulary term"))
        })
        .collect()
}

/// Structured facts extracted from one resume. Created once per parse call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeFacts {
    pub email: String,
    pub phone: String,
    /// Vocabulary terms in vocabulary order, lower-cased, no duplicates.
    pub skills: Vec<String>,
    pub education_signals: Vec<String>,
    /// Digits of the first "N years" mention, or `NOT_SPECIFIED`.
    pub experience_years: String,
    pub raw_text: String,
    pub word_count: usize,
    pub character_count: usize,
}

impl ResumeFacts {
    pub fn has_email(&self) -> bool {
        self.email != NOT_FOUND
    }

    pub fn has_phone(&self) -> bool {
        self.phone != NOT_FOUND
    }
}

pub fn extract(text: &str) -> ResumeFacts {
    let email = EMAIL_RE
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| NOT_FOUND.to_string());

    let phone = PHONE_RE
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| NOT_FOUND.to_string());

    // Only the first mention counts, even if a later one is more accurate.
    let experience_years = EXPERIENCE_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| NOT_SPECIFIED.to_string());

    ResumeFacts {
        email,
        phone,
        skills: matched_terms(&SKILL_MATCHERS, text),
        education_signals: matched_terms(&EDUCATION_MATCHERS, text),
        experience_years,
        raw_text: text.to_string(),
        word_count: text.split_whitespace().count(),
        character_count: text.chars().count(),
    }
}

fn matched_terms(matchers: &[(&'static str, Regex)], text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for (term, re) in matchers {
        if re.is_match(text) && !found.iter().any(|f| f == term) {
            found.push(term.to_string());
        }
    }
    found
}
