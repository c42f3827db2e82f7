//! Structured analysis results and their hand-authored defaults.
//!
//! Every record is schema-complete. The `fallback()` values are returned
//! verbatim whenever the model's output cannot be coerced into the shape.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Resume analysis
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillsBreakdown {
    pub technical_skills: i64,
    pub soft_skills: i64,
    pub industry_knowledge: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeAnalysis {
    pub overall_score: i64,
    pub skills_score: i64,
    pub experience_level: String,
    pub skills_breakdown: SkillsBreakdown,
    pub recommendations: Vec<String>,
}

impl ResumeAnalysis {
    pub fn fallback() -> Self {
        Self {
            overall_score: 75,
            skills_score: 80,
            experience_level: "Mid-Level".to_string(),
            skills_breakdown: SkillsBreakdown {
                technical_skills: 75,
                soft_skills: 70,
                industry_knowledge: 65,
            },
            recommendations: strings(&[
                "Focus on adding more specific achievements",
                "Include metrics and numbers to quantify impact",
                "Highlight leadership and collaboration experiences",
            ]),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Job match
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub skills: i64,
    pub experience: i64,
    pub education: i64,
    pub culture_fit: i64,
}

/// `match_score` is passed through as the model sent it; no range clamping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobMatch {
    pub match_score: i64,
    pub category_scores: CategoryScores,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}

impl JobMatch {
    pub fn fallback() -> Self {
        Self {
            match_score: 70,
            category_scores: CategoryScores {
                skills: 75,
                experience: 65,
                education: 70,
                culture_fit: 60,
            },
            strengths: strings(&[
                "Good foundational skills",
                "Relevant educational background",
            ]),
            improvements: strings(&[
                "Gain more industry experience",
                "Develop missing technical skills",
            ]),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Skill gap
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGap {
    pub required_skills: Vec<String>,
    pub current_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub learning_path: Vec<String>,
}

impl SkillGap {
    pub fn fallback() -> Self {
        Self {
            required_skills: strings(&[
                "Python",
                "SQL",
                "Machine Learning",
                "Data Visualization",
            ]),
            current_skills: strings(&["Python", "SQL"]),
            missing_skills: strings(&["Machine Learning", "Data Visualization"]),
            learning_path: strings(&[
                "Take online course in Machine Learning fundamentals",
                "Learn data visualization with Tableau or Power BI",
                "Build portfolio projects using these skills",
            ]),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Interview questions
// ────────────────────────────────────────────────────────────────────────────

/// Nominally 5 technical, 5 behavioral and 3 company questions. Counts are
/// not enforced on model output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewQuestions {
    pub technical_questions: Vec<String>,
    pub behavioral_questions: Vec<String>,
    pub company_questions: Vec<String>,
}

impl InterviewQuestions {
    pub fn fallback() -> Self {
        Self {
            technical_questions: strings(&[
                "Explain your experience with the technologies mentioned in your resume",
                "Describe a challenging technical problem you solved recently",
                "How do you stay updated with the latest technologies in your field?",
                "What development methodologies have you worked with?",
                "Can you explain your experience with version control systems?",
            ]),
            behavioral_questions: strings(&[
                "Tell me about a time you worked in a team under pressure",
                "Describe a situation where you had to learn something new quickly",
                "How do you handle conflicting priorities?",
                "Tell me about a time you made a mistake and how you handled it",
                "Describe your approach to mentoring junior team members",
            ]),
            company_questions: strings(&[
                "Why are you interested in this type of role at our company?",
                "What do you know about our industry and recent trends?",
                "How do you see yourself contributing to our company's goals?",
            ]),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::coerce::coerce;
    use serde_json::json;

    #[test]
    fn test_resume_analysis_default_literal() {
        let expected = json!({
            "overall_score": 75,
            "skills_score": 80,
            "experience_level": "Mid-Level",
            "skills_breakdown": {
                "technical_skills": 75,
                "soft_skills": 70,
                "industry_knowledge": 65
            },
            "recommendations": [
                "Focus on adding more specific achievements",
                "Include metrics and numbers to quantify impact",
                "Highlight leadership and collaboration experiences"
            ]
        });
        assert_eq!(serde_json::to_value(ResumeAnalysis::fallback()).unwrap(), expected);
    }

    #[test]
    fn test_job_match_default_literal() {
        let expected = json!({
            "match_score": 70,
            "category_scores": {
                "skills": 75,
                "experience": 65,
                "education": 70,
                "culture_fit": 60
            },
            "strengths": ["Good foundational skills", "Relevant educational background"],
            "improvements": ["Gain more industry experience", "Develop missing technical skills"]
        });
        assert_eq!(serde_json::to_value(JobMatch::fallback()).unwrap(), expected);
    }

    #[test]
    fn test_skill_gap_default_literal() {
        let expected = json!({
            "required_skills": ["Python", "SQL", "Machine Learning", "Data Visualization"],
            "current_skills": ["Python", "SQL"],
            "missing_skills": ["Machine Learning", "Data Visualization"],
            "learning_path": [
                "Take online course in Machine Learning fundamentals",
                "Learn data visualization with Tableau or Power BI",
                "Build portfolio projects using these skills"
            ]
        });
        assert_eq!(serde_json::to_value(SkillGap::fallback()).unwrap(), expected);
    }

    #[test]
    fn test_interview_questions_default_literal() {
        let expected = json!({
            "technical_questions": [
                "Explain your experience with the technologies mentioned in your resume",
                "Describe a challenging technical problem you solved recently",
                "How do you stay updated with the latest technologies in your field?",
                "What development methodologies have you worked with?",
                "Can you explain your experience with version control systems?"
            ],
            "behavioral_questions": [
                "Tell me about a time you worked in a team under pressure",
                "Describe a situation where you had to learn something new quickly",
                "How do you handle conflicting priorities?",
                "Tell me about a time you made a mistake and how you handled it",
                "Describe your approach to mentoring junior team members"
            ],
            "company_questions": [
                "Why are you interested in this type of role at our company?",
                "What do you know about our industry and recent trends?",
                "How do you see yourself contributing to our company's goals?"
            ]
        });
        let questions = InterviewQuestions::fallback();
        assert_eq!(questions.technical_questions.len(), 5);
        assert_eq!(questions.behavioral_questions.len(), 5);
        assert_eq!(questions.company_questions.len(), 3);
        assert_eq!(serde_json::to_value(questions).unwrap(), expected);
    }

    #[test]
    fn test_job_match_score_is_not_clamped() {
        let parsed: JobMatch = serde_json::from_value(json!({
            "match_score": 142,
            "category_scores": {"skills": -5, "experience": 0, "education": 0, "culture_fit": 0},
            "strengths": [],
            "improvements": []
        }))
        .unwrap();
        assert_eq!(parsed.match_score, 142);
        assert_eq!(parsed.category_scores.skills, -5);
    }

    #[test]
    fn test_fractional_score_falls_back_to_full_default() {
        let raw = r#"{
            "overall_score": 85.0,
            "skills_score": 90,
            "experience_level": "Senior",
            "skills_breakdown": {"technical_skills": 85, "soft_skills": 80, "industry_knowledge": 75},
            "recommendations": ["Add metrics"]
        }"#;
        let coerced = coerce(raw, ResumeAnalysis::fallback());
        assert!(coerced.is_fallback());
        assert_eq!(coerced.into_inner(), ResumeAnalysis::fallback());

        let whole = raw.replace("85.0", "85");
        let parsed = coerce(&whole, ResumeAnalysis::fallback()).into_inner();
        assert_eq!(parsed.overall_score, 85);
        assert_eq!(parsed.experience_level, "Senior");
    }
}
