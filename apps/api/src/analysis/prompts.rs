// Analysis prompt templates.
// One fixed template per operation; bump PROMPT_VERSION when any text changes.

pub const PROMPT_VERSION: &str = "v1";

pub const RESUME_ANALYSIS_TEMPLATE: &str = r#"Analyze this resume data and provide constructive feedback in JSON format:

{resume_data}

Return ONLY valid JSON with this exact structure:
{
    "overall_score": 85,
    "skills_score": 90,
    "experience_level": "Mid-Level",
    "skills_breakdown": {
        "technical_skills": 85,
        "soft_skills": 80,
        "industry_knowledge": 75
    },
    "recommendations": [
        "Add more quantifiable achievements",
        "Include specific project outcomes",
        "Expand on leadership experience"
    ]
}"#;

pub const JOB_MATCH_TEMPLATE: &str = r#"Analyze the match between resume and job description. Return ONLY valid JSON:

RESUME: {resume_text}
JOB: {job_description}

JSON structure:
{
    "match_score": 85,
    "category_scores": {
        "skills": 90,
        "experience": 80,
        "education": 85,
        "culture_fit": 75
    },
    "strengths": ["Strong technical skills", "Relevant experience"],
    "improvements": ["Gain leadership experience", "Learn specific technology"]
}"#;

pub const SKILL_GAP_TEMPLATE: &str = r#"Analyze skills gap for target role. Return ONLY valid JSON:

RESUME: {resume_text}
TARGET: {target_role}

JSON structure:
{
    "required_skills": ["Python", "SQL", "ML"],
    "current_skills": ["Python", "SQL"],
    "missing_skills": ["ML", "Data Viz"],
    "learning_path": ["Take ML course", "Build projects"]
}"#;

pub const INTERVIEW_QUESTIONS_TEMPLATE: &str = r#"Generate interview questions. Return ONLY valid JSON:

RESUME: {resume_text}
JOB: {job_description}

JSON structure:
{
    "technical_questions": ["Q1", "Q2", "Q3", "Q4", "Q5"],
    "behavioral_questions": ["Q1", "Q2", "Q3", "Q4", "Q5"],
    "company_questions": ["Q1", "Q2", "Q3"]
}"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateId {
    ResumeAnalysis,
    JobMatch,
    SkillGap,
    InterviewQuestions,
}

impl TemplateId {
    pub fn text(self) -> &'static str {
        match self {
            TemplateId::ResumeAnalysis => RESUME_ANALYSIS_TEMPLATE,
            TemplateId::JobMatch => JOB_MATCH_TEMPLATE,
            TemplateId::SkillGap => SKILL_GAP_TEMPLATE,
            TemplateId::InterviewQuestions => INTERVIEW_QUESTIONS_TEMPLATE,
        }
    }

    pub fn placeholders(self) -> &'static [&'static str] {
        match self {
            TemplateId::ResumeAnalysis => &["resume_data"],
            TemplateId::JobMatch => &["resume_text", "job_description"],
            TemplateId::SkillGap => &["resume_text", "target_role"],
            TemplateId::InterviewQuestions => &["resume_text", "job_description"],
        }
    }

    /// Substitutes `{name}` for each given field in a single pass, so field
    /// values are never re-scanned for placeholders. Unknown names and the
    /// literal JSON braces in the template are left as they are.
    pub fn render(self, fields: &[(&str, &str)]) -> String {
        let template = self.text();
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let tail = &rest[open..];

            let hit = fields.iter().find(|(name, _)| {
                tail.strip_prefix('{')
                    .and_then(|t| t.strip_prefix(*name))
                    .is_some_and(|t| t.starts_with('}'))
            });

            match hit {
                Some((name, value)) => {
                    out.push_str(value);
                    rest = &tail[name.len() + 2..];
                }
                None => {
                    out.push('{');
                    rest = &tail[1..];
                }
            }
        }

        out.push_str(rest);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_template_contains_its_placeholders() {
        for id in [
            TemplateId::ResumeAnalysis,
            TemplateId::JobMatch,
            TemplateId::SkillGap,
            TemplateId::InterviewQuestions,
        ] {
            for name in id.placeholders() {
                assert!(
                    id.text().contains(&format!("{{{name}}}")),
                    "{id:?} is missing {{{name}}}"
                );
            }
            assert!(id.text().contains("JSON"));
        }
    }

    #[test]
    fn test_render_job_match() {
        let prompt = TemplateId::JobMatch.render(&[
            ("resume_text", "Rust engineer, 6 years"),
            ("job_description", "Senior backend role"),
        ]);
        assert!(prompt.contains("RESUME: Rust engineer, 6 years"));
        assert!(prompt.contains("JOB: Senior backend role"));
        assert!(!prompt.contains("{resume_text}"));
        assert!(!prompt.contains("{job_description}"));
        // schema braces survive rendering
        assert!(prompt.contains("\"category_scores\": {"));
    }

    #[test]
    fn test_render_does_not_expand_placeholders_inside_values() {
        let prompt = TemplateId::JobMatch.render(&[
            ("resume_text", "I wrote {job_description} literally"),
            ("job_description", "JD"),
        ]);
        assert!(prompt.contains("RESUME: I wrote {job_description} literally"));
        assert!(prompt.contains("JOB: JD"));
    }

    #[test]
    fn test_render_leaves_missing_fields_untouched() {
        let prompt = TemplateId::SkillGap.render(&[("resume_text", "Python")]);
        assert!(prompt.contains("TARGET: {target_role}"));
    }
}
