use serde::{Deserialize, Serialize};

/// Feedback returned by `POST /api/analyze-resume`.
///
/// Immutable once received; the dashboard holds it until the user asks to
/// analyze another resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub overall_score: u32, // 0 – 100
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub ats_issues: Vec<String>,
    #[serde(default)]
    pub role_alignment_feedback: String,
    #[serde(default)]
    pub optimized_bullets: Vec<String>,
    #[serde(default)]
    pub missing_skills: Vec<String>,
    #[serde(default)]
    pub final_suggestions: String,
    /// Full rewritten resume as markdown.
    #[serde(default)]
    pub optimized_resume_content: String,
}

#[cfg(test)]
pub(crate) fn sample_result(score: u32) -> AnalysisResult {
    AnalysisResult {
        overall_score: score,
        strengths: vec!["Python".to_string(), "FastAPI".to_string()],
        weaknesses: vec!["Documentation".to_string()],
        ats_issues: vec!["Missing keywords".to_string()],
        role_alignment_feedback: "Good fit".to_string(),
        optimized_bullets: vec!["Improved bullet 1".to_string()],
        missing_skills: vec!["Docker".to_string()],
        final_suggestions: "Add more projects".to_string(),
        optimized_resume_content: "# Resume Content".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_full_body() {
        let body = serde_json::json!({
            "overall_score": 95,
            "strengths": ["Integration"],
            "weaknesses": [],
            "ats_issues": [],
            "role_alignment_feedback": "",
            "optimized_bullets": [],
            "missing_skills": [],
            "final_suggestions": "",
            "optimized_resume_content": "Markdown"
        });
        let result: AnalysisResult = serde_json::from_value(body).unwrap();
        assert_eq!(result.overall_score, 95);
        assert_eq!(result.strengths, vec!["Integration"]);
        assert_eq!(result.optimized_resume_content, "Markdown");
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let result: AnalysisResult =
            serde_json::from_str(r#"{"overall_score": 40}"#).unwrap();
        assert!(result.ats_issues.is_empty());
        assert!(result.optimized_resume_content.is_empty());
    }
}
