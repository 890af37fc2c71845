use std::fmt::Write;

use crate::models::analysis::AnalysisResult;

/// Headline shown under the score.
pub fn headline(score: u32) -> &'static str {
    if score >= 80 {
        "Excellent Job!"
    } else if score >= 60 {
        "Good Start!"
    } else {
        "Needs Improvement"
    }
}

/// Renders the analysis as a terminal report. ATS issues and missing skills
/// are omitted when empty.
pub fn render_report(result: &AnalysisResult) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Score: {}/100", result.overall_score);
    let _ = writeln!(out, "{}", headline(result.overall_score));
    if !result.final_suggestions.is_empty() {
        let _ = writeln!(out, "{}", result.final_suggestions);
    }

    push_list(&mut out, "Strengths", "+", &result.strengths);
    push_list(&mut out, "Areas for Improvement", "-", &result.weaknesses);
    if !result.ats_issues.is_empty() {
        push_list(&mut out, "ATS Compatibility Issues", "!", &result.ats_issues);
    }

    let _ = writeln!(out, "\nRole Alignment");
    let _ = writeln!(out, "{}", result.role_alignment_feedback);

    if !result.missing_skills.is_empty() {
        let _ = writeln!(out, "\nMissing Critical Skills");
        let _ = writeln!(out, "{}", result.missing_skills.join(", "));
    }

    let _ = writeln!(out, "\nAI Suggested Improvements");
    for (index, bullet) in result.optimized_bullets.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", index + 1, bullet);
    }

    out
}

fn push_list(out: &mut String, title: &str, marker: &str, items: &[String]) {
    let _ = writeln!(out, "\n{title}");
    for item in items {
        let _ = writeln!(out, "  {marker} {item}");
    }
}
