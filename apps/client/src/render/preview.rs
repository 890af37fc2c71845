//! Optimized resume preview — markdown to a standalone, print-ready HTML
//! document (open it in a browser and print to PDF).

use std::io;
use std::path::{Path, PathBuf};

use pulldown_cmark::{html, Event, Options, Parser};
use tracing::info;

use crate::models::analysis::AnalysisResult;

const PREVIEW_STYLE: &str = r#"
@page { size: A4; margin: 0mm; }
body { margin: 0; background: #f1f5f9; font-family: ui-sans-serif, system-ui, -apple-system, "Segoe UI", Roboto, Arial, sans-serif; }
.resume-preview { background: #fff; color: #000; padding: 50px; max-width: 800px; min-height: 1100px; margin: 0 auto; box-shadow: 0 10px 15px -3px rgba(0,0,0,.1); }
.resume-preview h1 { font-size: 1.875rem; font-weight: 700; text-align: center; text-transform: uppercase; margin: 0 0 .5rem; }
.resume-preview h1 + p { text-align: center; margin-bottom: 1.5rem; }
.resume-preview h2 { font-size: 1.125rem; font-weight: 700; text-transform: uppercase; border-bottom: 2px solid #000; margin: 1rem 0 .5rem; padding-bottom: .25rem; }
.resume-preview h3 { font-size: 1rem; font-weight: 700; margin: .5rem 0 .25rem; }
.resume-preview p { font-size: .875rem; line-height: 1.625; margin: 0 0 .5rem; }
.resume-preview ul { list-style: disc; margin: 0 0 .5rem 1.25rem; padding: 0; font-size: .875rem; }
.resume-preview li { padding-left: .25rem; margin: .125rem 0; }
.resume-preview strong { font-weight: 700; color: #000; }
.resume-preview hr { border: 0; border-top: 1px solid #000; margin: 1rem 0; }
@media print {
  body { background: #fff; -webkit-print-color-adjust: exact; print-color-adjust: exact; }
  .resume-preview { box-shadow: none; margin: 0; padding: 40px; }
}
"#;

/// Renders resume markdown to an HTML fragment. Raw HTML in the markdown is
/// escaped rather than passed through.
pub fn render_preview_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut body = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut body, parser);
    body
}

/// Wraps the rendered markdown in a complete printable document.
pub fn render_document(result: &AnalysisResult) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Optimized Resume ({score})</title>\n<style>{PREVIEW_STYLE}</style>\n</head>\n\
         <body>\n<div class=\"resume-preview\">\n{body}</div>\n</body>\n</html>\n",
        score = result.overall_score,
        body = render_preview_html(&result.optimized_resume_content),
    )
}

pub fn export_file_name(result: &AnalysisResult) -> String {
    format!("Optimized_Resume_{}.html", result.overall_score)
}

/// Writes the printable preview into `dir`. Returns `None` when the result
/// carries no optimized resume.
pub async fn export_document(result: &AnalysisResult, dir: &Path) -> io::Result<Option<PathBuf>> {
    if result.optimized_resume_content.trim().is_empty() {
        return Ok(None);
    }

    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(export_file_name(result));
    tokio::fs::write(&path, render_document(result)).await?;
    info!("Exported optimized resume to {}", path.display());
    Ok(Some(path))
}

/// Saves the raw optimized markdown. Returns `false` when there is none.
pub async fn export_markdown(result: &AnalysisResult, path: &Path) -> io::Result<bool> {
    if result.optimized_resume_content.trim().is_empty() {
        return Ok(false);
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, &result.optimized_resume_content).await?;
    Ok(true)
}
