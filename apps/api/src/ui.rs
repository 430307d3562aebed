//! Interactive form front-end.
//!
//! `GET /` serves the upload form; `POST /` runs the same pipeline as the
//! JSON endpoint and renders the result inline. Errors are shown above a
//! fresh form so the page stays usable for another attempt.

use axum::{
    extract::{Multipart, State},
    response::Html,
};

use crate::evaluation::handlers::read_evaluation_request;
use crate::evaluation::models::{Department, EvaluationResult};
use crate::evaluation::run_evaluation;
use crate::state::AppState;

/// GET /
pub async fn form_page() -> Html<String> {
    Html(render_page(None, None))
}

/// POST /
///
/// Always answers 200 with HTML; pipeline errors become an inline message
/// rather than an error status, so the browser session survives.
pub async fn handle_submit(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Html<String> {
    let outcome = async {
        let request = read_evaluation_request(&mut multipart).await?;
        run_evaluation(state.backend.as_ref(), &request).await
    }
    .await;

    match outcome {
        Ok(result) => Html(render_page(Some(&result), None)),
        Err(e) => Html(render_page(None, Some(&e.public_message()))),
    }
}

fn render_page(result: Option<&EvaluationResult>, error: Option<&str>) -> String {
    let mut sections = String::new();

    if let Some(message) = error {
        sections.push_str(&format!(
            "<p class=\"error\">{}</p>\n",
            escape_html(message)
        ));
    }

    if let Some(result) = result {
        sections.push_str(&render_result(result));
    }

    let mut department_options = String::new();
    for dept in Department::ALL {
        department_options.push_str(&format!(
            "<option value=\"{dept}\">{dept}</option>\n"
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Resume Recommender</title>
<style>
body {{ font-family: sans-serif; max-width: 48rem; margin: 2rem auto; }}
label {{ display: block; margin-top: 1rem; font-weight: bold; }}
textarea {{ width: 100%; height: 8rem; }}
input[type="text"] {{ width: 100%; }}
.error {{ color: #b00020; border: 1px solid #b00020; padding: 0.5rem; }}
.score {{ font-size: 1.5rem; }}
</style>
</head>
<body>
<h1>Resume Recommender</h1>
{sections}
<form method="post" action="/" enctype="multipart/form-data">
<label for="job_title">Job Title</label>
<input type="text" id="job_title" name="job_title" required>
<label for="department">Department</label>
<select id="department" name="department">
{department_options}</select>
<label for="job_description">Job Description</label>
<textarea id="job_description" name="job_description" required></textarea>
<label for="resume_file">Resume (PDF)</label>
<input type="file" id="resume_file" name="resume_file" accept="application/pdf" required>
<p><button type="submit">Evaluate Candidate</button></p>
</form>
</body>
</html>
"#
    )
}

fn render_result(result: &EvaluationResult) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "<h2>Evaluation</h2>\n<p class=\"score\">Score: {:.0}/100</p>\n",
        result.score
    ));

    out.push_str("<h3>Strengths</h3>\n<ul>\n");
    for strength in &result.strengths {
        out.push_str(&format!("<li>{}</li>\n", escape_html(strength)));
    }
    out.push_str("</ul>\n");

    out.push_str("<h3>Concerns</h3>\n<ul>\n");
    for concern in &result.concerns {
        out.push_str(&format!("<li>{}</li>\n", escape_html(concern)));
    }
    out.push_str("</ul>\n");

    out.push_str("<h3>Skill Match</h3>\n<ul>\n");
    for (skill, matched) in &result.skill_match {
        out.push_str(&format!(
            "<li>{}: {}</li>\n",
            escape_html(skill),
            if *matched { "matched" } else { "not found" }
        ));
    }
    out.push_str("</ul>\n");

    out.push_str(&format!(
        "<p><strong>Recommendation:</strong> {}</p>\n<hr>\n",
        escape_html(&result.recommendation)
    ));

    out
}

/// Minimal HTML escaping for model- and user-supplied text.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn sample_result() -> EvaluationResult {
        EvaluationResult {
            score: 85.0,
            strengths: vec!["Go experience".to_string()],
            concerns: vec!["No Kubernetes in production".to_string()],
            skill_match: BTreeMap::from([("Go".to_string(), true), ("Rust".to_string(), false)]),
            recommendation: "Strong candidate".to_string(),
        }
    }

    #[test]
    fn test_escape_html_neutralizes_markup() {
        assert_eq!(
            escape_html(r#"<script>alert("x") & more</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; more&lt;/script&gt;"
        );
    }

    #[test]
    fn test_empty_page_contains_form_and_departments() {
        let page = render_page(None, None);
        assert!(page.contains("<form method=\"post\""));
        for dept in Department::ALL {
            assert!(page.contains(dept.as_str()));
        }
    }

    #[test]
    fn test_result_page_renders_all_sections() {
        let page = render_page(Some(&sample_result()), None);
        assert!(page.contains("Score: 85/100"));
        assert!(page.contains("Go experience"));
        assert!(page.contains("No Kubernetes in production"));
        assert!(page.contains("Go: matched"));
        assert!(page.contains("Rust: not found"));
        assert!(page.contains("Strong candidate"));
    }

    #[test]
    fn test_error_page_keeps_form_usable() {
        let page = render_page(None, Some("unrecognized department 'Finance'"));
        assert!(page.contains("unrecognized department"));
        assert!(page.contains("<form method=\"post\""));
    }

    #[test]
    fn test_model_text_is_escaped_in_result() {
        let mut result = sample_result();
        result.recommendation = "<img src=x>".to_string();
        let page = render_page(Some(&result), None);
        assert!(!page.contains("<img src=x>"));
        assert!(page.contains("&lt;img src=x&gt;"));
    }
}
