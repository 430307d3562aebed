// All LLM prompt constants for the evaluation module.

/// Evaluation prompt template. Replace `{job_title}`, `{department}`,
/// `{job_description}` and `{resume_text}` before sending.
///
/// The JSON schema spelled out here is the only protocol contract with the
/// upstream model; `EvaluationResult` must stay in lockstep with it.
pub const EVALUATION_PROMPT_TEMPLATE: &str = r#"You are an expert hiring manager evaluating a candidate for a specific role.
Return STRICT JSON only. No prose, no markdown, no code fences.

REQUIRED JSON (exact keys and types, no extra fields):
{
  "score": <number between 0 and 100>,
  "strengths": ["specific strength drawn from the resume", "..."],
  "concerns": ["area where the candidate may not be a perfect fit", "..."],
  "skill_match": {"<skill named in the job description>": <true|false>},
  "recommendation": "<one or two sentences: hire, consider, or pass, and why>"
}

JOB:
Title: {job_title}
Department: {department}
Description: {job_description}

RESUME (verbatim evidence source):
{resume_text}

EVALUATION RULES (follow ALL):
1) score reflects overall fit for THIS role: 0 means no fit, 100 means ideal
2) strengths and concerns must cite actual resume evidence, not generic traits
3) skill_match covers the concrete skills named in the job description
4) Be specific to this candidate: mention their projects and actual experience
5) Keep all text values concise and free of newlines or control characters
6) Return ONLY the JSON object"#;
