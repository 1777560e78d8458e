//! Critique Prompts
//!
//! System and user prompt assembly for one agent's critique request.

use serde_json::Value;

use crate::models::DesignArtifact;

/// Nielsen's ten usability heuristics, in canonical order.
pub const USABILITY_HEURISTICS: [&str; 10] = [
    "Visibility of System Status",
    "Match Between System and Real World",
    "User Control and Freedom",
    "Consistency and Standards",
    "Error Prevention",
    "Recognition Rather Than Recall",
    "Flexibility and Efficiency of Use",
    "Aesthetic and Minimalist Design",
    "Help Users Recognize, Diagnose, and Recover from Errors",
    "Help and Documentation",
];

const CRITIQUE_SCHEMA_INSTRUCTION: &str = r#"You are now reviewing a design artifact. Provide structured, concrete feedback based on your persona and expertise.

FEEDBACK REQUIREMENTS:
- Be specific and cite exact elements (copy, control labels, visual elements)
- Reference Nielsen's 10 Usability Heuristics where applicable
- Provide concrete evidence for each issue
- Suggest specific fixes, not generic advice
- Rate severity: low, medium, high, critical
- Focus on user experience from your perspective

OUTPUT FORMAT (JSON only):
{
  "summary": "Brief overall assessment",
  "positives": ["specific positive element"],
  "problems": [
    {
      "issue": "Specific problem description",
      "evidence": "Exact copy or element reference",
      "severity": "low|medium|high|critical",
      "heuristic": "Nielsen heuristic name",
      "fix": "Specific suggested improvement"
    }
  ],
  "confidence": 0.0,
  "userIntentUnderstanding": "How well does this design match user needs?",
  "accessibilityConcerns": ["specific accessibility issue"],
  "mobileConsiderations": ["mobile-specific issue"]
}

Be concrete, non-generic, and cite exact elements."#;

/// Build the persona-specific system prompt for a critique.
pub fn build_critique_system_prompt(persona_prompt: Option<&str>) -> String {
    let mut prompt = String::new();
    if let Some(base) = persona_prompt.map(str::trim).filter(|p| !p.is_empty()) {
        prompt.push_str(base);
        prompt.push_str("\n\n");
    }
    prompt.push_str(CRITIQUE_SCHEMA_INSTRUCTION);
    prompt.push_str("\n\nUSABILITY HEURISTICS:\n");
    prompt.push_str(&heuristics_list());
    prompt
}

/// Build the user prompt describing the artifact and task context.
pub fn build_critique_user_prompt(artifact: &DesignArtifact, task_context: &Value) -> String {
    let mut prompt = format!(
        "DESIGN ARTIFACT:\nName: {}\nDescription: {}\n",
        artifact.name,
        artifact
            .description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or("No description provided")
    );
    if let Some(url) = &artifact.figma_url {
        prompt.push_str(&format!("Figma URL: {}\n", url));
    }
    if let Some(url) = &artifact.image_url {
        prompt.push_str(&format!("Image URL: {}\n", url));
    }

    let context = serde_json::to_string_pretty(task_context).unwrap_or_else(|_| "{}".to_string());
    prompt.push_str(&format!("\nTASK CONTEXT:\n{}\n", context));
    prompt.push_str("\nNIELSEN'S 10 USABILITY HEURISTICS:\n");
    prompt.push_str(&heuristics_list());
    prompt.push_str("\nProvide your feedback as JSON only.");
    prompt
}

fn heuristics_list() -> String {
    USABILITY_HEURISTICS
        .iter()
        .enumerate()
        .map(|(i, h)| format!("{}. {}\n", i + 1, h))
        .collect()
}
