//! LLM-based rubric judgment of generated output.
//!
//! Sends a fixed five-label rubric prompt at low temperature and parses the
//! labeled numeric scores out of the free-text reply. The parser knows the
//! full label schema and reports which labels were missing instead of
//! silently dropping them.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::llm::{GenerationRequest, LlmProvider, Message};

/// Output cap for judgment requests.
const JUDGE_MAX_TOKENS: u32 = 300;

/// Sampling temperature for judgment requests.
const JUDGE_TEMPERATURE: f64 = 0.3;

/// Rubric labels as they appear in the reply, with their score keys.
const RUBRIC_LABELS: [(&str, &str); 5] = [
    ("CORRECTNESS", "correctness"),
    ("COMPLETENESS", "completeness"),
    ("CLARITY", "clarity"),
    ("RELEVANCE", "relevance"),
    ("OVERALL", "overall"),
];

const RUBRIC_PROMPT: &str = r#"Evaluate the generated output against the reference answer.

Instruction: {instruction}
Generated Output: {generated}
Reference Answer: {reference}

Rate on a scale of 1-10 for:
CORRECTNESS: [score]
COMPLETENESS: [score]
CLARITY: [score]
RELEVANCE: [score]
OVERALL: [average score]

REASONING: [brief explanation]"#;

/// Parsed judgment for one generated/reference pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JudgeReport {
    /// Scores keyed by rubric dimension.
    pub scores: BTreeMap<String, f64>,
    /// Rubric labels the reply did not carry a parseable score for.
    pub missing_labels: Vec<String>,
    /// Free-text reasoning (the full reply).
    pub reasoning: String,
    /// The raw reply, kept verbatim for the results file.
    pub raw_evaluation: String,
}

impl JudgeReport {
    /// An empty report, used when the judgment call itself fails.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether this report carries no scores and no reasoning.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty() && self.reasoning.is_empty()
    }
}

/// Judges generated output against reference answers with an LLM rubric.
pub struct LlmJudge {
    provider: Arc<dyn LlmProvider>,
    model: String,
}

impl LlmJudge {
    /// Create a judge backed by `provider`.
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Judge `generated` against `reference` for the given instruction.
    ///
    /// A failed judgment call degrades to an empty report; the harness does
    /// not treat that as a test-case error.
    pub async fn evaluate(&self, instruction: &str, generated: &str, reference: &str) -> JudgeReport {
        let prompt = RUBRIC_PROMPT
            .replace("{instruction}", instruction)
            .replace("{generated}", generated)
            .replace("{reference}", reference);

        let request = GenerationRequest::new(self.model.clone(), vec![Message::user(prompt)])
            .with_max_tokens(JUDGE_MAX_TOKENS)
            .with_temperature(JUDGE_TEMPERATURE);

        let raw = match self.provider.generate(request).await {
            Ok(response) => match response.first_content() {
                Some(content) => content.to_string(),
                None => {
                    tracing::warn!("judgment returned no choices");
                    return JudgeReport::empty();
                }
            },
            Err(err) => {
                tracing::warn!(error = %err, "judgment request failed");
                return JudgeReport::empty();
            }
        };

        parse_report(&raw)
    }
}

/// Parse the rubric reply into a report, recording missing labels.
pub fn parse_report(raw: &str) -> JudgeReport {
    let mut scores = BTreeMap::new();
    let mut missing_labels = Vec::new();

    for (label, key) in RUBRIC_LABELS {
        match find_score(raw, label) {
            Some(score) => {
                scores.insert(key.to_string(), score);
            }
            None => missing_labels.push(label.to_string()),
        }
    }

    if !missing_labels.is_empty() {
        tracing::warn!(missing = ?missing_labels, "rubric labels absent from judgment reply");
    }

    JudgeReport {
        scores,
        missing_labels,
        reasoning: raw.to_string(),
        raw_evaluation: raw.to_string(),
    }
}

/// Find `label` on a reply line and extract the trailing numeric value
/// after its colon.
fn find_score(raw: &str, label: &str) -> Option<f64> {
    let tag = format!("{label}:");
    for line in raw.lines() {
        if let Some(position) = line.find(&tag) {
            let remainder = line[position + tag.len()..].trim();
            if let Ok(score) = remainder.parse::<f64>() {
                return Some(score);
            }
            // Tolerate trailing commentary ("8/10", "6, could be tighter").
            if let Some(score) = remainder
                .split_whitespace()
                .next()
                .map(|token| token.split('/').next().unwrap_or(token))
                .and_then(|token| token.trim_end_matches(['.', ',']).parse::<f64>().ok())
            {
                return Some(score);
            }
        }
    }
    None
}
