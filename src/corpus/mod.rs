//! Evaluation corpus: materials and their test cases.
//!
//! The corpus is a JSON array of materials, each carrying source content and
//! an ordered list of test cases. Reference answers may be structured JSON;
//! they are serialized to plain text once, when the corpus is flattened.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::agents::TaskKind;
use crate::error::CorpusError;

/// A source material with its attached test cases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    /// Stable identifier for this material.
    pub material_id: String,
    /// Source-document text shared by all of this material's test cases.
    #[serde(default)]
    pub content: String,
    /// Ordered test cases grounded in this material.
    pub test_cases: Vec<TestCase>,
}

/// One labeled test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    /// Stable identifier for this test case.
    pub test_id: String,
    /// Task-kind label (e.g., "summarization", "quiz", "assignment").
    pub task_type: String,
    /// The instruction handed to the pipeline.
    pub instruction: String,
    /// Reference answer; may be a string or structured JSON.
    pub reference_answer: Value,
}

/// A flattened (material, test case) pair ready for the harness.
#[derive(Debug, Clone)]
pub struct CorpusCase {
    /// Identifier of the owning material.
    pub material_id: String,
    /// Identifier of the test case.
    pub test_id: String,
    /// Raw task-kind label from the corpus.
    pub task_type: String,
    /// Parsed task kind (unknown labels fall back to summary).
    pub kind: TaskKind,
    /// The instruction handed to the pipeline.
    pub instruction: String,
    /// Reference answer as plain text.
    pub reference_answer: String,
    /// Source content supplied to every stage as context.
    pub source_context: String,
}

/// Serialize a reference answer to plain text.
///
/// String values are used as-is; structured values are rendered as compact
/// JSON and treated as plain strings from then on.
fn reference_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Load a corpus from a JSON file.
pub fn load_corpus(path: impl AsRef<Path>) -> Result<Vec<Material>, CorpusError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| CorpusError::Unreadable {
        path: path.display().to_string(),
        source,
    })?;

    let materials: Vec<Material> =
        serde_json::from_str(&raw).map_err(|source| CorpusError::Malformed {
            path: path.display().to_string(),
            source,
        })?;

    if materials.is_empty() {
        return Err(CorpusError::Empty);
    }

    Ok(materials)
}

/// Flatten materials into an ordered list of harness-ready cases,
/// preserving corpus order.
pub fn flatten(materials: &[Material]) -> Vec<CorpusCase> {
    materials
        .iter()
        .flat_map(|material| {
            material.test_cases.iter().map(|case| CorpusCase {
                material_id: material.material_id.clone(),
                test_id: case.test_id.clone(),
                task_type: case.task_type.clone(),
                kind: TaskKind::parse(&case.task_type),
                instruction: case.instruction.clone(),
                reference_answer: reference_text(&case.reference_answer),
                source_context: material.content.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_material() -> Material {
        serde_json::from_value(json!({
            "material_id": "m1",
            "content": "Requirements elicitation involves stakeholders.",
            "test_cases": [
                {
                    "test_id": "t1",
                    "task_type": "summarization",
                    "instruction": "Summarize key points",
                    "reference_answer": "The text discusses X and Y."
                },
                {
                    "test_id": "t2",
                    "task_type": "quiz",
                    "instruction": "Write two questions",
                    "reference_answer": {"q1": "What is X?", "q2": "What is Y?"}
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_flatten_preserves_order_and_parses_kinds() {
        let cases = flatten(&[sample_material()]);

        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].test_id, "t1");
        assert_eq!(cases[0].kind, TaskKind::Summary);
        assert_eq!(cases[1].test_id, "t2");
        assert_eq!(cases[1].kind, TaskKind::Quiz);
        assert_eq!(
            cases[0].source_context,
            "Requirements elicitation involves stakeholders."
        );
    }

    #[test]
    fn test_structured_reference_answer_is_serialized_once() {
        let cases = flatten(&[sample_material()]);

        assert_eq!(cases[0].reference_answer, "The text discusses X and Y.");
        assert_eq!(
            cases[1].reference_answer,
            r#"{"q1":"What is X?","q2":"What is Y?"}"#
        );
    }

    #[test]
    fn test_missing_content_defaults_to_empty() {
        let material: Material = serde_json::from_value(json!({
            "material_id": "m2",
            "test_cases": []
        }))
        .unwrap();

        assert_eq!(material.content, "");
    }

    #[test]
    fn test_load_corpus_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.json");
        let materials = vec![sample_material()];
        std::fs::write(&path, serde_json::to_string_pretty(&materials).unwrap()).unwrap();

        let loaded = load_corpus(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].material_id, "m1");
        assert_eq!(loaded[0].test_cases.len(), 2);
    }

    #[test]
    fn test_load_corpus_rejects_empty_and_malformed() {
        let dir = tempfile::tempdir().unwrap();

        let empty = dir.path().join("empty.json");
        std::fs::write(&empty, "[]").unwrap();
        assert!(matches!(load_corpus(&empty), Err(CorpusError::Empty)));

        let malformed = dir.path().join("bad.json");
        std::fs::write(&malformed, "{not json").unwrap();
        assert!(matches!(
            load_corpus(&malformed),
            Err(CorpusError::Malformed { .. })
        ));

        assert!(matches!(
            load_corpus(dir.path().join("missing.json")),
            Err(CorpusError::Unreadable { .. })
        ));
    }
}
