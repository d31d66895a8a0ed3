//! Batch evaluation harness.
//!
//! Drives the content pipeline across a labeled corpus, one record per test
//! case: pipeline output, wall-clock latency, LLM rubric judgment and
//! automated lexical metrics. A failing case is captured in its record and
//! never aborts the rest of the run. Results are written once, at the end.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use futures::StreamExt;
use serde::{Deserialize, Serialize};

use crate::agents::ContentPipeline;
use crate::corpus::{self, CorpusCase, Material};
use crate::error::HarnessError;
use crate::llm::LlmProvider;

use super::judge::{JudgeReport, LlmJudge};
use super::metrics::{calculate_metrics, AutomatedMetrics};

/// Configuration for an evaluation run.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Model identifier for the judge. Empty uses the provider default.
    pub model: String,
    /// Number of test cases evaluated concurrently. 1 reproduces strictly
    /// sequential execution; higher values keep result order by corpus
    /// index regardless.
    pub concurrency: usize,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            model: String::new(),
            concurrency: 1,
        }
    }
}

impl HarnessConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the judge model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the worker-pool bound for concurrent test cases.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}

/// One result record per test case. Created once, appended in corpus order,
/// never mutated afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRecord {
    /// Identifier of the test case.
    pub test_id: String,
    /// Raw task-kind label from the corpus.
    pub task_type: String,
    /// Identifier of the owning material.
    pub material_id: String,
    /// The instruction handed to the pipeline.
    pub instruction: String,
    /// The pipeline's final artifact (empty when the invocation failed).
    pub generated_output: String,
    /// Reference answer as plain text.
    pub reference_answer: String,
    /// Captured failure message, if the pipeline invocation itself failed.
    pub error: Option<String>,
    /// Wall-clock latency of the pipeline invocation, in seconds.
    pub latency_seconds: f64,
    /// When this record was created.
    pub timestamp: DateTime<Utc>,
    /// LLM rubric judgment; absent iff `error` is set.
    pub llm_evaluation: Option<JudgeReport>,
    /// Automated lexical metrics; absent iff `error` is set.
    pub automated_metrics: Option<AutomatedMetrics>,
}

/// Runs the pipeline over a corpus and scores the output.
pub struct EvaluationHarness {
    pipeline: Arc<dyn ContentPipeline>,
    judge: LlmJudge,
    config: HarnessConfig,
}

impl EvaluationHarness {
    /// Create a harness over `pipeline`, judging with `judge_provider`.
    pub fn new(
        pipeline: Arc<dyn ContentPipeline>,
        judge_provider: Arc<dyn LlmProvider>,
        config: HarnessConfig,
    ) -> Self {
        let judge = LlmJudge::new(judge_provider, config.model.clone());
        Self {
            pipeline,
            judge,
            config,
        }
    }

    /// Evaluate every test case of every material, in corpus order.
    ///
    /// Cases run through a bounded worker pool (`config.concurrency`);
    /// result order is preserved by index, not by completion time.
    pub async fn run(&self, materials: &[Material]) -> Vec<EvaluationRecord> {
        let cases = corpus::flatten(materials);
        let total = cases.len();

        let records: Vec<EvaluationRecord> = futures::stream::iter(cases)
            .map(|case| self.evaluate_case(case))
            .buffered(self.config.concurrency.max(1))
            .collect()
            .await;

        tracing::info!(total, "completed evaluation run");
        records
    }

    async fn evaluate_case(&self, case: CorpusCase) -> EvaluationRecord {
        tracing::info!(test_id = %case.test_id, task_type = %case.task_type, "running test case");

        // Empty material content means no grounding context at all.
        let context = if case.source_context.is_empty() {
            None
        } else {
            Some(case.source_context.as_str())
        };

        let start = Instant::now();
        let outcome = self.pipeline.run(case.kind, &case.instruction, context).await;
        let latency_seconds = start.elapsed().as_secs_f64();

        let (generated_output, error) = match outcome {
            Ok(result) => (result.output, None),
            Err(err) => {
                tracing::warn!(test_id = %case.test_id, error = %err, "pipeline invocation failed");
                (String::new(), Some(err.to_string()))
            }
        };

        // Evaluation is only attempted on a successful generation.
        let (llm_evaluation, automated_metrics) = if error.is_none() {
            let judgment = self
                .judge
                .evaluate(&case.instruction, &generated_output, &case.reference_answer)
                .await;
            let metrics = calculate_metrics(&generated_output, &case.reference_answer);
            (Some(judgment), Some(metrics))
        } else {
            (None, None)
        };

        EvaluationRecord {
            test_id: case.test_id,
            task_type: case.task_type,
            material_id: case.material_id,
            instruction: case.instruction,
            generated_output,
            reference_answer: case.reference_answer,
            error,
            latency_seconds,
            timestamp: Utc::now(),
            llm_evaluation,
            automated_metrics,
        }
    }
}

/// Write the full ordered record collection to `path` as pretty JSON.
pub fn write_results(
    records: &[EvaluationRecord],
    path: impl AsRef<Path>,
) -> Result<(), HarnessError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json).map_err(|source| HarnessError::ResultsWrite {
        path: path.display().to_string(),
        source,
    })?;

    tracing::info!(count = records.len(), path = %path.display(), "results written");
    Ok(())
}
