//! Evaluation layer: LLM rubric judgment, automated lexical metrics and the
//! batch harness that drives the pipeline across a corpus.

pub mod harness;
pub mod judge;
pub mod metrics;

pub use harness::{write_results, EvaluationHarness, EvaluationRecord, HarnessConfig};
pub use judge::{parse_report, JudgeReport, LlmJudge};
pub use metrics::{calculate_metrics, AutomatedMetrics};
