//! CLI command definitions for eduforge.

use std::sync::Arc;

use anyhow::Context as _;
use clap::Parser;
use tracing::info;

use crate::agents::{ContentPipeline, Coordinator, CoordinatorConfig, TaskKind};
use crate::corpus;
use crate::eval::{write_results, EvaluationHarness, HarnessConfig};
use crate::llm::{ChatClient, LlmProvider, DEFAULT_MODEL};

/// Default API base for OpenAI-compatible endpoints.
const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Default corpus path.
const DEFAULT_DATASET: &str = "./test_dataset.json";

/// Default results path.
const DEFAULT_OUTPUT: &str = "./multi_agent_results.json";

/// Multi-agent educational content pipeline and evaluation harness.
#[derive(Parser)]
#[command(name = "eduforge")]
#[command(about = "Generate, refine and evaluate educational content with a multi-agent LLM pipeline")]
#[command(version)]
#[command(
    long_about = "eduforge runs a four-stage generate/review/refine/verify pipeline over an LLM\n\
        completion service, and a batch harness that scores pipeline output against a\n\
        labeled corpus with LLM rubric judgments and lexical-overlap metrics.\n\n\
        Example usage:\n  eduforge run --dataset ./test_dataset.json --output ./results.json"
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,
}

/// Available CLI subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Run the evaluation harness over a labeled corpus.
    #[command(alias = "eval")]
    Run(RunArgs),

    /// Run the pipeline once for a single instruction.
    #[command(alias = "gen")]
    Generate(GenerateArgs),
}

/// Arguments for `eduforge run`.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to the JSON corpus of materials and test cases.
    #[arg(short, long, default_value = DEFAULT_DATASET)]
    pub dataset: String,

    /// Path the results file is written to.
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: String,

    /// Model identifier used by every stage and the judge.
    #[arg(short, long, default_value = DEFAULT_MODEL, env = "EDUFORGE_MODEL")]
    pub model: String,

    /// API key (can also be set via EDUFORGE_API_KEY).
    #[arg(long, env = "EDUFORGE_API_KEY")]
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible API.
    #[arg(long, default_value = DEFAULT_API_BASE, env = "EDUFORGE_API_BASE")]
    pub api_base: String,

    /// Number of test cases evaluated concurrently.
    #[arg(short, long, default_value = "1")]
    pub concurrency: usize,
}

/// Arguments for `eduforge generate`.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// The instruction to generate content for.
    pub instruction: String,

    /// Task kind: summary, quiz or assignment.
    #[arg(short, long, default_value = "summary")]
    pub task_type: String,

    /// Optional file of source material to ground the generation in.
    #[arg(long)]
    pub context_file: Option<String>,

    /// Model identifier used by every stage.
    #[arg(short, long, default_value = DEFAULT_MODEL, env = "EDUFORGE_MODEL")]
    pub model: String,

    /// API key (can also be set via EDUFORGE_API_KEY).
    #[arg(long, env = "EDUFORGE_API_KEY")]
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible API.
    #[arg(long, default_value = DEFAULT_API_BASE, env = "EDUFORGE_API_BASE")]
    pub api_base: String,
}

/// Parse CLI arguments.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Execute the parsed CLI command.
pub async fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Run(args) => run_harness(args).await,
        Commands::Generate(args) => run_generate(args).await,
    }
}

fn build_client(api_base: &str, api_key: Option<String>, model: &str) -> anyhow::Result<ChatClient> {
    let api_key =
        api_key.context("API key required: pass --api-key or set EDUFORGE_API_KEY")?;
    Ok(ChatClient::new(
        api_base.to_string(),
        Some(api_key),
        model.to_string(),
    ))
}

async fn run_harness(args: RunArgs) -> anyhow::Result<()> {
    let client = build_client(&args.api_base, args.api_key, &args.model)?;
    let provider: Arc<dyn LlmProvider> = Arc::new(client);

    let materials = corpus::load_corpus(&args.dataset)
        .with_context(|| format!("failed to load corpus from '{}'", args.dataset))?;
    let case_count: usize = materials.iter().map(|m| m.test_cases.len()).sum();
    info!(
        materials = materials.len(),
        cases = case_count,
        model = %args.model,
        "starting evaluation run"
    );

    let coordinator = Arc::new(Coordinator::new(
        Arc::clone(&provider),
        CoordinatorConfig::new().with_model(args.model.as_str()),
    ));
    let harness = EvaluationHarness::new(
        coordinator,
        provider,
        HarnessConfig::new()
            .with_model(args.model.as_str())
            .with_concurrency(args.concurrency),
    );

    let records = harness.run(&materials).await;
    write_results(&records, &args.output)?;

    let failures = records.iter().filter(|r| r.error.is_some()).count();
    info!(
        total = records.len(),
        failures,
        output = %args.output,
        "evaluation run complete"
    );
    Ok(())
}

async fn run_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let client = build_client(&args.api_base, args.api_key, &args.model)?;
    let provider = Arc::new(client);

    let context = match &args.context_file {
        Some(path) => Some(
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read context file '{path}'"))?,
        ),
        None => None,
    };

    let kind = TaskKind::parse(&args.task_type);
    let coordinator = Coordinator::new(
        provider,
        CoordinatorConfig::new().with_model(args.model.as_str()),
    );

    let result = coordinator
        .run(kind, &args.instruction, context.as_deref())
        .await?;

    info!(status = ?result.status, "pipeline finished");
    println!("{}", result.output);
    Ok(())
}
