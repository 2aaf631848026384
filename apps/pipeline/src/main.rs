mod config;
mod scheduler;
mod state;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use adspend_core::pipeline::{PipelineRunSummary, PipelineServiceTrait, StageRunSummary};

use config::Config;
use state::build_state;

#[derive(Parser)]
#[command(
    name = "adspend-pipeline",
    about = "Two-stage marketing spend / revenue training-table pipeline",
    version
)]
struct Cli {
    /// Print run summaries as JSON on stdout.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the whole pipeline once, in dependency order.
    Run,
    /// Run a single stage by task id.
    RunStage {
        /// Task id, e.g. spend_per_month or spend_and_revenue_per_month.
        task_id: String,
    },
    /// Print the task graph's execution order.
    Plan,
    /// Run the pipeline on a fixed interval until interrupted.
    Schedule,
}

fn init_tracing() {
    let log_format = std::env::var("ADSPEND_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry.with(fmt::layer().with_target(true)).init();
    }
}

fn report_run(summary: &PipelineRunSummary, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else {
        for stage in &summary.stages {
            report_stage(stage, false)?;
        }
    }
    Ok(())
}

fn report_stage(summary: &StageRunSummary, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else {
        tracing::info!(
            "{}: {} rows read, {} dropped, {} written ({} ms)",
            summary.task_id,
            summary.rows_read,
            summary.rows_dropped,
            summary.rows_written,
            summary.duration_ms
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env();
    init_tracing();
    let state = build_state(&config)?;

    match cli.command {
        Command::Run => {
            let summary = state.pipeline_service.run().await?;
            report_run(&summary, cli.json)?;
        }
        Command::RunStage { task_id } => {
            let summary = state.pipeline_service.run_stage(&task_id).await?;
            report_stage(&summary, cli.json)?;
        }
        Command::Plan => {
            let order = state.pipeline_service.task_graph().execution_order()?;
            for (position, task_id) in order.iter().enumerate() {
                println!("{}. {}", position + 1, task_id);
            }
        }
        Command::Schedule => {
            scheduler::run_on_interval(state, config.schedule_interval_secs).await;
        }
    }

    Ok(())
}
