mod analyze;
mod azure;
mod config;
mod model;
mod report;
mod utils;

use crate::analyze::analyzer::Analyzer;
use crate::analyze::collector::collect_sprint;
use crate::analyze::DataAnalysis;
use crate::azure::AzureClient;
use crate::config::Settings;
use crate::report::console::ConsoleReport;
use crate::report::markdown::MarkdownExport;
use crate::utils::MultiProgressSpinner;
use clap::{Parser, ValueEnum};
use indicatif::MultiProgress;
use log::debug;
use model::{Error, Result, SprintSelector, WorkItemField};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug, Clone)]
#[command(about = "Team capacity versus planned work per sprint and activity")]
struct Args {
    /// Sprint number or range, e.g. `51` or `50-55` (defaults to `analysis.default_sprint`)
    sprints: Option<String>,
    #[arg(long, value_enum, default_value_t = ReportKind::Default)]
    report: ReportKind,
    #[arg(long = "config", default_value = "config.toml")]
    config_path: PathBuf,
    /// Also write the report(s) as markdown to this file
    #[arg(long = "markdown")]
    markdown_path: Option<PathBuf>,
    #[arg(long)]
    debug: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, Eq, PartialEq)]
enum ReportKind {
    Default,
    Capacity,
    // Accepted for compatibility, rendered like `default`.
    Trend,
    WorkitemTypes,
    All,
}

impl ReportKind {
    fn by_activity(&self) -> bool {
        *self != ReportKind::Capacity
    }

    fn by_member(&self) -> bool {
        matches!(self, ReportKind::Capacity | ReportKind::All)
    }

    fn work_item_fields(&self) -> &'static [WorkItemField] {
        if self.by_member() {
            WorkItemField::ASSIGNEE_ACTIVITY_ESTIMATE
        } else {
            WorkItemField::ACTIVITY_ESTIMATE
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> Result<()> {
    let mut settings = Settings::load(&args.config_path)?;
    settings.analysis.debug |= args.debug;
    init_logging(settings.analysis.debug);
    debug!("Settings loaded from {}", args.config_path.display());

    let selector: SprintSelector = args
        .sprints
        .as_deref()
        .unwrap_or(&settings.analysis.default_sprint)
        .parse()?;

    let client = AzureClient::new(&settings.azure)?;
    println!("🔄 Testing basic connectivity...");
    let projects = client
        .probe()
        .await
        .map_err(|e| Error::Connectivity(e.to_string()))?;
    println!("✅ Basic connectivity successful!");
    debug!("Found {} projects", projects.len());
    for project in projects.iter().take(settings.output.max_projects_display) {
        debug!("  - Project: {project}");
    }

    let labels = selector.labels();
    println!("📋 Sprints to analyze: {}", labels.join(", "));

    let mut analysis = DataAnalysis::new(settings.analysis.working_days);
    let multi_progress = MultiProgress::new();
    for label in &labels {
        let pb = multi_progress.add_spinner(format!("Analyzing {label} ..."));
        let snapshot = collect_sprint(
            &client,
            label,
            &settings.analysis.work_item_type,
            args.report.work_item_fields(),
            &pb,
        )
        .await;
        analysis.insert_snapshot(snapshot);
    }

    let capacity = args
        .report
        .by_activity()
        .then(|| analysis.capacity_report());
    let members = args.report.by_member().then(|| analysis.member_report());

    let mut out = io::stdout().lock();
    if let Some(report) = &capacity {
        report.write_report(&mut out, &settings.output)?;
    }
    if let Some(report) = &members {
        report.write_report(&mut out, &settings.output)?;
    }

    if let Some(path) = &args.markdown_path {
        MarkdownExport {
            capacity: capacity.as_ref(),
            members: members.as_ref(),
        }
        .report_create(path)?;
        println!("\n📝 Markdown report written to {}", path.display());
    }
    Ok(())
}

fn init_logging(debug: bool) {
    let default_filter = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}
