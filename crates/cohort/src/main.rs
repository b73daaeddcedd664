mod samples;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use cohort_core::types::FresherId;
use cohort_core::MentorMatcher;
use cohort_serve::{AppState, ServeConfig};
use owo_colors::{OwoColorize, Stream::Stdout};
use std::net::IpAddr;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "cohort=info,cohort_serve=info,tower_http=info";

#[derive(Parser)]
#[command(name = "cohort", version, about = "Fresher onboarding toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the task HTTP API
    Serve(ServeArgs),
    /// Match the sample freshers with mentors
    Mentors,
    /// Print the sample fresher's progress report
    Progress,
    /// Print the OpenAPI document
    Openapi,
}

#[derive(Args, Default)]
struct ServeArgs {
    /// Address to bind (overrides COHORT_HOST)
    #[arg(long)]
    host: Option<IpAddr>,
    /// Port to bind (overrides COHORT_PORT / PORT)
    #[arg(long)]
    port: Option<u16>,
    /// SQLite database file (overrides COHORT_DB_PATH / DATABASE_URL)
    #[arg(long)]
    db: Option<String>,
}

impl ServeArgs {
    fn apply(self, mut config: ServeConfig) -> ServeConfig {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(db) = self.db {
            config.db_path = db;
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Command::Serve(args) => serve(args).await,
        Command::Mentors => mentors(),
        Command::Progress => progress(),
        Command::Openapi => {
            println!("{}", cohort_serve::openapi::generate_spec());
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

async fn serve(args: ServeArgs) -> Result<()> {
    let config = args.apply(ServeConfig::from_env()?);
    tracing::debug!(?config, "resolved serve config");
    config
        .ensure_db_dir()
        .with_context(|| format!("creating directory for {}", config.db_path))?;
    let addr = config.addr();
    cohort_serve::serve(AppState::new(config.db_path), addr)
        .await
        .with_context(|| format!("serving on {addr}"))
}

fn mentors() -> Result<()> {
    let mut matcher = samples::mentor_matcher()?;
    for line in assignment_lines(&mut matcher) {
        println!("{line}");
    }
    println!();
    println!(
        "{} {}",
        "Total assignments:".if_supports_color(Stdout, |text| text.bold()),
        matcher.assignments().len()
    );
    Ok(())
}

fn assignment_lines(matcher: &mut MentorMatcher) -> Vec<String> {
    matcher
        .assign_all()
        .into_iter()
        .filter_map(|assigned| {
            let fresher = matcher.fresher(&assigned.fresher_id)?;
            let mentor = matcher.mentor(&assigned.mentor_id)?;
            Some(format!("Assigned {} to {}", fresher.name, mentor.name))
        })
        .collect()
}

fn progress() -> Result<()> {
    let report = progress_report_json(chrono::Utc::now())?;
    println!("{}", "Progress Report:".if_supports_color(Stdout, |text| text.bold()));
    println!("{report}");
    Ok(())
}

fn progress_report_json(now: chrono::DateTime<chrono::Utc>) -> Result<String> {
    let tracker = samples::progress_tracker(now)?;
    let fresher_id = FresherId::new(samples::SAMPLE_FRESHER)?;
    let report = tracker
        .generate_progress_report(&fresher_id)
        .context("sample fresher has no projects")?;
    Ok(serde_json::to_string_pretty(&report)?)
}
