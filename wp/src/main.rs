//! wp - weekend-plan client
//!
//! CLI entry point: one-shot plan requests and the interactive TUI.

use std::fs;
use std::sync::Arc;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use eyre::{Context, Result};
use tracing::info;

use planclient::{AgentClient, GeneratedPlan, PlanBackend, ResponseEvent};
use weekendplan::cli::{Cli, Command, OutputFormat, get_log_path};
use weekendplan::config::Config;
use weekendplan::plan::{ParsedPlan, parse_plan};
use weekendplan::tui;
use weekendplan::validation::validate;

fn setup_logging(verbose: bool) -> Result<()> {
    let log_path = get_log_path();
    if let Some(log_dir) = log_path.parent() {
        fs::create_dir_all(log_dir).context("Failed to create log directory")?;
    }

    // Write to the log file, never stdout - stdout belongs to the plan output
    // and the TUI.
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::File::create(&log_path).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    info!("Loaded config: base-url={}", config.backend.base_url);

    match cli.command {
        Some(Command::Plan {
            location,
            ages,
            format,
            raw,
        }) => cmd_plan(&config, &location, ages.as_deref().unwrap_or(""), format, raw).await,
        Some(Command::Tui) => cmd_tui(&config).await,
        None => {
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
    }
}

/// Request a plan once and print it
async fn cmd_plan(config: &Config, location: &str, ages: &str, format: OutputFormat, raw: bool) -> Result<()> {
    let input = match validate(location, ages) {
        Ok(input) => input,
        Err(errors) => {
            for (field, message) in errors.iter() {
                eprintln!("{} {}: {}", "error:".red().bold(), field, message);
            }
            std::process::exit(2);
        }
    };

    let client = AgentClient::new(config.backend.settings())?;

    match client.generate_plan(&input).await {
        Ok(plan) => match format {
            OutputFormat::Text => {
                print_plan_text(&plan, raw);
                Ok(())
            }
            OutputFormat::Json => print_plan_json(&plan, raw),
        },
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            if let Some(status) = err.status_code() {
                eprintln!("  status: {}", status);
            }
            if let Some(body) = err.body() {
                eprintln!("  body: {}", body);
            }
            std::process::exit(1);
        }
    }
}

/// Launch the interactive TUI
async fn cmd_tui(config: &Config) -> Result<()> {
    let backend: Arc<dyn PlanBackend> = Arc::new(AgentClient::new(config.backend.settings())?);
    tui::run_with_backend(backend).await
}

fn print_plan_text(plan: &GeneratedPlan, raw: bool) {
    match plan.plan_text.as_deref() {
        None => println!(
            "{}",
            "The planner returned an empty response. Try a different location.".yellow()
        ),
        Some(text) => match parse_plan(text) {
            Some(parsed) => print_structured(&parsed),
            None => println!("{}", text),
        },
    }

    if raw {
        println!();
        println!("{}", "Raw response events:".bold());
        for event in &plan.events {
            println!("  {}", describe_event(event));
        }
        println!(
            "{}",
            serde_json::to_string_pretty(&plan.raw).unwrap_or_else(|_| plan.raw.to_string())
        );
    }
}

fn print_structured(parsed: &ParsedPlan) {
    for line in &parsed.header {
        println!("{}", line.dimmed());
    }
    if !parsed.header.is_empty() {
        println!();
    }

    for (i, activity) in parsed.activities.iter().enumerate() {
        println!("{} {}", format!("{:>2}.", i + 1).cyan(), activity.title.bold());
        if let Some(description) = &activity.description {
            println!("    {}", description);
        }
    }

    if let Some(disclaimer) = &parsed.disclaimer {
        println!();
        println!("{}", disclaimer.dimmed().italic());
    }
}

fn print_plan_json(plan: &GeneratedPlan, raw: bool) -> Result<()> {
    let mut out = serde_json::json!({ "plan_text": plan.plan_text });

    if let Some(text) = plan.plan_text.as_deref()
        && let Some(parsed) = parse_plan(text)
    {
        out["activities"] = serde_json::json!(
            parsed
                .activities
                .iter()
                .map(|a| serde_json::json!({ "title": a.title, "description": a.description }))
                .collect::<Vec<_>>()
        );
    }

    if raw {
        out["events"] = plan.raw.clone();
    }

    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

/// One summary line per event: time, author, part count
fn describe_event(event: &ResponseEvent) -> String {
    let time = event
        .timestamp
        .and_then(|ts| chrono::DateTime::from_timestamp(ts as i64, 0))
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string());
    let author = event.author.as_deref().unwrap_or("(unknown)");
    format!("{} {} ({} text parts)", time, author, event.text_parts().count())
}
