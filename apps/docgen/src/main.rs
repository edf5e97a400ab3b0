use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use client_core::{AnalysisService, HttpAnalysisClient, WizardController};
use shared::domain::{DocumentType, ExportFormat, SectionId};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod display;
mod progress;
mod script;
mod wizard;

use config::{load_settings, normalize_service_url, prepare_download_dir};
use script::{parse_key_value, run_scripted, ScriptedRun};

#[derive(Parser, Debug)]
#[command(name = "docgen", about = "Requirements document wizard")]
struct Cli {
    /// Config file; defaults to ./docgen.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    service_url: Option<String>,
    #[arg(long, global = true)]
    download_dir: Option<PathBuf>,
    /// user-story, brd, frd, srd or cr.
    #[arg(long = "type", global = true)]
    document_type: Option<DocumentType>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the analysis service is up.
    Health,
    /// Interactive wizard.
    Wizard,
    /// Analyze, generate and export in one pass.
    Run(RunArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    #[arg(long)]
    requirement: String,
    /// ELEMENT=ANSWER, repeatable.
    #[arg(long = "answer", value_parser = parse_key_value)]
    answers: Vec<(String, String)>,
    /// SECTION=PATH, repeatable.
    #[arg(long = "image", value_parser = parse_key_value)]
    images: Vec<(String, String)>,
    /// word or pdf, repeatable.
    #[arg(long = "export")]
    exports: Vec<ExportFormat>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings(cli.config.as_deref())?;
    if let Some(service_url) = cli.service_url {
        settings.service_url = service_url;
    }
    if let Some(download_dir) = cli.download_dir {
        settings.download_dir = download_dir;
    }
    if let Some(document_type) = cli.document_type {
        settings.document_type = document_type;
    }

    let service_url = normalize_service_url(&settings.service_url)?;
    let client = HttpAnalysisClient::new(&service_url)
        .with_context(|| format!("cannot use service url '{service_url}'"))?;
    info!(
        service_url = %client.base_url(),
        document_type = %settings.document_type,
        "docgen starting"
    );

    if let Command::Health = cli.command {
        let health = client
            .health()
            .await
            .with_context(|| format!("health check against {service_url} failed"))?;
        println!("{}", display::format_health(&health));
        return Ok(());
    }

    let download_dir = prepare_download_dir(&settings.download_dir)?;
    let controller = WizardController::new(Arc::new(client), download_dir);
    let progress = progress::spawn_progress_printer(controller.subscribe_events());
    controller.select_document_type(settings.document_type).await;

    let result = match cli.command {
        Command::Health => Ok(()),
        Command::Wizard => wizard::run_interactive(controller.clone()).await,
        Command::Run(args) => {
            let run = ScriptedRun {
                requirement: args.requirement,
                answers: args.answers,
                images: args
                    .images
                    .into_iter()
                    .map(|(section, path)| (SectionId::new(section), PathBuf::from(path)))
                    .collect(),
                exports: args.exports,
            };
            run_scripted(&controller, &run).await.map(|saved| {
                for path in saved {
                    println!("Saved {}", path.display());
                }
            })
        }
    };

    progress.abort();
    result
}
