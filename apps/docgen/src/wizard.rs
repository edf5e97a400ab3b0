//! Interactive loop: one command per line against a shared controller.

use std::{io::Write as _, sync::Arc};

use anyhow::{anyhow, Context};
use client_core::WizardController;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::{
    commands::{parse_command, AnswerTarget, WizardCommand, HELP},
    display::{format_coverage, format_document, format_health, format_questions, format_status},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub async fn run_interactive(controller: Arc<WizardController>) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("Requirements document wizard. Type 'help' for commands.");

    loop {
        print!("[{}] > ", controller.current_step().await);
        std::io::stdout().flush().context("failed to flush prompt")?;

        let Some(line) = lines.next_line().await.context("failed to read input")? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        match dispatch(&controller, command).await {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(err) => {
                println!("error: {err:#}");
                let retryable = controller
                    .snapshot()
                    .await
                    .error
                    .is_some_and(|overlay| overlay.is_retryable());
                if retryable {
                    println!("(the same command can be retried)");
                }
            }
        }
    }
    Ok(())
}

pub async fn dispatch(controller: &WizardController, command: WizardCommand) -> anyhow::Result<Flow> {
    debug!(command = command.name(), "dispatching wizard command");

    match command {
        WizardCommand::Help => println!("{HELP}"),
        WizardCommand::Status => print!("{}", format_status(&controller.snapshot().await)),
        WizardCommand::Health => println!("{}", format_health(&controller.health().await?)),
        WizardCommand::SelectType { tag } => {
            controller.select_document_tag(&tag).await?;
        }
        WizardCommand::Analyze { requirement } => {
            let outcome = controller.analyze(&requirement).await?;
            print!(
                "{}",
                format_coverage(&outcome.coverage, Some(&outcome.generate_label))
            );
        }
        WizardCommand::Coverage => {
            let state = controller.snapshot().await;
            match &state.coverage {
                Some(coverage) => print!(
                    "{}",
                    format_coverage(coverage, state.generate_label.as_deref())
                ),
                None => println!("Nothing analyzed yet."),
            }
        }
        WizardCommand::Questions => {
            controller.open_questions().await?;
            print!("{}", format_questions(&controller.answer_form().await));
        }
        WizardCommand::Answer { target, value } => {
            let element = match target {
                AnswerTarget::Element(element) => element,
                AnswerTarget::Position(position) => controller
                    .answer_form()
                    .await
                    .fields()
                    .get(position - 1)
                    .map(|field| field.element.clone())
                    .ok_or_else(|| anyhow!("there is no question {position}"))?,
            };
            controller.set_answer(&element, &value).await?;
        }
        WizardCommand::Generate => {
            let rendered = controller.generate().await?;
            let state = controller.snapshot().await;
            print!(
                "{}",
                format_document(&rendered, state.section_images.as_map())
            );
        }
        WizardCommand::Show => {
            let state = controller.snapshot().await;
            match &state.rendered {
                Some(rendered) => print!(
                    "{}",
                    format_document(rendered, state.section_images.as_map())
                ),
                None => println!("No document generated yet."),
            }
        }
        WizardCommand::Html { path } => {
            let html = controller
                .rendered_html()
                .await
                .ok_or_else(|| anyhow!("no document generated yet"))?;
            tokio::fs::write(&path, html)
                .await
                .with_context(|| format!("failed to write '{}'", path.display()))?;
            println!("Wrote {}", path.display());
        }
        WizardCommand::AttachImage { section, path } => {
            let images = controller.add_image(&section, &path).await?;
            println!("{section}: {} image(s)", images.len());
        }
        WizardCommand::Caption {
            section,
            index,
            caption,
        } => {
            controller.update_caption(&section, index, &caption).await?;
        }
        WizardCommand::RemoveImage { section, index } => {
            let images = controller.remove_image(&section, index).await?;
            println!("{section}: {} image(s)", images.len());
        }
        WizardCommand::Export { format } => {
            let path = controller.export(format).await?;
            println!("Saved {}", path.display());
        }
        WizardCommand::Back => {
            controller.back().await;
        }
        WizardCommand::StartOver => controller.start_over().await,
        WizardCommand::Dismiss => controller.dismiss_error().await,
        WizardCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}
