//! `smartdoc prompt`: show the grounded prompt for a question.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use smartdoc_assistant::{AssistantConfig, DocumentAssistant, OfflineProvider};
use smartdoc_core::{Citation, Session};

use super::{CmdResult, load_config, load_document};

#[derive(Serialize)]
struct PromptOutput<'a> {
    prompt: &'a str,
    citations: &'a [Citation],
    total_tokens: usize,
    max_tokens: usize,
}

pub fn run(config_path: Option<&Path>, file: &Path, question: &str, json: bool) -> CmdResult {
    let config = load_config(config_path)?;
    let extracted = load_document(&config, file)?;

    let assistant = DocumentAssistant::new(
        Arc::new(OfflineProvider),
        AssistantConfig::from_app_config(&config),
    )?;
    let chunks = assistant.assembler().chunk(&extracted.document)?;

    let mut session = Session::new();
    session.load_document(extracted.document.id().clone(), &extracted.file_name);
    let prepared = assistant.prepare_answer(&session, &chunks, question)?;

    if json {
        let out = PromptOutput {
            prompt: &prepared.prompt,
            citations: &prepared.window.citations,
            total_tokens: prepared.window.total_tokens,
            max_tokens: prepared.window.max_tokens,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{}", prepared.prompt);
    println!("---");
    let cites: Vec<String> = prepared
        .window
        .citations
        .iter()
        .map(ToString::to_string)
        .collect();
    println!(
        "citations: {}  ({} / {} tokens)",
        if cites.is_empty() { "none".to_string() } else { cites.join(", ") },
        prepared.window.total_tokens,
        prepared.window.max_tokens
    );

    Ok(())
}
