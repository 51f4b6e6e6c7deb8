//! `smartdoc context`: assemble a context window for a query.

use std::path::Path;

use smartdoc_assistant::AssistantConfig;
use smartdoc_context::ContextAssembler;

use super::{CmdResult, load_config, load_document, preview};

pub fn run(
    config_path: Option<&Path>,
    file: &Path,
    query: &str,
    max_tokens: Option<usize>,
    json: bool,
) -> CmdResult {
    let config = load_config(config_path)?;
    let settings = AssistantConfig::from_app_config(&config);
    let extracted = load_document(&config, file)?;

    let assembler = ContextAssembler::new(settings.chunking, settings.selection)?;
    let chunks = assembler.chunk(&extracted.document)?;
    let window = assembler.select(
        &chunks,
        query,
        max_tokens.unwrap_or(settings.max_context_tokens),
    )?;

    if json {
        println!("{}", serde_json::to_string_pretty(&window)?);
        return Ok(());
    }

    println!("🔎 \"{query}\" in {}", extracted.file_name);
    println!(
        "   {} of {} chunks, {}/{} tokens ({:.0}%), {} dropped",
        window.stats.included,
        window.stats.candidates,
        window.total_tokens,
        window.max_tokens,
        window.utilization_pct(),
        window.stats.dropped
    );
    println!();

    if window.is_empty() {
        println!("   ⚠️  No chunk fits the token budget");
        return Ok(());
    }

    for (i, sc) in window.chunks.iter().enumerate() {
        println!(
            "  [{}] {}  score={:.3} tokens={}",
            i + 1,
            sc.chunk.citation(),
            sc.score,
            sc.tokens
        );
        println!("      {}", preview(&sc.chunk.text, 100));
    }

    Ok(())
}
