//! `smartdoc chunk`: list the chunks of a document.

use std::path::Path;

use smartdoc_context::{Chunker, ChunkerConfig};

use super::{CmdResult, load_config, load_document, preview};

pub fn run(
    config_path: Option<&Path>,
    file: &Path,
    chunk_size: Option<usize>,
    overlap: Option<usize>,
    json: bool,
) -> CmdResult {
    let config = load_config(config_path)?;
    let extracted = load_document(&config, file)?;

    let chunker_config = ChunkerConfig {
        chunk_size: chunk_size.unwrap_or(config.chunking.chunk_size),
        overlap: overlap.unwrap_or(config.chunking.overlap),
        lookback: config.chunking.lookback,
        lookahead: config.chunking.lookahead,
    };
    let chunks = Chunker::new(chunker_config)?.chunk(&extracted.document)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&chunks)?);
        return Ok(());
    }

    println!("📄 {} ({} chars)", extracted.file_name, extracted.document.char_len());
    println!(
        "   chunk_size={} overlap={} → {} chunks",
        chunker_config.chunk_size,
        chunker_config.overlap,
        chunks.len()
    );
    println!();
    for c in &chunks {
        println!(
            "  [{:>3}] {:>6}..{:<6} {:>5} chars  {}",
            c.sequence_index,
            c.start_offset,
            c.end_offset,
            c.char_len(),
            preview(&c.text, 60)
        );
    }

    Ok(())
}
