//! `smartdoc config`: configuration commands.

use std::path::Path;
use std::sync::Arc;

use smartdoc_assistant::{AssistantConfig, DocumentAssistant, OfflineProvider};
use smartdoc_config::AppConfig;

use super::{CmdResult, load_config};

const REDACTED: &str = "***";

pub fn init() -> CmdResult {
    print!("{}", AppConfig::default_toml());
    Ok(())
}

pub async fn show(config_path: Option<&Path>, json: bool) -> CmdResult {
    let mut config = load_config(config_path)?;
    let has_key = config.has_api_key();
    let key_problem = config.validate_api_key().err();
    if config.api_key.is_some() {
        config.api_key = Some(REDACTED.into());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| AppConfig::config_dir().join("config.toml"));

    let assistant = DocumentAssistant::new(
        Arc::new(OfflineProvider),
        AssistantConfig::from_app_config(&config),
    )?;
    let provider_ok = assistant.check_provider().await;

    println!("📄 SmartDoc configuration");
    println!("   File:      {}", path.display());
    println!("   Model:     {}", config.model);
    let key_status = match (has_key, &key_problem) {
        (false, _) => "not set",
        (true, Some(_)) => "set (invalid)",
        (true, None) => "set",
    };
    println!("   API key:   {key_status}");
    println!("   Provider:  {}", if provider_ok { "ready" } else { "offline" });
    println!();
    println!("{}", toml::to_string_pretty(&config)?);

    if !has_key {
        println!("⚠️  No API key set (set SMARTDOC_API_KEY or GEMINI_API_KEY)");
    } else if let Some(problem) = key_problem {
        tracing::warn!(error = %problem, "configured API key looks invalid");
        println!("⚠️  {problem}");
    }

    Ok(())
}
