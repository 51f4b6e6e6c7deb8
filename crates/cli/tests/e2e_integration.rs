//! End-to-end integration tests for SmartDoc.
//!
//! These tests exercise the full pipeline from an uploaded file to a
//! grounded answer, plus the `smartdoc` binary's inspection commands.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

use smartdoc_assistant::{AssistantConfig, ChunkCache, DocumentAssistant, question_statistics};
use smartdoc_config::AppConfig;
use smartdoc_context::{ContextAssembler, chunk, select};
use smartdoc_core::error::{ExtractionError, ProviderError};
use smartdoc_core::message::Message;
use smartdoc_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};
use smartdoc_core::{AssemblyError, Document, DocumentId, Session};
use smartdoc_ingest::{DocumentExtractor, UploadPolicy};

// ── Mock Provider ────────────────────────────────────────────────────────

/// A mock provider that returns scripted responses in sequence and keeps
/// the prompts it was sent.
struct ScriptedProvider {
    responses: std::sync::Mutex<Vec<String>>,
    prompts: std::sync::Mutex<Vec<String>>,
}

impl ScriptedProvider {
    fn new(responses: &[&str]) -> Self {
        Self {
            responses: std::sync::Mutex::new(responses.iter().map(|s| s.to_string()).collect()),
            prompts: std::sync::Mutex::new(Vec::new()),
        }
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "e2e_mock"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let mut prompts = self.prompts.lock().unwrap();
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            panic!("ScriptedProvider exhausted: call #{}", prompts.len());
        }
        prompts.push(request.messages[0].content.clone());
        Ok(text_response(&responses.remove(0)))
    }
}

fn text_response(text: &str) -> ProviderResponse {
    ProviderResponse {
        message: Message::assistant(text),
        usage: Some(Usage {
            prompt_tokens: 10,
            completion_tokens: 5,
            total_tokens: 15,
        }),
        model: "mock".into(),
    }
}

const HANDBOOK: &str = "Employee Handbook\n\n\
    All staff receive twenty days of paid vacation per year. \
    Unused vacation days may be carried into the next year, up to five days.\n\n\
    Remote work is permitted three days per week. \
    Managers must approve any exception to the remote work schedule.\n\n\
    Expense reports are due within thirty days of purchase. \
    Receipts are required for every expense above twenty five dollars.\n\n\
    The main conclusion of the annual survey was that flexible schedules improve retention.";

fn write_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn small_chunks_config() -> AssistantConfig {
    let mut app = AppConfig::default();
    app.chunking.chunk_size = 160;
    app.chunking.overlap = 20;
    app.retrieval.max_context_tokens = 60;
    AssistantConfig::from_app_config(&app)
}

// ── E2E: Upload → Answer Pipeline ────────────────────────────────────────

#[tokio::test]
async fn e2e_upload_chunk_answer_with_citations() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "handbook.txt", HANDBOOK.as_bytes());

    let extracted = DocumentExtractor::default().extract_path(&path).unwrap();
    let doc = extracted.document;

    let provider = Arc::new(ScriptedProvider::new(&[
        "Answer: Expense reports are due within thirty days.\nReference: [1]",
        "Answer: Receipts are needed above twenty five dollars.\nReference: [1]",
    ]));
    let assistant = DocumentAssistant::new(provider.clone(), small_chunks_config()).unwrap();

    let mut session = Session::new();
    session.load_document(doc.id().clone(), &extracted.file_name);
    let mut cache = ChunkCache::new();
    let chunks = assistant.chunks(&mut cache, &doc).unwrap().to_vec();
    assert!(chunks.len() > 1);

    let answer = assistant
        .answer_question(&mut session, &chunks, "When are expense reports due?")
        .await
        .unwrap();

    assert_eq!(answer.answer, "Expense reports are due within thirty days.");
    assert!(answer.context_tokens <= 60);
    let top = &answer.citations[0];
    assert_eq!(&top.document_id, doc.id());
    assert!(
        doc.slice(top.start_offset, top.end_offset)
            .unwrap()
            .contains("Expense reports")
    );

    // Second question reuses the cached chunks and carries history.
    let chunks_again = assistant.chunks(&mut cache, &doc).unwrap().to_vec();
    assert_eq!(chunks, chunks_again);
    assert_eq!(cache.hits(), 1);

    assistant
        .answer_question(&mut session, &chunks_again, "Which expenses need receipts?")
        .await
        .unwrap();

    let prompts = provider.prompts();
    assert!(prompts[1].contains("Q: When are expense reports due?"));
    assert_eq!(session.turns.len(), 2);
}

#[tokio::test]
async fn e2e_summary_and_challenge_flow() {
    let doc = Document::new(DocumentId::from("handbook"), HANDBOOK);
    let provider = Arc::new(ScriptedProvider::new(&[
        "Staff get twenty vacation days and may work remotely three days a week.",
        "Q1: How many vacation days carry over?\nA1: Up to five.\n\n\
         Q2: Who approves remote exceptions?\nA2: Managers.\n\n\
         Q3: What did the survey conclude?\nA3: Flexible schedules improve retention.",
        "Score: 5\nFeedback: Correct.\nJustification: Paragraph two.",
        "Score: 2/5\nFeedback: Incomplete.\nJustification: Paragraph three.",
    ]));
    let assistant = DocumentAssistant::new(provider.clone(), AssistantConfig::default()).unwrap();
    let mut session = Session::new();
    session.load_document(doc.id().clone(), "handbook.txt");

    let summary = assistant.summarize(&doc).await.unwrap();
    assert!(summary.starts_with("Staff get twenty"));
    // Key sentence with "main conclusion" leads the summary input.
    assert!(
        provider.prompts()[0].contains(
            "Document content: The main conclusion of the annual survey was that flexible schedules improve retention"
        )
    );

    assert_eq!(assistant.start_challenge(&mut session, &doc).await, 3);
    let stats = question_statistics(&session.challenge.questions);
    assert_eq!(stats.total, 3);

    let first = assistant
        .submit_challenge_answer(&mut session, &doc, "Five days")
        .await
        .unwrap();
    let second = assistant
        .submit_challenge_answer(&mut session, &doc, "HR")
        .await
        .unwrap();

    assert_eq!(first.score, 5);
    assert_eq!(second.score, 2);
    assert_eq!(session.challenge.current_index, 2);
    assert!(!session.challenge.is_complete());
    assert_eq!(session.challenge.total_score(), 7);
}

#[test]
fn e2e_upload_rejections() {
    let dir = tempfile::tempdir().unwrap();
    let extractor = DocumentExtractor::new(UploadPolicy {
        max_file_size: 64,
        ..UploadPolicy::default()
    });

    let big = write_file(dir.path(), "big.txt", HANDBOOK.as_bytes());
    assert!(matches!(
        extractor.extract_path(&big),
        Err(ExtractionError::FileTooLarge { max: 64, .. })
    ));

    let docx = write_file(dir.path(), "memo.docx", b"hello");
    assert!(matches!(
        extractor.extract_path(&docx),
        Err(ExtractionError::UnsupportedFormat(_))
    ));
}

#[test]
fn e2e_context_assembly_matches_free_functions() {
    let doc = Document::new(DocumentId::from("handbook"), HANDBOOK);
    let chunks = chunk(&doc, 1500, 150).unwrap();
    assert_eq!(chunks, ContextAssembler::with_defaults().chunk(&doc).unwrap());

    let window = select(&chunks, "remote work", 2000).unwrap();
    assert_eq!(window.len(), 1);
    assert_eq!(window.citations[0].end_offset, doc.char_len());

    assert!(matches!(
        select(&chunks, "remote work", 0),
        Err(AssemblyError::InvalidConfiguration(_))
    ));
    let tiny = select(&chunks, "remote work", 1).unwrap();
    assert!(tiny.is_empty());
    assert_eq!(tiny.stats.dropped, 1);
}

// ── E2E: Binary ──────────────────────────────────────────────────────────

fn smartdoc(dir: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_smartdoc"))
        .arg("--config")
        .arg(dir.join("absent.toml"))
        .args(args)
        .env_remove("SMARTDOC_API_KEY")
        .env_remove("GEMINI_API_KEY")
        .env_remove("SMARTDOC_MODEL")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn cli_chunk_json_covers_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "handbook.txt", HANDBOOK.as_bytes());

    let out = smartdoc(
        dir.path(),
        &["chunk", path.to_str().unwrap(), "--chunk-size", "120", "--overlap", "10", "--json"],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let chunks: Vec<serde_json::Value> = serde_json::from_slice(&out.stdout).unwrap();
    assert!(chunks.len() > 2);
    assert_eq!(chunks[0]["start_offset"], 0);
    let last_end = chunks.last().unwrap()["end_offset"].as_u64().unwrap();
    let cleaned = DocumentExtractor::default().extract_path(&path).unwrap();
    assert_eq!(last_end as usize, cleaned.document.char_len());
}

#[test]
fn cli_context_json_respects_budget() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "handbook.txt", HANDBOOK.as_bytes());

    let out = smartdoc(
        dir.path(),
        &["context", path.to_str().unwrap(), "--query", "vacation days", "--max-tokens", "40", "--json"],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let window: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert!(window["total_tokens"].as_u64().unwrap() <= 40);
    assert_eq!(window["max_tokens"], 40);
}

#[test]
fn cli_prompt_is_grounded() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "handbook.txt", HANDBOOK.as_bytes());

    let out = smartdoc(
        dir.path(),
        &["prompt", path.to_str().unwrap(), "--question", "How many vacation days?"],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Based ONLY on the following document content"));
    assert!(stdout.contains("twenty days of paid vacation"));
    assert!(stdout.contains("Question: How many vacation days?"));
}

#[test]
fn cli_rejects_short_question() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "handbook.txt", HANDBOOK.as_bytes());

    let out = smartdoc(dir.path(), &["prompt", path.to_str().unwrap(), "--question", "hm"]);
    assert!(!out.status.success());
}

#[test]
fn cli_config_init_and_show() {
    let dir = tempfile::tempdir().unwrap();

    let init = smartdoc(dir.path(), &["config", "--init"]);
    assert!(init.status.success());
    let parsed: AppConfig = toml::from_str(&String::from_utf8_lossy(&init.stdout)).unwrap();
    assert_eq!(parsed.chunking.chunk_size, 1500);

    let key_file = write_file(dir.path(), "keyed.toml", b"api_key = \"secret-key-123\"\n");
    let show = Command::new(env!("CARGO_BIN_EXE_smartdoc"))
        .args(["--config", key_file.to_str().unwrap(), "config", "--json"])
        .output()
        .unwrap();
    assert!(show.status.success(), "{}", String::from_utf8_lossy(&show.stderr));
    let stdout = String::from_utf8_lossy(&show.stdout);
    assert!(!stdout.contains("secret-key-123"));
    assert!(stdout.contains("***"));
}

#[test]
fn cli_config_flags_short_api_key() {
    let dir = tempfile::tempdir().unwrap();
    let key_file = write_file(dir.path(), "short.toml", b"api_key = \"abc\"\n");

    let show = Command::new(env!("CARGO_BIN_EXE_smartdoc"))
        .args(["--config", key_file.to_str().unwrap(), "config"])
        .env_remove("SMARTDOC_API_KEY")
        .env_remove("GEMINI_API_KEY")
        .output()
        .unwrap();
    assert!(show.status.success(), "{}", String::from_utf8_lossy(&show.stderr));
    let stdout = String::from_utf8_lossy(&show.stdout);
    assert!(stdout.contains("API key:   set (invalid)"));
    assert!(stdout.contains("API key appears to be invalid (too short)"));
    assert!(stdout.contains("***"));
}
