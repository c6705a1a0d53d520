//! # gloss-cli
//!
//! Command-line streaming translator. Reads English text from the argument
//! or stdin, submits it to the translation queue, and renders sentence
//! events as they stream in: previews on stderr, completed sentences with
//! their grammar breakdown on stdout.

#![deny(unsafe_code)]

use std::io::{Read, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use gloss_core::text::truncate_with_suffix;
use gloss_core::{Chunk, Provenance, Sentence, TranslateEvent};
use gloss_llm::{ChatClient, ClientConfig};
use gloss_runtime::TranslationQueue;
use gloss_settings::GlossSettings;
use tokio::sync::broadcast::error::RecvError;
use tracing::debug;

/// Streaming English→Chinese translator.
#[derive(Parser, Debug)]
#[command(name = "gloss", about = "Streaming translator with grammar analysis")]
struct Cli {
    /// Text to translate; reads stdin when omitted.
    text: Option<String>,

    /// Chat-completions URL (overrides settings).
    #[arg(long)]
    endpoint: Option<String>,

    /// Model identifier (overrides settings).
    #[arg(long)]
    model: Option<String>,

    /// API key (overrides settings and GLOSS_API_KEY).
    #[arg(long)]
    api_key: Option<String>,

    /// Settings file path (default: ~/.gloss/settings.json).
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Minimum log level when RUST_LOG is unset.
    #[arg(long, default_value = "warn")]
    log_level: String,
}

/// Initialize the global tracing subscriber with stderr output.
fn init_subscriber(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact();

    // set_global_default is a no-op if already set
    let _ = subscriber.try_init();
}

fn load_settings(args: &Cli) -> Result<GlossSettings> {
    let path = args
        .settings
        .clone()
        .unwrap_or_else(gloss_settings::settings_path);
    let mut settings =
        gloss_settings::load_settings_from_path(&path).context("failed to load settings")?;
    if let Some(endpoint) = &args.endpoint {
        settings.api.endpoint.clone_from(endpoint);
    }
    if let Some(model) = &args.model {
        settings.api.model.clone_from(model);
    }
    if let Some(api_key) = &args.api_key {
        settings.api.api_key.clone_from(api_key);
    }
    Ok(settings)
}

fn read_input(args: &Cli) -> Result<String> {
    let text = match &args.text {
        Some(text) => text.clone(),
        None => {
            let mut buf = String::new();
            let _ = std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };
    let text = text.trim().to_owned();
    if text.is_empty() {
        bail!("nothing to translate");
    }
    Ok(text)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_subscriber(&args.log_level);

    let settings = load_settings(&args)?;
    let text = read_input(&args)?;

    let client = ChatClient::new(ClientConfig {
        endpoint: settings.api.endpoint,
        model: settings.api.model,
        api_key: settings.api.api_key,
        temperature: settings.api.temperature,
        timeout: Duration::from_millis(settings.api.timeout_ms),
        system_prompt: settings.api.system_prompt,
    });
    let queue = TranslationQueue::new(Arc::new(client));

    // Subscribe before submitting so no event is missed.
    let mut events = queue.subscribe();
    queue.submit(text, Provenance::Manual);

    {
        let queue = queue.clone();
        let _ = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                queue.cancel();
            }
        });
    }

    loop {
        let event = match events.recv().await {
            Ok(event) => event,
            Err(RecvError::Lagged(skipped)) => {
                debug!(skipped, "event receiver lagged");
                continue;
            }
            Err(RecvError::Closed) => bail!("translation queue shut down unexpectedly"),
        };
        match event {
            TranslateEvent::JobStarted { .. } => {}
            TranslateEvent::Sentence { sentence } => {
                if sentence.partial {
                    show_preview(&sentence);
                } else {
                    clear_preview();
                    render_sentence(&sentence);
                }
            }
            TranslateEvent::JobCompleted { result } => {
                clear_preview();
                debug!(
                    sentences = result.sentences.len(),
                    elapsed_ms = result.elapsed_ms,
                    "translation complete"
                );
                return Ok(());
            }
            TranslateEvent::JobFailed { error } => {
                clear_preview();
                if error.is_silent() {
                    return Ok(());
                }
                bail!("{error}");
            }
        }
    }
}

/// Overwrite the status line on stderr with the growing preview.
fn show_preview(sentence: &Sentence) {
    let mut stderr = std::io::stderr().lock();
    let _ = write!(
        stderr,
        "\r\u{1b}[2K… {}",
        truncate_with_suffix(&sentence.target, 80, "…")
    );
    let _ = stderr.flush();
}

/// Erase the preview status line.
fn clear_preview() {
    let mut stderr = std::io::stderr().lock();
    let _ = write!(stderr, "\r\u{1b}[2K");
    let _ = stderr.flush();
}

fn render_sentence(sentence: &Sentence) {
    println!("{}", sentence.source);
    println!("{}", sentence.target);
    if let Some(analysis) = &sentence.analysis {
        if let Some(structure) = &analysis.structure {
            println!("  structure: {structure}");
        }
        if let Some(tense) = &analysis.tense {
            println!("  tense: {tense}");
        }
        render_chunks(&analysis.chunks, 1);
        if let Some(tip) = &analysis.tip {
            println!("  tip: {tip}");
        }
    }
    println!();
}

fn render_chunks(chunks: &[Chunk], depth: usize) {
    for chunk in chunks {
        let indent = "  ".repeat(depth);
        if chunk.role.is_empty() {
            println!("{indent}{} · {}", chunk.source, chunk.target);
        } else {
            println!("{indent}{} · {}  ({})", chunk.source, chunk.target, chunk.role);
        }
        render_chunks(&chunk.children, depth + 1);
    }
}
