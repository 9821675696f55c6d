use anyhow::Result;
use capstream::cli::{Cli, Commands};
use capstream::config::Config;
use capstream::orchestrator::{JobEvent, Orchestrator};
use capstream::provider::http::HttpProvider;
use capstream::sentence::group_sentences;
use capstream::token::{Segment, Token};
use capstream::tokenize::Tokenizer;
use clap::Parser;
use std::io::Read;
use std::sync::atomic::Ordering;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Transcribe { source } => {
            run_transcribe(&config, &source, cli.pretty).await?;
        }
        Commands::Tokenize { input } => {
            let segments: Vec<Segment> = serde_json::from_str(&read_input(input.as_deref())?)?;
            let tokens = Tokenizer::new(config.timing.clone()).tokenize(&segments);
            print_json(&tokens, cli.pretty)?;
        }
        Commands::Parse {
            text,
            start_ms,
            end_ms,
        } => {
            let tokens = Tokenizer::new(config.timing.clone()).parse_text(
                &text,
                start_ms,
                end_ms,
                config.timing.default_confidence,
            );
            print_json(&tokens, cli.pretty)?;
        }
        Commands::Sentences { input } => {
            let tokens: Vec<Token> = serde_json::from_str(&read_input(input.as_deref())?)?;
            let sentences = group_sentences(&tokens);
            print_json(&sentences, cli.pretty)?;
        }
    }

    Ok(())
}

/// Load configuration from file or use defaults.
///
/// Priority order:
/// 1. Custom config path from CLI (--config)
/// 2. Default config path (~/.config/capstream/config.toml)
/// 3. Built-in defaults with environment variable overrides
fn load_config(custom_path: Option<&std::path::Path>) -> Result<Config> {
    let config = if let Some(path) = custom_path {
        Config::load(path)?
    } else {
        Config::load_or_default(&Config::default_path())?
    };
    Ok(config.with_env_overrides())
}

/// Run one transcription job, streaming progress to stderr.
async fn run_transcribe(config: &Config, source: &str, pretty: bool) -> Result<()> {
    let provider = HttpProvider::new(&config.provider)?;
    let (event_tx, event_rx) = crossbeam_channel::unbounded();
    let orchestrator = Orchestrator::with_config(provider, config).with_events(event_tx);

    // Ctrl+C flips the shared cancel flag; the poll loop notices on its next
    // iteration.
    let cancel = orchestrator.cancel_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.store(true, Ordering::SeqCst);
        }
    });

    let progress = std::thread::spawn(move || {
        for event in event_rx {
            render_event(&event);
        }
    });

    let result = orchestrator.transcribe(source).await;
    drop(orchestrator);
    let _unused = progress.join();

    print_json(&result?, pretty)?;
    Ok(())
}

fn render_event(event: &JobEvent) {
    match event {
        JobEvent::Preparing { source_ref } => eprintln!("Preparing {source_ref}..."),
        JobEvent::Uploading { byte_count } => eprintln!("Uploading {byte_count} bytes..."),
        JobEvent::JobStarted { job_id } => eprintln!("Job {job_id} started"),
        JobEvent::Polling { job_id, status } => eprintln!("Job {job_id}: {status:?}"),
        JobEvent::Completed {
            job_id,
            token_count,
        } => eprintln!("Job {job_id} completed: {token_count} tokens"),
        JobEvent::Failed { message } => eprintln!("Failed: {message}"),
    }
}

/// Read JSON input from a file, or stdin when no file is given.
fn read_input(path: Option<&std::path::Path>) -> Result<String> {
    match path {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<()> {
    if pretty {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", serde_json::to_string(value)?);
    }
    Ok(())
}
