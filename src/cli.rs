//! Command-line interface for capstream
//!
//! Provides argument parsing using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Speech transcripts to timed caption tokens
#[derive(Parser, Debug)]
#[command(
    name = "capstream",
    version,
    about = "Speech transcripts to timed caption tokens"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Transcribe a media source end to end and print the token stream
    Transcribe {
        /// Media reference: local path, file:// URL, or http(s) URL
        source: String,
    },

    /// Tokenize transcript segments (JSON on stdin or from a file)
    Tokenize {
        /// Read segments from this file instead of stdin
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,
    },

    /// Tokenize bare transcript text over an explicit time window
    Parse {
        /// Transcript text
        text: String,

        /// Window start in milliseconds
        #[arg(long, value_name = "MS", default_value = "0")]
        start_ms: u64,

        /// Window end in milliseconds (default: 30 second preview window)
        #[arg(long, value_name = "MS", default_value = "30000")]
        end_ms: u64,
    },

    /// Group a token stream (JSON on stdin or from a file) into sentences
    Sentences {
        /// Read tokens from this file instead of stdin
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,
    },
}
