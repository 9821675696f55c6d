//! Configuration loading and tuning parameters.

use crate::defaults;
use crate::error::{CapstreamError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub provider: ProviderConfig,
    pub timing: TimingConfig,
    pub query: QueryConfig,
    pub polling: PollingConfig,
}

/// Transcription provider configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProviderConfig {
    /// API base URL (AssemblyAI-shaped wire format)
    pub base_url: String,
    /// API key; can also come from `CAPSTREAM_API_KEY`
    pub api_key: Option<String>,
}

/// Tuning parameters for timestamp synthesis.
///
/// The punctuation look-back window has no ground truth behind it; it is a
/// smoothness heuristic, so every knob is exposed here rather than hardcoded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimingConfig {
    /// Fraction of the per-word budget used as punctuation look-back
    pub punct_lookback_frac: f64,
    /// Hard cap on the punctuation look-back window (ms)
    pub punct_lookback_max_ms: u64,
    /// Look-back clamp bounds when reconciling punctuation from full text (ms)
    pub reconcile_gap_min_ms: u64,
    pub reconcile_gap_max_ms: u64,
    /// Span assumed for a word missing its end timestamp (ms)
    pub word_fallback_span_ms: u64,
    /// Confidence assigned when the source provides none
    pub default_confidence: f32,
}

/// Tuning parameters for playhead queries
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct QueryConfig {
    /// Grace period after a sentence's end during which it stays active (ms)
    pub sentence_grace_ms: u64,
    /// Rotation period for the short-sentence hook (ms)
    pub hook_rotate_interval_ms: u64,
}

/// Job polling configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PollingConfig {
    /// Interval between job polls (ms)
    pub interval_ms: u64,
    /// Hard deadline before the job is abandoned (ms)
    pub timeout_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::PROVIDER_BASE_URL.to_string(),
            api_key: None,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            punct_lookback_frac: defaults::PUNCT_LOOKBACK_FRAC,
            punct_lookback_max_ms: defaults::PUNCT_LOOKBACK_MAX_MS,
            reconcile_gap_min_ms: defaults::RECONCILE_GAP_MIN_MS,
            reconcile_gap_max_ms: defaults::RECONCILE_GAP_MAX_MS,
            word_fallback_span_ms: defaults::WORD_FALLBACK_SPAN_MS,
            default_confidence: defaults::DEFAULT_CONFIDENCE,
        }
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            sentence_grace_ms: defaults::SENTENCE_GRACE_MS,
            hook_rotate_interval_ms: defaults::HOOK_ROTATE_INTERVAL_MS,
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_ms: defaults::POLL_INTERVAL_MS,
            timeout_ms: defaults::POLL_TIMEOUT_MS,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if the file is missing.
    ///
    /// Invalid TOML is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(CapstreamError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - CAPSTREAM_API_KEY → provider.api_key
    /// - CAPSTREAM_PROVIDER_URL → provider.base_url
    /// - CAPSTREAM_POLL_INTERVAL_MS → polling.interval_ms
    /// - CAPSTREAM_POLL_TIMEOUT_MS → polling.timeout_ms
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(key) = std::env::var("CAPSTREAM_API_KEY")
            && !key.trim().is_empty()
        {
            self.provider.api_key = Some(key.trim().to_string());
        }
        if let Ok(url) = std::env::var("CAPSTREAM_PROVIDER_URL")
            && !url.is_empty()
        {
            self.provider.base_url = url;
        }
        if let Ok(interval) = std::env::var("CAPSTREAM_POLL_INTERVAL_MS")
            && let Ok(ms) = interval.parse::<u64>()
        {
            self.polling.interval_ms = ms;
        }
        if let Ok(timeout) = std::env::var("CAPSTREAM_POLL_TIMEOUT_MS")
            && let Ok(ms) = timeout.parse::<u64>()
        {
            self.polling.timeout_ms = ms;
        }
        self
    }

    /// Default config file path: `~/.config/capstream/config.toml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join("capstream")
            .join("config.toml")
    }
}
