//! Logging configuration and initialization.
//!
//! Verbosity comes from a preset picked by CLI flags, optionally refined
//! per target with `--log frame=debug`. `RUST_LOG`, when set, replaces the
//! whole filter.

use std::collections::BTreeMap;
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Prefix shared by every target this server logs under.
const TARGET_PREFIX: &str = "bisou";

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging preset levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogPreset {
    /// Startup, frame transitions and purchases; store and image problems only.
    #[default]
    Production,
    Verbose,
    Debug,
    Trace,
    /// Warnings and errors only.
    Quiet,
}

impl LogPreset {
    /// Pick a preset from CLI flags. Quieter flags win over louder ones.
    pub fn from_flags(verbose: bool, debug: bool, trace: bool, quiet: bool) -> Self {
        match (quiet, trace, debug, verbose) {
            (true, ..) => LogPreset::Quiet,
            (_, true, ..) => LogPreset::Trace,
            (_, _, true, _) => LogPreset::Debug,
            (_, _, _, true) => LogPreset::Verbose,
            _ => LogPreset::Production,
        }
    }

    fn directives(&self) -> Vec<String> {
        let directives: &[&str] = match self {
            LogPreset::Production => &[
                "bisou::startup=info",
                "bisou::frame=info",
                "bisou::purchase=info",
                "bisou::api=info",
                "bisou::store=warn",
                "bisou::image=warn",
                "tower_http=warn",
            ],
            LogPreset::Verbose => &["bisou=info", "tower_http=info"],
            LogPreset::Debug => &["bisou=debug", "tower_http=debug"],
            LogPreset::Trace => &["bisou=trace", "tower_http=trace"],
            LogPreset::Quiet => &["bisou=warn", "tower_http=error"],
        };
        directives.iter().map(|d| d.to_string()).collect()
    }
}

/// Logging configuration built from CLI arguments.
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    pub preset: LogPreset,
    /// Per-target level overrides, keyed by full target name.
    pub overrides: BTreeMap<String, Level>,
    pub format: LogFormat,
}

impl LogConfig {
    /// Create a new LogConfig from CLI arguments.
    ///
    /// Each override is `target=level`; several may be joined with commas.
    /// Bare targets are placed under `bisou::`. Malformed entries are skipped.
    pub fn from_cli(
        verbose: bool,
        debug: bool,
        trace: bool,
        quiet: bool,
        log_overrides: Vec<String>,
        format: LogFormat,
    ) -> Self {
        let overrides = log_overrides
            .iter()
            .flat_map(|arg| arg.split(','))
            .filter_map(|part| {
                let (target, level) = part.split_once('=')?;
                let level = level.trim().parse::<Level>().ok()?;
                Some((qualify_target(target.trim()), level))
            })
            .collect();

        Self {
            preset: LogPreset::from_flags(verbose, debug, trace, quiet),
            overrides,
            format,
        }
    }

    /// Filter directives for the preset followed by the overrides.
    pub fn directives(&self) -> String {
        let mut directives = self.preset.directives();
        directives.extend(
            self.overrides
                .iter()
                .map(|(target, level)| format!("{target}={}", level.to_string().to_lowercase())),
        );
        directives.join(",")
    }

    /// Build an EnvFilter from this configuration.
    pub fn build_filter(&self) -> EnvFilter {
        if let Ok(env_filter) = EnvFilter::try_from_default_env() {
            return env_filter;
        }
        EnvFilter::try_new(self.directives()).unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

fn qualify_target(target: &str) -> String {
    if target == TARGET_PREFIX
        || target.starts_with(&format!("{TARGET_PREFIX}::"))
        || target == "tower_http"
    {
        target.to_string()
    } else {
        format!("{TARGET_PREFIX}::{target}")
    }
}

/// Initialize the tracing subscriber with the given configuration.
pub fn init(config: &LogConfig) {
    let filter = config.build_filter();

    match config.format {
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_target(true))
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_span_events(FmtSpan::CLOSE),
                )
                .init();
        }
    }
}
