//! Structured logging via `tracing`.
//!
//! The library only emits events; installing a subscriber is up to the
//! binary (or the embedding game). [`init_tracing`] installs a compact stderr
//! subscriber whose filter comes from [`TracingConfig`], unless `RUST_LOG` is
//! set, in which case `RUST_LOG` wins.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Once;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

/// Subscriber settings, stored under `logging` in the game config.
///
/// ```ron
/// logging: (
///     default_level: Info,
///     targets: { "dungeon_core::map::generator": Trace },
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TracingConfig {
    pub default_level: LogLevel,
    /// Per-target overrides, keyed by module path
    pub targets: BTreeMap<String, LogLevel>,
    pub show_targets: bool,
    pub show_file_line: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        let targets = BTreeMap::from([
            ("dungeon_core::map".to_string(), LogLevel::Info),
            ("dungeon_core::node".to_string(), LogLevel::Warn),
        ]);
        Self {
            default_level: LogLevel::Info,
            targets,
            show_targets: true,
            show_file_line: false,
        }
    }
}

impl TracingConfig {
    /// `EnvFilter` directive string, e.g. `info,dungeon_core::node=warn`.
    pub fn directives(&self) -> String {
        std::iter::once(self.default_level.to_string())
            .chain(
                self.targets
                    .iter()
                    .map(|(target, level)| format!("{target}={level}")),
            )
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Filter built from `RUST_LOG` when set, from this config otherwise.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.directives()))
    }
}

static TRACING_INIT: Once = Once::new();

pub fn init_tracing_default() {
    init_tracing(&TracingConfig::default());
}

/// Install the global subscriber. Only the first call in a process has any
/// effect; later calls (and calls after someone else installed a subscriber)
/// are silently ignored.
pub fn init_tracing(config: &TracingConfig) {
    let config = config.clone();
    TRACING_INIT.call_once(move || {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(config.env_filter())
            .with_target(config.show_targets)
            .with_file(config.show_file_line)
            .with_line_number(config.show_file_line)
            .with_writer(std::io::stderr)
            .compact()
            .try_init();
    });
}

/// Debug span around one operation. Logs the elapsed time when dropped.
pub struct TimingSpan {
    name: &'static str,
    started: Instant,
    _span: tracing::span::EnteredSpan,
}

impl TimingSpan {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            started: Instant::now(),
            _span: tracing::debug_span!("timed", op = name).entered(),
        }
    }
}

impl Drop for TimingSpan {
    fn drop(&mut self) {
        let elapsed_us = self.started.elapsed().as_micros() as u64;
        tracing::debug!(op = self.name, elapsed_us, "finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_conversion() {
        assert_eq!(Level::from(LogLevel::Trace), Level::TRACE);
        assert_eq!(Level::from(LogLevel::Error), Level::ERROR);
        assert_eq!(LogLevel::Warn.to_string(), "warn");
        assert!(LogLevel::Trace < LogLevel::Error);
    }

    #[test]
    fn test_default_directives() {
        assert_eq!(
            TracingConfig::default().directives(),
            "info,dungeon_core::map=info,dungeon_core::node=warn"
        );
    }

    #[test]
    fn test_targets_override() {
        let config = TracingConfig {
            default_level: LogLevel::Warn,
            targets: BTreeMap::from([("dungeon_core::map::generator".to_string(), LogLevel::Trace)]),
            ..TracingConfig::default()
        };
        assert_eq!(config.directives(), "warn,dungeon_core::map::generator=trace");
    }

    #[test]
    fn test_init_is_idempotent() {
        init_tracing_default();
        init_tracing(&TracingConfig {
            default_level: LogLevel::Trace,
            ..TracingConfig::default()
        });
        let _span = TimingSpan::new("test_operation");
        tracing::info!("inside span");
    }
}
