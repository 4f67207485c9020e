//! Shell-facing event payloads.
//!
//! The core never touches display state: it hands progress fractions and
//! log lines to whatever shell is watching through [`ShellEmitter`], and the
//! shell decides how to render them. Payloads serialize so a webview-style
//! shell can forward them to its frontend unchanged.

use serde::Serialize;

/// Severity of a shell log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

/// A human-readable line for the shell's log window.
#[derive(Debug, Clone, Serialize)]
pub struct LogPayload {
    pub level: LogLevel,
    pub message: String,
}

/// Progress update for the shell's progress bar.
///
/// `fraction` is the overall completion of the running operation in
/// `0.0..=1.0`. `active` flips to `false` on the terminal update.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressPayload {
    pub label: String,
    pub fraction: f64,
    pub active: bool,
}

/// Event sink implemented by the surrounding shell (GUI, CLI, test capture).
pub trait ShellEmitter: Send + Sync {
    fn emit_progress(&self, payload: ProgressPayload) {
        let _ = payload;
    }

    fn emit_log(&self, payload: LogPayload) {
        let _ = payload;
    }

    fn log_info(&self, message: &str) {
        self.emit_log(LogPayload {
            level: LogLevel::Info,
            message: message.to_string(),
        });
    }

    fn log_warn(&self, message: &str) {
        self.emit_log(LogPayload {
            level: LogLevel::Warn,
            message: message.to_string(),
        });
    }

    fn log_error(&self, message: &str) {
        self.emit_log(LogPayload {
            level: LogLevel::Error,
            message: message.to_string(),
        });
    }
}

/// Emitter for headless use; drops every event.
#[derive(Debug, Default)]
pub struct NullEmitter;

impl ShellEmitter for NullEmitter {}
