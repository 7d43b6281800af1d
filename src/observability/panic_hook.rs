//! Panic hook that reports what the generator was doing.
//!
//! A panic inside the generator is a bug. The report names the phase, file
//! and trait being expanded so the failing declaration can be reproduced.

use super::context::{get_current_context, get_progress, GenerationContext};
use chrono::{DateTime, Utc};
use std::fmt::Write;
use std::panic::PanicHookInfo;

/// Installs the crash-report hook. Call early in `main`.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let report = CrashReport {
            message: panic_message(info),
            location: info
                .location()
                .map(|location| format!("{}:{}", location.file(), location.line())),
            context: get_current_context(),
            progress: get_progress(),
            time: Utc::now(),
        };
        eprintln!("{}", report.render());
        if std::env::var_os("RUST_BACKTRACE").is_some() {
            eprintln!("{}", std::backtrace::Backtrace::capture());
        }
    }));
}

struct CrashReport {
    message: String,
    location: Option<String>,
    context: GenerationContext,
    /// (expanded, total) declarations.
    progress: (usize, usize),
    time: DateTime<Utc>,
}

impl CrashReport {
    fn render(&self) -> String {
        let mut out = format!(
            "spygen {} panicked at {}: {}",
            env!("CARGO_PKG_VERSION"),
            self.location.as_deref().unwrap_or("<unknown>"),
            self.message
        );
        let phase = self
            .context
            .phase
            .map_or_else(|| "before generation".to_string(), |phase| phase.to_string());
        let _ = write!(out, "\n  phase: {phase}");
        if let Some(file) = &self.context.current_file {
            let _ = write!(out, "\n  file: {}", file.display());
        }
        if let Some(declaration) = &self.context.current_declaration {
            let _ = write!(out, "\n  trait: {declaration}");
        }
        let (expanded, total) = self.progress;
        if total > 0 {
            let _ = write!(out, "\n  progress: {expanded}/{total} declarations");
        }
        let _ = write!(out, "\n  time: {}", self.time.format("%Y-%m-%d %H:%M:%S UTC"));
        if std::env::var_os("RUST_BACKTRACE").is_none() {
            out.push_str("\nRun with RUST_BACKTRACE=1 for a stack trace.");
        }
        out
    }
}

fn panic_message(info: &PanicHookInfo<'_>) -> String {
    let payload = info.payload();
    payload
        .downcast_ref::<&str>()
        .map(|message| (*message).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string())
}
