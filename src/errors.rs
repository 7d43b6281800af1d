//! Error types for spygen.
//!
//! Two layers exist:
//!
//! - [`Diagnostic`] / [`Diagnostics`]: generation-time problems tied to a
//!   source span. They are what a compiler-extension harness turns into
//!   `compile_error!` invocations, and what the CLI prints as
//!   `path:line:col: error[E0xx]: message`.
//! - [`SpygenError`]: the `thiserror` error for everything around the
//!   engine (I/O, parsing, configuration, CLI selection).
//!
//! # Error Codes
//!
//! - E001-E009: I/O and filesystem errors
//! - E010-E019: Parse errors
//! - E020-E029: Configuration errors
//! - E030-E039: Generation errors
//! - E040-E049: CLI errors

use proc_macro2::{Span, TokenStream};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Structured error code for documentation and programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(&'static str);

impl ErrorCode {
    /// I/O error - reading an input or configuration file
    pub const IO_READ: ErrorCode = ErrorCode("E001");
    /// I/O error - writing generated output
    pub const IO_WRITE: ErrorCode = ErrorCode("E002");

    /// Parse error - the input is not valid Rust
    pub const PARSE_SYNTAX: ErrorCode = ErrorCode("E010");

    /// Config error - invalid value or malformed file
    pub const CONFIG_INVALID: ErrorCode = ErrorCode("E020");
    /// Config error - refusing to overwrite an existing file
    pub const CONFIG_EXISTS: ErrorCode = ErrorCode("E021");

    /// Generation error - the decorated item is not a trait
    pub const NOT_A_TRAIT: ErrorCode = ErrorCode("E030");
    /// Generation error - the trait uses a construct spies cannot implement
    pub const UNSUPPORTED: ErrorCode = ErrorCode("E031");
    /// Generation error - a property or subscript declaration is malformed
    pub const MALFORMED_ACCESSOR: ErrorCode = ErrorCode("E032");
    /// Generation error - unknown `#[spy(..)]` helper key
    pub const UNKNOWN_HELPER: ErrorCode = ErrorCode("E033");
    /// Generation error - emitted tokens failed to parse back (generator bug)
    pub const INVALID_OUTPUT: ErrorCode = ErrorCode("E039");

    /// CLI error - the requested item does not exist
    pub const ITEM_NOT_FOUND: ErrorCode = ErrorCode("E040");

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A generation-time problem anchored at a source span.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn new(code: ErrorCode, span: Span, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            span,
        }
    }

    pub fn spanned(code: ErrorCode, tokens: impl quote::ToTokens, message: impl Into<String>) -> Self {
        let span = tokens
            .into_token_stream()
            .into_iter()
            .next()
            .map_or_else(Span::call_site, |token| token.span());
        Self::new(code, span, message)
    }

    /// One-based line and column, when span locations are available.
    pub fn location(&self) -> (usize, usize) {
        let start = self.span.start();
        (start.line, start.column + 1)
    }

    pub fn to_syn_error(&self) -> syn::Error {
        syn::Error::new(self.span, &self.message)
    }

    /// Renders the diagnostic the way the CLI reports it.
    pub fn render(&self, path: &std::path::Path) -> String {
        let (line, column) = self.location();
        format!(
            "{}:{}:{}: error[{}]: {}",
            path.display(),
            line,
            column,
            self.code,
            self.message
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error[{}]: {}", self.code, self.message)
    }
}

/// All diagnostics produced while expanding one declaration.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }

    /// `Ok(value)` when nothing was reported, otherwise every diagnostic.
    pub fn finish<T>(self, value: T) -> Result<T, Diagnostics> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }

    /// Converts into `compile_error!` invocations for a proc-macro harness.
    pub fn to_compile_error(&self) -> TokenStream {
        let mut errors = self.0.iter().map(Diagnostic::to_syn_error);
        match errors.next() {
            Some(mut first) => {
                for error in errors {
                    first.combine(error);
                }
                first.to_compile_error()
            }
            None => TokenStream::new(),
        }
    }
}

impl From<Diagnostic> for Diagnostics {
    fn from(diagnostic: Diagnostic) -> Self {
        Self(vec![diagnostic])
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, diagnostic) in self.0.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{diagnostic}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostics {}

/// Errors raised around the generation engine.
#[derive(Debug, Error)]
pub enum SpygenError {
    #[error("[{code}] failed to access {}: {source}", .path.display())]
    Io {
        code: ErrorCode,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[{code}] {}:{line}:{column}: {message}", .path.display())]
    Parse {
        code: ErrorCode,
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("[{code}] {message}")]
    Config {
        code: ErrorCode,
        message: String,
        path: Option<PathBuf>,
    },

    #[error("generation failed with {} diagnostic(s):\n{}", .rendered.len(), .rendered.join("\n"))]
    Generation { path: PathBuf, rendered: Vec<String> },

    #[error("[{code}] {message}")]
    Cli { code: ErrorCode, message: String },
}

impl SpygenError {
    pub fn io(code: ErrorCode, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            code,
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, error: &syn::Error) -> Self {
        let start = error.span().start();
        Self::Parse {
            code: ErrorCode::PARSE_SYNTAX,
            path: path.into(),
            line: start.line,
            column: start.column + 1,
            message: error.to_string(),
        }
    }

    pub fn config(code: ErrorCode, message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Config {
            code,
            message: message.into(),
            path,
        }
    }

    pub fn generation(path: impl Into<PathBuf>, diagnostics: &Diagnostics) -> Self {
        let path = path.into();
        let rendered = diagnostics.iter().map(|d| d.render(&path)).collect();
        Self::Generation { path, rendered }
    }

    pub fn item_not_found(name: &str, path: &std::path::Path) -> Self {
        Self::Cli {
            code: ErrorCode::ITEM_NOT_FOUND,
            message: format!("no item named `{name}` in {}", path.display()),
        }
    }

    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Io { code, .. }
            | Self::Parse { code, .. }
            | Self::Config { code, .. }
            | Self::Cli { code, .. } => Some(*code),
            Self::Generation { .. } => None,
        }
    }

    /// Whether the user can fix the problem by editing their sources or config.
    pub fn is_user_fixable(&self) -> bool {
        !matches!(self, Self::Io { .. })
    }
}
