//! Thread-local context tracking for crash reports.
//!
//! Records which generation phase, declaration and input file the current
//! thread is working on. Guards restore the previous context on drop, so
//! contexts nest naturally (declaration within file, phase within
//! declaration).

use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

static DECLARATIONS_EXPANDED: AtomicUsize = AtomicUsize::new(0);
static DECLARATIONS_TOTAL: AtomicUsize = AtomicUsize::new(0);

thread_local! {
    static CURRENT_CONTEXT: RefCell<GenerationContext> = const { RefCell::new(GenerationContext::new()) };
}

/// Snapshot of what spygen was doing.
#[derive(Debug, Clone, Default)]
pub struct GenerationContext {
    pub phase: Option<GenerationPhase>,
    pub current_file: Option<PathBuf>,
    /// Name of the trait being expanded.
    pub current_declaration: Option<String>,
}

impl GenerationContext {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: None,
            current_file: None,
            current_declaration: None,
        }
    }
}

/// Stages of one expansion, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationPhase {
    Parsing,
    Guard,
    Extraction,
    Disambiguation,
    Projection,
    StrategySelection,
    Emission,
    Rendering,
    Output,
}

impl std::fmt::Display for GenerationPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parsing => write!(f, "parsing"),
            Self::Guard => write!(f, "guard"),
            Self::Extraction => write!(f, "extraction"),
            Self::Disambiguation => write!(f, "disambiguation"),
            Self::Projection => write!(f, "projection"),
            Self::StrategySelection => write!(f, "strategy_selection"),
            Self::Emission => write!(f, "emission"),
            Self::Rendering => write!(f, "rendering"),
            Self::Output => write!(f, "output"),
        }
    }
}

/// Restores the previous context when dropped.
pub struct ContextGuard {
    previous: GenerationContext,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        CURRENT_CONTEXT.with(|ctx| {
            *ctx.borrow_mut() = self.previous.clone();
        });
    }
}

fn update(change: impl FnOnce(&mut GenerationContext)) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.borrow().clone();
        change(&mut ctx.borrow_mut());
        ContextGuard { previous }
    })
}

#[must_use]
pub fn set_phase(phase: GenerationPhase) -> ContextGuard {
    update(|ctx| ctx.phase = Some(phase))
}

#[must_use]
pub fn set_current_file(path: impl Into<PathBuf>) -> ContextGuard {
    let path = path.into();
    update(|ctx| ctx.current_file = Some(path))
}

#[must_use]
pub fn set_current_declaration(name: impl Into<String>) -> ContextGuard {
    let name = name.into();
    update(|ctx| ctx.current_declaration = Some(name))
}

/// Sets how many declarations the current run will expand.
pub fn set_progress(expanded: usize, total: usize) {
    DECLARATIONS_EXPANDED.store(expanded, Ordering::Relaxed);
    DECLARATIONS_TOTAL.store(total, Ordering::Relaxed);
}

pub fn increment_expanded() {
    DECLARATIONS_EXPANDED.fetch_add(1, Ordering::Relaxed);
}

#[must_use]
pub fn get_current_context() -> GenerationContext {
    CURRENT_CONTEXT.with(|ctx| ctx.borrow().clone())
}

/// (expanded, total) declarations.
#[must_use]
pub fn get_progress() -> (usize, usize) {
    (
        DECLARATIONS_EXPANDED.load(Ordering::Relaxed),
        DECLARATIONS_TOTAL.load(Ordering::Relaxed),
    )
}

pub fn reset_context() {
    CURRENT_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = GenerationContext::new();
    });
}
