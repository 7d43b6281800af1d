//! Observability for the generator: crash reports, context tracking and
//! subscriber setup.
//!
//! Install the panic hook and the subscriber at startup, then mark phases
//! as the pipeline runs:
//!
//! ```ignore
//! use spygen::observability::{install_panic_hook, set_phase, GenerationPhase};
//!
//! install_panic_hook();
//! let _phase = set_phase(GenerationPhase::Extraction);
//! ```

pub mod context;
pub mod logging;
pub mod panic_hook;

pub use context::{
    get_current_context, get_progress, increment_expanded, reset_context, set_current_declaration,
    set_current_file, set_phase, set_progress, ContextGuard, GenerationContext, GenerationPhase,
};
pub use logging::{init_logging, LOG_ENV};
pub use panic_hook::install_panic_hook;
