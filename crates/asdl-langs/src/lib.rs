use std::sync::Arc;

use asdl_transition::TransitionSystem;

pub mod builtin;
#[cfg(feature = "lang-lambda-dcs")]
pub mod lambda_dcs;
pub mod registry;


pub use builtin::*;
pub use registry::{Factory, LangEntry, Registry};

/// User-facing transition system type. Works with any language.
pub type System = Arc<dyn TransitionSystem>;
