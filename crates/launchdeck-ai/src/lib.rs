//! launchdeck-ai: Generation service boundary
//!
//! This crate defines how the assistant talks to a remote text-generation
//! service: sessions bound to a system instruction, single-shot sends, and
//! streamed replies delivered as text fragments. A Gemini client is included.

pub mod error;
pub mod providers;
pub mod stream;
pub mod types;

pub use error::{Error, ErrorKind, Result};
pub use providers::{ChatSession, GenerationService};
pub use stream::FragmentStream;
pub use types::*;
