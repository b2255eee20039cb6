//! Error kinds for the hull kernel.
//!
//! A small hand-written enum with manual `Display`, no `anyhow`/`thiserror`.
//! Emptiness discovered in a constituent is never an error; it is handled
//! locally by flagging that polyhedron empty, so it never appears here.

use std::fmt;

/// Failure kinds surfaced to a public entry point.
///
/// Memory exhaustion is not representable as a recoverable error in safe
/// Rust and is not modeled here; see DESIGN.md.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HullError {
    /// The LP solver reported an invariant violation.
    Lp(&'static str),
    /// A precondition the algorithm relies on did not hold, e.g. a facet
    /// computation invoked on a set that turned out unbounded.
    Precondition(&'static str),
}

impl fmt::Display for HullError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HullError::Lp(msg) => write!(f, "linear-programming solver error: {msg}"),
            HullError::Precondition(msg) => write!(f, "precondition violated: {msg}"),
        }
    }
}

impl std::error::Error for HullError {}

pub type Result<T> = std::result::Result<T, HullError>;
