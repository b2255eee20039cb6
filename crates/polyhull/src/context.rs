//! Ambient computation context.
//!
//! A single context object owns cached exact constants (zero, one) and a
//! sticky error flag. Rust's allocator and `Drop`-based resource release
//! already give every `Vec`/`HashMap`/`Polyhedron` a "release on every exit
//! path" guarantee, and every fallible internal step already returns
//! `Result` and propagates with `?`, the idiomatic Rust equivalent of
//! short-circuiting cleanly once an earlier step has poisoned the
//! context, so `Ctx` does not need to be threaded through every private
//! helper to get that property inside one call. What `Ctx` is for is the
//! other case: a *caller* running a sequence of hull
//! computations that share one context (e.g. simplifying many facets of the
//! same problem one after another); see [`Ctx::checked`], which poisons the
//! context on the first failure and short-circuits every later call sharing
//! it, without the caller re-checking each individual `Result`.
//!
//! `zero()`/`one()` cache the two constants compared against on every
//! sign-check hot path across this crate, so call sites needing a borrowed
//! `&Int` for a comparison do not need to allocate a fresh `BigInt::zero()`
//! each time.

use crate::error::{HullError, Result};
use crate::int::{self, Int};

/// Shared state across a sequence of hull computations made by one caller.
/// Never shared across independent, concurrent computations: each hull
/// computation owns its own state, with no mutable state shared between them.
pub struct Ctx {
    zero: Int,
    one: Int,
    poisoned: bool,
}

impl Default for Ctx {
    fn default() -> Self {
        Self::new()
    }
}

impl Ctx {
    pub fn new() -> Self {
        Ctx {
            zero: int::zero(),
            one: int::one(),
            poisoned: false,
        }
    }

    #[inline]
    pub fn zero(&self) -> &Int {
        &self.zero
    }

    #[inline]
    pub fn one(&self) -> &Int {
        &self.one
    }

    /// Mark the context poisoned after an unrecoverable internal error.
    /// Later steps can check [`Ctx::is_poisoned`] to short-circuit cleanly.
    #[inline]
    pub fn poison(&mut self) {
        self.poisoned = true;
    }

    #[inline]
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// Run `step` unless this context is already poisoned; poison it if
    /// `step` fails. Lets a caller chain several hull computations sharing
    /// one `Ctx` and have a prior failure short-circuit every later one,
    /// without inspecting each individual `Result` itself.
    pub fn checked<T>(&mut self, step: impl FnOnce() -> Result<T>) -> Result<T> {
        if self.poisoned {
            return Err(HullError::Precondition("context already poisoned by an earlier step"));
        }
        let result = step();
        if result.is_err() {
            self.poison();
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_short_circuits_after_a_failure() {
        let mut ctx = Ctx::new();
        let first: Result<()> = ctx.checked(|| Err(HullError::Precondition("boom")));
        assert!(first.is_err());
        assert!(ctx.is_poisoned());
        let second: Result<()> = ctx.checked(|| Ok(()));
        assert!(second.is_err());
    }

    #[test]
    fn checked_passes_through_on_success() {
        let mut ctx = Ctx::new();
        let r = ctx.checked(|| Ok(5));
        assert_eq!(r.unwrap(), 5);
        assert!(!ctx.is_poisoned());
    }
}
