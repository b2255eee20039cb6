//! Exact convex-hull kernel for unions of rational polyhedra.
//!
//! Every structural decision (redundancy, boundedness, facet adjacency) is
//! taken from exact integer/rational arithmetic ([`int::Int`], [`int::Rat`]),
//! never from floating-point epsilons. See [`hull`] for the top-level
//! dispatcher and [`map`] for the map-level (multi-div) entry points.

pub mod affine_reduce;
pub mod bound_search;
pub mod bounded_simple_hull;
pub mod context;
pub mod elim_hull;
pub mod error;
pub mod extend;
pub mod hashkey;
pub mod hull;
pub mod hull_1d;
pub mod indep_bounds;
pub mod initial_facet;
pub mod int;
pub mod lp;
pub mod map;
pub mod matrix;
pub mod polyhedron;
pub mod proto_hull;
pub mod seq;
pub mod simple_hull;
pub mod single_hull;
pub mod uset;
pub mod wrap;

#[cfg(test)]
mod proptests;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports for quick access to the core surface.
pub mod prelude {
    pub use crate::bounded_simple_hull::bounded_simple_hull;
    pub use crate::context::Ctx;
    pub use crate::error::{HullError, Result};
    pub use crate::hull::{convex_hull_polyhedron as convex_hull, convex_hull_uset};
    pub use crate::int::{Int, Rat};
    pub use crate::map::{map_convex_hull, map_simple_hull};
    pub use crate::polyhedron::Polyhedron;
    pub use crate::seq::AffineForm;
    pub use crate::simple_hull::simple_hull;
    pub use crate::uset::UnionSet;
}
