//! `map_convex_hull` / `map_simple_hull`: thin adapters over the set-level
//! operations that align each disjunct's existentially quantified "div"
//! dimensions before dispatching.
//!
//! Div alignment runs *before* anything else; each disjunct may carry a
//! different number of divs (they are local helper variables introduced
//! per-disjunct), but [`UnionSet`] requires every member to share one
//! ambient dimension, so disjuncts with fewer divs than the maximum are
//! padded with fresh, unconstrained trailing div columns.

use crate::error::Result;
use crate::hull;
use crate::int;
use crate::polyhedron::Polyhedron;
use crate::seq::AffineForm;
use crate::simple_hull::simple_hull;
use crate::uset::UnionSet;

fn pad_divs(p: &Polyhedron, extra: usize) -> Polyhedron {
    if extra == 0 {
        return p.clone();
    }
    let append_zeros = |f: &AffineForm| {
        let mut v = f.as_slice().to_vec();
        v.extend(std::iter::repeat(int::zero()).take(extra));
        AffineForm::from_vec(v)
    };
    let equalities = p.equalities().iter().map(append_zeros).collect();
    let inequalities = p.inequalities().iter().map(append_zeros).collect();
    let mut out = Polyhedron::from_parts(p.dim() + extra, p.n_div() + extra, p.is_rational(), equalities, inequalities);
    if p.is_empty() {
        out.set_to_empty();
    }
    out
}

/// Pad every disjunct's div block up to the shared maximum and assemble a
/// [`UnionSet`] the set-level kernel can operate on.
fn align_divs(members: Vec<Polyhedron>) -> UnionSet {
    let max_div = members.iter().map(|p| p.n_div()).max().unwrap_or(0);
    let dim = members.first().map(|p| p.dim() - p.n_div() + max_div).unwrap_or(max_div);
    let padded: Vec<Polyhedron> = members.into_iter().map(|p| pad_divs(&p, max_div - p.n_div())).collect();
    UnionSet::from_members(dim, max_div, padded)
}

/// `members` need not share a div count.
pub fn map_convex_hull(members: Vec<Polyhedron>) -> Result<Polyhedron> {
    hull::convex_hull_uset(&align_divs(members))
}

/// Like [`map_convex_hull`] but via the cheaper `simple_hull`.
pub fn map_simple_hull(members: Vec<Polyhedron>) -> Result<Polyhedron> {
    simple_hull(&align_divs(members))
}
