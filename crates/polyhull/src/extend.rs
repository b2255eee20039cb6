//! `Extend` / `FacetHull`: breadth-first facet enumeration. Given at least
//! one true facet of `conv(S)`, repeatedly recurse into each facet's own
//! (one-dimension-lower) hull to discover the ridges it must share with its
//! neighbours, and wrap across every ridge not already accounted for by the
//! facets found so far.
//!
//! `FacetHull(S ∩ {f=0})` is simply a recursive call into
//! [`crate::hull::convex_hull_uset`]; the slice is itself a union, possibly
//! lower-dimensional, and the top-level dispatcher already knows how to
//! route those.

use crate::error::Result;
use crate::hull;
use crate::polyhedron::Polyhedron;
use crate::seq::AffineForm;
use crate::uset::UnionSet;
use crate::wrap::wrap;

fn slice_at(uset: &UnionSet, row: &AffineForm) -> UnionSet {
    let mut eq_only = Polyhedron::universe(uset.dim(), uset.n_div());
    eq_only.alloc_equality(row.clone());
    uset.intersect_poly(&eq_only)
}

fn contains_form(known: &[AffineForm], candidate: &AffineForm) -> bool {
    known.iter().any(|f| f == candidate)
}

/// `seed` must contain at least one true facet of `conv(S)` (e.g. from
/// [`crate::proto_hull::proto_hull`] or
/// [`crate::initial_facet::initial_facet`]); `uset` must be full-dimensional
/// and bounded. Returns the complete set of facets as a finalized,
/// redundancy-free `Polyhedron`.
pub fn extend(uset: &UnionSet, seed: Vec<AffineForm>) -> Result<Polyhedron> {
    let mut hull: Vec<AffineForm> = seed;
    let mut i = 0;
    while i < hull.len() {
        let f_i = hull[i].clone();
        let facet_slice = slice_at(uset, &f_i);
        let facet_hull = hull::convex_hull_uset(&facet_slice)?;

        let mut known_on_facet = Polyhedron::from_parts(uset.dim(), uset.n_div(), false, Vec::new(), hull.clone());
        let mut eq_only = Polyhedron::universe(uset.dim(), uset.n_div());
        eq_only.alloc_equality(f_i.clone());
        known_on_facet = known_on_facet.intersect(&eq_only);
        known_on_facet.finalize();

        for ridge in facet_hull.inequalities() {
            if !contains_form(known_on_facet.inequalities(), ridge) {
                let mut new_facet = f_i.clone();
                wrap(uset, &mut new_facet, ridge)?;
                if !contains_form(&hull, &new_facet) {
                    hull.push(new_facet);
                }
            }
        }
        i += 1;
    }

    let mut result = Polyhedron::from_parts(uset.dim(), uset.n_div(), false, Vec::new(), hull);
    result.finalize();
    result.set_no_redundant(true);
    result.set_no_implicit(true);
    Ok(result)
}
