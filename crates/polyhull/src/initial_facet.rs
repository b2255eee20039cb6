//! `InitialFacet`: reduce `d` independent supporting bounds down to a
//! single row that names a true facet of `conv(S)`.

use crate::error::Result;
use crate::polyhedron::Polyhedron;
use crate::seq::AffineForm;
use crate::uset::UnionSet;
use crate::wrap::wrap;

/// Intersect every member of `uset` with the single equality `row == 0`.
fn slice_at(uset: &UnionSet, row: &AffineForm) -> UnionSet {
    let mut eq_only = Polyhedron::universe(uset.dim(), uset.n_div());
    eq_only.alloc_equality(row.clone());
    uset.intersect_poly(&eq_only)
}

/// `true` iff `candidate`, row-reduced against `pivot`'s own pivot column,
/// collapses to the all-zero linear form (i.e. `candidate` is now a scalar
/// multiple of `pivot`).
fn is_dependent_on(candidate: &AffineForm, pivot: &AffineForm) -> bool {
    let Some(col) = pivot.first_nonzero_linear_index() else { return false };
    let mut reduced = candidate.clone();
    reduced.eliminate(pivot, col + 1);
    reduced.first_nonzero_linear_index().is_none()
}

/// `bounds` must be the `d` (or fewer) linearly independent supporting
/// hyperplanes from [`crate::indep_bounds::indep_bounds`]; `uset` must be
/// bounded and full-dimensional (the same precondition `indep_bounds`
/// relies on). Terminates in at most `2 * bounds.len()` iterations: each
/// pass either finds the facet directly or shrinks `bounds` by one row.
pub fn initial_facet(uset: &UnionSet, mut bounds: Vec<AffineForm>) -> Result<AffineForm> {
    loop {
        if bounds.len() <= 1 {
            return Ok(bounds.pop().expect("indep_bounds never returns an empty list for a full-dim bounded set"));
        }
        let mut row0 = bounds[0].clone();
        let slice = slice_at(uset, &row0);
        let h = slice.affine_hull();
        if h.is_empty() || h.equalities().len() <= 1 {
            return Ok(row0);
        }
        let last = bounds.pop().expect("bounds.len() > 1 checked above");
        wrap(uset, &mut row0, &last)?;
        bounds[0] = row0.clone();
        bounds = std::iter::once(bounds[0].clone())
            .chain(bounds.into_iter().skip(1).filter(|r| !is_dependent_on(r, &row0)))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uset::ineq;

    #[test]
    fn single_bound_is_returned_directly() {
        let p = Polyhedron::universe(1, 0);
        let s = UnionSet::single(p);
        let bounds = vec![ineq(&[0, 1])];
        let facet = initial_facet(&s, bounds).unwrap();
        assert_eq!(facet, ineq(&[0, 1]));
    }

    #[test]
    fn square_bounds_reduce_to_a_true_facet() {
        // 0<=x<=2, 0<=y<=2; indep_bounds would hand us {x>=0, y>=0} (the
        // two pivot-sorted bounds). Neither alone might need wrapping
        // since both are already facets, so InitialFacet should return
        // the first one untouched.
        let mut p = Polyhedron::universe(2, 0);
        p.alloc_inequality(ineq(&[0, 1, 0]));
        p.alloc_inequality(ineq(&[2, -1, 0]));
        p.alloc_inequality(ineq(&[0, 0, 1]));
        p.alloc_inequality(ineq(&[2, 0, -1]));
        let s = UnionSet::single(p);
        let bounds = vec![ineq(&[0, 1, 0]), ineq(&[0, 0, 1])];
        let facet = initial_facet(&s, bounds).unwrap();
        // Must be a valid supporting hyperplane, tight somewhere on the square.
        let corners = [[0, 0], [2, 0], [0, 2], [2, 2]];
        let mut tight = false;
        for c in corners {
            let v = vec![crate::int::int(c[0]), crate::int::int(c[1])];
            let val = facet.eval_linear(&v);
            assert!(val >= crate::int::zero());
            if val == crate::int::zero() {
                tight = true;
            }
        }
        assert!(tight);
    }
}
