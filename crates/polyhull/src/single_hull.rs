//! `SingleHull`: redundant-inequality elimination on one polyhedron via an
//! LP tableau.

use crate::lp::Tab;
use crate::polyhedron::Polyhedron;

/// `convex_hull(B)`: remove redundant inequalities from `B`,
/// preserving equalities. A no-op if `B` is empty, already flagged
/// non-redundant, or has at most one inequality (nothing can be redundant
/// against zero or one other constraint).
pub fn single_hull(poly: &Polyhedron) -> Polyhedron {
    let mut out = poly.clone();
    out.gauss();
    if out.is_empty() || out.no_redundant() || out.inequalities().len() <= 1 {
        out.set_no_redundant(true);
        return out;
    }
    let mut tab = Tab::from_polyhedron(&out);
    tab.detect_equalities();
    let found_empty = tab.detect_redundant();
    let (equalities, inequalities) = tab.into_parts();
    let rational = out.is_rational();
    let n_div = out.n_div();
    let dim = out.dim();
    let mut result = Polyhedron::from_parts(dim, n_div, rational, equalities, inequalities);
    if found_empty {
        result.set_to_empty();
        return result;
    }
    result.gauss();
    if !result.is_empty() {
        result.set_no_redundant(true);
        result.set_no_implicit(true);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uset::ineq;

    #[test]
    fn drops_a_redundant_inequality() {
        // 0 <= x <= 2, plus the redundant x <= 5.
        let mut p = Polyhedron::universe(1, 0);
        p.alloc_inequality(ineq(&[0, 1]));
        p.alloc_inequality(ineq(&[2, -1]));
        p.alloc_inequality(ineq(&[5, -1]));
        let h = single_hull(&p);
        assert_eq!(h.inequalities().len(), 2);
        assert!(h.inequalities().iter().any(|f| f == &ineq(&[2, -1])));
        assert!(!h.inequalities().iter().any(|f| f == &ineq(&[5, -1])));
    }

    #[test]
    fn promotes_implicit_equality() {
        // x >= 0 and x <= 0 together imply x = 0.
        let mut p = Polyhedron::universe(1, 0);
        p.alloc_inequality(ineq(&[0, 1]));
        p.alloc_inequality(ineq(&[0, -1]));
        let h = single_hull(&p);
        assert_eq!(h.equalities().len(), 1);
        assert!(h.inequalities().is_empty());
    }

    #[test]
    fn infeasible_system_is_flagged_empty() {
        // x <= 5, x <= 0, x >= 1: testing x<=5's redundancy against {x<=0, x>=1}
        // (same-signed partner x<=0 keeps the short-circuit from bailing out)
        // finds that remainder infeasible.
        let mut p = Polyhedron::universe(1, 0);
        p.alloc_inequality(ineq(&[5, -1]));
        p.alloc_inequality(ineq(&[0, -1]));
        p.alloc_inequality(ineq(&[-1, 1]));
        let h = single_hull(&p);
        assert!(h.is_empty());
    }
}
