//! Property-based tests exercising the kernel's universal invariants
//! (containment, idempotence, order independence, simple-hull containment)
//! over randomly generated unions of small axis-aligned integer boxes.
//!
//! Boxes keep the generated instances cheap for the exact-rational simplex
//! while still exercising the full dispatcher (`AffineReduce` on degenerate
//! zero-width boxes, `Hull1D`/`Hull0D`, bounded gift-wrapping).

use std::collections::HashSet;

use proptest::prelude::*;

use crate::hull::convex_hull_uset;
use crate::int::{self, Int};
use crate::polyhedron::Polyhedron;
use crate::seq::AffineForm;
use crate::simple_hull::simple_hull;
use crate::uset::UnionSet;

fn ineq(cs: &[i64]) -> AffineForm {
    AffineForm::from_vec(cs.iter().map(|&c| int::int(c)).collect())
}

/// A 2-D axis-aligned box `[xlo,xhi] x [ylo,yhi]` with small integer bounds
/// (possibly degenerate, `xlo == xhi`), plus its four corners for
/// containment checks.
fn box_with_corners() -> impl Strategy<Value = (Polyhedron, Vec<(i64, i64)>)> {
    (-2i64..=2, -2i64..=2, -2i64..=2, -2i64..=2).prop_map(|(x1, x2, y1, y2)| {
        let (xlo, xhi) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let (ylo, yhi) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
        let mut p = Polyhedron::universe(2, 0);
        p.alloc_inequality(ineq(&[-xlo, 1, 0]));
        p.alloc_inequality(ineq(&[xhi, -1, 0]));
        p.alloc_inequality(ineq(&[-ylo, 0, 1]));
        p.alloc_inequality(ineq(&[yhi, 0, -1]));
        let corners = vec![(xlo, ylo), (xhi, ylo), (xlo, yhi), (xhi, yhi)];
        (p, corners)
    })
}

fn union_with_corners(min: usize, max: usize) -> impl Strategy<Value = Vec<(Polyhedron, Vec<(i64, i64)>)>> {
    proptest::collection::vec(box_with_corners(), min..=max)
}

fn point(x: i64, y: i64) -> Vec<Int> {
    vec![int::int(x), int::int(y)]
}

fn satisfies(h: &Polyhedron, p: &[Int]) -> bool {
    h.equalities().iter().all(|e| e.eval_linear(p) == int::zero()) && h.inequalities().iter().all(|f| f.eval_linear(p) >= int::zero())
}

fn as_set(forms: &[AffineForm]) -> HashSet<AffineForm> {
    forms.iter().cloned().collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Containment: every corner of every constituent box lies in `hull(S)`.
    #[test]
    fn hull_contains_every_constituent_corner(entries in union_with_corners(1, 3)) {
        let members: Vec<Polyhedron> = entries.iter().map(|(p, _)| p.clone()).collect();
        let s = UnionSet::from_members(2, 0, members);
        let h = convex_hull_uset(&s).unwrap();
        for (_, corners) in &entries {
            for &(x, y) in corners {
                prop_assert!(satisfies(&h, &point(x, y)));
            }
        }
    }

    /// Idempotence: re-hulling the hull (as a single-member union) is a
    /// no-op on its constraint set.
    #[test]
    fn hull_is_idempotent(entries in union_with_corners(1, 3)) {
        let members: Vec<Polyhedron> = entries.iter().map(|(p, _)| p.clone()).collect();
        let s = UnionSet::from_members(2, 0, members);
        let h = convex_hull_uset(&s).unwrap();
        let h2 = convex_hull_uset(&UnionSet::single(h.clone())).unwrap();
        prop_assert_eq!(as_set(h.equalities()), as_set(h2.equalities()));
        prop_assert_eq!(as_set(h.inequalities()), as_set(h2.inequalities()));
    }

    /// Order independence: reversing the constituent order yields the same
    /// constraint set (as sets, ignoring the discovery order).
    #[test]
    fn hull_is_order_independent(entries in union_with_corners(1, 3)) {
        let members: Vec<Polyhedron> = entries.iter().map(|(p, _)| p.clone()).collect();
        let mut reversed = members.clone();
        reversed.reverse();
        let h1 = convex_hull_uset(&UnionSet::from_members(2, 0, members)).unwrap();
        let h2 = convex_hull_uset(&UnionSet::from_members(2, 0, reversed)).unwrap();
        prop_assert_eq!(as_set(h1.equalities()), as_set(h2.equalities()));
        prop_assert_eq!(as_set(h1.inequalities()), as_set(h2.inequalities()));
    }

    /// Simple-hull containment: `hull(S) subseteq simple_hull(S)` (checked on
    /// constituent corners, since `hull(S)`'s own vertices aren't tracked by
    /// this crate's constraint-only representation), and every facet of
    /// `simple_hull(S)` shares a linear part with some constituent's own
    /// equality or inequality.
    #[test]
    fn simple_hull_contains_hull_and_reuses_linear_parts(entries in union_with_corners(1, 3)) {
        let members: Vec<Polyhedron> = entries.iter().map(|(p, _)| p.clone()).collect();
        let s = UnionSet::from_members(2, 0, members.clone());
        let simple = simple_hull(&s).unwrap();
        for (_, corners) in &entries {
            for &(x, y) in corners {
                prop_assert!(satisfies(&simple, &point(x, y)));
            }
        }

        let member_linear_parts: Vec<Vec<Int>> = members
            .iter()
            .flat_map(|p| p.equalities().iter().chain(p.inequalities().iter()))
            .map(|f| f.linear().to_vec())
            .collect();
        for sf in simple.inequalities() {
            let lin = sf.linear().to_vec();
            let neg: Vec<Int> = lin.iter().map(|c| -c.clone()).collect();
            let matches_some_member = member_linear_parts.iter().any(|m| *m == lin || *m == neg);
            prop_assert!(matches_some_member);
        }
    }
}
