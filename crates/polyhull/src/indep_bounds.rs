//! `IndepBounds`: assemble up to `dim` linearly independent supporting
//! hyperplanes from a union's constituent constraints.
//!
//! Precondition: `S` is bounded and full-dimensional, so this is guaranteed
//! to reach `rank(D) == dim` before the candidates run out.

use crate::bound_search::bound_search;
use crate::int;
use crate::seq::AffineForm;
use crate::uset::UnionSet;

/// Every candidate direction a constituent contributes: each equality
/// yields both `+e` and `-e`, each inequality yields itself.
fn candidates(uset: &UnionSet) -> Vec<AffineForm> {
    let mut out = Vec::new();
    for p in uset.live_members() {
        for e in p.equalities() {
            out.push(e.clone());
            out.push(e.negated());
        }
        for h in p.inequalities() {
            out.push(h.clone());
        }
    }
    out
}

/// Row-reduce `candidate` against the already-accepted rows of `bounds`
/// (each used as a pivot on its own first nonzero linear column). Returns
/// `None` if the candidate becomes linearly dependent (all-zero linear
/// part after reduction).
fn reduce_against(bounds: &[AffineForm], candidate: &AffineForm) -> Option<AffineForm> {
    let mut row = candidate.clone();
    for pivot in bounds {
        let Some(col) = pivot.first_nonzero_linear_index() else { continue };
        if row.linear()[col].sign() != num_bigint::Sign::NoSign {
            row.eliminate(pivot, col + 1);
        }
    }
    if row.first_nonzero_linear_index().is_none() {
        None
    } else {
        Some(row)
    }
}

/// Mutates `uset` in place: members newly discovered empty during a bound
/// search are flagged (never surfaced as an error). Returns up to
/// `uset.dim()` linearly independent supporting hyperplanes, sorted by
/// ascending pivot column.
pub fn indep_bounds(uset: &mut UnionSet) -> Vec<AffineForm> {
    let dim = uset.dim();
    let mut accepted: Vec<AffineForm> = Vec::new();
    let pool = candidates(uset);
    for candidate in pool {
        if accepted.len() == dim {
            break;
        }
        let Some(mut reduced) = reduce_against(&accepted, &candidate) else {
            continue;
        };
        reduced.set_constant(int::zero());
        if !bound_search(uset.members_mut(), &mut reduced) {
            continue;
        }
        accepted.push(reduced);
        accepted.sort_by_key(|f| f.first_nonzero_linear_index().unwrap_or(usize::MAX));
    }
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polyhedron::Polyhedron;
    use crate::uset::ineq;

    #[test]
    fn finds_full_rank_bounds_for_a_box() {
        // 0<=x<=2, 0<=y<=2: a single full-dimensional box.
        let mut p = Polyhedron::universe(2, 0);
        p.alloc_inequality(ineq(&[0, 1, 0]));
        p.alloc_inequality(ineq(&[2, -1, 0]));
        p.alloc_inequality(ineq(&[0, 0, 1]));
        p.alloc_inequality(ineq(&[2, 0, -1]));
        let mut s = UnionSet::single(p);
        let bounds = indep_bounds(&mut s);
        assert_eq!(bounds.len(), 2);
        let cols: Vec<usize> = bounds.iter().map(|f| f.first_nonzero_linear_index().unwrap()).collect();
        assert_eq!(cols, vec![0, 1]);
    }

    #[test]
    fn triangle_vertices_reach_full_rank() {
        // {x=0,y=0} u {x=1,y=0} u {x=0,y=1}: three points, full-dim union.
        let mut a = Polyhedron::universe(2, 0);
        a.alloc_equality(ineq(&[0, 1, 0]));
        a.alloc_equality(ineq(&[0, 0, 1]));
        let mut b = Polyhedron::universe(2, 0);
        b.alloc_equality(ineq(&[-1, 1, 0]));
        b.alloc_equality(ineq(&[0, 0, 1]));
        let mut c = Polyhedron::universe(2, 0);
        c.alloc_equality(ineq(&[0, 1, 0]));
        c.alloc_equality(ineq(&[-1, 0, 1]));
        let mut s = UnionSet::new(2, 0);
        s.push(a);
        s.push(b);
        s.push(c);
        let bounds = indep_bounds(&mut s);
        assert_eq!(bounds.len(), 2);
    }
}
