//! `BoundedSimpleHull`: `SimpleHull` tightened, dimension by dimension,
//! wherever it failed to produce both a lower and an upper bound.

use num_bigint::Sign;

use crate::error::Result;
use crate::hull;
use crate::int::Int;
use crate::polyhedron::Polyhedron;
use crate::seq::AffineForm;
use crate::simple_hull::simple_hull;
use crate::uset::UnionSet;

/// `true` iff `f`'s linear part is zero on every structural set-dimension
/// except `i` (divs may carry any coefficient; they are projected away
/// before this check ever needs to run on them). Returns `f`'s coefficient
/// at `i` when so, `None` otherwise (either it isn't single-dimension, or
/// its coefficient at `i` is itself zero).
fn coeff_if_isolated(f: &AffineForm, i: usize, set_dim: usize) -> Option<&Int> {
    for k in 0..set_dim {
        if k != i && f.linear()[k].sign() != Sign::NoSign {
            return None;
        }
    }
    let c = &f.linear()[i];
    if c.sign() == Sign::NoSign {
        None
    } else {
        Some(c)
    }
}

fn has_both_bounds(h: &Polyhedron, i: usize, set_dim: usize) -> bool {
    let mut lower = false;
    let mut upper = false;
    for e in h.equalities() {
        if coeff_if_isolated(e, i, set_dim).is_some() {
            lower = true;
            upper = true;
        }
    }
    for ineq in h.inequalities() {
        match coeff_if_isolated(ineq, i, set_dim) {
            Some(c) if c.sign() == Sign::Plus => lower = true,
            Some(_) => upper = true,
            None => {}
        }
    }
    lower && upper
}

/// Project every dimension except `i` out of `p` (Fourier-Motzkin), leaving
/// a 1-D polyhedron over just that coordinate.
fn project_only(p: &Polyhedron, i: usize) -> Polyhedron {
    let mut q = p.clone();
    if i + 1 < q.dim() {
        q = q.eliminate_dims(i + 1, q.dim() - (i + 1));
    }
    if i > 0 {
        q = q.eliminate_dims(0, i);
    }
    q
}

/// Embed a 1-D polyhedron (over coordinate `i` alone) back into `dim`
/// dimensions, with every other coefficient forced to zero.
fn embed_at(p: &Polyhedron, i: usize, dim: usize) -> Polyhedron {
    let cols: Vec<usize> = (0..dim).filter(|&k| k != i).collect();
    p.insert_zero_columns(&cols, dim)
}

/// Divs are removed from `S` once, lazily, the first time a dimension is
/// found missing a bound.
pub fn bounded_simple_hull(uset: &UnionSet) -> Result<Polyhedron> {
    let mut h = simple_hull(uset)?;
    if h.is_empty() {
        return Ok(h);
    }
    let dim = uset.dim();
    let set_dim = dim - uset.n_div();

    let mut div_free: Option<UnionSet> = None;
    for i in 0..set_dim {
        if has_both_bounds(&h, i, set_dim) {
            continue;
        }
        let reduced = div_free.get_or_insert_with(|| {
            let members: Vec<Polyhedron> = uset.live_members().map(|p| p.remove_divs()).collect();
            UnionSet::from_members(set_dim, 0, members)
        });
        let projected: Vec<Polyhedron> = reduced.members().iter().map(|p| project_only(p, i)).collect();
        let projected_uset = UnionSet::from_members(1, 0, projected);
        let bounds_1d = hull::convex_hull_uset(&projected_uset)?;
        let bounds = embed_at(&bounds_1d, i, dim);
        h = h.intersect(&bounds);
    }
    h.finalize();
    Ok(h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uset::ineq;

    #[test]
    fn tightens_a_dimension_simple_hull_left_unbounded() {
        // {x=0,y=0} u {x=1,y=1}: SimpleHull over two points has no
        // inequalities at all on x/y individually (points contribute no
        // translatable inequalities beyond the trivial equalities being
        // different per constituent, so nothing survives the table), so
        // BoundedSimpleHull must invoke the per-dimension 1-D fallback.
        let mut a = Polyhedron::universe(2, 0);
        a.alloc_equality(ineq(&[0, 1, 0]));
        a.alloc_equality(ineq(&[0, 0, 1]));
        let mut b = Polyhedron::universe(2, 0);
        b.alloc_equality(ineq(&[-1, 1, 0]));
        b.alloc_equality(ineq(&[-1, 0, 1]));
        let mut s = UnionSet::new(2, 0);
        s.push(a);
        s.push(b);
        let h = bounded_simple_hull(&s).unwrap();
        let inside = vec![crate::int::int(0), crate::int::int(0)];
        let outside = vec![crate::int::int(2), crate::int::int(2)];
        for f in h.inequalities() {
            assert!(f.eval_linear(&inside) >= crate::int::zero());
        }
        assert!(h.inequalities().iter().any(|f| f.eval_linear(&outside) < crate::int::zero()));
    }
}
