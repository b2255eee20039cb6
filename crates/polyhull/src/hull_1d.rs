//! `Hull0D`, `Hull1D`: the two base cases of the dimension dispatch, where
//! gift-wrapping has nothing to wrap around.

use num_bigint::Sign;

use crate::int::Rat;
use crate::polyhedron::Polyhedron;
use crate::seq::AffineForm;
use crate::uset::UnionSet;

/// `uset.dim() == 0`.
pub fn hull_0d(uset: &UnionSet) -> Polyhedron {
    if uset.is_empty() {
        Polyhedron::empty(0, uset.n_div())
    } else {
        Polyhedron::universe(0, uset.n_div())
    }
}

/// `-c0/c1`, the real value `c0 + c1*x = 0` solves for `x`; shared by both
/// the lower-bound (`c1 > 0`) and upper-bound (`c1 < 0`) comparisons.
fn bound_value(f: &AffineForm) -> Rat {
    Rat::new(-f.constant().clone(), f.linear()[0].clone())
}

fn consider(lower: &mut Option<AffineForm>, upper: &mut Option<AffineForm>, f: AffineForm) {
    match f.linear()[0].sign() {
        Sign::Plus => {
            let replace = match &lower {
                None => true,
                Some(cur) => bound_value(&f) > bound_value(cur),
            };
            if replace {
                *lower = Some(f);
            }
        }
        Sign::Minus => {
            let replace = match &upper {
                None => true,
                Some(cur) => bound_value(&f) < bound_value(cur),
            };
            if replace {
                *upper = Some(f);
            }
        }
        Sign::NoSign => {}
    }
}

/// `uset.dim() == 1`. Tracks the single tightest lower and upper bound
/// across every live constituent; equalities contribute both directions.
pub fn hull_1d(uset: &UnionSet) -> Polyhedron {
    let mut lower: Option<AffineForm> = None;
    let mut upper: Option<AffineForm> = None;
    for p in uset.live_members() {
        for e in p.equalities() {
            consider(&mut lower, &mut upper, e.clone());
            consider(&mut lower, &mut upper, e.negated());
        }
        for h in p.inequalities() {
            consider(&mut lower, &mut upper, h.clone());
        }
    }
    let mut out = Polyhedron::universe(1, uset.n_div());
    if let Some(l) = lower {
        out.alloc_inequality(l);
    }
    if let Some(u) = upper {
        out.alloc_inequality(u);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uset::ineq;

    #[test]
    fn hull_0d_of_nonempty_union_is_universe() {
        let s = UnionSet::single(Polyhedron::universe(0, 0));
        assert!(!hull_0d(&s).is_empty());
    }

    #[test]
    fn hull_0d_of_all_empty_union_is_empty() {
        let s = UnionSet::single(Polyhedron::empty(0, 0));
        assert!(hull_0d(&s).is_empty());
    }

    #[test]
    fn hull_1d_tracks_widest_interval() {
        // [0,2] u [1,5] -> [0,5].
        let mut a = Polyhedron::universe(1, 0);
        a.alloc_inequality(ineq(&[0, 1]));
        a.alloc_inequality(ineq(&[2, -1]));
        let mut b = Polyhedron::universe(1, 0);
        b.alloc_inequality(ineq(&[-1, 1]));
        b.alloc_inequality(ineq(&[5, -1]));
        let mut s = UnionSet::new(1, 0);
        s.push(a);
        s.push(b);
        let hull = hull_1d(&s);
        assert_eq!(hull.inequalities().len(), 2);
        assert!(hull.inequalities().iter().any(|f| f == &ineq(&[0, 1])));
        assert!(hull.inequalities().iter().any(|f| f == &ineq(&[5, -1])));
    }

    #[test]
    fn hull_1d_folds_equality_point() {
        // {x=3} u [0,2] -> [0,3].
        let mut a = Polyhedron::universe(1, 0);
        a.alloc_equality(ineq(&[-3, 1]));
        let mut b = Polyhedron::universe(1, 0);
        b.alloc_inequality(ineq(&[0, 1]));
        b.alloc_inequality(ineq(&[2, -1]));
        let mut s = UnionSet::new(1, 0);
        s.push(a);
        s.push(b);
        let hull = hull_1d(&s);
        assert!(hull.inequalities().iter().any(|f| f == &ineq(&[0, 1])));
        assert!(hull.inequalities().iter().any(|f| f == &ineq(&[3, -1])));
    }
}
