//! `SimpleHull`: a cheap, LP-light over-approximation of `conv(S)` whose
//! every inequality is a translate of some constituent's own inequality;
//! no gift-wrapping, no new facet directions.
//!
//! `h` and `-h` are folded together when hashing via
//! [`crate::hashkey::LinearKey`], so a constraint and its sign-flipped
//! negation (as from an equality split into two inequalities) always land
//! on the same table slot.

use std::collections::HashMap;

use crate::error::{HullError, Result};
use crate::hashkey::LinearKey;
use crate::int;
use crate::lp::{solve_lp, LpResult};
use crate::polyhedron::Polyhedron;
use crate::seq::AffineForm;
use crate::single_hull::single_hull;
use crate::uset::UnionSet;

fn per_constituent_candidates(p: &Polyhedron) -> Vec<AffineForm> {
    let mut out = Vec::new();
    for e in p.equalities() {
        out.push(e.clone());
        out.push(e.negated());
    }
    out.extend(p.inequalities().iter().cloned());
    out
}

fn build_table(p: &Polyhedron) -> HashMap<LinearKey, AffineForm> {
    let mut table = HashMap::new();
    for c in per_constituent_candidates(p) {
        table.entry(LinearKey::new(&c)).or_insert(c);
    }
    table
}

/// Raise `c`'s constant just enough to be valid over `p`, or report that no
/// valid constant exists (the direction is unbounded below on `p`).
fn bound_check(c: &mut AffineForm, p: &Polyhedron) -> Result<bool> {
    match solve_lp(p, c.linear()) {
        LpResult::Ok(v) => {
            let d = v.denom().clone();
            if d != int::one() {
                c.scale(&d);
            }
            let needed = -v.numer().clone();
            if *c.constant() < needed {
                c.set_constant(needed);
            }
            Ok(true)
        }
        LpResult::Unbounded => Ok(false),
        LpResult::Empty => Ok(false),
        LpResult::Error(msg) => Err(HullError::Lp(msg)),
    }
}

/// Every inequality of the result is a translate (same linear part,
/// possibly weaker constant) of some constituent's own inequality.
pub fn simple_hull(uset: &UnionSet) -> Result<Polyhedron> {
    let s = uset.normalize();
    if s.live_count() == 0 {
        return Ok(Polyhedron::empty(s.dim(), s.n_div()));
    }
    let members: Vec<&Polyhedron> = s.members().iter().collect();
    let n = members.len();
    let tables: Vec<HashMap<LinearKey, AffineForm>> = members.iter().map(|p| build_table(p)).collect();

    let mut h = s.affine_hull();
    let mut global: HashMap<LinearKey, ()> = HashMap::new();

    for (i, p) in members.iter().enumerate() {
        'candidate: for c in per_constituent_candidates(p) {
            let key = LinearKey::new(&c);
            if global.contains_key(&key) {
                continue;
            }
            if tables[..i].iter().any(|t| t.contains_key(&key)) {
                continue;
            }

            let mut cstar = c.clone();
            for pj in members.iter().take(i) {
                if !bound_check(&mut cstar, pj)? {
                    continue 'candidate;
                }
            }
            for (j, pj) in members.iter().enumerate().skip(i + 1) {
                if let Some(existing) = tables[j].get(&key).filter(|e| e.linear() == cstar.linear()) {
                    if existing.constant() > cstar.constant() {
                        cstar.set_constant(existing.constant().clone());
                    }
                } else if !bound_check(&mut cstar, pj)? {
                    continue 'candidate;
                }
            }

            h.alloc_inequality(cstar.clone());
            global.insert(key, ());
        }
    }

    Ok(single_hull(&h))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uset::ineq;

    #[test]
    fn simple_hull_of_two_boxes_keeps_only_translated_bounds() {
        // [0,1]x[0,1] u [1,2]x[1,2]. Every SimpleHull inequality must be a
        // translate of x>=.., x<=.., y>=.., or y<=..; never a diagonal.
        let mut a = Polyhedron::universe(2, 0);
        a.alloc_inequality(ineq(&[0, 1, 0]));
        a.alloc_inequality(ineq(&[1, -1, 0]));
        a.alloc_inequality(ineq(&[0, 0, 1]));
        a.alloc_inequality(ineq(&[1, 0, -1]));
        let mut b = Polyhedron::universe(2, 0);
        b.alloc_inequality(ineq(&[-1, 1, 0]));
        b.alloc_inequality(ineq(&[2, -1, 0]));
        b.alloc_inequality(ineq(&[-1, 0, 1]));
        b.alloc_inequality(ineq(&[2, 0, -1]));
        let mut s = UnionSet::new(2, 0);
        s.push(a);
        s.push(b);
        let h = simple_hull(&s).unwrap();
        for f in h.inequalities() {
            let axis_aligned = (f.linear()[0].sign() == num_bigint::Sign::NoSign) != (f.linear()[1].sign() == num_bigint::Sign::NoSign);
            assert!(axis_aligned);
        }
        // The result is [0,2]x[0,2] (a translation-only over-approximation).
        let inside = vec![crate::int::int(1), crate::int::int(0)];
        for f in h.inequalities() {
            assert!(f.eval_linear(&inside) >= crate::int::zero());
        }
    }

    #[test]
    fn single_member_simple_hull_is_itself() {
        let mut p = Polyhedron::universe(1, 0);
        p.alloc_inequality(ineq(&[0, 1]));
        p.alloc_inequality(ineq(&[2, -1]));
        let s = UnionSet::single(p);
        let h = simple_hull(&s).unwrap();
        assert_eq!(h.inequalities().len(), 2);
    }
}
