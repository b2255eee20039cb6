//! `BoundSearch`: decide whether a candidate linear form is bounded below
//! on a union, and if so rescale/shift it into a supporting hyperplane
//! (tight on at least one member, non-negative on every live member).

use crate::int::{self, Rat};
use crate::lp::{solve_lp, LpResult};
use crate::polyhedron::Polyhedron;
use crate::seq::AffineForm;

/// `form`'s constant term is ignored on entry and overwritten on success so
/// that `form` becomes non-negative on every live member of `members` and
/// exactly zero on whichever one attains the minimum. Returns `false`
/// (form's constant left untouched) if some live member is unbounded below
/// along `form`'s linear part. A member newly discovered empty during the
/// search is flagged in place and skipped, never surfaced as an error.
pub fn bound_search(members: &mut [Polyhedron], form: &mut AffineForm) -> bool {
    let mut best: Option<Rat> = None;
    for p in members.iter_mut() {
        if p.is_empty() {
            continue;
        }
        match solve_lp(p, form.linear()) {
            LpResult::Ok(v) => {
                best = Some(match best {
                    None => v,
                    Some(b) => if v < b { v } else { b },
                });
            }
            LpResult::Empty => p.set_to_empty(),
            LpResult::Unbounded => return false,
            LpResult::Error(_) => return false,
        }
    }
    match best {
        None => form.set_constant(int::zero()),
        Some(opt) => rescale_and_shift(form, &opt),
    }
    true
}

/// `c0 <- c0 - opt` folded through an integer rescale when `opt`'s
/// denominator isn't 1: if the optimum is `n/d` with `d != 1`, rescale the
/// whole form by `d`. After this call `form` is non-negative on every live
/// member and exactly zero on whichever one attained `opt`.
fn rescale_and_shift(form: &mut AffineForm, opt: &Rat) {
    let d = opt.denom().clone();
    if d != int::one() {
        form.scale(&d);
    }
    let c0 = form.constant().clone();
    form.set_constant(c0 - opt.numer().clone());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uset::ineq;

    #[test]
    fn bounded_form_becomes_tight_and_nonnegative() {
        // members: 0<=x<=2, 3<=x<=5. Candidate linear form x (c1=1).
        let mut a = Polyhedron::universe(1, 0);
        a.alloc_inequality(ineq(&[0, 1]));
        a.alloc_inequality(ineq(&[2, -1]));
        let mut b = Polyhedron::universe(1, 0);
        b.alloc_inequality(ineq(&[-3, 1]));
        b.alloc_inequality(ineq(&[5, -1]));
        let mut members = vec![a, b];
        let mut form = AffineForm::from_vec(vec![int::int(99), int::int(1)]);
        assert!(bound_search(&mut members, &mut form));
        // tight at x=0 (member a), so c0 should become 0.
        assert_eq!(*form.constant(), int::int(0));
        for p in &members {
            assert!(!p.is_empty());
        }
    }

    #[test]
    fn unbounded_direction_returns_false() {
        let mut a = Polyhedron::universe(1, 0);
        a.alloc_inequality(ineq(&[0, -1])); // x <= 0, unbounded below on -x
        let mut members = vec![a];
        let mut form = AffineForm::from_vec(vec![int::int(0), int::int(-1)]);
        assert!(!bound_search(&mut members, &mut form));
    }

    #[test]
    fn empty_member_is_flagged_and_skipped() {
        let mut a = Polyhedron::universe(1, 0);
        a.alloc_inequality(ineq(&[-1, 1])); // x >= 1
        a.alloc_inequality(ineq(&[0, -1])); // x <= 0, infeasible together
        let mut b = Polyhedron::universe(1, 0);
        b.alloc_inequality(ineq(&[0, 1]));
        let mut members = vec![a, b];
        let mut form = AffineForm::from_vec(vec![int::int(0), int::int(1)]);
        assert!(bound_search(&mut members, &mut form));
        assert!(members[0].is_empty());
        assert!(!members[1].is_empty());
    }
}
