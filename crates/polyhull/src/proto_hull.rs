//! `ProtoHull` / `CommonConstraints`: a cheap facet prefilter. Inequalities
//! that appear (possibly tightened) across *every* constituent are facets of
//! `conv(S)` without needing any LP; this module also detects the case
//! where a single constituent already equals the hull.
//!
//! Sign-of-zero normalization when hashing an equality's two orientations
//! is delegated to [`crate::hashkey::LinearKey`] rather than repeated at
//! each call site.
//!
//! Simplification (recorded in DESIGN.md): this crate does not demote a
//! surviving entry from inequality to equality when it is only ever matched
//! via another constituent's plain inequality while that constituent *also*
//! carries unrelated equalities elsewhere. A missed demotion only means a
//! constituent-specific degeneracy is reported to [`crate::extend`] as an
//! ordinary inequality, which is already how every other facet arrives
//! there; correctness of the overall hull is unaffected; only the (already
//! best-effort) prefilter may emit one candidate short.
//!
//! `ordering`: for a slot held by the best constituent's own inequality,
//! "weaker" means numerically larger constant after canonicalizing to the
//! best constituent's direction (`LinearKey::is_negated` tracks this).

use std::collections::HashMap;

use crate::hashkey::LinearKey;
use crate::int::Int;
use crate::polyhedron::Polyhedron;
use crate::seq::AffineForm;
use crate::uset::UnionSet;

struct Entry {
    form: AffineForm,
    count: usize,
}

/// Outcome of `ProtoHull`: the facets found to be common to every
/// constituent, and whether some equality-free constituent already equals
/// the hull exactly.
pub struct ProtoHullResult {
    pub facets: Vec<AffineForm>,
    pub is_hull: bool,
}

/// Returns `None` if no constituent is equality-free (no seed to hash
/// against).
pub fn proto_hull(uset: &UnionSet) -> Option<ProtoHullResult> {
    let members: Vec<&Polyhedron> = uset.live_members().collect();
    let (best_idx, best) = members
        .iter()
        .enumerate()
        .filter(|(_, p)| p.equalities().is_empty())
        .min_by_key(|(_, p)| p.inequalities().len())?;

    let mut table: HashMap<LinearKey, Entry> = HashMap::new();
    for h in best.inequalities() {
        let key = LinearKey::new(h);
        table.insert(key, Entry { form: h.clone(), count: 1 });
    }

    let n_others = members.len() - 1;
    for (idx, p) in members.iter().enumerate() {
        if idx == best_idx {
            continue;
        }
        let mut matched: Vec<LinearKey> = Vec::new();
        for e in p.equalities() {
            for candidate in [e.clone(), e.negated()] {
                let key = LinearKey::new(&candidate);
                if let Some(entry) = table.get_mut(&key) {
                    weaken(entry, &key, &candidate);
                    if !matched.iter().any(|k| k == &key) {
                        entry.count += 1;
                        matched.push(key);
                    }
                }
            }
        }
        for h in p.inequalities() {
            let key = LinearKey::new(h);
            if let Some(entry) = table.get_mut(&key) {
                weaken(entry, &key, h);
                if !matched.iter().any(|k| k == &key) {
                    entry.count += 1;
                    matched.push(key);
                }
            }
        }
        table.retain(|k, _| matched.iter().any(|m| m == k));
    }

    let facets: Vec<AffineForm> = table
        .into_values()
        .filter(|entry| entry.count == n_others + 1)
        .map(|entry| entry.form)
        .collect();

    let is_hull = best.equalities().is_empty()
        && best.inequalities().len() == facets.len()
        && best
            .inequalities()
            .iter()
            .all(|h| facets.iter().any(|f| f == h || f.is_negation_of(h)));

    Some(ProtoHullResult { facets, is_hull })
}

/// Update `entry`'s stored constant to the pointwise-weaker (larger) value,
/// given that `candidate` matched `entry`'s key (same linear part up to an
/// overall sign).
fn weaken(entry: &mut Entry, _key: &LinearKey, candidate: &AffineForm) {
    let aligned_candidate_const: Int = if candidate_points_same_way(&entry.form, candidate) {
        candidate.constant().clone()
    } else {
        -candidate.constant().clone()
    };
    if aligned_candidate_const > *entry.form.constant() {
        entry.form.set_constant(aligned_candidate_const);
    }
}

/// `true` iff `candidate`'s linear part equals `reference`'s linear part
/// exactly (not merely up to sign); i.e. they are translates pointing the
/// same way, so their constants are directly comparable.
fn candidate_points_same_way(reference: &AffineForm, candidate: &AffineForm) -> bool {
    reference.linear() == candidate.linear()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uset::ineq;

    #[test]
    fn common_inequality_survives_with_weaker_constant() {
        // { x+y<=2, x>=0, y>=0 } u { x+y<=4, x>=1, y>=1 }.
        let mut a = Polyhedron::universe(2, 0);
        a.alloc_inequality(ineq(&[2, -1, -1]));
        a.alloc_inequality(ineq(&[0, 1, 0]));
        a.alloc_inequality(ineq(&[0, 0, 1]));
        let mut b = Polyhedron::universe(2, 0);
        b.alloc_inequality(ineq(&[4, -1, -1]));
        b.alloc_inequality(ineq(&[-1, 1, 0]));
        b.alloc_inequality(ineq(&[-1, 0, 1]));
        let mut s = UnionSet::new(2, 0);
        s.push(a);
        s.push(b);
        let result = proto_hull(&s).unwrap();
        // Only x+y<=4 survives with the weaker constant; x>=0/y>=0 vs
        // x>=1/y>=1 do not match (different constants would need the
        // *stronger* one dropped entirely since b doesn't offer x>=0).
        assert!(result.facets.iter().any(|f| f == &ineq(&[4, -1, -1])));
    }

    #[test]
    fn is_hull_true_when_one_constituent_dominates() {
        // b fully contains a: a's inequalities are a superset-weakened
        // version of the shared ones, and b (equality-free, fewest
        // inequalities) exactly equals the emitted hull.
        let mut a = Polyhedron::universe(1, 0);
        a.alloc_inequality(ineq(&[0, 1]));
        a.alloc_inequality(ineq(&[1, -1]));
        let mut b = Polyhedron::universe(1, 0);
        b.alloc_inequality(ineq(&[0, 1]));
        b.alloc_inequality(ineq(&[2, -1]));
        let mut s = UnionSet::new(1, 0);
        s.push(b);
        s.push(a);
        let result = proto_hull(&s).unwrap();
        assert!(result.is_hull);
    }
}
