//! `UnionSet`: an ordered list of `Polyhedron`s over a common ambient space,
//! denoting their set-theoretic union. May be empty (denotes the empty set).

use crate::int::{self, Int};
use crate::polyhedron::Polyhedron;
use crate::seq::AffineForm;

/// Finite union of polyhedra sharing an ambient dimension and div count.
#[derive(Clone, Debug)]
pub struct UnionSet {
    dim: usize,
    n_div: usize,
    members: Vec<Polyhedron>,
}

impl UnionSet {
    pub fn new(dim: usize, n_div: usize) -> UnionSet {
        UnionSet { dim, n_div, members: Vec::new() }
    }

    pub fn from_members(dim: usize, n_div: usize, members: Vec<Polyhedron>) -> UnionSet {
        debug_assert!(members.iter().all(|p| p.dim() == dim));
        UnionSet { dim, n_div, members }
    }

    pub fn single(poly: Polyhedron) -> UnionSet {
        UnionSet { dim: poly.dim(), n_div: poly.n_div(), members: vec![poly] }
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    pub fn n_div(&self) -> usize {
        self.n_div
    }

    #[inline]
    pub fn members(&self) -> &[Polyhedron] {
        &self.members
    }

    pub fn members_mut(&mut self) -> &mut Vec<Polyhedron> {
        &mut self.members
    }

    pub fn push(&mut self, p: Polyhedron) {
        debug_assert_eq!(p.dim(), self.dim);
        self.members.push(p);
    }

    /// `true` iff every member is flagged empty, or there are no members.
    pub fn is_empty(&self) -> bool {
        self.members.iter().all(|p| p.is_empty())
    }

    /// The non-empty members, in their original order. Most algorithms in
    /// this crate operate on this view.
    pub fn live_members(&self) -> impl Iterator<Item = &Polyhedron> {
        self.members.iter().filter(|p| !p.is_empty())
    }

    pub fn live_count(&self) -> usize {
        self.live_members().count()
    }

    /// A copy with every empty member dropped.
    pub fn normalize(&self) -> UnionSet {
        UnionSet {
            dim: self.dim,
            n_div: self.n_div,
            members: self.members.iter().filter(|p| !p.is_empty()).cloned().collect(),
        }
    }

    /// `true` iff every live member's recession cone is `{0}`.
    pub fn is_bounded(&self) -> bool {
        self.live_members().all(|p| crate::lp::Tab::from_recession_cone(p).cone_is_bounded())
    }

    /// The smallest affine subspace containing the union: the set of
    /// equalities implied by *every* live member, computed via
    /// [`crate::bound_search`]'s machinery
    /// folded over both directions of the candidate equalities from the
    /// first live member, then checked against the rest. Returns a
    /// constraint-free-of-inequalities `Polyhedron` in the shared ambient
    /// space; `empty` if every member is empty.
    pub fn affine_hull(&self) -> Polyhedron {
        let mut live = self.live_members();
        let Some(first) = live.next() else {
            return Polyhedron::empty(self.dim, self.n_div);
        };
        let mut hull = first.affine_hull();
        for p in live {
            hull = intersect_affine_hulls(&hull, &p.affine_hull());
        }
        hull
    }

    /// Apply a coordinate change `x = M z` to every member.
    pub fn preimage(&self, m: &crate::matrix::Matrix) -> UnionSet {
        UnionSet {
            dim: m.ncols(),
            n_div: self.n_div,
            members: self.members.iter().map(|p| p.preimage(m)).collect(),
        }
    }

    /// Intersect every member with `rhs` (same ambient dimension).
    pub fn intersect_poly(&self, rhs: &Polyhedron) -> UnionSet {
        UnionSet {
            dim: self.dim,
            n_div: self.n_div,
            members: self.members.iter().map(|p| p.intersect(rhs)).collect(),
        }
    }

    /// Simplify (and drop empties from) every member.
    pub fn finalize(&mut self) {
        for p in self.members.iter_mut() {
            p.finalize();
        }
    }
}

/// The affine hull of the union of two already-affine-hull polyhedra: the
/// equalities true of *both*. An affine form vanishes on `a` iff it is some
/// linear combination `alpha . a.equalities()`, and likewise for `b`; so the
/// forms vanishing on both are exactly the common vectors of the two row
/// spans, found by solving `alpha . a.equalities() = beta . b.equalities()`
/// for `(alpha, beta)` and reading off the resulting vector. We solve it by
/// row-reducing `a`'s rows and `-b`'s rows together with each row tagged by
/// an extra one-hot column recording which original rows built it: once a
/// row's untagged part reduces to zero, its tag (restricted to the `a`-side
/// columns) gives the `alpha` for one basis vector of the joint hull.
///
/// (A per-row membership test against a single side's pivots, as one might
/// first reach for, misses equalities that are combinations of several of
/// that side's rows: e.g. `a = {x=0, y=0}`, `b = {x=1, y=1}` share the line
/// `x-y=0`, which is `1*(x=0) - 1*(y=0)`, not a multiple of either row alone.)
fn intersect_affine_hulls(a: &Polyhedron, b: &Polyhedron) -> Polyhedron {
    if a.is_empty() {
        return b.clone();
    }
    if b.is_empty() {
        return a.clone();
    }
    let dim = a.dim();
    let n_div = a.n_div().max(b.n_div());
    let rational = a.is_rational() || b.is_rational();
    let a_rows = a.equalities();
    let b_rows = b.equalities();
    let k1 = a_rows.len();
    let k2 = b_rows.len();
    if k1 == 0 || k2 == 0 {
        let mut universe = Polyhedron::universe(dim, n_div);
        universe.set_rational(rational);
        return universe;
    }

    let m = dim + 1;
    let width = m + k1 + k2;
    let mut rows: Vec<Vec<Int>> = Vec::with_capacity(k1 + k2);
    for (i, r) in a_rows.iter().enumerate() {
        let mut row = vec![int::zero(); width];
        row[..m].clone_from_slice(r.as_slice());
        row[m + i] = int::one();
        rows.push(row);
    }
    for (j, r) in b_rows.iter().enumerate() {
        let mut row = vec![int::zero(); width];
        for (c, v) in r.as_slice().iter().enumerate() {
            row[c] = -v.clone();
        }
        row[m + k1 + j] = int::one();
        rows.push(row);
    }

    let mut used_cols: Vec<usize> = Vec::new();
    for idx in 0..rows.len() {
        let Some(col) = (0..m).find(|c| !used_cols.contains(c) && rows[idx][*c].sign() != num_bigint::Sign::NoSign) else {
            continue; // the row's leading `m` columns are already zero: a certificate.
        };
        used_cols.push(col);
        let pivot = rows[idx].clone();
        for (r, row) in rows.iter_mut().enumerate() {
            if r != idx {
                eliminate_tracked_row(row, &pivot, col);
            }
        }
    }

    let mut kept: Vec<AffineForm> = Vec::new();
    for row in &rows {
        if row[..m].iter().any(|c| c.sign() != num_bigint::Sign::NoSign) {
            continue;
        }
        let mut w = AffineForm::zeros(dim);
        for (coef, ar) in row[m..m + k1].iter().zip(a_rows.iter()) {
            if coef.sign() != num_bigint::Sign::NoSign {
                w.combine_in_place(&int::one(), coef, ar);
            }
        }
        w.normalize();
        if !w.is_zero() {
            kept.push(w);
        }
    }

    let mut out = Polyhedron::from_parts(dim, n_div, rational, kept, Vec::new());
    out.gauss();
    out
}

/// Zeroes `row[col]` via the integer combination `ca*row - cb*pivot` (content
/// divided out afterwards), exactly [`AffineForm::eliminate`]'s arithmetic
/// but over the raw tracking-augmented rows [`intersect_affine_hulls`] builds.
fn eliminate_tracked_row(row: &mut [Int], pivot: &[Int], col: usize) {
    let b = row[col].clone();
    if b.sign() == num_bigint::Sign::NoSign {
        return;
    }
    let a = pivot[col].clone();
    let g = int::gcd(&a, &b);
    let ca = int::exact_div(&a, &g);
    let cb = int::exact_div(&b, &g);
    for (s, p) in row.iter_mut().zip(pivot.iter()) {
        *s = &*s * &ca - p * &cb;
    }
    let content = int::content(row);
    if content.sign() != num_bigint::Sign::NoSign && content != int::one() {
        for c in row.iter_mut() {
            *c = int::exact_div(c, &content);
        }
    }
}

#[cfg(test)]
pub(crate) fn ineq(cs: &[i64]) -> AffineForm {
    AffineForm::from_vec(cs.iter().map(|&c| int::int(c)).collect())
}
