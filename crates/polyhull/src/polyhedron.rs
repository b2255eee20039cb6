//! The polyhedron data type and its primitives.
//!
//! No crate in the Rust ecosystem provides exact rational polyhedra, so,
//! exactly as `matrix.rs` and `lp.rs` do for their own numeric layers,
//! this module implements it directly.
//!
//! A `Polyhedron` is a conjunction of equalities (`= 0`) and inequalities
//! (`>= 0`) over a common ambient dimension, plus the `rational` and
//! `empty` flags and the two LP-layer flags (`NO_REDUNDANT`, `NO_IMPLICIT`).
//! Mutation is always by value (`&mut self` on an owned `Polyhedron`);
//! Rust's ownership model already gives the copy-on-write discipline a
//! hand-rolled refcounted type would need (a `Polyhedron` behind a shared
//! reference simply cannot be mutated; callers that need to mutate a
//! possibly-shared one `.clone()` first).

use crate::int::{self, Int};
use crate::matrix::Matrix;
use crate::seq::AffineForm;

/// A conjunction of affine equalities and inequalities over `ℚ^dim`. The
/// trailing `n_div` coordinates are existentially quantified "div"
/// variables, treated as ordinary dimensions by every algorithm in this
/// crate except `bounded_simple_hull`, which must know where they start in
/// order to drop them.
#[derive(Clone, Debug)]
pub struct Polyhedron {
    dim: usize,
    n_div: usize,
    rational: bool,
    empty: bool,
    no_redundant: bool,
    no_implicit: bool,
    equalities: Vec<AffineForm>,
    inequalities: Vec<AffineForm>,
}

impl Polyhedron {
    /// The universe (no constraints) over `dim` ordinary dimensions plus
    /// `n_div` div dimensions.
    pub fn universe(dim: usize, n_div: usize) -> Polyhedron {
        Polyhedron {
            dim,
            n_div,
            rational: false,
            empty: false,
            no_redundant: false,
            no_implicit: false,
            equalities: Vec::new(),
            inequalities: Vec::new(),
        }
    }

    pub fn from_parts(
        dim: usize,
        n_div: usize,
        rational: bool,
        equalities: Vec<AffineForm>,
        inequalities: Vec<AffineForm>,
    ) -> Polyhedron {
        debug_assert!(equalities.iter().all(|e| e.dim() == dim));
        debug_assert!(inequalities.iter().all(|e| e.dim() == dim));
        Polyhedron {
            dim,
            n_div,
            rational,
            empty: false,
            no_redundant: false,
            no_implicit: false,
            equalities,
            inequalities,
        }
    }

    pub fn empty(dim: usize, n_div: usize) -> Polyhedron {
        let mut p = Polyhedron::universe(dim, n_div);
        p.set_to_empty();
        p
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
    pub fn is_rational(&self) -> bool {
        self.rational
    }

    #[inline]
    pub fn set_rational(&mut self, rational: bool) {
        self.rational = rational;
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.empty
    }

    /// Flags the polyhedron empty and releases its constraint lists: whenever
    /// any constraint has no rational solution together, `empty` is set and
    /// the lists are cleared.
    pub fn set_to_empty(&mut self) {
        self.empty = true;
        self.equalities.clear();
        self.inequalities.clear();
        self.no_redundant = true;
        self.no_implicit = true;
    }

    #[inline]
    pub fn no_redundant(&self) -> bool {
        self.no_redundant
    }

    #[inline]
    pub fn set_no_redundant(&mut self, v: bool) {
        self.no_redundant = v;
    }

    #[inline]
    pub fn no_implicit(&self) -> bool {
        self.no_implicit
    }

    #[inline]
    pub fn set_no_implicit(&mut self, v: bool) {
        self.no_implicit = v;
    }

    #[inline]
    pub fn equalities(&self) -> &[AffineForm] {
        &self.equalities
    }

    #[inline]
    pub fn inequalities(&self) -> &[AffineForm] {
        &self.inequalities
    }

    pub fn equalities_mut(&mut self) -> &mut Vec<AffineForm> {
        &mut self.equalities
    }

    pub fn inequalities_mut(&mut self) -> &mut Vec<AffineForm> {
        &mut self.inequalities
    }

    pub fn alloc_equality(&mut self, f: AffineForm) {
        debug_assert_eq!(f.dim(), self.dim);
        self.no_implicit = false;
        self.equalities.push(f);
    }

    pub fn alloc_inequality(&mut self, f: AffineForm) {
        debug_assert_eq!(f.dim(), self.dim);
        self.no_redundant = false;
        self.inequalities.push(f);
    }

    /// Append `count` fresh unconstrained dimensions at the end (before the
    /// div block), widening every existing constraint with zero columns.
    pub fn extend_dims(&mut self, count: usize) {
        for f in self.equalities.iter_mut().chain(self.inequalities.iter_mut()) {
            let mut v = f.as_slice().to_vec();
            v.splice(v.len() - self.n_div..v.len() - self.n_div, std::iter::repeat(int::zero()).take(count));
            *f = AffineForm::from_vec(v);
        }
        self.dim += count;
    }

    /// Gaussian elimination over the equality block: reduce to
    /// echelon form, substituting each pivot out of every other equality
    /// *and* every inequality so the stored inequalities stay in terms of
    /// the free variables only. Detects a contradictory equality (`c = 0`
    /// with `c != 0`) and flags the polyhedron empty.
    pub fn gauss(&mut self) {
        if self.empty {
            return;
        }
        let mut pivot_row = 0usize;
        let mut used_cols: Vec<usize> = Vec::new();
        while pivot_row < self.equalities.len() {
            self.equalities[pivot_row].normalize();
            let Some(rel) = self.equalities[pivot_row]
                .linear()
                .iter()
                .enumerate()
                .find(|(col, c)| !used_cols.contains(col) && c.sign() != num_bigint::Sign::NoSign)
                .map(|(col, _)| col)
            else {
                // No nonzero coefficient on a free column: either `0 = 0`
                // (drop it) or a genuine contradiction.
                if self.equalities[pivot_row].constant().sign() != num_bigint::Sign::NoSign {
                    self.set_to_empty();
                    return;
                }
                self.equalities.remove(pivot_row);
                continue;
            };
            used_cols.push(rel);
            let pivot = self.equalities[pivot_row].clone();
            for (i, e) in self.equalities.iter_mut().enumerate() {
                if i != pivot_row {
                    e.eliminate(&pivot, rel + 1);
                }
            }
            for h in self.inequalities.iter_mut() {
                h.eliminate(&pivot, rel + 1);
            }
            pivot_row += 1;
        }
        self.equalities.sort_by(|a, b| a.first_nonzero_linear_index().cmp(&b.first_nonzero_linear_index()));
    }

    /// Normalize every stored form and drop exact (post-normalization)
    /// duplicate inequalities; the "no two forms that are positive scalar
    /// multiples" invariant. Detects a trivially-false
    /// inequality (`c >= 0` with `c` a negative constant) and flags empty.
    pub fn simplify(&mut self) {
        self.gauss();
        if self.empty {
            return;
        }
        for h in self.inequalities.iter_mut() {
            h.normalize();
            if h.linear().iter().all(|c| c.sign() == num_bigint::Sign::NoSign) && h.constant().sign() == num_bigint::Sign::Minus {
                self.set_to_empty();
                return;
            }
        }
        let mut kept: Vec<AffineForm> = Vec::with_capacity(self.inequalities.len());
        for h in self.inequalities.drain(..) {
            if !kept.contains(&h) {
                kept.push(h);
            }
        }
        self.inequalities = kept;
    }

    /// `finalize`/`simplify` alias: the terminal cleanup step every algorithm runs on its result before
    /// returning it to its caller.
    pub fn finalize(&mut self) {
        self.simplify();
    }

    /// The smallest affine subspace containing this polyhedron, as a
    /// constraint-free-of-inequalities `Polyhedron`. This per-polyhedron
    /// version only reports the equalities already present (after `gauss`);
    /// combining several polyhedra's affine hulls into the hull of their
    /// *union* needs the stronger [`crate::uset::UnionSet::affine_hull`].
    pub fn affine_hull(&self) -> Polyhedron {
        let mut p = self.clone();
        p.gauss();
        if p.is_empty() {
            return p;
        }
        p.inequalities.clear();
        p.no_redundant = true;
        p
    }

    /// Coordinate change `x = M z`: reinterpret every constraint over the
    /// new coordinates `z`. `M` must map
    /// `M.ncols()`-dim `z` to this polyhedron's `dim`-dim `x`
    /// (`M.nrows() == self.dim`).
    pub fn preimage(&self, m: &Matrix) -> Polyhedron {
        debug_assert_eq!(m.nrows(), self.dim);
        let mut out = Polyhedron::universe(m.ncols(), self.n_div);
        out.rational = self.rational;
        out.empty = self.empty;
        out.equalities = self.equalities.iter().map(|f| AffineForm::from_vec(m.pushforward_row(f.as_slice()))).collect();
        out.inequalities = self.inequalities.iter().map(|f| AffineForm::from_vec(m.pushforward_row(f.as_slice()))).collect();
        out
    }

    /// Coordinate change in *homogeneous* form, `x = T w` where `T` is
    /// `(1+dim) x (1+newdim)` and its row 0 is `(1,0,..,0)` (so `w`'s own
    /// constant slot maps straight through). Unlike [`Polyhedron::preimage`]
    /// this can express an affine shift, not just a linear map; exactly
    /// what `wrap.rs`'s ridge-rotation transform needs, since it moves the
    /// ridge onto a coordinate hyperplane rather than just changing basis
    /// through the origin.
    pub fn preimage_homogeneous(&self, t: &Matrix) -> Polyhedron {
        debug_assert_eq!(t.nrows(), self.dim + 1);
        let new_dim = t.ncols() - 1;
        let mut out = Polyhedron::universe(new_dim, self.n_div);
        out.rational = self.rational;
        out.empty = self.empty;
        out.equalities = self.equalities.iter().map(|f| AffineForm::from_vec(t.pushforward_affine_row(f.as_slice()))).collect();
        out.inequalities = self.inequalities.iter().map(|f| AffineForm::from_vec(t.pushforward_affine_row(f.as_slice()))).collect();
        out
    }

    /// Conjunction of `self` and `other` (same ambient dimension).
    pub fn intersect(&self, other: &Polyhedron) -> Polyhedron {
        debug_assert_eq!(self.dim, other.dim);
        if self.empty || other.empty {
            return Polyhedron::empty(self.dim, self.n_div.max(other.n_div));
        }
        let mut out = Polyhedron::universe(self.dim, self.n_div.max(other.n_div));
        out.rational = self.rational || other.rational;
        out.equalities = self.equalities.iter().chain(other.equalities.iter()).cloned().collect();
        out.inequalities = self.inequalities.iter().chain(other.inequalities.iter()).cloned().collect();
        out
    }

    /// Remove `count` dimensions starting at `first`, which must already be
    /// unconstrained (zero coefficient) in every stored form; the cheap
    /// structural drop used after `gauss`/`eliminate_dims` have removed a
    /// variable's influence everywhere. Use [`Polyhedron::eliminate_dims`]
    /// when the variable still genuinely constrains the polyhedron.
    pub fn remove_dims(&self, first: usize, count: usize) -> Polyhedron {
        debug_assert!(first + count <= self.dim);
        debug_assert!(self
            .equalities
            .iter()
            .chain(self.inequalities.iter())
            .all(|f| f.linear()[first..first + count].iter().all(|c| c.sign() == num_bigint::Sign::NoSign)));
        let drop = |f: &AffineForm| {
            let mut v = f.as_slice().to_vec();
            v.drain(first + 1..first + 1 + count);
            AffineForm::from_vec(v)
        };
        let mut out = Polyhedron::universe(self.dim - count, self.n_div);
        out.rational = self.rational;
        out.empty = self.empty;
        out.equalities = self.equalities.iter().map(drop).collect();
        out.inequalities = self.inequalities.iter().map(drop).collect();
        out
    }

    /// Full projection (Fourier-Motzkin elimination) of `count` dimensions
    /// starting at `first`, used by `elim_hull.rs` and `remove_divs`. Each
    /// eliminated variable is first substituted away via an equality
    /// mentioning it if one exists (cheap, exact); otherwise it is removed
    /// by pairwise Fourier-Motzkin combination of the inequalities that
    /// bound it.
    pub fn eliminate_dims(&self, first: usize, count: usize) -> Polyhedron {
        let mut p = self.clone();
        p.gauss();
        if p.is_empty() {
            return Polyhedron::empty(self.dim - count, self.n_div.saturating_sub(count));
        }
        for offset in 0..count {
            let var = first; // columns shift left as we remove; always target `first`.
            let _ = offset;
            p.eliminate_one_dim(var);
        }
        p.dim -= count;
        p.n_div = p.n_div.saturating_sub(count);
        p
    }

    fn eliminate_one_dim(&mut self, var: usize) {
        if let Some(idx) = self.equalities.iter().position(|e| e.linear()[var].sign() != num_bigint::Sign::NoSign) {
            let pivot = self.equalities.remove(idx);
            for e in self.equalities.iter_mut() {
                e.eliminate(&pivot, var + 1);
            }
            for h in self.inequalities.iter_mut() {
                h.eliminate(&pivot, var + 1);
            }
        } else {
            let mut pos = Vec::new();
            let mut neg = Vec::new();
            let mut rest = Vec::new();
            for h in self.inequalities.drain(..) {
                match h.linear()[var].sign() {
                    num_bigint::Sign::Plus => pos.push(h),
                    num_bigint::Sign::Minus => neg.push(h),
                    num_bigint::Sign::NoSign => rest.push(h),
                }
            }
            for p in &pos {
                for n in &neg {
                    let mut combined = p.clone();
                    combined.eliminate(n, var + 1);
                    rest.push(combined);
                }
            }
            self.inequalities = rest;
        }
        // Drop the now-unconstrained column.
        let drop = |f: &AffineForm| {
            let mut v = f.as_slice().to_vec();
            v.remove(var + 1);
            AffineForm::from_vec(v)
        };
        self.equalities = self.equalities.iter().map(drop).collect();
        self.inequalities = self.inequalities.iter().map(drop).collect();
    }

    /// Remove this polyhedron's own div dimensions via
    /// [`Polyhedron::eliminate_dims`], each div being removed only once,
    /// lazily.
    pub fn remove_divs(&self) -> Polyhedron {
        if self.n_div == 0 {
            return self.clone();
        }
        self.eliminate_dims(self.dim - self.n_div, self.n_div)
    }

    /// Substitute a set of (already `gauss`-reduced, pairwise-independent)
    /// equalities into this polyhedron's own constraints, eliminating each
    /// pivot column they name; `gauss`'s elimination step applied to
    /// *foreign* rows. Used by `affine_reduce.rs`, where the equalities
    /// come from the *union*'s shared affine hull rather than from `self`
    /// directly.
    pub fn substitute_equalities(&self, eqs: &[AffineForm]) -> Polyhedron {
        let mut out = self.clone();
        if out.is_empty() {
            return out;
        }
        for pivot in eqs {
            let Some(col) = pivot.first_nonzero_linear_index() else { continue };
            for e in out.equalities.iter_mut() {
                e.eliminate(pivot, col + 1);
            }
            for h in out.inequalities.iter_mut() {
                h.eliminate(pivot, col + 1);
            }
        }
        out
    }

    /// Drop the given (sorted, deduplicated) column indices, each of which
    /// must already carry a zero coefficient in every stored form; the
    /// state `substitute_equalities` leaves the pivot columns in. Pairs
    /// with [`Polyhedron::insert_zero_columns`] as the inverse operation.
    pub fn drop_columns(&self, cols: &[usize]) -> Polyhedron {
        debug_assert!(self
            .equalities
            .iter()
            .chain(self.inequalities.iter())
            .all(|f| cols.iter().all(|&c| f.linear()[c].sign() == num_bigint::Sign::NoSign)));
        let mut sorted = cols.to_vec();
        sorted.sort_unstable();
        let drop = |f: &AffineForm| {
            let mut v = f.as_slice().to_vec();
            for &c in sorted.iter().rev() {
                v.remove(c + 1);
            }
            AffineForm::from_vec(v)
        };
        let mut out = Polyhedron::universe(self.dim - cols.len(), self.n_div);
        out.rational = self.rational;
        out.empty = self.empty;
        out.equalities = self.equalities.iter().map(drop).collect();
        out.inequalities = self.inequalities.iter().map(drop).collect();
        out
    }

    /// Inverse of [`Polyhedron::drop_columns`]: insert a zero coefficient
    /// at each position in `cols` (indices in the *output*, `new_dim`-sized
    /// space), widening every stored form.
    pub fn insert_zero_columns(&self, cols: &[usize], new_dim: usize) -> Polyhedron {
        debug_assert_eq!(new_dim - self.dim, cols.len());
        let insert = |f: &AffineForm| {
            let mut v = f.as_slice().to_vec();
            let mut sorted = cols.to_vec();
            sorted.sort_unstable();
            for &c in &sorted {
                v.insert(c + 1, int::zero());
            }
            AffineForm::from_vec(v)
        };
        let mut out = Polyhedron::universe(new_dim, self.n_div);
        out.rational = self.rational;
        out.empty = self.empty;
        out.equalities = self.equalities.iter().map(insert).collect();
        out.inequalities = self.inequalities.iter().map(insert).collect();
        out
    }
}

impl Matrix {
    /// Inverse of a *square* unimodular integer matrix, via the same
    /// right-inverse machinery (`m` rows == `m` columns here, so the
    /// right inverse is the two-sided inverse).
    pub fn right_inverse_square(&self) -> Matrix {
        debug_assert_eq!(self.nrows(), self.ncols());
        self.right_inverse()
    }

    /// Homogeneous row-vector pushforward: `row` (length `self.nrows()`,
    /// index 0 the constant slot) times `self`, producing a row of length
    /// `self.ncols()`. Unlike [`Matrix::pushforward_row`] this transforms
    /// the constant slot too, so it can express an affine shift; see
    /// [`Polyhedron::preimage_homogeneous`].
    pub fn pushforward_affine_row(&self, row: &[Int]) -> Vec<Int> {
        debug_assert_eq!(row.len(), self.nrows());
        let mut out = vec![int::zero(); self.ncols()];
        for i in 0..self.nrows() {
            let c = &row[i];
            if c.sign() == num_bigint::Sign::NoSign {
                continue;
            }
            for j in 0..self.ncols() {
                out[j] += c * self.get(i, j);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::int;

    fn form(cs: &[i64]) -> AffineForm {
        AffineForm::from_vec(cs.iter().map(|&c| int::int(c)).collect())
    }

    #[test]
    fn gauss_detects_contradiction() {
        let mut p = Polyhedron::universe(1, 0);
        p.alloc_equality(form(&[1, 0])); // 1 = 0
        p.gauss();
        assert!(p.is_empty());
    }

    #[test]
    fn gauss_substitutes_pivot_into_inequalities() {
        // x = 2 (i.e. -2 + x = 0), y >= x i.e. y - x >= 0.
        let mut p = Polyhedron::universe(2, 0);
        p.alloc_equality(form(&[-2, 1, 0]));
        p.alloc_inequality(form(&[0, -1, 1]));
        p.gauss();
        assert_eq!(p.equalities().len(), 1);
        // y - x >= 0 becomes y - 2 >= 0 after eliminating x.
        assert_eq!(p.inequalities()[0], form(&[-2, 0, 1]));
    }

    #[test]
    fn eliminate_dims_via_equality_is_exact() {
        // x = 1, y >= 0, x + y <= 3 -> eliminate x -> y >= 0, y <= 2.
        let mut p = Polyhedron::universe(2, 0);
        p.alloc_equality(form(&[-1, 1, 0]));
        p.alloc_inequality(form(&[0, 0, 1]));
        p.alloc_inequality(form(&[3, -1, -1]));
        let reduced = p.eliminate_dims(0, 1);
        assert_eq!(reduced.dim(), 1);
        assert!(reduced.equalities().is_empty());
        assert_eq!(reduced.inequalities().len(), 2);
    }

    #[test]
    fn eliminate_dims_fourier_motzkin() {
        // 0<=x<=2, 0<=y<=2, eliminate x -> 0<=y<=2 survives, trivial x bounds gone.
        let mut p = Polyhedron::universe(2, 0);
        p.alloc_inequality(form(&[0, 1, 0]));
        p.alloc_inequality(form(&[2, -1, 0]));
        p.alloc_inequality(form(&[0, 0, 1]));
        p.alloc_inequality(form(&[2, 0, -1]));
        let reduced = p.eliminate_dims(0, 1);
        assert_eq!(reduced.dim(), 1);
        assert!(reduced.inequalities().iter().any(|h| h == &form(&[0, 1])));
        assert!(reduced.inequalities().iter().any(|h| h == &form(&[2, -1])));
    }

    #[test]
    fn intersect_of_empty_is_empty() {
        let a = Polyhedron::universe(1, 0);
        let b = Polyhedron::empty(1, 0);
        assert!(a.intersect(&b).is_empty());
    }
}
