//! `AffineForm` and the integer-sequence primitives built on top of it.
//!
//! An `AffineForm` is the ordered vector `[c0, c1, .., cn]`, representing
//! `c0 + sum ci*xi`. The same type is reused for equalities (`= 0`) and
//! inequalities (`>= 0`); the owning container (`Polyhedron`) carries the
//! interpretation.
//!
//! Free functions here mirror a classic integer-sequence toolkit:
//! copy/negate/scale/combine work on coefficient slices so callers can
//! operate on sub-ranges (e.g. the linear part only) without allocating.

use std::hash::{Hash, Hasher};
use std::ops::{Index, IndexMut};

use crate::int::{self, content, exact_div, Int};

/// `[c0, c1, .., cn]`, i.e. `c0 + sum_i ci * x_i`. Length is `1 + dim`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AffineForm(Vec<Int>);

impl AffineForm {
    pub fn zeros(dim: usize) -> Self {
        AffineForm(vec![int::zero(); dim + 1])
    }

    pub fn from_vec(v: Vec<Int>) -> Self {
        AffineForm(v)
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.0.len() - 1
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[inline]
    pub fn as_slice(&self) -> &[Int] {
        &self.0
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Int] {
        &mut self.0
    }

    #[inline]
    pub fn constant(&self) -> &Int {
        &self.0[0]
    }

    #[inline]
    pub fn set_constant(&mut self, v: Int) {
        self.0[0] = v;
    }

    /// The linear part `[c1, .., cn]`, skipping the constant term.
    #[inline]
    pub fn linear(&self) -> &[Int] {
        &self.0[1..]
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|c| c.sign() == num_bigint::Sign::NoSign)
    }

    /// In-place negation: `c <- -c`.
    pub fn negate(&mut self) {
        for c in self.0.iter_mut() {
            *c = -c.clone();
        }
    }

    pub fn negated(&self) -> AffineForm {
        let mut f = self.clone();
        f.negate();
        f
    }

    /// In-place scale by a positive or negative factor.
    pub fn scale(&mut self, factor: &Int) {
        for c in self.0.iter_mut() {
            *c *= factor;
        }
    }

    /// `self <- n*self + d*other` (a facet-update combination step).
    pub fn combine_in_place(&mut self, n: &Int, d: &Int, other: &AffineForm) {
        debug_assert_eq!(self.len(), other.len());
        for (a, b) in self.0.iter_mut().zip(other.0.iter()) {
            *a = &*a * n + b * d;
        }
    }

    /// `n*a + d*b` as a new form.
    pub fn combine(n: &Int, a: &AffineForm, d: &Int, b: &AffineForm) -> AffineForm {
        let mut out = a.clone();
        out.scale(n);
        for (o, bc) in out.0.iter_mut().zip(b.0.iter()) {
            *o += bc * d;
        }
        out
    }

    /// Eliminate the pivot column `pos` of `self` using `pivot`, which must
    /// have a nonzero entry at `pos`: replaces `self` with an integer
    /// combination `a*self - b*pivot` (a,b chosen via `pivot[pos]`,
    /// `self[pos]`) that zeroes column `pos`, then divides out the common
    /// content so the row stays primitive.
    pub fn eliminate(&mut self, pivot: &AffineForm, pos: usize) {
        let a = pivot.0[pos].clone();
        let b = self.0[pos].clone();
        if b.sign() == num_bigint::Sign::NoSign {
            return;
        }
        let g = int::gcd(&a, &b);
        let ca = int::exact_div(&a, &g);
        let cb = int::exact_div(&b, &g);
        for (s, p) in self.0.iter_mut().zip(pivot.0.iter()) {
            *s = &*s * &ca - p * &cb;
        }
        self.normalize();
    }

    /// Index of the first nonzero coefficient in the linear part (`None` if
    /// the form is a pure constant). Used by `IndepBounds`'s echelon
    /// maintenance.
    pub fn first_nonzero_linear_index(&self) -> Option<usize> {
        self.linear()
            .iter()
            .position(|c| c.sign() != num_bigint::Sign::NoSign)
    }

    /// Divide through by the gcd of all coefficients (including the
    /// constant), so the form is primitive. A no-op on the zero form.
    pub fn normalize(&mut self) {
        let g = content(&self.0);
        if g.sign() == num_bigint::Sign::NoSign || g == int::one() {
            return;
        }
        for c in self.0.iter_mut() {
            *c = exact_div(c, &g);
        }
    }

    /// `true` if `self == -other` exactly. Call sites that need the
    /// *sign-insensitive* match on the linear part only should go through
    /// [`crate::hashkey::LinearKey`] instead.
    pub fn is_negation_of(&self, other: &AffineForm) -> bool {
        self.len() == other.len() && self.0.iter().zip(other.0.iter()).all(|(a, b)| *a == -b)
    }

    pub fn eval_linear(&self, point: &[Int]) -> Int {
        debug_assert_eq!(point.len(), self.dim());
        let mut acc = self.0[0].clone();
        for (c, x) in self.linear().iter().zip(point.iter()) {
            acc += c * x;
        }
        acc
    }
}

impl Index<usize> for AffineForm {
    type Output = Int;
    #[inline]
    fn index(&self, i: usize) -> &Int {
        &self.0[i]
    }
}

impl IndexMut<usize> for AffineForm {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut Int {
        &mut self.0[i]
    }
}

impl Hash for AffineForm {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

/// Copy `src` into a freshly allocated form (isl_seq_cpy equivalent: `Clone`
/// already does this; kept as a free function for call sites that read like
/// the original algorithm description).
pub fn copy(src: &AffineForm) -> AffineForm {
    src.clone()
}

/// `a - b` elementwise, same length.
pub fn sub(a: &AffineForm, b: &AffineForm) -> AffineForm {
    debug_assert_eq!(a.len(), b.len());
    let v: Vec<Int> = a.as_slice().iter().zip(b.as_slice()).map(|(x, y)| x - y).collect();
    AffineForm::from_vec(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(cs: &[i64]) -> AffineForm {
        AffineForm::from_vec(cs.iter().map(|&c| int::int(c)).collect())
    }

    #[test]
    fn negate_is_involution() {
        let f = form(&[1, 2, -3]);
        let mut g = f.clone();
        g.negate();
        g.negate();
        assert_eq!(f, g);
    }

    #[test]
    fn normalize_divides_by_content() {
        let mut f = form(&[2, 4, -6]);
        f.normalize();
        assert_eq!(f, form(&[1, 2, -3]));
    }

    #[test]
    fn is_negation_of_detects_sign_flip() {
        let a = form(&[1, 2, -3]);
        let b = form(&[-1, -2, 3]);
        assert!(a.is_negation_of(&b));
        assert!(!a.is_negation_of(&a));
    }

    #[test]
    fn combine_matches_manual_arithmetic() {
        let a = form(&[1, 0, 1]);
        let b = form(&[0, 1, 0]);
        let c = AffineForm::combine(&int::int(2), &a, &int::int(3), &b);
        assert_eq!(c, form(&[2, 3, 2]));
    }
}
