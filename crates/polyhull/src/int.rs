//! Exact-arithmetic scalar types.
//!
//! `Int` is the unbounded-precision signed integer coefficients are stored
//! in; `Rat` is the exact rational used wherever a quotient cannot be kept
//! as an integer (LP optima, matrix right-inverses). Every algorithm in this
//! crate is built on these two types instead of `f64`: redundancy,
//! boundedness and facet-adjacency decisions are all taken from exact
//! comparisons, never epsilon thresholds.

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

pub type Int = BigInt;
pub type Rat = BigRational;

#[inline]
pub fn int(v: i64) -> Int {
    Int::from(v)
}

#[inline]
pub fn zero() -> Int {
    Int::zero()
}

#[inline]
pub fn one() -> Int {
    Int::one()
}

/// `gcd(|a|, |b|)`, with `gcd(0, x) = |x|`.
#[inline]
pub fn gcd(a: &Int, b: &Int) -> Int {
    a.gcd(b)
}

/// Bezout coefficients `(g, p, q)` with `g = p*a + q*b`, `g >= 0`.
#[inline]
pub fn extended_gcd(a: &Int, b: &Int) -> (Int, Int, Int) {
    let e = a.extended_gcd(b);
    if e.gcd.is_negative() {
        (-e.gcd, -e.x, -e.y)
    } else {
        (e.gcd, e.x, e.y)
    }
}

/// gcd of a slice, skipping leading/trailing zeros; `0` if all entries are zero.
pub fn content(xs: &[Int]) -> Int {
    let mut g = zero();
    for x in xs {
        g = gcd(&g, x);
    }
    g
}

/// Exact rational-to-int division, asserting the quotient is exact.
/// Used after content-reduction, where the remainder is zero by construction.
pub fn exact_div(a: &Int, b: &Int) -> Int {
    debug_assert!(!b.is_zero());
    debug_assert!((a % b).is_zero());
    a / b
}
