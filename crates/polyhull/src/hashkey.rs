//! Sign-normalized hash key over an `AffineForm`'s linear part.
//!
//! Two hash tables elsewhere in this crate (`ProtoHull`'s constraint
//! multiset, `SimpleHull`'s inequality table) need to treat `h` and `-h` as
//! the same key on the linear part; when the stored constant is consulted,
//! callers must re-negate accordingly. This module encapsulates that in a
//! dedicated key type.

use std::hash::{Hash, Hasher};

use crate::int::Int;
use crate::seq::AffineForm;

/// Canonical (sign-normalized) linear part of an `AffineForm`, plus whether
/// *this particular* form had to be negated to reach that canonical form.
/// Two forms with the same [`LinearKey::canon`] have linear parts that are
/// equal up to an overall sign; comparing their `negated` flags tells a
/// caller whether they point the same way or opposite ways.
#[derive(Clone, Debug)]
pub struct LinearKey {
    canon: Vec<Int>,
    negated: bool,
}

impl LinearKey {
    pub fn new(form: &AffineForm) -> LinearKey {
        let lin = form.linear();
        match lin.iter().position(|c| c.sign() != num_bigint::Sign::NoSign) {
            None => LinearKey { canon: lin.to_vec(), negated: false },
            Some(idx) => {
                if lin[idx].sign() == num_bigint::Sign::Minus {
                    LinearKey { canon: lin.iter().map(|c| -c.clone()).collect(), negated: true }
                } else {
                    LinearKey { canon: lin.to_vec(), negated: false }
                }
            }
        }
    }

    /// `true` if this form was flipped relative to its canonical linear part.
    #[inline]
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// `true` iff `self` and `other` point the *same* direction (i.e. their
    /// source forms are equal, not merely negatives, on the linear part).
    pub fn same_direction_as(&self, other: &LinearKey) -> bool {
        self.canon == other.canon && self.negated == other.negated
    }
}

impl PartialEq for LinearKey {
    fn eq(&self, other: &Self) -> bool {
        self.canon == other.canon
    }
}
impl Eq for LinearKey {}

impl Hash for LinearKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canon.hash(state);
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
    fn h_and_negated_h_share_a_key() {
        let a = LinearKey::new(&form(&[3, 1, 2]));
        let b = LinearKey::new(&form(&[-3, -1, -2]));
        assert_eq!(a, b);
        assert!(a.is_negated() != b.is_negated());
        assert!(!a.same_direction_as(&b));
    }

    #[test]
    fn independent_linear_parts_differ() {
        let a = LinearKey::new(&form(&[0, 1, 0]));
        let b = LinearKey::new(&form(&[0, 0, 1]));
        assert_ne!(a, b);
    }
}
