//! `Wrap`: gift-wrapping across one ridge.
//!
//! The homogenised rotation is carried out via
//! [`crate::matrix::Matrix::basis_aligning_transform`], which realigns
//! `e0`, `facet` and `ridge` onto the first three standard basis directions
//! of a fresh coordinate system; the wrapping LP is then assembled directly
//! over the direct sum of the (transformed) constituents and solved with
//! [`crate::lp::solve_lp`].

use num_traits::Zero;

use crate::error::{HullError, Result};
use crate::int::{self, Int};
use crate::lp::{solve_lp, LpResult};
use crate::matrix::Matrix;
use crate::polyhedron::Polyhedron;
use crate::seq::AffineForm;
use crate::uset::UnionSet;

/// `facet` is replaced in place by the unique next facet of `conv(S)`
/// sharing `ridge` with it; if the current `facet` is already a global
/// facet along this ridge (the wrapping LP turns out unbounded), `facet`
/// is left unchanged.
pub fn wrap(uset: &UnionSet, facet: &mut AffineForm, ridge: &AffineForm) -> Result<()> {
    let dim = uset.dim();
    let mut e0 = AffineForm::zeros(dim);
    e0.set_constant(int::one());
    let t = Matrix::from_rows(vec![e0.as_slice().to_vec(), facet.as_slice().to_vec(), ridge.as_slice().to_vec()]);
    let w = t.basis_aligning_transform();

    let transformed: Vec<Polyhedron> = uset.live_members().map(|p| p.preimage_homogeneous(&w)).collect();
    if transformed.is_empty() {
        return Ok(());
    }

    // In the new coordinates, `facet` is exactly linear-index 0 and `ridge`
    // is exactly linear-index 1.
    let idx_f = 0usize;
    let idx_r = 1usize;
    let block = dim + 1; // per-constituent: dim_local coordinates + one dilation.
    let combined_dim = transformed.len() * block;

    let mut equalities = Vec::new();
    let mut inequalities = Vec::new();
    for (i, p) in transformed.iter().enumerate() {
        let offset = i * block;
        for e in p.equalities() {
            equalities.push(homogenize_row(e, offset, dim, combined_dim));
        }
        for h in p.inequalities() {
            inequalities.push(homogenize_row(h, offset, dim, combined_dim));
        }
        // a_i >= 0.
        let mut nonneg = AffineForm::zeros(combined_dim);
        nonneg[1 + offset + dim] = int::one();
        inequalities.push(nonneg);
    }
    // sum_i x_i,F == 1.
    let mut tie = AffineForm::zeros(combined_dim);
    tie.set_constant(-int::one());
    for i in 0..transformed.len() {
        tie[1 + i * block + idx_f] = int::one();
    }
    equalities.push(tie);

    let mut objective = vec![int::zero(); combined_dim];
    for i in 0..transformed.len() {
        objective[i * block + idx_r] = int::one();
    }

    let lp_poly = Polyhedron::from_parts(combined_dim, 0, true, equalities, inequalities);
    match solve_lp(&lp_poly, &objective) {
        LpResult::Unbounded => Ok(()),
        LpResult::Ok(opt) => {
            let n = opt.numer().clone();
            let d = opt.denom().clone();
            *facet = AffineForm::combine(&(-n), facet, &d, ridge);
            facet.normalize();
            Ok(())
        }
        LpResult::Empty => Err(HullError::Precondition("wrap: wrapping LP over a nonempty union was infeasible")),
        LpResult::Error(msg) => Err(HullError::Lp(msg)),
    }
}

/// `c0*a_i + c.x_i >= 0` (or `= 0`), laid out at `row`'s offset block: the
/// constituent's `dim` structural coordinates followed by its dilation
/// variable, embedded in the `combined_dim`-wide direct-sum space.
fn homogenize_row(row: &AffineForm, offset: usize, dim: usize, combined_dim: usize) -> AffineForm {
    let mut out = AffineForm::zeros(combined_dim);
    for k in 0..dim {
        out[1 + offset + k] = row.linear()[k].clone();
    }
    out[1 + offset + dim] = row.constant().clone();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uset::ineq;

    #[test]
    fn wraps_square_edge_to_edge() {
        // 0<=x<=2, 0<=y<=2. Facet y>=0 (ridge x>=0): the next facet sharing
        // the ridge x>=0 (a vertex at the origin, so any face through it)
        // should be the adjacent edge x>=0 itself staying put or rotating
        // to x<=2 depending on orientation; exercise that the LP terminates
        // and returns some facet of the square containing the ridge.
        let mut p = Polyhedron::universe(2, 0);
        p.alloc_inequality(ineq(&[0, 1, 0]));
        p.alloc_inequality(ineq(&[2, -1, 0]));
        p.alloc_inequality(ineq(&[0, 0, 1]));
        p.alloc_inequality(ineq(&[2, 0, -1]));
        let s = UnionSet::single(p);

        let mut facet = ineq(&[0, 0, 1]); // y >= 0
        let ridge = ineq(&[0, 1, 0]); // x >= 0
        wrap(&s, &mut facet, &ridge).unwrap();
        // The result must be a valid supporting hyperplane of the square.
        for m in s.members() {
            for v in sample_vertices() {
                assert!(facet.eval_linear(&v) >= int::zero());
            }
            let _ = m;
        }
    }

    fn sample_vertices() -> Vec<Vec<Int>> {
        vec![
            vec![int::int(0), int::int(0)],
            vec![int::int(2), int::int(0)],
            vec![int::int(0), int::int(2)],
            vec![int::int(2), int::int(2)],
        ]
    }
}
