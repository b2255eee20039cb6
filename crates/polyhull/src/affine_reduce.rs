//! Fold a union's shared equalities out of the ambient space before handing
//! the (now full-dimensional) remainder to the dimension/boundedness
//! dispatcher.
//!
//! The coordinate change uses the same homogeneous basis-alignment trick as
//! `wrap.rs`: stack `e0` above the shared equalities and call
//! [`crate::matrix::Matrix::basis_aligning_transform`] so the equalities
//! land exactly on the leading structural coordinates, which can then be
//! eliminated as a contiguous block.

use crate::error::Result;
use crate::hull;
use crate::int;
use crate::matrix::Matrix;
use crate::polyhedron::Polyhedron;
use crate::seq::AffineForm;
use crate::uset::UnionSet;

/// `hull` is `uset.affine_hull()`, already known to carry at least one
/// equality (the caller, [`hull::convex_hull_uset`], makes that check so
/// this function only ever runs the reduction).
pub fn affine_reduce(uset: &UnionSet, hull: &Polyhedron) -> Result<Polyhedron> {
    let dim = uset.dim();
    let k = hull.equalities().len();

    let mut e0 = AffineForm::zeros(dim);
    e0.set_constant(int::one());
    let mut rows = vec![e0.as_slice().to_vec()];
    rows.extend(hull.equalities().iter().map(|f| f.as_slice().to_vec()));
    let t = Matrix::from_rows(rows);
    let w = t.basis_aligning_transform();

    let reduced_members: Vec<Polyhedron> = uset
        .live_members()
        .map(|p| {
            let mut q = p.preimage_homogeneous(&w);
            for i in 0..k {
                let mut pinned = AffineForm::zeros(q.dim());
                pinned[1 + i] = int::one();
                q.alloc_equality(pinned);
            }
            q.gauss();
            q.eliminate_dims(0, k)
        })
        .collect();
    let reduced_uset = UnionSet::from_members(dim - k, uset.n_div().saturating_sub(k), reduced_members);

    let inner = hull::convex_hull_uset(&reduced_uset)?;
    let lifted = inner.insert_zero_columns(&(0..k).collect::<Vec<_>>(), dim);
    let w_inv = w.right_inverse_square();
    let restored = lifted.preimage_homogeneous(&w_inv);

    let mut result = restored.intersect(hull);
    result.finalize();
    Ok(result)
}
