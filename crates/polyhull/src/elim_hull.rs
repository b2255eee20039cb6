//! `ElimHull`: pairwise convex hull via Fourier-Motzkin projection, for
//! unions with an unbounded member (gift-wrapping has no finite facet
//! lattice to walk in that case).

use crate::int;
use crate::polyhedron::Polyhedron;
use crate::seq::AffineForm;
use crate::single_hull::single_hull;
use crate::uset::UnionSet;

/// `conv(B1 u B2)` via projecting out `(lambda, mu, y, z)` from the
/// `2 + 3*d`-dimensional space `(x, lambda, mu, y, z)` with `x = y + z`,
/// `y in lambda*B1`, `z in mu*B2`, `lambda + mu = 1`, `lambda, mu >= 0`.
fn pairwise(b1: &Polyhedron, b2: &Polyhedron) -> Polyhedron {
    let d = b1.dim();
    debug_assert_eq!(d, b2.dim());
    // Layout: [x(0..d), lambda(d), mu(d+1), y(d+2..2d+2), z(2d+2..3d+2)].
    let combined_dim = 2 + 3 * d;
    let lambda = d;
    let mu = d + 1;
    let y0 = d + 2;
    let z0 = 2 * d + 2;

    let homogenize = |row: &AffineForm, scale_col: usize, var0: usize| {
        let mut out = AffineForm::zeros(combined_dim);
        out[1 + scale_col] = row.constant().clone();
        for k in 0..d {
            out[1 + var0 + k] = row.linear()[k].clone();
        }
        out
    };

    let mut equalities = Vec::new();
    let mut inequalities = Vec::new();

    for e in b1.equalities() {
        equalities.push(homogenize(e, lambda, y0));
    }
    for h in b1.inequalities() {
        inequalities.push(homogenize(h, lambda, y0));
    }
    for e in b2.equalities() {
        equalities.push(homogenize(e, mu, z0));
    }
    for h in b2.inequalities() {
        inequalities.push(homogenize(h, mu, z0));
    }

    // x_k - y_k - z_k = 0.
    for k in 0..d {
        let mut row = AffineForm::zeros(combined_dim);
        row[1 + k] = int::one();
        row[1 + y0 + k] = -int::one();
        row[1 + z0 + k] = -int::one();
        equalities.push(row);
    }
    // lambda, mu >= 0; lambda + mu = 1.
    let mut lambda_nonneg = AffineForm::zeros(combined_dim);
    lambda_nonneg[1 + lambda] = int::one();
    inequalities.push(lambda_nonneg);
    let mut mu_nonneg = AffineForm::zeros(combined_dim);
    mu_nonneg[1 + mu] = int::one();
    inequalities.push(mu_nonneg);
    let mut tie = AffineForm::zeros(combined_dim);
    tie.set_constant(-int::one());
    tie[1 + lambda] = int::one();
    tie[1 + mu] = int::one();
    equalities.push(tie);

    let expanded = Polyhedron::from_parts(combined_dim, 0, true, equalities, inequalities);
    let projected = expanded.eliminate_dims(d, 2 + 2 * d);
    single_hull(&projected)
}

/// Left-associative scan over the live members of `uset`:
/// `H <- B0; for each remaining B: H <- pairwise(H, B)`.
pub fn elim_hull(uset: &UnionSet) -> Polyhedron {
    let mut live = uset.live_members();
    let Some(first) = live.next() else {
        return Polyhedron::empty(uset.dim(), uset.n_div());
    };
    let mut h = first.clone();
    for b in live {
        h = pairwise(&h, b);
    }
    h
}
