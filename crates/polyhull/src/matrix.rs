//! Exact integer matrices and the unimodular right-inverse.
//!
//! There is no crate in the ecosystem for exact integer coordinate changes
//! over arbitrary-precision entries, so this module implements the
//! primitives directly: allocation, right-inverse, product, row/column drop,
//! copy, sub-matrix extraction.
//!
//! `right_inverse` computes, for an `m x n` matrix `M` (`m <= n`) whose rows
//! are linearly independent and each have content 1, an `n x m` integer
//! matrix `R` with `M * R = I_m`. The algorithm:
//!
//! 1. Reduce each row of `M`, restricted to its "active" column range, to a
//!    single `+-1` entry via repeated pairwise extended-Euclid column
//!    combinations (an elementary unimodular column operation each time),
//!    accumulating the combined operations into an `n x n` matrix `U`. This
//!    leaves `A = M * U` in lower-triangular column-echelon form with a
//!    unit diagonal on its first `m` columns.
//! 2. The leading `m x m` block `L` of `A` is unit lower triangular, hence
//!    invertible over the integers by straightforward back-substitution
//!    (no division is ever required because the diagonal is exactly 1).
//! 3. `R = U[:, ..m] * L^{-1}` satisfies `M * R = L * L^{-1} = I_m`.

use crate::int::{self, Int};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Vec<Int>>,
}

impl Matrix {
    pub fn alloc(rows: usize, cols: usize) -> Self {
        Matrix {
            rows,
            cols,
            data: vec![vec![int::zero(); cols]; rows],
        }
    }

    pub fn from_rows(rows: Vec<Vec<Int>>) -> Self {
        let r = rows.len();
        let c = if r == 0 { 0 } else { rows[0].len() };
        debug_assert!(rows.iter().all(|row| row.len() == c));
        Matrix { rows: r, cols: c, data: rows }
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Matrix::alloc(n, n);
        for i in 0..n {
            m.data[i][i] = int::one();
        }
        m
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, r: usize, c: usize) -> &Int {
        &self.data[r][c]
    }

    #[inline]
    pub fn set(&mut self, r: usize, c: usize, v: Int) {
        self.data[r][c] = v;
    }

    pub fn row(&self, r: usize) -> &[Int] {
        &self.data[r]
    }

    pub fn copy(&self) -> Matrix {
        self.clone()
    }

    /// Drop `count` rows starting at `first`.
    pub fn drop_rows(&self, first: usize, count: usize) -> Matrix {
        let mut data = self.data.clone();
        data.drain(first..first + count);
        Matrix { rows: self.rows - count, cols: self.cols, data }
    }

    /// Drop `count` columns starting at `first`.
    pub fn drop_cols(&self, first: usize, count: usize) -> Matrix {
        let data = self
            .data
            .iter()
            .map(|row| {
                let mut row = row.clone();
                row.drain(first..first + count);
                row
            })
            .collect();
        Matrix { rows: self.rows, cols: self.cols - count, data }
    }

    /// Sub-matrix of `nrows` rows from `row0` and `ncols` columns from `col0`.
    pub fn sub_alloc(&self, row0: usize, nrows: usize, col0: usize, ncols: usize) -> Matrix {
        let data = (row0..row0 + nrows)
            .map(|r| self.data[r][col0..col0 + ncols].to_vec())
            .collect();
        Matrix { rows: nrows, cols: ncols, data }
    }

    /// Matrix product `self * other`.
    pub fn product(&self, other: &Matrix) -> Matrix {
        debug_assert_eq!(self.cols, other.rows);
        let mut out = Matrix::alloc(self.rows, other.cols);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a = &self.data[i][k];
                if a.sign() == num_bigint::Sign::NoSign {
                    continue;
                }
                for j in 0..other.cols {
                    out.data[i][j] += a * &other.data[k][j];
                }
            }
        }
        out
    }

    /// Apply this matrix (as a linear coordinate change `x = M z`) to an
    /// affine row `[c0, c1, .., cn]` representing `c0 + c . x`, producing
    /// the same functional in `z`-coordinates: `c0 + c . (M z)`.
    /// `self` must be `n x m` (maps `m`-dim `z` to `n`-dim `x`); `row` has
    /// length `1 + n`; the result has length `1 + m`.
    pub fn pushforward_row(&self, row: &[Int]) -> Vec<Int> {
        debug_assert_eq!(row.len(), 1 + self.rows);
        let mut out = vec![int::zero(); 1 + self.cols];
        out[0] = row[0].clone();
        for i in 0..self.rows {
            let c = &row[1 + i];
            if c.sign() == num_bigint::Sign::NoSign {
                continue;
            }
            for j in 0..self.cols {
                out[1 + j] += c * &self.data[i][j];
            }
        }
        out
    }

    /// Unimodular integer right-inverse: an `n x m` matrix `R` with
    /// `self * R = I_m`. Precondition: `self` is `m x n`, `m <= n`, rows are
    /// linearly independent, and (critically) each row has content 1 once
    /// reduced against the earlier rows' active column ranges; true for
    /// every caller in this crate, since rows are always bounding
    /// hyperplanes of a lattice polyhedron or the homogenizing `e0` row,
    /// both primitive by construction.
    pub fn right_inverse(&self) -> Matrix {
        self.right_inverse_with_complement().0
    }

    /// Like [`Matrix::right_inverse`], but also returns the full `n x n`
    /// unimodular column-transform `U` built along the way: `self`'s rows,
    /// expressed in the coordinates `U` introduces, become the leading `m`
    /// standard basis vectors. `U`'s columns past the first `m` are
    /// therefore a ready-made unimodular *completion* of `self`'s rows to a
    /// full basis of `Z^n`; exactly what `polyhedron.rs`'s
    /// `remove_equalities` needs to turn "`m` independent equalities" into
    /// "a full coordinate change that isolates them", without a separate
    /// basis-completion algorithm.
    pub fn right_inverse_with_complement(&self) -> (Matrix, Matrix) {
        let nr = self.rows;
        let nc = self.cols;
        debug_assert!(nr <= nc);
        let mut a = self.data.clone();
        let mut u = Matrix::identity(nc);

        let swap_cols = |a: &mut Vec<Vec<Int>>, u: &mut Matrix, j: usize, k: usize| {
            for r in 0..a.len() {
                a[r].swap(j, k);
            }
            for r in 0..u.rows {
                u.data[r].swap(j, k);
            }
        };

        for i in 0..nr {
            // Column i itself must end up holding the surviving nonzero entry
            // (not merely *some* column >= i), so every later row's reduction
            // range i+1..nc stays clear of row i's pivot. If column i starts
            // zero in row i, swap in any nonzero column from the remaining
            // range first.
            if a[i][i].sign() == num_bigint::Sign::NoSign {
                if let Some(c) = (i + 1..nc).find(|&c| a[i][c].sign() != num_bigint::Sign::NoSign) {
                    swap_cols(&mut a, &mut u, i, c);
                }
            }
            loop {
                let nz: Vec<usize> = (i + 1..nc).filter(|&c| a[i][c].sign() != num_bigint::Sign::NoSign).collect();
                if nz.is_empty() {
                    break;
                }
                let j = i;
                let k = nz[0];
                let (g, p, q) = int::extended_gcd(&a[i][j], &a[i][k]);
                let aj = int::exact_div(&a[i][j], &g);
                let ak = int::exact_div(&a[i][k], &g);
                for r in 0..nr {
                    let old_j = a[r][j].clone();
                    let old_k = a[r][k].clone();
                    a[r][j] = &p * &old_j + &q * &old_k;
                    a[r][k] = (-&ak) * &old_j + &aj * &old_k;
                }
                for r in 0..nc {
                    let old_j = u.data[r][j].clone();
                    let old_k = u.data[r][k].clone();
                    u.data[r][j] = &p * &old_j + &q * &old_k;
                    u.data[r][k] = (-&ak) * &old_j + &aj * &old_k;
                }
            }
            if a[i][i].sign() == num_bigint::Sign::Minus {
                for r in 0..nr {
                    a[r][i] = -a[r][i].clone();
                }
                for r in 0..nc {
                    u.data[r][i] = -u.data[r][i].clone();
                }
            }
            debug_assert_eq!(a[i][i], int::one(), "right_inverse precondition: row content must be 1");
        }

        // Leading m x m block of A = self*U is unit lower triangular.
        let mut linv = vec![vec![int::zero(); nr]; nr];
        for i in 0..nr {
            linv[i][i] = int::one();
            for j in (0..i).rev() {
                let mut acc = int::zero();
                for k in j + 1..=i {
                    acc += &a[i][k] * &linv[k][j];
                }
                linv[i][j] = -acc;
            }
        }

        let mut r = Matrix::alloc(nc, nr);
        for row in 0..nc {
            for col in 0..nr {
                let mut acc = int::zero();
                for k in 0..nr {
                    acc += &u.data[row][k] * &linv[k][col];
                }
                r.data[row][col] = acc;
            }
        }
        (r, u)
    }

    /// Full `n x n` unimodular coordinate-change matrix `W` with
    /// `self * W = [I_m | 0]` (`self` is `m x n`, `m <= n`); i.e. in the
    /// coordinates `z` defined by `x = W z`, each row of `self` evaluates
    /// to exactly the corresponding component of `z`, with no leftover
    /// dependence on the other `z` components. This is the transform
    /// `wrap.rs`'s ridge-rotation step needs (it puts the ridge and its
    /// facet onto two standard basis directions at once), stronger than
    /// [`Matrix::right_inverse`] alone (which only gives a one-sided
    /// section, not a full basis realignment).
    ///
    /// Built from the same column-reduction as [`Matrix::right_inverse_with_complement`]:
    /// that reduction finds a unimodular `U` with `self * U = [L | 0]`, `L`
    /// unit lower triangular; composing with `block_diag(L^{-1}, I)` turns
    /// `L` into the identity without disturbing the zero block.
    pub fn basis_aligning_transform(&self) -> Matrix {
        let (_, u) = self.right_inverse_with_complement();
        let nr = self.rows;
        let nc = self.cols;
        let a = self.product(&u);
        let mut linv = vec![vec![int::zero(); nr]; nr];
        for i in 0..nr {
            linv[i][i] = int::one();
            for j in (0..i).rev() {
                let mut acc = int::zero();
                for k in j + 1..=i {
                    acc += a.get(i, k) * &linv[k][j];
                }
                linv[i][j] = -acc;
            }
        }
        let mut w = Matrix::alloc(nc, nc);
        for row in 0..nc {
            for col in 0..nc {
                if col >= nr {
                    w.data[row][col] = u.data[row][col].clone();
                    continue;
                }
                let mut acc = int::zero();
                for k in 0..nr {
                    acc += &u.data[row][k] * &linv[k][col];
                }
                w.data[row][col] = acc;
            }
        }
        w
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cs: &[i64]) -> Vec<Int> {
        cs.iter().map(|&c| int::int(c)).collect()
    }

    #[test]
    fn right_inverse_of_identity_is_identity() {
        let m = Matrix::identity(3);
        let r = m.right_inverse();
        assert_eq!(r, Matrix::identity(3));
    }

    #[test]
    fn right_inverse_satisfies_product_identity() {
        // e0 row, plus two bounding hyperplanes in a 3-dim homogeneous space.
        let m = Matrix::from_rows(vec![row(&[1, 0, 0]), row(&[0, 1, 1])]);
        let r = m.right_inverse();
        let prod = m.product(&r);
        assert_eq!(prod, Matrix::identity(2));
    }

    #[test]
    fn basis_aligning_transform_realigns_rows_to_std_basis() {
        let m = Matrix::from_rows(vec![row(&[1, 0, 0]), row(&[0, 1, 1])]);
        let w = m.basis_aligning_transform();
        let prod = m.product(&w);
        let mut expected = Matrix::alloc(2, 3);
        expected.set(0, 0, int::one());
        expected.set(1, 1, int::one());
        assert_eq!(prod, expected);
    }

    #[test]
    fn drop_rows_and_cols() {
        let m = Matrix::from_rows(vec![row(&[1, 2, 3]), row(&[4, 5, 6]), row(&[7, 8, 9])]);
        let d = m.drop_rows(1, 1);
        assert_eq!(d.nrows(), 2);
        assert_eq!(d.row(0), row(&[1, 2, 3]).as_slice());
        assert_eq!(d.row(1), row(&[7, 8, 9]).as_slice());
        let d2 = m.drop_cols(0, 1);
        assert_eq!(d2.ncols(), 2);
        assert_eq!(d2.row(0), row(&[2, 3]).as_slice());
    }
}
