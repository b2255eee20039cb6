//! Exact rational linear programming: `solve_lp` and the `Tab` tableau.
//!
//! No crate in the Rust ecosystem offers an exact-rational LP solver with
//! equality/redundancy detection and recession-cone boundedness built in, so
//! this module implements a small two-phase simplex over `Rat` (exact,
//! never approximate; floating point is never used here).
//!
//! Free (unrestricted-sign) variables are split `x_k = u_k - v_k`,
//! `u_k, v_k >= 0`; each inequality gets a nonnegative slack; infeasibility
//! is resolved with one artificial variable per row (phase 1), followed by
//! phase 2 on the real objective. Bland's rule (smallest-index entering and
//! leaving variable) is used throughout so the exact arithmetic cannot mask
//! a cycling bug; with exact coefficients there is no rounding to break
//! ties, so anti-cycling must be structural.

use num_traits::{Signed, Zero};

use crate::int::{Int, Rat};
use crate::polyhedron::Polyhedron;
use crate::seq::AffineForm;

/// Outcome of minimizing a linear form over a polyhedron.
#[derive(Clone, Debug, PartialEq)]
pub enum LpResult {
    /// The minimum value (linear part only, no constant folded in).
    Ok(Rat),
    /// The polyhedron the LP was solved over has no feasible point.
    Empty,
    /// The objective is unbounded below on the feasible region.
    Unbounded,
    /// An invariant the solver relies on did not hold.
    Error(&'static str),
}

/// Outcome of one candidate's redundancy test (see [`Tab::detect_redundant`]).
enum Redundancy {
    Redundant,
    NotRedundant,
    /// The system minus the candidate is itself infeasible.
    Empty,
}

/// `solve_lp(P, objective) -> {ok(n/d) | empty | unbounded | error}`.
/// `objective`'s length must equal `P`'s dimension; it is the *linear* part
/// only (no constant term; a constraint's constant is ignored on entry).
pub fn solve_lp(poly: &Polyhedron, objective: &[Int]) -> LpResult {
    Tab::from_polyhedron(poly).min(objective)
}

/// Simplex tableau over a snapshot of a polyhedron's constraints.
///
/// References but does not alias the polyhedron: it clones the (small)
/// constraint lists it needs up front rather than borrowing them.
pub struct Tab {
    dim: usize,
    equalities: Vec<AffineForm>,
    inequalities: Vec<AffineForm>,
}

impl Tab {
    pub fn from_polyhedron(poly: &Polyhedron) -> Tab {
        Tab {
            dim: poly.dim(),
            equalities: poly.equalities().to_vec(),
            inequalities: poly.inequalities().to_vec(),
        }
    }

    /// The homogeneous recession cone: same constraints with every constant
    /// term zeroed.
    pub fn from_recession_cone(poly: &Polyhedron) -> Tab {
        let zero_const = |f: &AffineForm| {
            let mut g = f.clone();
            g.set_constant(crate::int::zero());
            g
        };
        Tab {
            dim: poly.dim(),
            equalities: poly.equalities().iter().map(zero_const).collect(),
            inequalities: poly.inequalities().iter().map(zero_const).collect(),
        }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Minimize `objective . x` over the full tableau.
    pub fn min(&self, objective: &[Int]) -> LpResult {
        self.min_excluding(None, objective)
    }

    /// Minimize `objective . x` over the tableau with inequality
    /// `exclude` (if any) dropped from the constraint set. Used by
    /// `single_hull.rs`'s redundancy/implicit-equality tests, which must
    /// not let the tested constraint trivially bound its own minimum.
    pub fn min_excluding(&self, exclude: Option<usize>, objective: &[Int]) -> LpResult {
        let ineqs: Vec<&AffineForm> = self
            .inequalities
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != exclude)
            .map(|(_, f)| f)
            .collect();
        solve_standard_form(self.dim, &self.equalities, &ineqs, objective)
    }

    /// `true` iff the recession cone this `Tab` was built from is `{0}`
    /// (build via [`Tab::from_recession_cone`]).
    pub fn cone_is_bounded(&self) -> bool {
        if self.dim == 0 {
            return true;
        }
        let n_struct = 2 * self.dim + self.inequalities.len();
        let mut norm_row = vec![Rat::zero(); n_struct];
        for k in 0..self.dim {
            norm_row[k] = Rat::from_integer(Int::from(1));
            norm_row[self.dim + k] = Rat::from_integer(Int::from(1));
        }
        let ineqs: Vec<&AffineForm> = self.inequalities.iter().collect();
        let (mut rows, mut rhs) = build_structural(self.dim, &self.equalities, &ineqs);
        rows.push(norm_row);
        rhs.push(Rat::from_integer(Int::from(1)));
        let n_ineq = self.inequalities.len();
        match run_phase1(rows, rhs, n_struct, n_ineq, self.dim) {
            Phase1Outcome::Infeasible => true,
            Phase1Outcome::Feasible { .. } => false,
        }
    }

    /// Promote implicit equalities among the current inequalities to
    /// equalities, in place. Returns the number promoted. Must run before
    /// [`Tab::detect_redundant`].
    pub fn detect_equalities(&mut self) -> usize {
        let mut promoted = Vec::new();
        for i in 0..self.inequalities.len() {
            let c = &self.inequalities[i];
            let c0 = c.constant().clone();
            let lower = self.min_excluding(Some(i), c.linear());
            let lower_ok = matches!(&lower, LpResult::Ok(v) if (v + Rat::from_integer(c0.clone())).is_negative() == false);
            if !lower_ok {
                continue;
            }
            let neg_linear: Vec<Int> = c.linear().iter().map(|x| -x.clone()).collect();
            let upper = self.min_excluding(Some(i), &neg_linear);
            let upper_ok = matches!(&upper, LpResult::Ok(v) if (v - Rat::from_integer(c0.clone())).is_positive() == false);
            if upper_ok {
                promoted.push(i);
            }
        }
        // Remove in descending order so earlier indices stay valid.
        for &i in promoted.iter().rev() {
            let mut eq = self.inequalities.remove(i);
            eq.normalize();
            self.equalities.push(eq);
        }
        promoted.len()
    }

    /// Drop redundant inequalities in place. Call after
    /// [`Tab::detect_equalities`]. Returns `true` if testing a candidate's
    /// redundancy discovered the rest of the system to be infeasible; the
    /// caller must then flag the whole polyhedron empty rather than trust
    /// the returned inequality list.
    pub fn detect_redundant(&mut self) -> bool {
        let mut keep = Vec::with_capacity(self.inequalities.len());
        let mut found_empty = false;
        for i in 0..self.inequalities.len() {
            match self.redundancy_at(i) {
                Redundancy::Redundant => {}
                Redundancy::NotRedundant => keep.push(self.inequalities[i].clone()),
                Redundancy::Empty => {
                    found_empty = true;
                    keep.push(self.inequalities[i].clone());
                }
            }
        }
        self.inequalities = keep;
        found_empty
    }

    fn redundancy_at(&self, i: usize) -> Redundancy {
        if !short_circuit_maybe_redundant(&self.inequalities, i) {
            return Redundancy::NotRedundant;
        }
        let c = &self.inequalities[i];
        match self.min_excluding(Some(i), c.linear()) {
            LpResult::Ok(v) => {
                if !(v + Rat::from_integer(c.constant().clone())).is_negative() {
                    Redundancy::Redundant
                } else {
                    Redundancy::NotRedundant
                }
            }
            LpResult::Unbounded => Redundancy::NotRedundant,
            LpResult::Empty => Redundancy::Empty,
            LpResult::Error(_) => Redundancy::NotRedundant,
        }
    }

    pub fn into_parts(self) -> (Vec<AffineForm>, Vec<AffineForm>) {
        (self.equalities, self.inequalities)
    }
}

/// Cheap short-circuit: if inequality `i`'s linear part has a nonzero
/// coefficient on some variable where no *other* inequality shares its
/// sign, `i` cannot be redundant and the LP can be skipped.
fn short_circuit_maybe_redundant(ineqs: &[AffineForm], i: usize) -> bool {
    let c = &ineqs[i];
    for (var, coeff) in c.linear().iter().enumerate() {
        if coeff.is_zero() {
            continue;
        }
        let sign = coeff.is_positive();
        let shared = ineqs.iter().enumerate().any(|(j, other)| {
            j != i && other.linear().get(var).map(|v| !v.is_zero() && v.is_positive() == sign).unwrap_or(false)
        });
        if !shared {
            return false;
        }
    }
    true
}

fn solve_standard_form(
    dim: usize,
    equalities: &[AffineForm],
    inequalities: &[&AffineForm],
    objective: &[Int],
) -> LpResult {
    if objective.len() != dim {
        return LpResult::Error("objective dimension mismatch");
    }
    let n_struct = 2 * dim + inequalities.len();
    let (rows, rhs) = build_structural(dim, equalities, inequalities);
    match run_phase1(rows, rhs, n_struct, inequalities.len(), dim) {
        Phase1Outcome::Infeasible => LpResult::Empty,
        Phase1Outcome::Feasible { mut tab, basis } => {
            match run_phase2(&mut tab, basis, n_struct, dim, objective) {
                Some(value) => LpResult::Ok(value),
                None => LpResult::Unbounded,
            }
        }
    }
}

/// Build the `[u | v | s]` structural coefficient rows and right-hand sides
/// for `equalities`/`inequalities` over `dim` free variables.
fn build_structural(dim: usize, equalities: &[AffineForm], inequalities: &[&AffineForm]) -> (Vec<Vec<Rat>>, Vec<Rat>) {
    let n_struct = 2 * dim + inequalities.len();
    let mut rows = Vec::with_capacity(equalities.len() + inequalities.len());
    let mut rhs = Vec::with_capacity(equalities.len() + inequalities.len());
    for e in equalities {
        let mut row = vec![Rat::zero(); n_struct];
        for k in 0..dim {
            let c = Rat::from_integer(e.linear()[k].clone());
            row[k] = c.clone();
            row[dim + k] = -c;
        }
        rows.push(row);
        rhs.push(Rat::from_integer(-e.constant().clone()));
    }
    for (ri, c) in inequalities.iter().enumerate() {
        let mut row = vec![Rat::zero(); n_struct];
        for k in 0..dim {
            let v = Rat::from_integer(c.linear()[k].clone());
            row[k] = v.clone();
            row[dim + k] = -v;
        }
        row[2 * dim + ri] = -Rat::from_integer(Int::from(1));
        rows.push(row);
        rhs.push(Rat::from_integer(-c.constant().clone()));
    }
    (rows, rhs)
}

enum Phase1Outcome {
    Infeasible,
    Feasible { tab: Tableau, basis: Vec<usize> },
}

fn run_phase1(mut rows: Vec<Vec<Rat>>, mut rhs: Vec<Rat>, n_struct: usize, _n_ineq: usize, _dim: usize) -> Phase1Outcome {
    let m = rows.len();
    if m == 0 {
        let tab = Tableau::new(0, n_struct);
        return Phase1Outcome::Feasible { tab, basis: Vec::new() };
    }
    for i in 0..m {
        if rhs[i].is_negative() {
            for v in rows[i].iter_mut() {
                *v = -v.clone();
            }
            rhs[i] = -rhs[i].clone();
        }
    }
    let n_art = m;
    let ncols = n_struct + n_art;
    let mut tab = Tableau::new(m, ncols);
    for i in 0..m {
        for j in 0..n_struct {
            tab.set(i, j, rows[i][j].clone());
        }
        tab.set(i, n_struct + i, Rat::from_integer(Int::from(1)));
        tab.set_rhs(i, rhs[i].clone());
    }
    let mut basis: Vec<usize> = (0..m).map(|i| n_struct + i).collect();

    // Phase-1 objective row: minimize sum of artificials.
    for j in 0..ncols {
        if j >= n_struct {
            tab.set_obj(j, Rat::zero());
            continue;
        }
        let mut s = Rat::zero();
        for i in 0..m {
            s += tab.get(i, j);
        }
        tab.set_obj(j, -s);
    }

    run_simplex(&mut tab, &mut basis, |j| true, ncols);

    let phase1_value: Rat = (0..m)
        .filter(|&i| basis[i] >= n_struct)
        .map(|i| tab.rhs(i))
        .fold(Rat::zero(), |a, b| a + b);
    if !phase1_value.is_zero() {
        return Phase1Outcome::Infeasible;
    }
    Phase1Outcome::Feasible { tab, basis }
}

fn run_phase2(tab: &mut Tableau, mut basis: Vec<usize>, n_struct: usize, dim: usize, objective: &[Int]) -> Option<Rat> {
    let m = basis.len();
    let mut cost = vec![Rat::zero(); tab.ncols()];
    for k in 0..dim {
        let c = Rat::from_integer(objective[k].clone());
        cost[k] = c.clone();
        cost[dim + k] = -c;
    }
    for j in 0..tab.ncols() {
        let cb: Rat = (0..m)
            .map(|i| {
                let b = basis[i];
                if b < cost.len() {
                    cost[b].clone() * tab.get(i, j)
                } else {
                    Rat::zero()
                }
            })
            .fold(Rat::zero(), |a, b| a + b);
        let cj = if j < cost.len() { cost[j].clone() } else { Rat::zero() };
        tab.set_obj(j, cj - cb);
    }

    let outcome = run_simplex(tab, &mut basis, |j| j < n_struct, tab.ncols());
    if !outcome {
        return None;
    }

    let mut value = Rat::zero();
    for k in 0..dim {
        let u = basis.iter().position(|&b| b == k).map(|row| tab.rhs(row)).unwrap_or_else(Rat::zero);
        let v = basis.iter().position(|&b| b == dim + k).map(|row| tab.rhs(row)).unwrap_or_else(Rat::zero);
        value += Rat::from_integer(objective[k].clone()) * (u - v);
    }
    Some(value)
}

/// Runs Bland's-rule simplex on `tab` with basis `basis`, only allowing
/// columns passing `allowed` to enter. Returns `false` if unbounded.
fn run_simplex(tab: &mut Tableau, basis: &mut Vec<usize>, allowed: impl Fn(usize) -> bool, ncols: usize) -> bool {
    loop {
        let mut enter = None;
        for j in 0..ncols {
            if allowed(j) && tab.obj(j).is_negative() {
                enter = Some(j);
                break;
            }
        }
        let Some(j) = enter else { return true };

        let mut leave: Option<usize> = None;
        let mut best_ratio: Option<Rat> = None;
        for i in 0..basis.len() {
            let a = tab.get(i, j);
            if a.is_positive() {
                let ratio = tab.rhs(i) / a;
                let better = match &best_ratio {
                    None => true,
                    Some(b) => ratio < *b || (ratio == *b && leave.map(|l| basis[l] > basis[i]).unwrap_or(false)),
                };
                if better {
                    best_ratio = Some(ratio);
                    leave = Some(i);
                }
            }
        }
        let Some(row) = leave else { return false };
        tab.pivot(row, j);
        basis[row] = j;
    }
}

/// `m x (n+1)` constraint rows plus one objective row, stored densely.
struct Tableau {
    m: usize,
    n: usize,
    data: Vec<Vec<Rat>>, // m+1 rows, n+1 cols (last col is RHS)
}

impl Tableau {
    fn new(m: usize, n: usize) -> Tableau {
        Tableau { m, n, data: vec![vec![Rat::zero(); n + 1]; m + 1] }
    }

    #[inline]
    fn ncols(&self) -> usize {
        self.n
    }

    #[inline]
    fn get(&self, r: usize, c: usize) -> Rat {
        self.data[r][c].clone()
    }

    #[inline]
    fn set(&mut self, r: usize, c: usize, v: Rat) {
        self.data[r][c] = v;
    }

    #[inline]
    fn rhs(&self, r: usize) -> Rat {
        self.data[r][self.n].clone()
    }

    #[inline]
    fn set_rhs(&mut self, r: usize, v: Rat) {
        self.data[r][self.n] = v;
    }

    #[inline]
    fn obj(&self, c: usize) -> Rat {
        self.data[self.m][c].clone()
    }

    #[inline]
    fn set_obj(&mut self, c: usize, v: Rat) {
        self.data[self.m][c] = v;
    }

    fn pivot(&mut self, row: usize, col: usize) {
        let piv = self.data[row][col].clone();
        for v in self.data[row].iter_mut() {
            *v = v.clone() / piv.clone();
        }
        for r in 0..=self.m {
            if r == row {
                continue;
            }
            let factor = self.data[r][col].clone();
            if factor.is_zero() {
                continue;
            }
            for c in 0..=self.n {
                let sub = factor.clone() * self.data[row][c].clone();
                self.data[r][c] -= sub;
            }
        }
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
    fn min_of_box_is_lower_bound() {
        // 0 <= x <= 2, 0 <= y <= 2; minimize x + y -> 0.
        let ineqs = vec![form(&[0, 1, 0]), form(&[2, -1, 0]), form(&[0, 0, 1]), form(&[2, 0, -1])];
        let refs: Vec<&AffineForm> = ineqs.iter().collect();
        let r = solve_standard_form(2, &[], &refs, &[int::int(1), int::int(1)]);
        assert_eq!(r, LpResult::Ok(Rat::from_integer(Int::from(0))));
    }

    #[test]
    fn unbounded_half_line() {
        // x >= 0, minimize -x -> unbounded.
        let ineqs = vec![form(&[0, 1])];
        let refs: Vec<&AffineForm> = ineqs.iter().collect();
        let r = solve_standard_form(1, &[], &refs, &[int::int(-1)]);
        assert_eq!(r, LpResult::Unbounded);
    }

    #[test]
    fn infeasible_is_empty() {
        // x <= 0 and x >= 1.
        let ineqs = vec![form(&[0, -1]), form(&[-1, 1])];
        let refs: Vec<&AffineForm> = ineqs.iter().collect();
        let r = solve_standard_form(1, &[], &refs, &[int::int(1)]);
        assert_eq!(r, LpResult::Empty);
    }

    #[test]
    fn equality_pins_minimum() {
        // x = 2, minimize x -> 2.
        let eqs = vec![form(&[-2, 1])];
        let r = solve_standard_form(1, &eqs, &[], &[int::int(1)]);
        assert_eq!(r, LpResult::Ok(Rat::from_integer(Int::from(2))));
    }
}
