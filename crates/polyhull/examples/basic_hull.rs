//! Computes the convex hull of a union of intervals, then of two squares,
//! printed as a constraint list.
//!
//! Run with `cargo run -p polyhull --example basic_hull`.

use polyhull::prelude::*;
use polyhull::seq::AffineForm;

fn ineq(cs: &[i64]) -> AffineForm {
    AffineForm::from_vec(cs.iter().map(|&c| Int::from(c)).collect())
}

fn print_hull(label: &str, h: &Polyhedron) {
    println!("{label}:");
    for e in h.equalities() {
        println!("  {:?} = 0", e.as_slice());
    }
    for f in h.inequalities() {
        println!("  {:?} >= 0", f.as_slice());
    }
}

fn main() {
    // {0 <= x <= 2} u {3 <= x <= 5}  =>  hull = {0 <= x <= 5}.
    let mut a = Polyhedron::universe(1, 0);
    a.alloc_inequality(ineq(&[0, 1]));
    a.alloc_inequality(ineq(&[2, -1]));
    let mut b = Polyhedron::universe(1, 0);
    b.alloc_inequality(ineq(&[-3, 1]));
    b.alloc_inequality(ineq(&[5, -1]));
    let mut intervals = UnionSet::new(1, 0);
    intervals.push(a);
    intervals.push(b);
    let hull = convex_hull_uset(&intervals).expect("bounded union has a hull");
    print_hull("hull of two intervals", &hull);

    // Two unit squares at (0,0) and (2,2): hull is a hexagon.
    let mut sq1 = Polyhedron::universe(2, 0);
    sq1.alloc_inequality(ineq(&[0, 1, 0]));
    sq1.alloc_inequality(ineq(&[1, -1, 0]));
    sq1.alloc_inequality(ineq(&[0, 0, 1]));
    sq1.alloc_inequality(ineq(&[1, 0, -1]));
    let mut sq2 = Polyhedron::universe(2, 0);
    sq2.alloc_inequality(ineq(&[-2, 1, 0]));
    sq2.alloc_inequality(ineq(&[3, -1, 0]));
    sq2.alloc_inequality(ineq(&[-2, 0, 1]));
    sq2.alloc_inequality(ineq(&[3, 0, -1]));
    let mut squares = UnionSet::new(2, 0);
    squares.push(sq1);
    squares.push(sq2);
    let hull = convex_hull_uset(&squares).expect("bounded union has a hull");
    print_hull("hull of two squares", &hull);

    let simple = simple_hull(&squares).expect("simple_hull is total on non-empty input");
    print_hull("simple_hull of two squares", &simple);
}
