//! Top-level dispatcher: routes a union to the correct subsystem based on
//! its affine hull, dimension and boundedness.

use crate::affine_reduce;
use crate::elim_hull;
use crate::error::Result;
use crate::extend;
use crate::hull_1d;
use crate::indep_bounds;
use crate::initial_facet;
use crate::polyhedron::Polyhedron;
use crate::proto_hull;
use crate::single_hull;
use crate::uset::UnionSet;

/// Removes redundant inequalities from a single polyhedron.
pub fn convex_hull_polyhedron(p: &Polyhedron) -> Polyhedron {
    single_hull::single_hull(p)
}

/// Normalises, handles the 0/1-member short-cuts, then folds out any
/// shared equalities before dispatching on dimension and boundedness.
pub fn convex_hull_uset(uset: &UnionSet) -> Result<Polyhedron> {
    let s = uset.normalize();
    if s.live_count() == 0 {
        return Ok(Polyhedron::empty(s.dim(), s.n_div()));
    }
    if s.live_count() == 1 {
        return Ok(single_hull::single_hull(&s.members()[0]));
    }
    let hull = s.affine_hull();
    if hull.is_empty() {
        return Ok(Polyhedron::empty(s.dim(), s.n_div()));
    }
    if hull.equalities().is_empty() {
        dispatch_full_dim(&s)
    } else {
        affine_reduce::affine_reduce(&s, &hull)
    }
}

/// Dimension/boundedness switch, entered only once `S` is known
/// full-dimensional (no shared equalities left to fold out).
pub(crate) fn dispatch_full_dim(uset: &UnionSet) -> Result<Polyhedron> {
    match uset.dim() {
        0 => Ok(hull_1d::hull_0d(uset)),
        1 => Ok(hull_1d::hull_1d(uset)),
        _ => {
            if uset.is_bounded() {
                bounded_wrap_hull(uset)
            } else {
                Ok(elim_hull::elim_hull(uset))
            }
        }
    }
}

/// Full-dimensional, bounded case: seed `Extend`'s BFS with
/// `ProtoHull`'s cheap facets when available, falling back to
/// `IndepBounds` + `InitialFacet` for a single seed facet otherwise.
fn bounded_wrap_hull(uset: &UnionSet) -> Result<Polyhedron> {
    if let Some(proto) = proto_hull::proto_hull(uset) {
        if proto.is_hull {
            let mut result = Polyhedron::from_parts(uset.dim(), uset.n_div(), false, Vec::new(), proto.facets);
            result.finalize();
            result.set_no_redundant(true);
            result.set_no_implicit(true);
            return Ok(result);
        }
        if !proto.facets.is_empty() {
            return extend::extend(uset, proto.facets);
        }
    }
    let mut seeded = uset.clone();
    let bounds = indep_bounds::indep_bounds(&mut seeded);
    let facet = initial_facet::initial_facet(&seeded, bounds)?;
    extend::extend(&seeded, vec![facet])
}
