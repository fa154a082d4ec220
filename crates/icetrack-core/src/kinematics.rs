//! Vertical ice velocity at the bed and at the surface.
//!
//! Basal ice is assumed to flow parallel to the bed. At the surface, the
//! vertical velocity follows from the kinematic condition once the 3-D
//! velocity field is taken as divergence-free:
//!
//! ```text
//! w_base = u_base ∂b/∂x + v_base ∂b/∂y
//! w_surf = u_surf ∂s/∂x + v_surf ∂s/∂y − ∇·(ū H)
//! ```
use ndarray::{Array2, Zip};

use crate::fields::HostFields;
use crate::grid::GridGeometry;
use crate::operators::DifferenceOperators;

/// Grids produced by one reconstruction.
#[derive(Debug, Clone, PartialEq)]
pub struct VerticalVelocity {
    pub wvelbase: Array2<f64>,
    pub wvelsurf: Array2<f64>,
    /// Depth-integrated flux divergence used for `wvelsurf`
    pub divflux: Array2<f64>,
}

/// Reconstruct base and surface vertical velocity for the current step.
pub fn vertical_velocity<O: DifferenceOperators + ?Sized>(
    fields: &HostFields<'_>,
    geometry: &GridGeometry,
    operators: &O,
) -> VerticalVelocity {
    let dx = geometry.dx();

    let (slopsurfx, slopsurfy) = operators.gradient(&fields.usurf, dx, dx);
    let (sloptopgx, sloptopgy) = operators.gradient(&fields.topg, dx, dx);
    let divflux = operators.flux_divergence(&fields.ubar, &fields.vbar, &fields.thk, dx, dx);

    let mut wvelbase = Array2::zeros(geometry.shape());
    Zip::from(&mut wvelbase)
        .and(&fields.uvelbase)
        .and(&fields.vvelbase)
        .and(&sloptopgx)
        .and(&sloptopgy)
        .for_each(|w, &u, &v, &sx, &sy| *w = u * sx + v * sy);

    let mut wvelsurf = Array2::zeros(geometry.shape());
    Zip::from(&mut wvelsurf)
        .and(&fields.uvelsurf)
        .and(&fields.vvelsurf)
        .and(&slopsurfx)
        .and(&slopsurfy)
        .and(&divflux)
        .for_each(|w, &u, &v, &sx, &sy, &div| *w = u * sx + v * sy - div);

    VerticalVelocity {
        wvelbase,
        wvelsurf,
        divflux,
    }
}
