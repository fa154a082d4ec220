/// Particle advection kernels.
///
/// Pure functions advancing one particle by one forward-Euler step given the
/// host fields sampled at its position. No particle depends on another, so
/// callers are free to map these over the store in parallel.
use super::constants::{MIN_COLUMN_THICKNESS, SHAPE_EXPONENT};
use super::params::TrackingMethod;
use super::state::{ColumnSample, Particle};

/// Horizontal domain the 3-D step keeps particles in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl DomainBounds {
    /// Clamp a horizontal position into the domain.
    #[inline]
    pub fn clamp(&self, x: f64, y: f64) -> (f64, f64) {
        (
            x.max(self.x_min).min(self.x_max),
            y.max(self.y_min).min(self.y_max),
        )
    }
}

/// Vertical profile weight `1 - (1 - rhpos)^4`: 0 at the bed, 1 at the surface.
#[inline]
pub fn shape_factor(rhpos: f64) -> f64 {
    1.0 - (1.0 - rhpos).powi(SHAPE_EXPONENT)
}

/// Velocity at relative height `rhpos` between basal and surface values.
#[inline]
pub fn blend(base: f64, surf: f64, rhpos: f64) -> f64 {
    base + (surf - base) * shape_factor(rhpos)
}

/// Rescale relative height after the column thickness changes by `smb * dt`.
///
/// Returns `(rhpos, new_thickness)`. Thin columns put the particle at the
/// surface.
#[inline]
pub fn rescale_relative_height(rhpos: f64, thk: f64, smb: f64, dt: f64) -> (f64, f64) {
    let new_thk = thk + smb * dt;
    let rh = if new_thk > MIN_COLUMN_THICKNESS {
        (rhpos * thk / new_thk).clamp(0.0, 1.0)
    } else {
        1.0
    };
    (rh, new_thk)
}

/// Clamp elevation to `[topg, topg + thk]` and derive relative height.
///
/// Returns `(zpos, rhpos)`.
#[inline]
pub fn relative_height_from_elevation(zpos: f64, topg: f64, thk: f64) -> (f64, f64) {
    // max/min rather than clamp: bounds may cross for negative thickness
    let z = zpos.max(topg).min(topg + thk);
    let rh = if thk > MIN_COLUMN_THICKNESS {
        ((z - topg) / thk).clamp(0.0, 1.0)
    } else {
        1.0
    };
    (z, rh)
}

/// Depth-reduced step: relative height follows the mass balance and
/// elevation is derived from it.
pub fn simple_step(p: &Particle, s: &ColumnSample, dt: f64) -> Particle {
    // 1. Relative height after the surface mass balance update
    let (rhpos, new_thk) = rescale_relative_height(p.rhpos, s.thk, s.smb, dt);

    // 2. Shallow-ice velocity profile
    let uvel = blend(s.uvelbase, s.uvelsurf, rhpos);
    let vvel = blend(s.vvelbase, s.vvelsurf, rhpos);

    // 3. Forward Euler, elevation derived
    Particle {
        xpos: p.xpos + dt * uvel,
        ypos: p.ypos + dt * vvel,
        zpos: s.topg + new_thk * rhpos,
        rhpos,
        ..*p
    }
}

/// Full 3-D step: elevation is integrated with the vertical velocity.
///
/// Elevation is clamped into the ice column before the step only, so a
/// particle may end the step slightly outside the column; the next step
/// pulls it back.
pub fn three_d_step(p: &Particle, s: &ColumnSample, bounds: &DomainBounds, dt: f64) -> Particle {
    // 1. Keep the particle within the ice body, get its relative height
    let (zpos, rhpos) = relative_height_from_elevation(p.zpos, s.topg, s.thk);

    // 2. Shallow-ice velocity profile on all three components
    let uvel = blend(s.uvelbase, s.uvelsurf, rhpos);
    let vvel = blend(s.vvelbase, s.vvelsurf, rhpos);
    let wvel = blend(s.wvelbase, s.wvelsurf, rhpos);

    // 3. Forward Euler, then back into the horizontal domain
    let (xpos, ypos) = bounds.clamp(p.xpos + dt * uvel, p.ypos + dt * vvel);

    Particle {
        xpos,
        ypos,
        zpos: zpos + dt * wvel,
        rhpos,
        ..*p
    }
}

impl TrackingMethod {
    /// Advance one particle with this method.
    #[inline]
    pub fn advect(self, p: &Particle, s: &ColumnSample, bounds: &DomainBounds, dt: f64) -> Particle {
        match self {
            TrackingMethod::Simple => simple_step(p, s, dt),
            TrackingMethod::ThreeD => three_d_step(p, s, bounds, dt),
        }
    }
}
