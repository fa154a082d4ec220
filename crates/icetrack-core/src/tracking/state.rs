/// Particle tracking state variables.
///
/// Particles are identified by their index in a [`ParticleStore`], a
/// structure of arrays with one column per attribute:
/// - `xpos`, `ypos`: horizontal position [m]
/// - `zpos`: elevation [m]
/// - `rhpos`: relative height in the ice column, 0 = bed, 1 = surface
/// - `wpos`: deposition weight
/// - `tpos`: seeding time [yr]
/// - `englt`: accumulated time spent below the surface [yr]
use icetrack_macros::Columns;

/// Whether a relative height is exactly on the ice surface.
#[inline]
pub fn is_surface(rhpos: f64) -> bool {
    rhpos == 1.0
}

#[derive(Debug, Clone, Copy, PartialEq, Columns)]
#[columns(store_name = "ParticleStore")]
pub struct Particle {
    pub xpos: f64,
    pub ypos: f64,
    pub zpos: f64,
    pub rhpos: f64,
    pub wpos: f64,
    pub tpos: f64,
    pub englt: f64,
}

impl Particle {
    /// A freshly seeded particle sitting on the ice surface.
    pub fn seeded(x: f64, y: f64, z: f64, t: f64) -> Self {
        Self {
            xpos: x,
            ypos: y,
            zpos: z,
            rhpos: 1.0,
            wpos: 1.0,
            tpos: t,
            englt: 0.0,
        }
    }

    /// Whether the particle sits exactly on the ice surface.
    #[inline]
    pub fn at_surface(&self) -> bool {
        is_surface(self.rhpos)
    }
}

/// Host fields interpolated at one particle.
///
/// `wvelbase` and `wvelsurf` are only sampled in 3-D mode and stay zero
/// otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Columns)]
#[columns(store_name = "ColumnSamples")]
pub struct ColumnSample {
    pub uvelbase: f64,
    pub vvelbase: f64,
    pub uvelsurf: f64,
    pub vvelsurf: f64,
    pub wvelbase: f64,
    pub wvelsurf: f64,
    pub thk: f64,
    pub topg: f64,
    pub smb: f64,
}
