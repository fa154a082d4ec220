/// Per-timestep grids borrowed from the host ice-flow model.
///
/// All fields are read-only views with shape `(rows, cols)` matching the
/// [`GridGeometry`]. The tracker never keeps them beyond one `update` call.
use ndarray::ArrayView2;

use crate::error::FieldError;
use crate::grid::GridGeometry;

#[derive(Debug, Clone, Copy)]
pub struct HostFields<'a> {
    /// Basal horizontal velocity, x component
    pub uvelbase: ArrayView2<'a, f64>,
    /// Basal horizontal velocity, y component
    pub vvelbase: ArrayView2<'a, f64>,
    /// Surface horizontal velocity, x component
    pub uvelsurf: ArrayView2<'a, f64>,
    /// Surface horizontal velocity, y component
    pub vvelsurf: ArrayView2<'a, f64>,
    /// Depth-averaged velocity, x component
    pub ubar: ArrayView2<'a, f64>,
    /// Depth-averaged velocity, y component
    pub vbar: ArrayView2<'a, f64>,
    /// Ice thickness
    pub thk: ArrayView2<'a, f64>,
    /// Bed elevation
    pub topg: ArrayView2<'a, f64>,
    /// Surface elevation
    pub usurf: ArrayView2<'a, f64>,
    /// Surface mass balance
    pub smb: ArrayView2<'a, f64>,
}

impl<'a> HostFields<'a> {
    /// Field views paired with their names, in a fixed order.
    pub fn named(&self) -> [(&'static str, &ArrayView2<'a, f64>); 10] {
        [
            ("uvelbase", &self.uvelbase),
            ("vvelbase", &self.vvelbase),
            ("uvelsurf", &self.uvelsurf),
            ("vvelsurf", &self.vvelsurf),
            ("ubar", &self.ubar),
            ("vbar", &self.vbar),
            ("thk", &self.thk),
            ("topg", &self.topg),
            ("usurf", &self.usurf),
            ("smb", &self.smb),
        ]
    }

    /// Check that every field has the geometry's shape.
    ///
    /// Reports the first offending field by name.
    pub fn validate(&self, geometry: &GridGeometry) -> Result<(), FieldError> {
        let expected = geometry.shape();
        for (name, field) in self.named() {
            let actual = field.dim();
            if actual != expected {
                return Err(FieldError::ShapeMismatch {
                    name,
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }
}
