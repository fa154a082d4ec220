//! Bilinear sampling of grid fields at particle positions.
//!
//! Interpolation weights depend only on the particle position, so they are
//! computed once per step as a [`Stencil`] and reused for every field.
use ndarray::ArrayView2;
use rayon::prelude::*;
use smallvec::SmallVec;

use crate::grid::GridGeometry;

/// Inline capacity for the fields sampled in one step (nine in 3-D mode).
pub const MAX_INLINE_FIELDS: usize = 9;

/// Clamped bilinear cell and weights for one position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stencil {
    pub row_lo: usize,
    pub row_hi: usize,
    pub col_lo: usize,
    pub col_hi: usize,
    /// Weight of `row_hi`, in [0, 1]
    pub alpha_row: f64,
    /// Weight of `col_hi`, in [0, 1]
    pub alpha_col: f64,
}

impl Stencil {
    /// Stencil of the world position `(x, y)`.
    ///
    /// Positions outside the grid use the nearest edge cell with weights
    /// clamped to [0, 1], so edge values are held constant.
    pub fn new(geometry: &GridGeometry, x: f64, y: f64) -> Self {
        let (r, c) = geometry.fractional_index(x, y);
        let (row_lo, row_hi, alpha_row) = axis_weights(r, geometry.rows());
        let (col_lo, col_hi, alpha_col) = axis_weights(c, geometry.cols());
        Self {
            row_lo,
            row_hi,
            col_lo,
            col_hi,
            alpha_row,
            alpha_col,
        }
    }

    /// Interpolate `field` at this stencil.
    #[inline]
    pub fn interpolate(&self, field: &ArrayView2<'_, f64>) -> f64 {
        let top_left = field[[self.row_lo, self.col_lo]];
        let top_right = field[[self.row_lo, self.col_hi]];
        let bottom_left = field[[self.row_hi, self.col_lo]];
        let bottom_right = field[[self.row_hi, self.col_hi]];

        let top = self.alpha_col * (top_right - top_left) + top_left;
        let bottom = self.alpha_col * (bottom_right - bottom_left) + bottom_left;
        self.alpha_row * (bottom - top) + top
    }
}

/// Lower node, upper node and upper weight along one axis of `n` nodes.
#[inline]
fn axis_weights(q: f64, n: usize) -> (usize, usize, f64) {
    if n < 2 {
        return (0, 0, 0.0);
    }
    let max_lo = (n - 2) as f64;
    // max/min rather than clamp: NaN must not panic
    let lo = q.floor().max(0.0).min(max_lo);
    let alpha = (q - lo).max(0.0).min(1.0);
    let lo = lo as usize;
    (lo, lo + 1, alpha)
}

/// Stencils for every particle position.
pub fn stencils(geometry: &GridGeometry, xpos: &[f64], ypos: &[f64]) -> Vec<Stencil> {
    xpos.par_iter()
        .zip(ypos.par_iter())
        .map(|(&x, &y)| Stencil::new(geometry, x, y))
        .collect()
}

/// Sample one field at every stencil.
pub fn sample(field: &ArrayView2<'_, f64>, stencils: &[Stencil]) -> Vec<f64> {
    stencils.par_iter().map(|s| s.interpolate(field)).collect()
}

/// Sample several fields against one shared set of stencils.
///
/// Output columns follow the order of `fields`.
pub fn sample_many(
    fields: &[&ArrayView2<'_, f64>],
    stencils: &[Stencil],
) -> SmallVec<[Vec<f64>; MAX_INLINE_FIELDS]> {
    fields.iter().map(|field| sample(field, stencils)).collect()
}
