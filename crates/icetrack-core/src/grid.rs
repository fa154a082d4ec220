//! Uniform rectangular grid geometry shared by every host field.
//!
//! Rows follow the `y` coordinate vector and columns follow `x`. The host
//! grid has one spacing `dx` for both axes.
use crate::error::FieldError;

/// Relative tolerance between the `x` and `y` steps.
const SPACING_RTOL: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq)]
pub struct GridGeometry {
    x: Vec<f64>,
    y: Vec<f64>,
    dx: f64,
}

impl GridGeometry {
    /// Build the geometry from the host's coordinate vectors.
    ///
    /// Spacing is taken from the first two `x` nodes and used for both axes;
    /// the first `y` step must match it.
    pub fn from_coords(x: &[f64], y: &[f64]) -> Result<Self, FieldError> {
        if x.len() < 2 {
            return Err(FieldError::TooFewNodes { axis: "x", len: x.len() });
        }
        if y.len() < 2 {
            return Err(FieldError::TooFewNodes { axis: "y", len: y.len() });
        }
        let dx = x[1] - x[0];
        if !(dx.is_finite() && dx > 0.0) {
            return Err(FieldError::InvalidSpacing(dx));
        }
        let dy = y[1] - y[0];
        if !((dy - dx).abs() <= SPACING_RTOL * dx) {
            return Err(FieldError::InvalidSpacing(dy));
        }
        Ok(Self {
            x: x.to_vec(),
            y: y.to_vec(),
            dx,
        })
    }

    /// Regular grid of `rows × cols` nodes starting at `(x0, y0)`.
    pub fn regular(rows: usize, cols: usize, dx: f64, x0: f64, y0: f64) -> Result<Self, FieldError> {
        let x: Vec<f64> = (0..cols).map(|c| x0 + c as f64 * dx).collect();
        let y: Vec<f64> = (0..rows).map(|r| y0 + r as f64 * dx).collect();
        Self::from_coords(&x, &y)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.y.len()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.x.len()
    }

    /// `(rows, cols)`, the shape every host field must have.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    #[inline]
    pub fn dx(&self) -> f64 {
        self.dx
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// `(x[0], x[last])`.
    pub fn x_bounds(&self) -> (f64, f64) {
        (self.x[0], self.x[self.x.len() - 1])
    }

    /// `(y[0], y[last])`.
    pub fn y_bounds(&self) -> (f64, f64) {
        (self.y[0], self.y[self.y.len() - 1])
    }

    /// Continuous `(row, col)` index of a world position.
    #[inline]
    pub fn fractional_index(&self, x: f64, y: f64) -> (f64, f64) {
        ((y - self.y[0]) / self.dx, (x - self.x[0]) / self.dx)
    }

    /// Integer cell holding a world position.
    ///
    /// The fractional index is truncated toward zero, then clamped into the
    /// grid so positions past the domain edge land in the border cell.
    #[inline]
    pub fn cell_index(&self, x: f64, y: f64) -> (usize, usize) {
        let (r, c) = self.fractional_index(x, y);
        (
            truncate_into(r, self.rows()),
            truncate_into(c, self.cols()),
        )
    }
}

/// Truncating cast (NaN maps to 0), clamped to `[0, n-1]`.
#[inline]
fn truncate_into(q: f64, n: usize) -> usize {
    let k = q as i64;
    k.clamp(0, n as i64 - 1) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_coords_takes_spacing_from_x() {
        let g = GridGeometry::from_coords(&[0.0, 100.0, 200.0], &[50.0, 150.0]).unwrap();
        assert_eq!(g.shape(), (2, 3));
        assert_eq!(g.dx(), 100.0);
        assert_eq!(g.x_bounds(), (0.0, 200.0));
        assert_eq!(g.y_bounds(), (50.0, 150.0));
    }

    #[test]
    fn rejects_single_node_axis() {
        let err = GridGeometry::from_coords(&[0.0], &[0.0, 1.0]).unwrap_err();
        assert_eq!(err, FieldError::TooFewNodes { axis: "x", len: 1 });
        let err = GridGeometry::from_coords(&[0.0, 1.0], &[]).unwrap_err();
        assert_eq!(err, FieldError::TooFewNodes { axis: "y", len: 0 });
    }

    #[test]
    fn rejects_non_increasing_spacing() {
        assert!(GridGeometry::from_coords(&[1.0, 1.0], &[0.0, 1.0]).is_err());
        assert!(GridGeometry::from_coords(&[1.0, 0.0], &[0.0, 1.0]).is_err());
        assert!(GridGeometry::from_coords(&[0.0, f64::NAN], &[0.0, 1.0]).is_err());
    }

    #[test]
    fn rejects_y_spacing_different_from_x() {
        // descending rows
        let err = GridGeometry::from_coords(&[0.0, 100.0, 200.0], &[200.0, 100.0, 0.0]).unwrap_err();
        assert_eq!(err, FieldError::InvalidSpacing(-100.0));
        // finer rows
        let err = GridGeometry::from_coords(&[0.0, 100.0, 200.0], &[0.0, 50.0, 100.0]).unwrap_err();
        assert_eq!(err, FieldError::InvalidSpacing(50.0));
        assert!(GridGeometry::from_coords(&[0.0, 100.0], &[0.0, f64::NAN]).is_err());
    }

    #[test]
    fn accepts_rounding_in_y_step() {
        let g = GridGeometry::from_coords(&[0.0, 0.1, 0.2], &[0.3, 0.4]).unwrap();
        assert_eq!(g.dx(), 0.1);
    }

    #[test]
    fn regular_matches_coordinates() {
        let g = GridGeometry::regular(3, 4, 50.0, -100.0, 10.0).unwrap();
        assert_eq!(g.x(), &[-100.0, -50.0, 0.0, 50.0]);
        assert_eq!(g.y(), &[10.0, 60.0, 110.0]);
    }

    #[test]
    fn fractional_index_is_row_then_col() {
        let g = GridGeometry::regular(10, 10, 100.0, 0.0, 0.0).unwrap();
        let (r, c) = g.fractional_index(250.0, 730.0);
        assert!((r - 7.3).abs() < 1e-12);
        assert!((c - 2.5).abs() < 1e-12);
    }

    #[test]
    fn cell_index_truncates() {
        let g = GridGeometry::regular(10, 10, 100.0, 0.0, 0.0).unwrap();
        assert_eq!(g.cell_index(199.9, 100.0), (1, 1));
        assert_eq!(g.cell_index(250.0, 799.0), (7, 2));
        // truncation toward zero keeps slightly negative positions in cell 0
        assert_eq!(g.cell_index(-50.0, -10.0), (0, 0));
    }

    #[test]
    fn cell_index_clamps_outside_domain() {
        let g = GridGeometry::regular(5, 4, 10.0, 0.0, 0.0).unwrap();
        assert_eq!(g.cell_index(1e6, 1e6), (4, 3));
        assert_eq!(g.cell_index(-1e6, -1e6), (0, 0));
        assert_eq!(g.cell_index(f64::NAN, 15.0), (1, 0));
    }
}
