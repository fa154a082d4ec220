use std::fmt::Display;

use ndarray::ArrayView2;
use numpy::{PyReadonlyArray1, PyReadonlyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

/// Map any core error to `ValueError`.
pub fn value_error<E: Display>(err: E) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Copy a coordinate vector, contiguous or not.
pub fn coords(arr: &PyReadonlyArray1<'_, f64>) -> Vec<f64> {
    arr.as_array().to_vec()
}

/// Borrow a 2D grid after checking its shape.
pub fn checked_grid<'a>(
    arr: &'a PyReadonlyArray2<'_, f64>,
    expected: (usize, usize),
    name: &str,
) -> PyResult<ArrayView2<'a, f64>> {
    let view = arr.as_array();
    if view.dim() != expected {
        return Err(PyValueError::new_err(format!(
            "{} has shape {:?}, expected {:?}",
            name,
            view.dim(),
            expected
        )));
    }
    Ok(view)
}
