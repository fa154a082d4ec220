use numpy::{PyArray2, PyReadonlyArray1, PyReadonlyArray2, ToPyArray};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use icetrack_core::kinematics;
use icetrack_core::operators::{CenteredDifferences, DifferenceOperators};
use icetrack_core::{GridGeometry, HostFields};

use crate::convert::{checked_grid, coords, value_error};

#[pyfunction]
#[pyo3(signature = (field, dx, dy=None))]
#[allow(clippy::type_complexity)]
fn gradient<'py>(
    py: Python<'py>,
    field: PyReadonlyArray2<'py, f64>,
    dx: f64,
    dy: Option<f64>,
) -> PyResult<(Bound<'py, PyArray2<f64>>, Bound<'py, PyArray2<f64>>)> {
    let (gx, gy) = CenteredDifferences.gradient(&field.as_array(), dx, dy.unwrap_or(dx));
    Ok((gx.to_pyarray(py), gy.to_pyarray(py)))
}

#[pyfunction]
#[pyo3(signature = (u, v, h, dx, dy=None))]
fn flux_divergence<'py>(
    py: Python<'py>,
    u: PyReadonlyArray2<'py, f64>,
    v: PyReadonlyArray2<'py, f64>,
    h: PyReadonlyArray2<'py, f64>,
    dx: f64,
    dy: Option<f64>,
) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let h = h.as_array();
    let u = checked_grid(&u, h.dim(), "u")?;
    let v = checked_grid(&v, h.dim(), "v")?;
    let div = CenteredDifferences.flux_divergence(&u, &v, &h, dx, dy.unwrap_or(dx));
    Ok(div.to_pyarray(py))
}

/// Base and surface vertical velocity and flux divergence for one step.
#[pyfunction]
#[allow(clippy::too_many_arguments)]
fn vertical_velocity<'py>(
    py: Python<'py>,
    x: PyReadonlyArray1<'py, f64>,
    y: PyReadonlyArray1<'py, f64>,
    uvelbase: PyReadonlyArray2<'py, f64>,
    vvelbase: PyReadonlyArray2<'py, f64>,
    uvelsurf: PyReadonlyArray2<'py, f64>,
    vvelsurf: PyReadonlyArray2<'py, f64>,
    ubar: PyReadonlyArray2<'py, f64>,
    vbar: PyReadonlyArray2<'py, f64>,
    thk: PyReadonlyArray2<'py, f64>,
    topg: PyReadonlyArray2<'py, f64>,
    usurf: PyReadonlyArray2<'py, f64>,
    smb: PyReadonlyArray2<'py, f64>,
) -> PyResult<Bound<'py, PyDict>> {
    let geometry = GridGeometry::from_coords(&coords(&x), &coords(&y)).map_err(value_error)?;
    let fields = HostFields {
        uvelbase: uvelbase.as_array(),
        vvelbase: vvelbase.as_array(),
        uvelsurf: uvelsurf.as_array(),
        vvelsurf: vvelsurf.as_array(),
        ubar: ubar.as_array(),
        vbar: vbar.as_array(),
        thk: thk.as_array(),
        topg: topg.as_array(),
        usurf: usurf.as_array(),
        smb: smb.as_array(),
    };
    fields.validate(&geometry).map_err(value_error)?;

    let vv = kinematics::vertical_velocity(&fields, &geometry, &CenteredDifferences);
    let dict = grids_to_dict!(py, vv, wvelbase, wvelsurf, divflux);
    Ok(dict)
}

pub fn register(parent: &Bound<'_, PyModule>) -> PyResult<()> {
    let py = parent.py();
    let m = PyModule::new(py, "operators")?;
    m.add_function(wrap_pyfunction!(gradient, &m)?)?;
    m.add_function(wrap_pyfunction!(flux_divergence, &m)?)?;
    m.add_function(wrap_pyfunction!(vertical_velocity, &m)?)?;
    parent.add_submodule(&m)?;
    Ok(())
}
