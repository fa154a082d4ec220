use numpy::{PyArray1, PyArray2, PyReadonlyArray1, PyReadonlyArray2, ToPyArray};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use icetrack_core::tracking::outputs::StepReport;
use icetrack_core::{GridGeometry, HostFields, TrackingConfig, TrackingMethod};

use crate::convert::{coords, value_error};

/// Particle tracker bound to one host grid.
///
/// `x` and `y` are the host coordinate vectors; grids passed to `update`
/// must have shape `(len(y), len(x))`.
#[pyclass(name = "ParticleTracker")]
pub struct PyParticleTracker {
    inner: icetrack_core::ParticleTracker,
}

impl PyParticleTracker {
    fn build(
        x: &PyReadonlyArray1<'_, f64>,
        y: &PyReadonlyArray1<'_, f64>,
        config: TrackingConfig,
    ) -> PyResult<Self> {
        let geometry = GridGeometry::from_coords(&coords(x), &coords(y)).map_err(value_error)?;
        let inner = icetrack_core::ParticleTracker::new(config, geometry).map_err(value_error)?;
        Ok(Self { inner })
    }
}

fn report_to_dict<'py>(py: Python<'py>, report: &StepReport) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("time", report.time)?;
    dict.set_item("seeded", report.seeded)?;
    dict.set_item("n_particles", report.n_particles)?;
    dict.set_item("elapsed", report.elapsed.as_secs_f64())?;
    Ok(dict)
}

#[pymethods]
impl PyParticleTracker {
    #[new]
    #[pyo3(signature = (x, y, tracking_method="3d", frequency_seeding=10.0, density_seeding=0.2))]
    fn new<'py>(
        x: PyReadonlyArray1<'py, f64>,
        y: PyReadonlyArray1<'py, f64>,
        tracking_method: &str,
        frequency_seeding: f64,
        density_seeding: f64,
    ) -> PyResult<Self> {
        let method: TrackingMethod = tracking_method.parse().map_err(value_error)?;
        let config = TrackingConfig::new(method, frequency_seeding, density_seeding).map_err(value_error)?;
        Self::build(&x, &y, config)
    }

    /// Build from a JSON parameter document; unknown keys are ignored.
    #[staticmethod]
    fn from_json<'py>(x: PyReadonlyArray1<'py, f64>, y: PyReadonlyArray1<'py, f64>, json: &str) -> PyResult<Self> {
        let config = TrackingConfig::from_json(json).map_err(value_error)?;
        Self::build(&x, &y, config)
    }

    /// Advance the particles from `t` by `dt` with this step's host grids.
    #[allow(clippy::too_many_arguments)]
    fn update<'py>(
        &mut self,
        py: Python<'py>,
        t: f64,
        dt: f64,
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
        let report = self.inner.update(&fields, t, dt).map_err(value_error)?;
        report_to_dict(py, &report)
    }

    /// Log a summary and return it as a dict.
    fn finalize<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let s = self.inner.finalize();
        let dict = PyDict::new(py);
        dict.set_item("n_particles", s.n_particles)?;
        dict.set_item("n_surface", s.n_surface)?;
        dict.set_item("total_surface_weight", s.total_surface_weight)?;
        dict.set_item("mean_englacial_time", s.mean_englacial_time)?;
        dict.set_item("max_englacial_time", s.max_englacial_time)?;
        Ok(dict)
    }

    /// All particle columns as a dict of arrays.
    fn particles<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let store = self.inner.particles();
        let dict = store_to_dict!(py, store, xpos, ypos, zpos, rhpos, wpos, tpos, englt);
        Ok(dict)
    }

    #[getter]
    fn tracking_method(&self) -> &'static str {
        self.inner.config().tracking_method.as_str()
    }

    #[getter]
    fn frequency_seeding(&self) -> f64 {
        self.inner.config().frequency_seeding
    }

    #[getter]
    fn density_seeding(&self) -> f64 {
        self.inner.config().density_seeding
    }

    #[getter]
    fn tlast_seeding(&self) -> f64 {
        self.inner.last_seeding_time()
    }

    #[getter]
    fn n_particles(&self) -> usize {
        self.inner.particles().len()
    }

    #[getter]
    fn xpos<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        PyArray1::from_slice(py, &self.inner.particles().xpos)
    }

    #[getter]
    fn ypos<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        PyArray1::from_slice(py, &self.inner.particles().ypos)
    }

    #[getter]
    fn zpos<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        PyArray1::from_slice(py, &self.inner.particles().zpos)
    }

    #[getter]
    fn rhpos<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        PyArray1::from_slice(py, &self.inner.particles().rhpos)
    }

    #[getter]
    fn wpos<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        PyArray1::from_slice(py, &self.inner.particles().wpos)
    }

    #[getter]
    fn tpos<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        PyArray1::from_slice(py, &self.inner.particles().tpos)
    }

    #[getter]
    fn englt<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        PyArray1::from_slice(py, &self.inner.particles().englt)
    }

    /// Surface particle weight per cell from the last update.
    #[getter]
    fn weight_particles<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.weights().to_pyarray(py)
    }

    /// Basal vertical velocity from the last 3-D update, `None` otherwise.
    #[getter]
    fn wvelbase<'py>(&self, py: Python<'py>) -> Option<Bound<'py, PyArray2<f64>>> {
        self.inner.vertical_velocity().map(|vv| vv.wvelbase.to_pyarray(py))
    }

    #[getter]
    fn wvelsurf<'py>(&self, py: Python<'py>) -> Option<Bound<'py, PyArray2<f64>>> {
        self.inner.vertical_velocity().map(|vv| vv.wvelsurf.to_pyarray(py))
    }

    #[getter]
    fn divflux<'py>(&self, py: Python<'py>) -> Option<Bound<'py, PyArray2<f64>>> {
        self.inner.vertical_velocity().map(|vv| vv.divflux.to_pyarray(py))
    }

    /// Wall time of every update so far [s].
    #[getter]
    fn tcomp_particles<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        let secs: Vec<f64> = self.inner.compute_times().iter().map(|d| d.as_secs_f64()).collect();
        PyArray1::from_vec(py, secs)
    }

    fn __len__(&self) -> usize {
        self.inner.particles().len()
    }

    fn __repr__(&self) -> String {
        let config = self.inner.config();
        let (rows, cols) = self.inner.geometry().shape();
        format!(
            "ParticleTracker(method={:?}, grid={}x{}, particles={})",
            config.tracking_method.as_str(),
            rows,
            cols,
            self.inner.particles().len()
        )
    }
}

pub fn register(parent: &Bound<'_, PyModule>) -> PyResult<()> {
    let py = parent.py();
    let m = PyModule::new(py, "tracking")?;
    m.add_class::<PyParticleTracker>()?;
    parent.add_submodule(&m)?;
    Ok(())
}
