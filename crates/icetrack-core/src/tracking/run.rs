/// Particle tracker orchestration.
///
/// One `update()` per host timestep, in a fixed order:
/// 1. Seed new particles if a seeding event is due
/// 2. Sample the host grids at every particle
/// 3. Advect every particle with the configured method
/// 4. Rebuild the deposition weights, accumulate englacial time
use std::time::{Duration, Instant};

use log::{debug, info};
use ndarray::{Array2, ArrayView2};
use rayon::prelude::*;
use smallvec::SmallVec;

use super::deposition::{accumulate_englacial_time, deposition_weights};
use super::outputs::StepReport;
use super::params::TrackingConfig;
use super::processes::DomainBounds;
use super::seeding::Seeder;
use super::state::{ColumnSamples, Particle, ParticleStore};
use crate::diagnostics::TrackingSummary;
use crate::error::TrackingError;
use crate::fields::HostFields;
use crate::grid::GridGeometry;
use crate::kinematics::{vertical_velocity, VerticalVelocity};
use crate::operators::{CenteredDifferences, DifferenceOperators};
use crate::sampling::{sample_many, stencils, Stencil, MAX_INLINE_FIELDS};

/// Tracer particle population advected through the host grids.
///
/// Configuration and grid geometry are fixed at construction; the host
/// fields are borrowed for the duration of each `update()` only.
#[derive(Debug)]
pub struct ParticleTracker<O: DifferenceOperators = CenteredDifferences> {
    config: TrackingConfig,
    geometry: GridGeometry,
    operators: O,
    seeder: Seeder,
    particles: ParticleStore,
    weights: Array2<f64>,
    vertical: Option<VerticalVelocity>,
    compute_times: Vec<Duration>,
}

impl ParticleTracker<CenteredDifferences> {
    /// Tracker using centered finite differences for the vertical velocity.
    pub fn new(config: TrackingConfig, geometry: GridGeometry) -> Result<Self, TrackingError> {
        Self::with_operators(config, geometry, CenteredDifferences)
    }
}

impl<O: DifferenceOperators> ParticleTracker<O> {
    /// Tracker using the host's own gradient and flux divergence.
    pub fn with_operators(config: TrackingConfig, geometry: GridGeometry, operators: O) -> Result<Self, TrackingError> {
        config.validate()?;
        let seeder = Seeder::new(&config, &geometry);
        let weights = Array2::zeros(geometry.shape());
        Ok(Self {
            config,
            geometry,
            operators,
            seeder,
            particles: ParticleStore::new(),
            weights,
            vertical: None,
            compute_times: Vec::new(),
        })
    }

    /// Advance the particle population from `t` by `dt`.
    pub fn update(&mut self, fields: &HostFields<'_>, t: f64, dt: f64) -> Result<StepReport, TrackingError> {
        let start = Instant::now();
        fields.validate(&self.geometry)?;

        info!("Update particle tracking at time : {}", t);

        // 1. Seeding
        let seeded = match self.seeder.maybe_seed(fields, &self.geometry, t) {
            Some(mut batch) => {
                let n = batch.len();
                self.particles.append(&mut batch);
                n
            }
            None => 0,
        };

        // 2. Sampling
        let method = self.config.tracking_method;
        if method.needs_vertical_velocity() {
            self.vertical = Some(vertical_velocity(fields, &self.geometry, &self.operators));
        }
        let stencils = stencils(&self.geometry, &self.particles.xpos, &self.particles.ypos);
        let samples = sample_columns(fields, self.vertical.as_ref(), &stencils);

        // 3. Advection
        let bounds = self.domain_bounds();
        let particles = &self.particles;
        let advected: Vec<Particle> = (0..particles.len())
            .into_par_iter()
            .map(|i| method.advect(&particles.get(i), &samples.get(i), &bounds, dt))
            .collect();
        self.particles = advected.into_iter().collect();

        // 4. Deposition and englacial time
        self.weights = deposition_weights(&self.particles, &self.geometry);
        accumulate_englacial_time(&mut self.particles, dt);

        let elapsed = start.elapsed();
        self.compute_times.push(elapsed);

        let report = StepReport {
            time: t,
            seeded,
            n_particles: self.particles.len(),
            elapsed,
        };
        debug!("{:?}", report);
        Ok(report)
    }

    /// Log a summary of the tracked population and return it.
    pub fn finalize(&self) -> TrackingSummary {
        let summary = TrackingSummary::from_particles(&self.particles);
        let total: Duration = self.compute_times.iter().sum();
        info!(
            "Particle tracking finished after {} updates ({:.3} s): {}",
            self.compute_times.len(),
            total.as_secs_f64(),
            summary
        );
        summary
    }

    pub fn particles(&self) -> &ParticleStore {
        &self.particles
    }

    /// Sum of surface particle weights per cell, from the last update.
    pub fn weights(&self) -> &Array2<f64> {
        &self.weights
    }

    /// Vertical velocity grids from the last 3-D update, `None` in simple mode.
    pub fn vertical_velocity(&self) -> Option<&VerticalVelocity> {
        self.vertical.as_ref()
    }

    /// Wall time of every update so far.
    pub fn compute_times(&self) -> &[Duration] {
        &self.compute_times
    }

    pub fn config(&self) -> &TrackingConfig {
        &self.config
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn last_seeding_time(&self) -> f64 {
        self.seeder.last_seeding_time()
    }

    fn domain_bounds(&self) -> DomainBounds {
        let (x_min, x_max) = self.geometry.x_bounds();
        let (y_min, y_max) = self.geometry.y_bounds();
        DomainBounds {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }
}

/// Sample the host grids (and vertical velocity, if any) at every stencil.
fn sample_columns(fields: &HostFields<'_>, vertical: Option<&VerticalVelocity>, stencils: &[Stencil]) -> ColumnSamples {
    // reborrowed so host and vertical views share one local lifetime
    let host: [ArrayView2<'_, f64>; 7] = [
        fields.uvelbase.view(),
        fields.vvelbase.view(),
        fields.uvelsurf.view(),
        fields.vvelsurf.view(),
        fields.thk.view(),
        fields.topg.view(),
        fields.smb.view(),
    ];
    let w_views = vertical.map(|vv| (vv.wvelbase.view(), vv.wvelsurf.view()));

    let mut grids: SmallVec<[&ArrayView2<'_, f64>; MAX_INLINE_FIELDS]> = host.iter().collect();
    if let Some((wbase, wsurf)) = &w_views {
        grids.push(wbase);
        grids.push(wsurf);
    }

    let n = stencils.len();
    let mut columns = sample_many(&grids, stencils).into_iter();
    // vertical velocity columns stay zero when not sampled
    let mut next = || columns.next().unwrap_or_else(|| vec![0.0; n]);

    ColumnSamples {
        uvelbase: next(),
        vvelbase: next(),
        uvelsurf: next(),
        vvelsurf: next(),
        thk: next(),
        topg: next(),
        smb: next(),
        wvelbase: next(),
        wvelsurf: next(),
    }
}
