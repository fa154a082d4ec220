/// Particle seeding.
///
/// New particles are emitted at most once every `frequency_seeding` years, on
/// a coarse sub-grid of the host grid restricted to thick ice with a surface
/// mass balance above the seeding threshold.
use log::debug;
use ndarray::Array2;

use super::constants::{MIN_SEED_SMB, MIN_SEED_THICKNESS};
use super::params::TrackingConfig;
use super::state::{Particle, ParticleStore};
use crate::fields::HostFields;
use crate::grid::GridGeometry;

/// Seeder state: the static sub-grid mask and the time of the last event.
#[derive(Debug, Clone)]
pub struct Seeder {
    gridseed: Array2<bool>,
    frequency: f64,
    last_seeding_time: f64,
}

impl Seeder {
    /// Build the seeding sub-grid: every `stride`-th node along both axes,
    /// starting at node `(0, 0)`.
    pub fn new(config: &TrackingConfig, geometry: &GridGeometry) -> Self {
        let stride = config.seed_stride();
        let gridseed = Array2::from_shape_fn(geometry.shape(), |(r, c)| r % stride == 0 && c % stride == 0);
        Self {
            gridseed,
            frequency: config.frequency_seeding,
            last_seeding_time: f64::NEG_INFINITY,
        }
    }

    /// Static sub-grid mask.
    pub fn gridseed(&self) -> &Array2<bool> {
        &self.gridseed
    }

    /// Time of the last seeding event, `-inf` before the first one.
    pub fn last_seeding_time(&self) -> f64 {
        self.last_seeding_time
    }

    /// Whether a seeding event is due at time `t`.
    pub fn is_due(&self, t: f64) -> bool {
        t - self.last_seeding_time >= self.frequency
    }

    /// Emit one particle per eligible cell, in row-major order.
    ///
    /// The event is recorded even if no cell qualifies.
    pub fn seed(&mut self, fields: &HostFields<'_>, geometry: &GridGeometry, t: f64) -> ParticleStore {
        let (xs, ys) = (geometry.x(), geometry.y());

        let batch: ParticleStore = self
            .gridseed
            .indexed_iter()
            .filter(|&((r, c), &on_grid)| {
                on_grid && fields.thk[[r, c]] > MIN_SEED_THICKNESS && fields.smb[[r, c]] > MIN_SEED_SMB
            })
            .map(|((r, c), _)| Particle::seeded(xs[c], ys[r], fields.usurf[[r, c]], t))
            .collect();

        self.last_seeding_time = t;
        debug!("Seeded {} particles at time {}", batch.len(), t);
        batch
    }

    /// Seed if an event is due at `t`, otherwise return `None`.
    pub fn maybe_seed(
        &mut self,
        fields: &HostFields<'_>,
        geometry: &GridGeometry,
        t: f64,
    ) -> Option<ParticleStore> {
        if self.is_due(t) {
            Some(self.seed(fields, geometry, t))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::params::TrackingMethod;

    struct Grids {
        zero: Array2<f64>,
        thk: Array2<f64>,
        usurf: Array2<f64>,
        smb: Array2<f64>,
    }

    impl Grids {
        fn uniform(shape: (usize, usize), thk: f64, smb: f64) -> Self {
            Self {
                zero: Array2::zeros(shape),
                thk: Array2::from_elem(shape, thk),
                usurf: Array2::from_shape_fn(shape, |(r, c)| 2000.0 + (10 * r + c) as f64),
                smb: Array2::from_elem(shape, smb),
            }
        }

        fn fields(&self) -> HostFields<'_> {
            let z = self.zero.view();
            HostFields {
                uvelbase: z,
                vvelbase: z,
                uvelsurf: z,
                vvelsurf: z,
                ubar: z,
                vbar: z,
                thk: self.thk.view(),
                topg: z,
                usurf: self.usurf.view(),
                smb: self.smb.view(),
            }
        }
    }

    fn seeder(geom: &GridGeometry, freq: f64, density: f64) -> Seeder {
        let config = TrackingConfig::new(TrackingMethod::Simple, freq, density).unwrap();
        Seeder::new(&config, geom)
    }

    #[test]
    fn gridseed_follows_stride() {
        let geom = GridGeometry::regular(7, 6, 100.0, 0.0, 0.0).unwrap();
        let s = seeder(&geom, 10.0, 0.2);
        let on: Vec<(usize, usize)> = s
            .gridseed()
            .indexed_iter()
            .filter(|&(_, &b)| b)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(on, vec![(0, 0), (0, 5), (5, 0), (5, 5)]);
    }

    #[test]
    fn first_call_is_always_due() {
        let geom = GridGeometry::regular(3, 3, 10.0, 0.0, 0.0).unwrap();
        let s = seeder(&geom, 1e6, 1.0);
        assert!(s.is_due(-1e9));
        assert_eq!(s.last_seeding_time(), f64::NEG_INFINITY);
    }

    #[test]
    fn due_once_per_interval() {
        let geom = GridGeometry::regular(3, 3, 10.0, 0.0, 0.0).unwrap();
        let g = Grids::uniform(geom.shape(), 50.0, 1.0);
        let mut s = seeder(&geom, 10.0, 1.0);

        assert!(s.maybe_seed(&g.fields(), &geom, 0.0).is_some());
        assert!(s.maybe_seed(&g.fields(), &geom, 5.0).is_none());
        assert!(s.maybe_seed(&g.fields(), &geom, 9.999).is_none());
        // boundary is inclusive
        assert!(s.maybe_seed(&g.fields(), &geom, 10.0).is_some());
        assert_eq!(s.last_seeding_time(), 10.0);
    }

    #[test]
    fn seeds_every_masked_cell_at_surface() {
        let geom = GridGeometry::regular(10, 10, 100.0, 0.0, 0.0).unwrap();
        let g = Grids::uniform(geom.shape(), 50.0, 1.0);
        let mut s = seeder(&geom, 1.0, 1.0);

        let batch = s.seed(&g.fields(), &geom, 3.0);
        assert_eq!(batch.len(), 100);
        assert!(batch.rhpos.iter().all(|&v| v == 1.0));
        assert!(batch.wpos.iter().all(|&v| v == 1.0));
        assert!(batch.tpos.iter().all(|&v| v == 3.0));
        assert!(batch.englt.iter().all(|&v| v == 0.0));

        // row-major: second particle is (row 0, col 1)
        let p = batch.get(1);
        assert_eq!((p.xpos, p.ypos, p.zpos), (100.0, 0.0, 2001.0));
        let p = batch.get(23);
        assert_eq!((p.xpos, p.ypos, p.zpos), (300.0, 200.0, 2023.0));
    }

    #[test]
    fn thresholds_are_strict() {
        let geom = GridGeometry::regular(2, 3, 10.0, 0.0, 0.0).unwrap();
        let mut g = Grids::uniform(geom.shape(), 50.0, 0.0);
        g.thk[[0, 0]] = 10.0; // not > 10
        g.smb[[0, 1]] = -2.0; // not > -2
        g.smb[[0, 2]] = -1.999;
        g.thk[[1, 0]] = 10.001;
        let mut s = seeder(&geom, 1.0, 1.0);

        let batch = s.seed(&g.fields(), &geom, 0.0);
        let cells: Vec<(f64, f64)> = batch.iter().map(|p| (p.xpos, p.ypos)).collect();
        assert_eq!(cells, vec![(20.0, 0.0), (0.0, 10.0), (10.0, 10.0), (20.0, 10.0)]);
    }

    #[test]
    fn empty_batch_still_records_event() {
        let geom = GridGeometry::regular(4, 4, 10.0, 0.0, 0.0).unwrap();
        let g = Grids::uniform(geom.shape(), 5.0, 1.0);
        let mut s = seeder(&geom, 10.0, 1.0);

        let batch = s.maybe_seed(&g.fields(), &geom, 20.0).unwrap();
        assert!(batch.is_empty());
        assert_eq!(s.last_seeding_time(), 20.0);
        assert!(!s.is_due(25.0));
    }

    #[test]
    fn nan_fields_are_never_seeded() {
        let geom = GridGeometry::regular(2, 2, 10.0, 0.0, 0.0).unwrap();
        let mut g = Grids::uniform(geom.shape(), f64::NAN, 1.0);
        g.thk[[1, 1]] = 20.0;
        let mut s = seeder(&geom, 1.0, 1.0);
        assert_eq!(s.seed(&g.fields(), &geom, 0.0).len(), 1);
    }
}
