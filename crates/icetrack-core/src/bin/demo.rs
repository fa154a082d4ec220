/// Synthetic valley glacier run.
///
/// Usage: `demo [params.json]`. Without a parameter file the tracker runs in
/// 3-D mode with seeding every 5 years.
use std::error::Error;

use icetrack_core::diagnostics::TrackingSummary;
use icetrack_core::{GridGeometry, HostFields, ParticleTracker, TrackingConfig, TrackingMethod};
use ndarray::Array2;

const ROWS: usize = 20;
const COLS: usize = 60;
const DX: f64 = 100.0;
const YEARS: usize = 100;

/// Steady valley glacier flowing in +x, thinning toward the terminus.
struct Valley {
    uvelbase: Array2<f64>,
    uvelsurf: Array2<f64>,
    ubar: Array2<f64>,
    zero: Array2<f64>,
    thk: Array2<f64>,
    topg: Array2<f64>,
    usurf: Array2<f64>,
    smb: Array2<f64>,
}

impl Valley {
    fn new() -> Self {
        let shape = (ROWS, COLS);
        let centre = (ROWS as f64 - 1.0) / 2.0;
        // 0 at the head, 1 at the terminus
        let along = |c: usize| c as f64 / (COLS as f64 - 1.0);
        let across = |r: usize| ((r as f64 - centre) / centre).powi(2);

        let topg = Array2::from_shape_fn(shape, |(r, c)| 3000.0 - 1200.0 * along(c) + 300.0 * across(r));
        let thk = Array2::from_shape_fn(shape, |(r, c)| {
            (250.0 * (1.0 - along(c).powi(2)) * (1.0 - across(r))).max(0.0)
        });
        let usurf = &topg + &thk;
        let uvelsurf = thk.mapv(|h| 0.2 * h);
        let uvelbase = thk.mapv(|h| 0.05 * h);
        let ubar = 0.8 * &uvelsurf + 0.2 * &uvelbase;
        // equilibrium line at 40% of the valley length
        let smb = Array2::from_shape_fn(shape, |(_, c)| 2.0 - 5.0 * along(c));

        Self {
            uvelbase,
            uvelsurf,
            ubar,
            zero: Array2::zeros(shape),
            thk,
            topg,
            usurf,
            smb,
        }
    }

    fn fields(&self) -> HostFields<'_> {
        HostFields {
            uvelbase: self.uvelbase.view(),
            vvelbase: self.zero.view(),
            uvelsurf: self.uvelsurf.view(),
            vvelsurf: self.zero.view(),
            ubar: self.ubar.view(),
            vbar: self.zero.view(),
            thk: self.thk.view(),
            topg: self.topg.view(),
            usurf: self.usurf.view(),
            smb: self.smb.view(),
        }
    }
}

fn load_config() -> Result<TrackingConfig, Box<dyn Error>> {
    match std::env::args().nth(1) {
        Some(path) => Ok(TrackingConfig::from_json(&std::fs::read_to_string(path)?)?),
        None => Ok(TrackingConfig::new(TrackingMethod::ThreeD, 5.0, 0.25)?),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = load_config()?;
    let geometry = GridGeometry::regular(ROWS, COLS, DX, 0.0, 0.0)?;
    let valley = Valley::new();
    let fields = valley.fields();
    let mut tracker = ParticleTracker::new(config, geometry)?;

    println!(
        "Valley glacier, {}x{} grid, method {}, seeding every {} yr",
        ROWS, COLS, config.tracking_method, config.frequency_seeding
    );
    println!("======================================================================");
    println!(
        "{:>6} {:>7} {:>10} {:>9} {:>8} {:>12} {:>10}",
        "Year", "Seeded", "Particles", "Surface", "Surf %", "Mean englt", "Weight"
    );
    println!("----------------------------------------------------------------------");

    for year in 0..YEARS {
        let report = tracker.update(&fields, year as f64, 1.0)?;
        if year % 10 == 9 {
            let s = TrackingSummary::from_particles(tracker.particles());
            println!(
                "{:>6} {:>7} {:>10} {:>9} {:>8.1} {:>12.2} {:>10.1}",
                year + 1,
                report.seeded,
                s.n_particles,
                s.n_surface,
                100.0 * s.surface_fraction(),
                s.mean_englacial_time,
                tracker.weights().sum()
            );
        }
    }

    println!("======================================================================");
    println!("{}", tracker.finalize());
    Ok(())
}
