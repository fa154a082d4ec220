/// Pure Rust core benchmarks for the particle tracker.
///
/// Uses std::time::Instant for timing, a deterministic LCG PRNG for data generation,
/// and std::hint::black_box to prevent dead-code elimination.
use std::hint::black_box;
use std::time::{Duration, Instant};

use icetrack_core::{GridGeometry, HostFields, ParticleTracker, TrackingConfig, TrackingMethod};
use ndarray::Array2;

const REPEATS: usize = 7;
const STEPS: usize = 20;
const DX: f64 = 100.0;

/// Host grids of a synthetic ice cap with LCG noise on the velocities.
struct Glacier {
    uvelbase: Array2<f64>,
    vvelbase: Array2<f64>,
    uvelsurf: Array2<f64>,
    vvelsurf: Array2<f64>,
    ubar: Array2<f64>,
    vbar: Array2<f64>,
    thk: Array2<f64>,
    topg: Array2<f64>,
    usurf: Array2<f64>,
    smb: Array2<f64>,
}

impl Glacier {
    /// Simple LCG PRNG for deterministic data generation.
    fn make(n: usize, seed: u64) -> Self {
        let mut state = seed;
        let mut next_f64 = || -> f64 {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (state >> 33) as f64 / (1u64 << 31) as f64
        };

        let shape = (n, n);
        let centre = (n as f64 - 1.0) / 2.0;
        let radius = |(r, c): (usize, usize)| {
            let (dr, dc) = (r as f64 - centre, c as f64 - centre);
            (dr * dr + dc * dc).sqrt() / centre.max(1.0)
        };

        let topg = Array2::from_shape_fn(shape, |rc| 2000.0 - 500.0 * radius(rc));
        let thk = Array2::from_shape_fn(shape, |rc| (400.0 * (1.0 - radius(rc) * radius(rc))).max(0.0));
        let usurf = &topg + &thk;
        let smb = Array2::from_shape_fn(shape, |rc| 2.0 - 6.0 * radius(rc));

        // radial outflow with noise
        let mut radial = |(r, c): (usize, usize), scale: f64| {
            let (dr, dc) = (r as f64 - centre, c as f64 - centre);
            let norm = (dr * dr + dc * dc).sqrt().max(1.0);
            let speed = scale * (1.0 + 0.2 * next_f64());
            (speed * dc / norm, speed * dr / norm)
        };
        let base: Vec<(f64, f64)> = (0..n * n).map(|k| radial((k / n, k % n), 5.0)).collect();
        let surf: Vec<(f64, f64)> = (0..n * n).map(|k| radial((k / n, k % n), 25.0)).collect();
        let at = |v: &[(f64, f64)], pick: fn(&(f64, f64)) -> f64| {
            Array2::from_shape_fn(shape, |(r, c)| pick(&v[r * n + c]))
        };

        let uvelbase = at(&base, |p| p.0);
        let vvelbase = at(&base, |p| p.1);
        let uvelsurf = at(&surf, |p| p.0);
        let vvelsurf = at(&surf, |p| p.1);
        let ubar = 0.8 * &uvelsurf + 0.2 * &uvelbase;
        let vbar = 0.8 * &vvelsurf + 0.2 * &vvelbase;

        Self {
            uvelbase,
            vvelbase,
            uvelsurf,
            vvelsurf,
            ubar,
            vbar,
            thk,
            topg,
            usurf,
            smb,
        }
    }

    fn fields(&self) -> HostFields<'_> {
        HostFields {
            uvelbase: self.uvelbase.view(),
            vvelbase: self.vvelbase.view(),
            uvelsurf: self.uvelsurf.view(),
            vvelsurf: self.vvelsurf.view(),
            ubar: self.ubar.view(),
            vbar: self.vbar.view(),
            thk: self.thk.view(),
            topg: self.topg.view(),
            usurf: self.usurf.view(),
            smb: self.smb.view(),
        }
    }
}

/// Run a closure `REPEATS` times, return the median duration.
fn median_time<F: FnMut()>(mut f: F) -> Duration {
    let mut times: Vec<Duration> = (0..REPEATS)
        .map(|_| {
            let start = Instant::now();
            f();
            start.elapsed()
        })
        .collect();
    times.sort();
    times[REPEATS / 2]
}

/// Fresh tracker run for `STEPS` yearly updates, seeding every 2 years.
fn run(method: TrackingMethod, glacier: &Glacier, n: usize) -> usize {
    let Ok(config) = TrackingConfig::new(method, 2.0, 0.25) else {
        return 0;
    };
    let Ok(geometry) = GridGeometry::regular(n, n, DX, 0.0, 0.0) else {
        return 0;
    };
    let Ok(mut tracker) = ParticleTracker::new(config, geometry) else {
        return 0;
    };
    let fields = glacier.fields();
    for step in 0..STEPS {
        if tracker.update(&fields, step as f64, 1.0).is_err() {
            return 0;
        }
    }
    tracker.particles().len()
}

fn bench_method(method: TrackingMethod, sizes: &[usize]) -> Vec<(TrackingMethod, usize, usize, Duration)> {
    let mut results = Vec::new();

    for &n in sizes {
        let glacier = Glacier::make(n, 42);

        // Warmup
        let particles = black_box(run(method, &glacier, n));

        let dur = median_time(|| {
            black_box(run(method, &glacier, n));
        });
        results.push((method, n, particles, dur));
    }
    results
}

fn main() {
    env_logger::init();

    println!("Pure Rust Core Benchmarks ({STEPS} updates per run)");
    println!("============================================================");
    println!("{:<8} {:>6} {:>10}   {:>12}", "Method", "Grid", "Particles", "Median (ms)");
    println!("--------------------------------------------");

    let mut all_results = Vec::new();

    all_results.extend(bench_method(TrackingMethod::Simple, &[50, 100, 200]));
    all_results.extend(bench_method(TrackingMethod::ThreeD, &[50, 100, 200]));

    for (method, n, particles, dur) in &all_results {
        let ms = dur.as_secs_f64() * 1000.0;
        println!("{:<8} {:>6} {:>10}      {:>8.2}", method, n, particles, ms);
    }

    println!("============================================================");
}
