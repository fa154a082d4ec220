/// Per-update report returned by the tracker.
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    /// Host model time of the update [yr]
    pub time: f64,
    /// Particles added by this update's seeding event, 0 if none was due
    pub seeded: usize,
    /// Particles tracked after the update
    pub n_particles: usize,
    /// Wall time spent in the update
    pub elapsed: Duration,
}
