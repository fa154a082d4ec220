//! Population statistics for logging and reporting.
use std::fmt;

use crate::tracking::state::{is_surface, ParticleStore};

/// Snapshot of a particle population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackingSummary {
    pub n_particles: usize,
    /// Particles with `rhpos == 1`
    pub n_surface: usize,
    /// Sum of `wpos` over surface particles, equal to the sum of the weight grid
    pub total_surface_weight: f64,
    /// Mean englacial time over all particles [yr], 0 for an empty population
    pub mean_englacial_time: f64,
    /// Max englacial time [yr], 0 for an empty population
    pub max_englacial_time: f64,
}

impl TrackingSummary {
    pub fn from_particles(particles: &ParticleStore) -> Self {
        let n_particles = particles.len();
        let (n_surface, total_surface_weight) = particles
            .rhpos
            .iter()
            .zip(&particles.wpos)
            .filter(|&(&rh, _)| is_surface(rh))
            .fold((0usize, 0.0), |(n, w), (_, &wpos)| (n + 1, w + wpos));

        let mean_englacial_time = if n_particles == 0 {
            0.0
        } else {
            particles.englt.iter().sum::<f64>() / n_particles as f64
        };
        let max_englacial_time = particles.englt.iter().copied().fold(0.0, f64::max);

        Self {
            n_particles,
            n_surface,
            total_surface_weight,
            mean_englacial_time,
            max_englacial_time,
        }
    }

    /// Fraction of particles at the surface. Range: [0, 1], 0 if empty.
    pub fn surface_fraction(&self) -> f64 {
        if self.n_particles == 0 {
            0.0
        } else {
            self.n_surface as f64 / self.n_particles as f64
        }
    }
}

impl fmt::Display for TrackingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} particles, {} at surface ({:.0}%, weight {:.1}), englacial time mean {:.2} yr, max {:.2} yr",
            self.n_particles,
            self.n_surface,
            100.0 * self.surface_fraction(),
            self.total_surface_weight,
            self.mean_englacial_time,
            self.max_englacial_time
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::state::Particle;
    use approx::assert_relative_eq;

    fn particle(rhpos: f64, wpos: f64, englt: f64) -> Particle {
        Particle {
            xpos: 0.0,
            ypos: 0.0,
            zpos: 0.0,
            rhpos,
            wpos,
            tpos: 0.0,
            englt,
        }
    }

    #[test]
    fn empty_population() {
        let s = TrackingSummary::from_particles(&ParticleStore::new());
        assert_eq!(s.n_particles, 0);
        assert_eq!(s.n_surface, 0);
        assert_eq!(s.total_surface_weight, 0.0);
        assert_eq!(s.mean_englacial_time, 0.0);
        assert_eq!(s.max_englacial_time, 0.0);
        assert_eq!(s.surface_fraction(), 0.0);
    }

    #[test]
    fn known_values() {
        let store: ParticleStore = [
            particle(1.0, 2.0, 0.0),
            particle(0.5, 3.0, 10.0),
            particle(1.0, 1.5, 4.0),
            particle(0.0, 1.0, 2.0),
        ]
        .into_iter()
        .collect();
        let s = TrackingSummary::from_particles(&store);
        assert_eq!(s.n_particles, 4);
        assert_eq!(s.n_surface, 2);
        assert_relative_eq!(s.total_surface_weight, 3.5);
        assert_relative_eq!(s.mean_englacial_time, 4.0);
        assert_relative_eq!(s.max_englacial_time, 10.0);
        assert_relative_eq!(s.surface_fraction(), 0.5);
    }

    #[test]
    fn display_mentions_counts() {
        let store: ParticleStore = std::iter::once(particle(1.0, 1.0, 0.0)).collect();
        let text = TrackingSummary::from_particles(&store).to_string();
        assert!(text.starts_with("1 particles, 1 at surface (100%, weight 1.0)"));
    }
}
