/// Particle tracking numerical constants and model contract.
///
/// Centralises the fixed thresholds of the seeding policy and the vertical
/// velocity profile.

// -- Seeding policy --

/// Minimum ice thickness for a cell to receive new particles [m].
pub const MIN_SEED_THICKNESS: f64 = 10.0;

/// Minimum surface mass balance for a cell to receive new particles [m/yr].
/// Keeps seeding to the accumulation area and slightly below it.
pub const MIN_SEED_SMB: f64 = -2.0;

// -- Column geometry --

/// Columns at or below this thickness [m] are treated as ice-free: the
/// particle is put at the surface (`rhpos = 1`).
pub const MIN_COLUMN_THICKNESS: f64 = 0.1;

/// Exponent of the shape function `1 - (1 - rhpos)^n` that blends base and
/// surface velocity (shallow-ice profile for Glen's n = 3).
pub const SHAPE_EXPONENT: i32 = 4;

// -- Configuration defaults --

/// Default interval between seeding events [yr].
pub const DEFAULT_FREQUENCY_SEEDING: f64 = 10.0;

/// Default seeding density (fraction of grid nodes per axis).
pub const DEFAULT_DENSITY_SEEDING: f64 = 0.2;

// -- Model contract constants --

/// Particle column names in store order.
pub const PARTICLE_COLUMNS: &[&str] = &["xpos", "ypos", "zpos", "rhpos", "wpos", "tpos", "englt"];

/// Number of particle attributes.
pub const PARTICLE_SIZE: usize = 7;
