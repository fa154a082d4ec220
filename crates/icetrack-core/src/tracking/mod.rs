/// Lagrangian particle tracking through the host ice-flow fields.
///
/// Per timestep: conditional seeding, bilinear sampling of the host grids,
/// forward-Euler advection under the configured vertical model, deposition
/// weights and englacial time.
pub mod constants;
pub mod deposition;
pub mod outputs;
pub mod params;
pub mod processes;
pub mod run;
pub mod seeding;
pub mod state;
