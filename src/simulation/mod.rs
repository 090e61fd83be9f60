pub mod states;
pub mod params;
pub mod engine;
pub mod guidance;
pub mod forces;
pub mod integrator;
pub mod elements;
pub mod scenario;
