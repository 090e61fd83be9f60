pub mod simulation;
pub mod configuration;
pub mod report;
pub mod geometry;
pub mod benchmark;
pub mod error;

pub use simulation::states::{BodyMeta, BodySpec, GravModel, ModelBuilder, NVec3, Snapshot, MAX_BODIES, STRIDE};
pub use simulation::engine::Engine;
pub use simulation::guidance::{ConstantBurn, FixedBurn, Guidance, TimedBurn};
pub use simulation::forces::{derivatives, G0};
pub use simulation::integrator::rk4_integrate;
pub use simulation::params::Parameters;
pub use simulation::elements::{state_from_elements, Elements};
pub use simulation::scenario::Scenario;

pub use configuration::config::{BodyConfig, EngineConfig, GuidanceConfig, OrbitConfig, ParametersConfig, ReportConfig, ScenarioConfig};

pub use report::relative::{relative_motion, render, RelativeRecord, Track};

pub use geometry::frames::{signed_angle, Line, LocalFrame, Plane};

pub use benchmark::benchmark::{bench_derivatives, bench_rk4};

pub use error::{SimError, SimResult};
