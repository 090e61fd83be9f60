//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`ParametersConfig`] – numerical parameters (duration, step, cadence)
//! - [`ReportConfig`]     – relative-motion report settings
//! - [`BodyConfig`]       – catalog entry for each body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example scenario YAML matching these types:
//!
//! ```yaml
//! parameters:
//!   t_end: 50000.0          # total simulation time, s
//!   dt: 1.0                 # fixed step size, s
//!   sample_every: 5000      # snapshot every N completed steps
//!
//! report:
//!   reference: earth        # body all motion is reported relative to
//!   observed: [gagarin]     # bodies to report
//!   reference_radius: 6.3711e6   # m, subtracted before km scaling
//!
//! bodies:
//!   - id: earth
//!     mass: 5.972e24
//!     root: true            # anchors orbital-element entries
//!   - id: gagarin
//!     mass: 4725.0
//!     fuel_mass: 2000.0
//!     feather: true         # receives gravity, generates none
//!     powered: true
//!     engine: { j_relative: 3015.0, flow_max: 0.5, flow_min: 0.1 }
//!     guidance: { strategy: timed_burn, flow: 0.3, ignition: 100.0, cutoff: 200.0 }
//!     velocity: [7818.067, 0.0, 0.0]
//!     position: [0.0, 6.5211e6, 0.0]
//!   - id: moon
//!     mass: 7.35e22
//!     orbit: { speed: 1018.0, radius: 3.84e8 }   # relative to the root
//! ```
//!
//! The scenario builder maps this configuration into the runtime model and
//! validates it; these types stay dumb on purpose.

use serde::Deserialize;

/// Guidance strategy selection for one powered body.
/// `strategy: constant_burn`, `timed_burn`, or `fixed_burn`.
#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum GuidanceConfig {
    /// Always burning, thrust along the current velocity.
    ConstantBurn { flow: f64 },

    /// Burning strictly inside (ignition, cutoff), thrust prograde.
    TimedBurn { flow: f64, ignition: f64, cutoff: f64 },

    /// Burning inside a window along a fixed inertial direction.
    FixedBurn {
        flow: f64,
        ignition: f64,
        cutoff: f64,
        direction: [f64; 3],
    },
}

/// Engine parameters for a powered body.
#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    pub j_relative: f64, // effective exhaust velocity, m/s
    pub flow_max: f64,   // throttle upper bound, kg/s
    pub flow_min: f64,   // throttle lower bound, kg/s
}

/// Orbital parameters relative to the root body. Angles in radians.
#[derive(Deserialize, Debug, Clone)]
pub struct OrbitConfig {
    pub speed: f64,  // orbital speed, m/s
    pub radius: f64, // orbital radius, m
    #[serde(default)]
    pub flight_path_angle: f64, // velocity tilt above local horizontal
    #[serde(default)]
    pub phase: f64, // position along the orbit
    #[serde(default)]
    pub inclination: f64, // orbit plane tilt
}

/// Global numerical parameters for a scenario.
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub t_end: f64,        // total duration, s
    pub dt: f64,           // fixed step size, s
    pub sample_every: u64, // snapshot every N completed steps
}

/// Relative-motion report settings.
#[derive(Deserialize, Debug, Clone)]
pub struct ReportConfig {
    pub reference: String,     // body id all motion is relative to
    pub observed: Vec<String>, // body ids to report, in output order
    pub reference_radius: f64, // m, subtracted from separation before km scaling
}

/// Catalog entry for a single body's identity, flags, and initial state.
/// At most one of direct state (`velocity`/`position`) or `orbit` may be
/// given; a body that omits both starts at rest at the origin.
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub id: String,
    pub mass: f64, // wet mass, kg
    #[serde(default)]
    pub fuel_mass: f64, // kg, dry mass = mass - fuel_mass
    #[serde(default)]
    pub feather: bool, // massless for force generation
    #[serde(default)]
    pub powered: bool, // consumes propellant to thrust
    #[serde(default)]
    pub root: bool, // anchors orbital-element entries
    pub engine: Option<EngineConfig>,
    pub guidance: Option<GuidanceConfig>,
    pub velocity: Option<[f64; 3]>, // m/s
    pub position: Option<[f64; 3]>, // m
    pub orbit: Option<OrbitConfig>,
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug)]
pub struct ScenarioConfig {
    pub parameters: ParametersConfig, // numerical parameters
    pub report: ReportConfig,         // relative-motion report settings
    pub bodies: Vec<BodyConfig>,      // catalog defining the initial system
}

impl ScenarioConfig {
    /// Load a scenario from a YAML file.
    pub fn from_path(path: &std::path::Path) -> crate::error::SimResult<Self> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_yaml::from_reader(reader)?)
    }
}
