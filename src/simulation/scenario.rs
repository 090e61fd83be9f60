//! Build a fully-initialized simulation scenario from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle:
//! - numerical parameters (`Parameters`, step size validated and stored)
//! - system state (`GravModel` with bodies at t = 0, built in one pass)
//! - report settings carried through for the reporter
//!
//! All catalog validation happens here: root-body rules, state-form
//! exclusivity, guidance construction, and throttle-bound checks.

use crate::configuration::config::{
    BodyConfig, GuidanceConfig, ReportConfig, ScenarioConfig,
};
use crate::error::{SimError, SimResult};
use crate::simulation::elements::{state_from_elements, Elements};
use crate::simulation::engine::Engine;
use crate::simulation::guidance::{ConstantBurn, FixedBurn, Guidance, TimedBurn};
use crate::simulation::params::Parameters;
use crate::simulation::states::{BodySpec, GravModel, ModelBuilder, NVec3};

/// Runtime bundle for one simulation run.
#[derive(Debug)]
pub struct Scenario {
    pub parameters: Parameters,
    pub model: GravModel,
    pub report: ReportConfig,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> SimResult<Self> {
        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            t_end: p_cfg.t_end,
            dt: p_cfg.dt,
            sample_every: p_cfg.sample_every,
        };
        if !(parameters.t_end > 0.0) || !parameters.t_end.is_finite() {
            return Err(SimError::Configuration(format!(
                "t_end must be positive and finite, got {}",
                parameters.t_end
            )));
        }
        if parameters.sample_every == 0 {
            return Err(SimError::Configuration(
                "sample_every must be at least 1".into(),
            ));
        }

        // Root body: at most one; required whenever any entry is supplied
        // through orbital elements.
        let roots: Vec<&BodyConfig> = cfg.bodies.iter().filter(|b| b.root).collect();
        if roots.len() > 1 {
            return Err(SimError::Configuration(format!(
                "at most one root body allowed, found {}",
                roots.len()
            )));
        }
        let root = roots.first().copied();
        if root.is_none() && cfg.bodies.iter().any(|b| b.orbit.is_some()) {
            return Err(SimError::Configuration(
                "orbital elements require a root body".into(),
            ));
        }

        // The root's own state anchors every orbital-element conversion.
        let (root_velocity, root_position) = match root {
            Some(bc) => root_state(bc)?,
            None => (NVec3::zeros(), NVec3::zeros()),
        };

        // Bodies: map each BodyConfig -> BodySpec and register them all
        // before the arena is laid out.
        let mut builder = ModelBuilder::new();
        for bc in &cfg.bodies {
            let (velocity, position) = initial_state(bc, root_velocity, root_position)?;
            let guidance = match &bc.guidance {
                Some(gc) => Some(build_guidance(bc, gc)?),
                None => None,
            };

            builder = builder.with_body(BodySpec {
                id: bc.id.clone(),
                mass: bc.mass,
                fuel_mass: bc.fuel_mass,
                feather: bc.feather,
                powered: bc.powered,
                engine: bc.engine.as_ref().map(|ec| Engine {
                    j_relative: ec.j_relative,
                    flow_max: ec.flow_max,
                    flow_min: ec.flow_min,
                }),
                guidance,
                velocity,
                position,
            })?;
        }

        let mut model = builder.build();
        model.set_step(parameters.dt)?;

        tracing::info!(
            bodies = model.body_count(),
            t_end = parameters.t_end,
            dt = parameters.dt,
            "scenario built"
        );

        Ok(Self {
            parameters,
            model,
            report: cfg.report,
        })
    }
}

/// The root body's state. Always direct Cartesian; defaults to rest at the
/// origin when no state is given.
fn root_state(bc: &BodyConfig) -> SimResult<(NVec3, NVec3)> {
    if bc.orbit.is_some() {
        return Err(SimError::Configuration(format!(
            "root body {} cannot be supplied through orbital elements",
            bc.id
        )));
    }
    Ok((
        vec3(bc.velocity.unwrap_or([0.0; 3])),
        vec3(bc.position.unwrap_or([0.0; 3])),
    ))
}

/// Initial Cartesian state of one catalog entry: either the direct form or
/// the orbital-element form, never both.
fn initial_state(
    bc: &BodyConfig,
    root_velocity: NVec3,
    root_position: NVec3,
) -> SimResult<(NVec3, NVec3)> {
    match &bc.orbit {
        Some(orbit) => {
            if bc.velocity.is_some() || bc.position.is_some() {
                return Err(SimError::Configuration(format!(
                    "body {} carries both a direct state and orbital elements",
                    bc.id
                )));
            }
            if bc.root {
                return Err(SimError::Configuration(format!(
                    "root body {} cannot be supplied through orbital elements",
                    bc.id
                )));
            }
            let el = Elements {
                speed: orbit.speed,
                radius: orbit.radius,
                flight_path_angle: orbit.flight_path_angle,
                phase: orbit.phase,
                inclination: orbit.inclination,
            };
            Ok(state_from_elements(&el, root_velocity, root_position))
        }
        None => Ok((
            vec3(bc.velocity.unwrap_or([0.0; 3])),
            vec3(bc.position.unwrap_or([0.0; 3])),
        )),
    }
}

/// Construct the guidance strategy object for one body.
fn build_guidance(
    bc: &BodyConfig,
    gc: &GuidanceConfig,
) -> SimResult<Box<dyn Guidance + Send + Sync>> {
    let flow = match gc {
        GuidanceConfig::ConstantBurn { flow } => *flow,
        GuidanceConfig::TimedBurn { flow, .. } => *flow,
        GuidanceConfig::FixedBurn { flow, .. } => *flow,
    };
    if !(flow >= 0.0) || !flow.is_finite() {
        return Err(SimError::Configuration(format!(
            "body {} guidance flow must be non-negative, got {flow}",
            bc.id
        )));
    }

    // Throttle bounds are carried for guidance use, not enforced by the
    // force model; a configured flow outside them is only suspicious.
    if let Some(ec) = &bc.engine {
        if flow > 0.0 && (flow < ec.flow_min || flow > ec.flow_max) {
            tracing::warn!(
                body = %bc.id,
                flow,
                flow_min = ec.flow_min,
                flow_max = ec.flow_max,
                "guidance flow outside engine throttle bounds"
            );
        }
    }

    Ok(match gc {
        GuidanceConfig::ConstantBurn { flow } => Box::new(ConstantBurn { flow: *flow }),
        GuidanceConfig::TimedBurn {
            flow,
            ignition,
            cutoff,
        } => {
            if ignition >= cutoff {
                tracing::warn!(body = %bc.id, ignition, cutoff, "empty burn window");
            }
            Box::new(TimedBurn {
                flow: *flow,
                ignition: *ignition,
                cutoff: *cutoff,
            })
        }
        GuidanceConfig::FixedBurn {
            flow,
            ignition,
            cutoff,
            direction,
        } => Box::new(FixedBurn::new(
            *flow,
            *ignition,
            *cutoff,
            vec3(*direction),
        )?),
    })
}

fn vec3(a: [f64; 3]) -> NVec3 {
    NVec3::new(a[0], a[1], a[2])
}
