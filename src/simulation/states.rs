//! Core state types for the N-body simulation.
//!
//! Defines the body registration types and the state store:
//! - `BodySpec`     everything needed to register one body
//! - `BodyMeta`     static per-body metadata kept for the run
//! - `ModelBuilder` collects specs, then lays out the arena once
//! - `GravModel`    flat state buffer plus metadata and step coefficients
//! - `Snapshot`     immutable full-state copy at one instant
//!
//! State is a single flat `f64` buffer, `STRIDE` scalars per body in the
//! order VX VY VZ X Y Z M. A body's index is assigned at registration and
//! stays stable for the whole run.

use std::fmt;

use nalgebra::Vector3;

use crate::error::{SimError, SimResult};
use crate::simulation::engine::Engine;
use crate::simulation::guidance::Guidance;

pub type NVec3 = Vector3<f64>;

/// Scalars per body in the flat layout (3 velocity + 3 position + 1 mass).
pub const STRIDE: usize = 7;

/// Hard cap on registered bodies.
pub const MAX_BODIES: usize = 2048;

/// Everything needed to register one body.
pub struct BodySpec {
    pub id: String,
    pub mass: f64, // wet mass, kg
    pub fuel_mass: f64, // kg; dry mass = mass - fuel_mass
    pub feather: bool, // massless for force generation
    pub powered: bool, // consumes propellant to thrust
    pub engine: Option<Engine>,
    pub guidance: Option<Box<dyn Guidance + Send + Sync>>,
    pub velocity: NVec3, // m/s
    pub position: NVec3, // m
}

/// Guidance is a trait object, so it is reported by presence only.
impl fmt::Debug for BodySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BodySpec")
            .field("id", &self.id)
            .field("mass", &self.mass)
            .field("fuel_mass", &self.fuel_mass)
            .field("feather", &self.feather)
            .field("powered", &self.powered)
            .field("engine", &self.engine)
            .field("guidance", &self.guidance.as_ref().map(|_| "<dyn Guidance>"))
            .field("velocity", &self.velocity)
            .field("position", &self.position)
            .finish()
    }
}

/// Static per-body metadata; the mutable state lives in the flat buffer.
pub struct BodyMeta {
    pub id: String,
    pub feather: bool,
    pub powered: bool,
    pub dry_mass: f64, // kg, minimum reachable mass
    pub engine: Option<Engine>,
    pub guidance: Option<Box<dyn Guidance + Send + Sync>>,
}

/// Guidance is a trait object, so it is reported by presence only.
impl fmt::Debug for BodyMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BodyMeta")
            .field("id", &self.id)
            .field("feather", &self.feather)
            .field("powered", &self.powered)
            .field("dry_mass", &self.dry_mass)
            .field("engine", &self.engine)
            .field("guidance", &self.guidance.as_ref().map(|_| "<dyn Guidance>"))
            .finish()
    }
}

/// Immutable copy of the full system state at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub t: f64, // s
    pub coords: Vec<f64>, // body_count * STRIDE scalars
}

impl Snapshot {
    pub fn body_count(&self) -> usize {
        self.coords.len() / STRIDE
    }

    pub fn velocity(&self, index: usize) -> NVec3 {
        let k = index * STRIDE;
        NVec3::new(self.coords[k], self.coords[k + 1], self.coords[k + 2])
    }

    pub fn position(&self, index: usize) -> NVec3 {
        let k = index * STRIDE;
        NVec3::new(self.coords[k + 3], self.coords[k + 4], self.coords[k + 5])
    }

    pub fn mass(&self, index: usize) -> f64 {
        self.coords[index * STRIDE + 6]
    }
}

/// Collects body specs during setup; the state arena is laid out once, in
/// `build`, when the final body count is known.
#[derive(Debug)]
pub struct ModelBuilder {
    specs: Vec<BodySpec>,
}

impl ModelBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self { specs: Vec::new() }
    }

    /// Register one body at the next free index.
    ///
    /// Fails if the capacity would be exceeded, on a duplicate id, or on an
    /// inconsistent spec (bad masses, powered without engine and guidance).
    pub fn with_body(mut self, spec: BodySpec) -> SimResult<Self> {
        if self.specs.len() >= MAX_BODIES {
            return Err(SimError::Configuration(format!(
                "body capacity exceeded: at most {MAX_BODIES} bodies"
            )));
        }
        if self.specs.iter().any(|s| s.id == spec.id) {
            return Err(SimError::Configuration(format!(
                "duplicate body id: {}",
                spec.id
            )));
        }
        if !(spec.mass > 0.0) || !spec.mass.is_finite() {
            return Err(SimError::Configuration(format!(
                "body {} has non-positive mass {}",
                spec.id, spec.mass
            )));
        }
        if !(0.0..=spec.mass).contains(&spec.fuel_mass) {
            return Err(SimError::Configuration(format!(
                "body {} fuel mass {} outside [0, {}]",
                spec.id, spec.fuel_mass, spec.mass
            )));
        }
        if spec.powered && (spec.engine.is_none() || spec.guidance.is_none()) {
            return Err(SimError::Configuration(format!(
                "powered body {} needs both engine and guidance",
                spec.id
            )));
        }
        self.specs.push(spec);
        Ok(self)
    }

    pub fn body_count(&self) -> usize {
        self.specs.len()
    }

    /// Lay out the fixed-size state arena and hand over the metadata.
    pub fn build(self) -> GravModel {
        let mut meta = Vec::with_capacity(self.specs.len());
        let mut coords = Vec::with_capacity(self.specs.len() * STRIDE);

        for spec in self.specs {
            coords.extend_from_slice(&[
                spec.velocity.x,
                spec.velocity.y,
                spec.velocity.z,
                spec.position.x,
                spec.position.y,
                spec.position.z,
                spec.mass,
            ]);
            meta.push(BodyMeta {
                id: spec.id,
                feather: spec.feather,
                powered: spec.powered,
                dry_mass: spec.mass - spec.fuel_mass,
                engine: spec.engine,
                guidance: spec.guidance,
            });
        }

        GravModel {
            meta,
            coords,
            dt: 0.0,
            dt_half: 0.0,
            dt_sixth: 0.0,
        }
    }
}

/// The state store: authoritative flat state buffer, per-body metadata, and
/// the step coefficients used by every RK4 sub-step.
#[derive(Debug)]
pub struct GravModel {
    meta: Vec<BodyMeta>,
    coords: Vec<f64>, // body_count * STRIDE, layout per `STRIDE`
    dt: f64, // s, 0.0 until set_step is called
    dt_half: f64,
    dt_sixth: f64,
}

impl GravModel {
    pub fn body_count(&self) -> usize {
        self.meta.len()
    }

    pub fn meta(&self) -> &[BodyMeta] {
        &self.meta
    }

    pub fn coords(&self) -> &[f64] {
        &self.coords
    }

    pub fn coords_mut(&mut self) -> &mut [f64] {
        &mut self.coords
    }

    /// Store the fixed step size and its derived coefficients.
    pub fn set_step(&mut self, dt: f64) -> SimResult<()> {
        if !(dt > 0.0) || !dt.is_finite() {
            return Err(SimError::Configuration(format!(
                "step size must be positive and finite, got {dt}"
            )));
        }
        self.dt = dt;
        self.dt_half = 0.5 * dt;
        self.dt_sixth = dt / 6.0;
        Ok(())
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn dt_half(&self) -> f64 {
        self.dt_half
    }

    pub fn dt_sixth(&self) -> f64 {
        self.dt_sixth
    }

    /// Registry lookup: id to body index. Never falls back to a bogus index.
    pub fn index_of(&self, id: &str) -> SimResult<usize> {
        self.meta
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| SimError::NotFound(id.to_string()))
    }

    pub fn velocity(&self, index: usize) -> NVec3 {
        let k = index * STRIDE;
        NVec3::new(self.coords[k], self.coords[k + 1], self.coords[k + 2])
    }

    pub fn position(&self, index: usize) -> NVec3 {
        let k = index * STRIDE;
        NVec3::new(self.coords[k + 3], self.coords[k + 4], self.coords[k + 5])
    }

    pub fn mass(&self, index: usize) -> f64 {
        self.coords[index * STRIDE + 6]
    }

    /// Copy the full current state into an immutable snapshot.
    pub fn snapshot(&self, t: f64) -> Snapshot {
        Snapshot {
            t,
            coords: self.coords.clone(),
        }
    }

    /// Keep powered bodies at or above dry mass. Called by the integrator
    /// after each fold; the final burn step can overshoot slightly.
    pub fn enforce_dry_mass(&mut self) {
        for (i, m) in self.meta.iter().enumerate() {
            if m.powered {
                let slot = i * STRIDE + 6;
                if self.coords[slot] < m.dry_mass {
                    self.coords[slot] = m.dry_mass;
                }
            }
        }
    }
}
