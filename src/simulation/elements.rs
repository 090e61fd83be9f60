//! Orbital-element to Cartesian state conversion
//!
//! A body supplied as (speed, radius, flight-path angle, phase, inclination)
//! starts on the +Y axis of a local frame with its velocity in the local XY
//! plane, tilted up by the flight-path angle. The whole frame is then
//! rotated by phase and inclination and offset by the root body's state.

use nalgebra::Matrix3;

use crate::simulation::states::NVec3;

/// Orbital parameters relative to a root body. Angles in radians.
#[derive(Debug, Clone, Copy)]
pub struct Elements {
    pub speed: f64, // orbital speed, m/s
    pub radius: f64, // orbital radius, m
    pub flight_path_angle: f64, // velocity tilt above local horizontal
    pub phase: f64, // position along the orbit
    pub inclination: f64, // orbit plane tilt
}

/// Cartesian (velocity, position) for `el`, offset by the root body state.
pub fn state_from_elements(
    el: &Elements,
    root_velocity: NVec3,
    root_position: NVec3,
) -> (NVec3, NVec3) {
    let (sp, cp) = el.phase.sin_cos();
    let (si, ci) = el.inclination.sin_cos();
    let (sth, cth) = el.flight_path_angle.sin_cos();

    let rot = Matrix3::new(
        cp, sp * ci, sp * si, //
        -sp, cp * ci, cp * si, //
        0.0, -si, ci,
    );

    let local_velocity = NVec3::new(el.speed * cth, el.speed * sth, 0.0);
    let local_position = NVec3::new(0.0, el.radius, 0.0);

    (
        rot * local_velocity + root_velocity,
        rot * local_position + root_position,
    )
}
