//! State-derivative evaluation for the n-body engine
//!
//! `derivatives` computes the time-derivative of every body's 7-scalar
//! state and adds it into the caller's accumulator: pairwise Newtonian
//! gravity into the velocity slots, current velocity copied into the
//! position slots, and thrust plus mass drain for powered bodies.
//!
//! The caller guarantees the accumulator is zeroed on entry; this routine
//! only accumulates and never resets anything.

use crate::error::{SimError, SimResult};
use crate::simulation::states::{BodyMeta, NVec3, STRIDE};

/// Gravitational constant, m^3 kg^-1 s^-2.
pub const G0: f64 = 6.6743e-11;

/// Separations below this are treated as numerically singular, m.
pub const MIN_SEPARATION: f64 = 1e-6;

/// Add the state derivative at time `t` into `out`.
///
/// `data` is a full state buffer (authoritative or trial), `out` a zeroed
/// buffer of the same length. Masses are read from `data`, so propellant
/// drain feeds back into both gravity and thrust within a step.
pub fn derivatives(meta: &[BodyMeta], data: &[f64], out: &mut [f64], t: f64) -> SimResult<()> {
    let n = meta.len();

    for i in 0..n {
        let i0 = i * STRIDE;
        let xi = NVec3::new(data[i0 + 3], data[i0 + 4], data[i0 + 5]); // position of body i
        let mi = data[i0 + 6]; // current mass of body i

        // Unordered pairs (i, j) with i < j. Only non-feather bodies
        // generate gravity; every body may receive it. A pair of feathers
        // contributes nothing, so it is skipped before any geometry.
        for j in (i + 1)..n {
            if meta[i].feather && meta[j].feather {
                continue;
            }

            let j0 = j * STRIDE;
            let xj = NVec3::new(data[j0 + 3], data[j0 + 4], data[j0 + 5]);
            let mj = data[j0 + 6];

            // r points from j to i; i is pulled along -r, j along +r
            let r = xi - xj;
            let dist = r.norm();
            if dist < MIN_SEPARATION {
                return Err(SimError::Numerical {
                    t,
                    reason: format!(
                        "bodies {} and {} within {dist:e} m of each other",
                        meta[i].id, meta[j].id
                    ),
                });
            }

            // g = G / |r|^3
            let g = G0 / (dist * dist * dist);

            if !meta[j].feather {
                let a = g * mj;
                out[i0] -= a * r.x;
                out[i0 + 1] -= a * r.y;
                out[i0 + 2] -= a * r.z;
            }
            if !meta[i].feather {
                let a = g * mi;
                out[j0] += a * r.x;
                out[j0 + 1] += a * r.y;
                out[j0 + 2] += a * r.z;
            }
        }

        // Position derivative is the current velocity. These slots are
        // written by this rule alone, so the store is a plain copy.
        out[i0 + 3] = data[i0];
        out[i0 + 4] = data[i0 + 1];
        out[i0 + 5] = data[i0 + 2];

        thrust(i, &meta[i], data, out, t)?;
    }

    Ok(())
}

/// Thrust and mass-drain contribution of one powered body.
///
/// Active only while the current mass exceeds dry mass and the guidance
/// reports a positive flow; otherwise the mass-derivative slot keeps its
/// gravity-only value of zero.
fn thrust(i: usize, meta: &BodyMeta, data: &[f64], out: &mut [f64], t: f64) -> SimResult<()> {
    if !meta.powered {
        return Ok(());
    }

    let i0 = i * STRIDE;
    let mass = data[i0 + 6];
    if mass <= meta.dry_mass {
        return Ok(()); // burnout
    }

    let (Some(engine), Some(guidance)) = (&meta.engine, &meta.guidance) else {
        return Ok(()); // unreachable for models built through ModelBuilder
    };

    let flow = guidance.mass_flow(t)?;
    if flow <= 0.0 {
        return Ok(());
    }

    let accel = engine.j_relative * flow / mass;
    let dir = guidance.thrust_direction(data, i0, t)?;

    out[i0] += accel * dir.x;
    out[i0 + 1] += accel * dir.y;
    out[i0 + 2] += accel * dir.z;
    out[i0 + 6] = -flow; // propellant drain

    Ok(())
}
