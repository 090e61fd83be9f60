//! Relative-motion reporting over a snapshot sequence
//!
//! For each snapshot, computes per observed body the speed relative to a
//! reference body and the altitude above a fixed reference radius. A
//! default text renderer formats one line per snapshot; persistence is the
//! caller's job.

use crate::error::SimResult;
use crate::simulation::states::{GravModel, Snapshot};

/// Relative speed and altitude of one observed body at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Track {
    pub speed: f64, // m/s relative to the reference
    pub altitude_km: f64, // km above the reference radius
}

/// One report line: elapsed time plus one track per observed body, in the
/// order the observed ids were given.
#[derive(Debug, Clone, PartialEq)]
pub struct RelativeRecord {
    pub t: f64, // s
    pub tracks: Vec<Track>,
}

/// Compute relative-motion records, one per snapshot.
///
/// Fails with `NotFound` if the reference id or any observed id was never
/// registered; ids are resolved once, before any snapshot is read.
pub fn relative_motion(
    model: &GravModel,
    snapshots: &[Snapshot],
    reference: &str,
    observed: &[String],
    reference_radius: f64,
) -> SimResult<Vec<RelativeRecord>> {
    let reference_index = model.index_of(reference)?;
    let observed_indices = observed
        .iter()
        .map(|id| model.index_of(id))
        .collect::<SimResult<Vec<usize>>>()?;

    let mut records = Vec::with_capacity(snapshots.len());
    for snap in snapshots {
        let ref_velocity = snap.velocity(reference_index);
        let ref_position = snap.position(reference_index);

        let tracks = observed_indices
            .iter()
            .map(|&i| {
                let dv = snap.velocity(i) - ref_velocity;
                let dx = snap.position(i) - ref_position;
                Track {
                    speed: dv.norm(),
                    altitude_km: (dx.norm() - reference_radius) / 1.0e3,
                }
            })
            .collect();

        records.push(RelativeRecord {
            t: snap.t,
            tracks,
        });
    }

    Ok(records)
}

/// Default textual rendering, one line per record:
/// `t: <time>s | V: <speed> | H: <altitude_km> |` repeated per body.
pub fn render(records: &[RelativeRecord]) -> String {
    let mut out = String::new();
    for rec in records {
        out.push_str(&format!("t: {:.2}s", rec.t));
        for track in &rec.tracks {
            out.push_str(&format!(" | V: {:.5} | H: {:.2}", track.speed, track.altitude_km));
        }
        out.push_str(" |\n");
    }
    out
}
