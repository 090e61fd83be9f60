use std::time::Instant;

use crate::error::SimResult;
use crate::simulation::forces::derivatives;
use crate::simulation::integrator::rk4_integrate;
use crate::simulation::params::Parameters;
use crate::simulation::states::{BodySpec, GravModel, ModelBuilder, NVec3, STRIDE};

/// Build a deterministic n-body model; every `massive_stride`-th body is
/// massive, the rest are feathers. No rand needed.
fn make_model(n: usize, massive_stride: usize) -> SimResult<GravModel> {
    let mut builder = ModelBuilder::new();

    for i in 0..n {
        let i_f = i as f64;
        let position = NVec3::new(
            (i_f * 0.37).sin() * 1.0e8,
            (i_f * 0.13).cos() * 1.0e8,
            (i_f * 0.07).sin() * 1.0e8,
        );

        builder = builder.with_body(BodySpec {
            id: format!("body-{i}"),
            mass: 1.0e22,
            fuel_mass: 0.0,
            feather: i % massive_stride != 0,
            powered: false,
            engine: None,
            guidance: None,
            velocity: NVec3::zeros(),
            position,
        })?;
    }

    Ok(builder.build())
}

/// Time a single derivative evaluation for a range of body counts,
/// all-massive vs quarter-massive (the feather prune path).
pub fn bench_derivatives() -> SimResult<()> {
    let ns = [64, 128, 256, 512, 1024, 2048];

    for n in ns {
        let all = make_model(n, 1)?;
        let quarter = make_model(n, 4)?;
        let mut out = vec![0.0; n * STRIDE];

        // Warm up
        derivatives(all.meta(), all.coords(), &mut out, 0.0)?;
        out.fill(0.0);

        let t0 = Instant::now();
        derivatives(all.meta(), all.coords(), &mut out, 0.0)?;
        let dt_all = t0.elapsed().as_secs_f64();
        out.fill(0.0);

        let t1 = Instant::now();
        derivatives(quarter.meta(), quarter.coords(), &mut out, 0.0)?;
        let dt_quarter = t1.elapsed().as_secs_f64();
        out.fill(0.0);

        println!("N = {n:5}, all-massive = {dt_all:9.6} s, quarter-massive = {dt_quarter:9.6} s");
    }

    Ok(())
}

/// Time full RK4 steps (four derivative evaluations plus the fold) for a
/// range of body counts.
pub fn bench_rk4() -> SimResult<()> {
    let ns = [64, 128, 256, 512, 1024, 2048];
    let steps = 16_u64;

    for n in ns {
        let mut model = make_model(n, 4)?;
        model.set_step(1.0)?;

        let params = Parameters {
            t_end: steps as f64,
            dt: 1.0,
            sample_every: steps + 1, // no snapshots beyond the initial one
        };

        let t0 = Instant::now();
        rk4_integrate(&mut model, &params)?;
        let per_step = t0.elapsed().as_secs_f64() / steps as f64;

        println!("N = {n:5}, rk4 step = {per_step:9.6} s");
    }

    Ok(())
}
