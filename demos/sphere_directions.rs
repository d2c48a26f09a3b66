//! Demonstration of sphere sampling and lookup-table packing
//!
//! Run with `RUST_LOG=debug` to see per-pass energies.

use rust_sphere_sampler::*;

fn main() -> Result<()> {
    env_logger::init();

    let config = SphereSamplerConfigBuilder::new()
        .site_count(32)?
        .capacity(128)?
        .max_passes(500)?
        .build()?;

    println!("Sampling {} directions from {} points...", config.site_count, config.point_count());

    let mut sampler = SphereSampler::new(config);
    let report = sampler.sample();

    println!("Passes: {} ({:?})", report.passes, report.termination);
    println!("Energy: {:.4} -> {:.4}", report.initial_energy, report.energy);

    println!("\nFirst directions:");
    for (id, site) in sampler.sites().iter().enumerate().take(8) {
        let d = site.representative();
        println!(
            "  Site {}: ({:+.4}, {:+.4}, {:+.4}), cap radius {:.4}",
            id,
            d.x,
            d.y,
            d.z,
            site.max_radius()
        );
    }

    // Closest pair of directions: a rough uniformity check
    let reps = sampler.representatives();
    let mut closest = std::f64::consts::PI;
    for i in 0..reps.len() {
        for j in (i + 1)..reps.len() {
            closest = closest.min(angular_distance(reps[i].normalize(), reps[j].normalize()));
        }
    }
    println!("\nSmallest angle between directions: {:.4} rad", closest);

    #[cfg(feature = "spatial-index")]
    {
        let index = sampler.site_index()?;
        let probe = DVec3::new(0.0, 1.0, 0.0);
        println!("Direction {:?} falls in site {}", probe, index.find_nearest(probe));
    }

    let table = JitterTable::from_sphere(&sampler)?;
    println!("Packed {} texels ({} bytes)", table.len(), table.to_le_bytes().len());

    Ok(())
}
