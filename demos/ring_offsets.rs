//! Demonstration of jittered ring sampling

use rust_sphere_sampler::*;

fn main() -> Result<()> {
    env_logger::init();

    let config = RingSamplerConfigBuilder::new().count(8)?.build()?;
    let mut sampler = RingSampler::new(config);
    sampler.sample();

    println!("Ring offsets (spacing {:.4} rad):", config.spacing());
    for (k, p) in sampler.points().iter().enumerate() {
        println!("  {}: ({:+.5}, {:+.5}) angle {:.4}", k, p.x, p.y, p.y.atan2(p.x));
    }

    let table = JitterTable::from_ring(&sampler)?;
    for (k, texel) in table.texels().iter().enumerate() {
        println!("  texel {}: {:?}", k, texel);
    }

    Ok(())
}
