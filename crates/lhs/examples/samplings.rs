use env_logger::{Builder, Env};
use lhsbox::{DimensionSpec, Lhs, LhsKind, Random, SamplingMethod};
use ndarray::Axis;

fn main() -> anyhow::Result<()> {
    Builder::from_env(Env::default().default_filter_or("info")).init();

    let dims = [
        DimensionSpec::uniform(0., 1.),
        DimensionSpec::normal(-10., 2.),
        DimensionSpec::triangular(5., 7., 15.),
    ];
    let n = 10;

    println!("Take {n} samples of");
    for dim in &dims {
        println!("  {dim:?}");
    }
    println!();

    println!("*** using random sampling");
    let samples = Random::new(&dims)?.sample(n)?;
    println!("{samples}\n");

    println!("*** using centered latin hypercube sampling");
    let samples = Lhs::new(&dims)?.kind(LhsKind::Centered).sample(n)?;
    println!("{samples}\n");

    println!("*** using maximin latin hypercube sampling");
    let samples = Lhs::new(&dims)?.kind(LhsKind::Maximin).sample(n)?;
    println!("{samples}\n");

    println!("*** using classic latin hypercube sampling");
    let design = Lhs::new(&dims)?.design(n)?;
    println!("{}\n", design.samples());
    println!("strata:\n{}\n", design.strata());
    println!("means: {}", design.samples().mean_axis(Axis(0)).unwrap_or_default());
    Ok(())
}
