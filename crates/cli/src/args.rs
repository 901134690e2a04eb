use std::path::PathBuf;

use clap::{Parser, Subcommand};
use meshdiff::{
    MetricsConfig, DEFAULT_POISSON_INIT_FACTOR, DEFAULT_POISSON_SAMPLES, DEFAULT_SAMPLES,
};

#[derive(clap::Args, Debug, Clone)]
pub struct CompareArgs {
    /// Reference mesh (STL).
    #[arg(default_value = "01.stl")]
    pub mesh_a: PathBuf,

    /// Mesh compared against the reference (STL).
    #[arg(default_value = "01_m.stl")]
    pub mesh_b: PathBuf,

    /// Surface samples drawn from each mesh for Chamfer and Hausdorff.
    #[arg(short, long, default_value_t = DEFAULT_SAMPLES)]
    pub samples: usize,

    /// Size of the Poisson-disk cloud built over mesh B for the RMS metric.
    #[arg(long, default_value_t = DEFAULT_POISSON_SAMPLES)]
    pub poisson_samples: usize,

    /// Uniform pool size, as a multiple of --poisson-samples, to eliminate from.
    #[arg(long, default_value_t = DEFAULT_POISSON_INIT_FACTOR)]
    pub init_factor: usize,

    /// Seed for reproducible sampling.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Load meshes as-is, without merging vertices or fixing winding.
    #[arg(long)]
    pub no_process: bool,
}

impl CompareArgs {
    pub fn config(&self) -> MetricsConfig {
        let config = MetricsConfig::new()
            .with_samples(self.samples)
            .with_poisson_samples(self.poisson_samples)
            .with_poisson_init_factor(self.init_factor);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compute every metric.
    All(CompareArgs),
    /// Mean nearest-neighbor distance between surface samples.
    Chamfer(CompareArgs),
    /// Worst-case nearest-neighbor distance between surface samples.
    Hausdorff(CompareArgs),
    /// RMS distance from the vertices of A to the surface of B.
    Rms(CompareArgs),
}
