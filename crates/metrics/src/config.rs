use rand::{RngCore, SeedableRng};

/// Number of surface samples drawn from each mesh by the Chamfer and Hausdorff metrics.
pub const DEFAULT_SAMPLES: usize = 30_000;
/// Size of the Poisson-disk cloud the RMS metric builds over the reference mesh.
pub const DEFAULT_POISSON_SAMPLES: usize = 50_000;
/// The Poisson-disk sampler eliminates down from a uniform pool this many times larger.
pub const DEFAULT_POISSON_INIT_FACTOR: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsConfig {
    pub samples: usize,
    pub poisson_samples: usize,
    pub poisson_init_factor: usize,
    /// Seed for every random draw.
    ///
    /// Each mesh is sampled from its own generator seeded with this value, so
    /// two identical meshes receive identical samples. `None` draws from the
    /// thread-local generator and results vary from call to call.
    pub seed: Option<u64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLES,
            poisson_samples: DEFAULT_POISSON_SAMPLES,
            poisson_init_factor: DEFAULT_POISSON_INIT_FACTOR,
            seed: None,
        }
    }
}

impl MetricsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    #[must_use]
    pub fn with_poisson_samples(mut self, samples: usize) -> Self {
        self.poisson_samples = samples;
        self
    }

    #[must_use]
    pub fn with_poisson_init_factor(mut self, factor: usize) -> Self {
        self.poisson_init_factor = factor;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// A fresh random source for sampling one mesh.
    pub fn rng(&self) -> Box<dyn RngCore> {
        match self.seed {
            Some(seed) => Box::new(rand::rngs::StdRng::seed_from_u64(seed)),
            None => Box::new(rand::thread_rng()),
        }
    }
}
