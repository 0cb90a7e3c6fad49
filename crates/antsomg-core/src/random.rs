use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The three random draws a move needs.
///
/// Injected into [`Graph::make_move`](crate::graph::Graph::make_move) so tests
/// can script the exact outcome of every draw.
pub trait RandomSource {
    /// `true` with probability `p` (already validated to lie in `[0, 1]`).
    fn chance(&mut self, p: f64) -> bool;

    /// Uniform index in `0..len` (`len > 0`).
    fn pick(&mut self, len: usize) -> usize;

    /// Uniform value in `[0, upper)`.
    fn uniform(&mut self, upper: f64) -> f64;
}

/// [`RandomSource`] backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl RngSource<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }

    /// Seeded when `seed` is given, entropy-seeded otherwise.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn chance(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    fn pick(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }

    fn uniform(&mut self, upper: f64) -> f64 {
        self.0.gen::<f64>() * upper
    }
}
