//! Randomness behind the synthesized "previous price".

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

/// Percentages are drawn in millionths of a percent.
const PERCENT_SCALE: u32 = 6;
/// Lower bound (inclusive) of the markup, 10%.
const MIN_PERCENT_MICROS: i64 = 10_000_000;
/// Upper bound (exclusive) of the markup, 40%.
const MAX_PERCENT_MICROS: i64 = 40_000_000;

/// Source of markup percentages used to fake a pre-discount price.
pub trait DiscountSource: Send + Sync {
    /// A percentage uniformly drawn from `[10, 40)`.
    fn discount_percent(&self) -> Decimal;
}

fn draw<R: Rng + ?Sized>(rng: &mut R) -> Decimal {
    Decimal::new(
        rng.random_range(MIN_PERCENT_MICROS..MAX_PERCENT_MICROS),
        PERCENT_SCALE,
    )
}

/// Draws from the thread-local RNG. A different value on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngDiscount;

impl DiscountSource for ThreadRngDiscount {
    fn discount_percent(&self) -> Decimal {
        draw(&mut rand::rng())
    }
}

/// Draws from a seeded RNG, so a given seed always yields the same sequence.
#[derive(Debug)]
pub struct SeededDiscount {
    rng: Mutex<StdRng>,
}

impl SeededDiscount {
    /// Create a source whose sequence of draws is fixed by `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl DiscountSource for SeededDiscount {
    fn discount_percent(&self) -> Decimal {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        draw(&mut *rng)
    }
}
