//! # Delivery Estimate
//!
//! The "ready in N min" text shown on the cart page and carried through
//! checkout to the confirmation view.

use rand::Rng;
use std::fmt;
use std::ops::Range;

/// Default window for estimates: 20 to 34 minutes inclusive.
pub const DEFAULT_ETA_MINUTES: Range<u32> = 20..35;

/// A delivery estimate in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryEstimate {
    minutes: u32,
}

impl DeliveryEstimate {
    pub const fn from_minutes(minutes: u32) -> Self {
        DeliveryEstimate { minutes }
    }

    /// Draws an estimate uniformly from `window`.
    ///
    /// An empty window collapses to its start.
    pub fn sample<R: Rng>(rng: &mut R, window: Range<u32>) -> Self {
        if window.is_empty() {
            return DeliveryEstimate::from_minutes(window.start);
        }
        DeliveryEstimate::from_minutes(rng.random_range(window))
    }

    pub const fn minutes(&self) -> u32 {
        self.minutes
    }
}

/// `"27 min"`
impl fmt::Display for DeliveryEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min", self.minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sample_stays_in_window() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let eta = DeliveryEstimate::sample(&mut rng, DEFAULT_ETA_MINUTES);
            assert!((20..35).contains(&eta.minutes()));
        }
    }

    #[test]
    fn test_sample_is_deterministic_for_seed() {
        let a = DeliveryEstimate::sample(&mut StdRng::seed_from_u64(42), DEFAULT_ETA_MINUTES);
        let b = DeliveryEstimate::sample(&mut StdRng::seed_from_u64(42), DEFAULT_ETA_MINUTES);
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_window() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(DeliveryEstimate::sample(&mut rng, 30..30).minutes(), 30);
    }

    #[test]
    fn test_display() {
        assert_eq!(DeliveryEstimate::from_minutes(27).to_string(), "27 min");
    }
}
