//! Simulated sales feed.

use std::{
    collections::VecDeque,
    fmt::Debug,
    sync::{Mutex, PoisonError},
};

use jiff::Timestamp;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::domain::metrics::records::ProductMetricSample;

/// Units a simulated customer takes off the shelf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedSale {
    pub units_sold: u64,
}

/// Source of sales for products under promotion.
pub trait MetricsSimulator: Debug + Send + Sync {
    /// Propose a sale for `sample`. Never proposes more than its remaining
    /// stock; proposes zero when the product is sold out.
    fn generate_sale(&self, sample: &ProductMetricSample, now: Timestamp) -> SimulatedSale;
}

/// Uniformly random sales of between one and `max_units` units.
#[derive(Debug)]
pub struct RandomSimulator {
    max_units: u64,
    rng: Mutex<StdRng>,
}

impl RandomSimulator {
    pub const DEFAULT_MAX_UNITS: u64 = 25;

    #[must_use]
    pub fn new(max_units: u64) -> Self {
        Self {
            max_units,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reproducible sequence for a given seed.
    #[must_use]
    pub fn seeded(max_units: u64, seed: u64) -> Self {
        Self {
            max_units,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub const fn max_units(&self) -> u64 {
        self.max_units
    }
}

impl Default for RandomSimulator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_UNITS)
    }
}

impl MetricsSimulator for RandomSimulator {
    fn generate_sale(&self, sample: &ProductMetricSample, _now: Timestamp) -> SimulatedSale {
        let ceiling = self.max_units.min(sample.current_inventory);

        if ceiling == 0 {
            return SimulatedSale { units_sold: 0 };
        }

        let units_sold = self
            .rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .gen_range(1..=ceiling);

        SimulatedSale { units_sold }
    }
}

/// Replays a fixed list of unit counts, capped at remaining stock. Yields
/// zero once the list runs out.
#[derive(Debug, Default)]
pub struct ScriptedSimulator {
    script: Mutex<VecDeque<u64>>,
}

impl ScriptedSimulator {
    #[must_use]
    pub fn new(script: impl IntoIterator<Item = u64>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
        }
    }

    pub fn remaining(&self) -> usize {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl MetricsSimulator for ScriptedSimulator {
    fn generate_sale(&self, sample: &ProductMetricSample, _now: Timestamp) -> SimulatedSale {
        let next = self
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_default();

        SimulatedSale {
            units_sold: next.min(sample.current_inventory),
        }
    }
}
