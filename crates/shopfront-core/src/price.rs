//! Price type for catalog entries and cart totals.
//!
//! Uses an integer representation to avoid floating-point precision
//! issues in monetary sums. Catalog products carry `Option<Price>`;
//! `None` marks a price-less product that is displayed but never
//! purchasable.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An integer price in the store's single display currency.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// The zero price.
    pub const ZERO: Self = Price(0);

    /// Create a price from a raw amount.
    pub fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// Get the raw amount.
    pub fn amount(&self) -> u64 {
        self.0
    }

    /// Checked addition, `None` on overflow.
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Saturating addition.
    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Sum an iterator of prices. Saturates at `u64::MAX`.
    pub fn sum(prices: impl Iterator<Item = Price>) -> Self {
        prices.fold(Self::ZERO, Self::saturating_add)
    }

    /// Whether this price is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
