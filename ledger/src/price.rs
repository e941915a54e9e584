//! # Price Feeds & USD Conversion
//!
//! The valuation seam of the ledger. A [`PriceFeed`] is an external
//! collaborator that reports an asset's price against the common unit of
//! account together with the precision of that report; [`to_usd`] turns
//! an asset amount into 6-decimal USD using exact integer arithmetic.
//!
//! The conversion is deliberately dumb about feed quality: staleness and
//! sign are whatever the feed says they are. A non-positive price is
//! rejected as a numeric-range error — it is never laundered into a
//! "free" zero valuation — but no further validation happens here.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::USD_SCALE;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// The price feed could not produce a quote (unreachable, stale round,
/// decommissioned aggregator — the feed decides, we just carry the reason).
#[derive(Debug, Error)]
#[error("price feed unavailable: {reason}")]
pub struct PriceFeedError {
    /// Collaborator-supplied description of the failure.
    pub reason: String,
}

impl PriceFeedError {
    /// Convenience constructor.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Errors that can occur while valuing an amount in USD.
#[derive(Debug, Error)]
pub enum PriceError {
    /// The feed failed to produce a quote at all.
    #[error(transparent)]
    FeedUnavailable(#[from] PriceFeedError),

    /// The feed reported a zero or negative price. Unsigned conversion of
    /// a non-positive price must fail deterministically, never pass as a
    /// zero valuation.
    #[error("non-positive price {price} reported by feed")]
    NonPositivePrice {
        /// The offending signed price.
        price: i128,
    },

    /// The intermediate product `amount * price * 10^6` (or the combined
    /// decimal scale) exceeded `u128`. Overflow fails loudly; it never
    /// wraps.
    #[error("value overflow converting {amount} units (price {price}, {price_decimals} price decimals, {asset_decimals} asset decimals)")]
    Overflow {
        /// The amount being converted.
        amount: u128,
        /// The quoted price.
        price: i128,
        /// The feed's reported precision.
        price_decimals: u8,
        /// The asset's native precision.
        asset_decimals: u8,
    },
}

// ---------------------------------------------------------------------------
// PriceFeed
// ---------------------------------------------------------------------------

/// A single price observation: signed price plus its decimal precision.
///
/// A quote of `{ price: 200_000_000_000, decimals: 8 }` means 2000.0 USD
/// per whole asset unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Price of one whole asset unit in USD, scaled by `10^decimals`.
    /// Signed because feeds report signed values; the ledger rejects
    /// non-positive quotes.
    pub price: i128,
    /// Number of decimal places in `price`.
    pub decimals: u8,
}

/// External price-source collaborator.
///
/// One feed per asset. The native asset's feed is fixed at construction;
/// token feeds are registered through the admin surface.
pub trait PriceFeed: Send + Sync {
    /// Returns the latest price and its precision, or fails if no quote
    /// is available.
    fn latest_price(&self) -> Result<PriceQuote, PriceFeedError>;
}

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

/// Converts `amount` smallest units of an asset into 6-decimal USD.
///
/// Computes `amount * price * 10^6 / (10^asset_decimals * 10^price_decimals)`
/// over `u128` with checked multiplication, truncating (floor) division.
/// Floor is the policy, consistently applied: a valuation is never
/// rounded up into a cap violation the real value wouldn't cause, and
/// never rounded up past the cap's protection either.
///
/// # Errors
///
/// [`PriceError::NonPositivePrice`] for `price <= 0`;
/// [`PriceError::Overflow`] if any intermediate product exceeds `u128`.
pub fn to_usd(amount: u128, quote: PriceQuote, asset_decimals: u8) -> Result<u128, PriceError> {
    if quote.price <= 0 {
        return Err(PriceError::NonPositivePrice { price: quote.price });
    }
    let price = quote.price as u128;

    let overflow = || PriceError::Overflow {
        amount,
        price: quote.price,
        price_decimals: quote.decimals,
        asset_decimals,
    };

    let numerator = amount
        .checked_mul(price)
        .and_then(|v| v.checked_mul(USD_SCALE))
        .ok_or_else(overflow)?;

    let scale = 10u128
        .checked_pow(asset_decimals as u32)
        .and_then(|asset_scale| {
            10u128
                .checked_pow(quote.decimals as u32)
                .and_then(|price_scale| asset_scale.checked_mul(price_scale))
        })
        .ok_or_else(overflow)?;

    Ok(numerator / scale)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
