// src/scoring.rs
//! Opportunity scoring over a product's resale price history.
//!
//! Both entry points are pure: they take plain numbers, never fail, and fall
//! back to zero when there is not enough data to say anything.

const MARGIN_FLOOR_PCT: f64 = -20.0;
const MARGIN_CAP_PCT: f64 = 80.0;
const MARGIN_WEIGHT: f64 = 70.0;
const STABILITY_WEIGHT: f64 = 30.0;
const MAX_SCORE: f64 = 100.0;

/// Coefficient of variation of `prices_cents` as a percentage.
///
/// Uses the population variance. Returns 0 for fewer than two samples or a
/// non-positive mean. The result is not capped.
pub fn compute_volatility_pct(prices_cents: &[i64]) -> f64 {
    if prices_cents.len() < 2 {
        return 0.0;
    }

    let count = prices_cents.len() as f64;
    let mean = prices_cents.iter().map(|&p| p as f64).sum::<f64>() / count;
    if mean <= 0.0 {
        return 0.0;
    }

    let variance = prices_cents
        .iter()
        .map(|&p| {
            let deviation = p as f64 - mean;
            deviation * deviation
        })
        .sum::<f64>()
        / count;

    100.0 * variance.sqrt() / mean
}

/// Scores a product from 0 to 100.
///
/// Up to 70 points come from the margin of the most recent resale over retail
/// (linear between -20% and +80%), up to 30 from price stability (linear in
/// `100 - volatility_pct`).
///
/// A non-positive retail price, a missing resale price and a resale price of
/// exactly zero all score 0.
pub fn compute_opportunity_score(
    retail_price_cents: i64,
    recent_resale_cents: Option<i64>,
    volatility_pct: f64,
) -> u8 {
    let resale_cents = match recent_resale_cents {
        Some(cents) if cents != 0 => cents,
        _ => return 0,
    };
    if retail_price_cents <= 0 {
        return 0;
    }

    let retail = retail_price_cents as f64;
    let margin_pct = 100.0 * (resale_cents as f64 - retail) / retail;

    let margin_score = clamp(
        map_range(margin_pct, MARGIN_FLOOR_PCT, MARGIN_CAP_PCT, 0.0, MARGIN_WEIGHT),
        0.0,
        MARGIN_WEIGHT,
    );
    let stability_score = clamp(
        map_range(100.0 - volatility_pct, 0.0, 100.0, 0.0, STABILITY_WEIGHT),
        0.0,
        STABILITY_WEIGHT,
    );

    clamp(margin_score + stability_score, 0.0, MAX_SCORE).round() as u8
}

/// NaN clamps to `min`.
fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return min;
    }
    value.max(min).min(max)
}

fn map_range(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    if in_max == in_min {
        return out_min;
    }
    out_min + (value - in_min) * (out_max - out_min) / (in_max - in_min)
}
