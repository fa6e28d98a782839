//! Rating aggregation over approved reviews.
//!
//! [`summarize`] recomputes a restaurant's four rating fields from scratch
//! from the full set of its approved reviews. The function is pure; the
//! persistence adapter wraps it in a transaction so the stored fields are
//! always consistent with the approved review set.

use super::{Allergen, Review};

/// Recomputed rating fields for one restaurant.
///
/// The three per-allergen averages are always present: an allergen with no
/// contributing reviews yields `0.0` (the zero-fallback the platform has
/// always shipped), never an absent value. `overall` is `None` only when no
/// approved review contributed a rating on any dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingSummary {
    /// Average peanut rating, 2 decimals.
    pub rating_peanut: f64,
    /// Average egg rating, 2 decimals.
    pub rating_egg: f64,
    /// Average dairy rating, 2 decimals.
    pub rating_dairy: f64,
    /// Mean of the rounded per-allergen averages that had data, 2 decimals.
    pub overall: Option<f64>,
}

/// Running totals for a single allergen dimension.
#[derive(Debug, Clone, Copy, Default)]
struct DimensionTotals {
    sum: f64,
    count: u32,
}

impl DimensionTotals {
    #[expect(
        clippy::float_arithmetic,
        reason = "rating sums are accumulated as floats"
    )]
    fn collect(reviews: &[Review], allergen: Allergen) -> Self {
        let mut totals = Self::default();
        for review in reviews {
            if let Some(rating) = review.rating_for(allergen) {
                totals.sum += f64::from(rating);
                totals.count += 1;
            }
        }
        totals
    }

    /// Average with the zero-fallback: an empty dimension divides by one,
    /// yielding `0.0` rather than an undefined value.
    #[expect(
        clippy::float_arithmetic,
        reason = "rating averages are inherently floating point"
    )]
    fn average(self) -> f64 {
        self.sum / f64::from(self.count.max(1))
    }

    fn has_data(self) -> bool {
        self.count > 0
    }
}

/// Round half-up to exactly 2 decimal places, independent of locale.
///
/// Ratings are non-negative, so rounding half away from zero coincides with
/// half-up.
#[expect(
    clippy::float_arithmetic,
    reason = "fixed-point rounding of rating averages"
)]
fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Aggregate a restaurant's approved reviews into its rating fields.
///
/// The caller is responsible for passing only approved reviews; pending and
/// rejected reviews must never influence published ratings.
///
/// The overall rating is the mean of the **rounded** per-allergen averages,
/// counting only allergens with at least one contributing review. With no
/// contributing reviews at all the mean is undefined and `overall` stays
/// `None`.
#[expect(
    clippy::float_arithmetic,
    reason = "overall rating is the mean of the rounded averages"
)]
pub fn summarize(reviews: &[Review]) -> RatingSummary {
    let peanut = DimensionTotals::collect(reviews, Allergen::Peanut);
    let egg = DimensionTotals::collect(reviews, Allergen::Egg);
    let dairy = DimensionTotals::collect(reviews, Allergen::Dairy);

    let rating_peanut = round_to_cents(peanut.average());
    let rating_egg = round_to_cents(egg.average());
    let rating_dairy = round_to_cents(dairy.average());

    let dimensions_with_data = [peanut, egg, dairy]
        .into_iter()
        .filter(|totals| totals.has_data())
        .count();

    let overall = u32::try_from(dimensions_with_data)
        .ok()
        .filter(|count| *count > 0)
        .map(|count| round_to_cents((rating_peanut + rating_egg + rating_dairy) / f64::from(count)));

    RatingSummary {
        rating_peanut,
        rating_egg,
        rating_dairy,
        overall,
    }
}
