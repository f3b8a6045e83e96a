//! Weighted random pick over a sequence.
//!
//! Each option occupies a slice of `[0, total)` proportional to its weight,
//! laid out in sequence order. A roll `r` in `[0, 1)` lands at
//! `r * total`; the option whose slice contains that point wins.

use rand::Rng;

/// Weight of anything that does not say otherwise.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Something that can carry a selection weight.
pub trait Weighted {
    fn weight(&self) -> f64 {
        DEFAULT_WEIGHT
    }
}

impl<T: Weighted + ?Sized> Weighted for &T {
    fn weight(&self) -> f64 {
        (**self).weight()
    }
}

/// A bare number is its own weight.
impl Weighted for f64 {
    fn weight(&self) -> f64 {
        *self
    }
}

/// Negative, NaN and infinite weights take no share of the range.
fn effective_weight(weight: f64) -> f64 {
    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        0.0
    }
}

/// Index picked by `roll` (expected in `[0, 1)`), or `None` when there is
/// nothing to pick from.
///
/// The first option whose cumulative upper bound is strictly greater than
/// `roll * total` wins. When no bound qualifies (a roll at or past 1.0, or
/// every weight zero) the last option is returned.
pub fn pick_index<T: Weighted>(options: &[T], roll: f64) -> Option<usize> {
    if options.is_empty() {
        return None;
    }

    let mut cumulative = 0.0;
    let boundaries: Vec<f64> = options
        .iter()
        .map(|o| {
            cumulative += effective_weight(o.weight());
            cumulative
        })
        .collect();

    let target = cumulative * roll;

    Some(
        boundaries
            .iter()
            .position(|upper| *upper > target)
            .unwrap_or(options.len() - 1),
    )
}

/// Index picked with a fresh roll from `rng`.
pub fn pick<T: Weighted, R: Rng + ?Sized>(options: &[T], rng: &mut R) -> Option<usize> {
    pick_index(options, rng.gen::<f64>())
}
