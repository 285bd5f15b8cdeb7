use tracing::debug;

use crate::error::{PlannerError, Result};
use crate::models::FoodItem;
use crate::planner::constants::{MAX_COMBINATIONS, MIN_COMBINATION_ITEMS};

/// Number of `r`-subsets of `n` items, saturating.
fn binomial(n: usize, r: usize) -> u128 {
    if r > n {
        return 0;
    }
    let r = r.min(n - r);
    let mut result: u128 = 1;
    for i in 0..r {
        result = result.saturating_mul((n - i) as u128) / (i as u128 + 1);
    }
    result
}

/// Advance `idx` to the next `r`-combination of `0..n` in lexicographic order.
fn next_combination(idx: &mut [usize], n: usize) -> bool {
    let r = idx.len();
    let mut i = r;
    while i > 0 {
        i -= 1;
        if idx[i] < i + n - r {
            idx[i] += 1;
            for j in i + 1..r {
                idx[j] = idx[j - 1] + 1;
            }
            return true;
        }
    }
    false
}

/// Find the combination of 2 to `max_items` foods whose calories come closest
/// to `target_calories`.
///
/// Every combination is tried, smallest first; the first one found wins ties.
pub fn closest_combination(
    foods: &[FoodItem],
    target_calories: f64,
    max_items: usize,
) -> Result<Vec<&FoodItem>> {
    if !target_calories.is_finite() || target_calories < 0.0 {
        return Err(PlannerError::InvalidTarget(format!(
            "calorie target must be a non-negative number, got {}",
            target_calories
        )));
    }
    if max_items < MIN_COMBINATION_ITEMS {
        return Err(PlannerError::InvalidInput(format!(
            "a combination needs at least {} items",
            MIN_COMBINATION_ITEMS
        )));
    }
    if foods.len() < MIN_COMBINATION_ITEMS {
        return Err(PlannerError::NoCombination(format!(
            "need at least {} foods, catalog has {}",
            MIN_COMBINATION_ITEMS,
            foods.len()
        )));
    }

    let n = foods.len();
    let max_items = max_items.min(n);
    let total: u128 = (MIN_COMBINATION_ITEMS..=max_items)
        .map(|r| binomial(n, r))
        .fold(0, u128::saturating_add);
    if total > MAX_COMBINATIONS {
        return Err(PlannerError::InvalidInput(format!(
            "{} combinations is too many to search; lower --max-items or filter the catalog",
            total
        )));
    }
    debug!("Searching {} combinations", total);

    let mut best: Option<(f64, Vec<usize>)> = None;

    'sizes: for r in MIN_COMBINATION_ITEMS..=max_items {
        let mut idx: Vec<usize> = (0..r).collect();
        loop {
            let calories: f64 = idx.iter().map(|&i| foods[i].calories).sum();
            let diff = (target_calories - calories).abs();

            if best.as_ref().is_none_or(|(best_diff, _)| diff < *best_diff) {
                best = Some((diff, idx.clone()));
                if diff == 0.0 {
                    break 'sizes;
                }
            }

            if !next_combination(&mut idx, n) {
                break;
            }
        }
    }

    best.map(|(_, idx)| idx.into_iter().map(|i| &foods[i]).collect())
        .ok_or_else(|| PlannerError::NoCombination("no candidates".to_string()))
}
