//! Price estimator for device rentals.
//!
//! `compute_estimate` is the pricing rule itself: a pure function over an
//! explicit rate table, discount schedule, deposit policy and delivery fee.
//! `EstimatorService` wraps it with the storefront configuration and the
//! form-input normalization the estimate form relies on.
//!
//! Bad input never blocks an estimate. Counts that are missing, non-numeric or
//! below 1 become 1, and a plan/model pair with no configured rate prices at 0.
//! Callers that want visible validation errors use `validate_selection`.

use log::{debug, info};
use std::cmp::Reverse;
use std::sync::Arc;

use shared::{
    Breakdown, DepositPolicy, DiscountSchedule, EstimatorConfig, FormValue, RateTable,
    RawSelection, Selection,
};

pub const DEFAULT_PLAN: &str = "month";
pub const DEFAULT_MODEL: &str = "air";

/// Errors reported only by strict validation. `compute_estimate` never fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("Quantity must be a whole number of at least 1 (got {0:?})")]
    InvalidQuantity(String),
    #[error("Duration must be a whole number of at least 1 (got {0:?})")]
    InvalidDuration(String),
    #[error("No rate is configured for plan '{plan}' and model '{model}'")]
    UnknownRate { plan: String, model: String },
}

/// Compute the itemized price for one selection.
///
/// 1. base rate from the table (0 when the pair is missing)
/// 2. raw subtotal = base rate × duration × quantity
/// 3. discount percent from the single highest qualifying tier
/// 4. discount amount rounded to whole currency units
/// 5. deposit for at most `max_units` units
/// 6. total = discounted subtotal + deposit + delivery
pub fn compute_estimate(
    selection: &Selection,
    rate_table: &RateTable,
    discount_schedule: &DiscountSchedule,
    deposit_policy: &DepositPolicy,
    delivery_fee: u64,
) -> Breakdown {
    let quantity = selection.quantity.max(1);
    let duration = selection.duration.max(1);

    let base_rate = match rate_table.rate_for(&selection.plan, &selection.model) {
        Some(rate) => rate,
        None => {
            debug!(
                "No rate for plan '{}' model '{}', pricing at 0",
                selection.plan, selection.model
            );
            0
        }
    };

    let raw_subtotal = base_rate.saturating_mul(duration).saturating_mul(quantity);

    let discount_percent = discount_percent_for(discount_schedule, quantity);
    let discount_amount = percent_of(raw_subtotal, discount_percent);
    let discounted_subtotal = raw_subtotal - discount_amount;

    let deposit_units = quantity.min(u64::from(deposit_policy.max_units));
    let deposit_amount = deposit_policy.per_unit.saturating_mul(deposit_units);

    let total_due = discounted_subtotal
        .saturating_add(deposit_amount)
        .saturating_add(delivery_fee);

    Breakdown {
        base_rate,
        raw_subtotal,
        discount_percent,
        discount_amount,
        discounted_subtotal,
        deposit_amount,
        delivery_fee,
        total_due,
    }
}

/// Percent of the tier with the largest `min_qty` not above `quantity`, or 0.
/// Ties on `min_qty` resolve to the tier listed first.
pub fn discount_percent_for(schedule: &DiscountSchedule, quantity: u64) -> u32 {
    schedule
        .tiers()
        .iter()
        .filter(|tier| u64::from(tier.min_qty) <= quantity)
        .min_by_key(|tier| Reverse(tier.min_qty))
        .map(|tier| tier.pct)
        .unwrap_or(0)
}

/// `amount × pct / 100` rounded half up. `pct` is capped at 100 so the result
/// never exceeds `amount`.
fn percent_of(amount: u64, pct: u32) -> u64 {
    let pct = u128::from(pct.min(100));
    ((u128::from(amount) * pct + 50) / 100) as u64
}

/// Lenient integer parse used by the estimate form.
///
/// Leading whitespace and an optional sign are accepted, then the leading run
/// of digits is taken and anything after it ignored (`"5 units"` is 5, `"2.7"`
/// is 2). No digits, or a value below 1, gives 1. There is no upper bound;
/// only a digit run past `i64::MAX` saturates.
pub fn parse_count(raw: Option<&str>) -> u64 {
    match raw.and_then(leading_integer) {
        Some(n) if n >= 1 => n.unsigned_abs(),
        _ => 1,
    }
}

/// Strict counterpart of `parse_count`: the whole trimmed input must be a
/// positive whole number that fits in `u64`.
pub fn parse_count_strict(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u64>().ok().filter(|n| *n >= 1)
}

fn leading_integer(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() {
        return None;
    }

    // Only overflow can fail here; a huge run of digits saturates.
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Normalize raw form input into a selection. Missing or empty plan and model
/// fall back to `month` and `air`; other values are kept verbatim. Counts go
/// through `parse_count`.
pub fn normalize_selection(raw: &RawSelection) -> Selection {
    let quantity = raw.qty.as_ref().map(FormValue::to_string);
    let duration = raw.duration.as_ref().map(FormValue::to_string);

    Selection {
        plan: non_empty(raw.plan.as_deref(), DEFAULT_PLAN),
        model: non_empty(raw.model.as_deref(), DEFAULT_MODEL),
        quantity: parse_count(quantity.as_deref()),
        duration: parse_count(duration.as_deref()),
    }
}

fn non_empty(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}

/// Service that prices selections against the storefront configuration
#[derive(Clone)]
pub struct EstimatorService {
    config: Arc<EstimatorConfig>,
}

impl EstimatorService {
    pub fn new(config: Arc<EstimatorConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    pub fn normalize_selection(&self, raw: &RawSelection) -> Selection {
        normalize_selection(raw)
    }

    /// Price an already normalized selection
    pub fn estimate(&self, selection: &Selection) -> Breakdown {
        compute_estimate(
            selection,
            &self.config.base_rates,
            &self.config.volume_discounts,
            &self.config.deposit_policy(),
            self.config.delivery_fee,
        )
    }

    /// Normalize and price raw form input in one step
    pub fn estimate_raw(&self, raw: &RawSelection) -> (Selection, Breakdown) {
        let selection = self.normalize_selection(raw);
        let breakdown = self.estimate(&selection);
        info!(
            "Estimated {} {} x{} for {}: total {}",
            selection.plan,
            selection.model,
            selection.quantity,
            selection.duration,
            breakdown.total_due
        );
        (selection, breakdown)
    }

    /// Strict validation: reject counts the lenient path would coerce, and
    /// plan/model pairs with no configured rate.
    pub fn validate_selection(&self, raw: &RawSelection) -> Result<Selection, SelectionError> {
        let quantity_input = raw.qty.as_ref().map(FormValue::to_string).unwrap_or_default();
        let quantity = parse_count_strict(&quantity_input)
            .ok_or(SelectionError::InvalidQuantity(quantity_input))?;

        let duration_input = raw
            .duration
            .as_ref()
            .map(FormValue::to_string)
            .unwrap_or_default();
        let duration = parse_count_strict(&duration_input)
            .ok_or(SelectionError::InvalidDuration(duration_input))?;

        let plan = non_empty(raw.plan.as_deref(), DEFAULT_PLAN);
        let model = non_empty(raw.model.as_deref(), DEFAULT_MODEL);
        if self.config.base_rates.rate_for(&plan, &model).is_none() {
            return Err(SelectionError::UnknownRate { plan, model });
        }

        Ok(Selection {
            plan,
            model,
            quantity,
            duration,
        })
    }
}

impl Default for EstimatorService {
    fn default() -> Self {
        Self::new(Arc::new(EstimatorConfig::default()))
    }
}
