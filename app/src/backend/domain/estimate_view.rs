//! Presentation of an estimate: currency formatting, the labeled estimate card,
//! and the plain-text summary used for the copy button and chat messages.

use shared::{Breakdown, EstimateCell, EstimateView, EstimatorConfig, Selection};

pub const ESTIMATE_NOTICE: &str =
    "*For guidance only. Final quote depends on exact model, stock, and address.";

/// Format whole currency units with comma thousands separators, e.g. `₱30,650`
pub fn format_currency(amount: u64, symbol: &str) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}{}", symbol, grouped)
}

/// Display name of a device model. Anything other than `air` is shown as the Pro.
pub fn model_display_name(model: &str) -> &'static str {
    if model == "air" {
        "MacBook Air"
    } else {
        "MacBook Pro"
    }
}

/// Builds display-ready output from a selection and its breakdown
#[derive(Clone)]
pub struct EstimateViewService {
    currency_symbol: String,
    business_name: String,
}

impl EstimateViewService {
    pub fn new(config: &EstimatorConfig) -> Self {
        Self {
            currency_symbol: config.currency_symbol.clone(),
            business_name: config.business_name.clone(),
        }
    }

    pub fn format_amount(&self, amount: u64) -> String {
        format_currency(amount, &self.currency_symbol)
    }

    /// Three rows of three labeled cells, matching the estimate card layout
    pub fn build_view(&self, selection: &Selection, breakdown: &Breakdown) -> EstimateView {
        let discount_label = if breakdown.discount_percent > 0 {
            format!("Volume Discount ({}%)", breakdown.discount_percent)
        } else {
            "Volume Discount".to_string()
        };
        let discount_value = if breakdown.discount_amount > 0 {
            format!("–{}", self.format_amount(breakdown.discount_amount))
        } else {
            self.format_amount(0)
        };

        let rows = vec![
            vec![
                cell(
                    "Plan / Model",
                    format!(
                        "{} • {}",
                        selection.plan.to_uppercase(),
                        model_display_name(&selection.model)
                    ),
                ),
                cell(
                    "Qty × Duration",
                    format!("{} × {}", selection.quantity, selection.duration),
                ),
                cell("Base Rate", self.format_amount(breakdown.base_rate)),
            ],
            vec![
                cell("Subtotal", self.format_amount(breakdown.raw_subtotal)),
                cell(&discount_label, discount_value),
                cell("After Discount", self.format_amount(breakdown.discounted_subtotal)),
            ],
            vec![
                cell("Refundable Deposit", self.format_amount(breakdown.deposit_amount)),
                cell("Delivery (Metro Manila)", self.format_amount(breakdown.delivery_fee)),
                cell("Estimated Total Due", self.format_amount(breakdown.total_due)),
            ],
        ];

        EstimateView {
            rows,
            notice: ESTIMATE_NOTICE.to_string(),
        }
    }

    /// Newline-delimited summary of the selection and every breakdown field
    pub fn build_summary(&self, selection: &Selection, breakdown: &Breakdown) -> String {
        [
            format!("{} — Estimate", self.business_name),
            format!("Plan: {}", selection.plan),
            format!("Model: {}", selection.model),
            format!("Qty: {}", selection.quantity),
            format!("Duration: {}", selection.duration),
            format!("Base rate: {}", self.format_amount(breakdown.base_rate)),
            format!("Subtotal: {}", self.format_amount(breakdown.raw_subtotal)),
            format!(
                "Discount: {}% ({})",
                breakdown.discount_percent,
                self.format_amount(breakdown.discount_amount)
            ),
            format!("After discount: {}", self.format_amount(breakdown.discounted_subtotal)),
            format!("Deposit: {}", self.format_amount(breakdown.deposit_amount)),
            format!("Delivery: {}", self.format_amount(breakdown.delivery_fee)),
            format!("TOTAL DUE: {}", self.format_amount(breakdown.total_due)),
        ]
        .join("\n")
    }
}

fn cell(label: &str, value: String) -> EstimateCell {
    EstimateCell {
        label: label.to_string(),
        value,
    }
}
