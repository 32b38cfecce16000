use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Unit price per duration-unit, keyed by plan (`day`, `week`, `month`) and then
/// by model (`air`, `pro`). Both levels are open-ended.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable(pub BTreeMap<String, BTreeMap<String, u64>>);

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly useful for tests and defaults
    pub fn with_rate(mut self, plan: &str, model: &str, rate: u64) -> Self {
        self.0
            .entry(plan.to_string())
            .or_default()
            .insert(model.to_string(), rate);
        self
    }

    /// Look up the rate for a plan/model pair. `None` when either key is absent.
    pub fn rate_for(&self, plan: &str, model: &str) -> Option<u64> {
        self.0.get(plan).and_then(|models| models.get(model)).copied()
    }

    /// True when no plan defines any model rate
    pub fn is_empty(&self) -> bool {
        self.0.values().all(|models| models.is_empty())
    }
}

/// A volume discount: `pct` percent off once the quantity reaches `min_qty`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountTier {
    #[serde(alias = "minQty")]
    pub min_qty: u32,
    pub pct: u32,
}

/// The full set of volume discount tiers. Order in the list does not matter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscountSchedule(pub Vec<DiscountTier>);

impl DiscountSchedule {
    pub fn new(tiers: Vec<DiscountTier>) -> Self {
        Self(tiers)
    }

    pub fn tiers(&self) -> &[DiscountTier] {
        &self.0
    }
}

/// Refundable deposit charged per unit, for at most `max_units` units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositPolicy {
    pub per_unit: u64,
    pub max_units: u32,
}

/// Static storefront configuration. Every field has a default, so a partial
/// YAML file only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Shown in summaries and the default chat message
    pub business_name: String,
    /// Chat recipient, digits only (no `+` sign)
    pub whatsapp_number: String,
    pub currency_symbol: String,
    /// Flat delivery fee added to every estimate
    pub delivery_fee: u64,
    pub base_rates: RateTable,
    pub volume_discounts: DiscountSchedule,
    pub max_deposit_units: u32,
    pub per_unit_deposit: u64,
}

impl EstimatorConfig {
    pub fn deposit_policy(&self) -> DepositPolicy {
        DepositPolicy {
            per_unit: self.per_unit_deposit,
            max_units: self.max_deposit_units,
        }
    }
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            business_name: "Metro Mac Rentals".to_string(),
            whatsapp_number: "639000000000".to_string(),
            currency_symbol: "₱".to_string(),
            delivery_fee: 250,
            base_rates: RateTable::new()
                .with_rate("day", "air", 600)
                .with_rate("day", "pro", 800)
                .with_rate("week", "air", 1800)
                .with_rate("week", "pro", 2400)
                .with_rate("month", "air", 4000)
                .with_rate("month", "pro", 5500),
            volume_discounts: DiscountSchedule::new(vec![
                DiscountTier { min_qty: 3, pct: 5 },
                DiscountTier { min_qty: 5, pct: 8 },
                DiscountTier { min_qty: 10, pct: 12 },
            ]),
            max_deposit_units: 4,
            per_unit_deposit: 3000,
        }
    }
}

/// A raw form control value. Browsers send strings, scripts sometimes send
/// numbers, and anything else is kept as-is so it can be coerced later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Other(serde_json::Value),
}

impl fmt::Display for FormValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormValue::Integer(n) => write!(f, "{}", n),
            FormValue::Float(n) => write!(f, "{}", n),
            FormValue::Text(s) => f.write_str(s),
            FormValue::Other(v) => write!(f, "{}", v),
        }
    }
}

/// Estimate form input exactly as collected from the four controls
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawSelection {
    pub plan: Option<String>,
    pub model: Option<String>,
    #[serde(alias = "quantity")]
    pub qty: Option<FormValue>,
    pub duration: Option<FormValue>,
}

/// A normalized selection. `quantity` and `duration` are always at least 1.
///
/// Serialized with the `qty` key so the persisted form matches the field ids
/// of the estimate form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub plan: String,
    pub model: String,
    #[serde(rename = "qty", alias = "quantity")]
    pub quantity: u64,
    pub duration: u64,
}

/// Itemized result of one estimate. All amounts are whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Breakdown {
    pub base_rate: u64,
    /// Before the volume discount
    pub raw_subtotal: u64,
    pub discount_percent: u32,
    pub discount_amount: u64,
    pub discounted_subtotal: u64,
    pub deposit_amount: u64,
    pub delivery_fee: u64,
    pub total_due: u64,
}

/// One labeled cell of the rendered estimate card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateCell {
    pub label: String,
    pub value: String,
}

/// Display-ready estimate card: three rows of three cells plus a notice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateView {
    pub rows: Vec<Vec<EstimateCell>>,
    pub notice: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateResponse {
    pub selection: Selection,
    pub breakdown: Breakdown,
    pub view: EstimateView,
    /// Plain-text summary for the copy button and the chat link
    pub summary: String,
    pub whatsapp_link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidateSelectionResponse {
    pub selection: Selection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastSelectionResponse {
    pub selection: Option<Selection>,
}

/// Contact form fields. Missing fields are treated as empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub plan: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactRequest {
    /// The form's `action` attribute, e.g. `mailto:hello@example.com`
    pub action: String,
    #[serde(flatten)]
    pub form: ContactForm,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactLinksResponse {
    pub mailto: String,
    pub whatsapp_link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhatsAppLinkResponse {
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtmNoteResponse {
    pub note: Option<String>,
}
