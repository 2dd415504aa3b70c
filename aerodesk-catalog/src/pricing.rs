use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Pricing policy values, injected so alternate policies can be priced
/// without code changes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Flat tax applied to the subtotal
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,

    /// Passenger count at which the group discount kicks in
    #[serde(default = "default_group_threshold")]
    pub group_discount_threshold: u32,

    /// Share of the subtotal taken off for groups
    #[serde(default = "default_group_rate")]
    pub group_discount_rate: f64,
}

fn default_tax_rate() -> f64 { 0.08 }
fn default_group_threshold() -> u32 { 10 }
fn default_group_rate() -> f64 { 0.15 }

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            tax_rate: default_tax_rate(),
            group_discount_threshold: default_group_threshold(),
            group_discount_rate: default_group_rate(),
        }
    }
}

/// A selected service, billed once per passenger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceLine {
    pub code: Option<String>,
    pub price: f64,
}

impl ServiceLine {
    pub fn new(price: f64) -> Self {
        Self { code: None, price }
    }

    pub fn with_code(code: impl Into<String>, price: f64) -> Self {
        Self { code: Some(code.into()), price }
    }
}

/// Everything the aggregator needs to price a booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingContext {
    pub passenger_count: u32,

    /// Flight fare for the whole booking
    pub base_cost: Option<f64>,

    pub bundle_cost_per_passenger: Option<f64>,

    pub services: Vec<ServiceLine>,
}

impl PricingContext {
    pub fn new(passenger_count: u32) -> Self {
        Self {
            passenger_count,
            base_cost: None,
            bundle_cost_per_passenger: None,
            services: Vec::new(),
        }
    }

    pub fn with_base_cost(mut self, base_cost: f64) -> Self {
        self.base_cost = Some(base_cost);
        self
    }

    pub fn with_bundle_cost(mut self, per_passenger: f64) -> Self {
        self.bundle_cost_per_passenger = Some(per_passenger);
        self
    }

    pub fn with_service(mut self, service: ServiceLine) -> Self {
        self.services.push(service);
        self
    }

    pub fn is_group_eligible(&self, config: &PricingConfig) -> bool {
        self.passenger_count >= config.group_discount_threshold
    }
}

/// Computed totals for one booking context. A new context gets a new result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    pub subtotal: f64,
    pub taxes: f64,
    pub group_discount: f64,
    pub total: f64,
    pub passenger_count: u32,
    pub calculated_at: DateTime<Utc>,
}

/// Booking total calculator
pub struct PriceAggregator {
    config: PricingConfig,
}

impl PriceAggregator {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// subtotal = base + bundle * pax + sum(services) * pax;
    /// total = subtotal + tax - group discount
    pub fn calculate(&self, context: &PricingContext) -> Result<PricingResult, PricingError> {
        validate(context)?;

        let passengers = context.passenger_count as f64;
        let base_cost = context.base_cost.unwrap_or(0.0);
        let bundle_cost = context.bundle_cost_per_passenger.unwrap_or(0.0) * passengers;
        let services_cost = context.services.iter().map(|s| s.price).sum::<f64>() * passengers;

        let subtotal = base_cost + bundle_cost + services_cost;
        let taxes = subtotal * self.config.tax_rate;
        let group_discount = if context.is_group_eligible(&self.config) {
            subtotal * self.config.group_discount_rate
        } else {
            0.0
        };
        let total = subtotal + taxes - group_discount;

        debug!(
            passengers = context.passenger_count,
            subtotal,
            taxes,
            group_discount,
            total,
            "Booking priced"
        );

        Ok(PricingResult {
            subtotal,
            taxes,
            group_discount,
            total,
            passenger_count: context.passenger_count,
            calculated_at: Utc::now(),
        })
    }
}

impl Default for PriceAggregator {
    fn default() -> Self {
        Self::new(PricingConfig::default())
    }
}

fn validate(context: &PricingContext) -> Result<(), PricingError> {
    if context.passenger_count == 0 {
        return Err(PricingError::InvalidPassengerCount(0));
    }

    let amounts = [
        ("baseCost", context.base_cost),
        ("bundleCostPerPassenger", context.bundle_cost_per_passenger),
    ];
    for (field, amount) in amounts {
        if let Some(value) = amount {
            check_amount(field, value)?;
        }
    }
    for service in &context.services {
        check_amount("services.price", service.price)?;
    }

    Ok(())
}

fn check_amount(field: &str, value: f64) -> Result<(), PricingError> {
    if !value.is_finite() || value < 0.0 {
        return Err(PricingError::InvalidAmount {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PricingError {
    #[error("Passenger count must be positive, got {0}")]
    InvalidPassengerCount(u32),

    #[error("Invalid amount for {field}: {value}")]
    InvalidAmount {
        field: String,
        value: f64,
    },

    #[error("Booking draft is missing {0}")]
    MissingField(String),

    #[error("Booking draft field {0} has an unusable value")]
    InvalidField(String),

    #[error("Unknown service: {0}")]
    UnknownService(String),
}
