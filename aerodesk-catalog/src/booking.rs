use std::collections::HashMap;

use aerodesk_shared::{DraftRecord, DraftValue};
use serde::{Deserialize, Serialize};

use crate::pricing::{PricingContext, PricingError, ServiceLine};

pub const PASSENGER_COUNT_FIELD: &str = "passengerCount";
pub const BASE_COST_FIELD: &str = "baseCost";
pub const BUNDLE_COST_FIELD: &str = "bundleCostPerPassenger";
pub const SERVICES_FIELD: &str = "services";

/// Per-passenger prices for the services a booking can select
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceCatalog {
    prices: HashMap<String, f64>,
}

impl ServiceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: impl Into<String>, price: f64) {
        self.prices.insert(code.into(), price);
    }

    pub fn price_of(&self, code: &str) -> Option<f64> {
        self.prices.get(code).copied()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for ServiceCatalog {
    fn from_iter<T: IntoIterator<Item = (S, f64)>>(iter: T) -> Self {
        Self {
            prices: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl PricingContext {
    /// Read a submitted group-booking draft into a pricing context.
    ///
    /// Selected service tokens are resolved through `catalog`; a token the
    /// catalog does not know is an error rather than a free service.
    pub fn from_booking_draft(draft: &DraftRecord, catalog: &ServiceCatalog) -> Result<Self, PricingError> {
        let raw_count = optional_amount(draft, PASSENGER_COUNT_FIELD)?
            .ok_or_else(|| PricingError::MissingField(PASSENGER_COUNT_FIELD.to_string()))?;

        if raw_count.fract() != 0.0 || raw_count < 0.0 || raw_count > u32::MAX as f64 {
            return Err(PricingError::InvalidAmount {
                field: PASSENGER_COUNT_FIELD.to_string(),
                value: raw_count,
            });
        }
        if raw_count == 0.0 {
            return Err(PricingError::InvalidPassengerCount(0));
        }

        let selected = match draft.get(SERVICES_FIELD) {
            None | Some(DraftValue::Null) => None,
            Some(DraftValue::Selection(tokens)) => Some(tokens),
            Some(_) => return Err(PricingError::InvalidField(SERVICES_FIELD.to_string())),
        };

        let services = selected
            .into_iter()
            .flatten()
            .map(|code| {
                catalog
                    .price_of(code)
                    .map(|price| ServiceLine::with_code(code.clone(), price))
                    .ok_or_else(|| PricingError::UnknownService(code.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            passenger_count: raw_count as u32,
            base_cost: optional_amount(draft, BASE_COST_FIELD)?,
            bundle_cost_per_passenger: optional_amount(draft, BUNDLE_COST_FIELD)?,
            services,
        })
    }
}

/// Absent or null fields are missing terms; anything present must read as a number
fn optional_amount(draft: &DraftRecord, field: &str) -> Result<Option<f64>, PricingError> {
    match draft.get(field) {
        None | Some(DraftValue::Null) => Ok(None),
        Some(_) => draft
            .number(field)
            .map(Some)
            .ok_or_else(|| PricingError::InvalidField(field.to_string())),
    }
}
