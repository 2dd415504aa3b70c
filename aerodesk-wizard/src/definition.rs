use serde::{Deserialize, Serialize};

use crate::WizardError;

/// The authoring and booking flows that share the wizard controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WizardDomain {
    Policy,
    Discount,
    PromoCode,
    Ancillary,
    Offer,
    GroupBooking,
}

impl WizardDomain {
    pub const ALL: [WizardDomain; 6] = [
        WizardDomain::Policy,
        WizardDomain::Discount,
        WizardDomain::PromoCode,
        WizardDomain::Ancillary,
        WizardDomain::Offer,
        WizardDomain::GroupBooking,
    ];
}

/// One page of a wizard and the draft fields it edits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDefinition {
    pub title: String,
    pub fields: Vec<String>,
}

impl StepDefinition {
    pub fn new(title: impl Into<String>, fields: &[&str]) -> Self {
        Self {
            title: title.into(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// Step layout for a wizard. Each domain's field set lives here as data.
///
/// Only built through [`WizardDefinition::new`] or [`WizardDefinition::builtin`],
/// so a definition always has at least one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WizardDefinition {
    domain: WizardDomain,
    steps: Vec<StepDefinition>,
}

impl WizardDefinition {
    pub fn new(domain: WizardDomain, steps: Vec<StepDefinition>) -> Result<Self, WizardError> {
        if steps.is_empty() {
            return Err(WizardError::InvalidStepCount(0));
        }
        Ok(Self { domain, steps })
    }

    /// Stock layout for each of the console's wizards
    pub fn builtin(domain: WizardDomain) -> Self {
        let steps = match domain {
            WizardDomain::Policy => vec![
                StepDefinition::new("Basic Info", &["name", "policyType", "description"]),
                StepDefinition::new("Rules", &["refundable", "changeFee", "cancellationWindowHours"]),
                StepDefinition::new("Validity", &["validFrom", "validTo", "blackoutStart", "blackoutEnd"]),
                StepDefinition::new("Review", &[]),
            ],
            WizardDomain::Discount => vec![
                StepDefinition::new("Details", &["name", "discountType", "value"]),
                StepDefinition::new("Eligibility", &["routes", "cabins", "minPassengers"]),
                StepDefinition::new("Schedule", &["startDate", "endDate", "blackoutDate"]),
            ],
            WizardDomain::PromoCode => vec![
                StepDefinition::new("Code", &["code", "description"]),
                StepDefinition::new("Benefit", &["discountType", "value", "maxRedemptions"]),
                StepDefinition::new("Validity", &["validFrom", "validTo", "channels"]),
            ],
            WizardDomain::Ancillary => vec![
                StepDefinition::new("Product", &["name", "category", "description"]),
                StepDefinition::new("Pricing", &["price", "currency", "perPassenger"]),
                StepDefinition::new("Availability", &["routes", "cabins", "startDate", "endDate"]),
            ],
            WizardDomain::Offer => vec![
                StepDefinition::new("Offer", &["name", "offerType", "description"]),
                StepDefinition::new("Components", &["ancillaries", "bundleCost"]),
                StepDefinition::new("Audience", &["segments", "channels"]),
                StepDefinition::new("Schedule", &["validFrom", "validTo", "blackoutStart", "blackoutEnd"]),
            ],
            WizardDomain::GroupBooking => vec![
                StepDefinition::new("Group Leader", &["leaderName", "leaderEmail", "leaderPhone", "passengerCount"]),
                StepDefinition::new("Flight", &["flightId", "baseCost"]),
                StepDefinition::new("Bundle", &["bundleId", "bundleCostPerPassenger"]),
                StepDefinition::new("Services", &["services"]),
                StepDefinition::new("Review", &[]),
            ],
        };

        Self { domain, steps }
    }

    pub fn domain(&self) -> WizardDomain {
        self.domain
    }

    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Fields edited on `step`; empty for steps past the end
    pub fn fields_for(&self, step: usize) -> &[String] {
        self.steps
            .get(step)
            .map(|s| s.fields.as_slice())
            .unwrap_or(&[])
    }

    /// First step that edits `field`
    pub fn step_of(&self, field: &str) -> Option<usize> {
        self.steps
            .iter()
            .position(|s| s.fields.iter().any(|f| f == field))
    }
}
