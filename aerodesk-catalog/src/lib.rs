pub mod booking;
pub mod pricing;

pub use booking::ServiceCatalog;
pub use pricing::{PriceAggregator, PricingConfig, PricingContext, PricingError, PricingResult, ServiceLine};
