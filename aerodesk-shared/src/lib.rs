pub mod models;

pub use models::{DateValue, DraftError, DraftRecord, DraftValue};
