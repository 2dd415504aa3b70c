pub mod date;
pub mod draft;

pub use date::DateValue;
pub use draft::{DraftError, DraftRecord, DraftValue};
