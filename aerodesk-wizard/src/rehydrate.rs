use aerodesk_shared::{DateValue, DraftRecord, DraftValue};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Editing-record fields that carry dates and are converted on load
pub const DATE_FIELDS: [&str; 7] = [
    "startDate",
    "endDate",
    "validFrom",
    "validTo",
    "blackoutStart",
    "blackoutEnd",
    "blackoutDate",
];

/// How date fields missing from an editing record are treated.
///
/// `PresentOnly` converts the fields the record actually has and leaves the
/// rest absent. `Unconditional` matches the legacy forms, which construct a
/// date for every known field and so end up with `DateValue::Invalid` for
/// the missing ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateRehydration {
    #[default]
    PresentOnly,
    Unconditional,
}

/// Copy an editing record into a fresh draft, turning date fields into
/// [`DateValue`]s.
pub fn rehydrate(record: &DraftRecord, policy: DateRehydration) -> DraftRecord {
    let mut draft = record.clone();

    for field in DATE_FIELDS {
        let parsed = match record.get(field) {
            Some(raw) => {
                let parsed = to_date(raw);
                if !parsed.is_valid() {
                    warn!(field, "Editing record holds an unreadable date");
                }
                parsed
            }
            None if policy == DateRehydration::Unconditional => DateValue::Invalid,
            None => continue,
        };
        draft.insert(field, parsed);
    }

    draft
}

fn to_date(raw: &DraftValue) -> DateValue {
    match raw {
        DraftValue::Date(date) => *date,
        DraftValue::Text(s) => DateValue::parse(s),
        DraftValue::Number(millis) => DateValue::from_epoch_millis(*millis),
        DraftValue::Null | DraftValue::Bool(_) | DraftValue::Selection(_) => DateValue::Invalid,
    }
}
