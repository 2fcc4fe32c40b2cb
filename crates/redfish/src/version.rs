//! Event-log schema selection.
//!
//! The iDRAC SEL entry schema changed across firmware releases. Selection
//! runs over a fixed table of non-overlapping version ranges; the last
//! range is open-ended, so every parseable version resolves to exactly one
//! schema. Review the table whenever a new schema revision appears.

use version_compare::{compare_to, Cmp};

use crate::error::RedfishError;

/// Event-log entry schema revisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventLogSchema {
    /// Pre-3.15 entry shape: free-form severity strings, no message id.
    V1,
    /// Standard `LogEntry` shape with registry message ids.
    V2,
}

/// Bounded ranges, each `(inclusive upper bound, schema)`, checked in
/// order. Versions above every bound fall into the open-ended range below.
const BOUNDED_RANGES: [(&str, EventLogSchema); 2] = [
    ("3.15.17.15", EventLogSchema::V1),
    ("3.21.26.22", EventLogSchema::V2),
];

/// Schema for the open-ended range above every bounded upper bound.
const OPEN_RANGE_SCHEMA: EventLogSchema = EventLogSchema::V2;

/// Controller firmware versions are dotted numerics (`3.15.17.15`), not
/// semver. `version_compare` orders them correctly but accepts looser
/// inputs (text parts), which must not silently land in the open-ended
/// range, so shape-check first.
fn is_dotted_numeric(raw: &str) -> bool {
    !raw.is_empty()
        && raw
            .split('.')
            .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()))
}

/// Select the event-log schema for a controller firmware version.
///
/// # Errors
/// `Resolution` when the version string does not parse; an unparsable
/// version is never defaulted into a range.
pub fn resolve_event_log_schema(
    firmware_version: &str,
) -> Result<EventLogSchema, RedfishError> {
    if !is_dotted_numeric(firmware_version) {
        return Err(RedfishError::Resolution(firmware_version.to_string()));
    }

    for (upper, schema) in BOUNDED_RANGES {
        if compare_to(firmware_version, upper, Cmp::Le)
            .map_err(|()| RedfishError::Resolution(firmware_version.to_string()))?
        {
            return Ok(schema);
        }
    }
    Ok(OPEN_RANGE_SCHEMA)
}
