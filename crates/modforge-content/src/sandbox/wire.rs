//! Positional wire format for sandbox entity state.
//!
//! One fixed record shape, no escaping: free-form prefix text, the literal
//! `SandboxData` marker, an inner field separator, a decimal payload, an
//! outer section terminator. Callers guarantee the payload text never
//! contains either delimiter. Keep all token knowledge inside this module;
//! nothing else may build or split state text.

/// Section marker preceding the unlock payload.
pub const SANDBOX_DATA_MARKER: &str = "SandboxData";

/// Inner delimiter separating fields within a section.
pub const FIELD_SEPARATOR: &str = "<cC>";

/// Outer delimiter terminating every section.
pub const SECTION_TERMINATOR: &str = "<cB>";

/// Build the synthetic state string for a spawn.
///
/// Appends the unlock payload as one more terminated section after the
/// persisted text. A zero payload still emits an explicit `0` field.
#[must_use]
pub fn encode_state(custom_data: &str, data: i32) -> String {
    format!("{custom_data}{SANDBOX_DATA_MARKER}{FIELD_SEPARATOR}{data}{SECTION_TERMINATOR}")
}

/// Recover the ordered section list from state text.
///
/// Splits on the section terminator and drops empty fragments; this is the
/// canonical decode for every section already present in persisted text.
pub fn split_sections(state: &str) -> impl Iterator<Item = &str> {
    state.split(SECTION_TERMINATOR).filter(|s| !s.is_empty())
}

///
/// TESTS
///
