// Licensed under the Apache-2.0 license

//! Identifier and number formatting for C definitions.

/// Joins identifier fragments with underscores.
///
/// Fragments are used as written; descriptions are expected to already use the
/// case the header should have.
///
/// # Examples
/// ```
/// use registers_header_generator::util::ident;
/// assert_eq!(ident(&["CMU", "CTRL", "HFXOMODE"]), "CMU_CTRL_HFXOMODE");
/// ```
pub fn ident(parts: &[&str]) -> String {
    parts.join("_")
}

/// Formats a register offset as a `0x`-prefixed hex number with at least three
/// digits, so the offsets of a peripheral's registers line up.
///
/// # Examples
/// ```
/// use registers_header_generator::util::hex_offset;
/// assert_eq!(hex_offset(0), "0x000");
/// assert_eq!(hex_offset(0x10), "0x010");
/// assert_eq!(hex_offset(0x1234), "0x1234");
/// ```
pub fn hex_offset(offset: u64) -> String {
    format!("{offset:#05x}")
}
