// Licensed under the Apache-2.0 license

//! `#define` lines for registers, flags and values.
//!
//! Every definition is one line. The identifier is padded to
//! [`NAME_COLUMN_WIDTH`] characters so that values line up, with at least one
//! space when the identifier is longer:
//!
//! ```text
//! #define CMU_CTRL                MMIO32(CMU_BASE + 0x000) /**< @see EFM32TG_CMU_CTRL_bits */
//! #define CMU_CTRL_HFXOMODE_XTAL  (0<<0) /**< 4-32 MHz crystal oscillator */
//! ```

use crate::resolve::{EnumValue, Field, Peripheral, Register};
use crate::util::{hex_offset, ident};
use std::fmt;

/// Width the identifier is padded to.
pub const NAME_COLUMN_WIDTH: usize = 24;

/// One object-like macro definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Definition {
    pub name: String,
    pub value: String,
    /// Rendered as a trailing `/**< ... */` annotation.
    pub comment: Option<String>,
}

impl Definition {
    pub fn new(name: String, value: String, comment: Option<String>) -> Self {
        Self {
            name,
            value,
            comment,
        }
    }

    /// Address of a register: `<SHORTNAME>_<REG>` = `MMIO32(<SHORTNAME>_BASE + <offset>)`.
    ///
    /// The comment links to the group documenting the register's bits or values.
    pub fn register_address(peripheral: &Peripheral, register: &Register) -> Self {
        Self::new(
            ident(&[peripheral.shortname.as_str(), register.name.as_str()]),
            format!(
                "MMIO32({}_BASE + {})",
                peripheral.shortname,
                hex_offset(register.offset)
            ),
            Some(format!(
                "@see {}",
                ident(&[
                    peripheral.shortdocname.as_str(),
                    register.name.as_str(),
                    register.group_kind(),
                ])
            )),
        )
    }

    /// A single-bit flag: `(1<<shift)`.
    pub fn flag(peripheral: &Peripheral, register: &Register, field: &Field) -> Self {
        Self::new(
            ident(&[
                peripheral.shortname.as_str(),
                register.name.as_str(),
                field.name.as_str(),
            ]),
            format!("(1<<{})", field.shift),
            field.doc.clone(),
        )
    }

    /// One selector state of a multi-bit field, shifted into position.
    pub fn field_value(
        peripheral: &Peripheral,
        register: &Register,
        field: &Field,
        value: &EnumValue,
    ) -> Self {
        Self::new(
            ident(&[
                peripheral.shortname.as_str(),
                register.name.as_str(),
                field.name.as_str(),
                value.name.as_str(),
            ]),
            format!("({}<<{})", value.value, field.shift),
            value.doc.clone(),
        )
    }

    /// A value of a register without bit fields, used verbatim.
    pub fn register_value(peripheral: &Peripheral, register: &Register, value: &EnumValue) -> Self {
        Self::new(
            ident(&[
                peripheral.shortname.as_str(),
                register.name.as_str(),
                value.name.as_str(),
            ]),
            value.value.to_string(),
            value.doc.clone(),
        )
    }
}

impl fmt::Display for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let padding = NAME_COLUMN_WIDTH
            .saturating_sub(self.name.chars().count())
            .max(1);
        write!(
            f,
            "#define {}{:padding$}{}",
            self.name,
            "",
            self.value,
            padding = padding
        )?;
        if let Some(comment) = &self.comment {
            write!(f, " /**< {} */", comment)?;
        }
        Ok(())
    }
}

/// Stand-in for a multi-bit field that lists no values. No mask is defined
/// for such fields.
pub fn missing_values_note(field: &Field) -> String {
    format!("/* No values defined for the field {} */", field.name)
}
