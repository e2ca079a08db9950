// Licensed under the Apache-2.0 license

//! Resolution of a decoded description into a fully defaulted peripheral.
//!
//! Resolution checks that every required key is present, applies the defaults
//! for optional top-level keys and derives the include guard. It is pure: the
//! same input always produces the same [`Peripheral`].

use crate::config::HeaderConfig;
use crate::error::{GeneratorError, GeneratorResult};
use crate::types::{FieldSpec, Literal, PeripheralSpec, RegisterSpec, ValueSpec};

/// Document referenced when a description does not name its reference manual.
pub const DEFAULT_BASEREF: &str = "the reference manual";

/// A peripheral with all defaults applied.
#[derive(Clone, Debug, PartialEq)]
pub struct Peripheral {
    pub shortname: String,
    pub longname: Option<String>,
    pub shortdocname: String,
    pub longdocname: String,
    pub baseref: String,
    pub registers_baserefext: String,
    pub definition_baserefext: String,
    pub license: Option<String>,
    pub copyright: Option<String>,
    pub projectname: String,
    pub includeguard: String,
    pub registers: Vec<Register>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Register {
    pub name: String,
    pub offset: u64,
    pub details: Option<String>,
    /// Register-specific override of [`Peripheral::definition_baserefext`].
    pub definition_baserefext: Option<String>,
    pub contents: RegisterContents,
}

/// What a register documents below its address definition.
#[derive(Clone, Debug, PartialEq)]
pub enum RegisterContents {
    /// Neither bit fields nor values; only the address is emitted.
    Empty,
    Fields(Vec<Field>),
    Values(Vec<EnumValue>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub name: String,
    pub shift: u32,
    pub length: u32,
    pub doc: Option<String>,
    /// Selector states. `Some` even when empty if the description lists `values`.
    pub values: Option<Vec<EnumValue>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumValue {
    pub name: String,
    pub value: Literal,
    pub doc: Option<String>,
}

/// How a field is rendered.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldKind<'a> {
    /// One bit, no values: a single flag definition.
    Flag,
    /// Values shifted into the field's position.
    Enumerated(&'a [EnumValue]),
    /// Several bits but no values. Nothing numeric is emitted for these.
    Unenumerated,
}

impl Field {
    pub fn kind(&self) -> FieldKind<'_> {
        match &self.values {
            Some(values) => FieldKind::Enumerated(values),
            None if self.length == 1 => FieldKind::Flag,
            None => FieldKind::Unenumerated,
        }
    }
}

impl Register {
    /// Suffix of the documentation group describing this register's contents.
    ///
    /// Registers without contents still point at a `bits` group.
    pub fn group_kind(&self) -> &'static str {
        match self.contents {
            RegisterContents::Values(_) => "values",
            RegisterContents::Fields(_) | RegisterContents::Empty => "bits",
        }
    }
}

/// Resolve a decoded description, applying defaults from `config`.
pub fn resolve(spec: PeripheralSpec, config: &HeaderConfig) -> GeneratorResult<Peripheral> {
    let shortname = spec
        .shortname
        .ok_or_else(|| GeneratorError::missing("shortname", "peripheral description"))?;
    let context = format!("peripheral {}", shortname);
    let registers = spec
        .registers
        .ok_or_else(|| GeneratorError::missing("registers", context.as_str()))?
        .into_iter()
        .enumerate()
        .map(|(i, reg)| resolve_register(reg, i))
        .collect::<GeneratorResult<Vec<_>>>()?;

    let includeguard = spec
        .includeguard
        .unwrap_or_else(|| config.include_guard(&shortname));
    let longdocname = spec
        .longdocname
        .or_else(|| spec.longname.clone())
        .unwrap_or_else(|| shortname.clone());

    Ok(Peripheral {
        shortdocname: spec.shortdocname.unwrap_or_else(|| shortname.clone()),
        longdocname,
        longname: spec.longname,
        baseref: spec
            .baseref
            .unwrap_or_else(|| DEFAULT_BASEREF.to_string()),
        registers_baserefext: spec.registers_baserefext.unwrap_or_default(),
        definition_baserefext: spec.definition_baserefext.unwrap_or_default(),
        license: spec.license,
        copyright: spec.copyright,
        projectname: spec
            .projectname
            .unwrap_or_else(|| config.project_name.clone()),
        includeguard,
        registers,
        shortname,
    })
}

fn resolve_register(spec: RegisterSpec, index: usize) -> GeneratorResult<Register> {
    let name = spec
        .name
        .ok_or_else(|| GeneratorError::missing("name", format!("register #{}", index)))?;
    let offset = spec
        .offset
        .ok_or_else(|| GeneratorError::missing("offset", format!("register {}", name)))?;

    let contents = match (spec.fields, spec.values) {
        (Some(_), Some(_)) => return Err(GeneratorError::ConflictingContents { register: name }),
        (Some(fields), None) => RegisterContents::Fields(
            fields
                .into_iter()
                .enumerate()
                .map(|(i, field)| resolve_field(field, i, &name))
                .collect::<GeneratorResult<_>>()?,
        ),
        (None, Some(values)) => RegisterContents::Values(resolve_values(
            values,
            &format!("register {}", name),
        )?),
        (None, None) => RegisterContents::Empty,
    };

    Ok(Register {
        name,
        offset,
        details: spec.details,
        definition_baserefext: spec.definition_baserefext,
        contents,
    })
}

fn resolve_field(spec: FieldSpec, index: usize, register: &str) -> GeneratorResult<Field> {
    let name = spec.name.ok_or_else(|| {
        GeneratorError::missing("name", format!("field #{} of register {}", index, register))
    })?;
    let shift = spec.shift.ok_or_else(|| {
        GeneratorError::missing("shift", format!("field {} of register {}", name, register))
    })?;
    let values = match spec.values {
        Some(values) => Some(resolve_values(
            values,
            &format!("field {} of register {}", name, register),
        )?),
        None => None,
    };
    Ok(Field {
        shift,
        length: spec.length.unwrap_or(1),
        doc: spec.doc,
        values,
        name,
    })
}

fn resolve_values(specs: Vec<ValueSpec>, owner: &str) -> GeneratorResult<Vec<EnumValue>> {
    specs
        .into_iter()
        .enumerate()
        .map(|(i, spec)| {
            let name = spec.name.ok_or_else(|| {
                GeneratorError::missing("name", format!("value #{} of {}", i, owner))
            })?;
            let value = spec.value.ok_or_else(|| {
                GeneratorError::missing("value", format!("value {} of {}", name, owner))
            })?;
            Ok(EnumValue {
                name,
                value,
                doc: spec.doc,
            })
        })
        .collect()
}
