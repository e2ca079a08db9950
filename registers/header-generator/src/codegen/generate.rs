// Licensed under the Apache-2.0 license

//! Writes the sections of a peripheral header in their fixed order.
//!
//! ```text
//! license
//! @file block
//! peripheral group            (open)
//! #ifndef / #define guard
//! #include ...
//! registers-and-values group  (open)
//!   registers group           (open, address definitions, close)
//!   per-register bits/values  (open, definitions, close)
//! registers-and-values group  (close)
//! convenience fragment
//! peripheral group            (close)
//! #endif
//! ```

use crate::config::HeaderConfig;
use crate::define::{missing_values_note, Definition};
use crate::error::GeneratorResult;
use crate::license::LicenseTable;
use crate::output::HeaderWriter;
use crate::resolve::{FieldKind, Peripheral, Register, RegisterContents};
use crate::template::Placeholders;
use log::{debug, info};

pub(super) struct HeaderGenerator<'a> {
    peripheral: &'a Peripheral,
    config: &'a HeaderConfig,
    placeholders: Placeholders<'a>,
    out: HeaderWriter,
}

impl<'a> HeaderGenerator<'a> {
    pub(super) fn new(peripheral: &'a Peripheral, config: &'a HeaderConfig) -> Self {
        Self {
            peripheral,
            config,
            placeholders: Placeholders::new(peripheral),
            out: HeaderWriter::new(),
        }
    }

    pub(super) fn generate(
        mut self,
        licenses: &LicenseTable,
        convenience: &str,
    ) -> GeneratorResult<String> {
        info!(
            "Generating header for {} ({} registers)",
            self.peripheral.shortname,
            self.peripheral.registers.len()
        );
        let ctx = self.placeholders;

        let license = licenses.render(&ctx)?;
        self.out.raw(&license);
        self.out.blank_line();

        self.out.comment(&["@file", "@see {shortdocname}"], &ctx)?;
        self.out.blank_line();

        self.out.open_group(
            &[
                "Definitions for the {shortname} subsystem ({longname}).",
                "This corresponds to the description in {baseref}.",
                "@defgroup {shortdocname} {longdocname}",
            ],
            &ctx,
        )?;
        self.out.blank_line();

        self.write_include_guard();
        self.out.blank_line();
        self.write_includes();
        self.out.blank_line();

        self.out.open_group(
            &[
                "Register definitions and register value definitions for the {shortname} subsystem",
                "@defgroup {shortdocname}_regsandvals {longdocname} registers and values",
            ],
            &ctx,
        )?;
        self.out.blank_line();

        self.write_register_addresses()?;

        let peripheral = self.peripheral;
        for register in &peripheral.registers {
            self.write_register_contents(register)?;
        }

        self.out.close_group()?; // registers and values
        self.out.blank_line();

        self.out.raw(convenience);
        self.out.blank_line();
        self.out.close_group()?; // peripheral
        self.out.blank_line();
        self.out.line("#endif");

        self.out.finish()
    }

    fn write_include_guard(&mut self) {
        let guard = &self.peripheral.includeguard;
        self.out.line(&format!("#ifndef {guard}"));
        self.out.line(&format!("#define {guard}"));
    }

    fn write_includes(&mut self) {
        for header in &self.config.includes {
            self.out.line(&format!("#include <{header}>"));
        }
    }

    fn write_register_addresses(&mut self) -> GeneratorResult<()> {
        self.out.open_group(
            &[
                "These definitions reflect {baseref}{registers_baserefext}",
                "@defgroup {shortdocname}_registers {longdocname} registers",
            ],
            &self.placeholders,
        )?;
        self.out.blank_line();

        let peripheral = self.peripheral;
        for register in &peripheral.registers {
            self.out.define(&Definition::register_address(peripheral, register));
        }
        self.out.blank_line();
        self.out.close_group()?;
        self.out.blank_line();
        Ok(())
    }

    /// Writes the bits or values group of one register. Registers with
    /// neither are skipped.
    fn write_register_contents(&mut self, register: &'a Register) -> GeneratorResult<()> {
        let (heading, kind) = match register.contents {
            RegisterContents::Empty => {
                debug!("{}: no fields or values", register.name);
                return Ok(());
            }
            RegisterContents::Fields(_) => ("Bit states", "bits"),
            RegisterContents::Values(_) => ("Values", "values"),
        };
        debug!("{}: writing {}", register.name, kind);

        let ctx = self.placeholders.with_register(register);
        let heading = format!("{heading} for the {{shortname}}_{{name}} register");
        let see = format!(
            "See {{baseref}}{{definition_baserefext}} for definitions{}",
            register.details.as_deref().unwrap_or(".")
        );
        let defgroup = format!(
            "@defgroup {{shortdocname}}_{{name}}_{kind} {{longdocname}} {{name}} {kind}"
        );
        self.out.open_group(&[heading.as_str(), see.as_str(), defgroup.as_str()], &ctx)?;
        self.out.blank_line();

        let peripheral = self.peripheral;
        match &register.contents {
            RegisterContents::Fields(fields) => {
                for field in fields {
                    match field.kind() {
                        FieldKind::Enumerated(values) => {
                            for value in values {
                                self.out.define(&Definition::field_value(
                                    peripheral, register, field, value,
                                ));
                            }
                        }
                        FieldKind::Flag => {
                            self.out.define(&Definition::flag(peripheral, register, field));
                        }
                        FieldKind::Unenumerated => {
                            // TODO: emit a mask once descriptions declare a type for wide fields.
                            self.out.line(&missing_values_note(field));
                        }
                    }
                }
            }
            RegisterContents::Values(values) => {
                for value in values {
                    self.out.define(&Definition::register_value(peripheral, register, value));
                }
            }
            RegisterContents::Empty => {}
        }

        self.out.blank_line();
        self.out.close_group()?;
        self.out.blank_line();
        Ok(())
    }
}
