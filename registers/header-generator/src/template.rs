// Licensed under the Apache-2.0 license

//! `{name}` placeholder substitution for doc fragments and license texts.
//!
//! The set of names a template may reference is closed: [`Placeholder`] lists
//! every one of them. A template that names anything else fails with
//! [`GeneratorError::UnknownPlaceholder`], and one that names a placeholder
//! without a value for the current peripheral fails with
//! [`GeneratorError::UnsetPlaceholder`]. `{{` and `}}` produce literal braces.

use crate::error::{GeneratorError, GeneratorResult};
use crate::resolve::{Peripheral, Register};

/// Every name a template may reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placeholder {
    ProjectName,
    ShortName,
    LongName,
    ShortDocName,
    LongDocName,
    BaseRef,
    RegistersBaseRefExt,
    DefinitionBaseRefExt,
    IncludeGuard,
    License,
    Copyright,
    /// Name of the register currently being documented.
    Name,
}

impl Placeholder {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "projectname" => Placeholder::ProjectName,
            "shortname" => Placeholder::ShortName,
            "longname" => Placeholder::LongName,
            "shortdocname" => Placeholder::ShortDocName,
            "longdocname" => Placeholder::LongDocName,
            "baseref" => Placeholder::BaseRef,
            "registers_baserefext" => Placeholder::RegistersBaseRefExt,
            "definition_baserefext" => Placeholder::DefinitionBaseRefExt,
            "includeguard" => Placeholder::IncludeGuard,
            "license" => Placeholder::License,
            "copyright" => Placeholder::Copyright,
            "name" => Placeholder::Name,
            _ => return None,
        })
    }
}

/// Values for the placeholders: the peripheral's fields, with register-level
/// values layered on top for register-specific fragments.
#[derive(Clone, Copy, Debug)]
pub struct Placeholders<'a> {
    peripheral: &'a Peripheral,
    register: Option<&'a Register>,
}

impl<'a> Placeholders<'a> {
    pub fn new(peripheral: &'a Peripheral) -> Self {
        Self {
            peripheral,
            register: None,
        }
    }

    /// Context for fragments documenting `register`. Provides `{name}` and
    /// lets the register override `{definition_baserefext}`.
    pub fn with_register(self, register: &'a Register) -> Self {
        Self {
            register: Some(register),
            ..self
        }
    }

    pub fn peripheral(&self) -> &'a Peripheral {
        self.peripheral
    }

    pub fn get(&self, placeholder: Placeholder) -> Option<&'a str> {
        let p = self.peripheral;
        match placeholder {
            Placeholder::ProjectName => Some(p.projectname.as_str()),
            Placeholder::ShortName => Some(p.shortname.as_str()),
            Placeholder::LongName => p.longname.as_deref(),
            Placeholder::ShortDocName => Some(p.shortdocname.as_str()),
            Placeholder::LongDocName => Some(p.longdocname.as_str()),
            Placeholder::BaseRef => Some(p.baseref.as_str()),
            Placeholder::RegistersBaseRefExt => Some(p.registers_baserefext.as_str()),
            Placeholder::DefinitionBaseRefExt => Some(
                self.register
                    .and_then(|r| r.definition_baserefext.as_deref())
                    .unwrap_or(p.definition_baserefext.as_str()),
            ),
            Placeholder::IncludeGuard => Some(p.includeguard.as_str()),
            Placeholder::License => p.license.as_deref(),
            Placeholder::Copyright => p.copyright.as_deref(),
            Placeholder::Name => self.register.map(|r| r.name.as_str()),
        }
    }

    /// Substitute every placeholder in `template`.
    pub fn render(&self, template: &str) -> GeneratorResult<String> {
        let malformed = |reason| GeneratorError::MalformedTemplate {
            template: template.to_string(),
            reason,
        };

        let mut out = String::with_capacity(template.len());
        let mut chars = template.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    out.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    out.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some('{') | None => return Err(malformed("unterminated placeholder")),
                            Some(c) => name.push(c),
                        }
                    }
                    let placeholder = Placeholder::from_name(&name).ok_or_else(|| {
                        GeneratorError::UnknownPlaceholder {
                            name: name.clone(),
                            template: template.to_string(),
                        }
                    })?;
                    let value =
                        self.get(placeholder)
                            .ok_or_else(|| GeneratorError::UnsetPlaceholder {
                                name: name.clone(),
                                template: template.to_string(),
                            })?;
                    out.push_str(value);
                }
                '}' => return Err(malformed("single '}' encountered")),
                c => out.push(c),
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HeaderConfig;
    use crate::resolve::resolve;
    use crate::types::PeripheralSpec;

    fn peripheral() -> Peripheral {
        let spec = PeripheralSpec::from_yaml(
            r#"
shortname: LCD
longname: Liquid Crystal Display driver
baseref: d0034_efm32tg_reference_manual.pdf section 29
registers_baserefext: ".4"
definition_baserefext: ".5"
registers:
  - {name: CTRL, offset: 0}
  - {name: CMD, offset: 4, definition_baserefext: ".5.2"}
"#,
        )
        .unwrap();
        resolve(spec, &HeaderConfig::with_defaults()).unwrap()
    }

    #[test]
    fn test_render_peripheral_fields() {
        let p = peripheral();
        let ctx = Placeholders::new(&p);
        assert_eq!(
            ctx.render("These definitions reflect {baseref}{registers_baserefext}")
                .unwrap(),
            "These definitions reflect d0034_efm32tg_reference_manual.pdf section 29.4"
        );
        assert_eq!(ctx.render("{projectname}").unwrap(), "libopencm3");
    }

    #[test]
    fn test_escaped_braces() {
        let p = peripheral();
        let ctx = Placeholders::new(&p);
        assert_eq!(ctx.render("@{{").unwrap(), "@{");
        assert_eq!(ctx.render("a }} b").unwrap(), "a } b");
    }

    #[test]
    fn test_register_override() {
        let p = peripheral();
        let ctx = Placeholders::new(&p);
        assert!(matches!(
            ctx.render("{shortname}_{name}"),
            Err(GeneratorError::UnsetPlaceholder { .. })
        ));
        let ctrl = ctx.with_register(&p.registers[0]);
        assert_eq!(ctrl.render("{shortname}_{name}").unwrap(), "LCD_CTRL");
        assert_eq!(ctrl.render("{definition_baserefext}").unwrap(), ".5");

        let cmd = ctx.with_register(&p.registers[1]);
        assert_eq!(cmd.render("{definition_baserefext}").unwrap(), ".5.2");
        assert_eq!(ctx.render("{definition_baserefext}").unwrap(), ".5");
    }

    #[test]
    fn test_unknown_placeholder() {
        let p = peripheral();
        let err = Placeholders::new(&p).render("{year}").unwrap_err();
        assert!(matches!(err, GeneratorError::UnknownPlaceholder { name, .. } if name == "year"));
    }

    #[test]
    fn test_unset_placeholder() {
        let p = peripheral();
        let err = Placeholders::new(&p).render("(C) {copyright}").unwrap_err();
        assert!(matches!(err, GeneratorError::UnsetPlaceholder { name, .. } if name == "copyright"));
    }

    #[test]
    fn test_malformed() {
        let p = peripheral();
        let ctx = Placeholders::new(&p);
        assert!(matches!(
            ctx.render("{shortname"),
            Err(GeneratorError::MalformedTemplate { .. })
        ));
        assert!(matches!(
            ctx.render("a } b"),
            Err(GeneratorError::MalformedTemplate { .. })
        ));
    }
}
