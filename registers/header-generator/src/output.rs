// Licensed under the Apache-2.0 license

//! Accumulates the text of one generated header.
//!
//! [`HeaderWriter`] is the only way the generator emits text. Besides plain
//! lines it knows about documentation groups: [`HeaderWriter::open_group`]
//! writes a comment block ending in `@{` and [`HeaderWriter::close_group`]
//! writes the matching `/** @} */`. The writer counts open groups so that a
//! header can never be finished with a group left open or closed twice.
//!
//! ```text
//! open_group(["Register definitions", "@defgroup X_regs ..."])   depth 1
//!   define(...)
//!   close_group()                                                  depth 0
//! finish()                                                         Ok(text)
//! ```

use crate::comment::{comment_block, GROUP_CLOSE};
use crate::define::Definition;
use crate::error::{GeneratorError, GeneratorResult};
use crate::template::Placeholders;
use std::fmt::Write;

/// Fragment that opens a documentation group.
const GROUP_OPEN: &str = "@{{";

#[derive(Debug, Default)]
pub struct HeaderWriter {
    text: String,
    open_groups: usize,
}

impl HeaderWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documentation groups currently open.
    pub fn depth(&self) -> usize {
        self.open_groups
    }

    /// Append text as is.
    pub fn raw(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Append one line followed by a newline.
    pub fn line(&mut self, line: &str) {
        self.text.push_str(line);
        self.text.push('\n');
    }

    pub fn blank_line(&mut self) {
        self.text.push('\n');
    }

    /// Append a comment block that does not open a group.
    pub fn comment(
        &mut self,
        fragments: &[&str],
        placeholders: &Placeholders,
    ) -> GeneratorResult<()> {
        let block = comment_block(fragments, placeholders)?;
        self.raw(&block);
        Ok(())
    }

    /// Append a comment block that opens a documentation group. The `@{`
    /// opener is added after `fragments`.
    pub fn open_group(
        &mut self,
        fragments: &[&str],
        placeholders: &Placeholders,
    ) -> GeneratorResult<()> {
        let mut all = fragments.to_vec();
        all.push(GROUP_OPEN);
        self.comment(&all, placeholders)?;
        self.open_groups += 1;
        Ok(())
    }

    /// Close the most recently opened group.
    pub fn close_group(&mut self) -> GeneratorResult<()> {
        if self.open_groups == 0 {
            return Err(GeneratorError::UnbalancedGroups(
                "closing a group with none open",
            ));
        }
        self.open_groups -= 1;
        self.raw(GROUP_CLOSE);
        Ok(())
    }

    pub fn define(&mut self, definition: &Definition) {
        writeln!(self.text, "{definition}").unwrap();
    }

    /// Return the header text, checking that every group was closed.
    pub fn finish(self) -> GeneratorResult<String> {
        if self.open_groups != 0 {
            return Err(GeneratorError::UnbalancedGroups(
                "header finished with groups left open",
            ));
        }
        Ok(self.text)
    }
}
