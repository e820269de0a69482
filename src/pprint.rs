//! Human-readable rendering of generated structures.
//!
//! ```text
//! Packet {
//!   int id = 7
//!   Point origin = {
//!     int x = 3
//!     int y = 4
//!   }
//!   short[] samples = [ 1 2 3 ]
//!   Point[] path = [
//!     {
//!       int x = 0
//!       int y = 0
//!     }
//!   ]
//! }
//! ```
//!
//! Members of a nested structure are indented by one step, members of array elements by
//! two. Raw arrays longer than [`PrettyPrintOptions::max_array_elems_per_line`] are split
//! into lines of at most that many elements. Values are printed with `Display`, unquoted.

use crate::error::Result;
use crate::meta::MetaInfo;
use crate::raw::RawValue;
use crate::visit::{Structure, Visitor};
use std::io::Write;

/// Formatting knobs for [`pprint_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrettyPrintOptions {
    /// Raw array elements per line; 0 disables wrapping.
    pub max_array_elems_per_line: usize,
    /// Spaces added per nesting level (array elements get twice this).
    pub indent_step: usize,
}

impl Default for PrettyPrintOptions {
    fn default() -> Self {
        PrettyPrintOptions {
            max_array_elems_per_line: 10,
            indent_step: 2,
        }
    }
}

impl PrettyPrintOptions {
    pub fn with_max_array_elems_per_line(mut self, n: usize) -> Self {
        self.max_array_elems_per_line = n;
        self
    }

    pub fn with_indent_step(mut self, n: usize) -> Self {
        self.indent_step = n;
        self
    }
}

/// Visitor writing one line per scalar at a fixed indentation.
pub struct PrettyPrinter<'a, W: Write + ?Sized> {
    out: &'a mut W,
    indentation: usize,
    opts: PrettyPrintOptions,
}

impl<'a, W: Write + ?Sized> PrettyPrinter<'a, W> {
    pub fn new(out: &'a mut W, indentation: usize, opts: PrettyPrintOptions) -> Self {
        PrettyPrinter {
            out,
            indentation,
            opts,
        }
    }

    fn nested(&mut self, extra: usize) -> PrettyPrinter<'_, W> {
        PrettyPrinter {
            out: &mut *self.out,
            indentation: self.indentation + extra,
            opts: self.opts,
        }
    }

    fn pad(&self, extra: usize) -> String {
        " ".repeat(self.indentation + extra)
    }
}

impl<W: Write + ?Sized> Visitor for PrettyPrinter<'_, W> {
    fn visit_raw_scalar<O: Structure, T: RawValue>(&mut self, meta: &MetaInfo, _owner: &O, value: &T) -> Result<()> {
        writeln!(self.out, "{}{} {} = {}", self.pad(0), meta.type_name, meta.field_name, value)?;
        Ok(())
    }

    fn visit_structured_scalar<O: Structure, S: Structure>(
        &mut self,
        meta: &MetaInfo,
        _owner: &O,
        value: &S,
    ) -> Result<()> {
        let pad = self.pad(0);
        writeln!(self.out, "{}{} {} = {{", pad, meta.type_name, meta.field_name)?;
        let step = self.opts.indent_step;
        value.accept(&mut self.nested(step))?;
        writeln!(self.out, "{}}}", pad)?;
        Ok(())
    }

    fn visit_raw_array<O: Structure, T: RawValue>(&mut self, meta: &MetaInfo, _owner: &O, values: &[T]) -> Result<()> {
        let pad = self.pad(0);
        write!(self.out, "{}{}[] {} = [", pad, meta.type_name, meta.field_name)?;
        let wrap = self.opts.max_array_elems_per_line;
        if wrap == 0 || values.len() <= wrap {
            for v in values {
                write!(self.out, " {}", v)?;
            }
        } else {
            for line in values.chunks(wrap) {
                write!(self.out, "\n{}", pad)?;
                for v in line {
                    write!(self.out, " {}", v)?;
                }
            }
        }
        writeln!(self.out, " ]")?;
        Ok(())
    }

    fn visit_structured_array<O: Structure, S: Structure>(
        &mut self,
        meta: &MetaInfo,
        _owner: &O,
        values: &[S],
    ) -> Result<()> {
        let pad = self.pad(0);
        let step = self.opts.indent_step;
        let elem_pad = self.pad(step);
        writeln!(self.out, "{}{}[] {} = [", pad, meta.type_name, meta.field_name)?;
        for v in values {
            writeln!(self.out, "{}{{", elem_pad)?;
            v.accept(&mut self.nested(2 * step))?;
            writeln!(self.out, "{}}}", elem_pad)?;
        }
        writeln!(self.out, "{}]", pad)?;
        Ok(())
    }
}

/// Pretty prints `structure` to `out` with default options.
pub fn pprint<S: Structure, W: Write + ?Sized>(structure: &S, out: &mut W) -> Result<()> {
    pprint_with(structure, out, PrettyPrintOptions::default())
}

pub fn pprint_with<S: Structure, W: Write + ?Sized>(
    structure: &S,
    out: &mut W,
    opts: PrettyPrintOptions,
) -> Result<()> {
    writeln!(out, "{} {{", S::TYPE_NAME)?;
    structure.accept(&mut PrettyPrinter::new(out, opts.indent_step, opts))?;
    writeln!(out, "}}")?;
    Ok(())
}

/// Pretty prints into a `String`.
pub fn to_pretty_string<S: Structure>(structure: &S) -> Result<String> {
    to_pretty_string_with(structure, PrettyPrintOptions::default())
}

pub fn to_pretty_string_with<S: Structure>(structure: &S, opts: PrettyPrintOptions) -> Result<String> {
    let mut buf = Vec::new();
    pprint_with(structure, &mut buf, opts)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
