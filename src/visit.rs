//! Traversal protocol between generated structures and output/input formats.
//!
//! A generated structure implements [`Structure`]: `accept` walks every declared field in
//! declaration order and calls exactly one of the four [`Visitor`] callbacks per field;
//! `accept_and_init` does the same with mutable access for [`VisitorMut`] consumers (the
//! binary reader), reshaping each array attribute right before it is visited so that its
//! size functions see the sibling values just read.
//!
//! ## Generated code shape
//!
//! ```ignore
//! const META_X: MetaInfo = MetaInfo::raw_scalar("int", "x");
//! const META_Y: MetaInfo = MetaInfo::raw_scalar("int", "y");
//!
//! impl Structure for Point {
//!     const TYPE_NAME: &'static str = "Point";
//!
//!     fn accept<V: Visitor>(&self, v: &mut V) -> Result<()> {
//!         v.visit_raw_scalar(&META_X, self, self.x.get())?;
//!         v.visit_raw_scalar(&META_Y, self, self.y.get())
//!     }
//!
//!     fn accept_and_init<V: VisitorMut>(&mut self, v: &mut V) -> Result<()> {
//!         v.visit_raw_scalar_mut::<Self, _>(&META_X, self.x.get_mut())?;
//!         v.visit_raw_scalar_mut::<Self, _>(&META_Y, self.y.get_mut())
//!     }
//! }
//! ```
//!
//! The field order in both entry points is the byte order of the binary format.

use crate::error::Result;
use crate::meta::MetaInfo;
use crate::raw::RawValue;

/// A generated structure that can be traversed field by field.
pub trait Structure {
    /// IDL name of the structure, used by the pretty printer's top-level header.
    const TYPE_NAME: &'static str;

    /// Read traversal: every declared field, once, in declaration order.
    fn accept<V: Visitor>(&self, visitor: &mut V) -> Result<()>;

    /// Read/write traversal: same order as [`Structure::accept`]; array attributes are
    /// reshaped from their size functions before being handed to the visitor.
    fn accept_and_init<V: VisitorMut>(&mut self, visitor: &mut V) -> Result<()>;
}

/// Consumer of a read traversal.
pub trait Visitor {
    fn visit_raw_scalar<O: Structure, T: RawValue>(&mut self, meta: &MetaInfo, owner: &O, value: &T) -> Result<()>;

    fn visit_structured_scalar<O: Structure, S: Structure>(
        &mut self,
        meta: &MetaInfo,
        owner: &O,
        value: &S,
    ) -> Result<()>;

    fn visit_raw_array<O: Structure, T: RawValue>(&mut self, meta: &MetaInfo, owner: &O, values: &[T]) -> Result<()>;

    fn visit_structured_array<O: Structure, S: Structure>(
        &mut self,
        meta: &MetaInfo,
        owner: &O,
        values: &[S],
    ) -> Result<()>;
}

/// Consumer of a read/write traversal.
///
/// The owner is mutably borrowed through the field, so it is identified by type only.
pub trait VisitorMut {
    fn visit_raw_scalar_mut<O: Structure, T: RawValue>(&mut self, meta: &MetaInfo, value: &mut T) -> Result<()>;

    fn visit_structured_scalar_mut<O: Structure, S: Structure>(&mut self, meta: &MetaInfo, value: &mut S) -> Result<()>;

    fn visit_raw_array_mut<O: Structure, T: RawValue>(&mut self, meta: &MetaInfo, values: &mut [T]) -> Result<()>;

    fn visit_structured_array_mut<O: Structure, S: Structure>(
        &mut self,
        meta: &MetaInfo,
        values: &mut [S],
    ) -> Result<()>;
}

/// One field reached during a traversal, with its dotted path from the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitedField {
    /// e.g. `origin.x` or `points[2].y`
    pub path: String,
    pub owner: &'static str,
    pub meta: MetaInfo,
}

/// Visitor that records every field a read traversal reaches, depth first.
#[derive(Debug, Default)]
pub struct FieldRecorder {
    prefix: String,
    fields: Vec<VisitedField>,
}

impl FieldRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_fields(self) -> Vec<VisitedField> {
        self.fields
    }

    fn record<O: Structure>(&mut self, meta: &MetaInfo) -> String {
        let path = format!("{}{}", self.prefix, meta.field_name);
        self.fields.push(VisitedField {
            path: path.clone(),
            owner: O::TYPE_NAME,
            meta: *meta,
        });
        path
    }

    fn descend<S: Structure>(&mut self, prefix: String, value: &S) -> Result<()> {
        let saved = std::mem::replace(&mut self.prefix, prefix);
        let r = value.accept(self);
        self.prefix = saved;
        r
    }
}

impl Visitor for FieldRecorder {
    fn visit_raw_scalar<O: Structure, T: RawValue>(&mut self, meta: &MetaInfo, _owner: &O, _value: &T) -> Result<()> {
        self.record::<O>(meta);
        Ok(())
    }

    fn visit_structured_scalar<O: Structure, S: Structure>(
        &mut self,
        meta: &MetaInfo,
        _owner: &O,
        value: &S,
    ) -> Result<()> {
        let path = self.record::<O>(meta);
        self.descend(format!("{}.", path), value)
    }

    fn visit_raw_array<O: Structure, T: RawValue>(&mut self, meta: &MetaInfo, _owner: &O, _values: &[T]) -> Result<()> {
        self.record::<O>(meta);
        Ok(())
    }

    fn visit_structured_array<O: Structure, S: Structure>(
        &mut self,
        meta: &MetaInfo,
        _owner: &O,
        values: &[S],
    ) -> Result<()> {
        let path = self.record::<O>(meta);
        for (i, v) in values.iter().enumerate() {
            self.descend(format!("{}[{}].", path, i), v)?;
        }
        Ok(())
    }
}

/// Lists the fields a read traversal of `structure` visits, in visiting order.
pub fn visited_fields<S: Structure>(structure: &S) -> Result<Vec<VisitedField>> {
    let mut recorder = FieldRecorder::new();
    structure.accept(&mut recorder)?;
    Ok(recorder.into_fields())
}
