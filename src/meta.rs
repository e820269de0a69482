//! Static field descriptors attached to generated structures.

/// How a field is dispatched during traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Fixed-size plain value (`u8`, `i32`, `f64`, `bool`, ...).
    RawScalar,
    /// Nested generated structure.
    StructuredScalar,
    /// Sequence of fixed-size plain values.
    RawArray,
    /// Sequence of nested generated structures.
    StructuredArray,
}

impl FieldKind {
    pub fn is_array(self) -> bool {
        matches!(self, FieldKind::RawArray | FieldKind::StructuredArray)
    }

    pub fn is_structured(self) -> bool {
        matches!(self, FieldKind::StructuredScalar | FieldKind::StructuredArray)
    }
}

/// Descriptor of one declared field: IDL type name, field name and dispatch kind.
///
/// Generated code declares one `const` per field; descriptors only label output and are
/// never stored per value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MetaInfo {
    pub type_name: &'static str,
    pub field_name: &'static str,
    pub kind: FieldKind,
}

impl MetaInfo {
    pub const fn new(type_name: &'static str, field_name: &'static str, kind: FieldKind) -> Self {
        MetaInfo {
            type_name,
            field_name,
            kind,
        }
    }

    pub const fn raw_scalar(type_name: &'static str, field_name: &'static str) -> Self {
        Self::new(type_name, field_name, FieldKind::RawScalar)
    }

    pub const fn structured_scalar(type_name: &'static str, field_name: &'static str) -> Self {
        Self::new(type_name, field_name, FieldKind::StructuredScalar)
    }

    pub const fn raw_array(type_name: &'static str, field_name: &'static str) -> Self {
        Self::new(type_name, field_name, FieldKind::RawArray)
    }

    pub const fn structured_array(type_name: &'static str, field_name: &'static str) -> Self {
        Self::new(type_name, field_name, FieldKind::StructuredArray)
    }
}
