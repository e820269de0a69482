//! # idlattr: runtime support for IDL-generated structures
//!
//! Code generated from an interface definition wraps every field of a structure in an
//! *attribute* and implements one traversal protocol. Output formats are visitors over that
//! protocol, so a structure never knows how it is printed or serialized.
//!
//! ## Attributes
//!
//! - [`Attribute`]: value with public read and write access.
//! - [`ReadOnlyAttribute`]: public read; writes need the owner's key ([`Owner::Key`]).
//! - [`DynamicArrayAttribute`]: N-dimensional array over a `Vec`, sized by one size function
//!   per dimension reading sibling fields of the owner.
//! - [`AutomaticArrayAttribute`]: same over a fixed `[A; MAX]` buffer; shapes needing more
//!   than `MAX` elements are rejected.
//!
//! Array elements are reachable by flat index (the arrays dereference to a slice) or by
//! coordinate (`at`, `at_mut`) through the row-major [`Shape`].
//!
//! ## Traversal
//!
//! [`Structure::accept`] visits every declared field once, in declaration order, calling one
//! of the four [`Visitor`] callbacks: raw scalar, structured scalar, raw array, structured
//! array. [`Structure::accept_and_init`] does the same for [`VisitorMut`] consumers and
//! reshapes arrays before filling them.
//!
//! ## Formats
//!
//! - [`pprint`] / [`to_pretty_string`]: indented text, output only.
//! - [`binary_write`] / [`to_bytes`]: raw host-order bytes of every raw value, no framing.
//! - [`binary_read`] / [`from_bytes`]: the exact mirror of the writer.
//! - [`binary_size`], [`visited_fields`]: inspection without producing output.
//!
//! ## Example
//!
//! ```text
//! struct Point { int x; int y; }
//! ```
//!
//! pretty prints as
//!
//! ```text
//! Point {
//!   int x = 3
//!   int y = 4
//! }
//! ```
//!
//! See `tests/common/mod.rs` for hand-written structures in the shape the code generator emits.

pub mod array;
pub mod attribute;
pub mod binary;
pub mod error;
pub mod meta;
pub mod pprint;
pub mod raw;
pub mod shape;
pub mod visit;

pub use array::{AutomaticArrayAttribute, DynamicArrayAttribute};
pub use attribute::{Attribute, Owner, ReadOnlyAttribute};
pub use binary::{
    binary_read, binary_size, binary_write, from_bytes, from_bytes_with_extent, to_bytes,
    BinaryReader, BinaryWriter, ByteCounter,
};
pub use error::{Error, Result};
pub use meta::{FieldKind, MetaInfo};
pub use pprint::{pprint, pprint_with, to_pretty_string, to_pretty_string_with, PrettyPrintOptions, PrettyPrinter};
pub use raw::RawValue;
pub use shape::{Shape, SizeFn};
pub use visit::{visited_fields, FieldRecorder, Structure, VisitedField, Visitor, VisitorMut};
