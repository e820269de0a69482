//! Flat binary write and read of generated structures.
//!
//! The payload is the concatenation of every raw value reached by the traversal, in
//! declaration order, nested structures depth first, arrays element by element in
//! row-major order. There is no header, tag, length prefix or padding: both ends must
//! share the structure definitions and the host byte order (see [`crate::raw`]).
//!
//! Reading goes through [`Structure::accept_and_init`], so array attributes are resized from
//! the sizes read earlier in the same payload before their elements are filled. A short
//! input surfaces as [`Error::Io`](crate::Error::Io) with `UnexpectedEof`.

use crate::error::Result;
use crate::meta::MetaInfo;
use crate::raw::RawValue;
use crate::visit::{Structure, Visitor, VisitorMut};
use std::io::{Cursor, Read, Write};

/// Visitor emitting raw bytes to a stream.
pub struct BinaryWriter<'a, W: Write + ?Sized> {
    out: &'a mut W,
}

impl<'a, W: Write + ?Sized> BinaryWriter<'a, W> {
    pub fn new(out: &'a mut W) -> Self {
        BinaryWriter { out }
    }
}

impl<W: Write + ?Sized> Visitor for BinaryWriter<'_, W> {
    fn visit_raw_scalar<O: Structure, T: RawValue>(&mut self, meta: &MetaInfo, _owner: &O, value: &T) -> Result<()> {
        log::trace!("write {}.{} ({} bytes)", O::TYPE_NAME, meta.field_name, T::SIZE);
        value.write_raw(&mut *self.out)?;
        Ok(())
    }

    fn visit_structured_scalar<O: Structure, S: Structure>(
        &mut self,
        meta: &MetaInfo,
        _owner: &O,
        value: &S,
    ) -> Result<()> {
        log::trace!("write {}.{} ({})", O::TYPE_NAME, meta.field_name, S::TYPE_NAME);
        value.accept(self)
    }

    fn visit_raw_array<O: Structure, T: RawValue>(&mut self, meta: &MetaInfo, _owner: &O, values: &[T]) -> Result<()> {
        log::trace!("write {}.{} ({} x {} bytes)", O::TYPE_NAME, meta.field_name, values.len(), T::SIZE);
        for v in values {
            v.write_raw(&mut *self.out)?;
        }
        Ok(())
    }

    fn visit_structured_array<O: Structure, S: Structure>(
        &mut self,
        meta: &MetaInfo,
        _owner: &O,
        values: &[S],
    ) -> Result<()> {
        log::trace!("write {}.{} ({} x {})", O::TYPE_NAME, meta.field_name, values.len(), S::TYPE_NAME);
        for v in values {
            v.accept(self)?;
        }
        Ok(())
    }
}

/// Visitor filling fields in place from a stream.
pub struct BinaryReader<'a, R: Read + ?Sized> {
    inp: &'a mut R,
}

impl<'a, R: Read + ?Sized> BinaryReader<'a, R> {
    pub fn new(inp: &'a mut R) -> Self {
        BinaryReader { inp }
    }
}

impl<R: Read + ?Sized> VisitorMut for BinaryReader<'_, R> {
    fn visit_raw_scalar_mut<O: Structure, T: RawValue>(&mut self, meta: &MetaInfo, value: &mut T) -> Result<()> {
        log::trace!("read {}.{} ({} bytes)", O::TYPE_NAME, meta.field_name, T::SIZE);
        *value = T::read_raw(&mut *self.inp)?;
        Ok(())
    }

    fn visit_structured_scalar_mut<O: Structure, S: Structure>(&mut self, meta: &MetaInfo, value: &mut S) -> Result<()> {
        log::trace!("read {}.{} ({})", O::TYPE_NAME, meta.field_name, S::TYPE_NAME);
        value.accept_and_init(self)
    }

    fn visit_raw_array_mut<O: Structure, T: RawValue>(&mut self, meta: &MetaInfo, values: &mut [T]) -> Result<()> {
        log::trace!("read {}.{} ({} x {} bytes)", O::TYPE_NAME, meta.field_name, values.len(), T::SIZE);
        for v in values.iter_mut() {
            *v = T::read_raw(&mut *self.inp)?;
        }
        Ok(())
    }

    fn visit_structured_array_mut<O: Structure, S: Structure>(
        &mut self,
        meta: &MetaInfo,
        values: &mut [S],
    ) -> Result<()> {
        log::trace!("read {}.{} ({} x {})", O::TYPE_NAME, meta.field_name, values.len(), S::TYPE_NAME);
        for v in values.iter_mut() {
            v.accept_and_init(self)?;
        }
        Ok(())
    }
}

/// Visitor summing the bytes a [`BinaryWriter`] would emit.
#[derive(Debug, Default)]
pub struct ByteCounter {
    total: usize,
}

impl ByteCounter {
    pub fn total(&self) -> usize {
        self.total
    }
}

impl Visitor for ByteCounter {
    fn visit_raw_scalar<O: Structure, T: RawValue>(&mut self, _meta: &MetaInfo, _owner: &O, _value: &T) -> Result<()> {
        self.total += T::SIZE;
        Ok(())
    }

    fn visit_structured_scalar<O: Structure, S: Structure>(
        &mut self,
        _meta: &MetaInfo,
        _owner: &O,
        value: &S,
    ) -> Result<()> {
        value.accept(self)
    }

    fn visit_raw_array<O: Structure, T: RawValue>(&mut self, _meta: &MetaInfo, _owner: &O, values: &[T]) -> Result<()> {
        self.total += values.len() * T::SIZE;
        Ok(())
    }

    fn visit_structured_array<O: Structure, S: Structure>(
        &mut self,
        _meta: &MetaInfo,
        _owner: &O,
        values: &[S],
    ) -> Result<()> {
        for v in values {
            v.accept(self)?;
        }
        Ok(())
    }
}

/// Writes `structure` to `out`.
pub fn binary_write<S: Structure, W: Write + ?Sized>(structure: &S, out: &mut W) -> Result<()> {
    structure.accept(&mut BinaryWriter::new(out))
}

/// Reads into `structure` from `inp`, overwriting every field.
pub fn binary_read<S: Structure, R: Read + ?Sized>(structure: &mut S, inp: &mut R) -> Result<()> {
    structure.accept_and_init(&mut BinaryReader::new(inp))
}

pub fn to_bytes<S: Structure>(structure: &S) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    binary_write(structure, &mut out)?;
    Ok(out)
}

/// Builds a default `S` and reads it from the front of `bytes`; trailing bytes are ignored.
pub fn from_bytes<S: Structure + Default>(bytes: &[u8]) -> Result<S> {
    Ok(from_bytes_with_extent(bytes)?.0)
}

/// Like [`from_bytes`], also returning how many bytes were consumed.
pub fn from_bytes_with_extent<S: Structure + Default>(bytes: &[u8]) -> Result<(S, usize)> {
    let mut cursor = Cursor::new(bytes);
    let mut s = S::default();
    binary_read(&mut s, &mut cursor)?;
    Ok((s, cursor.position() as usize))
}

/// Number of bytes [`binary_write`] emits for `structure`.
pub fn binary_size<S: Structure>(structure: &S) -> Result<usize> {
    let mut counter = ByteCounter::default();
    structure.accept(&mut counter)?;
    Ok(counter.total())
}
