//! Fixed-size plain values ("raw types") and their native byte representation.
//!
//! The binary codec writes each raw value exactly as it sits in memory on the host:
//! native byte order, no padding, no tag. `bool` occupies one byte.

use byteorder::{NativeEndian, ReadBytesExt, WriteBytesExt};
use std::fmt::Display;
use std::io::{Read, Write};

/// A plain value that can be visited as a raw scalar or raw array element.
pub trait RawValue: Copy + Default + Display {
    /// Number of bytes written by [`RawValue::write_raw`].
    const SIZE: usize;

    fn write_raw<W: Write + ?Sized>(&self, w: &mut W) -> std::io::Result<()>;

    fn read_raw<R: Read + ?Sized>(r: &mut R) -> std::io::Result<Self>;
}

impl RawValue for u8 {
    const SIZE: usize = 1;

    fn write_raw<W: Write + ?Sized>(&self, w: &mut W) -> std::io::Result<()> {
        w.write_u8(*self)
    }

    fn read_raw<R: Read + ?Sized>(r: &mut R) -> std::io::Result<Self> {
        r.read_u8()
    }
}

impl RawValue for i8 {
    const SIZE: usize = 1;

    fn write_raw<W: Write + ?Sized>(&self, w: &mut W) -> std::io::Result<()> {
        w.write_i8(*self)
    }

    fn read_raw<R: Read + ?Sized>(r: &mut R) -> std::io::Result<Self> {
        r.read_i8()
    }
}

impl RawValue for bool {
    const SIZE: usize = 1;

    fn write_raw<W: Write + ?Sized>(&self, w: &mut W) -> std::io::Result<()> {
        w.write_u8(u8::from(*self))
    }

    fn read_raw<R: Read + ?Sized>(r: &mut R) -> std::io::Result<Self> {
        Ok(r.read_u8()? != 0)
    }
}

macro_rules! impl_raw_value {
    ($($t:ty => $size:expr, $write:ident, $read:ident;)*) => {
        $(
            impl RawValue for $t {
                const SIZE: usize = $size;

                fn write_raw<W: Write + ?Sized>(&self, w: &mut W) -> std::io::Result<()> {
                    w.$write::<NativeEndian>(*self)
                }

                fn read_raw<R: Read + ?Sized>(r: &mut R) -> std::io::Result<Self> {
                    r.$read::<NativeEndian>()
                }
            }
        )*
    };
}

impl_raw_value! {
    u16 => 2, write_u16, read_u16;
    u32 => 4, write_u32, read_u32;
    u64 => 8, write_u64, read_u64;
    i16 => 2, write_i16, read_i16;
    i32 => 4, write_i32, read_i32;
    i64 => 8, write_i64, read_i64;
    f32 => 4, write_f32, read_f32;
    f64 => 8, write_f64, read_f64;
}
