//! Dimension vectors and the row-major projection over a flat buffer.
//!
//! A [`Shape`] is produced by evaluating one size function per dimension against the owning
//! structure. It carries the dimensions, the element count (their product) and the strides
//! used to map an N-dimensional coordinate to a flat index:
//!
//! ```text
//! stride[N-1] = 1
//! stride[i]   = stride[i+1] * dims[i+1]
//! flat_index  = Σ coords[i] * stride[i]
//! ```
//!
//! The last dimension varies fastest. A shape is a value: whenever sizes change a new one is
//! evaluated and the old one is dropped together with the buffer layout it described.

use crate::error::{Error, Result};

/// Reads one dimension's current length from the owner's sibling fields.
///
/// Size functions must be pure: the engine may evaluate them more than once per operation.
pub type SizeFn<O> = fn(&O) -> usize;

fn row_major_strides<const N: usize>(dims: &[usize; N]) -> [usize; N] {
    let mut strides = [1usize; N];
    for i in (0..N.saturating_sub(1)).rev() {
        // Only reachable with overflow when some dimension is zero; the shape is then empty.
        strides[i] = strides[i + 1].saturating_mul(dims[i + 1]);
    }
    strides
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape<const N: usize> {
    dims: [usize; N],
    strides: [usize; N],
    len: usize,
}

impl<const N: usize> Shape<N> {
    /// Builds the shape for `dims`, failing if the element count overflows `usize`.
    pub fn new(dims: [usize; N]) -> Result<Self> {
        let len = dims
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d))
            .ok_or_else(|| Error::DimensionOverflow { dims: dims.to_vec() })?;
        Ok(Shape {
            dims,
            strides: row_major_strides(&dims),
            len,
        })
    }

    /// Shape of an attribute that has not been sized yet: every dimension 0, no elements.
    /// Equal to `Shape::new([0; N])` for any `N > 0`.
    pub fn zero() -> Self {
        let dims = [0; N];
        Shape {
            dims,
            strides: row_major_strides(&dims),
            len: 0,
        }
    }

    /// Evaluates every size function now, in dimension order.
    pub fn evaluate<O>(size_fns: &[SizeFn<O>; N], owner: &O) -> Result<Self> {
        let mut dims = [0usize; N];
        for (d, f) in dims.iter_mut().zip(size_fns.iter()) {
            *d = f(owner);
        }
        Self::new(dims)
    }

    pub fn dims(&self) -> &[usize; N] {
        &self.dims
    }

    pub fn strides(&self) -> &[usize; N] {
        &self.strides
    }

    /// Flat element count: the product of the dimensions.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Maps a coordinate to its flat index, or `None` if any axis is out of range.
    pub fn flat_index(&self, coords: [usize; N]) -> Option<usize> {
        let mut idx = 0usize;
        for ((&c, &d), &s) in coords.iter().zip(self.dims.iter()).zip(self.strides.iter()) {
            if c >= d {
                return None;
            }
            idx += c * s;
        }
        Some(idx)
    }

    /// Inverse of [`Shape::flat_index`].
    pub fn coords_of(&self, flat: usize) -> Option<[usize; N]> {
        if flat >= self.len {
            return None;
        }
        let mut coords = [0usize; N];
        let mut rest = flat;
        for (c, &s) in coords.iter_mut().zip(self.strides.iter()) {
            *c = rest / s;
            rest %= s;
        }
        Some(coords)
    }
}
