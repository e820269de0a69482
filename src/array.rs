//! Multi-dimensional array attributes sized by their owner's sibling fields.
//!
//! Both array kinds hold one size function per dimension. An attribute lives inside its owner,
//! so the sizing entry points take the owner and a field accessor: the size functions are
//! evaluated against `&owner` first, then the field is borrowed mutably to apply the result.
//! Callers never hand a shape to the buffer.
//!
//! ```ignore
//! impl Default for Packet {
//!     fn default() -> Self {
//!         let mut p = Packet {
//!             count: Attribute::default(),
//!             samples: DynamicArrayAttribute::new([packet_samples_len]),
//!         };
//!         p.reshape_arrays().expect("default sizes fit");
//!         p
//!     }
//! }
//!
//! impl Packet {
//!     pub fn reshape_arrays(&mut self) -> Result<()> {
//!         DynamicArrayAttribute::reshape(self, &KEY, |p| &mut p.samples)
//!     }
//!
//!     pub fn set_samples(&mut self, values: Vec<i16>) -> Result<()> {
//!         DynamicArrayAttribute::assign(self, |p| &mut p.samples, values)
//!     }
//! }
//! ```
//!
//! Generated constructors reshape every array right after building the owner, so a fresh
//! structure already holds as many elements as its size functions ask for. Read traversals go
//! through `checked_slice`, which re-evaluates the size functions and refuses a stored shape
//! that a later sibling change made stale.
//!
//! [`DynamicArrayAttribute`] grows or shrinks a `Vec`; contents are not preserved across a
//! reshape. [`AutomaticArrayAttribute`] owns a fixed `[A; MAX]` buffer and refuses shapes
//! needing more than `MAX` elements. Both dereference to the slice of their logical elements
//! in row-major order.

use crate::attribute::Owner;
use crate::error::{Error, Result};
use crate::shape::{Shape, SizeFn};
use std::fmt;
use std::ops::{Deref, DerefMut};

fn stale_check<const N: usize>(stored: &Shape<N>, required: &Shape<N>) -> Result<()> {
    if stored.dims() != required.dims() {
        log::warn!(
            "array shape is stale: stored dims {:?}, size functions give {:?}",
            stored.dims(),
            required.dims()
        );
        return Err(Error::StaleShape {
            stored: stored.dims().to_vec(),
            required: required.dims().to_vec(),
        });
    }
    Ok(())
}

/// N-dimensional array over a growable flat buffer.
pub struct DynamicArrayAttribute<O: Owner, A, const N: usize> {
    size_fns: [SizeFn<O>; N],
    shape: Shape<N>,
    data: Vec<A>,
}

impl<O: Owner, A, const N: usize> DynamicArrayAttribute<O, A, N> {
    /// Creates an unsized array; the owner's constructor reshapes it once the owner exists.
    pub fn new(size_fns: [SizeFn<O>; N]) -> Self {
        DynamicArrayAttribute {
            size_fns,
            shape: Shape::zero(),
            data: Vec::new(),
        }
    }

    pub fn size_functions(&self) -> &[SizeFn<O>; N] {
        &self.size_fns
    }

    /// Evaluates the size functions against `owner` right now.
    pub fn required_shape(&self, owner: &O) -> Result<Shape<N>> {
        Shape::evaluate(&self.size_fns, owner)
    }

    /// Shape applied by the last reshape or assignment.
    pub fn shape(&self) -> &Shape<N> {
        &self.shape
    }

    pub fn dimensions(&self) -> &[usize; N] {
        self.shape.dims()
    }

    pub fn as_slice(&self) -> &[A] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [A] {
        &mut self.data
    }

    /// The elements, after checking that the stored shape is what the size functions give
    /// for `owner` now.
    pub fn checked_slice(&self, owner: &O) -> Result<&[A]> {
        stale_check(&self.shape, &self.required_shape(owner)?)?;
        Ok(&self.data)
    }

    /// Element at an N-dimensional coordinate.
    pub fn at(&self, coords: [usize; N]) -> Option<&A> {
        self.shape.flat_index(coords).map(|i| &self.data[i])
    }

    pub fn at_mut(&mut self, coords: [usize; N]) -> Option<&mut A> {
        let i = self.shape.flat_index(coords)?;
        Some(&mut self.data[i])
    }

    pub fn into_vec(self) -> Vec<A> {
        self.data
    }
}

impl<O: Owner, A: Default, const N: usize> DynamicArrayAttribute<O, A, N> {
    /// Re-runs the size functions of the array `field` selects in `owner` and resizes its
    /// buffer. Existing contents are unspecified afterwards.
    pub fn reshape<F>(owner: &mut O, _key: &O::Key, field: F) -> Result<()>
    where
        F: Fn(&mut O) -> &mut Self,
    {
        let size_fns = *field(&mut *owner).size_functions();
        let shape = Shape::evaluate(&size_fns, &*owner)?;
        field(owner).resize_to(shape)
    }

    /// Replaces the contents of the array `field` selects in `owner`. The expected length is
    /// computed from the owner's current sibling values; `value` must match it exactly.
    pub fn assign<F>(owner: &mut O, field: F, value: Vec<A>) -> Result<()>
    where
        F: Fn(&mut O) -> &mut Self,
    {
        let size_fns = *field(&mut *owner).size_functions();
        let shape = Shape::evaluate(&size_fns, &*owner)?;
        field(owner).store(shape, value)
    }

    fn store(&mut self, shape: Shape<N>, value: Vec<A>) -> Result<()> {
        self.resize_to(shape)?;
        if value.len() != self.shape.len() {
            log::warn!(
                "dynamic array assignment: expected {} elements for dims {:?}, got {}",
                self.shape.len(),
                self.shape.dims(),
                value.len()
            );
            return Err(Error::SizeMismatch {
                expected: self.shape.len(),
                actual: value.len(),
            });
        }
        self.data = value;
        Ok(())
    }

    fn resize_to(&mut self, shape: Shape<N>) -> Result<()> {
        let n = shape.len();
        if n > self.data.len() {
            self.data.try_reserve_exact(n - self.data.len())?;
        }
        self.data.resize_with(n, A::default);
        log::debug!("dynamic array reshaped to {:?} ({} elements)", shape.dims(), n);
        self.shape = shape;
        Ok(())
    }
}

impl<O: Owner, A, const N: usize> Deref for DynamicArrayAttribute<O, A, N> {
    type Target = [A];

    fn deref(&self) -> &[A] {
        &self.data
    }
}

impl<O: Owner, A, const N: usize> DerefMut for DynamicArrayAttribute<O, A, N> {
    fn deref_mut(&mut self) -> &mut [A] {
        &mut self.data
    }
}

impl<O: Owner, A: Clone, const N: usize> Clone for DynamicArrayAttribute<O, A, N> {
    fn clone(&self) -> Self {
        DynamicArrayAttribute {
            size_fns: self.size_fns,
            shape: self.shape,
            data: self.data.clone(),
        }
    }
}

impl<O: Owner, A: PartialEq, const N: usize> PartialEq for DynamicArrayAttribute<O, A, N> {
    fn eq(&self, other: &Self) -> bool {
        self.shape.dims() == other.shape.dims() && self.data == other.data
    }
}

impl<O: Owner, A: fmt::Debug, const N: usize> fmt::Debug for DynamicArrayAttribute<O, A, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicArrayAttribute")
            .field("dims", self.shape.dims())
            .field("data", &self.data)
            .finish()
    }
}

/// N-dimensional array over a fixed buffer of `MAX` elements.
pub struct AutomaticArrayAttribute<O: Owner, A, const N: usize, const MAX: usize> {
    size_fns: [SizeFn<O>; N],
    shape: Shape<N>,
    data: [A; MAX],
}

impl<O: Owner, A: Default, const N: usize, const MAX: usize> AutomaticArrayAttribute<O, A, N, MAX> {
    /// Creates an unsized array with all `MAX` slots default-initialized.
    pub fn new(size_fns: [SizeFn<O>; N]) -> Self {
        AutomaticArrayAttribute {
            size_fns,
            shape: Shape::zero(),
            data: std::array::from_fn(|_| A::default()),
        }
    }
}

impl<O: Owner, A, const N: usize, const MAX: usize> AutomaticArrayAttribute<O, A, N, MAX> {
    pub fn size_functions(&self) -> &[SizeFn<O>; N] {
        &self.size_fns
    }

    /// Evaluates the size functions against `owner` right now.
    pub fn required_shape(&self, owner: &O) -> Result<Shape<N>> {
        Shape::evaluate(&self.size_fns, owner)
    }

    pub fn shape(&self) -> &Shape<N> {
        &self.shape
    }

    pub fn dimensions(&self) -> &[usize; N] {
        self.shape.dims()
    }

    pub const fn capacity(&self) -> usize {
        MAX
    }

    /// Re-runs the size functions of the array `field` selects in `owner` and applies the
    /// result without touching storage; fails if it needs more than `MAX` elements.
    pub fn reshape<F>(owner: &mut O, _key: &O::Key, field: F) -> Result<()>
    where
        F: Fn(&mut O) -> &mut Self,
    {
        let size_fns = *field(&mut *owner).size_functions();
        let shape = Shape::evaluate(&size_fns, &*owner)?;
        field(owner).apply_shape(shape)
    }

    fn apply_shape(&mut self, shape: Shape<N>) -> Result<()> {
        if shape.len() > MAX {
            log::warn!(
                "automatic array: dims {:?} need {} elements, capacity is {}",
                shape.dims(),
                shape.len(),
                MAX
            );
            return Err(Error::CapacityOverflow {
                required: shape.len(),
                capacity: MAX,
            });
        }
        log::debug!("automatic array reshaped to {:?} ({} of {} elements)", shape.dims(), shape.len(), MAX);
        self.shape = shape;
        Ok(())
    }

    pub fn as_slice(&self) -> &[A] {
        &self.data[..self.shape.len()]
    }

    pub fn as_mut_slice(&mut self) -> &mut [A] {
        &mut self.data[..self.shape.len()]
    }

    /// Logical elements, after checking the stored shape against the size functions.
    pub fn checked_slice(&self, owner: &O) -> Result<&[A]> {
        stale_check(&self.shape, &self.required_shape(owner)?)?;
        Ok(self.as_slice())
    }

    pub fn at(&self, coords: [usize; N]) -> Option<&A> {
        self.shape.flat_index(coords).map(|i| &self.data[i])
    }

    pub fn at_mut(&mut self, coords: [usize; N]) -> Option<&mut A> {
        let i = self.shape.flat_index(coords)?;
        Some(&mut self.data[i])
    }
}

impl<O: Owner, A: Clone, const N: usize, const MAX: usize> AutomaticArrayAttribute<O, A, N, MAX> {
    /// Replaces the logical contents of the array `field` selects in `owner`. The expected
    /// length comes from the owner's current sibling values, not from the capacity.
    pub fn assign<F>(owner: &mut O, field: F, value: &[A]) -> Result<()>
    where
        F: Fn(&mut O) -> &mut Self,
    {
        let size_fns = *field(&mut *owner).size_functions();
        let shape = Shape::evaluate(&size_fns, &*owner)?;
        field(owner).store(shape, value)
    }

    fn store(&mut self, shape: Shape<N>, value: &[A]) -> Result<()> {
        self.apply_shape(shape)?;
        if value.len() != self.shape.len() {
            log::warn!(
                "automatic array assignment: expected {} elements for dims {:?}, got {}",
                self.shape.len(),
                self.shape.dims(),
                value.len()
            );
            return Err(Error::SizeMismatch {
                expected: self.shape.len(),
                actual: value.len(),
            });
        }
        self.data[..value.len()].clone_from_slice(value);
        Ok(())
    }
}

impl<O: Owner, A, const N: usize, const MAX: usize> Deref for AutomaticArrayAttribute<O, A, N, MAX> {
    type Target = [A];

    fn deref(&self) -> &[A] {
        self.as_slice()
    }
}

impl<O: Owner, A, const N: usize, const MAX: usize> DerefMut for AutomaticArrayAttribute<O, A, N, MAX> {
    fn deref_mut(&mut self) -> &mut [A] {
        self.as_mut_slice()
    }
}

impl<O: Owner, A: Clone, const N: usize, const MAX: usize> Clone for AutomaticArrayAttribute<O, A, N, MAX> {
    fn clone(&self) -> Self {
        AutomaticArrayAttribute {
            size_fns: self.size_fns,
            shape: self.shape,
            data: self.data.clone(),
        }
    }
}

impl<O: Owner, A: PartialEq, const N: usize, const MAX: usize> PartialEq for AutomaticArrayAttribute<O, A, N, MAX> {
    fn eq(&self, other: &Self) -> bool {
        self.shape.dims() == other.shape.dims() && self.as_slice() == other.as_slice()
    }
}

impl<O: Owner, A: fmt::Debug, const N: usize, const MAX: usize> fmt::Debug for AutomaticArrayAttribute<O, A, N, MAX> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutomaticArrayAttribute")
            .field("dims", self.shape.dims())
            .field("capacity", &MAX)
            .field("data", &self.as_slice())
            .finish()
    }
}
