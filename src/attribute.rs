//! Scalar attribute wrappers: open read access, owner-gated or public write access.
//!
//! Write access to a [`ReadOnlyAttribute`] requires a reference to the owner's key
//! ([`Owner::Key`]). Generated code declares the key as a unit struct with a private field in
//! the structure's own module, so only that module can build one:
//!
//! ```ignore
//! pub struct SensorKey(());
//! const KEY: SensorKey = SensorKey(());
//!
//! impl Owner for Sensor {
//!     type Key = SensorKey;
//! }
//!
//! impl Sensor {
//!     pub fn calibrate(&mut self, id: u32) {
//!         self.id.set(&KEY, id);
//!     }
//! }
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};

/// A generated structure that owns read-only or array attributes.
pub trait Owner {
    /// Capability required to mutate attributes owned by this structure.
    type Key;
}

/// One value, readable by anyone, writable only with the owner's key.
pub struct ReadOnlyAttribute<O: Owner, A> {
    value: A,
    _owner: PhantomData<fn() -> O>,
}

impl<O: Owner, A> ReadOnlyAttribute<O, A> {
    /// Only the owner can build one, so a public field cannot be replaced wholesale.
    pub fn new(_key: &O::Key, value: A) -> Self {
        ReadOnlyAttribute {
            value,
            _owner: PhantomData,
        }
    }

    pub fn get(&self) -> &A {
        &self.value
    }

    pub fn set(&mut self, _key: &O::Key, value: A) {
        self.value = value;
    }

    pub fn get_mut(&mut self, _key: &O::Key) -> &mut A {
        &mut self.value
    }
}

impl<O: Owner, A: Clone> Clone for ReadOnlyAttribute<O, A> {
    fn clone(&self) -> Self {
        ReadOnlyAttribute {
            value: self.value.clone(),
            _owner: PhantomData,
        }
    }
}

impl<O: Owner, A: PartialEq> PartialEq for ReadOnlyAttribute<O, A> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<O: Owner, A: fmt::Debug> fmt::Debug for ReadOnlyAttribute<O, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

impl<O: Owner, A> Deref for ReadOnlyAttribute<O, A> {
    type Target = A;

    fn deref(&self) -> &A {
        &self.value
    }
}

impl<O: Owner, A> AsRef<A> for ReadOnlyAttribute<O, A> {
    fn as_ref(&self) -> &A {
        &self.value
    }
}

/// One value with public read and write access.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attribute<A> {
    value: A,
}

impl<A> Attribute<A> {
    pub fn new(value: A) -> Self {
        Attribute { value }
    }

    pub fn get(&self) -> &A {
        &self.value
    }

    pub fn get_mut(&mut self) -> &mut A {
        &mut self.value
    }

    pub fn set(&mut self, value: A) {
        self.value = value;
    }

    pub fn into_inner(self) -> A {
        self.value
    }
}

impl<A> Deref for Attribute<A> {
    type Target = A;

    fn deref(&self) -> &A {
        &self.value
    }
}

impl<A> DerefMut for Attribute<A> {
    fn deref_mut(&mut self) -> &mut A {
        &mut self.value
    }
}

impl<A> AsRef<A> for Attribute<A> {
    fn as_ref(&self) -> &A {
        &self.value
    }
}

impl<A> From<A> for Attribute<A> {
    fn from(value: A) -> Self {
        Attribute::new(value)
    }
}
