//! Type-erased object handles produced and stored by the locator.
//!
//! Every value the locator builds or hands out travels as an [`Object`]: a
//! cheaply clonable, shared handle that erases the concrete type while
//! remembering its [`TypeId`] and type name. The type name makes error
//! messages and logs readable; the id drives method dispatch on the value's
//! runtime type.

use core::any::{Any, TypeId};
use core::fmt;
use std::sync::Arc;

/// A shared, type-erased object instance.
///
/// Wraps `Arc<dyn Any + Send + Sync>` together with the erased value's type
/// name. Cloning an `Object` clones the handle, not the value; all clones
/// point at the same allocation.
///
/// # Example
///
/// ```rust
/// use lodestone::Object;
///
/// let numbers = Object::new(vec![1_i64, 2, 3]);
/// assert!(numbers.is::<Vec<i64>>());
///
/// let shared = numbers.clone();
/// assert!(numbers.ptr_eq(&shared));
/// assert_eq!(shared.downcast::<Vec<i64>>().unwrap().len(), 3);
/// ```
#[derive(Clone)]
pub struct Object {
    value: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Object {
    /// Wraps a value into a new shared handle.
    pub fn new<T: Send + Sync + 'static>(value: T) -> Self {
        Self {
            value: Arc::new(value),
            type_name: core::any::type_name::<T>(),
        }
    }

    /// Wraps an existing `Arc`, preserving its allocation.
    ///
    /// Use this instead of [`Object::new`] when the value is already shared;
    /// `Object::new(arc)` would erase the `Arc` itself rather than the value
    /// it points to.
    pub fn from_arc<T: Send + Sync + 'static>(value: Arc<T>) -> Self {
        Self {
            value,
            type_name: core::any::type_name::<T>(),
        }
    }

    /// The [`TypeId`] of the erased value.
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.value.as_ref().type_id()
    }

    /// The type name of the erased value, as captured at wrap time.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether the erased value is a `T`.
    #[must_use]
    pub fn is<T: Send + Sync + 'static>(&self) -> bool {
        self.value.is::<T>()
    }

    /// Downcasts the handle to a typed `Arc`, or `None` on type mismatch.
    #[must_use]
    pub fn downcast<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.value).downcast::<T>().ok()
    }

    /// Whether two handles point at the same allocation.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("type_name", &self.type_name)
            .finish()
    }
}
