//! Static field tables describing how a record maps onto a document.

use core::fmt;

use crate::{document::Document, field::Field};

/// Move one field from a document into a record.
pub type DecodeFn<T, D> = fn(&D, &str, &mut T) -> Result<(), <D as Document>::Error>;

/// Move one field from a record into a document.
pub type EncodeFn<T, D> = fn(&mut D, &str, &T);

/// A record type with a registered field table.
///
/// Implementations are produced by the [`Record`](macro@crate::Record) derive
/// macro or the [`register!`](crate::register) macro, one per pairing of
/// record and document type. Being a trait implementation, a second
/// registration of the same pairing fails to compile.
pub trait Record<D: Document>: Sized + 'static {
    /// Field bindings, in declaration order.
    const BINDINGS: &'static [Binding<Self, D>];

    /// View of the field table.
    fn descriptor() -> Descriptor<Self, D> {
        Descriptor::new(Self::BINDINGS)
    }
}

/// Test at compile time whether a field type is transferred as a nested
/// record rather than as a scalar or sequence.
pub const fn is_record<D: Document, T: Field<D>>() -> bool {
    T::RECORD
}

/// Association of one record field with one document key.
pub struct Binding<T, D: Document> {
    key: &'static str,
    transfer: Transfer<T, D>,
}

/// How a [`Binding`] moves its field.
pub enum Transfer<T, D: Document> {
    /// Dispatch on the field's [`Field`] implementation.
    Generic(Accessor<T, D>),
    /// Hand the whole transfer to a user-supplied converter.
    Custom(Accessor<T, D>),
}

/// Pair of functions projecting a single field of `T`.
pub struct Accessor<T, D: Document> {
    /// Read the field from the entry under the binding's key.
    pub decode: DecodeFn<T, D>,
    /// Write the field under the binding's key.
    pub encode: EncodeFn<T, D>,
}

impl<T, D: Document> Binding<T, D> {
    /// Bind a field transferred through its [`Field`] implementation.
    pub const fn generic(key: &'static str, decode: DecodeFn<T, D>, encode: EncodeFn<T, D>) -> Self {
        Self {
            key,
            transfer: Transfer::Generic(Accessor { decode, encode }),
        }
    }

    /// Bind a field transferred by a custom converter.
    pub const fn custom(key: &'static str, decode: DecodeFn<T, D>, encode: EncodeFn<T, D>) -> Self {
        Self {
            key,
            transfer: Transfer::Custom(Accessor { decode, encode }),
        }
    }

    /// The document key.
    pub const fn key(&self) -> &'static str {
        self.key
    }

    /// How the field is moved, for inspecting a binding. Match on
    /// [`Transfer`] to reach the accessor functions directly.
    pub const fn transfer(&self) -> &Transfer<T, D> {
        &self.transfer
    }

    /// Whether the field is moved by a custom converter.
    pub const fn is_custom(&self) -> bool {
        matches!(self.transfer, Transfer::Custom(_))
    }

    /// Populate the bound field of a record from a document object.
    pub fn decode(&self, document: &D, record: &mut T) -> Result<(), D::Error> {
        let accessor = match &self.transfer {
            Transfer::Generic(a) | Transfer::Custom(a) => a,
        };

        (accessor.decode)(document, self.key, record)
    }

    /// Write the bound field of a record into a document object.
    pub fn encode(&self, document: &mut D, record: &T) {
        let accessor = match &self.transfer {
            Transfer::Generic(a) | Transfer::Custom(a) => a,
        };

        (accessor.encode)(document, self.key, record)
    }
}

impl<T, D: Document> fmt::Debug for Binding<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("key", &self.key)
            .field("custom", &self.is_custom())
            .finish()
    }
}

/// Read-only view of a record type's field table.
pub struct Descriptor<T: 'static, D: Document> {
    bindings: &'static [Binding<T, D>],
}

impl<T: 'static, D: Document> Descriptor<T, D> {
    pub const fn new(bindings: &'static [Binding<T, D>]) -> Self {
        Self { bindings }
    }

    pub const fn bindings(&self) -> &'static [Binding<T, D>] {
        self.bindings
    }

    pub const fn len(&self) -> usize {
        self.bindings.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Document keys, in declaration order. Keys may repeat.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> {
        self.bindings.iter().map(Binding::key)
    }

    /// The first binding declared for a key.
    pub fn get(&self, key: &str) -> Option<&'static Binding<T, D>> {
        self.bindings.iter().find(|b| b.key == key)
    }
}

impl<T: 'static, D: Document> Clone for Descriptor<T, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static, D: Document> Copy for Descriptor<T, D> {}

impl<T: 'static, D: Document> fmt::Debug for Descriptor<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.bindings).finish()
    }
}
