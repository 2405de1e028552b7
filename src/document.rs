//! The dynamic document model consumed by the conversion engine.
//!
//! The engine never parses or prints documents itself. Any tree-shaped value
//! (objects keyed by strings, arrays, scalars and a null marker) can take part
//! by implementing [`Document`], plus [`Coerce`] for each scalar type it
//! natively understands. An implementation for `serde_json::Value` is provided
//! in [`crate::json`].

use core::fmt::{Debug, Display};

/// A node of a dynamically-typed document tree.
pub trait Document: Sized + 'static {
    /// Failure raised by the document when a value cannot be coerced.
    ///
    /// The engine passes these through untouched.
    type Error: Debug + Display;

    /// Construct an empty object.
    fn object() -> Self;
    /// Construct an empty array.
    fn array() -> Self;
    /// Construct the null value.
    fn null() -> Self;

    /// Look up the entry stored under a key, if this node is an object holding
    /// one.
    fn get(&self, key: &str) -> Option<&Self>;

    /// Test whether this node is an object holding an entry under a key.
    fn has_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Store an entry under a key, replacing any existing one.
    ///
    /// A node that is not an object is first replaced by an empty object.
    fn set(&mut self, key: &str, value: Self);

    /// Test whether this node is the null value.
    fn is_null(&self) -> bool;

    /// Test whether this node is a discarded marker, such as the result of a
    /// failed lenient parse. Most documents have no such state.
    fn is_discarded(&self) -> bool {
        false
    }

    /// Test whether this node carries no usable value.
    fn is_absent(&self) -> bool {
        self.is_null() || self.is_discarded()
    }

    /// Test whether this node is an array.
    fn is_array(&self) -> bool;

    /// Number of elements in this node if it is an array, otherwise zero.
    fn array_len(&self) -> usize;

    /// Element at an index, if this node is an array long enough to hold one.
    fn at(&self, index: usize) -> Option<&Self>;

    /// Append an element.
    ///
    /// A node that is not an array is first replaced by an empty array.
    fn push_back(&mut self, value: Self);

    /// Iterate over the elements of this node, in order. Yields nothing unless
    /// the node is an array.
    fn elements(&self) -> Elements<'_, Self> {
        Elements {
            document: self,
            index: 0,
        }
    }
}

/// Conversion between a document node and a scalar type it natively
/// understands.
pub trait Coerce<T>: Document {
    /// Read the node as a `T`, failing on a type mismatch.
    fn coerce(&self) -> Result<T, Self::Error>;
    /// Build a node holding a `T`.
    fn from_scalar(value: &T) -> Self;
}

/// Iterator over the elements of an array node.
///
/// See [`Document::elements`].
#[derive(Debug)]
pub struct Elements<'a, D> {
    document: &'a D,
    index: usize,
}

impl<'a, D: Document> Iterator for Elements<'a, D> {
    type Item = &'a D;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.document.at(self.index)?;
        self.index += 1;
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.document.array_len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}
