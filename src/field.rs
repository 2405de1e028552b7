//! Transfer of individual field values.

use alloc::{boxed::Box, string::String, vec::Vec};

use tracing::trace;

use crate::document::Document;

/// A value that can be stored under a document key.
///
/// Implementations exist for primitives and `String` (for any document
/// implementing the matching [`Coerce`](crate::Coerce)), for `Vec<T>`,
/// `Option<T>` and `Box<T>` of any such value, and for every registered
/// record type.
pub trait Field<D: Document> {
    /// Whether this type is transferred as a nested record.
    const RECORD: bool = false;

    /// Populate this value from a node that is known to be present.
    fn decode_value(&mut self, value: &D) -> Result<(), D::Error>;

    /// Build a node holding this value.
    fn encode_value(&self) -> D;
}

/// Implement [`Field`] for types a document handles natively, delegating to
/// its [`Coerce`](crate::Coerce) implementation.
///
/// ```
/// struct Celsius(f64);
///
/// impl Coerce<Celsius> for MyDocument { /* ... */ }
///
/// docbind::scalar!(Celsius);
/// ```
#[macro_export]
macro_rules! scalar {
    ($($t:ty),* $(,)?) => {
        $(
            impl<D: $crate::Coerce<$t>> $crate::Field<D> for $t {
                fn decode_value(&mut self, value: &D) -> ::core::result::Result<(), D::Error> {
                    *self = <D as $crate::Coerce<$t>>::coerce(value)?;
                    ::core::result::Result::Ok(())
                }

                fn encode_value(&self) -> D {
                    <D as $crate::Coerce<$t>>::from_scalar(self)
                }
            }
        )*
    };
}

scalar!(bool, char, String);
scalar!(i8, i16, i32, i64, isize);
scalar!(u8, u16, u32, u64, usize);
scalar!(f32, f64);

/// Read the entry under a key into a field.
///
/// An entry that is missing, null or discarded leaves the field untouched.
pub fn decode_field<D: Document, F: Field<D>>(
    document: &D,
    key: &str,
    field: &mut F,
) -> Result<(), D::Error> {
    match document.get(key) {
        Some(value) if !value.is_absent() => field.decode_value(value),
        _ => {
            trace!(key, "skipping absent field");
            Ok(())
        }
    }
}

/// Write a field under a key, replacing any existing entry.
pub fn encode_field<D: Document, F: Field<D>>(document: &mut D, key: &str, field: &F) {
    document.set(key, field.encode_value());
}

/// Decode every element of an array node into a fresh default value.
///
/// A node that is not an array yields an empty sequence.
pub(crate) fn decode_elements<D: Document, T: Field<D> + Default>(
    value: &D,
) -> Result<Vec<T>, D::Error> {
    if !value.is_array() {
        trace!("expected an array, decoding an empty sequence");
        return Ok(Vec::new());
    }

    value
        .elements()
        .map(|element| {
            let mut item = T::default();
            item.decode_value(element)?;
            Ok(item)
        })
        .collect()
}

pub(crate) fn encode_elements<D: Document, T: Field<D>>(items: &[T]) -> D {
    let mut array = D::array();
    for item in items {
        array.push_back(item.encode_value());
    }
    array
}

impl<D: Document, T: Field<D> + Default> Field<D> for Vec<T> {
    /// Replace the contents with the decoded elements, rather than appending
    /// to them. A failure part-way leaves the existing contents in place.
    fn decode_value(&mut self, value: &D) -> Result<(), D::Error> {
        *self = decode_elements(value)?;
        Ok(())
    }

    fn encode_value(&self) -> D {
        encode_elements(self)
    }
}

impl<D: Document, T: Field<D> + Default> Field<D> for Option<T> {
    fn decode_value(&mut self, value: &D) -> Result<(), D::Error> {
        // Only reachable for array elements; keyed entries skip null earlier.
        if value.is_absent() {
            *self = None;
            return Ok(());
        }

        self.get_or_insert_with(T::default).decode_value(value)
    }

    fn encode_value(&self) -> D {
        match self {
            Some(value) => value.encode_value(),
            None => D::null(),
        }
    }
}

impl<D: Document, T: Field<D>> Field<D> for Box<T> {
    const RECORD: bool = T::RECORD;

    fn decode_value(&mut self, value: &D) -> Result<(), D::Error> {
        (**self).decode_value(value)
    }

    fn encode_value(&self) -> D {
        (**self).encode_value()
    }
}
