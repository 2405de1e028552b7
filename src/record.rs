//! Whole-record transfer, walking a record type's field table.

use alloc::vec::Vec;
use core::any::type_name;

use tracing::trace;

use crate::{descriptor::Record, document::Document};

/// Populate a record from a document object, field by field.
///
/// A null or discarded document leaves the record untouched, as do missing
/// entries. Decoding stops at the first coercion failure; fields visited
/// before it keep their new values.
pub fn decode_into<D: Document, T: Record<D>>(document: &D, record: &mut T) -> Result<(), D::Error> {
    if document.is_absent() {
        trace!(record = type_name::<T>(), "skipping absent record");
        return Ok(());
    }

    for binding in T::BINDINGS {
        binding.decode(document, record)?;
    }

    Ok(())
}

/// Decode a record from a document object, starting from its default value.
pub fn decode<D: Document, T: Record<D> + Default>(document: &D) -> Result<T, D::Error> {
    let mut record = T::default();
    decode_into(document, &mut record)?;
    Ok(record)
}

/// Write a record into a document, replacing its previous contents with an
/// object holding every bound key.
pub fn encode_into<D: Document, T: Record<D>>(record: &T, document: &mut D) {
    *document = D::object();

    for binding in T::BINDINGS {
        binding.encode(document, record);
    }
}

/// Encode a record as a new document object.
pub fn encode<D: Document, T: Record<D>>(record: &T) -> D {
    let mut document = D::object();
    encode_into(record, &mut document);
    document
}

/// Decode each element of an array into a record, in order.
///
/// A document that is not an array yields an empty sequence.
pub fn decode_seq<D: Document, T: Record<D> + Default>(document: &D) -> Result<Vec<T>, D::Error> {
    if !document.is_array() {
        trace!(record = type_name::<T>(), "expected an array, decoding an empty sequence");
        return Ok(Vec::new());
    }

    document.elements().map(decode::<D, T>).collect()
}

/// Encode a sequence of records as a document array, in order.
pub fn encode_seq<D: Document, T: Record<D>>(records: &[T]) -> D {
    let mut array = D::array();
    for record in records {
        array.push_back(encode(record));
    }
    array
}
