#![no_std]

//! Declarative, recursive conversion between typed records and dynamic
//! document trees.
//!
//! A record type is registered once, binding each of its fields to a document
//! key. Docbind then walks that table to populate the record from a document,
//! or a document from the record, recursing into nested records and sequences
//! of records without any hand-written conversion code.
//!
//! Most users should begin with the [`Record`](macro@Record) derive macro and
//! the [`decode`] and [`encode`] functions. Documents are abstracted behind the
//! [`Document`] trait; an implementation for `serde_json::Value` lives in the
//! [`json`] module.
//!
//! Decoding is partial: entries that are missing or null leave the field as it
//! was. Encoding is total: every bound key is written. Coercion failures from
//! the document are returned as they are, aborting the call.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `derive`: enable derive macros (default).
//! - `json`: enable the `serde_json` document (default).
//! - `std`: enable standard library support in dependencies (default).

extern crate alloc;

pub mod descriptor;
pub mod document;
pub mod field;
#[cfg(feature = "json")]
pub mod json;
pub mod record;
mod register;

pub use descriptor::{Accessor, Binding, Descriptor, Record, Transfer, is_record};
pub use document::{Coerce, Document, Elements};
pub use field::{Field, decode_field, encode_field};
pub use record::{decode, decode_into, decode_seq, encode, encode_into, encode_seq};

/// Derive [`Record`] and [`Field`] for a struct with named fields.
///
/// _Requires Cargo feature `derive`._
///
/// # Examples
///
/// Add the `field` attribute to each field to bind. The key defaults to the
/// field name; supply a string literal to choose another. Fields without the
/// attribute are neither read nor written.
///
/// ```
/// #[derive(Debug, Default, Record)]
/// struct Point {
///     #[field]
///     x: i32,
///     #[field("y")]
///     y: i32,
/// }
///
/// #[derive(Debug, Default, Record)]
/// struct Line {
///     #[field("a")]
///     from: Point,
///     #[field("b")]
///     to: Point,
///     #[field]
///     labels: Vec<String>,
/// }
/// ```
///
/// To transfer a field some other way (changing its representation, or
/// filling in defaults), name a module exposing `decode` and `encode`
/// functions. These take over the whole transfer for that field, including
/// handling of a missing entry.
///
/// ```
/// #[derive(Debug, Default, Record)]
/// struct Job {
///     #[field("timeout_ms", with = millis)]
///     timeout: Duration,
/// }
///
/// mod millis {
///     pub fn decode(document: &Value, key: &str, field: &mut Duration) -> Result<(), Error> {
///         /* ... */
///     }
///
///     pub fn encode(document: &mut Value, key: &str, field: &Duration) {
///         /* ... */
///     }
/// }
/// ```
///
/// By default the implementation is generic over every document able to hold
/// the field types. Converters tied to one document, and record types that
/// contain themselves (through `Vec` or `Box`), need that document named
/// instead.
///
/// ```
/// #[derive(Debug, Default, Record)]
/// #[record(document = serde_json::Value)]
/// struct Node {
///     #[field]
///     children: Vec<Node>,
/// }
/// ```
#[cfg(feature = "derive")]
pub use docbind_derive::Record;
