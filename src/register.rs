//! Declarative registration without the derive macro.

/// Register a record type against a document type.
///
/// Each entry binds a field to a document key. Append `with path::to::module`
/// to hand the transfer to a custom converter, a module exposing `decode` and
/// `encode` functions with the signatures of [`decode_field`](crate::decode_field)
/// and [`encode_field`](crate::encode_field).
///
/// ```
/// struct Reading {
///     sensor: String,
///     taken: SystemTime,
/// }
///
/// docbind::register!(Reading as serde_json::Value {
///     sensor => "sensor",
///     taken => "ts" with unix_seconds,
/// });
/// ```
///
/// Fields left out of the list are neither read nor written.
#[macro_export]
macro_rules! register {
    (@binding $document:ty, $field:ident, $key:literal) => {
        $crate::Binding::<Self, $document>::generic(
            $key,
            |document, key, record| $crate::decode_field(document, key, &mut record.$field),
            |document, key, record| $crate::encode_field(document, key, &record.$field),
        )
    };

    (@binding $document:ty, $field:ident, $key:literal, $($converter:ident)::+) => {
        $crate::Binding::<Self, $document>::custom(
            $key,
            |document, key, record| $($converter)::+::decode(document, key, &mut record.$field),
            |document, key, record| $($converter)::+::encode(document, key, &record.$field),
        )
    };

    ($record:ty as $document:ty {
        $($field:ident => $key:literal $(with $($converter:ident)::+)?),* $(,)?
    }) => {
        impl $crate::Record<$document> for $record {
            const BINDINGS: &'static [$crate::Binding<Self, $document>] = &[
                $($crate::register!(@binding $document, $field, $key $(, $($converter)::+)?)),*
            ];
        }

        impl $crate::Field<$document> for $record {
            const RECORD: bool = true;

            fn decode_value(
                &mut self,
                value: &$document,
            ) -> ::core::result::Result<(), <$document as $crate::Document>::Error> {
                $crate::decode_into(value, self)
            }

            fn encode_value(&self) -> $document {
                $crate::encode(self)
            }
        }
    };
}
