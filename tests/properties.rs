#![cfg(all(feature = "derive", feature = "json"))]

use docbind::{Document, Record};
use proptest::prelude::*;
use serde_json::{Value, json};

#[derive(Debug, Default, Clone, PartialEq, Record)]
struct Sample {
    #[field]
    id: u64,
    #[field]
    delta: i16,
    #[field]
    label: String,
    #[field]
    enabled: bool,
    #[field]
    ratio: Option<f64>,
    #[field]
    codes: Vec<u8>,
    #[field]
    children: Vec<Leaf>,
}

#[derive(Debug, Default, Clone, PartialEq, Record)]
struct Leaf {
    #[field]
    name: String,
    #[field]
    weight: i32,
}

fn leaf() -> impl Strategy<Value = Leaf> {
    (any::<String>(), any::<i32>()).prop_map(|(name, weight)| Leaf { name, weight })
}

fn sample() -> impl Strategy<Value = Sample> {
    (
        any::<u64>(),
        any::<i16>(),
        any::<String>(),
        any::<bool>(),
        proptest::option::of(-1.0e9..1.0e9f64),
        proptest::collection::vec(any::<u8>(), 0..8),
        proptest::collection::vec(leaf(), 0..4),
    )
        .prop_map(
            |(id, delta, label, enabled, ratio, codes, children)| Sample {
                id,
                delta,
                label,
                enabled,
                ratio,
                codes,
                children,
            },
        )
}

const KEYS: [&str; 7] = [
    "id", "delta", "label", "enabled", "ratio", "codes", "children",
];

proptest! {
    #[test]
    fn round_trip(value in sample()) {
        let document: Value = docbind::encode(&value);
        let decoded: Sample = docbind::decode(&document).unwrap();
        prop_assert_eq!(decoded, value);
    }

    #[test]
    fn encode_writes_every_bound_key(value in sample()) {
        let document: Value = docbind::encode(&value);
        for key in KEYS {
            prop_assert!(document.has_key(key));
        }
    }

    #[test]
    fn missing_key_keeps_prior_value(
        prior in sample(),
        source in sample(),
        dropped in 0..KEYS.len(),
    ) {
        let mut document: Value = docbind::encode(&source);
        document.as_object_mut().unwrap().remove(KEYS[dropped]);

        let mut absent = prior.clone();
        docbind::decode_into(&document, &mut absent).unwrap();

        document.set(KEYS[dropped], Value::Null);
        let mut null = prior.clone();
        docbind::decode_into(&document, &mut null).unwrap();

        prop_assert_eq!(&absent, &null);

        let mut expected = source.clone();
        match dropped {
            0 => expected.id = prior.id,
            1 => expected.delta = prior.delta,
            2 => expected.label = prior.label.clone(),
            3 => expected.enabled = prior.enabled,
            4 => expected.ratio = prior.ratio,
            5 => expected.codes = prior.codes.clone(),
            _ => expected.children = prior.children.clone(),
        }

        // A `None` ratio encodes as null, which leaves the prior value in place.
        if source.ratio.is_none() {
            expected.ratio = prior.ratio;
        }

        prop_assert_eq!(absent, expected);
    }

    #[test]
    fn non_array_sequence_decodes_empty(value in sample(), scalar in any::<i64>()) {
        let mut document: Value = docbind::encode(&value);
        document.set("children", json!(scalar));
        document.set("codes", json!({ "not": "an array" }));

        let mut decoded = value.clone();
        docbind::decode_into(&document, &mut decoded).unwrap();

        prop_assert!(decoded.children.is_empty());
        prop_assert!(decoded.codes.is_empty());
    }
}

#[test]
fn record_keys_match_bindings() {
    let keys: Vec<_> = <Sample as Record<Value>>::descriptor().keys().collect();
    assert_eq!(keys, KEYS);
}
