//! Property-based tests for the blob-store key codec.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::encoding::key::{decode_key, encode_key, unstorable_reason};
    use crate::model::Triple;

    /// Fields that may contain colons anywhere except the first position.
    fn field_strategy() -> impl Strategy<Value = String> {
        "[a-z0-9*_-][a-z0-9:*_-]{0,12}"
    }

    proptest! {
        #[test]
        fn test_storable_triples_survive_persistence(
            fields in prop::array::uniform5(field_strategy())
        ) {
            let triple = Triple::from_fields(fields);
            prop_assert_eq!(unstorable_reason(&triple), None);

            let decoded = decode_key(&encode_key(&triple));
            prop_assert!(decoded.is_ok(), "failed to decode {}", triple);
            prop_assert_eq!(decoded.unwrap(), triple);
        }

        #[test]
        fn test_decode_never_panics(key in "[a-z:]{0,30}") {
            let _ = decode_key(&key);
        }
    }
}
