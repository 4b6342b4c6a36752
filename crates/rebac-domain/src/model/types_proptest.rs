//! Property-based tests for model types.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::model::{Entity, Triple};

    /// Strategy to generate entities in namespace:instance format.
    fn entity_strategy() -> impl Strategy<Value = Entity> {
        ("[a-z]{1,10}", "[a-z0-9:*-]{1,20}").prop_map(|(ns, inst)| Entity::new(ns, inst))
    }

    proptest! {
        #[test]
        fn test_entity_display_parse_roundtrip(entity in entity_strategy()) {
            let parsed = Entity::parse(&entity.to_string());
            prop_assert_eq!(parsed, Ok(entity));
        }

        #[test]
        fn test_reversed_is_an_involution(
            source in entity_strategy(),
            relation in "[a-z_]{1,12}",
            target in entity_strategy(),
        ) {
            let triple = Triple::new(source, relation, target);
            prop_assert_eq!(triple.reversed().reversed(), triple.clone());
            prop_assert_eq!(triple.reversed().source, triple.target);
        }
    }
}
