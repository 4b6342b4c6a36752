//! Property-based tests for the interning table.

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use crate::intern::{InternTable, EMPTY_ID};

    proptest! {
        #[test]
        fn test_interning_is_a_bijection(words in prop::collection::vec("[a-z]{1,8}", 0..64)) {
            let table = InternTable::new();
            let ids: Vec<_> = words.iter().map(|w| table.intern(w)).collect();

            let distinct: HashSet<&String> = words.iter().collect();
            prop_assert_eq!(table.len(), distinct.len());

            for (word, id) in words.iter().zip(&ids) {
                prop_assert_ne!(*id, EMPTY_ID);
                prop_assert_eq!(table.intern(word), *id);
                prop_assert_eq!(table.lookup(word), Some(*id));
                let resolved = table.string(*id);
                prop_assert_eq!(resolved.as_deref(), Some(word.as_str()));
            }
        }

        #[test]
        fn test_lookup_of_unseen_strings_does_not_grow(
            seen in prop::collection::vec("[a-m]{1,6}", 1..16),
            unseen in prop::collection::vec("[n-z]{1,6}", 1..16),
        ) {
            let table = InternTable::new();
            for word in &seen {
                table.intern(word);
            }
            let before = table.len();
            for word in &unseen {
                prop_assert_eq!(table.lookup(word), None);
            }
            prop_assert_eq!(table.len(), before);
        }
    }
}
