//! Property-based tests for collection playthrough

use proptest::prelude::*;

use collection_editor::shared::{Collection, CollectionNode};

const SKILLS: [&str; 4] = ["counting", "fractions", "algebra", "geometry"];

fn skills() -> impl Strategy<Value = Vec<String>> {
    prop::sample::subsequence(SKILLS.to_vec(), 0..=2)
        .prop_map(|s| s.into_iter().map(str::to_string).collect())
}

fn collection() -> impl Strategy<Value = Collection> {
    prop::collection::vec((skills(), skills()), 0..6).prop_map(|specs| {
        let mut collection = Collection::new("col_prop", "Generated");
        collection.nodes = specs
            .into_iter()
            .enumerate()
            .map(|(i, (prerequisite_skills, acquired_skills))| {
                let mut node = CollectionNode::new(format!("exp_{}", i));
                node.prerequisite_skills = prerequisite_skills;
                node.acquired_skills = acquired_skills;
                node
            })
            .collect();
        collection
    })
}

proptest! {
    #[test]
    fn test_next_never_offers_completed(collection in collection(), mask in any::<u8>()) {
        let completed: Vec<String> = collection
            .exploration_ids()
            .into_iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, id)| id)
            .collect();

        let next = collection.next_exploration_ids(&completed);

        for id in &next {
            prop_assert!(!completed.contains(id));
            prop_assert!(collection.node(id).is_some());
        }
    }

    #[test]
    fn test_nodes_without_prerequisites_offered_first(collection in collection()) {
        let next = collection.next_exploration_ids(&[]);
        for node in &collection.nodes {
            prop_assert_eq!(
                next.contains(&node.exploration_id),
                node.prerequisite_skills.is_empty()
            );
        }
    }

    #[test]
    fn test_generated_collections_validate(collection in collection()) {
        prop_assert!(collection.validate().is_ok());
    }
}
