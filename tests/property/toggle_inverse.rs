//! Toggle inverse law: two toggles restore the list and balance the effects

use super::support::{Item, Shelf};
use entrylist::{EngineConfig, Engine, Identity, KvListStore, List, ListStore, MemoryBackend, ProcessingType, NO_USER};
use proptest::collection::btree_map;
use proptest::prelude::*;
use std::sync::Arc;

#[test]
fn test_double_toggle_is_identity_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(btree_map("[0-9]{1,2}", "[a-z]{1,4}", 0..8), "[0-9]{1,2}", "[A-Z]{1,2}"),
            |(initial, id, label): (List, String, String)| {
                let store = Arc::new(KvListStore::new(MemoryBackend::new()));
                store.save("Netflix", NO_USER, "localHide", &initial).unwrap();

                let mut shelf = Shelf::default();
                shelf.items.push(Item(1));
                shelf.identities.insert(1, Identity::new(id.clone(), "Title"));

                let mut engine =
                    Engine::register_target(shelf, store.clone(), EngineConfig::default()).unwrap();
                let toggle_type = ProcessingType::new(label).unwrap();
                let entry = Item(1);

                engine.toggle(&entry, "localHide", toggle_type.clone()).unwrap();
                engine.toggle(&entry, "localHide", toggle_type).unwrap();

                // names may change: a re-added id takes the toggled entry's name
                let after = &engine.target_context().lists["localHide"];
                let before_ids: Vec<&String> = initial.keys().collect();
                let after_ids: Vec<&String> = after.keys().collect();
                prop_assert_eq!(after_ids, before_ids);
                prop_assert_eq!(&store.load("Netflix", NO_USER)["localHide"], after);

                let target = engine.target();
                prop_assert_eq!(target.applied, 1);
                prop_assert_eq!(target.reversed, 1);
                Ok(())
            },
        )
        .unwrap();
}
