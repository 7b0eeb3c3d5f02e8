//! PROPERTY-BASED TESTS: Patch application
//!
//! Key invariants:
//! 1. A patch with a correct traversal path changes exactly the targeted leaf
//! 2. An id absent from the model fails with FieldNotFound and changes nothing

use std::collections::BTreeMap;

use proptest::prelude::*;
use patchwork_shared::{
    collate, number, patch, string, CollatedModel, FieldId, Model, PatchError, PathKey, Schema,
    Value,
};
use patchwork_test::{TestProtocol, PLAYER};

fn model() -> CollatedModel {
    let mut model = Model::new();
    model.insert(PLAYER, TestProtocol::player());
    collate(&model).unwrap()
}

fn inventory_item() -> Schema {
    Schema::new()
        .with("item", string())
        .with("count", number())
}

/// A default player carrying `items` inventory entries and one stat
fn player(items: usize) -> Value {
    let mut player = Value::from_schema(&TestProtocol::player());
    let mut item = Value::from_schema(&inventory_item());
    item.set_field("count", Value::Number(1.0));
    player.set_field("inventory", Value::Array(vec![item; items]));
    player.set_field(
        "stats",
        Value::Map([("hp".to_string(), Value::Number(10.0))].into_iter().collect()),
    );
    player
}

fn flatten(value: &Value, prefix: String, output: &mut BTreeMap<String, Value>) {
    match value {
        Value::Struct(fields) | Value::Map(fields) => {
            for (key, field) in fields {
                flatten(field, format!("{}/{}", prefix, key), output);
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten(item, format!("{}/{}", prefix, index), output);
            }
        }
        leaf => {
            output.insert(prefix, leaf.clone());
        }
    }
}

fn leaves(value: &Value) -> BTreeMap<String, Value> {
    let mut output = BTreeMap::new();
    flatten(value, String::new(), &mut output);
    output
}

// alive(1) home/x(3) home/y(4) inventory/[i]/count(6) inventory/[i]/item(7) name(8)
fn leaf_field() -> impl Strategy<Value = (FieldId, &'static str)> {
    prop_oneof![
        Just((1, "/alive")),
        Just((3, "/home/x")),
        Just((4, "/home/y")),
        Just((6, "/inventory/{}/count")),
        Just((7, "/inventory/{}/item")),
        Just((8, "/name")),
    ]
}

proptest! {
    #[test]
    fn prop_patch_changes_only_target(
        (field_id, pattern) in leaf_field(),
        items in 1usize..5,
        index_seed in any::<usize>(),
    ) {
        let model = model();
        let index = index_seed % items;
        let path = if pattern.starts_with("/inventory") {
            vec![PathKey::Index(index as u32)]
        } else {
            Vec::new()
        };
        let expected_leaf = pattern.replace("{}", &index.to_string());

        let mut target = player(items);
        let before = leaves(&target);
        patch(&model, PLAYER, field_id, &mut target, &path, |parent, key| {
            parent.set_field(key, Value::from("patched"))
        })
        .unwrap();
        let after = leaves(&target);

        let changed: Vec<_> = before
            .keys()
            .filter(|key| before.get(*key) != after.get(*key))
            .cloned()
            .collect();
        prop_assert_eq!(before.len(), after.len());
        prop_assert_eq!(changed, vec![expected_leaf.clone()]);
        prop_assert_eq!(after.get(&expected_leaf), Some(&Value::from("patched")));
    }

    #[test]
    fn prop_unknown_field_fails_without_change(field_id in 10u32..10_000, items in 0usize..3) {
        let model = model();
        let mut target = player(items);
        let before = target.clone();

        let result = patch(&model, PLAYER, field_id, &mut target, &[], |parent, key| {
            parent.set_field(key, Value::Boolean(false))
        });

        prop_assert_eq!(result, Err(PatchError::FieldNotFound { type_id: PLAYER, field_id }));
        prop_assert_eq!(target, before);
    }

    #[test]
    fn prop_out_of_bounds_index_is_rejected(items in 0usize..4, extra in 0u32..100) {
        let model = model();
        let mut target = player(items);
        let path = vec![PathKey::Index(items as u32 + extra)];

        let result = patch(&model, PLAYER, 6, &mut target, &path, |_, _| ());

        prop_assert_eq!(
            result,
            Err(PatchError::InstanceMismatch { key: "inventory".to_string() })
        );
    }
}

#[test]
fn collections_are_patched_as_a_whole() {
    let model = model();
    let mut target = player(2);

    patch(&model, PLAYER, 9, &mut target, &[], |parent, key| {
        parent.set_field(key, Value::Map(BTreeMap::new()))
    })
    .unwrap();

    assert_eq!(target.get("stats"), Some(&Value::Map(BTreeMap::new())));
}

#[test]
fn missing_traversal_entry_is_reported() {
    let model = model();
    let mut target = player(1);

    assert_eq!(
        patch(&model, PLAYER, 7, &mut target, &[], |_, _| ()),
        Err(PatchError::TraversalPathExhausted {
            key: "inventory".to_string(),
            consumed: 0,
        })
    );
}
