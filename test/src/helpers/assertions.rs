/// Assert that a client's local instance holds `value` under a top-level field
#[macro_export]
macro_rules! assert_field {
    ($client:expr, $entity:expr, $type_id:expr, $key:expr, $value:expr) => {
        let instance = $client
            .instance($entity, $type_id)
            .unwrap_or_else(|| panic!("no instance for {:?} of type {}", $entity, $type_id));
        assert_eq!(
            instance.get($key),
            Some(&$value),
            "field '{}' of {:?} has the wrong value",
            $key,
            $entity
        );
    };
}

/// Assert that a client never received anything for an entity component
#[macro_export]
macro_rules! assert_no_instance {
    ($client:expr, $entity:expr, $type_id:expr) => {
        assert!(
            $client.instance($entity, $type_id).is_none(),
            "client should not know about {:?} of type {}",
            $entity,
            $type_id
        );
    };
}
