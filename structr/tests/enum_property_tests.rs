//! Enum property storage and search on nodes and relationships

#[path = "testutils/mod.rs"]
mod testutils;

use structr::storage::{GraphError, StorageError, Value};
use testutils::test_fixture::TestFixture;

#[test]
fn test_simple_property() {
    let fixture = TestFixture::new().expect("Failed to create test fixture");
    let store = fixture.store();

    let entity = store
        .create_node("TestFour", vec![("enumProperty".into(), "Status1".into())])
        .expect("Failed to create TestFour");

    let loaded = store.get_node(&entity.id).unwrap().expect("node exists");
    assert_eq!(loaded.get_property("enumProperty"), Some(&Value::from("Status1")));
}

#[test]
fn test_simple_search_on_node() {
    let fixture = TestFixture::new().expect("Failed to create test fixture");
    let store = fixture.store();

    let entity = store
        .create_node("TestFour", vec![("enumProperty".into(), "Status1".into())])
        .unwrap();
    store
        .create_node("TestFour", vec![("enumProperty".into(), "Status2".into())])
        .unwrap();

    let result = store
        .node_query("TestFour")
        .and("enumProperty", "Status1")
        .get_result()
        .unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(result[0], entity);
}

#[test]
fn test_simple_search_on_relationship() {
    let fixture = TestFixture::new().expect("Failed to create test fixture");
    let store = fixture.store();

    let test_one = store.create_node("TestOne", vec![]).unwrap();
    let test_four = store.create_node("TestFour", vec![]).unwrap();

    let relationship = store
        .create_relationship("OneFourOneToOne", &test_one.id, &test_four.id, vec![])
        .unwrap();

    let updated = store
        .set_property(&relationship.id, "enumProperty", "Status1".into())
        .unwrap();
    assert_eq!(
        updated.get_property("enumProperty"),
        Some(Value::from("Status1"))
    );
    assert_eq!(
        store.get_property(&relationship.id, "enumProperty").unwrap(),
        Some(Value::from("Status1"))
    );

    let result = store
        .relationship_query("OneFourOneToOne")
        .and("enumProperty", "Status1")
        .get_result()
        .unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, relationship.id);
    assert!(result[0].goes_from_to(&test_one.id, &test_four.id));
}

#[test]
fn test_invalid_symbol_rejected() {
    let fixture = TestFixture::new().expect("Failed to create test fixture");
    let store = fixture.store();

    let result = store.create_node("TestFour", vec![("enumProperty".into(), "Status8".into())]);
    assert!(matches!(
        result,
        Err(StorageError::Graph(GraphError::PropertyError(_)))
    ));

    let wrong_case =
        store.create_node("TestFour", vec![("enumProperty".into(), "status1".into())]);
    assert!(wrong_case.is_err());
    assert!(store.node_query("TestFour").get_result().unwrap().is_empty());
}

#[test]
fn test_relationship_endpoint_types_checked() {
    let fixture = TestFixture::new().expect("Failed to create test fixture");
    let store = fixture.store();

    let test_one = store.create_node("TestOne", vec![]).unwrap();
    let test_four = store.create_node("TestFour", vec![]).unwrap();

    let reversed = store.create_relationship("OneFourOneToOne", &test_four.id, &test_one.id, vec![]);
    assert!(matches!(reversed, Err(StorageError::InvalidOperation(_))));
}

#[cfg(feature = "sled-backend")]
#[test]
fn test_enum_value_survives_reopen() {
    use std::sync::Arc;
    use structr::storage::{GraphStore, StorageType};

    let dir = tempfile::tempdir().unwrap();
    let catalog = Arc::new(testutils::test_fixture::test_catalog());

    let id = {
        let store = GraphStore::open(StorageType::Sled, dir.path(), catalog.clone()).unwrap();
        let node = store
            .create_node("TestFour", vec![("enumProperty".into(), "Status7".into())])
            .unwrap();
        store.flush().unwrap();
        node.id
    };

    let store = GraphStore::open(StorageType::Sled, dir.path(), catalog).unwrap();
    assert_eq!(
        store.get_property(&id, "enumProperty").unwrap(),
        Some(Value::from("Status7"))
    );
}
