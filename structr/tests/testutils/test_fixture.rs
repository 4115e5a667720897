//! Test fixture with the test schema and an isolated graph store
//!
//! Schema:
//! - TestOne (node)
//! - TestFour (node) with `enumProperty: TestEnum`
//! - OneFourOneToOne (TestOne -> TestFour) with `enumProperty: TestEnum`

#![allow(dead_code)]

use structr::schema::{EntityType, PropertyKey, SchemaCatalog};
use structr::storage::{GraphStore, StorageType};
use std::sync::Arc;

pub const TEST_ENUM: [&str; 7] = [
    "Status1", "Status2", "Status3", "Status4", "Status5", "Status6", "Status7",
];

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Catalog holding the builtin types plus the test schema
pub fn test_catalog() -> SchemaCatalog {
    let catalog = SchemaCatalog::new();

    catalog
        .register_type(
            EntityType::node("TestOne")
                .extends("AbstractNode")
                .with_property(PropertyKey::integer("anInt"))
                .with_property(PropertyKey::string("aString"))
                .with_view("public", ["id", "type", "name", "anInt"]),
        )
        .expect("register TestOne");

    catalog
        .register_type(
            EntityType::node("TestFour")
                .extends("AbstractNode")
                .with_property(PropertyKey::enumeration("enumProperty", TEST_ENUM))
                .with_property(PropertyKey::string("stringProperty")),
        )
        .expect("register TestFour");

    catalog
        .register_type(
            EntityType::relationship("OneFourOneToOne", "TestOne", "TestFour")
                .extends("AbstractRelationship")
                .with_property(PropertyKey::enumeration("enumProperty", TEST_ENUM)),
        )
        .expect("register OneFourOneToOne");

    catalog
}

pub struct TestFixture {
    catalog: Arc<SchemaCatalog>,
    store: Arc<GraphStore>,
    _temp_dir: tempfile::TempDir,
}

impl TestFixture {
    /// Fixture on the in-memory driver
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        Self::with_storage(StorageType::Memory)
    }

    pub fn with_storage(storage_type: StorageType) -> Result<Self, Box<dyn std::error::Error>> {
        init_logging();

        let temp_dir = tempfile::tempdir()?;
        let db_path = temp_dir
            .path()
            .join(format!("structr_test_{}", fastrand::u64(..)));

        let catalog = Arc::new(test_catalog());
        let store = GraphStore::open(storage_type, &db_path, catalog.clone())?;

        Ok(Self {
            catalog,
            store: Arc::new(store),
            _temp_dir: temp_dir,
        })
    }

    pub fn catalog(&self) -> &Arc<SchemaCatalog> {
        &self.catalog
    }

    pub fn store(&self) -> &Arc<GraphStore> {
        &self.store
    }
}
