//! View transformation resource behavior

#[path = "testutils/mod.rs"]
mod testutils;

use std::sync::Arc;
use structr::resource::{
    Resource, ResourceError, ResourceResult, TransformationResource, TypeResource,
    ViewTransformation, DEFAULT_PAGE, DEFAULT_PAGE_SIZE,
};
use structr::storage::{GraphObject, Node, Value};
use structr::SecurityContext;
use testutils::test_fixture::TestFixture;

/// Keeps only objects whose enumProperty equals the given symbol
struct KeepStatus(&'static str);

impl ViewTransformation for KeepStatus {
    fn apply(&self, _ctx: &SecurityContext, objects: &mut Vec<GraphObject>) -> ResourceResult<()> {
        objects.retain(|o| o.get_property("enumProperty") == Some(Value::from(self.0)));
        Ok(())
    }
}

/// Drops the first object, then panics
struct PanicAfterDrop;

impl ViewTransformation for PanicAfterDrop {
    fn apply(&self, _ctx: &SecurityContext, objects: &mut Vec<GraphObject>) -> ResourceResult<()> {
        objects.remove(0);
        panic!("transformation exploded");
    }
}

struct Failing {
    evaluate: bool,
}

impl ViewTransformation for Failing {
    fn evaluate_wrapped_resource(&self) -> bool {
        self.evaluate
    }

    fn apply(&self, _ctx: &SecurityContext, _objects: &mut Vec<GraphObject>) -> ResourceResult<()> {
        Err(ResourceError::Transformation("cannot transform".to_string()))
    }
}

/// Produces its own objects without reading the wrapped resource
struct Generate(usize);

impl ViewTransformation for Generate {
    fn evaluate_wrapped_resource(&self) -> bool {
        false
    }

    fn apply(&self, _ctx: &SecurityContext, objects: &mut Vec<GraphObject>) -> ResourceResult<()> {
        assert!(objects.is_empty());
        for i in 0..self.0 {
            let mut node = Node::new("Generated");
            node.id = format!("g{}", i);
            objects.push(node.into());
        }
        Ok(())
    }
}

fn populated_fixture() -> TestFixture {
    let fixture = TestFixture::new().unwrap();
    for status in ["Status1", "Status2", "Status1", "Status3", "Status1"] {
        fixture
            .store()
            .create_node("TestFour", vec![("enumProperty".into(), status.into())])
            .unwrap();
    }
    fixture
}

fn transformation_resource(
    fixture: &TestFixture,
    transformation: Arc<dyn ViewTransformation>,
) -> TransformationResource {
    TransformationResource::new(SecurityContext::super_user(), Some(transformation)).wrap(
        Box::new(TypeResource::for_type(fixture.store().clone(), "TestFour")),
    )
}

#[test]
fn test_transformation_applied_before_paging() {
    let fixture = populated_fixture();
    let resource = transformation_resource(&fixture, Arc::new(KeepStatus("Status1")));

    let all = resource
        .do_get(None, false, DEFAULT_PAGE_SIZE, DEFAULT_PAGE)
        .unwrap();
    assert_eq!(all.size(), 3);
    assert_eq!(all.raw_result_count(), Some(3));

    let page = resource.do_get(None, false, 2, 2).unwrap();
    assert_eq!(page.size(), 1);
    assert_eq!(page.raw_result_count(), Some(3));
    assert_eq!(page.page_count(), Some(2));
}

#[test]
fn test_panicking_transformation_is_swallowed() {
    let fixture = populated_fixture();
    let resource = transformation_resource(&fixture, Arc::new(PanicAfterDrop));

    let result = resource
        .do_get(None, false, DEFAULT_PAGE_SIZE, DEFAULT_PAGE)
        .expect("panic must not escape");

    // partially transformed list, raw count from the wrapped resource
    assert_eq!(result.size(), 4);
    assert_eq!(result.raw_result_count(), Some(5));
}

#[test]
fn test_failing_transformation_is_swallowed_when_evaluating() {
    let fixture = populated_fixture();
    let resource = transformation_resource(&fixture, Arc::new(Failing { evaluate: true }));

    let result = resource.do_get(None, false, 2, 1).unwrap();
    assert_eq!(result.size(), 2);
    assert_eq!(result.raw_result_count(), Some(5));
}

#[test]
fn test_failing_transformation_propagates_without_evaluation() {
    let fixture = populated_fixture();
    let resource = transformation_resource(&fixture, Arc::new(Failing { evaluate: false }));

    let result = resource.do_get(None, false, DEFAULT_PAGE_SIZE, DEFAULT_PAGE);
    assert!(matches!(result, Err(ResourceError::Transformation(_))));
}

#[test]
fn test_non_evaluating_transformation_builds_result() {
    let fixture = populated_fixture();
    let resource = transformation_resource(&fixture, Arc::new(Generate(3)));

    let result = resource.do_get(None, false, 2, -1).unwrap();
    let ids: Vec<&str> = result.results().iter().map(|o| o.id()).collect();
    assert_eq!(ids, vec!["g1", "g2"]);
    assert_eq!(result.raw_result_count(), Some(3));
    assert!(result.is_collection());
    assert!(!result.is_primitive_array());
}

#[test]
fn test_sorting_passed_to_wrapped_resource() {
    let fixture = populated_fixture();
    let resource = transformation_resource(&fixture, Arc::new(KeepStatus("Status1")));

    let mut names = Vec::new();
    for object in fixture.store().all_of_type("TestFour").unwrap() {
        if object.get_property("enumProperty") == Some(Value::from("Status1")) {
            names.push(object.id().to_string());
        }
    }
    names.sort();

    let result = resource
        .do_get(Some("id"), false, DEFAULT_PAGE_SIZE, DEFAULT_PAGE)
        .unwrap();
    let ids: Vec<String> = result.results().iter().map(|o| o.id().to_string()).collect();
    assert_eq!(ids, names);
}

#[test]
fn test_missing_parts_yield_empty_result() {
    let fixture = populated_fixture();

    let unwrapped =
        TransformationResource::new(SecurityContext::anonymous(), Some(Arc::new(KeepStatus("Status1"))));
    let result = unwrapped
        .do_get(None, false, DEFAULT_PAGE_SIZE, DEFAULT_PAGE)
        .unwrap();
    assert!(result.is_empty());
    assert_eq!(result.raw_result_count(), None);
    assert_eq!(unwrapped.resource_signature(), "");

    let no_transformation = TransformationResource::new(SecurityContext::anonymous(), None)
        .wrap(Box::new(TypeResource::for_type(fixture.store().clone(), "TestFour")));
    let result = no_transformation
        .do_get(None, false, DEFAULT_PAGE_SIZE, DEFAULT_PAGE)
        .unwrap();
    assert!(result.is_empty());
    assert!(result.is_collection());
    assert_eq!(no_transformation.resource_signature(), "TestFour");
}

#[test]
fn test_never_directly_addressable() {
    let fixture = populated_fixture();
    let mut resource = transformation_resource(&fixture, Arc::new(KeepStatus("Status1")));
    assert!(!resource
        .check_and_configure("TestFour", &SecurityContext::super_user())
        .unwrap());
    assert_eq!(resource.resource_signature(), "TestFour");
}
