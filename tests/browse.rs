//! Browse engine behavior against an in-memory address space.

mod common;

use common::{HAS_CHILD, HAS_COMPONENT, ORGANIZES, TestAddressSpace};
use opcua_core::{BrowseEngine, ScHandle, SessionId, SessionManager, ua};

/// A folder with five component references to objects 101..=105, plus one method child.
fn fixture() -> TestAddressSpace {
    let mut space = TestAddressSpace::new();
    let folder = ua::NodeId::ns0(85);
    space.add_node(folder.clone(), ua::NodeClass::Object, "Objects");
    for index in 0..5_u32 {
        let id = ua::NodeId::numeric(1, 101 + index);
        space.add_node(id.clone(), ua::NodeClass::Object, &format!("Child{index}"));
        space.add_reference(
            &folder,
            ORGANIZES,
            ua::ExpandedNodeId::local(id.clone()),
            true,
        );
        // The inverse edge on the child side.
        space.add_reference(
            &id,
            ORGANIZES,
            ua::ExpandedNodeId::local(folder.clone()),
            false,
        );
    }
    space
}

fn session_fixture() -> (SessionManager, SessionId) {
    let mut sessions = SessionManager::new(4);
    let id = sessions.create_session(ScHandle(1)).expect("session");
    (sessions, id)
}

fn browse_once(
    engine: &mut BrowseEngine,
    space: &TestAddressSpace,
    sessions: &mut SessionManager,
    session_id: SessionId,
    description: &ua::BrowseDescription,
    max_references: u32,
) -> ua::BrowseResult {
    let session = sessions.session_mut(session_id).expect("session");
    engine.browse(
        space,
        session,
        &ua::ViewDescription::default(),
        description,
        max_references,
        false,
    )
}

#[test]
fn paging_through_continuation_points() {
    let space = fixture();
    let (mut sessions, session_id) = session_fixture();
    let mut engine = BrowseEngine::new(1000);

    let description = ua::BrowseDescription {
        node_id: ua::NodeId::ns0(85),
        browse_direction: ua::BrowseDirection::Forward,
        ..ua::BrowseDescription::any_reference(ua::NodeId::ns0(85))
    };

    // Cap 2 over 5 references: two full pages and a final partial one.
    let first = browse_once(
        &mut engine,
        &space,
        &mut sessions,
        session_id,
        &description,
        2,
    );
    assert_eq!(first.status_code, ua::StatusCode::GOOD);
    assert_eq!(first.references.len(), 2);
    let continuation = first.continuation_point.expect("first page must continue");

    let session = sessions.session_mut(session_id).expect("session");
    let second = engine.browse_next(&space, session, &continuation, false);
    assert_eq!(second.status_code, ua::StatusCode::GOOD);
    assert_eq!(second.references.len(), 2);
    let continuation = second.continuation_point.expect("second page must continue");

    let session = sessions.session_mut(session_id).expect("session");
    let third = engine.browse_next(&space, session, &continuation, false);
    assert_eq!(third.status_code, ua::StatusCode::GOOD);
    assert_eq!(third.references.len(), 1);
    assert!(third.continuation_point.is_none());

    // The continuation point was consumed; replaying it is invalid.
    let session = sessions.session_mut(session_id).expect("session");
    let replay = engine.browse_next(&space, session, &continuation, false);
    assert_eq!(
        replay.status_code,
        ua::StatusCode::BAD_CONTINUATION_POINT_INVALID
    );
}

#[test]
fn second_continuation_point_is_refused_without_auto_release() {
    let space = fixture();
    let (mut sessions, session_id) = session_fixture();
    let mut engine = BrowseEngine::new(1000);
    let description = ua::BrowseDescription::any_reference(ua::NodeId::ns0(85));

    let first = browse_once(
        &mut engine,
        &space,
        &mut sessions,
        session_id,
        &description,
        2,
    );
    assert!(first.continuation_point.is_some());

    // The session already holds a continuation point.
    let second = browse_once(
        &mut engine,
        &space,
        &mut sessions,
        session_id,
        &description,
        2,
    );
    assert_eq!(
        second.status_code,
        ua::StatusCode::BAD_NO_CONTINUATION_POINTS
    );

    // With auto-release, the old continuation point makes way for the new one.
    let session = sessions.session_mut(session_id).expect("session");
    let third = engine.browse(
        &space,
        session,
        &ua::ViewDescription::default(),
        &description,
        2,
        true,
    );
    assert_eq!(third.status_code, ua::StatusCode::GOOD);
    assert!(third.continuation_point.is_some());
}

#[test]
fn release_only_frees_the_continuation_point() {
    let space = fixture();
    let (mut sessions, session_id) = session_fixture();
    let mut engine = BrowseEngine::new(1000);
    let description = ua::BrowseDescription::any_reference(ua::NodeId::ns0(85));

    let first = browse_once(
        &mut engine,
        &space,
        &mut sessions,
        session_id,
        &description,
        2,
    );
    let continuation = first.continuation_point.expect("must continue");

    let session = sessions.session_mut(session_id).expect("session");
    let released = engine.browse_next(&space, session, &continuation, true);
    assert_eq!(released.status_code, ua::StatusCode::GOOD);
    assert!(released.references.is_empty());

    // Freed means gone.
    let session = sessions.session_mut(session_id).expect("session");
    let replay = engine.browse_next(&space, session, &continuation, false);
    assert_eq!(
        replay.status_code,
        ua::StatusCode::BAD_CONTINUATION_POINT_INVALID
    );
}

#[test]
fn subtype_filter_includes_and_excludes() {
    let mut space = TestAddressSpace::new();
    let source = ua::NodeId::numeric(1, 1);
    let target = ua::NodeId::numeric(1, 2);
    space.add_node(source.clone(), ua::NodeClass::Object, "Source");
    space.add_node(target.clone(), ua::NodeClass::Object, "Target");
    // The reference is typed `HasComponent`, a transitive subtype of `HasChild`.
    space.add_reference(
        &source,
        HAS_COMPONENT,
        ua::ExpandedNodeId::local(target),
        true,
    );

    let (mut sessions, session_id) = session_fixture();
    let mut engine = BrowseEngine::new(1000);

    let mut description = ua::BrowseDescription::any_reference(source);
    description.browse_direction = ua::BrowseDirection::Forward;
    description.reference_type_id = ua::NodeId::ns0(HAS_CHILD);

    description.include_subtypes = true;
    let with_subtypes = browse_once(
        &mut engine,
        &space,
        &mut sessions,
        session_id,
        &description,
        0,
    );
    assert_eq!(with_subtypes.references.len(), 1);

    description.include_subtypes = false;
    let without_subtypes = browse_once(
        &mut engine,
        &space,
        &mut sessions,
        session_id,
        &description,
        0,
    );
    assert!(without_subtypes.references.is_empty());
}

#[test]
fn node_class_mask_filters_targets() {
    let mut space = TestAddressSpace::new();
    let source = ua::NodeId::numeric(1, 1);
    space.add_node(source.clone(), ua::NodeClass::Object, "Source");
    for (index, class) in [
        ua::NodeClass::Object,
        ua::NodeClass::Variable,
        ua::NodeClass::Method,
    ]
    .into_iter()
    .enumerate()
    {
        let id = ua::NodeId::numeric(1, 10 + u32::try_from(index).unwrap());
        space.add_node(id.clone(), class, &format!("Target{index}"));
        space.add_reference(&source, ORGANIZES, ua::ExpandedNodeId::local(id), true);
    }

    let (mut sessions, session_id) = session_fixture();
    let mut engine = BrowseEngine::new(1000);

    let mut description = ua::BrowseDescription::any_reference(source);
    description.node_class_mask = ua::NodeClassMask::any()
        .with(ua::NodeClass::Object)
        .with(ua::NodeClass::Variable);

    let result = browse_once(
        &mut engine,
        &space,
        &mut sessions,
        session_id,
        &description,
        0,
    );
    // The method target is masked out.
    assert_eq!(result.references.len(), 2);
    assert!(
        result
            .references
            .iter()
            .all(|reference| reference.node_class != ua::NodeClass::Method)
    );
}

#[test]
fn empty_result_mask_leaves_fields_indeterminate() {
    let space = fixture();
    let (mut sessions, session_id) = session_fixture();
    let mut engine = BrowseEngine::new(1000);

    let mut description = ua::BrowseDescription::any_reference(ua::NodeId::ns0(85));
    description.browse_direction = ua::BrowseDirection::Forward;
    description.result_mask = ua::BrowseResultMask::none();

    let result = browse_once(
        &mut engine,
        &space,
        &mut sessions,
        session_id,
        &description,
        0,
    );
    assert_eq!(result.references.len(), 5);
    for reference in &result.references {
        // The target itself is always present; everything else is indeterminate.
        assert!(!reference.node_id.node_id().is_null());
        assert!(reference.browse_name.is_null());
        assert!(reference.display_name.is_null());
        assert_eq!(reference.node_class, ua::NodeClass::Unspecified);
        assert!(reference.type_definition.node_id().is_null());
        assert!(reference.reference_type_id.is_null());
    }
}

#[test]
fn direction_filter() {
    let space = fixture();
    let (mut sessions, session_id) = session_fixture();
    let mut engine = BrowseEngine::new(1000);
    let child = ua::NodeId::numeric(1, 101);

    let mut description = ua::BrowseDescription::any_reference(child.clone());
    description.browse_direction = ua::BrowseDirection::Forward;
    let forward = browse_once(
        &mut engine,
        &space,
        &mut sessions,
        session_id,
        &description,
        0,
    );
    // The child only has the inverse edge towards the folder.
    assert!(forward.references.is_empty());

    let mut description = ua::BrowseDescription::any_reference(child);
    description.browse_direction = ua::BrowseDirection::Inverse;
    let inverse = browse_once(
        &mut engine,
        &space,
        &mut sessions,
        session_id,
        &description,
        0,
    );
    assert_eq!(inverse.references.len(), 1);
}

#[test]
fn error_statuses() {
    let space = fixture();
    let (mut sessions, session_id) = session_fixture();
    let mut engine = BrowseEngine::new(1000);

    // Unknown source node.
    let description = ua::BrowseDescription::any_reference(ua::NodeId::numeric(9, 9999));
    let unknown = browse_once(
        &mut engine,
        &space,
        &mut sessions,
        session_id,
        &description,
        0,
    );
    assert_eq!(unknown.status_code, ua::StatusCode::BAD_NODE_ID_UNKNOWN);

    // Invalid reference type, reported even though the source node is also unknown.
    let mut description = ua::BrowseDescription::any_reference(ua::NodeId::numeric(9, 9999));
    description.reference_type_id = ua::NodeId::numeric(9, 123);
    let invalid = browse_once(
        &mut engine,
        &space,
        &mut sessions,
        session_id,
        &description,
        0,
    );
    assert_eq!(
        invalid.status_code,
        ua::StatusCode::BAD_REFERENCE_TYPE_ID_INVALID
    );
}
