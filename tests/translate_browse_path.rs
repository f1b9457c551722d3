//! TranslateBrowsePath walker behavior.

mod common;

use common::{HAS_COMPONENT, ORGANIZES, TestAddressSpace};
use opcua_core::{BrowseEngine, TranslateEngine, ua};

/// Objects -> Devices -> Motor, plus a reference to a node on another server.
fn fixture() -> TestAddressSpace {
    let mut space = TestAddressSpace::new();
    let objects = ua::NodeId::ns0(85);
    let devices = ua::NodeId::numeric(1, 10);
    let motor = ua::NodeId::numeric(1, 11);
    space.add_node(objects.clone(), ua::NodeClass::Object, "Objects");
    space.add_node(devices.clone(), ua::NodeClass::Object, "Devices");
    space.add_node(motor.clone(), ua::NodeClass::Object, "Motor");
    space.add_reference(
        &objects,
        ORGANIZES,
        ua::ExpandedNodeId::local(devices.clone()),
        true,
    );
    space.add_reference(
        &devices,
        HAS_COMPONENT,
        ua::ExpandedNodeId::local(motor),
        true,
    );
    // A target hosted by server 3, reachable from Devices.
    space.add_reference(
        &devices,
        ORGANIZES,
        ua::ExpandedNodeId::new(ua::NodeId::numeric(1, 99), ua::String::null(), 3),
        true,
    );
    space
}

fn engines() -> (BrowseEngine, TranslateEngine) {
    (BrowseEngine::new(1000), TranslateEngine::new(10, 10))
}

fn element(name: &str) -> ua::RelativePathElement {
    ua::RelativePathElement::named(ua::QualifiedName::new(1, name))
}

#[test]
fn single_element_path_matches() {
    let space = fixture();
    let (browse, translate) = engines();

    let path = ua::BrowsePath::new(
        ua::NodeId::ns0(85),
        ua::RelativePath::new(vec![element("Devices")]),
    );
    let result = translate.translate(&space, &browse, &path);
    assert_eq!(result.status_code, ua::StatusCode::GOOD);
    assert_eq!(result.targets.len(), 1);
    assert_eq!(
        result.targets[0].target_id,
        ua::ExpandedNodeId::local(ua::NodeId::numeric(1, 10))
    );
    assert_eq!(result.targets[0].remaining_path_index, u32::MAX);
}

#[test]
fn two_element_path_chains_browses() {
    let space = fixture();
    let (browse, translate) = engines();

    let path = ua::BrowsePath::new(
        ua::NodeId::ns0(85),
        ua::RelativePath::new(vec![element("Devices"), element("Motor")]),
    );
    let result = translate.translate(&space, &browse, &path);
    assert_eq!(result.status_code, ua::StatusCode::GOOD);
    assert_eq!(
        result.targets[0].target_id,
        ua::ExpandedNodeId::local(ua::NodeId::numeric(1, 11))
    );
}

#[test]
fn unmatched_first_element_is_no_match() {
    let space = fixture();
    let (browse, translate) = engines();

    let path = ua::BrowsePath::new(
        ua::NodeId::ns0(85),
        ua::RelativePath::new(vec![element("Turbine"), element("Motor")]),
    );
    let result = translate.translate(&space, &browse, &path);
    assert_eq!(result.status_code, ua::StatusCode::BAD_NO_MATCH);
    assert!(result.targets.is_empty());
}

#[test]
fn empty_target_name_is_invalid() {
    let space = fixture();
    let (browse, translate) = engines();

    let path = ua::BrowsePath::new(
        ua::NodeId::ns0(85),
        ua::RelativePath::new(vec![element("Devices"), element("")]),
    );
    let result = translate.translate(&space, &browse, &path);
    assert_eq!(result.status_code, ua::StatusCode::BAD_BROWSE_NAME_INVALID);
}

#[test]
fn empty_path_is_nothing_to_do() {
    let space = fixture();
    let (browse, translate) = engines();

    let path = ua::BrowsePath::new(ua::NodeId::ns0(85), ua::RelativePath::default());
    let result = translate.translate(&space, &browse, &path);
    assert_eq!(result.status_code, ua::StatusCode::BAD_NOTHING_TO_DO);
}

#[test]
fn out_of_server_target_lands_in_remaining() {
    let space = fixture();
    let (browse, translate) = engines();

    // Walking Devices -> Generator: the name matches nothing locally, but Devices also points at
    // a node on server 3 whose name is unknown here.
    let path = ua::BrowsePath::new(
        ua::NodeId::numeric(1, 10),
        ua::RelativePath::new(vec![element("Generator")]),
    );
    let result = translate.translate(&space, &browse, &path);
    assert_eq!(
        result.status_code,
        ua::StatusCode::UNCERTAIN_REFERENCE_OUT_OF_SERVER
    );
    assert_eq!(result.targets.len(), 1);
    assert_eq!(result.targets[0].target_id.server_index(), 3);
    assert_eq!(result.targets[0].remaining_path_index, 0);
}

#[test]
fn out_of_server_candidate_on_second_element() {
    let space = fixture();
    let (browse, translate) = engines();

    let path = ua::BrowsePath::new(
        ua::NodeId::ns0(85),
        ua::RelativePath::new(vec![element("Devices"), element("Generator")]),
    );
    let result = translate.translate(&space, &browse, &path);
    assert_eq!(
        result.status_code,
        ua::StatusCode::UNCERTAIN_REFERENCE_OUT_OF_SERVER
    );
    assert_eq!(result.targets.len(), 1);
    assert_eq!(result.targets[0].target_id.server_index(), 3);
    // The remote candidate was found while treating the second element.
    assert_eq!(result.targets[0].remaining_path_index, 1);
}

#[test]
fn local_match_wins_over_remote_candidates() {
    let space = fixture();
    let (browse, translate) = engines();

    // "Motor" matches locally below Devices; the remote candidate is still reported, but the
    // path status is Good.
    let path = ua::BrowsePath::new(
        ua::NodeId::numeric(1, 10),
        ua::RelativePath::new(vec![element("Motor")]),
    );
    let result = translate.translate(&space, &browse, &path);
    assert_eq!(result.status_code, ua::StatusCode::GOOD);
    assert_eq!(result.targets.len(), 2);
}

#[test]
fn unknown_starting_node_propagates() {
    let space = fixture();
    let (browse, translate) = engines();

    let path = ua::BrowsePath::new(
        ua::NodeId::numeric(7, 777),
        ua::RelativePath::new(vec![element("Devices")]),
    );
    let result = translate.translate(&space, &browse, &path);
    assert_eq!(result.status_code, ua::StatusCode::BAD_NODE_ID_UNKNOWN);
}

#[test]
fn inverse_element_walks_against_references() {
    let mut space = fixture();
    // Give Motor an inverse edge back to Devices.
    space.add_reference(
        &ua::NodeId::numeric(1, 11),
        HAS_COMPONENT,
        ua::ExpandedNodeId::local(ua::NodeId::numeric(1, 10)),
        false,
    );
    let (browse, translate) = engines();

    let mut step = element("Devices");
    step.is_inverse = true;
    let path = ua::BrowsePath::new(ua::NodeId::numeric(1, 11), ua::RelativePath::new(vec![step]));
    let result = translate.translate(&space, &browse, &path);
    assert_eq!(result.status_code, ua::StatusCode::GOOD);
    assert_eq!(
        result.targets[0].target_id,
        ua::ExpandedNodeId::local(ua::NodeId::numeric(1, 10))
    );
}

#[test]
fn match_cap_reports_query_too_complex() {
    let mut space = TestAddressSpace::new();
    let root = ua::NodeId::numeric(1, 1);
    space.add_node(root.clone(), ua::NodeClass::Object, "Root");
    // Three children sharing one browse name, against a cap of two matches.
    for index in 0..3_u32 {
        let id = ua::NodeId::numeric(1, 100 + index);
        space.add_node(id.clone(), ua::NodeClass::Object, "Twin");
        space.add_reference(&root, ORGANIZES, ua::ExpandedNodeId::local(id), true);
    }
    let browse = BrowseEngine::new(1000);
    let translate = TranslateEngine::new(2, 2);

    let path = ua::BrowsePath::new(root, ua::RelativePath::new(vec![element("Twin")]));
    let result = translate.translate(&space, &browse, &path);
    assert_eq!(result.status_code, ua::StatusCode::BAD_QUERY_TOO_COMPLEX);
}
