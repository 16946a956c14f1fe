//! Unit tests for taxonomy types.
//!
//! Covers status classification, folder type parsing, builders and the
//! JSON shape of folder and asset snapshots.

use super::*;
use serde_json::json;

// ============================================================================
// ResultStatus tests
// ============================================================================

#[test]
fn test_classify_known_statuses() {
    assert_eq!(ResultStatus::classify(Some("Pass")), ResultStatus::Pass);
    assert_eq!(ResultStatus::classify(Some("FAIL")), ResultStatus::Fail);
    assert_eq!(ResultStatus::classify(Some("block")), ResultStatus::Block);
    assert_eq!(ResultStatus::classify(Some("N/A")), ResultStatus::NotApplicable);
    assert_eq!(ResultStatus::classify(Some("na")), ResultStatus::NotApplicable);
}

#[test]
fn test_classify_falls_back_to_not_tested() {
    assert_eq!(ResultStatus::classify(None), ResultStatus::NotTested);
    assert_eq!(ResultStatus::classify(Some("")), ResultStatus::NotTested);
    assert_eq!(ResultStatus::classify(Some("N/T")), ResultStatus::NotTested);
    assert_eq!(ResultStatus::classify(Some("passed")), ResultStatus::NotTested);
    assert_eq!(ResultStatus::classify(Some(" pass ")), ResultStatus::NotTested);
}

#[test]
fn test_status_labels() {
    assert_eq!(ResultStatus::NotTested.to_string(), "N/T");
    assert_eq!(ResultStatus::NotApplicable.label(), "N/A");
    assert_eq!(ResultStatus::Block.label(), "Block");
}

// ============================================================================
// FolderType tests
// ============================================================================

#[test]
fn test_folder_type_display_matches_wire_name() {
    for ty in [
        FolderType::Project,
        FolderType::Environment,
        FolderType::DeploymentDate,
        FolderType::Feature,
    ] {
        assert_eq!(serde_json::to_value(ty).unwrap(), json!(ty.to_string()));
    }
    assert!(serde_json::from_value::<FolderType>(json!("release")).is_err());
}

// ============================================================================
// FolderNode tests
// ============================================================================

#[test]
fn test_with_child_sets_parent() {
    let env = FolderNode::new(2, "QA", FolderType::Environment)
        .with_child(FolderNode::new(3, "2024-01-01", FolderType::DeploymentDate));
    assert_eq!(env.children.len(), 1);
    assert_eq!(env.children[0].parent_folder_id, Some(2));
}

#[test]
fn test_folder_node_deserializes_backend_shape() {
    let value = json!({
        "id": 1,
        "name": "Shop",
        "type": "project",
        "parent_folder_id": null,
        "children": [
            { "id": 2, "name": "QA", "type": "environment", "parent_folder_id": 1 }
        ]
    });
    let node: FolderNode = serde_json::from_value(value).unwrap();
    assert_eq!(node.folder_type, FolderType::Project);
    assert_eq!(node.children[0].folder_type, FolderType::Environment);
    assert!(node.children[0].children.is_empty());
}

#[test]
fn test_folder_node_rejects_unknown_type() {
    let value = json!({ "id": 1, "name": "X", "type": "sprint" });
    assert!(serde_json::from_value::<FolderNode>(value).is_err());
}

// ============================================================================
// TestAsset tests
// ============================================================================

#[test]
fn test_asset_builder() {
    let asset = TestAsset::new(9)
        .with_folder(4)
        .with_status("Fail")
        .with_environment("staging")
        .with_categories("Login", "OAuth", "")
        .with_creator("kim")
        .with_assignee("lee");
    assert_eq!(asset.folder_id, Some(4));
    assert_eq!(asset.status(), ResultStatus::Fail);
    assert_eq!(asset.sub_category.as_deref(), Some("OAuth"));
    assert!(asset.detail_category.is_none());
    assert_eq!(asset.assignee_name.as_deref(), Some("lee"));
}

#[test]
fn test_asset_deserializes_with_missing_fields() {
    let asset: TestAsset = serde_json::from_value(json!({ "id": 3 })).unwrap();
    assert_eq!(asset, TestAsset::new(3));
    assert_eq!(asset.status(), ResultStatus::NotTested);
}

#[test]
fn test_asset_serializes_snake_case() {
    let asset = TestAsset::new(1).with_status("Pass");
    let value = serde_json::to_value(&asset).unwrap();
    assert_eq!(value["result_status"], "Pass");
    assert!(value.get("main_category").is_some());
}
