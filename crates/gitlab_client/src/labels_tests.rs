use super::*;
use serde_json::{from_str, json, to_value};

#[test]
fn test_label_deserialization_full() {
    let json_str = r##"{
        "id": 5,
        "name": "kind/bug",
        "color": "#d9534f",
        "text_color": "#FFFFFF",
        "description": "Bug reported by user",
        "open_issues_count": 1,
        "closed_issues_count": 0,
        "open_merge_requests_count": 1,
        "subscribed": true,
        "priority": 10,
        "is_project_label": true
    }"##;

    let label: Label = from_str(json_str).expect("Failed to deserialize Label");

    assert_eq!(
        label,
        Label {
            id: 5,
            name: "kind/bug".to_string(),
            color: "#d9534f".to_string(),
            text_color: "#FFFFFF".to_string(),
            description: Some("Bug reported by user".to_string()),
            open_issues_count: 1,
            closed_issues_count: 0,
            open_merge_requests_count: 1,
            subscribed: true,
            priority: Some(10),
            is_project_label: true,
        }
    );
}

#[test]
fn test_label_deserialization_null_and_missing_fields() {
    let json_str = r##"{"id":5,"name":"kind/bug","color":"#d9534f","priority":null,"description":null}"##;

    let label: Label = from_str(json_str).expect("Failed to deserialize Label");

    assert_eq!(
        label,
        Label {
            id: 5,
            name: "kind/bug".to_string(),
            color: "#d9534f".to_string(),
            ..Default::default()
        }
    );
    assert_eq!(label.priority, None);
    assert_eq!(label.description, None);
    assert!(!label.subscribed);
}

#[test]
fn test_create_options_only_send_set_fields() {
    let options = CreateLabelOptions {
        name: Some("MyLabel".to_string()),
        color: Some("#11FF22".to_string()),
        ..Default::default()
    };

    let value = to_value(&options).unwrap();

    assert_eq!(value, json!({"name": "MyLabel", "color": "#11FF22"}));
}

#[test]
fn test_update_options_send_explicit_zero_values() {
    let options = UpdateLabelOptions {
        description: Some(String::new()),
        priority: Some(0),
        ..Default::default()
    };

    let value = to_value(&options).unwrap();

    assert_eq!(value, json!({"description": "", "priority": 0}));
}

#[test]
fn test_update_options_empty() {
    let value = to_value(UpdateLabelOptions::default()).unwrap();

    assert_eq!(value, json!({}));
}

#[test]
fn test_list_options_flatten_pagination() {
    let options = ListLabelsOptions {
        list_options: ListOptions::new(1, 10),
        with_counts: Some(false),
        ..Default::default()
    };

    let value = to_value(&options).unwrap();

    assert_eq!(
        value,
        json!({"page": 1, "per_page": 10, "with_counts": false})
    );
}

#[test]
fn test_label_paths() {
    let project = ResourceId::from("group/project");

    assert_eq!(
        labels_path(&project).unwrap(),
        "projects/group%2Fproject/labels"
    );
    assert_eq!(
        label_path(&ResourceId::from(1u64), &ResourceId::from("kind/bug")).unwrap(),
        "projects/1/labels/kind%2Fbug"
    );
    assert_eq!(
        label_path(&ResourceId::from(1u64), &ResourceId::from(5u64)).unwrap(),
        "projects/1/labels/5"
    );
}

#[test]
fn test_label_path_rejects_empty_label() {
    let result = label_path(&ResourceId::from(1u64), &ResourceId::from(""));

    assert!(matches!(result, Err(Error::InvalidId(_))));
}
