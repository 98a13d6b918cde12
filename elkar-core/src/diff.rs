//! Field-level diff between a desired resource and its stored counterpart
//!
//! Both sides are projected to JSON objects through serde and compared field by
//! field according to the resource's `FieldSpec` table. The result is empty
//! exactly when the stored resource already satisfies the desired one.

use std::collections::BTreeSet;

use serde::Serialize;
use serde::ser::Error as _;
use serde_json::{Map, Value};

use crate::dto::remote::Remote;
use crate::field::{FieldKind, FieldSpec, Resource};

/// Names of the fields that differ, in `FieldSpec` table order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    fields: Vec<&'static str>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|f| *f == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().copied()
    }
}

impl std::fmt::Display for ChangeSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.fields.join(", "))
    }
}

/// Compare two JSON objects field by field
///
/// Fields missing from either side are compared as `null`.
pub fn diff_objects(
    desired: &Map<String, Value>,
    remote: &Map<String, Value>,
    specs: &[FieldSpec],
) -> ChangeSet {
    let fields = specs
        .iter()
        .filter(|spec| !field_eq(spec.kind, desired.get(spec.name), remote.get(spec.name)))
        .map(|spec| spec.name)
        .collect();

    ChangeSet { fields }
}

/// Compute the fields of `remote` that must change to satisfy `desired`
pub fn diff<R: Resource>(desired: &R, remote: &R) -> Result<ChangeSet, serde_json::Error> {
    let desired = project(desired)?;
    let remote = project(remote)?;
    Ok(diff_objects(&desired, &remote, R::FIELDS))
}

/// Copy the changed fields of `desired` into a copy of `remote`
///
/// The id, every unchanged field and every field outside the schema keep
/// their stored values.
pub fn merge<R: Resource>(
    remote: &Remote<R>,
    desired: &R,
    changes: &ChangeSet,
) -> Result<Remote<R>, serde_json::Error> {
    let source = project(desired)?;
    let mut target = project(&remote.resource)?;

    for field in changes.iter() {
        let value = source.get(field).cloned().unwrap_or(Value::Null);
        target.insert(field.to_string(), value);
    }

    Ok(Remote {
        id: remote.id,
        resource: serde_json::from_value(Value::Object(target))?,
        extra: remote.extra.clone(),
    })
}

fn project<T: Serialize>(value: &T) -> Result<Map<String, Value>, serde_json::Error> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(serde_json::Error::custom(format!(
            "resource must serialize to an object, got {other}"
        ))),
    }
}

fn field_eq(kind: FieldKind, desired: Option<&Value>, remote: Option<&Value>) -> bool {
    let desired = desired.unwrap_or(&Value::Null);
    let remote = remote.unwrap_or(&Value::Null);

    match kind {
        FieldKind::Scalar => desired == remote,
        FieldKind::ScalarSet => as_set(desired) == as_set(remote),
        FieldKind::NullableScalar => unset_to_none(desired) == unset_to_none(remote),
    }
}

fn as_set(value: &Value) -> BTreeSet<String> {
    match value {
        Value::Null => BTreeSet::new(),
        Value::Array(items) => items.iter().map(Value::to_string).collect(),
        single => BTreeSet::from([single.to_string()]),
    }
}

fn unset_to_none(value: &Value) -> Option<&Value> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        other => Some(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::client::Client;
    use crate::domain::job::{Job, NotificationTarget};
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    const SCRIPTS: &[FieldSpec] = &[FieldSpec::set("preScripts")];
    const EXCLUDE: &[FieldSpec] = &[FieldSpec::nullable("exclude")];

    #[test]
    fn test_set_order_is_irrelevant() {
        let changes = diff_objects(
            &object(json!({"preScripts": [1, 2]})),
            &object(json!({"preScripts": [2, 1]})),
            SCRIPTS,
        );
        assert!(changes.is_empty());
    }

    #[test]
    fn test_set_duplicates_are_irrelevant() {
        let changes = diff_objects(
            &object(json!({"preScripts": [1, 2, 2]})),
            &object(json!({"preScripts": [1, 2]})),
            SCRIPTS,
        );
        assert!(changes.is_empty());
    }

    #[test]
    fn test_set_superset_is_a_change() {
        let changes = diff_objects(
            &object(json!({"preScripts": [1, 2, 3]})),
            &object(json!({"preScripts": [1, 2]})),
            SCRIPTS,
        );
        assert!(changes.contains("preScripts"));
    }

    #[test]
    fn test_missing_set_is_empty() {
        let changes = diff_objects(
            &object(json!({"preScripts": []})),
            &object(json!({"preScripts": null})),
            SCRIPTS,
        );
        assert!(changes.is_empty());

        let changes = diff_objects(&object(json!({"preScripts": []})), &Map::new(), SCRIPTS);
        assert!(changes.is_empty());
    }

    #[test]
    fn test_nullable_sentinels_are_equivalent() {
        for remote in [json!({"exclude": null}), json!({"exclude": ""}), json!({})] {
            let changes = diff_objects(&object(json!({"exclude": null})), &object(remote), EXCLUDE);
            assert!(changes.is_empty());
        }
    }

    #[test]
    fn test_nullable_value_is_a_change() {
        let changes = diff_objects(
            &object(json!({"exclude": "*.tmp"})),
            &object(json!({"exclude": null})),
            EXCLUDE,
        );
        assert_eq!(changes.iter().collect::<Vec<_>>(), vec!["exclude"]);
    }

    #[test]
    fn test_scalar_null_differs_from_empty_string() {
        let specs = &[FieldSpec::scalar("description")];
        let changes = diff_objects(
            &object(json!({"description": ""})),
            &object(json!({"description": null})),
            specs,
        );
        assert!(changes.contains("description"));
    }

    #[test]
    fn test_identical_client_has_no_changes() {
        let mut client = Client::new("Name1");
        client.quota = 20000;
        client.pre_scripts = vec![1, 2];

        let mut stored = client.clone();
        stored.pre_scripts = vec![2, 1];

        assert!(diff(&client, &stored).unwrap().is_empty());
    }

    #[test]
    fn test_changes_follow_table_order() {
        let desired = Client {
            url: "name1.example.com".to_string(),
            quota: 10,
            ..Client::new("Name1")
        };
        let stored = Client::new("Name1");

        let changes = diff(&desired, &stored).unwrap();
        assert_eq!(changes.iter().collect::<Vec<_>>(), vec!["quota", "url"]);
        assert_eq!(changes.to_string(), "quota, url");
    }

    #[test]
    fn test_job_notification_targets_as_set() {
        let mut desired = Job::new("job1", "/home");
        desired.notifications_to = vec![NotificationTarget::Admin, NotificationTarget::Owner];
        let mut stored = desired.clone();
        stored.notifications_to = vec![NotificationTarget::Owner, NotificationTarget::Admin];

        assert!(diff(&desired, &stored).unwrap().is_empty());
    }

    #[test]
    fn test_job_empty_exclude_matches_none() {
        let desired = Job::new("job1", "/home");
        let mut stored = desired.clone();
        stored.exclude = Some(String::new());

        assert!(diff(&desired, &stored).unwrap().is_empty());
    }

    #[test]
    fn test_merge_touches_only_changed_fields() {
        let mut stored = Remote::new(
            5,
            Client {
                description: "old".to_string(),
                pre_scripts: vec![2, 1],
                ..Client::new("Name1")
            },
        );
        stored.extra.insert("owner".to_string(), json!(3));

        let desired = Client {
            description: "old".to_string(),
            pre_scripts: vec![1, 2],
            quota: 500,
            ..Client::new("Name1")
        };

        let changes = diff(&desired, &stored.resource).unwrap();
        let merged = merge(&stored, &desired, &changes).unwrap();

        assert_eq!(merged.id, 5);
        assert_eq!(merged.resource.quota, 500);
        // unchanged set keeps the stored ordering
        assert_eq!(merged.resource.pre_scripts, vec![2, 1]);
        assert_eq!(merged.extra.get("owner"), Some(&json!(3)));
        assert!(diff(&desired, &merged.resource).unwrap().is_empty());
    }
}
