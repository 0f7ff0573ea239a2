//! DynamicObject → TaskRun conversion

use chrono::{DateTime, Utc};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::core::DynamicObject;
use serde_json::Value;
use std::collections::BTreeMap;
use tr_core::{ParentKind, TaskRun};

/// Build a TaskRun from a listed object.
///
/// Unparseable start times are treated as missing, which sorts the run
/// as pending (most recent).
pub(crate) fn task_run(obj: &DynamicObject) -> TaskRun {
    let task_ref = obj.data.pointer("/spec/taskRef");

    let parent_kind = task_ref.map(|r| {
        ParentKind::from_ref_kind(r.get("kind").and_then(Value::as_str).unwrap_or_default())
    });
    let parent_name = task_ref
        .and_then(|r| r.get("name"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let start_time = obj
        .data
        .pointer("/status/startTime")
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc));

    TaskRun {
        name: obj.metadata.name.clone().unwrap_or_default(),
        parent_kind,
        parent_name,
        start_time,
        labels: labels(&obj.metadata),
    }
}

fn labels(meta: &ObjectMeta) -> BTreeMap<String, String> {
    meta.labels.clone().unwrap_or_default()
}
