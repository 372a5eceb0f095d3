//! SDK against a local HTTP control plane
//!
//! Checks that identifier-taking operations enumerate through their own
//! group's listing once, then send the typed request with the full value.

mod common;

use common::stub_server::{Recorded, StubServer};
use fuzzctl_core::domain::TaskContainers;
use fuzzctl_core::AppError;
use fuzzctl_sdk::types::{InstanceConfig, WebhookUpdate};
use fuzzctl_sdk::{
    container_name, ContainerType, DeleteOutcome, Job, JobConfig, Os, SdkError, Task, TaskType,
    CLIENT_VERSION,
};
use serde_json::{json, Value};
use tokio_test::{assert_err, assert_ok};
use uuid::Uuid;

const JOB_A: &str = "8326c2a2-53e7-4f3f-9a0a-5b1b6a0c1f01";
const JOB_B: &str = "83a1d4c0-0b8e-4e57-8a52-1f4d2f2b9e22";
const NOTIFICATION: &str = "83267e88-efdd-4b1d-92c0-6b80d01887f8";
const WEBHOOK: &str = "eb8ee6b8-6f2d-43b1-aec2-022e9813e86b";

fn uuid(s: &str) -> Uuid {
    Uuid::parse_str(s).unwrap()
}

fn job_json(job_id: &str) -> Value {
    serde_json::to_value(Job::new(uuid(job_id), JobConfig::new("proj", "target", "b1"))).unwrap()
}

fn pool_json(name: &str) -> Value {
    json!({
        "pool_id": Uuid::new_v4(),
        "name": name,
        "os": "linux",
        "arch": "x86_64",
        "managed": true,
        "state": "running"
    })
}

fn notification_json() -> Value {
    json!({"notification_id": NOTIFICATION, "container": "crashes", "config": {"url": "u"}})
}

fn webhook_json() -> Value {
    json!({"webhook_id": WEBHOOK, "name": "alerts", "event_types": ["job_created"]})
}

/// Jobs listing for searches, the single job for lookups by ID
fn jobs_handler(request: &Recorded) -> Option<Value> {
    if !request.is("GET", "jobs") {
        return None;
    }
    Some(match request.body.get("job_id").and_then(Value::as_str) {
        Some(job_id) => job_json(job_id),
        None => json!([job_json(JOB_A), job_json(JOB_B)]),
    })
}

fn is_listing(request: &Recorded, method: &str, path: &str, id_field: &str) -> bool {
    request.is(method, path) && request.body.get(id_field).is_none()
}

#[tokio::test]
async fn test_job_prefix_lists_once_then_gets_full_id() {
    let server = StubServer::start(|r| (200, jobs_handler(r).unwrap_or(Value::Null))).await;

    let job = assert_ok!(server.client().jobs().get("8326", false).await);

    assert_eq!(job.job_id, uuid(JOB_A));
    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].is("GET", "jobs"));
    assert_eq!(requests[0].body, json!({"state": ["init", "enabled"]}));
    assert!(requests[1].is("GET", "jobs"));
    assert_eq!(requests[1].body, json!({"job_id": JOB_A, "with_tasks": false}));
}

#[tokio::test]
async fn test_full_job_id_sends_single_request() {
    let server = StubServer::start(|r| (200, jobs_handler(r).unwrap_or(Value::Null))).await;

    assert_ok!(server.client().jobs().get(JOB_B, true).await);

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].body, json!({"job_id": JOB_B, "with_tasks": true}));
}

#[tokio::test]
async fn test_ambiguous_job_prefix_sends_no_lookup() {
    let server = StubServer::start(|r| (200, jobs_handler(r).unwrap_or(Value::Null))).await;

    let err = assert_err!(server.client().jobs().get("83", false).await);

    assert!(matches!(AppError::from(err), AppError::Ambiguous { .. }));
    assert_eq!(server.requests().len(), 1);
}

#[tokio::test]
async fn test_service_error_body_is_reported() {
    let server = StubServer::start(|_| {
        (400, json!({"code": 460, "errors": ["unable to find job"]}))
    })
    .await;

    let err = assert_err!(server.client().jobs().get(JOB_A, false).await);

    match err {
        SdkError::Http { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "code 460: unable to find job");
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[tokio::test]
async fn test_pool_shutdown_resolves_name_prefix() {
    let server = StubServer::start(|r| {
        if r.is("GET", "pool") {
            (200, json!([pool_json("linux-pool"), pool_json("windows-pool")]))
        } else {
            (200, json!({"result": true}))
        }
    })
    .await;

    let stopped = assert_ok!(server.client().pools().shutdown("lin", true).await);

    assert!(stopped);
    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    assert!(is_listing(&requests[0], "GET", "pool", "name"));
    assert!(requests[1].is("DELETE", "pool"));
    assert_eq!(requests[1].body, json!({"name": "linux-pool", "now": true}));
}

#[tokio::test]
async fn test_pool_update_sends_object_id() {
    let object_id = Uuid::new_v4();
    let server = StubServer::start(|r| {
        if r.is("GET", "pool") {
            (200, json!([pool_json("linux-pool")]))
        } else {
            (200, pool_json("linux-pool"))
        }
    })
    .await;

    let pool = assert_ok!(server.client().pools().update("linux", Some(object_id)).await);

    assert_eq!(pool.name, "linux-pool");
    let requests = server.requests();
    assert!(requests[1].is("PATCH", "pool"));
    assert_eq!(
        requests[1].body,
        json!({"name": "linux-pool", "object_id": object_id})
    );
}

#[tokio::test]
async fn test_delete_containers_removes_owned_containers_over_http() {
    let job_id = uuid(JOB_A);
    let setup = container_name(ContainerType::Setup, "proj", "target", "b1", Os::Linux);
    let task = Task::new(
        job_id,
        Uuid::new_v4(),
        Os::Linux,
        TaskType::LibfuzzerFuzz,
        vec![
            TaskContainers::new(ContainerType::Setup, setup.clone()),
            TaskContainers::new(ContainerType::Inputs, "shared-corpus"),
        ],
    );
    let task_json = serde_json::to_value(&task).unwrap();

    let server = StubServer::start(move |r| {
        if let Some(body) = jobs_handler(r) {
            (200, body)
        } else if r.is("GET", "tasks") {
            (200, json!([task_json.clone()]))
        } else {
            (200, json!({"result": true}))
        }
    })
    .await;

    let report = assert_ok!(
        server
            .client()
            .jobs()
            .delete_containers("8326", true, false)
            .await
    );

    assert_eq!(report.outcome(&setup), Some(DeleteOutcome::Removed));
    assert_eq!(report.kept, vec!["shared-corpus".to_string()]);

    let requests = server.requests();
    let listings = requests
        .iter()
        .filter(|r| is_listing(r, "GET", "jobs", "job_id"))
        .count();
    assert_eq!(listings, 1);

    let tasks_search = requests.iter().find(|r| r.is("GET", "tasks")).unwrap();
    assert_eq!(tasks_search.body, json!({"job_id": JOB_A, "state": []}));

    let deletes: Vec<&Value> = requests
        .iter()
        .filter(|r| r.is("DELETE", "containers"))
        .map(|r| &r.body)
        .collect();
    assert_eq!(deletes, vec![&json!({"name": setup})]);
}

#[tokio::test]
async fn test_notification_get_decodes_list() {
    let server = StubServer::start(|_| (200, json!([notification_json()]))).await;

    let found = assert_ok!(server.client().notifications().get("8326").await);

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].notification_id, uuid(NOTIFICATION));
    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    assert!(is_listing(&requests[0], "GET", "notifications", "notification_id"));
    assert_eq!(requests[1].body, json!({"notification_id": NOTIFICATION}));
}

#[tokio::test]
async fn test_webhook_update_sends_only_changed_fields() {
    let server = StubServer::start(|r| {
        if r.is("GET", "webhooks") {
            (200, json!([webhook_json()]))
        } else {
            (200, webhook_json())
        }
    })
    .await;
    let changes = WebhookUpdate {
        name: Some("paging".to_string()),
        ..Default::default()
    };

    assert_ok!(server.client().webhooks().update("eb8", &changes).await);

    let requests = server.requests();
    assert!(requests[1].is("PATCH", "webhooks"));
    assert_eq!(requests[1].body, json!({"webhook_id": WEBHOOK, "name": "paging"}));
}

#[tokio::test]
async fn test_event_get_needs_full_id() {
    let event_id = Uuid::new_v4();
    let server = StubServer::start(move |_| {
        (
            200,
            json!({"event": {"event_id": event_id, "event_type": "ping", "event": {"ping_id": event_id}}}),
        )
    })
    .await;
    let client = server.client();

    let response = assert_ok!(client.events().get(event_id).await);
    assert_eq!(response.event.event_type, "ping");

    let err = assert_err!(client.events().get("ab12").await);
    assert!(matches!(AppError::from(err), AppError::NotFound { .. }));

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].body, json!({"event_id": event_id}));
}

#[tokio::test]
async fn test_instance_config_update_wraps_config() {
    let server = StubServer::start(|r| {
        let stored = r.body.get("config").cloned().unwrap_or(json!({}));
        (200, stored)
    })
    .await;
    let config = InstanceConfig {
        require_admin_privileges: true,
        ..Default::default()
    };

    let stored = assert_ok!(server.client().instance_config().update(&config).await);

    assert!(stored.require_admin_privileges);
    let requests = server.requests();
    assert!(requests[0].is("POST", "instance_config"));
    assert_eq!(
        requests[0].body,
        json!({"config": {"allowed_aad_tenants": [], "require_admin_privileges": true}})
    );
}

fn info_with_version(version: &str) -> Value {
    json!({
        "resource_group": "rg",
        "region": "westus2",
        "subscription": "sub",
        "versions": {"onefuzz": {"git": "abc", "build": "1", "version": version}}
    })
}

#[tokio::test]
async fn test_version_check_against_service_info() {
    let same = StubServer::start(|_| (200, info_with_version(CLIENT_VERSION))).await;
    assert_ok!(same.client().versions().check(true).await);
    assert!(same.requests()[0].is("GET", "info"));

    let newer_major = StubServer::start(|_| (200, info_with_version("99.0.0"))).await;
    let err = assert_err!(newer_major.client().versions().check(false).await);
    assert!(matches!(AppError::from(err), AppError::Validation(_)));
}
