//! SDK Request/Response Types
//!
//! Job and task models live in `fuzzctl-core`; everything else the control
//! plane exchanges is defined here.

use std::collections::HashMap;

use fuzzctl_core::domain::{ContainerName, JobState, Os, PoolName, TaskState};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Shared responses

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoolResult {
    pub result: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VersionInfo {
    #[serde(default)]
    pub git: String,
    #[serde(default)]
    pub build: String,
    #[serde(default)]
    pub version: String,
}

/// Service information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Info {
    pub resource_group: String,
    pub region: String,
    pub subscription: String,
    #[serde(default)]
    pub versions: HashMap<String, VersionInfo>,
}

// ---------------------------------------------------------------------------
// Jobs & tasks

#[derive(Debug, Clone, Serialize)]
pub struct JobGet {
    pub job_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_tasks: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct JobSearch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<Vec<JobState>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskGet {
    pub task_id: Uuid,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskSearch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<Vec<TaskState>>,
}

// ---------------------------------------------------------------------------
// Containers

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerInfoBase {
    pub name: ContainerName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerInfo {
    pub name: ContainerName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,
    pub sas_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContainerGet {
    pub name: ContainerName,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContainerCreate {
    pub name: ContainerName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContainerDelete {
    pub name: ContainerName,
}

// ---------------------------------------------------------------------------
// Pools & nodes

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Architecture {
    #[serde(rename = "x86_64")]
    X86_64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolState {
    Init,
    Running,
    Shutdown,
    Halt,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pool {
    pub pool_id: Uuid,
    pub name: PoolName,
    pub os: Os,
    pub arch: Architecture,
    pub managed: bool,
    pub state: PoolState,
    /// Agent configuration; absent unless the service chose to include it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PoolCreate {
    pub name: PoolName,
    pub os: Os,
    pub arch: Architecture,
    pub managed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PoolSearch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<PoolName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<Vec<PoolState>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PoolUpdate {
    pub name: PoolName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PoolStop {
    pub name: PoolName,
    pub now: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeState {
    Init,
    Free,
    SettingUp,
    Rebooting,
    Ready,
    Busy,
    Done,
    Shutdown,
    Halt,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub machine_id: Uuid,
    pub pool_name: PoolName,
    pub state: NodeState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaleset_id: Option<String>,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub debug_keep_node: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeGet {
    pub machine_id: Uuid,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NodeSearch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<Vec<NodeState>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scaleset_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_name: Option<PoolName>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeUpdate {
    pub machine_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_keep_node: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeAddSshKey {
    pub machine_id: Uuid,
    pub public_key: String,
}

// ---------------------------------------------------------------------------
// Scalesets

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalesetState {
    Init,
    Setup,
    Resize,
    Running,
    Shutdown,
    Halt,
    CreationFailed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalesetNodeState {
    pub machine_id: Uuid,
    pub instance_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<NodeState>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scaleset {
    pub scaleset_id: String,
    pub pool_name: PoolName,
    pub state: ScalesetState,
    pub vm_sku: String,
    pub image: String,
    pub region: String,
    pub size: u64,
    #[serde(default)]
    pub spot_instances: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes: Option<Vec<ScalesetNodeState>>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AutoScaleOptions {
    pub min: u64,
    pub max: u64,
    pub default: u64,
    pub scale_out_amount: u64,
    pub scale_out_cooldown: u64,
    pub scale_in_amount: u64,
    pub scale_in_cooldown: u64,
}

impl AutoScaleOptions {
    /// Defaults for a scaleset of at most `max` nodes
    pub fn for_max(max: u64) -> Self {
        Self {
            min: 0,
            max,
            default: max,
            scale_out_amount: 1,
            scale_out_cooldown: 10,
            scale_in_amount: 1,
            scale_in_cooldown: 15,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScalesetCreate {
    pub pool_name: PoolName,
    pub vm_sku: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub size: u64,
    pub spot_instances: bool,
    pub ephemeral_os_disks: bool,
    pub tags: HashMap<String, String>,
    pub auto_scale: AutoScaleOptions,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ScalesetSearch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scaleset_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<Vec<ScalesetState>>,
    pub include_auth: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScalesetStop {
    pub scaleset_id: String,
    pub now: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScalesetUpdate {
    pub scaleset_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

// ---------------------------------------------------------------------------
// Webhooks

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookMessageFormat {
    Onefuzz,
    EventGrid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Webhook {
    pub webhook_id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub event_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_format: Option<WebhookMessageFormat>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WebhookCreate {
    pub name: String,
    pub url: String,
    pub event_types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_format: Option<WebhookMessageFormat>,
}

/// Fields to change on a webhook; unset fields keep their current value
#[derive(Debug, Clone, Default, Serialize)]
pub struct WebhookUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_format: Option<WebhookMessageFormat>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct WebhookPatch<'a> {
    pub webhook_id: Uuid,
    #[serde(flatten)]
    pub changes: &'a WebhookUpdate,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct WebhookSearch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WebhookGet {
    pub webhook_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventPing {
    pub ping_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookMessageLog {
    pub event_id: Uuid,
    pub event_type: String,
    pub webhook_id: Uuid,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub try_count: u64,
}

// ---------------------------------------------------------------------------
// Events

#[derive(Debug, Clone, Serialize)]
pub struct EventGet {
    pub event_id: Uuid,
}

/// One event as delivered to webhooks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    pub event_id: Uuid,
    pub event_type: String,
    pub event: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventGetResponse {
    pub event: EventMessage,
}

// ---------------------------------------------------------------------------
// Instance configuration

/// Instance-wide settings.
///
/// Only the access-control fields are typed; everything else is kept in
/// `extra` so a get/modify/update cycle does not drop settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstanceConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admins: Option<Vec<Uuid>>,
    #[serde(default)]
    pub allowed_aad_tenants: Vec<Uuid>,
    #[serde(default)]
    pub require_admin_privileges: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InstanceConfigUpdate<'a> {
    pub config: &'a InstanceConfig,
}

// ---------------------------------------------------------------------------
// Notifications

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub notification_id: Uuid,
    pub container: ContainerName,
    /// Integration template (Teams, ADO, GitHub issues); passed through untouched
    pub config: serde_json::Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct NotificationCreate {
    pub container: ContainerName,
    pub config: serde_json::Value,
    pub replace_existing: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NotificationSearch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<Vec<ContainerName>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NotificationGet {
    pub notification_id: Uuid,
}
