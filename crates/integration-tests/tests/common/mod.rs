//! In-memory control plane shared by the integration tests

#![allow(dead_code)]

pub mod stub_server;

use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use fuzzctl_core::domain::{
    container_name, ContainerName, ContainerType, Job, JobConfig, JobId, Os, Task,
    TaskContainers, TaskType,
};
use fuzzctl_core::port::{ContainerStore, JobSource};
use fuzzctl_core::{AppError, Result};
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryControlPlane {
    jobs: HashMap<JobId, Job>,
    tasks: Vec<Task>,
    containers: Mutex<BTreeSet<ContainerName>>,
    failing: Mutex<BTreeSet<ContainerName>>,
    delete_calls: Mutex<Vec<ContainerName>>,
}

impl InMemoryControlPlane {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_job(&mut self, project: &str, name: &str, build: &str) -> JobId {
        let job_id = Uuid::new_v4();
        self.jobs
            .insert(job_id, Job::new(job_id, JobConfig::new(project, name, build)));
        job_id
    }

    /// Add a task and create every container it references
    pub fn add_task(&mut self, job_id: JobId, os: Os, containers: Vec<(ContainerType, String)>) {
        let refs: Vec<TaskContainers> = containers
            .into_iter()
            .map(|(kind, name)| TaskContainers::new(kind, name))
            .collect();

        {
            let mut existing = self.containers.lock().unwrap();
            for c in &refs {
                existing.insert(c.name.clone());
            }
        }

        self.tasks.push(Task::new(
            job_id,
            Uuid::new_v4(),
            os,
            TaskType::LibfuzzerFuzz,
            refs,
        ));
    }

    /// Name this job would give a container of `kind`
    pub fn owned_name(&self, job_id: JobId, kind: ContainerType, os: Os) -> ContainerName {
        let config = &self.jobs[&job_id].config;
        container_name(kind, &config.project, &config.name, &config.build, os)
    }

    pub fn fail_on(&self, name: &str) {
        self.failing.lock().unwrap().insert(name.to_string());
    }

    pub fn exists(&self, name: &str) -> bool {
        self.containers.lock().unwrap().contains(name)
    }

    pub fn delete_calls(&self) -> Vec<ContainerName> {
        self.delete_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl JobSource for InMemoryControlPlane {
    async fn get_job(&self, job_id: JobId) -> Result<Job> {
        self.jobs
            .get(&job_id)
            .cloned()
            .ok_or_else(|| AppError::RemoteFailure(format!("HTTP error (404): job {}", job_id)))
    }

    async fn list_job_tasks(&self, job_id: JobId) -> Result<Vec<Task>> {
        Ok(self
            .tasks
            .iter()
            .filter(|t| t.job_id == job_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ContainerStore for InMemoryControlPlane {
    async fn delete_container(&self, name: &str) -> Result<bool> {
        self.delete_calls.lock().unwrap().push(name.to_string());

        if self.failing.lock().unwrap().contains(name) {
            return Err(AppError::RemoteFailure(format!(
                "HTTP error (500): cannot delete {}",
                name
            )));
        }

        Ok(self.containers.lock().unwrap().remove(name))
    }
}
