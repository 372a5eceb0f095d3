// Cleanup planning: decide which of a job's containers may be deleted

use std::collections::BTreeSet;

use crate::domain::{container_name, ContainerName, ContainerType, Job, Task};

/// Roles whose containers may ever be deleted during job teardown.
/// Everything else (tools, logs, extra_*) is shared infrastructure.
pub const SAFE_TO_REMOVE: [ContainerType; 12] = [
    ContainerType::Crashes,
    ContainerType::Crashdumps,
    ContainerType::Setup,
    ContainerType::Inputs,
    ContainerType::Reports,
    ContainerType::UniqueInputs,
    ContainerType::UniqueReports,
    ContainerType::NoRepro,
    ContainerType::Analysis,
    ContainerType::Coverage,
    ContainerType::ReadonlyInputs,
    ContainerType::RegressionReports,
];

pub fn is_safe_to_remove(role: ContainerType) -> bool {
    SAFE_TO_REMOVE.contains(&role)
}

/// Keep/delete partition of the containers referenced by one job
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupPlan {
    pub keep: BTreeSet<ContainerName>,
    pub delete: BTreeSet<ContainerName>,
}

impl CleanupPlan {
    pub fn is_empty(&self) -> bool {
        self.keep.is_empty() && self.delete.is_empty()
    }
}

/// Partition every container referenced by `tasks` into keep and delete.
///
/// With `only_job_specific`, an allowlisted container is deleted only when
/// recomputing its name from this job's metadata and the task's platform
/// reproduces the recorded name exactly.
pub fn plan_cleanup(job: &Job, tasks: &[Task], only_job_specific: bool) -> CleanupPlan {
    let mut referenced = BTreeSet::new();
    let mut delete = BTreeSet::new();

    for task in tasks {
        for container in task.config.container_refs() {
            referenced.insert(container.name.clone());

            if !is_safe_to_remove(container.container_type) {
                continue;
            }

            let owned = !only_job_specific
                || container_name(
                    container.container_type,
                    &job.config.project,
                    &job.config.name,
                    &job.config.build,
                    task.os,
                ) == container.name;

            if owned {
                delete.insert(container.name.clone());
            }
        }
    }

    let keep = referenced.difference(&delete).cloned().collect();

    CleanupPlan { keep, delete }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{JobConfig, Os, TaskContainers, TaskType};
    use uuid::Uuid;

    fn job() -> Job {
        Job::new(Uuid::new_v4(), JobConfig::new("proj", "target", "b1"))
    }

    fn task(job: &Job, os: Os, containers: Vec<TaskContainers>) -> Task {
        Task::new(
            job.job_id,
            Uuid::new_v4(),
            os,
            TaskType::LibfuzzerFuzz,
            containers,
        )
    }

    fn owned(role: ContainerType, os: Os) -> TaskContainers {
        TaskContainers::new(role, container_name(role, "proj", "target", "b1", os))
    }

    #[test]
    fn test_non_allowlisted_role_never_deleted() {
        let job = job();
        let tasks = vec![
            task(&job, Os::Linux, vec![TaskContainers::new(ContainerType::Setup, "oft-setup-aaa")]),
            task(&job, Os::Linux, vec![TaskContainers::new(ContainerType::Tools, "oft-other-bbb")]),
        ];

        for only_job_specific in [true, false] {
            let plan = plan_cleanup(&job, &tasks, only_job_specific);
            assert!(!plan.delete.contains("oft-other-bbb"));
            assert!(plan.keep.contains("oft-other-bbb"));
        }
    }

    #[test]
    fn test_tools_container_with_matching_name_is_kept() {
        let job = job();
        let tools = owned(ContainerType::Tools, Os::Linux);
        let tasks = vec![task(&job, Os::Linux, vec![tools.clone()])];

        let plan = plan_cleanup(&job, &tasks, true);

        assert!(plan.delete.is_empty());
        assert!(plan.keep.contains(&tools.name));
    }

    #[test]
    fn test_job_specific_deletes_only_owned_names() {
        let job = job();
        let setup = owned(ContainerType::Setup, Os::Linux);
        let inputs = owned(ContainerType::Inputs, Os::Linux);
        let shared = TaskContainers::new(ContainerType::Crashes, "shared-crashes");
        let tasks = vec![task(&job, Os::Linux, vec![setup.clone(), inputs.clone(), shared])];

        let plan = plan_cleanup(&job, &tasks, true);

        assert_eq!(
            plan.delete,
            BTreeSet::from([setup.name.clone(), inputs.name.clone()])
        );
        assert_eq!(plan.keep, BTreeSet::from(["shared-crashes".to_string()]));
    }

    #[test]
    fn test_ownership_uses_task_platform() {
        let job = job();
        // windows setup container referenced by a linux task is not this task's own
        let setup = owned(ContainerType::Setup, Os::Windows);
        let tasks = vec![task(&job, Os::Linux, vec![setup.clone()])];

        let plan = plan_cleanup(&job, &tasks, true);

        assert!(plan.delete.is_empty());
        assert!(plan.keep.contains(&setup.name));
    }

    #[test]
    fn test_not_job_specific_deletes_every_allowlisted() {
        let job = job();
        let tasks = vec![task(
            &job,
            Os::Linux,
            vec![
                TaskContainers::new(ContainerType::Crashes, "shared-crashes"),
                TaskContainers::new(ContainerType::Setup, "someone-elses-setup"),
                TaskContainers::new(ContainerType::Logs, "team-logs"),
            ],
        )];

        let plan = plan_cleanup(&job, &tasks, false);

        assert_eq!(
            plan.delete,
            BTreeSet::from(["shared-crashes".to_string(), "someone-elses-setup".to_string()])
        );
        assert_eq!(plan.keep, BTreeSet::from(["team-logs".to_string()]));
    }

    #[test]
    fn test_shared_reference_across_tasks_counted_once() {
        let job = job();
        let inputs = owned(ContainerType::Inputs, Os::Linux);
        let tasks = vec![
            task(&job, Os::Linux, vec![inputs.clone()]),
            task(&job, Os::Windows, vec![inputs.clone()]),
        ];

        let plan = plan_cleanup(&job, &tasks, true);

        assert_eq!(plan.delete.len(), 1);
        assert!(plan.keep.is_empty());
    }

    #[test]
    fn test_no_tasks_is_empty_plan() {
        let plan = plan_cleanup(&job(), &[], true);
        assert!(plan.is_empty());
    }
}
