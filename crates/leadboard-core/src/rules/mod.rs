pub mod workload;

pub use workload::{
    assess_workload, suggest_assignee, AgentLoad, LoadStatus, WorkloadPolicy, WorkloadReport,
};
