use crate::domain::ClientRecord;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_OVERLOAD_FACTOR: f64 = 1.5;
pub const DEFAULT_OVERLOAD_MIN_CLIENTS: usize = 3;
pub const DEFAULT_UNDERLOAD_FACTOR: f64 = 0.5;
pub const DEFAULT_IDEAL_CLIENTS_PER_AGENT: usize = 3;

/// Tuning knobs for agent workload balance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkloadPolicy {
    pub overload_factor: f64,
    pub overload_min_clients: usize,
    pub underload_factor: f64,
    pub ideal_clients_per_agent: usize,
}

impl Default for WorkloadPolicy {
    fn default() -> Self {
        Self {
            overload_factor: DEFAULT_OVERLOAD_FACTOR,
            overload_min_clients: DEFAULT_OVERLOAD_MIN_CLIENTS,
            underload_factor: DEFAULT_UNDERLOAD_FACTOR,
            ideal_clients_per_agent: DEFAULT_IDEAL_CLIENTS_PER_AGENT,
        }
    }
}

impl WorkloadPolicy {
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.overload_factor.is_finite() || self.overload_factor < 1.0 {
            return Err(CoreError::InvalidWorkloadPolicy(format!(
                "overload_factor must be at least 1, got {}",
                self.overload_factor
            )));
        }
        if !self.underload_factor.is_finite()
            || self.underload_factor < 0.0
            || self.underload_factor > 1.0
        {
            return Err(CoreError::InvalidWorkloadPolicy(format!(
                "underload_factor must be between 0 and 1, got {}",
                self.underload_factor
            )));
        }
        if self.ideal_clients_per_agent == 0 {
            return Err(CoreError::InvalidWorkloadPolicy(
                "ideal_clients_per_agent must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    Overloaded,
    Balanced,
    Underloaded,
}

impl LoadStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            LoadStatus::Overloaded => "overloaded",
            LoadStatus::Balanced => "balanced",
            LoadStatus::Underloaded => "underloaded",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentLoad {
    pub agent: String,
    pub clients: usize,
    pub status: LoadStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkloadReport {
    pub agents: Vec<AgentLoad>,
    pub average: f64,
    pub assigned: usize,
    pub unassigned: usize,
    pub capacity_utilization: f64,
}

/// Counts clients per agent and labels each agent against the team average.
///
/// Agents that appear only as an assignee are appended after `agents` in the
/// order they are first seen.
pub fn assess_workload<'a, I>(agents: &[String], clients: I, policy: &WorkloadPolicy) -> WorkloadReport
where
    I: IntoIterator<Item = &'a ClientRecord>,
{
    let mut counts: Vec<(String, usize)> = Vec::new();
    for agent in agents {
        let agent = agent.trim();
        if !agent.is_empty() && !counts.iter().any(|(name, _)| name == agent) {
            counts.push((agent.to_string(), 0));
        }
    }

    let mut unassigned = 0;
    for client in clients {
        let assignee = client
            .assigned_agent
            .as_deref()
            .map(str::trim)
            .filter(|agent| !agent.is_empty());
        let Some(agent) = assignee else {
            unassigned += 1;
            continue;
        };
        match counts.iter_mut().find(|(name, _)| name == agent) {
            Some((_, count)) => *count += 1,
            None => counts.push((agent.to_string(), 1)),
        }
    }

    let assigned: usize = counts.iter().map(|(_, count)| count).sum();
    let average = if counts.is_empty() {
        0.0
    } else {
        assigned as f64 / counts.len() as f64
    };
    let capacity = counts.len() * policy.ideal_clients_per_agent;
    let capacity_utilization = if capacity == 0 {
        0.0
    } else {
        assigned as f64 / capacity as f64 * 100.0
    };

    let agents = counts
        .into_iter()
        .map(|(agent, clients)| AgentLoad {
            status: classify(clients, average, policy),
            agent,
            clients,
        })
        .collect();

    WorkloadReport {
        agents,
        average,
        assigned,
        unassigned,
        capacity_utilization,
    }
}

/// Least-loaded agent; the earliest listed wins ties.
pub fn suggest_assignee(report: &WorkloadReport) -> Option<&AgentLoad> {
    report.agents.iter().min_by_key(|load| load.clients)
}

fn classify(clients: usize, average: f64, policy: &WorkloadPolicy) -> LoadStatus {
    let load = clients as f64;
    if clients >= policy.overload_min_clients && load > average * policy.overload_factor {
        LoadStatus::Overloaded
    } else if load < average * policy.underload_factor {
        LoadStatus::Underloaded
    } else {
        LoadStatus::Balanced
    }
}

#[cfg(test)]
mod tests {
    use super::{assess_workload, suggest_assignee, LoadStatus, WorkloadPolicy};
    use crate::domain::{ClientRecord, Preferences, SourceTag};

    fn client(phone: &str, agent: Option<&str>) -> ClientRecord {
        ClientRecord {
            id: phone.to_string(),
            name: format!("client {phone}"),
            email: "N/A".to_string(),
            phone: phone.to_string(),
            location: "N/A".to_string(),
            preferences: Preferences::default(),
            last_contact: None,
            matched_count: 0,
            priority: None,
            site_visit_at: None,
            assigned_agent: agent.map(str::to_string),
            source: SourceTag::LeadCrm,
        }
    }

    #[test]
    fn labels_agents_against_average() {
        let agents = vec!["asha".to_string(), "ravi".to_string(), "meena".to_string()];
        let mut clients = Vec::new();
        for i in 0..7 {
            clients.push(client(&format!("1{i}"), Some("asha")));
        }
        clients.push(client("20", Some("ravi")));
        clients.push(client("21", None));

        let report = assess_workload(&agents, &clients, &WorkloadPolicy::default());
        let statuses: Vec<(&str, usize, LoadStatus)> = report
            .agents
            .iter()
            .map(|load| (load.agent.as_str(), load.clients, load.status))
            .collect();
        assert_eq!(
            statuses,
            vec![
                ("asha", 7, LoadStatus::Overloaded),
                ("ravi", 1, LoadStatus::Underloaded),
                ("meena", 0, LoadStatus::Underloaded),
            ]
        );
        assert_eq!(report.assigned, 8);
        assert_eq!(report.unassigned, 1);
        assert!((report.capacity_utilization - 8.0 / 9.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn small_teams_are_not_flagged_below_minimum() {
        let agents = vec!["asha".to_string(), "ravi".to_string()];
        let clients = vec![client("1", Some("asha")), client("2", Some("asha"))];
        let report = assess_workload(&agents, &clients, &WorkloadPolicy::default());
        assert_eq!(report.agents[0].status, LoadStatus::Balanced);
    }

    #[test]
    fn unknown_assignees_are_appended() {
        let clients = vec![client("1", Some("guest"))];
        let report = assess_workload(&[], &clients, &WorkloadPolicy::default());
        assert_eq!(report.agents.len(), 1);
        assert_eq!(report.agents[0].agent, "guest");
    }

    #[test]
    fn suggestion_prefers_first_least_loaded() {
        let agents = vec!["asha".to_string(), "ravi".to_string(), "meena".to_string()];
        let clients = vec![client("1", Some("asha"))];
        let report = assess_workload(&agents, &clients, &WorkloadPolicy::default());
        assert_eq!(suggest_assignee(&report).map(|load| load.agent.as_str()), Some("ravi"));
    }

    #[test]
    fn policy_validation() {
        assert!(WorkloadPolicy::default().validate().is_ok());
        let bad = WorkloadPolicy {
            overload_factor: 0.5,
            ..WorkloadPolicy::default()
        };
        assert!(bad.validate().is_err());
        let bad = WorkloadPolicy {
            ideal_clients_per_agent: 0,
            ..WorkloadPolicy::default()
        };
        assert!(bad.validate().is_err());
    }
}
