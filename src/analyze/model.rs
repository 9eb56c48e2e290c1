use crate::model::{Iteration, MemberCapacity, WorkItem};
use std::collections::BTreeMap;

/// Hours keyed by activity name, compared by exact string.
pub type ActivityHours = BTreeMap<String, f64>;
/// Hours keyed by member display name, then activity name.
pub type MemberActivityHours = BTreeMap<String, ActivityHours>;

/// Raw data fetched for one sprint. A sprint whose collection failed keeps
/// its label with no iteration and no records.
#[derive(Debug, Clone, PartialEq)]
pub struct SprintSnapshot {
    pub label: String,
    pub iteration: Option<Iteration>,
    pub members: Vec<MemberCapacity>,
    pub work_items: Vec<WorkItem>,
}

impl SprintSnapshot {
    pub fn empty(label: impl ToString) -> Self {
        Self {
            label: label.to_string(),
            iteration: None,
            members: vec![],
            work_items: vec![],
        }
    }
}

#[derive(Debug, Clone)]
pub struct DataAnalysis {
    pub working_days: f64,
    pub snapshots: Vec<SprintSnapshot>,
}

impl DataAnalysis {
    pub fn new(working_days: u32) -> Self {
        Self {
            working_days: f64::from(working_days),
            snapshots: vec![],
        }
    }

    pub fn insert_snapshot(&mut self, snapshot: SprintSnapshot) {
        self.snapshots.push(snapshot);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub sprint: String,
    pub activity: String,
    pub planned: f64,
    pub capacity: f64,
    pub resource_need: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub planned: f64,
    pub capacity: f64,
    pub resource_need: f64,
}

impl Totals {
    pub fn utilization(&self) -> f64 {
        utilization(self.planned, self.capacity)
    }
}

/// Planned over capacity in percent, zero without capacity.
pub fn utilization(planned: f64, capacity: f64) -> f64 {
    if capacity > 0.0 {
        planned / capacity * 100.0
    } else {
        0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SprintNeeds {
    pub sprint: String,
    pub total: f64,
    pub activities: Vec<ActivityNeed>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityNeed {
    pub activity: String,
    pub need: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityNeeds {
    pub activity: String,
    pub total: f64,
    pub sprints: Vec<SprintNeed>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SprintNeed {
    pub sprint: String,
    pub need: f64,
}

/// Header data of a sprint section.
#[derive(Debug, Clone, PartialEq)]
pub struct SprintHeader {
    pub label: String,
    pub iteration: Option<Iteration>,
}

impl From<&SprintSnapshot> for SprintHeader {
    fn from(snapshot: &SprintSnapshot) -> Self {
        Self {
            label: snapshot.label.clone(),
            iteration: snapshot.iteration.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CapacityReport {
    pub sprints: Vec<SprintHeader>,
    pub rows: Vec<ReportRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberRow {
    pub activity: String,
    pub capacity: f64,
    pub planned: f64,
    pub utilization: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberSummary {
    pub member: String,
    pub rows: Vec<MemberRow>,
    pub total_capacity: f64,
    pub total_planned: f64,
    pub total_utilization: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SprintMemberReport {
    pub sprint: SprintHeader,
    pub members: Vec<MemberSummary>,
}

pub type MemberCapacityReport = Vec<SprintMemberReport>;
