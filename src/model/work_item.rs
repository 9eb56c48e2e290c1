use serde::Deserialize;
use serde_json::Value;

/// Fields requested from the work-item batch endpoint.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum WorkItemField {
    AssignedTo,
    Activity,
    OriginalEstimate,
}

impl WorkItemField {
    pub const ACTIVITY_ESTIMATE: &'static [WorkItemField] =
        &[WorkItemField::Activity, WorkItemField::OriginalEstimate];

    pub const ASSIGNEE_ACTIVITY_ESTIMATE: &'static [WorkItemField] = &[
        WorkItemField::AssignedTo,
        WorkItemField::Activity,
        WorkItemField::OriginalEstimate,
    ];

    pub fn reference_name(&self) -> &'static str {
        match self {
            WorkItemField::AssignedTo => "System.AssignedTo",
            WorkItemField::Activity => "Microsoft.VSTS.Common.Activity",
            WorkItemField::OriginalEstimate => "Microsoft.VSTS.Scheduling.OriginalEstimate",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkItem {
    pub id: u64,
    pub activity: Option<String>,
    pub assignee: Option<String>,
    pub original_estimate: f64,
}

impl WorkItem {
    pub fn new(
        id: u64,
        activity: Option<impl ToString>,
        assignee: Option<impl ToString>,
        original_estimate: f64,
    ) -> Self {
        Self {
            id,
            activity: activity.map(|a| a.to_string()),
            assignee: assignee.map(|a| a.to_string()),
            original_estimate,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RawWorkItem {
    pub id: u64,
    #[serde(default)]
    pub fields: RawWorkItemFields,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawWorkItemFields {
    #[serde(rename = "Microsoft.VSTS.Common.Activity")]
    pub activity: Option<String>,
    #[serde(rename = "Microsoft.VSTS.Scheduling.OriginalEstimate")]
    pub original_estimate: Option<f64>,
    #[serde(rename = "System.AssignedTo")]
    pub assigned_to: Option<Value>,
}

impl From<RawWorkItem> for WorkItem {
    fn from(raw: RawWorkItem) -> Self {
        // Identities come back as objects; older payloads carry "Name <mail>" strings.
        let assignee = match raw.fields.assigned_to {
            Some(Value::Object(identity)) => identity
                .get("displayName")
                .and_then(Value::as_str)
                .map(String::from),
            Some(Value::String(name)) => Some(name),
            _ => None,
        };
        Self {
            id: raw.id,
            activity: raw.fields.activity.filter(|a| !a.is_empty()),
            assignee: assignee.filter(|a| !a.is_empty()),
            original_estimate: raw.fields.original_estimate.unwrap_or(0.0),
        }
    }
}
