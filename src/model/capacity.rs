use log::debug;
use serde_json::Value;

/// One team member's capacity entry for an iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberCapacity {
    pub display_name: Option<String>,
    pub activities: Vec<ActivityCapacity>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityCapacity {
    pub name: String,
    pub capacity_per_day: f64,
}

// Parser
impl MemberCapacity {
    /// Normalizes a raw capacities payload into member records.
    ///
    /// The service answers either with a bare list of members, with the list
    /// under `value`, or with the list under `teamMembers` (which wins when
    /// present). Entries that are not objects or carry no `activities` list are
    /// skipped, as are activity entries that are not objects.
    pub fn from_payload(payload: &Value) -> Vec<Self> {
        member_entries(payload)
            .iter()
            .filter_map(Self::from_entry)
            .collect()
    }

    fn from_entry(entry: &Value) -> Option<Self> {
        let activities = entry.as_object()?.get("activities").and_then(Value::as_array);
        let Some(activities) = activities else {
            debug!("Skipping capacity entry without activities: {entry}");
            return None;
        };
        let display_name = entry
            .pointer("/teamMember/displayName")
            .and_then(Value::as_str)
            .map(String::from);
        let activities = activities
            .iter()
            .filter_map(Value::as_object)
            .map(|activity| ActivityCapacity {
                name: activity
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or("Unknown")
                    .to_string(),
                capacity_per_day: activity
                    .get("capacityPerDay")
                    .and_then(Value::as_f64)
                    .unwrap_or(0.0),
            })
            .collect();
        Some(Self {
            display_name,
            activities,
        })
    }
}

fn member_entries(payload: &Value) -> &[Value] {
    if let Some(members) = payload.get("teamMembers").and_then(Value::as_array) {
        return members;
    }
    match payload {
        Value::Array(members) => members,
        _ => payload
            .get("value")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default(),
    }
}
