use crate::analyze::{ActivityHours, MemberActivityHours};
use crate::model::{MemberCapacity, WorkItem};
use log::debug;

const UNASSIGNED: &str = "Unassigned";
const UNKNOWN: &str = "Unknown";

/// Capacity per day summed over members, by activity.
pub fn capacity_by_activity(members: &[MemberCapacity]) -> ActivityHours {
    members
        .iter()
        .flat_map(|member| &member.activities)
        .fold(ActivityHours::new(), |mut acc, activity| {
            debug!(
                "Added {} capacity per day for activity {}",
                activity.capacity_per_day, activity.name
            );
            *acc.entry(activity.name.clone()).or_default() += activity.capacity_per_day;
            acc
        })
}

/// Sprint capacity hours (per day × `working_days`) by member and activity.
pub fn capacity_by_member(members: &[MemberCapacity], working_days: f64) -> MemberActivityHours {
    let mut hours = MemberActivityHours::new();
    for member in members {
        let name = member.display_name.as_deref().unwrap_or(UNKNOWN);
        let activities = hours.entry(name.to_string()).or_default();
        for activity in &member.activities {
            *activities.entry(activity.name.clone()).or_default() +=
                activity.capacity_per_day * working_days;
        }
    }
    hours
}

/// Original estimates by activity. Items without an activity are left out.
pub fn work_by_activity(work_items: &[WorkItem]) -> ActivityHours {
    work_items
        .iter()
        .filter_map(|item| Some((item.activity.as_ref()?, item.original_estimate)))
        .fold(ActivityHours::new(), |mut acc, (activity, hours)| {
            *acc.entry(activity.clone()).or_default() += hours;
            acc
        })
}

/// Original estimates by assignee and activity. Missing assignees land under
/// "Unassigned", missing activities under "Unknown"; items without estimated
/// hours are skipped.
pub fn work_by_member(work_items: &[WorkItem]) -> MemberActivityHours {
    let mut hours = MemberActivityHours::new();
    for item in work_items.iter().filter(|item| item.original_estimate > 0.0) {
        let member = item.assignee.as_deref().unwrap_or(UNASSIGNED);
        let activity = item.activity.as_deref().unwrap_or(UNKNOWN);
        *hours
            .entry(member.to_string())
            .or_default()
            .entry(activity.to_string())
            .or_default() += item.original_estimate;
    }
    hours
}
