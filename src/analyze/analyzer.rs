use crate::analyze::aggregator::{
    capacity_by_activity, capacity_by_member, work_by_activity, work_by_member,
};
use crate::analyze::model::utilization;
use crate::analyze::{
    ActivityHours, ActivityNeed, ActivityNeeds, CapacityReport, DataAnalysis,
    MemberActivityHours, MemberCapacityReport, MemberRow, MemberSummary, ReportRow,
    SprintHeader, SprintMemberReport, SprintNeed, SprintNeeds, Totals,
};
use indexmap::IndexMap;
use itertools::Itertools;

pub trait Analyzer {
    /// Capacity against planned work per sprint and activity.
    fn capacity_report(&self) -> CapacityReport;

    /// Capacity against planned work per sprint, member and activity.
    fn member_report(&self) -> MemberCapacityReport;
}

impl Analyzer for DataAnalysis {
    fn capacity_report(&self) -> CapacityReport {
        let mut rows = vec![];
        for snapshot in &self.snapshots {
            let capacity = capacity_by_activity(&snapshot.members);
            let planned = work_by_activity(&snapshot.work_items);
            rows.extend(build_rows(
                &snapshot.label,
                &capacity,
                &planned,
                self.working_days,
            ));
        }
        CapacityReport {
            sprints: self.snapshots.iter().map(SprintHeader::from).collect(),
            rows,
        }
    }

    fn member_report(&self) -> MemberCapacityReport {
        self.snapshots
            .iter()
            .map(|snapshot| SprintMemberReport {
                sprint: SprintHeader::from(snapshot),
                members: build_member_summaries(
                    &capacity_by_member(&snapshot.members, self.working_days),
                    &work_by_member(&snapshot.work_items),
                ),
            })
            .collect()
    }
}

/// One row per activity seen on either side, ordered by activity name.
/// `capacity` holds hours per day and is scaled by `working_days`.
pub fn build_rows(
    sprint: &str,
    capacity: &ActivityHours,
    planned: &ActivityHours,
    working_days: f64,
) -> Vec<ReportRow> {
    capacity
        .keys()
        .merge(planned.keys())
        .dedup()
        .map(|activity| {
            let planned = round1(planned.get(activity).copied().unwrap_or(0.0));
            let capacity = round1(capacity.get(activity).copied().unwrap_or(0.0) * working_days);
            ReportRow {
                sprint: sprint.to_string(),
                activity: activity.clone(),
                planned,
                capacity,
                resource_need: (planned - capacity).max(0.0),
            }
        })
        .collect()
}

/// Members ordered by name, their activities by name. Pairs without capacity
/// and without planned hours are left out, as are members left with no rows.
pub fn build_member_summaries(
    capacity: &MemberActivityHours,
    planned: &MemberActivityHours,
) -> Vec<MemberSummary> {
    let none = ActivityHours::new();
    capacity
        .keys()
        .merge(planned.keys())
        .dedup()
        .filter_map(|member| {
            let capacity = capacity.get(member).unwrap_or(&none);
            let planned = planned.get(member).unwrap_or(&none);
            let rows = capacity
                .keys()
                .merge(planned.keys())
                .dedup()
                .filter_map(|activity| {
                    let capacity = capacity.get(activity).copied().unwrap_or(0.0);
                    let planned = planned.get(activity).copied().unwrap_or(0.0);
                    (capacity > 0.0 || planned > 0.0).then(|| MemberRow {
                        activity: activity.clone(),
                        capacity,
                        planned,
                        utilization: utilization(planned, capacity),
                    })
                })
                .collect::<Vec<_>>();
            if rows.is_empty() {
                return None;
            }
            let total_capacity = rows.iter().map(|row| row.capacity).sum();
            let total_planned = rows.iter().map(|row| row.planned).sum();
            Some(MemberSummary {
                member: member.clone(),
                rows,
                total_capacity,
                total_planned,
                total_utilization: utilization(total_planned, total_capacity),
            })
        })
        .collect()
}

impl CapacityReport {
    pub fn totals(&self) -> Totals {
        self.rows.iter().fold(Totals::default(), |mut acc, row| {
            acc.planned += row.planned;
            acc.capacity += row.capacity;
            acc.resource_need += row.resource_need;
            acc
        })
    }

    /// Rows with a resource need grouped by sprint. Sprints are ordered by
    /// label as plain strings ("Sprint 10" before "Sprint 9"), activities by
    /// need, largest first.
    pub fn needs_by_sprint(&self) -> Vec<SprintNeeds> {
        let mut groups: IndexMap<&str, Vec<ActivityNeed>> = IndexMap::new();
        for row in self.rows_with_need() {
            groups.entry(&row.sprint).or_default().push(ActivityNeed {
                activity: row.activity.clone(),
                need: row.resource_need,
            });
        }
        groups
            .into_iter()
            .map(|(sprint, mut activities)| {
                activities.sort_by(|a, b| b.need.total_cmp(&a.need));
                SprintNeeds {
                    sprint: sprint.to_string(),
                    total: activities.iter().map(|a| a.need).sum(),
                    activities,
                }
            })
            .sorted_by(|a, b| a.sprint.cmp(&b.sprint))
            .collect()
    }

    /// Rows with a resource need grouped by activity, largest total first.
    /// Within an activity sprints are ordered by need, largest first.
    pub fn needs_by_activity(&self) -> Vec<ActivityNeeds> {
        let mut groups: IndexMap<&str, Vec<SprintNeed>> = IndexMap::new();
        for row in self.rows_with_need() {
            groups.entry(&row.activity).or_default().push(SprintNeed {
                sprint: row.sprint.clone(),
                need: row.resource_need,
            });
        }
        groups
            .into_iter()
            .map(|(activity, mut sprints)| {
                sprints.sort_by(|a, b| b.need.total_cmp(&a.need));
                ActivityNeeds {
                    activity: activity.to_string(),
                    total: sprints.iter().map(|s| s.need).sum(),
                    sprints,
                }
            })
            .sorted_by(|a, b| b.total.total_cmp(&a.total))
            .collect()
    }

    fn rows_with_need(&self) -> impl Iterator<Item = &ReportRow> {
        self.rows.iter().filter(|row| row.resource_need > 0.0)
    }
}

/// One decimal, ties resolved on the exact binary value to the even digit.
fn round1(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::SprintSnapshot;
    use crate::model::{MemberCapacity, WorkItem};
    use serde_json::json;

    fn hours(entries: &[(&str, f64)]) -> ActivityHours {
        entries
            .iter()
            .map(|(name, hours)| (name.to_string(), *hours))
            .collect()
    }

    fn row(sprint: &str, activity: &str, planned: f64, capacity: f64) -> ReportRow {
        ReportRow {
            sprint: sprint.to_string(),
            activity: activity.to_string(),
            planned,
            capacity,
            resource_need: (planned - capacity).max(0.0),
        }
    }

    fn snapshot() -> SprintSnapshot {
        SprintSnapshot {
            label: "Sprint 51".to_string(),
            iteration: None,
            members: MemberCapacity::from_payload(&json!([
                {"teamMember": {"displayName": "M"}, "activities": [{"name": "Dev", "capacityPerDay": 5}]}
            ])),
            work_items: vec![
                WorkItem::new(1, Some("Dev"), Some("M"), 30.0),
                WorkItem::new(2, Some("Dev"), None::<String>, 20.0),
                WorkItem::new(3, None::<String>, Some("M"), 10.0),
                WorkItem::new(4, Some("Testing"), Some("M"), 4.0),
            ],
        }
    }

    #[test]
    fn rows_cover_both_sides_with_need_floored_at_zero() {
        let rows = build_rows(
            "Sprint 51",
            &hours(&[("Dev", 5.0), ("Design", 1.0)]),
            &hours(&[("Dev", 50.0), ("Testing", 4.0)]),
            9.0,
        );

        assert_eq!(
            rows,
            vec![
                row("Sprint 51", "Design", 0.0, 9.0),
                row("Sprint 51", "Dev", 50.0, 45.0),
                row("Sprint 51", "Testing", 4.0, 0.0),
            ]
        );
        assert_eq!(rows[0].resource_need, 0.0);
        assert_eq!(rows[1].resource_need, 5.0);
        assert!(rows.iter().all(|row| row.resource_need >= 0.0));
    }

    #[test]
    fn values_are_rounded_before_need_is_computed() {
        let rows = build_rows(
            "Sprint 51",
            &hours(&[("Dev", 1.04)]),
            &hours(&[("Dev", 10.26)]),
            9.0,
        );

        assert_eq!(rows[0].planned, 10.3);
        assert_eq!(rows[0].capacity, 9.4);
        assert_eq!(rows[0].resource_need, round1(10.3) - round1(9.4));
    }

    #[test]
    fn ties_round_to_even_on_the_exact_value() {
        assert_eq!(round1(2.25), 2.2);
        assert_eq!(round1(0.35), 0.3);
        assert_eq!(round1(10.26), 10.3);

        let rows = build_rows(
            "Sprint 51",
            &hours(&[("Dev", 0.25)]),
            &hours(&[("Dev", 2.25)]),
            9.0,
        );

        assert_eq!(rows[0].planned, 2.2);
        assert_eq!(rows[0].capacity, 2.2);
        assert_eq!(rows[0].resource_need, 0.0);
    }

    #[test]
    fn capacity_report_from_snapshot() {
        let mut analysis = DataAnalysis::new(9);
        analysis.insert_snapshot(snapshot());
        analysis.insert_snapshot(SprintSnapshot::empty("Sprint 52"));

        let report = analysis.capacity_report();

        assert_eq!(report.sprints.len(), 2);
        assert_eq!(report.sprints[1].label, "Sprint 52");
        assert_eq!(
            report.rows,
            vec![
                row("Sprint 51", "Dev", 50.0, 45.0),
                row("Sprint 51", "Testing", 4.0, 0.0),
            ]
        );
        let totals = report.totals();
        assert_eq!(totals.planned, 54.0);
        assert_eq!(totals.capacity, 45.0);
        assert_eq!(totals.resource_need, 9.0);
        assert_eq!(totals.utilization(), 120.0);
    }

    #[test]
    fn analysis_is_repeatable() {
        let mut analysis = DataAnalysis::new(9);
        analysis.insert_snapshot(snapshot());

        assert_eq!(analysis.capacity_report(), analysis.capacity_report());
        assert_eq!(analysis.member_report(), analysis.member_report());
    }

    #[test]
    fn needs_by_sprint_sorts_labels_as_strings() {
        let report = CapacityReport {
            sprints: vec![],
            rows: vec![
                row("Sprint 9", "Dev", 10.0, 4.0),
                row("Sprint 9", "Test", 12.0, 2.0),
                row("Sprint 9", "Design", 1.0, 5.0),
                row("Sprint 50", "Dev", 3.0, 1.0),
            ],
        };

        let needs = report.needs_by_sprint();

        assert_eq!(
            needs,
            vec![
                SprintNeeds {
                    sprint: "Sprint 50".to_string(),
                    total: 2.0,
                    activities: vec![ActivityNeed {
                        activity: "Dev".to_string(),
                        need: 2.0
                    }],
                },
                SprintNeeds {
                    sprint: "Sprint 9".to_string(),
                    total: 16.0,
                    activities: vec![
                        ActivityNeed {
                            activity: "Test".to_string(),
                            need: 10.0
                        },
                        ActivityNeed {
                            activity: "Dev".to_string(),
                            need: 6.0
                        },
                    ],
                },
            ]
        );
    }

    #[test]
    fn needs_by_activity_orders_by_total() {
        let report = CapacityReport {
            sprints: vec![],
            rows: vec![
                row("Sprint 50", "Dev", 3.0, 1.0),
                row("Sprint 50", "Test", 10.0, 0.0),
                row("Sprint 51", "Dev", 5.0, 0.0),
                row("Sprint 51", "Design", 0.0, 3.0),
            ],
        };

        let needs = report.needs_by_activity();

        assert_eq!(needs.len(), 2);
        assert_eq!(needs[0].activity, "Test");
        assert_eq!(needs[0].total, 10.0);
        assert_eq!(needs[1].activity, "Dev");
        assert_eq!(needs[1].total, 7.0);
        assert_eq!(
            needs[1].sprints,
            vec![
                SprintNeed {
                    sprint: "Sprint 51".to_string(),
                    need: 5.0
                },
                SprintNeed {
                    sprint: "Sprint 50".to_string(),
                    need: 2.0
                },
            ]
        );
    }

    #[test]
    fn no_need_means_empty_views() {
        let report = CapacityReport {
            sprints: vec![],
            rows: vec![row("Sprint 51", "Dev", 1.0, 9.0)],
        };

        assert!(report.needs_by_sprint().is_empty());
        assert!(report.needs_by_activity().is_empty());
    }

    #[test]
    fn member_report_joins_capacity_and_planned_work() {
        let mut analysis = DataAnalysis::new(9);
        analysis.insert_snapshot(snapshot());

        let report = analysis.member_report();

        assert_eq!(report.len(), 1);
        let members = &report[0].members;
        assert_eq!(
            members.iter().map(|m| m.member.as_str()).collect::<Vec<_>>(),
            vec!["M", "Unassigned"]
        );

        let m = &members[0];
        assert_eq!(
            m.rows,
            vec![
                MemberRow {
                    activity: "Dev".to_string(),
                    capacity: 45.0,
                    planned: 30.0,
                    utilization: 30.0 / 45.0 * 100.0,
                },
                MemberRow {
                    activity: "Testing".to_string(),
                    capacity: 0.0,
                    planned: 4.0,
                    utilization: 0.0,
                },
                MemberRow {
                    activity: "Unknown".to_string(),
                    capacity: 0.0,
                    planned: 10.0,
                    utilization: 0.0,
                },
            ]
        );
        assert_eq!(m.total_capacity, 45.0);
        assert_eq!(m.total_planned, 44.0);
        assert_eq!(m.total_utilization, 44.0 / 45.0 * 100.0);

        let unassigned = &members[1];
        assert_eq!(unassigned.rows.len(), 1);
        assert_eq!(unassigned.rows[0].planned, 20.0);
        assert_eq!(unassigned.total_utilization, 0.0);
    }

    #[test]
    fn member_pairs_without_hours_are_dropped() {
        let capacity = MemberActivityHours::from([(
            "Ayse".to_string(),
            hours(&[("Dev", 0.0), ("Test", 18.0)]),
        )]);
        let planned = MemberActivityHours::from([("Idle".to_string(), hours(&[("Dev", 0.0)]))]);

        let summaries = build_member_summaries(&capacity, &planned);

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].member, "Ayse");
        assert_eq!(summaries[0].rows.len(), 1);
        assert_eq!(summaries[0].rows[0].activity, "Test");
    }
}
