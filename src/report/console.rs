use crate::analyze::{CapacityReport, MemberCapacityReport, SprintHeader};
use crate::config::OutputSettings;
use crate::report::palette::Palette;
use std::io::{self, Write};

const SUMMARY_NEED_WIDTH: usize = 15;
const PERCENT_WIDTH: usize = 14;

pub trait ConsoleReport {
    fn write_report(&self, out: &mut impl Write, output: &OutputSettings) -> io::Result<()>;
}

impl ConsoleReport for CapacityReport {
    fn write_report(&self, out: &mut impl Write, output: &OutputSettings) -> io::Result<()> {
        let palette = Palette::new(output.color);
        let sprint_w = output.sprint_column_width;
        let activity_w = output.activity_column_width;
        let number_w = output.numeric_column_width;
        let need_w = output.resource_need_column_width;

        writeln!(out, "\n📋 Sprint analysis summary:\n")?;
        writeln!(
            out,
            "{:<sprint_w$}{:<activity_w$}{:>number_w$}{:>number_w$}{:>need_w$}",
            "Sprint", "Activity", "Planned Work (h)", "Capacity (h)", "Resource Need (h)"
        )?;
        writeln!(out, "{}", "-".repeat(sprint_w + activity_w + 2 * number_w + need_w))?;
        for row in &self.rows {
            let need = format!("{:>need_w$.1}", row.resource_need);
            let need = if row.resource_need > 0.0 {
                palette.alert(need)
            } else {
                need
            };
            writeln!(
                out,
                "{:<sprint_w$}{:<activity_w$}{:>number_w$.1}{:>number_w$.1}{need}",
                row.sprint, row.activity, row.planned, row.capacity
            )?;
        }
        if self.rows.is_empty() {
            writeln!(out, "No capacity or planned work found.")?;
            return Ok(());
        }

        self.write_totals(out, palette)?;
        self.write_needs_by_sprint(out, output, palette)?;
        self.write_needs_by_activity(out, output, palette)
    }
}

impl CapacityReport {
    fn write_totals(&self, out: &mut impl Write, palette: Palette) -> io::Result<()> {
        let totals = self.totals();
        writeln!(out, "\n📊 Overall summary:")?;
        writeln!(out, "Total planned work: {:.1} h", totals.planned)?;
        writeln!(out, "Total capacity: {:.1} h", totals.capacity)?;
        writeln!(out, "Capacity utilization: {:.1}%", totals.utilization())?;
        if totals.resource_need > 0.0 {
            let line = format!("Total resource need: {:.1} h", totals.resource_need);
            writeln!(out, "{}", palette.alert(line))
        } else {
            let line = "✅ No resource need - capacity is sufficient".to_string();
            writeln!(out, "{}", palette.ok(line))
        }
    }

    fn write_needs_by_sprint(
        &self,
        out: &mut impl Write,
        output: &OutputSettings,
        palette: Palette,
    ) -> io::Result<()> {
        let sprint_w = output.sprint_column_width;
        let activity_w = output.activity_column_width;
        let needs = self.needs_by_sprint();

        writeln!(out, "\n🚨 Resource need by sprint:")?;
        if needs.is_empty() {
            let line = "✅ No sprint needs extra resources!".to_string();
            return writeln!(out, "{}", palette.ok(line));
        }
        writeln!(
            out,
            "{:<sprint_w$}{:<activity_w$}{:>SUMMARY_NEED_WIDTH$}",
            "Sprint", "Activity", "Need (h)"
        )?;
        writeln!(out, "{}", "-".repeat(sprint_w + activity_w + SUMMARY_NEED_WIDTH))?;
        for sprint in &needs {
            let head = palette.strong(format!("{:<sprint_w$}{:<activity_w$}", sprint.sprint, "TOTAL"));
            let total = palette.alert(format!("{:>SUMMARY_NEED_WIDTH$.1}", sprint.total));
            writeln!(out, "\n{head}{total}")?;
            for activity in &sprint.activities {
                let need = palette.alert(format!("{:>SUMMARY_NEED_WIDTH$.1}", activity.need));
                writeln!(out, "{:<sprint_w$}{:<activity_w$}{need}", "", activity.activity)?;
            }
        }
        Ok(())
    }

    fn write_needs_by_activity(
        &self,
        out: &mut impl Write,
        output: &OutputSettings,
        palette: Palette,
    ) -> io::Result<()> {
        let sprint_w = output.sprint_column_width;
        let activity_w = output.activity_column_width;
        let needs = self.needs_by_activity();

        writeln!(out, "\n🎯 Resource need by activity:")?;
        if needs.is_empty() {
            let line = "✅ No activity needs extra resources!".to_string();
            return writeln!(out, "{}", palette.ok(line));
        }
        writeln!(
            out,
            "{:<activity_w$}{:<sprint_w$}{:>SUMMARY_NEED_WIDTH$}",
            "Activity", "Sprint", "Need (h)"
        )?;
        writeln!(out, "{}", "-".repeat(sprint_w + activity_w + SUMMARY_NEED_WIDTH))?;
        for activity in &needs {
            let head = palette.strong(format!("{:<activity_w$}{:<sprint_w$}", activity.activity, "TOTAL"));
            let total = palette.alert(format!("{:>SUMMARY_NEED_WIDTH$.1}", activity.total));
            writeln!(out, "\n{head}{total}")?;
            for sprint in &activity.sprints {
                let need = palette.alert(format!("{:>SUMMARY_NEED_WIDTH$.1}", sprint.need));
                writeln!(out, "{:<activity_w$}{:<sprint_w$}{need}", "", sprint.sprint)?;
            }
        }
        Ok(())
    }
}

impl ConsoleReport for MemberCapacityReport {
    fn write_report(&self, out: &mut impl Write, output: &OutputSettings) -> io::Result<()> {
        let palette = Palette::new(output.color);
        let member_w = output.member_column_width;
        let activity_w = output.activity_column_width;
        let number_w = output.numeric_column_width;

        for sprint in self {
            writeln!(out, "\n👥 {}:\n", section_title(&sprint.sprint, "capacity by member"))?;
            if sprint.members.is_empty() {
                writeln!(out, "No capacity or planned work found.")?;
                continue;
            }
            writeln!(
                out,
                "{:<member_w$}{:<activity_w$}{:>number_w$}{:>number_w$}{:>PERCENT_WIDTH$}",
                "Member", "Activity", "Capacity (h)", "Planned (h)", "Utilization"
            )?;
            writeln!(
                out,
                "{}",
                "-".repeat(member_w + activity_w + 2 * number_w + PERCENT_WIDTH)
            )?;
            for member in &sprint.members {
                for (index, row) in member.rows.iter().enumerate() {
                    let name = if index == 0 { member.member.as_str() } else { "" };
                    writeln!(
                        out,
                        "{:<member_w$}{:<activity_w$}{:>number_w$.1}{:>number_w$.1}{}",
                        name,
                        row.activity,
                        row.capacity,
                        row.planned,
                        percent(row.utilization, palette)
                    )?;
                }
                let total = palette.strong(format!(
                    "{:<member_w$}{:<activity_w$}{:>number_w$.1}{:>number_w$.1}",
                    "",
                    "TOTAL",
                    member.total_capacity,
                    member.total_planned
                ));
                writeln!(out, "{total}{}", percent(member.total_utilization, palette))?;
            }
        }
        Ok(())
    }
}

/// Sprint title with its period when the iteration carries dates.
pub fn section_title(sprint: &SprintHeader, subject: &str) -> String {
    match sprint.iteration.as_ref().and_then(|iteration| iteration.period()) {
        Some(period) => format!("{} {subject} ({period})", sprint.label),
        None => format!("{} {subject}", sprint.label),
    }
}

fn percent(value: f64, palette: Palette) -> String {
    let text = format!("{:>w$.1}%", value, w = PERCENT_WIDTH - 1);
    if value > 100.0 {
        palette.alert(text)
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::analyzer::Analyzer;
    use crate::analyze::{DataAnalysis, ReportRow, SprintSnapshot};
    use crate::model::{MemberCapacity, WorkItem};
    use serde_json::json;

    fn plain() -> OutputSettings {
        OutputSettings {
            color: false,
            ..OutputSettings::default()
        }
    }

    fn render(report: &impl ConsoleReport, output: &OutputSettings) -> String {
        let mut out = Vec::new();
        report.write_report(&mut out, output).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn analysis() -> DataAnalysis {
        let mut analysis = DataAnalysis::new(9);
        analysis.insert_snapshot(SprintSnapshot {
            label: "Sprint 51".to_string(),
            iteration: None,
            members: MemberCapacity::from_payload(&json!([
                {"teamMember": {"displayName": "Ayse"}, "activities": [
                    {"name": "Development", "capacityPerDay": 5},
                    {"name": "Testing", "capacityPerDay": 2}
                ]}
            ])),
            work_items: vec![
                WorkItem::new(1, Some("Development"), Some("Ayse"), 50.0),
                WorkItem::new(2, Some("Testing"), Some("Ayse"), 6.0),
            ],
        });
        analysis
    }

    #[test]
    fn capacity_report_layout() {
        let text = render(&analysis().capacity_report(), &plain());

        assert!(text.contains(&format!(
            "{:<15}{:<20}{:>20}{:>20}{:>20}",
            "Sprint", "Activity", "Planned Work (h)", "Capacity (h)", "Resource Need (h)"
        )));
        assert!(text.contains(&"-".repeat(95)));
        assert!(text.contains(&format!(
            "{:<15}{:<20}{:>20}{:>20}{:>20}",
            "Sprint 51", "Development", "50.0", "45.0", "5.0"
        )));
        assert!(text.contains(&format!(
            "{:<15}{:<20}{:>20}{:>20}{:>20}",
            "Sprint 51", "Testing", "6.0", "18.0", "0.0"
        )));
        assert!(text.contains("Total planned work: 56.0 h"));
        assert!(text.contains("Total capacity: 63.0 h"));
        assert!(text.contains("Capacity utilization: 88.9%"));
        assert!(text.contains("Total resource need: 5.0 h"));
        assert!(text.contains(&format!("{:<15}{:<20}{:>15}", "Sprint 51", "TOTAL", "5.0")));
        assert!(text.contains(&format!("{:<15}{:<20}{:>15}", "", "Development", "5.0")));
        assert!(text.contains(&format!("{:<20}{:<15}{:>15}", "Development", "TOTAL", "5.0")));
        assert!(text.contains(&format!("{:<20}{:<15}{:>15}", "", "Sprint 51", "5.0")));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn satisfied_capacity_is_reported() {
        let report = CapacityReport {
            sprints: vec![],
            rows: vec![ReportRow {
                sprint: "Sprint 51".to_string(),
                activity: "Development".to_string(),
                planned: 10.0,
                capacity: 45.0,
                resource_need: 0.0,
            }],
        };

        let text = render(&report, &plain());

        assert!(text.contains("✅ No resource need - capacity is sufficient"));
        assert!(text.contains("✅ No sprint needs extra resources!"));
        assert!(text.contains("✅ No activity needs extra resources!"));
    }

    #[test]
    fn empty_report_says_so() {
        let report = CapacityReport {
            sprints: vec![],
            rows: vec![],
        };

        let text = render(&report, &plain());

        assert!(text.contains("No capacity or planned work found."));
        assert!(!text.contains("Overall summary"));
    }

    #[test]
    fn member_report_layout() {
        let text = render(&analysis().member_report(), &plain());

        assert!(text.contains("👥 Sprint 51 capacity by member:"));
        assert!(text.contains(&format!(
            "{:<25}{:<20}{:>20}{:>20}{:>13}%",
            "Ayse", "Development", "45.0", "50.0", "111.1"
        )));
        assert!(text.contains(&format!(
            "{:<25}{:<20}{:>20}{:>20}{:>13}%",
            "", "Testing", "18.0", "6.0", "33.3"
        )));
        assert!(text.contains(&format!(
            "{:<25}{:<20}{:>20}{:>20}{:>13}%",
            "", "TOTAL", "63.0", "56.0", "88.9"
        )));
    }
}
