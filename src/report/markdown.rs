use crate::analyze::{CapacityReport, MemberCapacityReport, ReportRow, SprintMemberReport};
use crate::model::{Error, Result};
use crate::report::console::section_title;
use markdown_builder::Markdown;
use markdown_table::{Heading, HeadingAlignment, MarkdownTable};
use std::fs;
use std::path::Path;

/// Reports written into one markdown document.
#[derive(Debug, Default)]
pub struct MarkdownExport<'a> {
    pub capacity: Option<&'a CapacityReport>,
    pub members: Option<&'a MemberCapacityReport>,
}

impl MarkdownExport<'_> {
    pub fn report_create(&self, path: &Path) -> Result<()> {
        fs::write(path, self.render()?)?;
        Ok(())
    }

    pub fn render(&self) -> Result<String> {
        let mut doc = Markdown::new();

        doc.header1("Sprint capacity");
        if let Some(report) = self.capacity {
            for sprint in &report.sprints {
                let rows = report
                    .rows
                    .iter()
                    .filter(|row| row.sprint == sprint.label)
                    .collect::<Vec<_>>();
                doc.header2(section_title(sprint, "capacity by activity"));
                doc.add_activity_table(rows)?;
            }
            doc.add_needs(report)?;
        }
        if let Some(report) = self.members {
            for sprint in report {
                doc.header2(section_title(&sprint.sprint, "capacity by member"));
                doc.add_member_table(sprint)?;
            }
        }
        Ok(doc.render())
    }
}

trait MarkdownExt {
    fn add_activity_table(&mut self, rows: Vec<&ReportRow>) -> Result<()>;
    fn add_needs(&mut self, report: &CapacityReport) -> Result<()>;
    fn add_member_table(&mut self, sprint: &SprintMemberReport) -> Result<()>;
    fn add_table(&mut self, headings: &[(&str, bool)], table: Vec<Vec<String>>) -> Result<()>;
}

impl MarkdownExt for Markdown {
    fn add_activity_table(&mut self, rows: Vec<&ReportRow>) -> Result<()> {
        let table = rows
            .iter()
            .map(|row| {
                let need = if row.resource_need > 0.0 {
                    format!("**{:.1}**", row.resource_need)
                } else {
                    format!("{:.1}", row.resource_need)
                };
                vec![
                    row.activity.clone(),
                    format!("{:.1}", row.planned),
                    format!("{:.1}", row.capacity),
                    need,
                ]
            })
            .collect();
        self.add_table(
            &[
                ("Activity", false),
                ("Planned Work (h)", true),
                ("Capacity (h)", true),
                ("Resource Need (h)", true),
            ],
            table,
        )
    }

    fn add_needs(&mut self, report: &CapacityReport) -> Result<()> {
        self.header2("Resource need by sprint".to_string());
        let table = report
            .needs_by_sprint()
            .into_iter()
            .flat_map(|sprint| {
                let total = vec![
                    format!("**{}**", sprint.sprint),
                    "**TOTAL**".to_string(),
                    format!("**{:.1}**", sprint.total),
                ];
                let activities = sprint.activities.into_iter().map(|activity| {
                    vec![
                        String::new(),
                        activity.activity,
                        format!("{:.1}", activity.need),
                    ]
                });
                std::iter::once(total).chain(activities)
            })
            .collect();
        self.add_table(&[("Sprint", false), ("Activity", false), ("Need (h)", true)], table)?;

        self.header2("Resource need by activity".to_string());
        let table = report
            .needs_by_activity()
            .into_iter()
            .flat_map(|activity| {
                let total = vec![
                    format!("**{}**", activity.activity),
                    "**TOTAL**".to_string(),
                    format!("**{:.1}**", activity.total),
                ];
                let sprints = activity.sprints.into_iter().map(|sprint| {
                    vec![String::new(), sprint.sprint, format!("{:.1}", sprint.need)]
                });
                std::iter::once(total).chain(sprints)
            })
            .collect();
        self.add_table(&[("Activity", false), ("Sprint", false), ("Need (h)", true)], table)
    }

    fn add_member_table(&mut self, sprint: &SprintMemberReport) -> Result<()> {
        let mut table = vec![];
        for member in &sprint.members {
            for (index, row) in member.rows.iter().enumerate() {
                let name = if index == 0 { member.member.clone() } else { String::new() };
                table.push(vec![
                    name,
                    row.activity.clone(),
                    format!("{:.1}", row.capacity),
                    format!("{:.1}", row.planned),
                    format!("{:.1}%", row.utilization),
                ]);
            }
            table.push(vec![
                String::new(),
                "**TOTAL**".to_string(),
                format!("**{:.1}**", member.total_capacity),
                format!("**{:.1}**", member.total_planned),
                format!("**{:.1}%**", member.total_utilization),
            ]);
        }
        self.add_table(
            &[
                ("Member", false),
                ("Activity", false),
                ("Capacity (h)", true),
                ("Planned (h)", true),
                ("Utilization", true),
            ],
            table,
        )
    }

    fn add_table(&mut self, headings: &[(&str, bool)], table: Vec<Vec<String>>) -> Result<()> {
        if table.is_empty() {
            self.paragraph("*Nothing to report.*".to_string());
            return Ok(());
        }
        let headings = headings
            .iter()
            .map(|(title, numeric)| {
                Heading::new(title.to_string(), numeric.then_some(HeadingAlignment::Center))
            })
            .collect::<Vec<_>>();
        let mut md_table = MarkdownTable::new(table);
        md_table.with_headings(headings);
        let rendered = md_table
            .as_markdown()
            .map_err(|e| Error::Report(format!("{e:?}")))?;
        self.paragraph(rendered);
        Ok(())
    }
}
