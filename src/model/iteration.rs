use crate::model::{Error, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Iteration {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub attributes: IterationAttributes,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IterationAttributes {
    pub start_date: Option<DateTime<Utc>>,
    pub finish_date: Option<DateTime<Utc>>,
}

impl Iteration {
    /// Picks the iteration whose display name is exactly `name`.
    pub fn resolve(iterations: Vec<Iteration>, name: &str) -> Result<Iteration> {
        iterations
            .into_iter()
            .find(|iteration| iteration.name == name)
            .ok_or_else(|| Error::IterationNotFound(name.to_string()))
    }

    pub fn period(&self) -> Option<String> {
        let since = self.attributes.start_date?;
        let until = self.attributes.finish_date?;
        Some(format!(
            "{} - {}",
            since.format("%d.%m.%Y"),
            until.format("%d.%m.%Y")
        ))
    }
}
