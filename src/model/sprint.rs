use crate::model::{Error, Result};
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Most sprints one run may analyze.
pub const MAX_SPRINTS: u32 = 100;

/// Sprints requested on the command line: a single number (`51`) or an
/// inclusive range (`50-55`).
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SprintSelector {
    pub first: u32,
    pub last: u32,
}

impl SprintSelector {
    pub fn numbers(&self) -> RangeInclusive<u32> {
        self.first..=self.last
    }

    pub fn labels(&self) -> Vec<String> {
        self.numbers().map(sprint_label).collect()
    }
}

fn sprint_label(number: u32) -> String {
    format!("Sprint {number}")
}

// Parser
impl FromStr for SprintSelector {
    type Err = Error;

    fn from_str(selector: &str) -> Result<Self> {
        let parse = |part: &str| {
            part.trim()
                .parse::<u32>()
                .map_err(|_| Error::SprintSelector(selector.to_string()))
        };

        let (first, last) = match selector.split_once('-') {
            Some((first, last)) => (parse(first)?, parse(last)?),
            None => {
                let single = parse(selector)?;
                (single, single)
            }
        };
        if last < first || last - first >= MAX_SPRINTS {
            return Err(Error::SprintSelector(selector.to_string()));
        }
        Ok(Self { first, last })
    }
}
