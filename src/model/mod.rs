mod capacity;
mod error;
mod iteration;
mod sprint;
mod work_item;

pub use capacity::{ActivityCapacity, MemberCapacity};
pub use error::{Error, Result};
pub use iteration::Iteration;
pub use sprint::SprintSelector;
pub use work_item::{RawWorkItem, WorkItem, WorkItemField};
