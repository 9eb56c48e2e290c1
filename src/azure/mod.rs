pub mod batch;
pub mod client;
#[cfg(test)]
pub mod fake;

use crate::model::{Iteration, Result, WorkItem, WorkItemField};
use serde_json::Value;

pub use client::AzureClient;

/// Queries the sprint analysis needs from the work-tracking service.
pub trait WorkTracker {
    /// Iterations visible to the configured team.
    async fn list_iterations(&self) -> Result<Vec<Iteration>>;

    /// Raw capacities payload of one iteration, in any of the shapes
    /// `MemberCapacity::from_payload` understands.
    async fn get_capacities(&self, iteration_id: &str) -> Result<Value>;

    async fn query_work_item_ids(
        &self,
        iteration_path: &str,
        work_item_type: &str,
    ) -> Result<Vec<u64>>;

    /// Fetches `fields` for at most [`batch::WORK_ITEM_BATCH_SIZE`] ids.
    async fn fetch_work_item_fields(
        &self,
        ids: &[u64],
        fields: &[WorkItemField],
    ) -> Result<Vec<WorkItem>>;
}
