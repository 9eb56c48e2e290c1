use crate::azure::WorkTracker;
use crate::model::{Result, WorkItem, WorkItemField};
use log::debug;

/// Largest id list the work-item endpoint accepts in one call.
pub const WORK_ITEM_BATCH_SIZE: usize = 200;

/// Fetches `fields` for every id, one call per batch, in order. The first
/// failing batch aborts the whole fetch.
pub async fn fetch_work_items<T: WorkTracker>(
    tracker: &T,
    ids: &[u64],
    fields: &[WorkItemField],
) -> Result<Vec<WorkItem>> {
    let mut work_items = Vec::with_capacity(ids.len());
    for (index, chunk) in ids.chunks(WORK_ITEM_BATCH_SIZE).enumerate() {
        debug!("Fetching work item batch #{} ({} ids)", index + 1, chunk.len());
        work_items.extend(tracker.fetch_work_item_fields(chunk, fields).await?);
    }
    Ok(work_items)
}
