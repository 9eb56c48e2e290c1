use crate::analyze::SprintSnapshot;
use crate::azure::batch::fetch_work_items;
use crate::azure::WorkTracker;
use crate::model::{Iteration, MemberCapacity, Result, WorkItemField};
use indicatif::ProgressBar;
use log::{info, warn};

/// Fetches everything one sprint's analysis needs. Any failure is contained
/// here: it is reported on `pb` and the sprint continues as an empty snapshot.
pub async fn collect_sprint<T: WorkTracker>(
    tracker: &T,
    label: &str,
    work_item_type: &str,
    fields: &[WorkItemField],
    pb: &ProgressBar,
) -> SprintSnapshot {
    match try_collect_sprint(tracker, label, work_item_type, fields, pb).await {
        Ok(snapshot) => {
            pb.finish_with_message(format!(
                "✅ {label}: {} members, {} work items",
                snapshot.members.len(),
                snapshot.work_items.len()
            ));
            snapshot
        }
        Err(e) => {
            warn!("{label} could not be analyzed: {e}");
            pb.finish_with_message(format!("❌ {label} could not be analyzed: {e}"));
            SprintSnapshot::empty(label)
        }
    }
}

async fn try_collect_sprint<T: WorkTracker>(
    tracker: &T,
    label: &str,
    work_item_type: &str,
    fields: &[WorkItemField],
    pb: &ProgressBar,
) -> Result<SprintSnapshot> {
    pb.set_message(format!("Resolving {label} ..."));
    let iteration = Iteration::resolve(tracker.list_iterations().await?, label)?;
    info!("{label} found, path: {}", iteration.path);

    pb.set_message(format!("Fetching {label} capacity ..."));
    let payload = tracker.get_capacities(&iteration.id).await?;
    let members = MemberCapacity::from_payload(&payload);

    pb.set_message(format!("Fetching {label} work item list ..."));
    let ids = tracker
        .query_work_item_ids(&iteration.path, work_item_type)
        .await?;

    pb.set_message(format!("Fetching {label} planned work ({} items) ...", ids.len()));
    let work_items = fetch_work_items(tracker, &ids, fields).await?;

    Ok(SprintSnapshot {
        label: label.to_string(),
        iteration: Some(iteration),
        members,
        work_items,
    })
}
