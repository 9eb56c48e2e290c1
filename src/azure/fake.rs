use crate::azure::WorkTracker;
use crate::model::{Error, Iteration, Result, WorkItem, WorkItemField};
use reqwest::StatusCode;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory tracker for analysis tests. Records every work item batch it serves.
#[derive(Debug, Default)]
pub struct FakeTracker {
    pub iterations: Vec<Iteration>,
    pub capacities: HashMap<String, Value>,
    pub work_item_ids: HashMap<String, Vec<u64>>,
    pub work_items: HashMap<u64, WorkItem>,
    /// Zero-based index of the batch call that answers with a server error.
    pub failing_batch: Option<usize>,
    pub batches: RefCell<Vec<(usize, Vec<WorkItemField>)>>,
}

impl FakeTracker {
    pub fn with_sprint(
        mut self,
        name: &str,
        capacities: Value,
        work_items: Vec<WorkItem>,
    ) -> Self {
        let id = format!("id-{name}");
        let path = format!("Project\\{name}");
        self.iterations.push(Iteration {
            id: id.clone(),
            name: name.to_string(),
            path: path.clone(),
            attributes: Default::default(),
        });
        self.capacities.insert(id, capacities);
        self.work_item_ids
            .insert(path, work_items.iter().map(|item| item.id).collect());
        self.work_items
            .extend(work_items.into_iter().map(|item| (item.id, item)));
        self
    }

    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batches.borrow().iter().map(|(size, _)| *size).collect()
    }

    fn server_error(url: &str) -> Error {
        Error::Status {
            url: url.to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl WorkTracker for FakeTracker {
    async fn list_iterations(&self) -> Result<Vec<Iteration>> {
        Ok(self.iterations.clone())
    }

    async fn get_capacities(&self, iteration_id: &str) -> Result<Value> {
        self.capacities
            .get(iteration_id)
            .cloned()
            .ok_or_else(|| Self::server_error("capacities"))
    }

    async fn query_work_item_ids(
        &self,
        iteration_path: &str,
        _work_item_type: &str,
    ) -> Result<Vec<u64>> {
        Ok(self
            .work_item_ids
            .get(iteration_path)
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_work_item_fields(
        &self,
        ids: &[u64],
        fields: &[WorkItemField],
    ) -> Result<Vec<WorkItem>> {
        let call = {
            let mut batches = self.batches.borrow_mut();
            batches.push((ids.len(), fields.to_vec()));
            batches.len() - 1
        };
        if self.failing_batch == Some(call) {
            return Err(Self::server_error("workitems"));
        }
        Ok(ids
            .iter()
            .filter_map(|id| self.work_items.get(id))
            .cloned()
            .collect())
    }
}
