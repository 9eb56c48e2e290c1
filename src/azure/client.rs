use crate::azure::WorkTracker;
use crate::config::AzureSettings;
use crate::model::{Error, Iteration, RawWorkItem, Result, WorkItem, WorkItemField};
use itertools::Itertools;
use log::debug;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

const API_VERSION: &str = "7.0";

#[derive(Debug, Deserialize)]
struct ValueList<T> {
    value: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct Project {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WiqlResult {
    work_items: Vec<WorkItemReference>,
}

#[derive(Debug, Deserialize)]
struct WorkItemReference {
    id: u64,
}

/// Azure DevOps REST client scoped to one organization, project and team.
#[derive(Debug, Clone)]
pub struct AzureClient {
    http: Client,
    base_url: Url,
    organization: String,
    project: String,
    team: String,
    pat: String,
    probe_timeout: Duration,
    request_timeout: Option<Duration>,
}

impl AzureClient {
    pub fn new(settings: &AzureSettings) -> Result<Self> {
        let base_url = Url::parse(&settings.base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| Error::BaseUrl(settings.base_url.clone()))?;
        debug!(
            "Azure client for organization `{}`, project `{}`, team `{}` (PAT of {} chars)",
            settings.organization,
            settings.project,
            settings.team,
            settings.pat.len()
        );
        Ok(Self {
            http: Client::new(),
            base_url,
            organization: settings.organization.clone(),
            project: settings.project.clone(),
            team: settings.team.clone(),
            pat: settings.pat.clone(),
            probe_timeout: settings.probe_timeout,
            request_timeout: settings.request_timeout,
        })
    }

    /// Lists the organization's projects with the probe timeout, proving the
    /// PAT and organization name are usable.
    pub async fn probe(&self) -> Result<Vec<String>> {
        let url = self.endpoint(&[self.organization.as_str(), "_apis", "projects"]);
        let request = self.http.get(url.clone()).timeout(self.probe_timeout);
        let projects: ValueList<Project> = self.send(url, request).await?;
        Ok(projects
            .value
            .into_iter()
            .map(|project| project.name.unwrap_or_else(|| "Unknown".to_string()))
            .collect())
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.query_pairs_mut().append_pair("api-version", API_VERSION);
        url
    }

    fn iterations_endpoint(&self, tail: &[&str]) -> Url {
        let head = [
            self.organization.as_str(),
            self.project.as_str(),
            self.team.as_str(),
            "_apis",
            "work",
            "teamsettings",
            "iterations",
        ];
        self.endpoint(&[&head[..], tail].concat())
    }

    fn with_timeout(&self, request: RequestBuilder) -> RequestBuilder {
        match self.request_timeout {
            Some(timeout) => request.timeout(timeout),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(&self, url: Url, request: RequestBuilder) -> Result<T> {
        debug!("Requesting {url}");
        let response = request
            .basic_auth("", Some(&self.pat))
            .send()
            .await
            .map_err(|source| Error::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        debug!("Response status {status} from {url}");
        let body = response.text().await.map_err(|source| Error::Http {
            url: url.to_string(),
            source,
        })?;
        if !status.is_success() {
            debug!("Response body: {body}");
            return Err(Error::Status {
                url: url.to_string(),
                status,
            });
        }
        serde_json::from_str(&body).map_err(|source| Error::Payload {
            url: url.to_string(),
            source,
        })
    }
}

impl WorkTracker for AzureClient {
    async fn list_iterations(&self) -> Result<Vec<Iteration>> {
        let url = self.iterations_endpoint(&[]);
        let request = self.with_timeout(self.http.get(url.clone()));
        let iterations: ValueList<Iteration> = self.send(url, request).await?;
        debug!("Found {} iterations", iterations.value.len());
        for iteration in &iterations.value {
            debug!("  - {} ({})", iteration.name, iteration.path);
        }
        Ok(iterations.value)
    }

    async fn get_capacities(&self, iteration_id: &str) -> Result<Value> {
        let url = self.iterations_endpoint(&[iteration_id, "capacities"]);
        let request = self.with_timeout(self.http.get(url.clone()));
        self.send(url, request).await
    }

    async fn query_work_item_ids(
        &self,
        iteration_path: &str,
        work_item_type: &str,
    ) -> Result<Vec<u64>> {
        let url = self.endpoint(&[
            self.organization.as_str(),
            self.project.as_str(),
            "_apis",
            "wit",
            "wiql",
        ]);
        let query = wiql_query(iteration_path, work_item_type);
        debug!("WIQL query: {query}");
        let request = self.with_timeout(self.http.post(url.clone()).json(&json!({ "query": query })));
        let result: WiqlResult = self.send(url, request).await?;
        Ok(result.work_items.into_iter().map(|item| item.id).collect())
    }

    async fn fetch_work_item_fields(
        &self,
        ids: &[u64],
        fields: &[WorkItemField],
    ) -> Result<Vec<WorkItem>> {
        let mut url = self.endpoint(&[
            self.organization.as_str(),
            self.project.as_str(),
            "_apis",
            "wit",
            "workitems",
        ]);
        url.query_pairs_mut()
            .append_pair("ids", &ids.iter().join(","))
            .append_pair(
                "fields",
                &fields.iter().map(WorkItemField::reference_name).join(","),
            );
        let request = self.with_timeout(self.http.get(url.clone()));
        let items: ValueList<RawWorkItem> = self.send(url, request).await?;
        Ok(items.value.into_iter().map(WorkItem::from).collect())
    }
}

fn wiql_query(iteration_path: &str, work_item_type: &str) -> String {
    let quote = |value: &str| value.replace('\'', "''");
    format!(
        "SELECT [System.Id] FROM WorkItems \
         WHERE [System.IterationPath] = '{}' AND [System.WorkItemType] = '{}'",
        quote(iteration_path),
        quote(work_item_type)
    )
}
