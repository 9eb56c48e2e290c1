use crate::model::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://dev.azure.com";
const PAT_PLACEHOLDER: &str = "YOUR_PAT_HERE";
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Config file as written on disk, every field optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub azure: AzureSection,
    pub analysis: AnalysisSection,
    pub output: OutputSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AzureSection {
    pub organization: Option<String>,
    pub project: Option<String>,
    pub team: Option<String>,
    pub pat: Option<String>,
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AnalysisSection {
    pub default_sprint: Option<String>,
    pub working_days: Option<u32>,
    pub debug: Option<bool>,
    pub work_item_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub max_projects_display: Option<usize>,
    pub sprint_column_width: Option<usize>,
    pub activity_column_width: Option<usize>,
    pub numeric_column_width: Option<usize>,
    pub resource_need_column_width: Option<usize>,
    pub member_column_width: Option<usize>,
    pub color: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub azure: AzureSettings,
    pub analysis: AnalysisSettings,
    pub output: OutputSettings,
}

#[derive(Debug, Clone)]
pub struct AzureSettings {
    pub organization: String,
    pub project: String,
    pub team: String,
    pub pat: String,
    pub base_url: String,
    pub probe_timeout: Duration,
    /// `None` leaves calls after the probe without a timeout.
    pub request_timeout: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct AnalysisSettings {
    pub default_sprint: String,
    pub working_days: u32,
    pub debug: bool,
    pub work_item_type: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputSettings {
    pub max_projects_display: usize,
    pub sprint_column_width: usize,
    pub activity_column_width: usize,
    pub numeric_column_width: usize,
    pub resource_need_column_width: usize,
    pub member_column_width: usize,
    pub color: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        OutputSection::default().resolve(&HashMap::new())
    }
}

// Load
impl Settings {
    /// Reads `path` (missing file means defaults), the `.env` next to it and
    /// the process environment, which wins over the file.
    pub fn load(path: &Path) -> Result<Self> {
        load_dotenv(&path.with_file_name(".env"))?;

        let file = match fs::read_to_string(path) {
            Ok(content) => FileConfig::parse(&content, path)?,
            Err(e) if e.kind() == ErrorKind::NotFound => FileConfig::default(),
            Err(e) => return Err(e.into()),
        };
        let env: HashMap<String, String> = std::env::vars().collect();
        file.resolve(&env)
    }
}

/// Exports the variables of an env file. Already exported variables are kept,
/// a missing file is fine.
fn load_dotenv(path: &Path) -> Result<()> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(()),
        Err(dotenvy::Error::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(source) => Err(Error::DotEnv {
            path: path.display().to_string(),
            source,
        }),
    }
}

impl FileConfig {
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|source| Error::Config {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn resolve(self, env: &HashMap<String, String>) -> Result<Settings> {
        Ok(Settings {
            azure: self.azure.resolve(env)?,
            analysis: self.analysis.resolve(),
            output: self.output.resolve(env),
        })
    }
}

impl AzureSection {
    fn resolve(self, env: &HashMap<String, String>) -> Result<AzureSettings> {
        let pick = |var: &str, file: Option<String>| {
            env.get(var)
                .cloned()
                .or(file)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let organization = pick("AZURE_ORGANIZATION", self.organization)
            .ok_or(Error::MissingCredential("organization"))?;
        let project =
            pick("AZURE_PROJECT", self.project).ok_or(Error::MissingCredential("project"))?;
        let team = pick("AZURE_TEAM", self.team).ok_or(Error::MissingCredential("team"))?;
        let pat = pick("AZURE_PAT", self.pat)
            .filter(|pat| pat != PAT_PLACEHOLDER)
            .ok_or(Error::MissingCredential("pat"))?;
        let base_url = pick("AZURE_BASE_URL", self.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(AzureSettings {
            organization,
            project,
            team,
            pat,
            base_url,
            probe_timeout: PROBE_TIMEOUT,
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        })
    }
}

impl AnalysisSection {
    fn resolve(self) -> AnalysisSettings {
        AnalysisSettings {
            default_sprint: self.default_sprint.unwrap_or_else(|| "51".to_string()),
            working_days: self.working_days.unwrap_or(9),
            debug: self.debug.unwrap_or(false),
            work_item_type: self.work_item_type.unwrap_or_else(|| "Task".to_string()),
        }
    }
}

impl OutputSection {
    /// A non-empty `NO_COLOR` switches highlighting off whatever the file says.
    fn resolve(self, env: &HashMap<String, String>) -> OutputSettings {
        let no_color = env.get("NO_COLOR").is_some_and(|value| !value.is_empty());
        OutputSettings {
            max_projects_display: self.max_projects_display.unwrap_or(10),
            sprint_column_width: self.sprint_column_width.unwrap_or(15),
            activity_column_width: self.activity_column_width.unwrap_or(20),
            numeric_column_width: self.numeric_column_width.unwrap_or(20),
            resource_need_column_width: self.resource_need_column_width.unwrap_or(20),
            member_column_width: self.member_column_width.unwrap_or(25),
            color: self.color.unwrap_or(true) && !no_color,
        }
    }
}
