use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("missing setting `{0}`, set it in the config file, `.env` or the environment")]
    MissingCredential(&'static str),

    #[error("invalid config file `{path}`: {source}")]
    Config {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid env file `{path}`: {source}")]
    DotEnv {
        path: String,
        #[source]
        source: dotenvy::Error,
    },

    #[error("invalid base url `{0}`")]
    BaseUrl(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("request to `{url}` failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("`{url}` answered with status {status}")]
    Status { url: String, status: StatusCode },

    #[error("malformed response from `{url}`: {source}")]
    Payload {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("sprint `{0}` not found")]
    IterationNotFound(String),

    #[error("invalid sprint selector `{0}`, expected a number like `51` or a range of at most 100 sprints like `50-55`")]
    SprintSelector(String),

    #[error("basic connectivity failed, check the PAT and the organization name ({0})")]
    Connectivity(String),

    #[error("could not render report: {0}")]
    Report(String),
}
