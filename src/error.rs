use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum PatchError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} is not valid JSON", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("expected a JSON object at the top level, found {found}")]
    NotAnObject { found: &'static str },
    #[error("missing key `{key}`")]
    MissingScripts { key: &'static str },
    #[error("`{key}` must be an object, found {found}")]
    ScriptsNotObject {
        key: &'static str,
        found: &'static str,
    },
    #[error(transparent)]
    Serialize(serde_json::Error),
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, PatchError>;
