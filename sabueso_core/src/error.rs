use thiserror::Error;

use crate::ids::NodeID;

/// A tag key that is not in the registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown component tag `{0}`")]
pub struct UnknownTag(pub String);

/// Result type alias for scan operations.
pub type ScanResult<T> = std::result::Result<T, ScanError>;

/// Errors a scan can surface. Both indicate caller contract violations;
/// neither is retriable.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error(transparent)]
    UnknownTag(#[from] UnknownTag),

    /// The ancestry walk ran out of parents before reaching the scan root,
    /// meaning the node was never a descendant of it. Fatal precondition
    /// failure in the caller, not a recoverable state.
    #[error("node {0} is not a descendant of the scan root")]
    OrphanedNode(NodeID),
}

/// Errors raised while loading or assembling a scene document.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("scene parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    UnknownTag(#[from] UnknownTag),

    #[error("node `{name}` references parent index {parent} out of {count} nodes")]
    BadParentIndex {
        name: String,
        parent: u32,
        count: usize,
    },

    #[error("node `{0}` is its own parent")]
    SelfParent(String),

    #[error("scene document has no parentless root node")]
    MissingRoot,

    #[error("scene document has multiple roots: `{0}` and `{1}`")]
    MultipleRoots(String, String),

    #[error("node `{0}` is not connected to the root")]
    Disconnected(String),
}

/// Errors raised by the preferences store.
#[derive(Error, Debug)]
pub enum PrefsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("prefs parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("prefs serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("no config directory available on this platform")]
    NoConfigDir,
}
