//! Error and result types for tree operations.

/// Error type for B+ tree operations.
///
/// Node overflow is not represented here: a full node triggers the internal
/// split path and is never surfaced to callers. Likewise an under-minimum
/// order is clamped at construction rather than reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Key not found in the tree.
    KeyNotFound,
    /// Internal data structure integrity violation.
    DataIntegrityError(String),
    /// Tree corruption detected.
    CorruptedTree(String),
}

impl TreeError {
    /// Create a DataIntegrityError with context
    pub fn data_integrity(context: &str, details: &str) -> Self {
        Self::DataIntegrityError(format!("{}: {}", context, details))
    }

    /// Create a CorruptedTree error with context
    pub fn corrupted_tree(component: &str, details: &str) -> Self {
        Self::CorruptedTree(format!("{} corruption: {}", component, details))
    }
}

impl std::fmt::Display for TreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreeError::KeyNotFound => write!(f, "Key not found in tree"),
            TreeError::DataIntegrityError(msg) => write!(f, "Data integrity error: {}", msg),
            TreeError::CorruptedTree(msg) => write!(f, "Corrupted tree: {}", msg),
        }
    }
}

impl std::error::Error for TreeError {}

/// Internal result type for tree operations
pub(crate) type TreeResult<T> = Result<T, TreeError>;

/// Result type for key lookup operations
pub type KeyResult<T> = Result<T, TreeError>;

/// Result type for tree modification operations
pub type ModifyResult<T> = Result<T, TreeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_context() {
        let err = TreeError::corrupted_tree("leaf chain", "broken back-link");
        assert_eq!(
            err.to_string(),
            "Corrupted tree: leaf chain corruption: broken back-link"
        );
        assert_eq!(TreeError::KeyNotFound.to_string(), "Key not found in tree");
    }
}
