//! Confirmation messages for operations without a resource to show.

use std::fmt;

/// One-line outcome of an operation such as activating or deleting a plan.
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
}

impl OperationStatus {
    pub fn success(message: String) -> Self {
        Self {
            message,
            success: true,
        }
    }

    pub fn failure(message: String) -> Self {
        Self {
            message,
            success: false,
        }
    }

    /// Success or failure depending on `found`, for lookups that report a
    /// missing target as `false`.
    pub fn found_or(found: bool, success: String, not_found: String) -> Self {
        if found {
            Self::success(success)
        } else {
            Self::failure(not_found)
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.success { "Success:" } else { "Error:" };
        writeln!(f, "{prefix} {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_found_or_picks_message() {
        let hit = OperationStatus::found_or(true, "activated".into(), "missing".into());
        assert!(hit.success);
        assert_eq!(hit.to_string(), "Success: activated\n");

        let miss = OperationStatus::found_or(false, "activated".into(), "missing".into());
        assert!(!miss.success);
        assert_eq!(miss.to_string(), "Error: missing\n");
    }
}
