//! Domain models with validation at construction

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Todo record as read from the `todos` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Todo {
    pub id: i32,
    pub task: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Validation error for user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validated task text: present and non-empty, kept exactly as submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskText(String);

impl TaskText {
    /// Validate the raw `task` form field.
    ///
    /// # Example
    /// ```
    /// use todoctl_server::models::TaskText;
    ///
    /// assert_eq!(TaskText::parse(Some("  Buy milk ")).unwrap().as_str(), "  Buy milk ");
    /// assert!(TaskText::parse(Some("")).is_err());
    /// assert!(TaskText::parse(None).is_err());
    /// ```
    pub fn parse(raw: Option<&str>) -> Result<Self, ValidationError> {
        match raw {
            Some(task) if !task.is_empty() => Ok(Self(task.to_owned())),
            _ => Err(ValidationError::Empty { field: "task" }),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for TaskText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
