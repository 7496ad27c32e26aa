// View filter for the task list

use crate::task::Task;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which tasks a view shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    /// Whether `task` passes this filter
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !task.completed(),
            Filter::Completed => task.completed(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Completed => "completed",
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Filter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "active" => Ok(Filter::Active),
            "completed" => Ok(Filter::Completed),
            other => Err(format!(
                "Unknown filter: {} (expected all, active or completed)",
                other
            )),
        }
    }
}

impl TryFrom<String> for Filter {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskId;

    #[test]
    fn test_filter_matches() {
        let open = Task::new(TaskId::new(1), "a".to_string(), false);
        let done = Task::new(TaskId::new(2), "b".to_string(), true);

        assert!(Filter::All.matches(&open));
        assert!(Filter::All.matches(&done));
        assert!(Filter::Active.matches(&open));
        assert!(!Filter::Active.matches(&done));
        assert!(!Filter::Completed.matches(&open));
        assert!(Filter::Completed.matches(&done));
    }

    #[test]
    fn test_filter_from_str() {
        assert_eq!("all".parse::<Filter>(), Ok(Filter::All));
        assert_eq!("Active".parse::<Filter>(), Ok(Filter::Active));
        assert_eq!(" completed ".parse::<Filter>(), Ok(Filter::Completed));
        assert!("done".parse::<Filter>().is_err());
    }

    #[test]
    fn test_filter_default_and_display() {
        assert_eq!(Filter::default(), Filter::All);
        assert_eq!(Filter::Completed.to_string(), "completed");
    }

    #[test]
    fn test_filter_serialization() {
        let json = serde_json::to_string(&Filter::Active).unwrap();
        assert_eq!(json, "\"active\"");
    }

    #[test]
    fn test_filter_deserialization_matches_from_str() {
        for raw in ["all", "Active", "COMPLETED", " active "] {
            let json = serde_json::to_string(raw).unwrap();
            let parsed: Filter = serde_json::from_str(&json).unwrap();
            assert_eq!(Ok(parsed), raw.parse::<Filter>());
        }
        assert!(serde_json::from_str::<Filter>("\"done\"").is_err());
    }
}
