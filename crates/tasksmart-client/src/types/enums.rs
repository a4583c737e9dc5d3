/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Task category and priority enums with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use std::fmt;

use serde::{Deserialize, Serialize};

/// Task category.
///
/// The backend stores categories as free-form strings; anything outside the
/// three built-in names round-trips through `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Personal,
    Work,
    Important,
    Other(String),
}

/// Categories shown in summaries, in display order.
pub const DEFAULT_CATEGORIES: [Category; 3] =
    [Category::Personal, Category::Work, Category::Important];

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Personal => "Personal",
            Category::Work => "Work",
            Category::Important => "Important",
            Category::Other(name) => name.as_str(),
        }
    }

    pub fn is_default(&self) -> bool {
        !matches!(self, Category::Other(_))
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Personal
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "personal" => Category::Personal,
            "work" => Category::Work,
            "important" => Category::Important,
            _ => Category::Other(value),
        }
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Category::from(value.to_string())
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        match value {
            Category::Other(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "High", alias = "high")]
    High,
    #[serde(rename = "Medium", alias = "medium")]
    Medium,
    #[serde(rename = "Low", alias = "low")]
    Low,
}

/// Priorities in display order.
pub const PRIORITIES: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_known_names_case_insensitively() {
        assert_eq!(Category::from("work"), Category::Work);
        assert_eq!(Category::from(" IMPORTANT "), Category::Important);
        assert_eq!(
            Category::from("Errands"),
            Category::Other("Errands".to_string())
        );
    }

    #[test]
    fn category_serializes_as_display_string() {
        let value = serde_json::to_value(Category::Personal).unwrap();
        assert_eq!(value, serde_json::json!("Personal"));

        let other: Category = serde_json::from_value(serde_json::json!("Groceries")).unwrap();
        assert_eq!(other.as_str(), "Groceries");
        assert!(!other.is_default());
    }

    #[test]
    fn priority_accepts_lowercase() {
        let priority: Priority = serde_json::from_str("\"high\"").unwrap();
        assert_eq!(priority, Priority::High);
        assert_eq!(serde_json::to_string(&Priority::Low).unwrap(), "\"Low\"");
    }
}
