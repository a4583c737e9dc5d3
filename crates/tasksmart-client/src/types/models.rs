/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Task and user models with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
[UPDATE]: Accept RFC 3339 timestamps as well as plain dates for dueDate
*/

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{Category, Priority};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_helpers::deserialize_due_date",
        serialize_with = "serde_helpers::serialize_due_date"
    )]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Due and not completed as of `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.due_date.is_some_and(|due| due < today)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_guest: bool,
}

pub(crate) mod serde_helpers {
    use chrono::{DateTime, NaiveDate};
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(date);
        }
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|timestamp| timestamp.date_naive())
    }

    pub fn deserialize_due_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::Null => Ok(None),
            Value::String(raw) if raw.trim().is_empty() => Ok(None),
            Value::String(raw) => parse_due_date(&raw)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid due date: {raw}"))),
            _ => Err(serde::de::Error::custom("invalid due date value")),
        }
    }

    pub fn serialize_due_date<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_str(&date.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_none(),
        }
    }
}

pub use serde_helpers::parse_due_date;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn task_deserializes_mongo_style_payload() {
        let value = json!({
            "_id": "665f1c",
            "title": "File taxes",
            "category": "Important",
            "priority": "High",
            "completed": false,
            "dueDate": "2024-04-15T00:00:00.000Z",
            "notes": "bring receipts",
            "createdAt": "2024-04-01T10:00:00Z"
        });

        let task: Task = serde_json::from_value(value).expect("task should deserialize");

        assert_eq!(task.id, "665f1c");
        assert_eq!(task.category, Category::Important);
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2024, 4, 15));
        assert_eq!(task.notes.as_deref(), Some("bring receipts"));
        assert!(task.updated_at.is_none());
    }

    #[test]
    fn task_defaults_missing_fields() {
        let task: Task = serde_json::from_value(json!({
            "id": "t-1",
            "title": "Water plants",
            "dueDate": null
        }))
        .expect("task should deserialize");

        assert_eq!(task.category, Category::Personal);
        assert_eq!(task.priority, Priority::Medium);
        assert!(!task.completed);
        assert!(task.due_date.is_none());
    }

    #[test]
    fn task_serializes_due_date_as_plain_date() {
        let task = Task {
            id: "t-2".to_string(),
            title: "Ship release".to_string(),
            category: Category::Work,
            priority: Priority::Low,
            completed: true,
            due_date: NaiveDate::from_ymd_opt(2024, 5, 1),
            notes: None,
            created_at: None,
            updated_at: None,
        };

        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["dueDate"], json!("2024-05-01"));
        assert!(value.get("notes").is_none());
    }

    #[test]
    fn overdue_ignores_completed_tasks() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let mut task: Task = serde_json::from_value(json!({
            "id": "t-3",
            "title": "Renew passport",
            "dueDate": "2024-05-20"
        }))
        .unwrap();

        assert!(task.is_overdue(today));
        task.completed = true;
        assert!(!task.is_overdue(today));
    }
}
