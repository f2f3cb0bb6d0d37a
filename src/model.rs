use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;

// Data model representing a task item in the Tasks table
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub username: String,
    pub task_id: String,
    pub task: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

// Registered account row from the Users table. The password field holds the
// salted hash; the type has no Serialize impl so it can never end up in a
// response body.
#[derive(Debug, Clone)]
pub struct User {
    pub username: String,
    pub password: String,
}

impl Task {
    // Tasks are returned to the client exactly as stored: string attributes
    // that are missing or mistyped render as empty, `completed` is only set
    // once the toggle route has written a boolean.
    pub fn from_item(item: &HashMap<String, AttributeValue>) -> Self {
        Self {
            username: string_attr(item, "username"),
            task_id: string_attr(item, "taskId"),
            task: string_attr(item, "task"),
            completed: item.get("completed").and_then(|v| v.as_bool().ok()).copied(),
        }
    }
}

impl User {
    pub fn from_item(item: &HashMap<String, AttributeValue>) -> Option<Self> {
        Some(Self {
            username: item.get("username")?.as_s().ok()?.clone(),
            password: item.get("password")?.as_s().ok()?.clone(),
        })
    }
}

fn string_attr(item: &HashMap<String, AttributeValue>, key: &str) -> String {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .cloned()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(entries: &[(&str, AttributeValue)]) -> HashMap<String, AttributeValue> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.clone()))
            .collect()
    }

    #[test]
    fn test_should_map_full_task_item() {
        let item = item(&[
            ("username", AttributeValue::S("alice".to_owned())),
            ("taskId", AttributeValue::S("1700000000000".to_owned())),
            ("task", AttributeValue::S("buy milk".to_owned())),
            ("completed", AttributeValue::Bool(true)),
        ]);

        let task = Task::from_item(&item);
        assert_eq!(
            task,
            Task {
                username: "alice".to_owned(),
                task_id: "1700000000000".to_owned(),
                task: "buy milk".to_owned(),
                completed: Some(true),
            }
        );
    }

    #[test]
    fn test_should_map_task_item_without_completed() {
        let item = item(&[
            ("username", AttributeValue::S("alice".to_owned())),
            ("taskId", AttributeValue::S("1".to_owned())),
            ("task", AttributeValue::S("water plants".to_owned())),
        ]);

        let task = Task::from_item(&item);
        assert_eq!(task.completed, None);
        assert_eq!(task.task, "water plants");
    }

    #[test]
    fn test_should_default_missing_task_attributes_to_empty() {
        let item = item(&[("username", AttributeValue::S("bob".to_owned()))]);

        let task = Task::from_item(&item);
        assert_eq!(task.username, "bob");
        assert_eq!(task.task_id, "");
        assert_eq!(task.task, "");
        assert_eq!(task.completed, None);
    }

    #[test]
    fn test_should_serialize_task_id_as_camel_case() {
        let task = Task {
            username: "alice".to_owned(),
            task_id: "1700000000000".to_owned(),
            task: "buy milk".to_owned(),
            completed: None,
        };

        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["taskId"], "1700000000000");
        assert!(value.get("task_id").is_none());
        // Untoggled tasks carry no completed key at all.
        assert!(value.get("completed").is_none());
    }

    #[test]
    fn test_should_serialize_completed_when_set() {
        let task = Task {
            username: "alice".to_owned(),
            task_id: "2".to_owned(),
            task: "call mom".to_owned(),
            completed: Some(false),
        };

        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["completed"], false);
    }

    #[test]
    fn test_should_map_user_item() {
        let item = item(&[
            ("username", AttributeValue::S("alice".to_owned())),
            ("password", AttributeValue::S("$argon2id$stub".to_owned())),
        ]);

        let user = User::from_item(&item).unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.password, "$argon2id$stub");
    }

    #[test]
    fn test_should_reject_user_item_missing_password() {
        let item = item(&[("username", AttributeValue::S("alice".to_owned()))]);
        assert!(User::from_item(&item).is_none());
    }
}
