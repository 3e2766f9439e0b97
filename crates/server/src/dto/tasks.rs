//! # Task Data Transfer Objects

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::calendar::validate_date_key;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id:         String,
    pub user_id:    String,
    pub date:       String,
    pub title:      String,
    pub exp:        i32,
    pub completed:  bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<entity::tasks::Model> for TaskResponse {
    fn from(task: entity::tasks::Model) -> Self {
        Self {
            id:         task.id.to_string(),
            user_id:    task.user_id.to_string(),
            date:       task.date,
            title:      task.title,
            exp:        task.exp,
            completed:  task.completed,
            created_at: task.created_at.to_rfc3339(),
            updated_at: task.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: String,
    #[validate(range(min = 0, max = 100000, message = "Experience must be between 0 and 100000"))]
    pub exp:   i32,
    /// Defaults to today
    #[validate(custom(function = "validate_date_key"))]
    pub date:  Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ToggleTaskRequest {
    pub completed: bool,
}
