use serde::{Deserialize, Serialize};
use study_planner_domain::{ClassRecord, ScheduleSnapshot, TaskRecord, ID};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ClassRecordDTO {
    pub id: ID,
    pub name: String,
    pub days: Vec<String>,
    pub start_time: Option<String>,
}

impl ClassRecordDTO {
    pub fn new(class: ClassRecord) -> Self {
        Self {
            id: class.id.clone(),
            name: class.name.clone(),
            days: class.days.iter().map(|d| d.to_string()).collect(),
            start_time: class.start_time.map(|t| t.to_string()),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecordDTO {
    pub id: ID,
    pub name: String,
    pub due_ts: Option<i64>,
}

impl TaskRecordDTO {
    pub fn new(task: TaskRecord) -> Self {
        Self {
            id: task.id.clone(),
            name: task.name,
            due_ts: task.due_ts,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSnapshotDTO {
    pub user_id: String,
    pub classes: Vec<ClassRecordDTO>,
    pub tasks: Vec<TaskRecordDTO>,
    pub last_updated: i64,
}

impl ScheduleSnapshotDTO {
    pub fn new(snapshot: ScheduleSnapshot) -> Self {
        Self {
            user_id: snapshot.user_id,
            classes: snapshot.classes.into_iter().map(ClassRecordDTO::new).collect(),
            tasks: snapshot.tasks.into_iter().map(TaskRecordDTO::new).collect(),
            last_updated: snapshot.last_updated,
        }
    }
}
