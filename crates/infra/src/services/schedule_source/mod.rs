use chrono::Weekday;
use reqwest::Client;
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;
use study_planner_domain::{ClassRecord, ClassTime, TaskRecord, ID};
use tracing::{error, warn};

/// Remote system of record for the user's classes and tasks
#[async_trait::async_trait]
pub trait IScheduleSource: Send + Sync {
    async fn fetch(&self, user_id: &str) -> anyhow::Result<(Vec<ClassRecord>, Vec<TaskRecord>)>;
}

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClassItem {
    id: Option<String>,
    name: String,
    #[serde(default)]
    days: Vec<String>,
    start_time: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskItem {
    id: Option<String>,
    name: String,
    due_date: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserScheduleResponse {
    #[serde(default)]
    classes: Vec<ClassItem>,
    #[serde(default)]
    tasks: Vec<TaskItem>,
}

pub struct RestScheduleSource {
    client: Client,
    url: String,
}

impl RestScheduleSource {
    pub fn new(url: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { client, url }
    }
}

fn parse_id(raw: Option<String>) -> ID {
    raw.and_then(|s| ID::from_str(&s).ok())
        .unwrap_or_default()
}

fn parse_days(raw: &[String]) -> Vec<Weekday> {
    raw.iter()
        .filter_map(|day| match Weekday::from_str(day) {
            Ok(weekday) => Some(weekday),
            Err(_) => {
                warn!("Schedule source returned unknown weekday: {}", day);
                None
            }
        })
        .collect()
}

impl From<ClassItem> for ClassRecord {
    fn from(item: ClassItem) -> Self {
        let start_time = item.start_time.as_deref().and_then(|raw| {
            ClassTime::from_str(raw)
                .map_err(|e| warn!("Schedule source returned bad start time: {}", e))
                .ok()
        });
        Self {
            id: parse_id(item.id),
            name: item.name,
            days: parse_days(&item.days),
            start_time,
        }
    }
}

impl From<TaskItem> for TaskRecord {
    fn from(item: TaskItem) -> Self {
        let due_ts = item.due_date.as_deref().and_then(|raw| {
            chrono::DateTime::parse_from_rfc3339(raw)
                .map(|dt| dt.timestamp_millis())
                .map_err(|e| warn!("Schedule source returned bad due date: {}", e))
                .ok()
        });
        Self {
            id: parse_id(item.id),
            name: item.name,
            due_ts,
        }
    }
}

#[async_trait::async_trait]
impl IScheduleSource for RestScheduleSource {
    async fn fetch(&self, user_id: &str) -> anyhow::Result<(Vec<ClassRecord>, Vec<TaskRecord>)> {
        let res = self
            .client
            .get(&format!("{}/users/{}/schedule", self.url, user_id))
            .send()
            .await
            .map_err(|e| {
                error!(
                    "[Network Error] Schedule source error. Error message: {:?}",
                    e
                );
                anyhow::Error::new(e)
            })?;

        if !res.status().is_success() {
            anyhow::bail!("Schedule source returned status: {}", res.status());
        }

        let body = res.json::<UserScheduleResponse>().await.map_err(|e| {
            error!(
                "[Unexpected Response] Schedule source error. Error message: {:?}",
                e
            );
            anyhow::Error::new(e)
        })?;

        let classes = body.classes.into_iter().map(|c| c.into()).collect();
        let tasks = body.tasks.into_iter().map(|t| t.into()).collect();
        Ok((classes, tasks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_class_item_with_unknown_days_dropped() {
        let item = ClassItem {
            id: None,
            name: "Algebra".into(),
            days: vec!["Monday".into(), "Funday".into(), "Wednesday".into()],
            start_time: Some("08:25".into()),
        };
        let class: ClassRecord = item.into();
        assert_eq!(class.days, vec![Weekday::Mon, Weekday::Wed]);
        assert_eq!(class.start_time, Some(ClassTime::new(8, 25).unwrap()));
    }

    #[test]
    fn maps_task_item_with_bad_due_date_to_none() {
        let item = TaskItem {
            id: None,
            name: "Essay".into(),
            due_date: Some("soonish".into()),
        };
        let task: TaskRecord = item.into();
        assert!(task.due_ts.is_none());
    }
}
