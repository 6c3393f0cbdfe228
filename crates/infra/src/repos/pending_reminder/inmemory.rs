use super::IPendingReminderRepo;
use std::collections::HashMap;
use std::sync::Mutex;
use study_planner_domain::PendingReminder;

pub struct InMemoryPendingReminderRepo {
    reminders: Mutex<HashMap<String, PendingReminder>>,
}

impl InMemoryPendingReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait::async_trait]
impl IPendingReminderRepo for InMemoryPendingReminderRepo {
    async fn upsert(&self, reminder: &PendingReminder) -> anyhow::Result<()> {
        self.reminders
            .lock()
            .unwrap()
            .insert(reminder.key.clone(), reminder.clone());
        Ok(())
    }

    async fn find(&self, key: &str) -> Option<PendingReminder> {
        self.reminders.lock().unwrap().get(key).cloned()
    }

    async fn find_all(&self) -> Vec<PendingReminder> {
        self.reminders.lock().unwrap().values().cloned().collect()
    }

    async fn delete(&self, key: &str) -> anyhow::Result<()> {
        self.reminders.lock().unwrap().remove(key);
        Ok(())
    }

    async fn delete_all_before(&self, before: i64) -> Vec<PendingReminder> {
        let mut reminders = self.reminders.lock().unwrap();
        let due_keys: Vec<String> = reminders
            .values()
            .filter(|r| r.fire_at <= before)
            .map(|r| r.key.clone())
            .collect();
        due_keys
            .into_iter()
            .filter_map(|key| reminders.remove(&key))
            .collect()
    }
}
