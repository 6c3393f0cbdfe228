use super::IScheduleSnapshotRepo;
use std::sync::Mutex;
use study_planner_domain::ScheduleSnapshot;

pub struct InMemoryScheduleSnapshotRepo {
    snapshot: Mutex<Option<ScheduleSnapshot>>,
}

impl InMemoryScheduleSnapshotRepo {
    pub fn new() -> Self {
        Self {
            snapshot: Mutex::new(None),
        }
    }
}

#[async_trait::async_trait]
impl IScheduleSnapshotRepo for InMemoryScheduleSnapshotRepo {
    async fn set(&self, snapshot: &ScheduleSnapshot) -> anyhow::Result<()> {
        *self.snapshot.lock().unwrap() = Some(snapshot.clone());
        Ok(())
    }

    async fn get(&self) -> Option<ScheduleSnapshot> {
        self.snapshot.lock().unwrap().clone()
    }

    async fn clear(&self) -> anyhow::Result<()> {
        *self.snapshot.lock().unwrap() = None;
        Ok(())
    }
}
