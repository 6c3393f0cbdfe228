use crate::dtos::ScheduleSnapshotDTO;
use serde::{Deserialize, Serialize};
use study_planner_domain::ScheduleSnapshot;

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSnapshotResponse {
    pub schedule: ScheduleSnapshotDTO,
}

impl ScheduleSnapshotResponse {
    pub fn new(snapshot: ScheduleSnapshot) -> Self {
        Self {
            schedule: ScheduleSnapshotDTO::new(snapshot),
        }
    }
}

pub mod get_schedule {
    use super::*;

    pub type APIResponse = ScheduleSnapshotResponse;
}

pub mod sync_schedule {
    use super::*;

    pub type APIResponse = ScheduleSnapshotResponse;
}
