mod config;
mod dispatcher;
mod repos;
mod services;
mod system;

pub use config::Config;
pub use dispatcher::NotificationDispatcher;
pub use repos::{IPendingReminderRepo, IScheduleSnapshotRepo, Repos};
pub use services::*;
use std::sync::Arc;
pub use system::{ISys, RealSys};
use study_planner_domain::PlatformCapabilities;
use tracing::{info, warn};

#[derive(Clone)]
pub struct PlannerContext {
    pub repos: Repos,
    pub services: Services,
    pub dispatcher: Arc<NotificationDispatcher>,
    pub capabilities: PlatformCapabilities,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

impl PlannerContext {
    pub fn new(
        repos: Repos,
        services: Services,
        capabilities: PlatformCapabilities,
        config: Config,
        sys: Arc<dyn ISys>,
    ) -> Self {
        let dispatcher = Arc::new(NotificationDispatcher::new(
            services.push.clone(),
            services.notifier.clone(),
            repos.pending_reminders.clone(),
            capabilities,
            config.timezone,
            sys.clone(),
        ));
        Self {
            repos,
            services,
            dispatcher,
            capabilities,
            config,
            sys,
        }
    }

    /// Context without external collaborators, used by tests
    pub fn create_inmemory() -> Self {
        Self::new(
            Repos::create_inmemory(),
            Services::noop(),
            PlatformCapabilities::polling_only(),
            Config::new(),
            Arc::new(RealSys {}),
        )
    }
}

/// Will setup the infrastructure context given the environment.
///
/// A missing or unreachable database is not fatal: the planner then
/// runs without durable reminder storage, which only costs recovery
/// of reminders across restarts.
pub async fn setup_context() -> PlannerContext {
    let config = Config::new();
    let repos = match &config.database_url {
        Some(connection_string) => match Repos::create_postgres(connection_string).await {
            Ok(repos) => repos,
            Err(e) => {
                warn!(
                    "Unable to connect to postgres, reminders will not survive restarts: {:?}",
                    e
                );
                Repos::create_inmemory()
            }
        },
        None => {
            info!("DATABASE_URL not set, using in-memory storage");
            Repos::create_inmemory()
        }
    };
    let services = Services::from_config(&config);
    let capabilities = EnvCapabilityDetector::new(services.push.is_some()).detect();
    PlannerContext::new(repos, services, capabilities, config, Arc::new(RealSys {}))
}
