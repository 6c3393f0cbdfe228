use chrono_tz::Tz;
use study_planner_utils::create_random_secret;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// The user whose schedule this device tracks. Without it the
    /// sync and evaluation jobs are no-ops.
    pub user_id: Option<String>,
    /// Timezone in which class start times are interpreted
    pub timezone: Tz,
    /// Postgres connection string. Absent means in-memory storage.
    pub database_url: Option<String>,
    /// Base url of the remote schedule document store
    pub schedule_api_url: Option<String>,
    /// Url of the hosted LLM chat endpoint
    pub llm_api_url: Option<String>,
    /// Url of the dialogue-management endpoint handling slash commands
    pub dialogue_api_url: Option<String>,
    /// Base url of the push-scheduling service
    pub push_api_url: Option<String>,
    /// Api key sent to the push-scheduling service
    pub push_api_key: Option<String>,
    /// Url notified when a reminder fires locally
    pub notify_webhook_url: Option<String>,
    /// Key header attached to webhook notifications so the receiver
    /// can verify the sender
    pub notify_webhook_key: String,
    /// Override for the reminder evaluation interval in seconds
    pub evaluate_interval_secs: Option<u64>,
    /// Override for the schedule sync interval in seconds
    pub sync_interval_secs: Option<u64>,
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn env_interval_secs(name: &str) -> Option<u64> {
    let value = env_var(name)?;
    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Some(secs),
        _ => {
            warn!("The given {}: {} is not a valid interval, ignoring it.", name, value);
            None
        }
    }
}

impl Config {
    pub fn new() -> Self {
        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or_else(|_| default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<usize>().unwrap()
            }
        };

        let timezone = match env_var("PLANNER_TIMEZONE") {
            Some(tz) => match tz.parse::<Tz>() {
                Ok(tz) => tz,
                Err(_) => {
                    warn!("The given PLANNER_TIMEZONE: {} is not valid, falling back to UTC.", tz);
                    chrono_tz::UTC
                }
            },
            None => chrono_tz::UTC,
        };

        let notify_webhook_key = match env_var("NOTIFY_WEBHOOK_KEY") {
            Some(key) => key,
            None => {
                info!("Did not find NOTIFY_WEBHOOK_KEY environment variable. Going to create one.");
                create_random_secret(16)
            }
        };

        Self {
            port,
            user_id: env_var("PLANNER_USER_ID"),
            timezone,
            database_url: env_var("DATABASE_URL"),
            schedule_api_url: env_var("SCHEDULE_API_URL"),
            llm_api_url: env_var("LLM_API_URL"),
            dialogue_api_url: env_var("DIALOGUE_API_URL"),
            push_api_url: env_var("PUSH_API_URL"),
            push_api_key: env_var("PUSH_API_KEY"),
            notify_webhook_url: env_var("NOTIFY_WEBHOOK_URL"),
            notify_webhook_key,
            evaluate_interval_secs: env_interval_secs("EVALUATE_INTERVAL_SECS"),
            sync_interval_secs: env_interval_secs("SYNC_INTERVAL_SECS"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
