use crate::auth::util::{parse_jwt_algorithms, parse_jwt_key};
use anyhow::{anyhow, Context};
use jsonwebtoken::{Algorithm, DecodingKey};
use std::{net::SocketAddr, time::Duration};
use strum::EnumString;

///
/// Storage used by the notification ledger
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Ledger {
    Memory,
    Mongodb,
}

pub struct ApplicationEnv {
    pub log_directory: String,
    pub log_filename: String,

    pub bind_address: SocketAddr,

    pub ledger: Ledger,
    /// Required when ledger is [Ledger::Mongodb]
    pub db_connection_string: Option<String>,
    pub db_name: Option<String>,

    pub max_http_content_len: usize,

    /// Algorithms must belong to the same family
    pub jwt_algorithms: Vec<Algorithm>,
    pub jwt_key: DecodingKey,

    pub delivery_channel_capacity: usize,

    pub websocket_ping_interval: Duration,
    pub websocket_connection_buffer_size: usize,
    pub websocket_max_task_subscriptions: usize,
}

impl ApplicationEnv {
    pub fn parse() -> anyhow::Result<Self> {
        let log_directory = Self::env_var("TASK_NOTIFIER_LOG_DIRECTORY")?;
        let log_filename = Self::env_var("TASK_NOTIFIER_LOG_FILENAME")?;
        let bind_address = Self::env_var("TASK_NOTIFIER_BIND_ADDRESS")?.parse()?;
        let ledger = Self::env_var("TASK_NOTIFIER_LEDGER")?
            .parse()
            .context("TASK_NOTIFIER_LEDGER must be one of: memory, mongodb")?;
        let db_connection_string = Self::optional_env_var("TASK_NOTIFIER_DB_CONNECTION_STRING");
        let db_name = Self::optional_env_var("TASK_NOTIFIER_DB_NAME");
        if ledger == Ledger::Mongodb && (db_connection_string.is_none() || db_name.is_none()) {
            return Err(anyhow!(
                "TASK_NOTIFIER_DB_CONNECTION_STRING and TASK_NOTIFIER_DB_NAME are required by mongodb ledger"
            ));
        }
        let max_http_content_len = Self::env_var("TASK_NOTIFIER_MAX_HTTP_CONTENT_LEN")?.parse()?;
        let jwt_algorithms = parse_jwt_algorithms(Self::env_var("TASK_NOTIFIER_JWT_ALGORITHMS")?)?;
        let jwt_algorithm = jwt_algorithms.first().ok_or(anyhow!(
            "TASK_NOTIFIER_JWT_ALGORITHMS need to contain at least one algorithm"
        ))?;
        let jwt_key = parse_jwt_key(jwt_algorithm, Self::env_var("TASK_NOTIFIER_JWT_KEY")?)?;
        let delivery_channel_capacity = Self::parse_non_zero(
            "TASK_NOTIFIER_DELIVERY_CHANNEL_CAPACITY",
            Self::env_var("TASK_NOTIFIER_DELIVERY_CHANNEL_CAPACITY")?,
        )?;
        let websocket_ping_interval =
            Self::env_var("TASK_NOTIFIER_WEBSOCKET_PING_INTERVAL")?.parse()?;
        let websocket_ping_interval = Duration::from_secs(websocket_ping_interval);
        let websocket_connection_buffer_size = Self::parse_non_zero(
            "TASK_NOTIFIER_WEBSOCKET_CONNECTION_BUFFER_SIZE",
            Self::env_var("TASK_NOTIFIER_WEBSOCKET_CONNECTION_BUFFER_SIZE")?,
        )?;
        let websocket_max_task_subscriptions =
            Self::env_var("TASK_NOTIFIER_WEBSOCKET_MAX_TASK_SUBSCRIPTIONS")?.parse()?;

        Ok(Self {
            log_directory,
            log_filename,
            bind_address,
            ledger,
            db_connection_string,
            db_name,
            max_http_content_len,
            jwt_algorithms,
            jwt_key,
            delivery_channel_capacity,
            websocket_ping_interval,
            websocket_connection_buffer_size,
            websocket_max_task_subscriptions,
        })
    }

    fn env_var(name: &'static str) -> anyhow::Result<String> {
        std::env::var(name).map_err(|_| anyhow!("environment variable {name} not set"))
    }

    fn parse_non_zero(name: &'static str, value: String) -> anyhow::Result<usize> {
        let value: usize = value
            .parse()
            .with_context(|| format!("{name} must be a positive integer"))?;
        if value == 0 {
            return Err(anyhow!("{name} must be greater than 0"));
        }

        Ok(value)
    }

    fn optional_env_var(name: &'static str) -> Option<String> {
        std::env::var(name).ok().filter(|value| !value.is_empty())
    }
}
