use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::select_server::haversine::Coordinates;

pub const DEFAULT_PORT: i32 = 51820;
pub const DEFAULT_CONFIG_TYPE: &str = "amnezia";
pub const DEFAULT_SSH_PORT: i32 = 22;
pub const DEFAULT_MAX_USERS: i32 = 100;

/// One row of `vpn_servers`.
///
/// Columns a query does not project (`config_data`, the timestamps) come back as
/// `None` and are left out of the JSON output.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct ServerRecord {
    pub id: i32,
    pub name: String,
    pub country: String,
    pub city: Option<String>,
    pub ip_address: String,
    pub port: i32,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_data: Option<String>,
    pub config_type: String,
    pub is_active: bool,
    pub ping_ms: Option<i32>,
    pub bandwidth_mbps: Option<i32>,
    pub current_users: i32,
    pub max_users: i32,
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ServerRecord {
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates::new(latitude, longitude)),
            _ => None,
        }
    }

    /// Active, under capacity and located.
    pub fn is_selectable(&self) -> bool {
        self.is_active && self.current_users < self.max_users && self.coordinates().is_some()
    }
}

/// Body of a registry create call. Every field is optional on the wire; the
/// required columns are left for the database to reject.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewServer {
    pub name: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub ip_address: Option<String>,
    pub port: Option<i32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub config_type: Option<String>,
    pub config_data: Option<String>,
    pub ssh_host: Option<String>,
    pub ssh_port: Option<i32>,
    pub ssh_user: Option<String>,
    pub ping_ms: Option<i32>,
    pub bandwidth_mbps: Option<i32>,
    pub max_users: Option<i32>,
}

impl NewServer {
    pub fn port(&self) -> i32 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn config_type(&self) -> &str {
        self.config_type.as_deref().unwrap_or(DEFAULT_CONFIG_TYPE)
    }

    pub fn ssh_port(&self) -> i32 {
        self.ssh_port.unwrap_or(DEFAULT_SSH_PORT)
    }

    pub fn max_users(&self) -> i32 {
        self.max_users.unwrap_or(DEFAULT_MAX_USERS)
    }
}

/// Identifying fields echoed back after an insert.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct CreatedServer {
    pub id: i32,
    pub name: String,
    pub country: String,
    pub ip_address: String,
}
