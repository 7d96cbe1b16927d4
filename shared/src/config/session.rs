//! Session persistence configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where and under which key the current user is persisted
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Key of the durable slot holding the current account
    #[serde(default = "default_slot_key")]
    pub slot_key: String,

    /// File backing the key-value session store
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            slot_key: default_slot_key(),
            store_path: default_store_path(),
        }
    }
}

impl SessionConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            slot_key: std::env::var("SESSION_SLOT_KEY").unwrap_or_else(|_| default_slot_key()),
            store_path: std::env::var("SESSION_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_store_path()),
        }
    }
}

fn default_slot_key() -> String {
    String::from("currentUser")
}

fn default_store_path() -> PathBuf {
    PathBuf::from("data/session.json")
}
