//! Persistence collaborator: an abstract namespaced key-value store.
//!
//! The engine assumes nothing about the storage engine beyond atomic
//! single-key reads and writes of a few value types. The host app supplies
//! the real backend; tests and single-process use get [`InMemoryPrefsStore`].

mod errors;
pub mod repository;

pub use errors::StoreError;
pub use repository::{InMemoryPrefsStore, PrefsStore};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Value types the key-value contract supports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PrefValue {
    Int(i64),
    Bool(bool),
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl PrefValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            PrefValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PrefValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PrefValue::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            PrefValue::Timestamp(v) => Some(*v),
            _ => None,
        }
    }
}
