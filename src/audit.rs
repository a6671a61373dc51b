/// Audit trail for account events
///
/// Registration and login outcomes are written as structured tracing
/// events. Entries never contain passwords or tokens.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditStatus {
    Success,
    Failure,
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize)]
pub struct AuditLog {
    pub log_id: String,
    pub timestamp: DateTime<Utc>,
    /// REGISTER, LOGIN, ...
    pub action: String,
    pub status: AuditStatus,
    pub message: String,
    pub request_id: Option<String>,
    pub user_id: Option<i64>,
}

impl AuditLog {
    pub fn new(action: impl Into<String>, status: AuditStatus, message: impl Into<String>) -> Self {
        Self {
            log_id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            action: action.into(),
            status,
            message: message.into(),
            request_id: None,
            user_id: None,
        }
    }

    pub fn success(action: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(action, AuditStatus::Success, message)
    }

    pub fn failure(action: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(action, AuditStatus::Failure, message)
    }

    pub fn with_request_id(mut self, request_id: &str) -> Self {
        self.request_id = Some(request_id.to_string());
        self
    }

    pub fn with_user_id(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }
}

pub struct AuditLogger;

impl AuditLogger {
    pub fn log(audit_log: &AuditLog) {
        match audit_log.status {
            AuditStatus::Failure => {
                tracing::warn!(
                    log_id = %audit_log.log_id,
                    action = %audit_log.action,
                    request_id = ?audit_log.request_id,
                    user_id = ?audit_log.user_id,
                    status = "FAILURE",
                    message = %audit_log.message,
                    "Audit log entry"
                );
            }
            AuditStatus::Success => {
                tracing::info!(
                    log_id = %audit_log.log_id,
                    action = %audit_log.action,
                    request_id = ?audit_log.request_id,
                    user_id = ?audit_log.user_id,
                    status = "SUCCESS",
                    message = %audit_log.message,
                    "Audit log entry"
                );
            }
        }
    }
}
