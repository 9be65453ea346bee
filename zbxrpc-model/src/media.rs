//! User media: where and when a user receives notifications

use crate::wire::{int_from_any, OneOrMany};
use serde::{Deserialize, Serialize};

wire_enum! {
    /// Whether a media entry is active
    pub enum MediaStatus {
        Enabled = "0",
        Disabled = "1",
    }
}

wire_enum! {
    /// Fields selectable through `selectMedias`
    pub enum MediaField {
        Mediaid = "mediaid",
        Mediatypeid = "mediatypeid",
        Sendto = "sendto",
        Active = "active",
        Severity = "severity",
        Period = "period",
        Extend = "extend",
    }
}

/// Severity bitmask enabling every trigger severity
pub const ALL_SEVERITIES: i64 = 63;

/// Default period: always
pub const ALWAYS: &str = "1-7,00:00-24:00";

/// A media entry of a user
///
/// `mediaid` and `userid` are only present on entries read back from the
/// server; they are never sent when creating a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mediaid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub userid: Option<String>,
    pub mediatypeid: String,
    /// Address, phone number or list of e-mail addresses
    pub sendto: OneOrMany<String>,
    pub active: MediaStatus,
    /// Bitmask of trigger severities to notify about
    #[serde(deserialize_with = "int_from_any")]
    pub severity: i64,
    /// Time period when notifications are sent
    pub period: String,
}

impl Media {
    /// An enabled media entry for all severities, at all times
    pub fn new(mediatypeid: impl Into<String>, sendto: impl Into<OneOrMany<String>>) -> Self {
        Self {
            mediaid: None,
            userid: None,
            mediatypeid: mediatypeid.into(),
            sendto: sendto.into(),
            active: MediaStatus::Enabled,
            severity: ALL_SEVERITIES,
            period: ALWAYS.to_string(),
        }
    }

    pub fn with_status(mut self, active: MediaStatus) -> Self {
        self.active = active;
        self
    }

    pub fn with_severity(mut self, severity: i64) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_period(mut self, period: impl Into<String>) -> Self {
        self.period = period.into();
        self
    }
}
