//! Media types: notification delivery channels

use crate::wire::opt_int_from_any;
use serde::{Deserialize, Serialize};

wire_enum! {
    /// Transport of a media type
    pub enum MediaTypeKind {
        Email = "0",
        Script = "1",
        Sms = "2",
        Webhook = "4",
    }
}

wire_enum! {
    pub enum SmtpSecurity {
        None = "0",
        StartTls = "1",
        SslTls = "2",
    }
}

wire_enum! {
    pub enum SmtpVerifyHost {
        No = "0",
        Yes = "1",
    }
}

wire_enum! {
    pub enum SmtpVerifyPeer {
        No = "0",
        Yes = "1",
    }
}

wire_enum! {
    pub enum SmtpAuthentication {
        None = "0",
        /// Username and password
        Normal = "1",
    }
}

wire_enum! {
    pub enum MediaTypeStatus {
        Enabled = "0",
        Disabled = "1",
    }
}

wire_enum! {
    /// Message format of e-mail media types
    pub enum ContentType {
        Plain = "0",
        Html = "1",
    }
}

wire_enum! {
    /// Whether a webhook response may set event tags
    pub enum ProcessTags {
        Ignore = "0",
        Process = "1",
    }
}

wire_enum! {
    pub enum ShowEventMenu {
        No = "0",
        Yes = "1",
    }
}

wire_enum! {
    /// Fields selectable through `selectMediatypes`
    pub enum MediaTypeField {
        Mediatypeid = "mediatypeid",
        Name = "name",
        Type = "type",
        Status = "status",
        Description = "description",
        Extend = "extend",
    }
}

/// A named webhook input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookParameter {
    pub name: String,
    pub value: String,
}

impl WebhookParameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A media type as returned by the server
///
/// Which settings are populated depends on [`MediaTypeKind`]: SMTP settings
/// for e-mail, `exec_path` for scripts, `gsm_modem` for SMS, `script` and
/// `parameters` for webhooks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    pub mediatypeid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<MediaTypeKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<MediaTypeStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exec_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exec_params: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gsm_modem: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp_server: Option<String>,
    #[serde(default, deserialize_with = "opt_int_from_any", skip_serializing_if = "Option::is_none")]
    pub smtp_port: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp_helo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp_security: Option<SmtpSecurity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp_verify_host: Option<SmtpVerifyHost>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp_verify_peer: Option<SmtpVerifyPeer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp_authentication: Option<SmtpAuthentication>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passwd: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxsessions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxattempts: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempt_interval: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_tags: Option<ProcessTags>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_event_menu: Option<ShowEventMenu>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_menu_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_menu_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<WebhookParameter>>,
}

impl MediaType {
    /// A media type with only its id set
    pub fn new(mediatypeid: impl Into<String>) -> Self {
        Self {
            mediatypeid: mediatypeid.into(),
            name: None,
            kind: None,
            status: None,
            description: None,
            exec_path: None,
            exec_params: None,
            gsm_modem: None,
            smtp_server: None,
            smtp_port: None,
            smtp_helo: None,
            smtp_email: None,
            smtp_security: None,
            smtp_verify_host: None,
            smtp_verify_peer: None,
            smtp_authentication: None,
            username: None,
            passwd: None,
            content_type: None,
            maxsessions: None,
            maxattempts: None,
            attempt_interval: None,
            script: None,
            timeout: None,
            process_tags: None,
            show_event_menu: None,
            event_menu_url: None,
            event_menu_name: None,
            parameters: None,
        }
    }

    pub fn is_webhook(&self) -> bool {
        self.kind == Some(MediaTypeKind::Webhook)
    }
}
