//! User groups

use serde::{Deserialize, Serialize};

wire_enum! {
    pub enum DebugMode {
        Disabled = "0",
        Enabled = "1",
    }
}

wire_enum! {
    /// Whether the members of a group are enabled
    pub enum UsersStatus {
        Enabled = "0",
        Disabled = "1",
    }
}

wire_enum! {
    /// Frontend authentication method of a group's members
    pub enum GuiAccess {
        /// System default authentication
        Default = "0",
        Internal = "1",
        Ldap = "2",
        /// No frontend access
        Disable = "3",
    }
}

wire_enum! {
    /// Fields selectable through `selectUsrgrps`
    pub enum UserGroupField {
        Usrgrpid = "usrgrpid",
        Name = "name",
        DebugMode = "debug_mode",
        GuiAccess = "gui_access",
        UsersStatus = "users_status",
        Extend = "extend",
    }
}

/// A user group as returned by the server
///
/// Only `usrgrpid` is guaranteed; the rest depends on the selected fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserGroup {
    pub usrgrpid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_mode: Option<DebugMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gui_access: Option<GuiAccess>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users_status: Option<UsersStatus>,
}

impl UserGroup {
    pub fn new(usrgrpid: impl Into<String>) -> Self {
        Self {
            usrgrpid: usrgrpid.into(),
            name: None,
            debug_mode: None,
            gui_access: None,
            users_status: None,
        }
    }
}

/// Group membership as sent in user mutations: `{"usrgrpid": id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserGroupRef {
    pub usrgrpid: String,
}

impl From<&UserGroup> for UserGroupRef {
    fn from(group: &UserGroup) -> Self {
        Self {
            usrgrpid: group.usrgrpid.clone(),
        }
    }
}

impl From<UserGroup> for UserGroupRef {
    fn from(group: UserGroup) -> Self {
        Self {
            usrgrpid: group.usrgrpid,
        }
    }
}

impl From<&str> for UserGroupRef {
    fn from(usrgrpid: &str) -> Self {
        Self {
            usrgrpid: usrgrpid.to_string(),
        }
    }
}

impl From<String> for UserGroupRef {
    fn from(usrgrpid: String) -> Self {
        Self { usrgrpid }
    }
}
