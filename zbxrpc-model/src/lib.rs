//! Typed entities and parameter bundles of the Zabbix user API
//!
//! Every fixed vocabulary is a closed enumeration that serializes as its wire
//! value. Optional members are `Option`s skipped when unset, so `None` never
//! reaches the server while `Some("")`, `Some(0)` and `Some(vec![])` always do.
//!
//! ```rust
//! use zbxrpc_model::{Media, UserCreate, UserType};
//!
//! let params = UserCreate::new("jdoe", "s3cret", ["7"])
//!     .with_type(UserType::Admin)
//!     .with_media(Media::new("1", "jdoe@example.com"));
//!
//! let value = serde_json::to_value(&params).unwrap();
//! assert_eq!(value["type"], "2");
//! assert_eq!(value["usrgrps"][0]["usrgrpid"], "7");
//! ```

#[macro_use]
pub mod wire;

pub mod media;
pub mod media_type;
pub mod params;
pub mod user;
pub mod user_group;

pub use media::{Media, MediaField, MediaStatus};
pub use media_type::{
    ContentType, MediaType, MediaTypeField, MediaTypeKind, MediaTypeStatus, ProcessTags,
    ShowEventMenu, SmtpAuthentication, SmtpSecurity, SmtpVerifyHost, SmtpVerifyPeer,
    WebhookParameter,
};
pub use params::{Query, SortOrder};
pub use user::{AutoLogin, Theme, User, UserCreate, UserField, UserGet, UserIds, UserLogin, UserType, UserUpdate};
pub use user_group::{DebugMode, GuiAccess, UserGroup, UserGroupField, UserGroupRef, UsersStatus};
pub use wire::{Ids, OneOrMany, UnknownVariant};
