//! Users and the parameter bundles of the `user.*` methods

use crate::media::{Media, MediaField};
use crate::media_type::{MediaType, MediaTypeField};
use crate::params::{Query, SortOrder};
use crate::user_group::{UserGroup, UserGroupField, UserGroupRef};
use crate::wire::{opt_int_from_any, Ids, OneOrMany};
use serde::{Deserialize, Serialize};
use serde_json::Value;

wire_enum! {
    pub enum AutoLogin {
        Disabled = "0",
        Enabled = "1",
    }
}

wire_enum! {
    /// Frontend theme
    pub enum Theme {
        /// System default
        Default = "default",
        Blue = "blue-theme",
        Dark = "dark-theme",
    }
}

wire_enum! {
    pub enum UserType {
        User = "1",
        Admin = "2",
        Super = "3",
    }
}

wire_enum! {
    /// User fields, for `output`, `filter`, `search` and `sortfield`
    pub enum UserField {
        Extend = "extend",
        Userid = "userid",
        Alias = "alias",
        AttemptClock = "attempt_clock",
        AttemptFailed = "attempt_failed",
        AttemptIp = "attempt_ip",
        Autologin = "autologin",
        Autologout = "autologout",
        Lang = "lang",
        Name = "name",
        Refresh = "refresh",
        RowsPerPage = "rows_per_page",
        Surname = "surname",
        Theme = "theme",
        Type = "type",
        Url = "url",
    }
}

/// A user as returned by `user.get`
///
/// Only `userid` is guaranteed; other members depend on `output` and the
/// `select*` options of the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub userid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Unix time of the last failed login
    #[serde(default, deserialize_with = "opt_int_from_any", skip_serializing_if = "Option::is_none")]
    pub attempt_clock: Option<i64>,
    #[serde(default, deserialize_with = "opt_int_from_any", skip_serializing_if = "Option::is_none")]
    pub attempt_failed: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempt_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autologin: Option<AutoLogin>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autologout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows_per_page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<UserType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medias: Option<Vec<Media>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usrgrps: Option<Vec<UserGroup>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mediatypes: Option<Vec<MediaType>>,
}

/// `user.login` parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserLogin {
    pub user: String,
    pub password: String,
}

impl UserLogin {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }
}

/// `user.get` parameters
///
/// Defaults to `output: "extend"` and no other option. A scalar `userids`
/// asks for one user; a list, even of one id, asks for a collection.
///
/// ```rust
/// use zbxrpc_model::{UserField, UserGet};
///
/// let params = UserGet::by_id("1").filter(UserField::Alias, "Admin");
/// let value = serde_json::to_value(&params).unwrap();
/// assert_eq!(value["userids"], "1");
/// assert_eq!(value["filter"]["alias"], "Admin");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserGet {
    pub output: OneOrMany<UserField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub userids: Option<Ids>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usrgrpids: Option<Ids>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mediaids: Option<Ids>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mediatypeids: Option<Ids>,
    #[serde(rename = "selectMedias", skip_serializing_if = "Option::is_none")]
    pub select_medias: Option<OneOrMany<MediaField>>,
    #[serde(rename = "selectMediatypes", skip_serializing_if = "Option::is_none")]
    pub select_mediatypes: Option<OneOrMany<MediaTypeField>>,
    #[serde(rename = "selectUsrgrps", skip_serializing_if = "Option::is_none")]
    pub select_usrgrps: Option<OneOrMany<UserGroupField>>,
    #[serde(flatten)]
    pub query: Query<UserField>,
}

impl Default for UserGet {
    fn default() -> Self {
        Self {
            output: OneOrMany::One(UserField::Extend),
            userids: None,
            usrgrpids: None,
            mediaids: None,
            mediatypeids: None,
            select_medias: None,
            select_mediatypes: None,
            select_usrgrps: None,
            query: Query::default(),
        }
    }
}

impl UserGet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a single user
    pub fn by_id(userid: impl Into<String>) -> Self {
        Self {
            userids: Some(OneOrMany::One(userid.into())),
            ..Self::default()
        }
    }

    /// Look up a collection of users
    pub fn by_ids<I, S>(userids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            userids: Some(OneOrMany::Many(userids.into_iter().map(Into::into).collect())),
            ..Self::default()
        }
    }

    /// True when the request selects exactly one user by scalar id
    pub fn is_single(&self) -> bool {
        matches!(self.userids, Some(OneOrMany::One(_)))
    }

    pub fn output(mut self, fields: impl Into<OneOrMany<UserField>>) -> Self {
        self.output = fields.into();
        self
    }

    pub fn userids(mut self, ids: impl Into<Ids>) -> Self {
        self.userids = Some(ids.into());
        self
    }

    pub fn usrgrpids(mut self, ids: impl Into<Ids>) -> Self {
        self.usrgrpids = Some(ids.into());
        self
    }

    pub fn mediaids(mut self, ids: impl Into<Ids>) -> Self {
        self.mediaids = Some(ids.into());
        self
    }

    pub fn mediatypeids(mut self, ids: impl Into<Ids>) -> Self {
        self.mediatypeids = Some(ids.into());
        self
    }

    pub fn select_medias(mut self, fields: impl Into<OneOrMany<MediaField>>) -> Self {
        self.select_medias = Some(fields.into());
        self
    }

    pub fn select_mediatypes(mut self, fields: impl Into<OneOrMany<MediaTypeField>>) -> Self {
        self.select_mediatypes = Some(fields.into());
        self
    }

    pub fn select_usrgrps(mut self, fields: impl Into<OneOrMany<UserGroupField>>) -> Self {
        self.select_usrgrps = Some(fields.into());
        self
    }

    pub fn filter(mut self, field: UserField, value: impl Into<Value>) -> Self {
        self.query = self.query.filter(field, value);
        self
    }

    pub fn search(mut self, field: UserField, value: impl Into<Value>) -> Self {
        self.query = self.query.search(field, value);
        self
    }

    pub fn search_by_any(mut self, enabled: bool) -> Self {
        self.query = self.query.search_by_any(enabled);
        self
    }

    pub fn start_search(mut self, enabled: bool) -> Self {
        self.query = self.query.start_search(enabled);
        self
    }

    pub fn search_wildcards_enabled(mut self, enabled: bool) -> Self {
        self.query = self.query.search_wildcards_enabled(enabled);
        self
    }

    pub fn sort_by(mut self, field: impl Into<OneOrMany<UserField>>, order: SortOrder) -> Self {
        self.query = self.query.sort_by(field, order);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.query = self.query.limit(limit);
        self
    }
}

/// `user.create` parameters
///
/// Everything but alias, password and groups has the frontend's defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserCreate {
    pub alias: String,
    pub passwd: String,
    pub usrgrps: Vec<UserGroupRef>,
    pub url: String,
    pub user_medias: Vec<Media>,
    pub autologin: AutoLogin,
    pub autologout: String,
    pub lang: String,
    pub name: String,
    pub refresh: String,
    pub rows_per_page: String,
    pub surname: String,
    pub theme: Theme,
    #[serde(rename = "type")]
    pub kind: UserType,
}

impl UserCreate {
    /// `groups` may be [`UserGroup`]s or group ids
    pub fn new<I, G>(alias: impl Into<String>, passwd: impl Into<String>, groups: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: Into<UserGroupRef>,
    {
        Self {
            alias: alias.into(),
            passwd: passwd.into(),
            usrgrps: groups.into_iter().map(Into::into).collect(),
            url: String::new(),
            user_medias: Vec::new(),
            autologin: AutoLogin::Disabled,
            autologout: "15m".to_string(),
            lang: "en_GB".to_string(),
            name: String::new(),
            refresh: "30s".to_string(),
            rows_per_page: "50".to_string(),
            surname: String::new(),
            theme: Theme::Default,
            kind: UserType::User,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>, surname: impl Into<String>) -> Self {
        self.name = name.into();
        self.surname = surname.into();
        self
    }

    pub fn with_media(mut self, media: Media) -> Self {
        self.user_medias.push(media);
        self
    }

    pub fn with_type(mut self, kind: UserType) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_autologin(mut self, autologin: AutoLogin) -> Self {
        self.autologin = autologin;
        self
    }

    pub fn with_autologout(mut self, autologout: impl Into<String>) -> Self {
        self.autologout = autologout.into();
        self
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

/// `user.update` parameters
///
/// Only the members that are set are changed on the server.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserUpdate {
    pub userid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passwd: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usrgrps: Option<Vec<UserGroupRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_medias: Option<Vec<Media>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autologin: Option<AutoLogin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autologout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows_per_page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<UserType>,
}

impl UserUpdate {
    pub fn new(userid: impl Into<String>) -> Self {
        Self {
            userid: userid.into(),
            alias: None,
            passwd: None,
            usrgrps: None,
            user_medias: None,
            url: None,
            autologin: None,
            autologout: None,
            lang: None,
            name: None,
            refresh: None,
            rows_per_page: None,
            surname: None,
            theme: None,
            kind: None,
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn passwd(mut self, passwd: impl Into<String>) -> Self {
        self.passwd = Some(passwd.into());
        self
    }

    /// Replace the user's groups
    pub fn usrgrps<I, G>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: Into<UserGroupRef>,
    {
        self.usrgrps = Some(groups.into_iter().map(Into::into).collect());
        self
    }

    /// Replace the user's media; an empty list removes them all
    pub fn user_medias(mut self, medias: Vec<Media>) -> Self {
        self.user_medias = Some(medias);
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn autologin(mut self, autologin: AutoLogin) -> Self {
        self.autologin = Some(autologin);
        self
    }

    pub fn autologout(mut self, autologout: impl Into<String>) -> Self {
        self.autologout = Some(autologout.into());
        self
    }

    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn refresh(mut self, refresh: impl Into<String>) -> Self {
        self.refresh = Some(refresh.into());
        self
    }

    pub fn rows_per_page(mut self, rows: impl Into<String>) -> Self {
        self.rows_per_page = Some(rows.into());
        self
    }

    pub fn surname(mut self, surname: impl Into<String>) -> Self {
        self.surname = Some(surname.into());
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn kind(mut self, kind: UserType) -> Self {
        self.kind = Some(kind);
        self
    }
}

/// Result of `user.create`, `user.update` and `user.delete`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIds {
    pub userids: Vec<String>,
}
