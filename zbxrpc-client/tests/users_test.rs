//! User API integration tests

mod common;

use common::MockZabbix;
use serde_json::json;
use zbxrpc_client::Lookup;
use zbxrpc_core::Error;
use zbxrpc_model::{
    Media, MediaStatus, Theme, UserCreate, UserField, UserGet, UserGroup, UserType, UserUpdate,
};

#[tokio::test]
async fn test_get_single_user() {
    let zabbix = MockZabbix::new();
    let mut client = zabbix.client();
    client.connect().await.unwrap();

    match client.get_users(UserGet::by_id("1")).await.unwrap() {
        Lookup::One(Some(user)) => {
            assert_eq!(user.userid, "1");
            assert_eq!(user.alias.as_deref(), Some("Admin"));
            assert_eq!(user.kind, Some(UserType::Super));
        }
        other => panic!("Expected a single user, got {:?}", other),
    }

    let request = zabbix.last_request("user.get").unwrap();
    assert_eq!(request["params"], json!({"output": "extend", "userids": "1"}));
    client.disconnect().await.unwrap();
}

#[tokio::test]
async fn test_get_missing_user_is_not_found() {
    let zabbix = MockZabbix::new();
    let mut client = zabbix.client();
    client.connect().await.unwrap();

    let lookup = client.get_users(UserGet::by_id("404")).await.unwrap();
    assert!(lookup.is_not_found());
    assert_eq!(client.get_user("404").await.unwrap(), None);
    client.disconnect().await.unwrap();
}

#[tokio::test]
async fn test_list_of_one_id_is_a_collection() {
    let zabbix = MockZabbix::new();
    let mut client = zabbix.client();
    client.connect().await.unwrap();

    let lookup = client.get_users(UserGet::by_ids(["1"])).await.unwrap();
    match lookup {
        Lookup::Many(users) => assert_eq!(users.len(), 1),
        other => panic!("Expected a collection, got {:?}", other),
    }

    let lookup = client.get_users(UserGet::by_ids(["404"])).await.unwrap();
    assert_eq!(lookup, Lookup::Many(Vec::new()));
    client.disconnect().await.unwrap();
}

#[tokio::test]
async fn test_get_without_filter_is_a_collection() {
    let zabbix = MockZabbix::new();
    let mut client = zabbix.client();
    client.connect().await.unwrap();

    let lookup = client.get_users(None).await.unwrap();
    assert!(matches!(lookup, Lookup::Many(ref users) if users.len() == 1));

    let request = zabbix.last_request("user.get").unwrap();
    assert_eq!(request["params"], json!({"output": "extend"}));
    client.disconnect().await.unwrap();
}

#[tokio::test]
async fn test_get_with_filter() {
    let zabbix = MockZabbix::new();
    let mut client = zabbix.client();
    client.connect().await.unwrap();

    client
        .create_user(&UserCreate::new("jdoe", "s3cret", ["7"]))
        .await
        .unwrap();

    let users = client
        .get_users(UserGet::new().filter(UserField::Alias, "jdoe"))
        .await
        .unwrap()
        .into_vec();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].alias.as_deref(), Some("jdoe"));

    let request = zabbix.last_request("user.get").unwrap();
    assert_eq!(request["params"]["filter"], json!({"alias": "jdoe"}));
    client.disconnect().await.unwrap();
}

#[tokio::test]
async fn test_create_user_returns_populated_user() {
    let zabbix = MockZabbix::new();
    let mut client = zabbix.client();
    client.connect().await.unwrap();

    let params = UserCreate::new("jdoe", "s3cret", vec![UserGroup::new("7")])
        .with_name("John", "Doe")
        .with_type(UserType::Admin)
        .with_media(Media::new("1", "jdoe@example.com"));
    let user = client.create_user(&params).await.unwrap();

    assert_eq!(user.userid, "2");
    assert_eq!(user.alias.as_deref(), Some("jdoe"));
    assert_eq!(user.name.as_deref(), Some("John"));
    assert_eq!(user.kind, Some(UserType::Admin));
    assert_eq!(user.theme, Some(Theme::Default));
    assert_eq!(user.autologout.as_deref(), Some("15m"));

    let create = zabbix.last_request("user.create").unwrap();
    assert_eq!(create["params"]["usrgrps"], json!([{"usrgrpid": "7"}]));
    assert_eq!(create["params"]["user_medias"][0]["severity"], 63);
    assert_eq!(create["params"]["surname"], "Doe");

    let lookup = zabbix.last_request("user.get").unwrap();
    assert_eq!(lookup["params"]["userids"], "2");
    client.disconnect().await.unwrap();
}

#[tokio::test]
async fn test_create_duplicate_alias() {
    let zabbix = MockZabbix::new();
    let mut client = zabbix.client();
    client.connect().await.unwrap();

    let err = client
        .create_user(&UserCreate::new("Admin", "pw", ["7"]))
        .await
        .unwrap_err();

    match err {
        Error::InvalidParams(record) => {
            assert_eq!(record.code, -32602);
            assert!(record.detail().contains("already exists"));
        }
        other => panic!("Expected InvalidParams, got {:?}", other),
    }
    assert_eq!(zabbix.user_count(), 1);
    client.disconnect().await.unwrap();
}

#[tokio::test]
async fn test_symbolic_and_wire_enums_send_identical_params() {
    let zabbix = MockZabbix::new();
    let mut client = zabbix.client();
    client.connect().await.unwrap();

    let symbolic = UserCreate::new("a", "pw", ["7"])
        .with_type(UserType::Super)
        .with_media(Media::new("1", "a@example.com").with_status(MediaStatus::Disabled));
    client.create_user(&symbolic).await.unwrap();
    let first = zabbix.last_request("user.create").unwrap();

    let wire = UserCreate::new("b", "pw", ["7"])
        .with_type("3".parse().unwrap())
        .with_media(Media::new("1", "a@example.com").with_status("1".parse().unwrap()));
    client.create_user(&wire).await.unwrap();
    let second = zabbix.last_request("user.create").unwrap();

    assert_eq!(first["params"]["type"], second["params"]["type"]);
    assert_eq!(first["params"]["user_medias"], second["params"]["user_medias"]);
    client.disconnect().await.unwrap();
}

#[tokio::test]
async fn test_update_user() {
    let zabbix = MockZabbix::new();
    let mut client = zabbix.client();
    client.connect().await.unwrap();

    let created = client
        .create_user(&UserCreate::new("jdoe", "s3cret", ["7"]))
        .await
        .unwrap();

    let updated = client
        .update_user(&UserUpdate::new(&created.userid).surname("").theme(Theme::Dark))
        .await
        .unwrap();

    assert_eq!(updated.userid, created.userid);
    assert_eq!(updated.theme, Some(Theme::Dark));
    assert_eq!(updated.surname.as_deref(), Some(""));

    let request = zabbix.last_request("user.update").unwrap();
    assert_eq!(
        request["params"],
        json!({"userid": created.userid, "surname": "", "theme": "dark-theme"})
    );
    client.disconnect().await.unwrap();
}

#[tokio::test]
async fn test_update_missing_user() {
    let zabbix = MockZabbix::new();
    let mut client = zabbix.client();
    client.connect().await.unwrap();

    let result = client.update_user(&UserUpdate::new("404").name("x")).await;
    assert!(matches!(result, Err(Error::InvalidParams(_))));
    client.disconnect().await.unwrap();
}

#[tokio::test]
async fn test_mutation_not_readable_is_missing_entity() {
    let zabbix = MockZabbix::new();
    zabbix.set_response("user.create", json!({"jsonrpc": "2.0", "result": {"userids": ["77"]}, "id": "1"}));
    let mut client = zabbix.client();
    client.connect().await.unwrap();

    let err = client
        .create_user(&UserCreate::new("ghost", "pw", ["7"]))
        .await
        .unwrap_err();

    match err {
        Error::MissingEntity { kind, id } => {
            assert_eq!(kind, "user");
            assert_eq!(id, "77");
        }
        other => panic!("Expected MissingEntity, got {:?}", other),
    }
    client.disconnect().await.unwrap();
}

#[tokio::test]
async fn test_delete_single_and_list_send_identical_params() {
    let zabbix = MockZabbix::new();
    let mut client = zabbix.client();
    client.connect().await.unwrap();

    let a = client.create_user(&UserCreate::new("a", "pw", ["7"])).await.unwrap();
    let b = client.create_user(&UserCreate::new("b", "pw", ["7"])).await.unwrap();

    let deleted = client.delete_user(a.userid.as_str()).await.unwrap();
    assert_eq!(deleted, vec![a.userid.clone()]);
    let single = zabbix.last_request("user.delete").unwrap();

    let deleted = client.delete_user(vec![b.userid.clone()]).await.unwrap();
    assert_eq!(deleted, vec![b.userid.clone()]);
    let list = zabbix.last_request("user.delete").unwrap();

    assert_eq!(single["params"], json!([a.userid]));
    assert_eq!(list["params"], json!([b.userid]));
    assert!(single["params"].is_array() && list["params"].is_array());
    assert_eq!(zabbix.user_count(), 1);
    client.disconnect().await.unwrap();
}

#[tokio::test]
async fn test_delete_missing_user() {
    let zabbix = MockZabbix::new();
    let mut client = zabbix.client();
    client.connect().await.unwrap();

    let err = client.delete_user(vec!["1", "404"]).await.unwrap_err();
    assert_eq!(err.code(), Some(-32602));
    assert_eq!(zabbix.user_count(), 1);
    client.disconnect().await.unwrap();
}
