//! List users example
//!
//! Reads the connection settings from the environment and prints every user
//! with their groups, inside a scoped session.
//!
//! Run with:
//! ZABBIX_URL=http://localhost/zabbix ZABBIX_USER=Admin ZABBIX_PASSWORD=zabbix \
//!     cargo run --example list_users

use futures::FutureExt;
use zbxrpc::model::{SortOrder, UserField, UserGet, UserGroupField};
use zbxrpc::ClientBuilder;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut client = ClientBuilder::from_env()?.build()?;

    let (version, users) = client
        .scoped(|zabbix| {
            async move {
                let version = zabbix.version().await?;
                let params = UserGet::new()
                    .select_usrgrps(UserGroupField::Name)
                    .sort_by(UserField::Alias, SortOrder::Asc);
                let users = zabbix.get_users(params).await?.into_vec();
                Ok::<_, zbxrpc::Error>((version, users))
            }
            .boxed()
        })
        .await?;

    println!("Zabbix API {}", version);
    for user in users {
        let groups: Vec<String> = user
            .usrgrps
            .unwrap_or_default()
            .into_iter()
            .filter_map(|g| g.name)
            .collect();
        println!(
            "{:>6}  {:<20} {}",
            user.userid,
            user.alias.unwrap_or_default(),
            groups.join(", ")
        );
    }

    Ok(())
}
