//! User management example
//!
//! Creates a user with an e-mail media, updates it, then deletes it again,
//! exporting traces and metrics to an OTLP collector.
//!
//! Run with:
//! ZABBIX_URL=http://localhost/zabbix ZABBIX_USER=Admin ZABBIX_PASSWORD=zabbix \
//!     cargo run --example manage_user -- <usrgrpid>

use zbxrpc::core::ObservabilityConfig;
use zbxrpc::model::{Media, Theme, UserCreate, UserType, UserUpdate};
use zbxrpc::{ClientBuilder, Error};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let group = std::env::args().nth(1).unwrap_or_else(|| "7".to_string());

    let otel_config = ObservabilityConfig::new("zbxrpc-manage-user")
        .with_endpoint("http://localhost:4317")
        .with_log_level("zbxrpc_client=debug,info");

    let mut client = ClientBuilder::from_env()?
        .with_observability(otel_config)
        .connect()
        .await?;

    let params = UserCreate::new("demo.user", "Demo-pass-123", [group.as_str()])
        .with_name("Demo", "User")
        .with_type(UserType::User)
        .with_media(Media::new("1", "demo.user@example.com").with_severity(0b111000));

    let user = match client.create_user(&params).await {
        Ok(user) => user,
        Err(Error::InvalidParams(record)) => {
            eprintln!("Rejected: {}", record.detail());
            client.disconnect().await?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    println!("Created user {} ({:?})", user.userid, user.alias);

    let user = client
        .update_user(&UserUpdate::new(&user.userid).theme(Theme::Dark).autologout("1h"))
        .await?;
    println!("Theme is now {:?}", user.theme);

    let deleted = client.delete_user(user.userid.as_str()).await?;
    println!("Deleted {:?}", deleted);

    client.disconnect().await?;
    zbxrpc::core::shutdown_observability();

    // Give time for telemetry to flush
    tokio::time::sleep(tokio::time::Duration::from_secs(2)).await;
    Ok(())
}
