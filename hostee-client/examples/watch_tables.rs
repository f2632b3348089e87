// hostee-client/examples/watch_tables.rs
// 示例 - 登录并实时查看桌台状态
//
// With HOSTEE_API_KEY / HOSTEE_PROJECT_ID (and HOSTEE_EMAIL / HOSTEE_PASSWORD)
// set, watches the hosted tables. Otherwise runs against the in-memory
// backend with a few simulated updates.

use std::time::Duration;

use hostee_client::logging::init_logger;
use hostee_client::{
    ClientConfig, DashboardHeader, FeedState, HosteeClient, LoginForm, MemoryBackend,
    RegistrationForm, TableStatusView,
};
use serde_json::json;

fn render(view: &TableStatusView) {
    match view.state() {
        FeedState::Connecting => println!("Conectando..."),
        FeedState::Disconnected { reason } => println!("Sin conexión ({reason})"),
        FeedState::Closed => println!("Cerrado"),
        FeedState::Live => {}
    }
    for (id, table) in view.sorted() {
        println!(
            "  {:<8} {:<8} {:<10} {}",
            id,
            table.title(),
            table.state.label(),
            table.updated_at
        );
    }
    if view.skipped() > 0 {
        println!("  ({} mesas con datos ilegibles)", view.skipped());
    }
    let summary = view.summary();
    println!(
        "  libres: {}  ocupadas: {}  reservadas: {}",
        summary.free, summary.occupied, summary.reserved
    );
}

async fn demo_backend() -> anyhow::Result<(HosteeClient, MemoryBackend)> {
    let backend = MemoryBackend::new();
    let client = HosteeClient::in_memory(&backend);
    client
        .accounts()
        .register(&RegistrationForm::new(
            "demo@hostee.com",
            "secreto",
            "secreto",
            "Demo",
        ))
        .await?;

    let feeder = backend.clone();
    tokio::spawn(async move {
        let updates = [
            json!({ "mesa1": { "estado": "libre", "numero": 1, "ultima_actualizacion": "14:00" } }),
            json!({
                "mesa1": { "estado": "ocupada", "numero": 1, "ultima_actualizacion": "14:05" },
                "mesa2": { "estado": "reservada", "numero": 2, "ultima_actualizacion": "14:05" }
            }),
            json!({ "mesa2": { "estado": "ocupada", "numero": 2, "ultima_actualizacion": "14:12" } }),
        ];
        for update in updates {
            tokio::time::sleep(Duration::from_millis(500)).await;
            feeder.push("/", update);
        }
        tokio::time::sleep(Duration::from_millis(500)).await;
        feeder.disconnect("/", "simulated outage");
    });

    Ok((client, backend))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logger();

    let (client, _backend) = match ClientConfig::from_env() {
        Ok(config) => {
            let client = HosteeClient::http(config)?;
            let email = std::env::var("HOSTEE_EMAIL")?;
            let password = std::env::var("HOSTEE_PASSWORD")?;
            client
                .accounts()
                .sign_in(&LoginForm::new(email, password))
                .await?;
            (client, None)
        }
        Err(_) => {
            let (client, backend) = demo_backend().await?;
            (client, Some(backend))
        }
    };

    let header = DashboardHeader::now(client.session().as_ref());
    println!("{}, {}", header.greeting, header.user_name);

    let mut view = client.tables().watch().await?;
    let deadline = tokio::time::sleep(Duration::from_secs(5));
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            _ = &mut deadline => break,
            updated = view.next_update() => {
                if !updated {
                    break;
                }
                render(&view);
            }
        }
    }

    view.close();
    client.accounts().sign_out().await?;
    Ok(())
}
