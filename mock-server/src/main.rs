use mock_server::MockConfig;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let email =
        std::env::var("PETFRIENDS_EMAIL").unwrap_or_else(|_| "user@example.com".to_string());
    let password = std::env::var("PETFRIENDS_PASSWORD").unwrap_or_else(|_| "password".to_string());

    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%email, "registered mock account");
    mock_server::run(listener, MockConfig::new().account(&email, &password)).await
}
