use store_server::{Config, Server, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    setup_environment(&config);

    tracing::info!(
        environment = %config.environment,
        "Store server starting..."
    );

    let server = Server::new(config);
    server.run().await
}
