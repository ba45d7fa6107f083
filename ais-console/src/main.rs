use ais_console::configs::Settings;
use ais_console::run;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::new()?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let app_name = env!("CARGO_PKG_NAME").replace('-', "_");
            let level = settings.logger.level.as_str();

            format!("{app_name}={level},ais_client={level}").into()
        }))
        .init();

    run(&settings).await
}
