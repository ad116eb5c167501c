use clap::Parser;
use iam_mapper::errors::MapperError;
use iam_mapper::mapping::parser;
use iam_mapper::settings::Settings;
use iam_mapper::watcher::WatchOptions;
use iam_mapper::DynamicFileMapper;
use miette::{IntoDiagnostic, Result};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "iam-mapper",
    version,
    about = "Dynamic AWS IAM to Kubernetes identity mapping"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Parse the mapping file once, report what it contains and exit
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // logging
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    // load settings
    let settings = Settings::load(&cli.config)?;
    tracing::info!(?settings, "Loaded configuration");

    if cli.check {
        let doc = parser::parse_file(&settings.mapping.dynamic_file_path)?;
        tracing::info!(
            users = doc.users.len(),
            roles = doc.roles.len(),
            accounts = doc.accounts.len(),
            "Mapping file is valid"
        );
        return Ok(());
    }

    let mapper = DynamicFileMapper::new(&settings.mapping)?;
    let token = CancellationToken::new();
    let watch = mapper.start(token.clone(), WatchOptions::from(&settings.watcher));
    tracing::info!(
        mapper = mapper.name(),
        userid_strict = mapper.store().userid_strict(),
        "Mapper started"
    );

    tokio::signal::ctrl_c().await.into_diagnostic()?;
    tracing::info!("Shutting down");
    token.cancel();
    watch.await.map_err(MapperError::from)?;
    Ok(())
}
