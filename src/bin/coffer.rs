use {
    clap::Parser,
    coffer::{Coffer, config::CofferServerConfig, logging::init_logging},
    tracing::error,
};

#[derive(Parser)]
#[command(version, about = "Bank account ledger over HTTP")]
struct Cli {
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = match CofferServerConfig::from_file(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: failed to load server config file: {e}");
            return;
        }
    };

    if let Err(e) = init_logging(config.debug, &config.log_dir) {
        eprintln!("Error: failed to initialize logging: {e}");
        return;
    }

    let app = match Coffer::new(config) {
        Ok(app) => app,
        Err(e) => {
            error!("Coffer failed to start: {}", e);
            return;
        }
    };

    if let Err(e) = app.run().await {
        error!("Coffer failed to run: {}", e);
    }
}
