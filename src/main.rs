use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;

use event_insight::cli::{Cli, Commands, ConfigCommands};
use event_insight::config::{get_config, init_config_from};
use event_insight::errors::AppError;
use event_insight::runtime::modes;
use event_insight::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    match cli.command.unwrap_or(Commands::Serve) {
        // config generate 不需要加载配置或日志
        Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        } => match modes::run_config_generate(output_path, force) {
            Ok(_) => Ok(()),
            Err(e) => exit_with(&e),
        },
        Commands::Migrate => {
            let _guard = bootstrap(&cli.config);
            modes::run_migrate().await
        }
        Commands::Serve => {
            let _guard = bootstrap(&cli.config);
            run_server().await
        }
    }
}

/// Load configuration and start logging; the guard must outlive the run.
fn bootstrap(config_path: &str) -> WorkerGuard {
    init_config_from(config_path);
    let config = get_config();

    match init_logging(&config.logging) {
        Ok(guard) => guard,
        Err(e) => exit_with(&e),
    }
}

#[cfg(feature = "server")]
async fn run_server() -> anyhow::Result<()> {
    modes::run_server().await.map_err(|e| {
        if let Some(app_err) = e.downcast_ref::<AppError>() {
            eprintln!("{}", app_err.format_colored());
        }
        e
    })
}

#[cfg(not(feature = "server"))]
async fn run_server() -> anyhow::Result<()> {
    anyhow::bail!("server feature is disabled in this build")
}

fn exit_with(err: &AppError) -> ! {
    eprintln!("{}", err.format_colored());
    std::process::exit(1);
}
