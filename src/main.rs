use carehub::StartAudience;
use carehub::core::config::{self, CliOverrides};
use carehub::core::fixtures;
use carehub::tui;
use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "carehub", about = "Childcare center operator console")]
struct Args {
    /// Conversation tab to open first
    #[arg(short, long, value_enum)]
    audience: Option<StartAudience>,

    /// JSON file with the conversations to load
    #[arg(short, long)]
    fixtures: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to carehub.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("carehub.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Ignoring config file: {}", e);
        config::CarehubConfig::default()
    });
    let cli = CliOverrides {
        audience: args.audience.map(Into::into),
        fixtures: args.fixtures,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!(
        "CareHub starting up (audience: {:?}, fixtures: {:?})",
        resolved.audience,
        resolved.fixtures_path
    );

    let conversations = fixtures::load_or_builtin(resolved.fixtures_path.as_deref());
    tui::run(resolved, conversations)
}
