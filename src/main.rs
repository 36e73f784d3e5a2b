use std::fs::{self, File};
use std::io;

use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};

use twitch_chat_reader::chat::{ConnectionManager, aggregator};
use twitch_chat_reader::core::config::{self, CliOverrides};
use twitch_chat_reader::core::credentials::{self, CredentialError, CredentialStore};
use twitch_chat_reader::core::state::App;
use twitch_chat_reader::error::AppError;
use twitch_chat_reader::tui;

#[derive(Parser)]
#[command(name = "twitch-chat-reader", about = "Read and send Twitch chat from the terminal")]
struct Args {
    /// Room to join instead of the last monitored one
    #[arg(short, long)]
    channel: Option<String>,

    /// Chat server as host:port
    #[arg(long)]
    server: Option<String>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let settings = config::resolve(CliOverrides {
        server: args.server,
        channel: args.channel,
        verbose: args.verbose,
    });

    // Log file sits next to the credentials
    let dir = credentials::config_dir()?;
    fs::create_dir_all(&dir).map_err(CredentialError::from)?;
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(dir.join(config::LOG_FILE_NAME)) {
        let _ = WriteLogger::init(settings.log_level, log_config, log_file);
    }
    log::info!("Starting up against {}", settings.server_addr);

    let mut store = CredentialStore::open(&dir, &mut io::stdin().lock(), &mut io::stdout())?;
    if let Some(channel) = &settings.channel {
        store.set_last_room(channel)?;
    }

    let (events_tx, events) = aggregator::channel();
    let (mut manager, failures) = ConnectionManager::new(settings.server_addr, events_tx);
    manager.connect_anonymous(&store.credentials().last_monitored_room);
    manager.connect_authenticated(store.credentials());

    let app = App::from_credentials(store.credentials());
    let result = tui::run(app, store, manager, events, failures).await;
    if let Err(e) = &result {
        log::error!("Exiting: {e}");
    }
    result
}
