//! StayX CLI
//!
//! Interactive shell over the entity registry

use clap::{Parser, ValueEnum};
use stayx_console::{repl, Console};
use stayx_core::logging::{self, Profile};
use stayx_store::FileStore;

#[derive(Debug, Parser)]
#[command(name = "stayx")]
#[command(about = "StayX - interactive entity catalog shell", long_about = None)]
struct Cli {
    /// Path of the persisted registry file
    #[arg(long, default_value = ".stayx/objects.json")]
    file: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    /// Human-readable logs
    Text,
    /// JSON structured logs
    Json,
}

fn main() {
    let cli = Cli::parse();

    logging::init(match cli.log_format {
        LogFormat::Text => Profile::Development,
        LogFormat::Json => Profile::Production,
    });

    let mut store = FileStore::new(&cli.file);
    if let Err(e) = store.reload() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let mut console = Console::new(store);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    if let Err(e) = repl::run(&mut console, stdin.lock(), stdout.lock()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
