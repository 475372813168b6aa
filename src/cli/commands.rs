use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "greet", about = concat!("daybreak v", env!("CARGO_PKG_VERSION"), " - a fresh greeting every time"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Greeting language, e.g. en or zh-CN (overrides greeter.toml)
    #[arg(short = 'l', long = "lang", global = true)]
    pub lang: Option<String>,

    /// Config file (default: ./greeter.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Catalog file (overrides the config's catalog.path)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Seed the random source for reproducible output
    #[arg(long, global = true)]
    pub seed: Option<u64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write greeter.toml into the current directory
    Init(InitArgs),
    /// Print greetings back to back (default: one)
    Once(OnceArgs),
    /// Print a greeting now and another every interval
    Watch(WatchArgs),
    /// List catalog languages
    Languages,
    /// Validate the catalog
    Check,
    /// Show or edit greeter.toml
    Config(ConfigCmd),
}

// ---------------------------------------------------------------------------
// Args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct InitArgs {
    /// Also write the built-in catalog to catalog.toml for editing
    #[arg(long)]
    pub with_catalog: bool,
    /// Overwrite existing files
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct OnceArgs {
    /// Number of greetings to print
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: usize,
}

#[derive(Args)]
pub struct WatchArgs {
    /// Seconds between greetings (default: greeting.interval_secs)
    #[arg(long)]
    pub interval: Option<f64>,
    /// Stop after this many greetings
    #[arg(short = 'n', long)]
    pub count: Option<usize>,
}

#[derive(Args)]
pub struct ConfigCmd {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Set a value, e.g. `greet config set greeting.language zh-CN`
    Set(ConfigSetArgs),
}

#[derive(Args)]
pub struct ConfigSetArgs {
    /// Dotted key: greeting.language, greeting.max_recent, catalog.path, ...
    pub key: String,
    pub value: String,
}
