use clap::Parser;
use daybreak::cli::commands::{Cli, Commands};
use daybreak::cli::handlers;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("GREET_LOG", "warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init(args)) => {
            // Init runs before any config is loaded
            if let Err(e) = handlers::cmd_init(args) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        _ => {
            if let Err(e) = handlers::dispatch(cli) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
