mod init;
pub use init::cmd_init;

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::greeting::{Greeting, GreetingSelector, SelectorOptions};
use crate::io::config_io;
use crate::model::catalog::TomlCatalog;
use crate::model::config::GreeterConfig;
use crate::ops::check;
use crate::ops::ticker::{self, Ticker};
use crate::util::locale;

/// Everything a command needs: the effective config and the catalog it names.
pub struct Session {
    pub config: GreeterConfig,
    pub config_path: Option<PathBuf>,
    pub catalog_path: Option<PathBuf>,
    pub catalog: TomlCatalog,
    /// `--lang` from the command line
    pub lang_override: Option<String>,
    pub seed: Option<u64>,
}

impl Session {
    /// The language greetings are drawn in: --lang, then greeting.language,
    /// then greeting.default_language, then English.
    pub fn language(&self) -> String {
        let active = self
            .lang_override
            .as_deref()
            .or(self.config.greeting.language.as_deref());
        locale::resolve_language(active, Some(self.config.greeting.default_language.as_str()))
    }

    pub fn selector(&self) -> GreetingSelector<TomlCatalog> {
        let options = SelectorOptions::from(&self.config.greeting);
        let catalog = self.catalog.clone();
        let mut selector = match self.seed {
            Some(seed) => GreetingSelector::seeded(catalog, options, seed),
            None => GreetingSelector::new(catalog, options),
        };
        selector.set_language(Some(self.language()));
        selector
    }
}

pub fn load_session(cli: &Cli) -> Result<Session, Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let config_path = config_io::locate_config(cli.config.as_deref(), &cwd);
    let config = config_io::load_config(config_path.as_deref())?;
    match &config_path {
        Some(path) => log::debug!("using config {}", path.display()),
        None => log::debug!("no {}, using defaults", config_io::CONFIG_FILE),
    }

    let catalog_path = cli
        .catalog
        .clone()
        .or_else(|| config_io::configured_catalog_path(&config, config_path.as_deref()));
    let catalog = config_io::load_catalog(catalog_path.as_deref())?;
    log::debug!(
        "catalog {} with {} languages",
        catalog_path
            .as_deref()
            .map_or("(built-in)".to_string(), |p| p.display().to_string()),
        catalog.languages.len()
    );

    Ok(Session {
        config,
        config_path,
        catalog_path,
        catalog,
        lang_override: cli.lang.clone(),
        seed: cli.seed,
    })
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let session = load_session(&cli)?;

    match cli.command {
        None => cmd_once(&session, OnceArgs { count: 1 }, json),
        Some(cmd) => match cmd {
            // Init is handled in main.rs before the config is loaded
            Commands::Init(args) => cmd_init(args),
            Commands::Once(args) => cmd_once(&session, args, json),
            Commands::Watch(args) => cmd_watch(&session, args, json),
            Commands::Languages => cmd_languages(&session, json),
            Commands::Check => cmd_check(&session, json),
            Commands::Config(cmd) => match cmd.action {
                ConfigAction::Show => cmd_config_show(&session, json),
                ConfigAction::Set(args) => cmd_config_set(&session, args),
            },
        },
    }
}

// ---------------------------------------------------------------------------
// Greeting commands
// ---------------------------------------------------------------------------

fn cmd_once(session: &Session, args: OnceArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut selector = session.selector();
    let lang = selector.language();
    let now = chrono::Local::now();
    let greetings: Vec<Greeting> = (0..args.count).map(|_| selector.choose(&lang, &now)).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&greetings)?);
    } else {
        for g in &greetings {
            println!("{}", g.text);
        }
    }
    Ok(())
}

fn cmd_watch(session: &Session, args: WatchArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let secs = args
        .interval
        .unwrap_or(session.config.greeting.interval_secs as f64);
    let interval = Duration::try_from_secs_f64(secs)
        .ok()
        .filter(|d| !d.is_zero())
        .ok_or_else(|| format!("interval must be a positive number of seconds, got {}", secs))?;

    let mut selector = session.selector();
    let ticker = Ticker::start(interval);
    let stdout = io::stdout();
    let result = ticker::drive(&mut selector, &ticker, args.count, |g| {
        let mut out = stdout.lock();
        if json {
            writeln!(out, "{}", serde_json::to_string(g)?)?;
        } else {
            writeln!(out, "{}", g.text)?;
        }
        out.flush()
    });

    match result {
        Ok(_) => Ok(()),
        // Reader went away (e.g. `greet watch | head`)
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        Err(e) => Err(e.into()),
    }
}

// ---------------------------------------------------------------------------
// Catalog commands
// ---------------------------------------------------------------------------

fn cmd_languages(session: &Session, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(&languages_json(&session.catalog))?);
    } else {
        for line in format_languages(&session.catalog) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_check(session: &Session, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let result = check::check_catalog(&session.catalog, session.config.greeting.max_recent);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        if !result.errors.is_empty() {
            println!("Errors:");
            for err in &result.errors {
                println!("  {}", format_check_error(err));
            }
        }
        if !result.warnings.is_empty() {
            if !result.errors.is_empty() {
                println!();
            }
            println!("Warnings:");
            for warn in &result.warnings {
                println!("  {}", format_check_warning(warn));
            }
        }
        if result.valid {
            println!("✓ catalog is valid");
        } else {
            println!("✗ catalog has errors");
        }
    }

    if result.valid {
        Ok(())
    } else {
        Err("catalog check failed".into())
    }
}

// ---------------------------------------------------------------------------
// Config commands
// ---------------------------------------------------------------------------

fn cmd_config_show(session: &Session, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let path = session.config_path.as_ref().map(|p| p.display().to_string());
    if json {
        let out = ConfigJson {
            path,
            language: session.language(),
            config: &session.config,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let g = &session.config.greeting;
    println!("config: {}", path.as_deref().unwrap_or("(defaults)"));
    println!("language: {}", session.language());
    println!("greeting.default_language = {}", g.default_language);
    println!("greeting.max_recent = {}", g.max_recent);
    println!("greeting.max_attempts = {}", g.max_attempts);
    println!("greeting.interval_secs = {}", g.interval_secs);
    println!(
        "catalog: {}",
        session
            .catalog_path
            .as_deref()
            .map_or("(built-in)".to_string(), |p| p.display().to_string())
    );
    Ok(())
}

fn cmd_config_set(session: &Session, args: ConfigSetArgs) -> Result<(), Box<dyn std::error::Error>> {
    let path = session
        .config_path
        .as_deref()
        .ok_or("no greeter.toml here (run `greet init` first)")?;
    let (_config, mut doc) = config_io::read_config(path)?;
    config_io::set_value(&mut doc, &args.key, &args.value)?;
    config_io::write_config(path, &doc)?;
    println!("{} = {}", args.key, args.value);
    Ok(())
}
