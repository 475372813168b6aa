use std::fs;
use std::path::Path;

use crate::cli::commands::InitArgs;
use crate::io::config_io::{self, CONFIG_FILE};

const CONFIG_TEMPLATE: &str = include_str!("../../templates/greeter.toml");

const CATALOG_TEMPLATE: &str = include_str!("../../templates/catalog.toml");

const CATALOG_FILE: &str = "catalog.toml";

/// Render greeter.toml, pointing catalog.path at `catalog` when given.
fn render_config(catalog: Option<&str>) -> Result<String, Box<dyn std::error::Error>> {
    let Some(catalog) = catalog else {
        return Ok(CONFIG_TEMPLATE.to_string());
    };
    let mut doc: toml_edit::DocumentMut = CONFIG_TEMPLATE.parse()?;
    config_io::set_value(&mut doc, "catalog.path", catalog)?;
    Ok(doc.to_string())
}

fn refuse_overwrite(path: &Path, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    if path.exists() && !force {
        return Err(format!("{} already exists (use --force to overwrite)", path.display()).into());
    }
    Ok(())
}

pub fn cmd_init(args: InitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let config_path = cwd.join(CONFIG_FILE);
    let catalog_path = cwd.join(CATALOG_FILE);

    refuse_overwrite(&config_path, args.force)?;
    if args.with_catalog {
        refuse_overwrite(&catalog_path, args.force)?;
    }

    let config_text = render_config(args.with_catalog.then_some(CATALOG_FILE))?;
    fs::write(&config_path, config_text)?;
    println!("Created {}", CONFIG_FILE);

    if args.with_catalog {
        fs::write(&catalog_path, CATALOG_TEMPLATE)?;
        println!("Created {}", CATALOG_FILE);
    }
    Ok(())
}
