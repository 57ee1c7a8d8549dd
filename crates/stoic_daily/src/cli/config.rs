//! Config command handlers

use std::path::Path;

use stoic_daily_core::body::BodyStyle;
use stoic_daily_core::config::Config;

use crate::cli::args::ConfigCommands;
use crate::cli::util::{config_file, load_config, parse_bool, save_config};

/// Handle config subcommands
/// Returns true on success, false on error
pub fn handle_config_command(command: Option<ConfigCommands>, config_path: Option<&Path>) -> bool {
    if let Some(ConfigCommands::Path) = command {
        return match config_file(config_path) {
            Some(path) => {
                println!("{}", path.display());
                true
            }
            None => {
                eprintln!("✗ Could not determine config directory");
                false
            }
        };
    }

    let Some(mut config) = load_config(config_path) else {
        return false;
    };

    match command {
        None | Some(ConfigCommands::Show) => {
            show_config(&config, config_path);
            true
        }
        Some(ConfigCommands::Toggles) => {
            show_toggles(&config);
            true
        }
        Some(ConfigCommands::Set { toggle, value }) => {
            set_toggle(&mut config, config_path, &toggle, &value)
        }
        Some(ConfigCommands::Style { style: None }) => {
            println!("{}", config.body_style);
            true
        }
        Some(ConfigCommands::Style { style: Some(style) }) => {
            set_style(&mut config, config_path, &style)
        }
        Some(ConfigCommands::Path) => true,
    }
}

/// Show the full configuration
fn show_config(config: &Config, config_path: Option<&Path>) {
    println!("Stoic Daily Configuration");
    println!("=========================");
    println!("Vault: {}", config.vault_dir.display());
    println!("Notes folder: {}", config.root_dir().display());
    println!("Body style: {}", config.body_style);
    println!("Template: {}", config.layout().template_path().display());
    if let Some(ref editor) = config.editor {
        println!("Editor: {}", editor);
    }
    println!("Refresh interval: {}s", config.refresh_interval().as_secs());
    match config.library_dir {
        Some(ref dir) => println!("Library: {}", dir.display()),
        None => println!("Library: (built-in)"),
    }
    if let Some(path) = config_file(config_path) {
        println!("Config file: {}", path.display());
    }
    println!();
    show_toggles(config);
}

/// List the section toggles
fn show_toggles(config: &Config) {
    println!("Sections:");
    for toggle in config.sections.all() {
        let mark = if toggle.value { "✓" } else { " " };
        println!(
            "  [{}] {:<18} {} ({})",
            mark, toggle.key, toggle.name, toggle.description
        );
    }
}

fn set_toggle(config: &mut Config, config_path: Option<&Path>, name: &str, value: &str) -> bool {
    let Some(value) = parse_bool(value) else {
        eprintln!("✗ Expected true or false, got '{}'", value);
        return false;
    };

    let toggle = match config.set_toggle(name, value) {
        Ok(toggle) => toggle,
        Err(e) => {
            eprintln!("✗ {}", e);
            return false;
        }
    };

    // Toggles are saved as soon as they change
    match save_config(config, config_path) {
        Ok(()) => {
            println!("✓ {} = {}", toggle, value);
            true
        }
        Err(e) => {
            eprintln!("✗ Error saving config: {}", e);
            false
        }
    }
}

fn set_style(config: &mut Config, config_path: Option<&Path>, style: &str) -> bool {
    let style = match style.parse::<BodyStyle>() {
        Ok(style) => style,
        Err(e) => {
            eprintln!("✗ {}", e);
            return false;
        }
    };

    config.body_style = style;
    match save_config(config, config_path) {
        Ok(()) => {
            println!("✓ Body style set to {}", style);
            if style == BodyStyle::Template {
                println!("  Run 'stoic-daily template init' to create a template file.");
            }
            true
        }
        Err(e) => {
            eprintln!("✗ Error saving config: {}", e);
            false
        }
    }
}
