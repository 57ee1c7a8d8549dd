//! Template command handlers

use std::path::Path;

use stoic_daily_core::body::{load_template, read_template};
use stoic_daily_core::clock::{Clock, SystemClock};
use stoic_daily_core::config::Config;
use stoic_daily_core::date::{DateKey, parse_date};
use stoic_daily_core::fs::{AsyncFileSystem, RealFileSystem, SyncToAsyncFs};
use stoic_daily_core::library::Library;
use stoic_daily_core::random::RandomSelector;
use stoic_daily_core::template::{CommandRegistry, DEFAULT_DAY_TEMPLATE, TokenContext};

use crate::cli::args::TemplateCommands;
use crate::cli::block_on;
use crate::cli::util::load_config;
use crate::editor::launch_editor;

/// Handle template subcommands
/// Returns true on success, false on error
pub fn handle_template_command(command: TemplateCommands, config_path: Option<&Path>) -> bool {
    let Some(config) = load_config(config_path) else {
        return false;
    };
    let fs = SyncToAsyncFs::new(RealFileSystem);

    match command {
        TemplateCommands::Show => handle_show(&fs, &config),
        TemplateCommands::Init => handle_init(&fs, &config),
        TemplateCommands::Edit => handle_edit(&fs, &config),
        TemplateCommands::Tokens => {
            handle_tokens();
            true
        }
        TemplateCommands::Render { date } => handle_render(&fs, &config, date.as_deref()),
    }
}

/// Handle the 'template show' command
fn handle_show(fs: &impl AsyncFileSystem, config: &Config) -> bool {
    let path = config.layout().template_path();
    match block_on(read_template(fs, &path)) {
        Ok(Some(text)) => {
            println!("Template: {}\n", path.display());
            println!("{}", text);
            true
        }
        Ok(None) => {
            println!("Template: (built-in, {} does not exist)\n", path.display());
            println!("{}", DEFAULT_DAY_TEMPLATE);
            true
        }
        Err(e) => {
            eprintln!("✗ {}", e);
            false
        }
    }
}

/// Handle the 'template init' command
fn handle_init(fs: &impl AsyncFileSystem, config: &Config) -> bool {
    let path = config.layout().template_path();

    if block_on(fs.exists(&path)) {
        println!("Template already exists: {}", path.display());
        return true;
    }

    if let Some(parent) = path.parent()
        && let Err(e) = block_on(fs.create_dir_all(parent))
    {
        eprintln!("✗ Error creating folder '{}': {}", parent.display(), e);
        return false;
    }

    match block_on(fs.create_new(&path, DEFAULT_DAY_TEMPLATE)) {
        Ok(()) => {
            println!("✓ Created template: {}", path.display());
            println!("  Set 'stoic-daily config style template' to use it.");
            true
        }
        Err(e) => {
            eprintln!("✗ Error creating template '{}': {}", path.display(), e);
            false
        }
    }
}

/// Handle the 'template edit' command
fn handle_edit(fs: &impl AsyncFileSystem, config: &Config) -> bool {
    if !handle_init(fs, config) {
        return false;
    }

    let path = config.layout().template_path();
    match launch_editor(&path, config) {
        Ok(()) => true,
        Err(e) => {
            eprintln!("✗ Error launching editor: {}", e);
            false
        }
    }
}

/// Handle the 'template tokens' command
fn handle_tokens() {
    println!("Available template tokens:\n");
    for (name, description) in CommandRegistry::builtin().tokens() {
        println!("  %{}%", name);
        println!("    {}", description);
    }
    println!();
    println!("Unknown tokens expand to nothing.");
}

/// Handle the 'template render' command
fn handle_render(fs: &impl AsyncFileSystem, config: &Config, date: Option<&str>) -> bool {
    let day = match date {
        Some(input) => match parse_date(input) {
            Ok(day) => day,
            Err(e) => {
                eprintln!("✗ {}", e);
                return false;
            }
        },
        None => SystemClock.today(),
    };

    let library = match &config.library_dir {
        Some(dir) => block_on(Library::load_with_overrides(fs, dir)),
        None => Library::bundled(),
    };
    let library = match library {
        Ok(library) => library,
        Err(e) => {
            eprintln!("✗ {}", e);
            return false;
        }
    };

    let registry = CommandRegistry::builtin();
    let rendered = block_on(load_template(fs, &config.layout())).and_then(|template| {
        for token in registry.unknown_tokens(&template)? {
            eprintln!("⚠ Unknown token %{}% will be left empty", token);
        }
        let selector = RandomSelector::from_entropy();
        let ctx = TokenContext {
            key: DateKey::from(day),
            library: &library,
            selector: &selector,
        };
        registry.render(&template, &ctx)
    });

    match rendered {
        Ok(text) => {
            println!("{}", text);
            true
        }
        Err(e) => {
            eprintln!("✗ {}", e);
            false
        }
    }
}
