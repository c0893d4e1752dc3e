mod api_provider;
mod chat_mirror;
mod config;
mod consts;
mod controller;
mod error;
mod events;
mod layout;
mod logging;
mod modules;
mod registry;
mod scheduler;
mod session;
mod ui;

use crate::api_provider::ApiProvider;
use crate::chat_mirror::{FileChatMirror, get_chat_mirror_path};
use crate::config::{Config, get_config_path};
use crate::layout::LayoutMode;
use crate::registry::ModuleType;
use crate::session::{run_tui_mode, setup_session};
use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Open the dashboard
    Start {
        /// Layout to open with: fullscreen, split or quad
        #[arg(long, value_name = "LAYOUT")]
        layout: Option<String>,

        /// API shown in the console selector: openai, anthropic or gemini
        #[arg(long, value_name = "API")]
        api: Option<String>,

        /// Paint the dark dashboard background
        #[arg(long, default_value_t = false)]
        with_background: bool,

        /// Where the chat conversation is mirrored
        #[arg(long, value_name = "PATH")]
        chat_mirror: Option<PathBuf>,
    },
    /// Delete the mirrored chat conversation
    ClearChat {
        /// Mirror file to delete instead of the default one
        #[arg(long, value_name = "PATH")]
        chat_mirror: Option<PathBuf>,
    },
    /// List the module types a frame can host
    Modules,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    match args.command {
        Command::Start {
            layout,
            api,
            with_background,
            chat_mirror,
        } => {
            let config_path = get_config_path()?;
            let mut config = Config::load_or_default(&config_path)
                .map_err(|e| format!("Failed to load config: {}", e))?;

            // Flags win over the config file
            if let Some(layout) = layout {
                config.layout = LayoutMode::parse(&layout)?;
            }
            if let Some(api) = api {
                config.api = api.parse::<ApiProvider>()?;
            }
            if with_background {
                config.with_background_color = true;
            }
            let chat_mirror_path = match chat_mirror {
                Some(path) => path,
                None => get_chat_mirror_path()?,
            };

            let session = setup_session(config, chat_mirror_path).await?;
            run_tui_mode(session).await
        }
        Command::ClearChat { chat_mirror } => {
            let path = match chat_mirror {
                Some(path) => path,
                None => get_chat_mirror_path()?,
            };
            println!("Clearing chat conversation at {}...", path.display());
            FileChatMirror::new(path).clear().map_err(Into::into)
        }
        Command::Modules => {
            for module_type in ModuleType::all() {
                println!("{:<14} {}", module_type.to_string(), module_type.title());
            }
            Ok(())
        }
    }
}
