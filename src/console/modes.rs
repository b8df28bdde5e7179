//! Console modes

use colored::Colorize;
use tracing::info;

use super::{decode_packet_dump, Mode, ModeOutcome};
use crate::config::Config;
use crate::protocol::PROTOCOL_VERSION;

/// Default operator mode
pub struct DefaultMode {
    config: Config,
}

impl DefaultMode {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn print_help(&self) {
        println!("Available commands:");
        println!("  help           show this help");
        println!("  info           show node information");
        println!("  decode <hex>   decode a hex-encoded packet");
        println!("  setup          run the node setup assistant");
        println!("  pause          pause the console");
        println!("  clear          clear the screen");
        println!("  exit           leave the console");
    }

    fn print_info(&self) {
        println!("node name:        {}", self.config.general.name);
        println!("node id:          {}", self.config.node_id());
        println!(
            "groups:           {}",
            if self.config.general.groups.is_empty() {
                "(none)".to_string()
            } else {
                self.config.general.groups.join(", ")
            }
        );
        println!("protocol version: {PROTOCOL_VERSION}");
    }
}

impl Mode for DefaultMode {
    fn prompt(&self) -> String {
        format!("{} {} ", "cirrus".cyan().bold(), "»".dimmed())
    }

    fn handle(&mut self, input: &str) -> ModeOutcome {
        let mut parts = input.split_whitespace();
        let command = parts.next().unwrap_or_default().to_ascii_lowercase();
        let args: Vec<&str> = parts.collect();

        match command.as_str() {
            "help" => {
                self.print_help();
                ModeOutcome::Stay
            }
            "info" => {
                self.print_info();
                ModeOutcome::Stay
            }
            "decode" => {
                match args.first() {
                    Some(hex_input) => match decode_packet_dump(
                        hex_input,
                        &self.config.protocol.wire_limits(),
                    ) {
                        Ok(dump) => println!("{dump}"),
                        Err(e) => println!("{}", format!("Decode failed: {e}").red()),
                    },
                    None => println!("{}", "Usage: decode <hex>".yellow()),
                }
                ModeOutcome::Stay
            }
            "setup" => {
                println!("Entering setup. Enter 'cancel' at any point to abort.");
                println!("Node name?");
                ModeOutcome::Switch(Box::new(SetupMode::new(self.config.clone())))
            }
            "pause" => ModeOutcome::Pause,
            "clear" => {
                // ANSI clear screen + cursor home
                print!("\x1B[2J\x1B[1;1H");
                ModeOutcome::Stay
            }
            "exit" | "quit" => {
                info!("operator requested exit");
                ModeOutcome::Quit
            }
            _ => {
                println!("{}", format!("Unknown command: {command}").red());
                ModeOutcome::Stay
            }
        }
    }
}

/// Which answer the setup assistant is waiting for
enum SetupStep {
    Name,
    Groups,
    Confirm,
}

/// Step-by-step first-time configuration. Answers accumulate in a
/// draft; cancelling or rejecting the summary discards the draft and
/// returns to the untouched original.
pub struct SetupMode {
    original: Config,
    draft: Config,
    step: SetupStep,
}

impl SetupMode {
    pub fn new(config: Config) -> Self {
        Self {
            draft: config.clone(),
            original: config,
            step: SetupStep::Name,
        }
    }

    fn print_summary(&self) {
        println!("name:   {}", self.draft.general.name);
        println!(
            "groups: {}",
            if self.draft.general.groups.is_empty() {
                "(none)".to_string()
            } else {
                self.draft.general.groups.join(", ")
            }
        );
        println!("Save this configuration? (yes/no)");
    }
}

impl Mode for SetupMode {
    fn prompt(&self) -> String {
        format!("{} {} ", "setup".yellow().bold(), "»".dimmed())
    }

    fn handle(&mut self, input: &str) -> ModeOutcome {
        if input.eq_ignore_ascii_case("cancel") {
            println!("Cancelled setup.");
            return ModeOutcome::Switch(Box::new(DefaultMode::new(self.original.clone())));
        }

        match self.step {
            SetupStep::Name => {
                self.draft.general.name = input.to_string();
                if self.draft.general.node_id.is_none() {
                    self.draft.general.node_id = Some(uuid::Uuid::new_v4().to_string());
                }
                self.step = SetupStep::Groups;
                println!("Service groups, comma separated? ('none' for no groups)");
                ModeOutcome::Stay
            }
            SetupStep::Groups => {
                self.draft.general.groups = if input.eq_ignore_ascii_case("none") {
                    Vec::new()
                } else {
                    input
                        .split(',')
                        .map(|g| g.trim().to_string())
                        .filter(|g| !g.is_empty())
                        .collect()
                };
                self.step = SetupStep::Confirm;
                self.print_summary();
                ModeOutcome::Stay
            }
            SetupStep::Confirm => match input.to_ascii_lowercase().as_str() {
                "yes" | "y" => {
                    println!("Setup complete.");
                    ModeOutcome::Commit(self.draft.clone())
                }
                "no" | "n" => {
                    println!("Discarded setup answers.");
                    ModeOutcome::Switch(Box::new(DefaultMode::new(self.original.clone())))
                }
                _ => {
                    println!("Please answer 'yes' or 'no'.");
                    ModeOutcome::Stay
                }
            },
        }
    }
}
