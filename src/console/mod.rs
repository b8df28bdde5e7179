//! Interactive node console
//!
//! A blocking line-based console with switchable modes:
//! - default mode dispatches operator commands
//! - setup mode walks through first-time node configuration
//!
//! The console can be paused; while paused every input except `resume`
//! is ignored. Runs entirely on blocking stdin, no async.

mod modes;

pub use modes::*;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use colored::Colorize;
use tracing::{debug, info};

use crate::config::{default_config_path, Config};
use crate::protocol::{ByteCursor, Frame, WireLimits};

/// What a mode wants the console to do after handling one input line
pub enum ModeOutcome {
    /// Remain in the current mode
    Stay,
    /// Switch to a different mode
    Switch(Box<dyn Mode>),
    /// Pause the console until `resume` is entered
    Pause,
    /// Persist a new configuration and return to the default mode
    Commit(Config),
    /// Leave the console loop
    Quit,
}

/// A console mode: owns its prompt and its command handling
pub trait Mode {
    /// Colored prompt shown before each input line
    fn prompt(&self) -> String;

    /// Handle one trimmed, non-empty input line
    fn handle(&mut self, input: &str) -> ModeOutcome;
}

/// The interactive console loop
pub struct Console {
    config: Config,
    config_path: Option<PathBuf>,
    paused: bool,
}

impl Console {
    pub fn new(config: Config, config_path: Option<PathBuf>) -> Self {
        Self {
            config,
            config_path,
            paused: false,
        }
    }

    /// Run until `exit`, EOF or a read error.
    pub fn run(&mut self) -> anyhow::Result<()> {
        print_welcome(&self.config);

        let mut mode: Box<dyn Mode> = Box::new(DefaultMode::new(self.config.clone()));
        let stdin = io::stdin();
        let mut line = String::new();

        loop {
            print!("{}", mode.prompt());
            io::stdout().flush()?;

            line.clear();
            if stdin.lock().read_line(&mut line)? == 0 {
                // EOF, e.g. piped input exhausted
                break;
            }
            let input = line.trim();

            if self.paused {
                if input.eq_ignore_ascii_case("resume") {
                    self.paused = false;
                    println!("Resumed console.");
                }
                continue;
            }

            if input.is_empty() {
                println!("{}", "The input field can not be empty.".red());
                continue;
            }

            match mode.handle(input) {
                ModeOutcome::Stay => {}
                ModeOutcome::Switch(next) => mode = next,
                ModeOutcome::Pause => {
                    self.paused = true;
                    println!("Console paused. Enter 'resume' to continue.");
                }
                ModeOutcome::Commit(config) => {
                    self.apply_config(config);
                    mode = Box::new(DefaultMode::new(self.config.clone()));
                }
                ModeOutcome::Quit => break,
            }
        }

        info!("console closed");
        Ok(())
    }

    /// Persist and install a new configuration. If the save fails the
    /// previous configuration stays live, so memory and disk never
    /// diverge silently.
    fn apply_config(&mut self, config: Config) {
        let path = self
            .config_path
            .clone()
            .or_else(default_config_path)
            .unwrap_or_else(|| PathBuf::from("./cirrusnet.toml"));

        match config.save(&path) {
            Ok(()) => {
                println!("Configuration saved to {}.", path.display());
                self.config = config;
            }
            Err(e) => println!(
                "{}",
                format!("Failed to save configuration: {e}; keeping previous configuration.")
                    .red()
            ),
        }
    }
}

fn print_welcome(config: &Config) {
    println!();
    println!("  {}", "CirrusNet Node Console".cyan().bold());
    println!("  node: {}", config.general.name);
    println!("  type 'help' for available commands");
    println!();
}

/// Decode a hex-encoded packet and render a human-readable dump.
/// Shared by the console `decode` command and the `decode` subcommand.
/// The configured decode limits apply to every length in the body.
pub fn decode_packet_dump(hex_input: &str, limits: &WireLimits) -> anyhow::Result<String> {
    let bytes = hex::decode(hex_input.trim())?;
    debug!(len = bytes.len(), "decoding packet");

    let mut cursor = ByteCursor::from_slice(&bytes);
    let frame = Frame::read_bounded(&mut cursor, limits)?;

    let mut out = format!(
        "protocol version: {}\npacket type: {:#04x}\n{:#?}",
        frame.protocol_version,
        frame.packet.packet_type(),
        frame.packet
    );
    if cursor.remaining() > 0 {
        out.push_str(&format!(
            "\nwarning: {} trailing byte(s) after packet body",
            cursor.remaining()
        ));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{Packet, PROTOCOL_VERSION};

    fn hex_frame(packet: Packet) -> String {
        let mut cursor = ByteCursor::new();
        Frame::new(PROTOCOL_VERSION, packet).write(&mut cursor);
        hex::encode(cursor.as_slice())
    }

    #[test]
    fn test_decode_dump() {
        let hex_input = hex_frame(Packet::Disconnect {
            reason: "bye".into(),
        });
        let dump = decode_packet_dump(&hex_input, &WireLimits::default()).unwrap();
        assert!(dump.contains("packet type: 0xfe"));
        assert!(dump.contains("bye"));
    }

    #[test]
    fn test_decode_dump_trailing_bytes() {
        let mut hex_input = hex_frame(Packet::ConsoleText {
            line: "x".into(),
        });
        hex_input.push_str("ff");
        let dump = decode_packet_dump(&hex_input, &WireLimits::default()).unwrap();
        assert!(dump.contains("1 trailing byte(s)"));
    }

    #[test]
    fn test_decode_dump_bad_hex() {
        assert!(decode_packet_dump("zz", &WireLimits::default()).is_err());
    }

    #[test]
    fn test_decode_dump_malformed_packet() {
        // Unknown packet type 0x77
        assert!(decode_packet_dump("0177", &WireLimits::default()).is_err());
    }

    #[test]
    fn test_decode_dump_honors_configured_limits() {
        let mut config = Config::default();
        config.protocol.max_string_len = 4;

        let hex_input = hex_frame(Packet::ConsoleText {
            line: "longer than four bytes".into(),
        });
        let err = decode_packet_dump(&hex_input, &config.protocol.wire_limits()).unwrap_err();
        assert!(err.to_string().contains("exceeds limit 4"));

        // The same frame passes with default limits.
        assert!(decode_packet_dump(&hex_input, &WireLimits::default()).is_ok());
    }

    #[test]
    fn test_apply_config_keeps_previous_on_save_failure() {
        // Parent of the target path is a file, so create_dir_all fails.
        let blocker = tempfile::NamedTempFile::new().unwrap();
        let path = blocker.path().join("nested/config.toml");

        let mut console = Console::new(Config::default(), Some(path));
        let original_name = console.config.general.name.clone();

        let mut draft = Config::default();
        draft.general.name = "renamed-node".into();
        console.apply_config(draft);

        assert_eq!(console.config.general.name, original_name);
    }

    #[test]
    fn test_apply_config_installs_on_save_success() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut console = Console::new(Config::default(), Some(path.clone()));
        let mut draft = Config::default();
        draft.general.name = "renamed-node".into();
        console.apply_config(draft);

        assert_eq!(console.config.general.name, "renamed-node");
        assert!(path.exists());
    }
}
