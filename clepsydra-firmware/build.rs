//! Build script for clepsydra-firmware
//!
//! - Sets up linker search paths and scripts for memory.x
//! - Validates board.toml at compile time
//! - Generates the `BOARD` wiring constant from board.toml

use std::collections::BTreeMap;
use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use clepsydra_core::config::{BoardPins, ButtonPins, ConfigError, DisplayPins, PinConfig};

/// Required keys per section, in generated field order
const SECTIONS: [(&str, &[&str]); 3] = [
    ("display", &["rs", "enable", "d4", "d5", "d6", "d7"]),
    ("alarm", &["pin"]),
    ("buttons", &["start", "sec", "min"]),
];

fn main() {
    setup_linker();
    let board = validate_config();
    generate_board(&board);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate board.toml and return the wiring it describes
fn validate_config() -> BoardPins {
    println!("cargo:rerun-if-changed=board.toml");

    let config_path = Path::new("board.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: board.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a board.toml wiring file.                 ║\n\
            ║  Please create one in the clepsydra-firmware directory.          ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read board.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in board.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let pins = collect_pins(&config);
    let board = assemble_board(&pins);

    if let Err(e) = board.validate() {
        report("Invalid board wiring", &[describe(e, &pins)]);
    }

    println!("cargo:warning=board.toml validated successfully");
    board
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Panic with a boxed list of errors
fn report(title: &str, errors: &[String]) {
    if errors.is_empty() {
        return;
    }

    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Check that every section and key exists and holds a pin string
fn collect_pins(config: &toml::Value) -> BTreeMap<String, PinConfig> {
    let mut errors = Vec::new();
    let mut pins = BTreeMap::new();

    for (section, keys) in SECTIONS {
        let table = match config.get(section) {
            Some(toml::Value::Table(t)) => t,
            Some(_) => {
                errors.push(format!("[{}] must be a table", section));
                continue;
            }
            None => {
                errors.push(format!("Missing [{}] section", section));
                continue;
            }
        };

        for key in keys {
            match table.get(*key) {
                Some(toml::Value::String(s)) => match PinConfig::parse(s) {
                    Some(pin) => {
                        pins.insert(format!("{}.{}", section, key), pin);
                    }
                    None => errors.push(format!("[{}] {} = '{}' is not a pin", section, key, s)),
                },
                Some(_) => errors.push(format!("[{}] {} must be a string", section, key)),
                None => errors.push(format!("[{}] missing '{}'", section, key)),
            }
        }

        for key in table.keys() {
            if !keys.contains(&key.as_str()) {
                errors.push(format!("[{}] unknown key '{}'", section, key));
            }
        }
    }

    report("Invalid board.toml structure", &errors);
    pins
}

/// Build the wiring from the collected pins
fn assemble_board(pins: &BTreeMap<String, PinConfig>) -> BoardPins {
    BoardPins {
        display: DisplayPins {
            rs: pins["display.rs"],
            enable: pins["display.enable"],
            d4: pins["display.d4"],
            d5: pins["display.d5"],
            d6: pins["display.d6"],
            d7: pins["display.d7"],
        },
        alarm: pins["alarm.pin"],
        buttons: ButtonPins {
            start: pins["buttons.start"],
            sec: pins["buttons.sec"],
            min: pins["buttons.min"],
        },
    }
}

/// Name the offending keys of a wiring error
fn describe(error: ConfigError, pins: &BTreeMap<String, PinConfig>) -> String {
    let users = |pin: u8| {
        pins.iter()
            .filter(|(_, cfg)| cfg.pin == pin)
            .map(|(name, _)| name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    match error {
        ConfigError::PinOutOfRange(pin) => {
            format!("gpio{} is out of range (0-29): {}", pin, users(pin))
        }
        ConfigError::DuplicatePin(pin) => format!("gpio{} used more than once: {}", pin, users(pin)),
        ConfigError::InvertedDisplayLine(pin) => {
            format!("display line gpio{} cannot be inverted", pin)
        }
    }
}

/// Write `board.rs` with the `BOARD` constant into OUT_DIR
fn generate_board(board: &BoardPins) {
    let pin = |p: PinConfig| {
        format!(
            "PinConfig {{ pin: {}, inverted: {}, pull_up: {} }}",
            p.pin, p.inverted, p.pull_up
        )
    };
    let d = &board.display;
    let b = &board.buttons;

    let source = format!(
        "// Generated from board.toml by build.rs\n\
         pub const BOARD: BoardPins = BoardPins {{\n\
         \x20   display: DisplayPins {{\n\
         \x20       rs: {},\n\
         \x20       enable: {},\n\
         \x20       d4: {},\n\
         \x20       d5: {},\n\
         \x20       d6: {},\n\
         \x20       d7: {},\n\
         \x20   }},\n\
         \x20   alarm: {},\n\
         \x20   buttons: ButtonPins {{\n\
         \x20       start: {},\n\
         \x20       sec: {},\n\
         \x20       min: {},\n\
         \x20   }},\n\
         }};\n",
        pin(d.rs),
        pin(d.enable),
        pin(d.d4),
        pin(d.d5),
        pin(d.d6),
        pin(d.d7),
        pin(board.alarm),
        pin(b.start),
        pin(b.sec),
        pin(b.min),
    );

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("board.rs"), source).unwrap();
}
