//! Build script for ledmatrix-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates display.toml at compile time
//! - Generates the display constants included by `src/config.rs`

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use ledmatrix_core::config::{Intensity, DEFAULT_BOOT_TEXT, MAX_CHAIN_LEN, MAX_TEXT_LEN};

/// MAX7219 maximum serial clock
const MAX_SPI_FREQUENCY: i64 = 10_000_000;

/// Values read from display.toml, after validation
struct DisplaySettings {
    modules: i64,
    spi_frequency: i64,
    intensity: i64,
    boot_text: String,
    baudrate: i64,
}

fn main() {
    setup_linker();
    let settings = validate_config();
    generate_constants(&settings);
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

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate display.toml configuration at compile time
fn validate_config() -> DisplaySettings {
    println!("cargo:rerun-if-changed=display.toml");

    let config_path = Path::new("display.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: display.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a display.toml configuration file.        ║\n\
            ║  Please create one in the ledmatrix-firmware directory.          ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read display.toml                              ║\n\
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
                ║  ERROR: Invalid TOML syntax in display.toml                      ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();

    let modules = required_integer(&config, "chain", "modules", &mut errors);
    let spi_frequency = required_integer(&config, "spi", "frequency", &mut errors);
    let intensity = optional_integer(
        &config,
        "display",
        "intensity",
        Intensity::DEFAULT.value() as i64,
        &mut errors,
    );
    let baudrate = optional_integer(&config, "link", "baudrate", 115_200, &mut errors);
    let boot_text = match config.get("display").and_then(|d| d.get("boot_text")) {
        None => DEFAULT_BOOT_TEXT.to_string(),
        Some(toml::Value::String(text)) => text.clone(),
        Some(_) => {
            errors.push("[display] boot_text must be a string".to_string());
            String::new()
        }
    };

    if !(1..=MAX_CHAIN_LEN as i64).contains(&modules) {
        errors.push(format!("[chain] modules must be 1-{}", MAX_CHAIN_LEN));
    }
    if !(1..=MAX_SPI_FREQUENCY).contains(&spi_frequency) {
        errors.push(format!("[spi] frequency must be 1-{} Hz", MAX_SPI_FREQUENCY));
    }
    if i32::try_from(intensity).ok().and_then(Intensity::new).is_none() {
        errors.push(format!(
            "[display] intensity must be {}-{}",
            Intensity::MIN.value(),
            Intensity::MAX.value()
        ));
    }
    if boot_text.len() > MAX_TEXT_LEN {
        errors.push(format!("[display] boot_text longer than {} bytes", MAX_TEXT_LEN));
    }
    if baudrate <= 0 || baudrate > u32::MAX as i64 {
        errors.push("[link] baudrate must be a positive 32-bit value".to_string());
    }

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid display configuration                            ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=display.toml validated successfully");

    DisplaySettings {
        modules,
        spi_frequency,
        intensity,
        boot_text,
        baudrate,
    }
}

/// Read `[section] key`, recording an error if it is missing or not an integer
fn required_integer(
    config: &toml::Value,
    section: &str,
    key: &str,
    errors: &mut Vec<String>,
) -> i64 {
    match config.get(section).and_then(|s| s.get(key)) {
        Some(toml::Value::Integer(value)) => *value,
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            0
        }
        None => {
            errors.push(format!("[{}] missing '{}'", section, key));
            0
        }
    }
}

/// Read `[section] key`, falling back to `default` when absent
fn optional_integer(
    config: &toml::Value,
    section: &str,
    key: &str,
    default: i64,
    errors: &mut Vec<String>,
) -> i64 {
    match config.get(section).and_then(|s| s.get(key)) {
        None => default,
        Some(_) => required_integer(config, section, key, errors),
    }
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

/// Write the validated settings as Rust constants
fn generate_constants(settings: &DisplaySettings) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let mut f = File::create(out_dir.join("display_config.rs")).unwrap();

    writeln!(f, "/// Modules in the daisy chain").unwrap();
    writeln!(f, "pub const MODULE_COUNT: usize = {};", settings.modules).unwrap();
    writeln!(f, "/// SPI clock in Hz").unwrap();
    writeln!(f, "pub const SPI_FREQUENCY_HZ: u32 = {};", settings.spi_frequency).unwrap();
    writeln!(f, "/// Power-up brightness").unwrap();
    writeln!(f, "pub const DEFAULT_INTENSITY: u8 = {};", settings.intensity).unwrap();
    writeln!(f, "/// Text shown after power-up").unwrap();
    writeln!(f, "pub const BOOT_TEXT: &str = {:?};", settings.boot_text).unwrap();
    writeln!(f, "/// Command link baud rate").unwrap();
    writeln!(f, "pub const LINK_BAUDRATE: u32 = {};", settings.baudrate).unwrap();
}
