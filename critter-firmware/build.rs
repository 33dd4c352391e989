//! Build script for critter-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates badge.toml at compile time
//! - Generates the `GameConfig` constant the firmware boots with

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Tone range the beeper task can produce
const MIN_TONE_HZ: i64 = 20;
const MAX_TONE_HZ: i64 = 20_000;

fn main() {
    setup_linker();
    let settings = validate_config();
    generate_config(&settings);
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

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Values read from badge.toml
struct Settings {
    frame_period_us: i64,
    rotary_axis: i64,
    beacon_interval_ticks: i64,
    grant_tone: (i64, i64),
    beacon_tone: (i64, i64),
}

/// Validate badge.toml and extract the game settings
fn validate_config() -> Settings {
    println!("cargo:rerun-if-changed=badge.toml");

    let config_path = Path::new("badge.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: badge.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a badge.toml configuration file.          ║\n\
            ║  Please create one in the critter-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read badge.toml                                ║\n\
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
                ║  ERROR: Invalid TOML syntax in badge.toml                        ║\n\
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

    let frame_period_us = integer(&config, &["game", "frame_period_us"], &mut errors);
    if frame_period_us <= 0 || frame_period_us > u32::MAX as i64 {
        errors.push("[game] frame_period_us must be 1-4294967295".to_string());
    }

    let rotary_axis = integer(&config, &["game", "rotary_axis"], &mut errors);
    if !(0..=1).contains(&rotary_axis) {
        errors.push("[game] rotary_axis must be 0 or 1".to_string());
    }

    let beacon_interval_ticks = integer(&config, &["beacon", "interval_ticks"], &mut errors);
    if beacon_interval_ticks <= 0 || beacon_interval_ticks > u32::MAX as i64 {
        errors.push("[beacon] interval_ticks must be at least 1".to_string());
    }

    let grant_tone = tone(&config, "grant", &mut errors);
    let beacon_tone = tone(&config, "beacon", &mut errors);

    report(&errors);
    println!("cargo:warning=badge.toml validated successfully");

    Settings {
        frame_period_us,
        rotary_axis,
        beacon_interval_ticks,
        grant_tone,
        beacon_tone,
    }
}

/// Read a required integer at `path`, recording an error if absent
fn integer(config: &toml::Value, path: &[&str], errors: &mut Vec<String>) -> i64 {
    let mut value = Some(config);
    for segment in path {
        value = value.and_then(|v| v.get(*segment));
    }
    match value {
        Some(toml::Value::Integer(n)) => *n,
        Some(_) => {
            errors.push(format!("{} must be an integer", path.join(".")));
            0
        }
        None => {
            errors.push(format!("missing '{}'", path.join(".")));
            0
        }
    }
}

/// Read and range-check `[tone.<name>]`
fn tone(config: &toml::Value, name: &str, errors: &mut Vec<String>) -> (i64, i64) {
    let frequency = integer(config, &["tone", name, "frequency_hz"], errors);
    let duration = integer(config, &["tone", name, "duration_ms"], errors);

    if !(MIN_TONE_HZ..=MAX_TONE_HZ).contains(&frequency) {
        errors.push(format!(
            "[tone.{}] frequency_hz must be {}-{}",
            name, MIN_TONE_HZ, MAX_TONE_HZ
        ));
    }
    if !(0..=u16::MAX as i64).contains(&duration) {
        errors.push(format!("[tone.{}] duration_ms must be 0-65535", name));
    }
    (frequency, duration)
}

/// Abort the build listing every problem found
fn report(errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: Invalid badge configuration                              ║\n\
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

/// Write `badge_config.rs` into OUT_DIR
fn generate_config(settings: &Settings) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let source = format!(
        "/// Game configuration from badge.toml\n\
         pub const BADGE_CONFIG: GameConfig = GameConfig {{\n    \
             beacon_interval_ticks: {},\n    \
             frame_period_us: {},\n    \
             grant_tone: Tone::new({}, {}),\n    \
             beacon_tone: Tone::new({}, {}),\n    \
             rotary_axis: {},\n\
         }};\n",
        settings.beacon_interval_ticks,
        settings.frame_period_us,
        settings.grant_tone.0,
        settings.grant_tone.1,
        settings.beacon_tone.0,
        settings.beacon_tone.1,
        settings.rotary_axis,
    );
    fs::write(out_dir.join("badge_config.rs"), source).unwrap();
}
