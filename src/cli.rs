use std::process;

use tracing::{error, info};

use crate::config::load_config;
use crate::report::{run_transitions, tx_current_sweep, ReportStep, SweepPoint};
use crate::{CurrentModel, RadioState};

/// Handle returned by a successful command-line run. The parsed file contents
/// are [`crate::config::Config`].
#[derive(Debug)]
pub struct Config {}

impl Config {
    pub fn run(args: &[String]) -> Result<Config, Box<dyn std::error::Error>> {
        if args.len() < 2 {
            return Err("not enough arguments".into());
        }

        if args.len() > 2 {
            return Err(
                "too many arguments, expecting only 2, such as `loracurrent filepath`".into(),
            );
        }

        // Check for special flags
        match args[1].as_str() {
            "--version" | "-v" => {
                print_version();
                process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            _ => {}
        }

        let cwd = std::env::current_dir()?;
        // cargo run arg[1], such as cargo run files/sx1272_config.toml
        // loracurrent arg[1], such as loracurrent files/sx1272_config.toml
        let file_path = args[1].clone();
        println!("Config Path: {}", file_path);
        let full_path_to_config = cwd.join(&file_path);
        println!("Full Path: {}", full_path_to_config.display());

        let config = load_config(&full_path_to_config.display().to_string())?;
        let mut model = config.model.build()?;
        let initial_model = model.clone();

        let steps = match run_transitions(&mut model, &config.transitions) {
            Ok(steps) => steps,
            Err(e) => {
                error!("transition run aborted: {}", e);
                return Err(e.into());
            }
        };
        let sweep = config
            .sweep
            .as_ref()
            .map(|sweep| tx_current_sweep(&initial_model, sweep))
            .unwrap_or_default();

        print_model(&initial_model);
        print_transitions(&steps);
        print_sweep(&sweep);

        #[cfg(feature = "plot")]
        {
            let output_html_path = html_output_path(&full_path_to_config.display().to_string());
            println!("Generating HTML table at: {}", output_html_path);
            if let Err(e) =
                crate::plot::generate_html_table(&initial_model, &steps, &sweep, &output_html_path)
            {
                eprintln!("Error generating HTML table: {}", e);
            }
        }

        info!("done");
        Ok(Config {})
    }
}

/// `config.toml` becomes `config.html`; any other name gets `.html` appended.
pub fn html_output_path(file_path: &str) -> String {
    let mut output = match file_path.strip_suffix(".toml") {
        Some(stem) => format!("{}.html", stem),
        None => format!("{}.html", file_path),
    };
    // Remove the UNC prefix on Windows if present
    if cfg!(target_os = "windows") && output.starts_with(r"\\?\") {
        output = output[4..].to_string();
    }
    output
}

pub fn version_string() -> String {
    format!("loracurrent {}", env!("CARGO_PKG_VERSION"))
}

pub fn print_version() {
    println!("{}", version_string());
}

pub fn print_error(error: &str) {
    const RED: &str = "\x1b[31m";
    const RESET: &str = "\x1b[0m";
    println!("{}Problem running loracurrent: {error}{}", RED, RESET);
}

pub fn print_help() {
    // ANSI color codes
    const BOLD: &str = "\x1b[1m";
    const CYAN: &str = "\x1b[36m";
    const GREEN: &str = "\x1b[32m";
    const YELLOW: &str = "\x1b[33m";
    const RESET: &str = "\x1b[0m";

    println!(
        "🔋 Radio current-draw calculator for LoRa energy modeling{}",
        RESET
    );
    println!();
    println!("{}{}VERSION:{}", BOLD, YELLOW, RESET);
    println!("    {}{}{}", GREEN, env!("CARGO_PKG_VERSION"), RESET);
    println!();
    println!("{}{}USAGE:{}", BOLD, YELLOW, RESET);
    println!("    {} loracurrent <FILE_PATH>{}", GREEN, RESET);
    println!();
    println!("     FILE_PATH: path to a toml config file");
    println!();
    println!("     The toml file selects a current model (linear, constant or sx1272),");
    println!("     an optional list of radio state transitions and an optional tx power sweep.");
    println!("     An html table is created next to the source file.");
    println!();
    println!("{}{}OPTIONS:{}", BOLD, YELLOW, RESET);
    println!(
        "    {}  -v, --version{}{}    Print version information",
        GREEN, RESET, RESET
    );
    println!(
        "    {}  -h, --help{}{}       Print help information",
        GREEN, RESET, RESET
    );
    println!();
    println!("{}{}ENVIRONMENT:{}", BOLD, YELLOW, RESET);
    println!("    {}  RUST_LOG{}         Log filter, such as `loracurrent=debug`", GREEN, RESET);
    println!();
    println!("{}{}EXAMPLES:{}", BOLD, YELLOW, RESET);
    println!("    {} # Single file (Relative path){}", CYAN, RESET);
    println!("    {} loracurrent files/sx1272_config.toml{}", GREEN, RESET);
    println!();
}

pub fn print_model(model: &CurrentModel) {
    println!();
    println!("Model: {}", model.name());
    if let Some(voltage) = model.voltage() {
        println!("Voltage:\t{:>8.2} V", voltage);
    }
    if let Some(sx1272) = model.as_sx1272() {
        for state in RadioState::ALL {
            // the formatting `{:>8.3}` aligns the values on the decimal,
            // with three digits after the decimal (µA resolution in mA)
            println!("{} Current:\t{:>8.3} mA", state, sx1272.current(state) * 1e3);
        }
        println!("Tx Power:\t{:>8.2} dBm", sx1272.tx_power_to_tx_current());
        println!("PA Boost:\t{:>8}", sx1272.pa_boost());
        println!("LNA Boost:\t{:>8}", sx1272.lna_boost());
    }
}

pub fn print_transitions(steps: &[ReportStep]) {
    if steps.is_empty() {
        return;
    }
    println!();
    println!("State Transitions:");
    println!("------------------");
    for (i, step) in steps.iter().enumerate() {
        println!("Step {}: {}", i, step);
        if let Some(power) = step.power {
            println!("\tPower:\t{:>8.3} mW", power * 1e3);
        }
    }
}

pub fn print_sweep(sweep: &[SweepPoint]) {
    if sweep.is_empty() {
        return;
    }
    println!();
    println!("Transmit Current Sweep:");
    println!("-----------------------");
    for point in sweep {
        match point.tx_current {
            Some(current) => println!(
                "{:>8.2} dBm\t{:>8.3} mA",
                point.tx_power_dbm,
                current * 1e3
            ),
            None => println!("{:>8.2} dBm\t     N/A", point.tx_power_dbm),
        }
    }
}
