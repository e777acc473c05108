use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::report::{ReportStep, SweepPoint};
use crate::state::RadioState;
use crate::CurrentModel;

pub fn generate_html_table(
    model: &CurrentModel,
    steps: &[ReportStep],
    sweep: &[SweepPoint],
    output_path_str: &str,
) -> Result<(), std::io::Error> {
    let path = Path::new(output_path_str);
    let mut file = File::create(path)?;

    writeln!(file, "<!DOCTYPE html>")?;
    writeln!(file, "<html>")?;
    writeln!(file, "<head>")?;
    writeln!(file, "<title>Radio Current Draw</title>")?;
    writeln!(file, "<style>")?;
    writeln!(file, "table {{ border-collapse: collapse; }}")?;
    writeln!(file, ".report {{ width: 100%; }}")?;
    writeln!(file, ".parameters {{ width: auto; }}")?;
    writeln!(file, ".parameters td:nth-child(2) {{ text-align: right; }}")?;
    writeln!(
        file,
        "th, td {{ border: 1px solid #ddd; padding: 8px; text-align: left; }}"
    )?;
    writeln!(file, "th {{ background-color: #f2f2f2; }}")?;
    writeln!(file, "tr:nth-child(even) {{ background-color: #f9f9f9; }}")?;
    writeln!(file, "</style>")?;
    writeln!(file, "</head>")?;
    writeln!(file, "<body>")?;
    writeln!(file, "<h1>Radio Current Draw</h1>")?;

    writeln!(file, "<h2>Model</h2>")?;
    writeln!(file, "<table class=\"parameters\">")?;
    writeln!(file, "<tr><th>Parameter</th><th>Value</th><th>Unit</th></tr>")?;
    writeln!(file, "<tr><td>Model</td><td>{}</td><td></td></tr>", model.name())?;
    if let Some(voltage) = model.voltage() {
        writeln!(file, "<tr><td>Voltage</td><td>{:.2}</td><td>V</td></tr>", voltage)?;
    }
    if let Some(sx1272) = model.as_sx1272() {
        for state in RadioState::ALL {
            writeln!(
                file,
                "<tr><td>{} Current</td><td>{:.3}</td><td>mA</td></tr>",
                state,
                sx1272.current(state) * 1e3
            )?;
        }
        writeln!(
            file,
            "<tr><td>PA Boost</td><td>{}</td><td></td></tr>",
            sx1272.pa_boost()
        )?;
        writeln!(
            file,
            "<tr><td>LNA Boost</td><td>{}</td><td></td></tr>",
            sx1272.lna_boost()
        )?;
    }
    writeln!(file, "</table>")?;
    writeln!(file, "<br>")?;

    if !steps.is_empty() {
        writeln!(file, "<h2>State Transitions</h2>")?;
        writeln!(file, "<table class=\"report\">")?;
        writeln!(file, "<tr>")?;
        writeln!(file, "<th>Step</th>")?;
        writeln!(file, "<th>State</th>")?;
        writeln!(file, "<th>Tx Power (dBm)</th>")?;
        writeln!(file, "<th>Bandwidth (kHz)</th>")?;
        writeln!(file, "<th>Current (mA)</th>")?;
        writeln!(file, "<th>Power (mW)</th>")?;
        writeln!(file, "</tr>")?;
        for (i, step) in steps.iter().enumerate() {
            writeln!(file, "<tr>")?;
            writeln!(file, "<td>{}</td>", i)?;
            writeln!(file, "<td>{}</td>", step.transition.state)?;
            write_optional_cell(&mut file, step.transition.tx_power_dbm, 1.0)?;
            write_optional_cell(&mut file, step.transition.bandwidth_hz, 1e-3)?;
            write_optional_cell(&mut file, step.current, 1e3)?;
            write_optional_cell(&mut file, step.power, 1e3)?;
            writeln!(file, "</tr>")?;
        }
        writeln!(file, "</table>")?;
        writeln!(file, "<br>")?;
    }

    if !sweep.is_empty() {
        writeln!(file, "<h2>Transmit Current Sweep</h2>")?;
        writeln!(file, "<table class=\"parameters\">")?;
        writeln!(file, "<tr><th>Tx Power (dBm)</th><th>Tx Current (mA)</th></tr>")?;
        for point in sweep {
            writeln!(file, "<tr>")?;
            writeln!(file, "<td>{:.2}</td>", point.tx_power_dbm)?;
            write_optional_cell(&mut file, point.tx_current, 1e3)?;
            writeln!(file, "</tr>")?;
        }
        writeln!(file, "</table>")?;
    }

    writeln!(file, "</body>")?;
    writeln!(file, "</html>")?;

    Ok(())
}

fn write_optional_cell(file: &mut File, value: Option<f64>, scale: f64) -> Result<(), std::io::Error> {
    match value {
        Some(value) => writeln!(file, "<td>{:.3}</td>", value * scale),
        None => writeln!(file, "<td>-</td>"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{run_transitions, tx_current_sweep, Sweep, Transition};
    use crate::Sx1272CurrentModel;

    #[test]
    fn writes_all_sections() {
        let mut path = std::env::temp_dir();
        path.push(format!("loracurrent_plot_{}.html", std::process::id()));

        let mut model = CurrentModel::from(Sx1272CurrentModel::default());
        let steps = run_transitions(&mut model, &[Transition::transmit(17.0)]).unwrap();
        let sweep = tx_current_sweep(&model, &Sweep::default());
        generate_html_table(&model, &steps, &sweep, path.to_str().unwrap()).unwrap();

        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("<h2>State Transitions</h2>"));
        assert!(html.contains("<h2>Transmit Current Sweep</h2>"));
        assert!(html.contains("<td>77.138</td>"));
        assert!(html.contains("<td>-</td>"));
        std::fs::remove_file(&path).unwrap();
    }
}
