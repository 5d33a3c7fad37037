//! Text rendering of a [`CellEvaluation`].

use crate::cell_evaluation::CellEvaluation;
use crate::error::Result;
use colored::Colorize;
use std::fmt;

const LABEL_WIDTH: usize = 36;

fn format_value(value: &Result<f64>, precision: usize, unit: &str) -> String {
    match value {
        Ok(v) => format!("{v:>12.precision$} {unit}"),
        Err(e) => format!("error: {e}"),
    }
}

impl CellEvaluation {
    /// (label, value, formatted text) rows shared by the plain and coloured renderings.
    fn rows(&self) -> Vec<(&'static str, Result<f64>, String)> {
        let s = &self.snapshot;
        let mut rows = vec![
            ("bath temperature", Ok(s.bath.temperature_k()), format!("{:>12.2} K", s.bath.temperature_k())),
            ("cell current", Ok(s.operating_point.current_ka()), format!("{:>12.1} kA", s.operating_point.current_ka())),
            ("anode-cathode distance", Ok(s.operating_point.acd_cm()), format!("{:>12.2} cm", s.operating_point.acd_cm())),
            ("conductivity", self.conductivity.clone(), format_value(&self.conductivity, 4, "S/cm")),
            ("resistivity", self.resistivity.clone(), format_value(&self.resistivity, 4, "Ω·cm")),
            ("alumina saturation", self.alumina_saturation.clone(), format_value(&self.alumina_saturation, 3, "wt%")),
            ("relative saturation", self.relative_saturation.clone(), format_value(&self.relative_saturation, 3, "")),
            ("bath ratio", self.bath_ratio.clone(), format_value(&self.bath_ratio, 3, "")),
            ("cryolite ratio", self.cryolite_ratio.clone(), format_value(&self.cryolite_ratio, 3, "")),
            (
                "reaction limited current density",
                self.reaction_limited_current_density.clone(),
                format_value(&self.reaction_limited_current_density, 5, "A/cm²"),
            ),
            ("anode footprint", Ok(self.footprint_cm2), format!("{:>12.1} cm²", self.footprint_cm2)),
            (
                "bath effective area",
                Ok(self.bath_effective_area_cm2),
                format!("{:>12.1} cm²", self.bath_effective_area_cm2),
            ),
            ("current density", self.current_density.clone(), format_value(&self.current_density, 4, "A/cm²")),
            (
                "critical current density",
                self.critical_current_density.clone(),
                format_value(&self.critical_current_density, 4, "A/cm²"),
            ),
        ];

        for (label, value) in self.voltages.components() {
            let text = format_value(&value, 4, "V");
            rows.push((label, value, text));
        }
        let total = self.voltages.modelled_total();
        let text = format_value(&total, 4, "V");
        rows.push(("modelled cell voltage", total, text));
        rows
    }

    /// Print the evaluation to stdout with failed quantities highlighted.
    pub fn print_report(&self) {
        println!("{}", "Cell evaluation".bold());
        for (label, value, text) in self.rows() {
            let text = match value {
                Ok(_) => text.normal(),
                Err(_) => text.red(),
            };
            println!("  {:<width$} {}", label, text, width = LABEL_WIDTH);
        }

        println!("{}", "Anode assembly".bold());
        let current_ka = self.snapshot.operating_point.current_ka();
        for (component, drop) in self.snapshot.assembly.voltage_drops(current_ka) {
            if drop > 0.0 {
                println!("  {:<width$} {:>12.5} V", component.as_str(), drop, width = LABEL_WIDTH);
            }
        }
    }
}

impl fmt::Display for CellEvaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, _, text) in self.rows() {
            writeln!(f, "{:<width$} {}", label, text, width = LABEL_WIDTH)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::cell_evaluation::{evaluate, CellSnapshot};

    #[test]
    fn test_report_lists_every_quantity() {
        let report = evaluate(&CellSnapshot::default()).to_string();
        for label in [
            "conductivity",
            "equilibrium potential",
            "concentration overvoltage",
            "bath drop",
            "modelled cell voltage",
        ] {
            assert!(report.contains(label), "missing {label}");
        }
        assert!(report.contains("2.0944 S/cm"));
        assert!(!report.contains("error:"));
    }

    #[test]
    fn test_report_shows_failed_fields_inline() {
        let snapshot = CellSnapshot::default().with_al2o3_wt_pct(12.0).unwrap();
        let report = evaluate(&snapshot).to_string();
        let line = report
            .lines()
            .find(|l| l.starts_with("equilibrium potential"))
            .unwrap();
        assert!(line.contains("error: equilibrium potential is undefined"));
        assert!(report.lines().any(|l| l.starts_with("modelled cell voltage") && l.contains("error:")));
    }
}
