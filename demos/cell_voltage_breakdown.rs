// Voltage breakdown of a reduction cell and an alumina depletion sweep.
//
//   cargo run --example cell_voltage_breakdown [scenario.json]
//
// RUST_LOG=hh_cell_model=debug shows the intermediate quantities.

use hh_cell_model::scenario;
use hh_cell_model::{evaluate, ErrorKind};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| concat!(env!("CARGO_MANIFEST_DIR"), "/demos/default_cell.json").to_string());
    let snapshot = scenario::from_json_file(&path)?;

    println!("🏭 Scenario: {}", path);
    evaluate(&snapshot).print_report();

    println!();
    println!("📉 Alumina depletion sweep");
    println!("{:>10} {:>10} {:>10} {:>10}", "Al2O3 wt%", "E_rev V", "eta_c V", "total V");

    let mut al2o3 = snapshot.bath.al2o3_wt_pct();
    while al2o3 > 0.0 {
        let eval = evaluate(&snapshot.with_al2o3_wt_pct(al2o3)?);
        let v = &eval.voltages;

        match (&v.equilibrium_potential, &v.concentration_overvoltage) {
            (Ok(e_rev), Ok(eta_c)) => {
                let total = v.modelled_total()?;
                println!("{:>10.2} {:>10.4} {:>10.4} {:>10.4}", al2o3, e_rev, eta_c, total);
            }
            (_, Err(e)) if e.kind() == ErrorKind::Domain => {
                println!("{:>10.2} ⚠️  {}", al2o3, e);
                break;
            }
            (Err(e), _) | (_, Err(e)) => {
                println!("{:>10.2} ❌ {}", al2o3, e);
                break;
            }
        }
        al2o3 -= 0.25;
    }

    Ok(())
}
