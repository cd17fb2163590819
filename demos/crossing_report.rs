use std::error::Error;

use em_induction::prelude::*;
use tracing_subscriber::EnvFilter;

const BUILTIN: &str = include_str!("crossing_138kv.json");

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Scenario file from the first argument, or the bundled 138 kV crossing.
    let text = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => BUILTIN.to_owned(),
    };
    let config: ScenarioConfig = serde_json::from_str(&text)?;
    let scenario = config.build()?;
    tracing::info!(
        name = %scenario.line.name,
        conductors = scenario.line.conductors().len(),
        "scenario loaded"
    );

    let report = scenario.analyze()?;
    println!(
        "frequency {:.1} Hz, soil {:.1} Ω·m, D_e {:.1} m",
        report.frequency_hz, report.soil_resistivity, report.equivalent_depth
    );
    println!("conductor, kind, d(m), D_image(m), Z_re(Ω/m), Z_im(Ω/m), |V|(V), angle(°)");
    for c in &report.couplings {
        println!(
            "{}, {:?}, {:.3}, {:.1}, {:.4e}, {:.4e}, {:.3}, {:.1}",
            c.index + 1,
            c.kind,
            c.separation,
            c.image_distance,
            c.mutual_impedance.re,
            c.mutual_impedance.im,
            c.contribution.norm(),
            phasor_angle_deg(c.contribution),
        );
    }
    println!(
        "total induced voltage: {:.3} V ∠ {:.1}°",
        report.magnitude(),
        report.phase_deg()
    );

    if let Some(characteristics) = scenario.duct_characteristics() {
        let ch = characteristics?;
        println!(
            "self impedance {:.4e} Ω/m, shunt admittance {:.4e} S/m, GMR {:.4} m",
            ch.self_impedance, ch.shunt_admittance, ch.geometric_mean_radius
        );
        println!(
            "characteristic impedance {:.3} Ω, characteristic length {:.1} m",
            ch.characteristic_impedance.norm(),
            ch.characteristic_length
        );
    }

    let coating = assess_coating(report.total_voltage, scenario.coating_kind);
    let density = ac_current_density(
        report.total_voltage,
        report.soil_resistivity,
        DEFAULT_HOLIDAY_DIAMETER,
    )?;
    println!(
        "coating {:?}: {:.3} kV of {:.1} kV ({}), AC density {:.2} A/m² ({:?} risk)",
        coating.coating,
        coating.voltage_kv,
        coating.limit_kv,
        if coating.safe { "within limit" } else { "EXCEEDED" },
        density,
        CorrosionRisk::classify(density),
    );

    let soil = config
        .scenario
        .soil
        .unwrap_or(SoilModel::uniform(report.soil_resistivity));
    let conductors = scenario.line.conductors();
    let duct = &scenario.duct;
    let frequencies = logspace_hz(10.0, 1000.0, 7)?;
    let response = frequency_response(duct, conductors, &soil, frequencies)?;
    println!("f(Hz), |V|(V)");
    for (p, m) in response.iter().zip(mag(response.iter().map(|p| p.voltage))) {
        println!("{:.1}, {:.3}", p.parameter, m);
    }

    let offsets = linspace(-100.0, 100.0, 9);
    let profile = lateral_profile(duct, conductors, &scenario.parameters, offsets)?;
    println!("offset(m), |V|(V), angle(°)");
    let angles = phase_deg(profile.iter().map(|p| p.voltage));
    for (p, angle) in profile.iter().zip(angles) {
        println!("{:.1}, {:.3}, {:.1}", p.parameter, p.voltage.norm(), angle);
    }

    if let SoilModel::TwoLayer { upper_thickness, .. } = soil {
        let upper = logspace_hz(10.0, 1000.0, 5)?;
        let lower = logspace_hz(100.0, 10_000.0, 5)?;
        let grid = soil_sensitivity(
            duct,
            conductors,
            report.frequency_hz,
            upper_thickness,
            &upper,
            &lower,
        )?;
        println!("rho1(Ω·m), rho2(Ω·m), rho_eq(Ω·m), |V|(V)");
        for point in &grid {
            println!(
                "{:.1}, {:.1}, {:.1}, {:.3}",
                point.upper_resistivity,
                point.lower_resistivity,
                point.equivalent_resistivity,
                point.voltage.norm()
            );
        }
    }
    Ok(())
}
