#![allow(non_snake_case)]
use RustedDerivator::Utils::config::DerivatorConfig;
use RustedDerivator::Utils::logger::init_logger;
use RustedDerivator::Utils::plots::{plot_derivative, plot_taylor};
use RustedDerivator::Utils::report::LatexReport;
use RustedDerivator::symbolic::symbolic_engine::Expression;
use log::{error, info};
use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::process::ExitCode;

const DEFAULT_CONFIG: &str = "derivator.toml";

/// Configuration from the first argument, from `derivator.toml` in the working
/// directory if it exists, built-in defaults otherwise.
fn load_config() -> Result<DerivatorConfig, Box<dyn Error>> {
    match std::env::args().nth(1) {
        Some(path) => Ok(DerivatorConfig::from_file(path)?),
        None if Path::new(DEFAULT_CONFIG).exists() => {
            Ok(DerivatorConfig::from_file(DEFAULT_CONFIG)?)
        }
        None => Ok(DerivatorConfig::default()),
    }
}

fn run(config: &DerivatorConfig) -> Result<(), Box<dyn Error>> {
    let mut expr = Expression::from_file(&config.input)?;
    if expr.variables().is_empty() {
        return Err(format!(
            "{} holds no variable to differentiate by",
            config.input.display()
        )
        .into());
    }
    if let Some(name) = &config.variable {
        expr.set_diff_variable(name)?;
    }
    expr.set_diff_variable_value(config.point)?;
    info!(
        "expression {} differentiated by {} at {}",
        expr,
        expr.diff_variable_name()?,
        config.point
    );

    let order = config.derivatives.max(config.taylor_order);
    expr.derive_nth(order)?;
    let taylor = expr.taylor_series(config.taylor_order)?;
    info!("Taylor series: {}", taylor);

    let mut figures = Vec::new();
    if config.plots {
        for n in 1..=config.derivatives {
            let filename = format!("derivative_{}.png", n);
            plot_derivative(&mut expr, n, config.plot_points, &filename)?;
            figures.push(filename);
        }
        let filename = "taylor.png".to_string();
        plot_taylor(&mut expr, &taylor, config.plot_points, &filename)?;
        figures.push(filename);
    }

    let file = File::create(&config.report)?;
    let mut report = LatexReport::new(BufWriter::new(file));
    report.header("Derivatives and Taylor series")?;
    report.section("Expression")?;
    report.function(&expr, 0)?;
    report.section("Derivatives")?;
    report.derivatives(&expr, config.derivatives)?;
    report.section("Taylor series")?;
    report.paragraph(&format!(
        "Expansion of order {} around ${} = {}$:",
        config.taylor_order,
        expr.diff_variable_name()?,
        config.point
    ))?;
    report.equation(taylor.root()?, taylor.variables())?;
    if !figures.is_empty() {
        report.section("Plots")?;
        for figure in &figures {
            report.figure(figure)?;
        }
    }
    report.footer()?;
    info!("report written to {}", config.report.display());
    Ok(())
}

fn main() -> ExitCode {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    init_logger(config.log_level, config.log_file.as_deref());
    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
