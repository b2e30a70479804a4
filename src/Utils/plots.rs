//! Plots of an expression, its derivatives and its Taylor polynomial, rendered to PNG
//! through gnuplot.
//!
//! Sampling is separate from rendering: `sample_points` and `taylor_plot_data` only
//! evaluate trees, `plot_derivative` and `plot_taylor` hand the samples to gnuplot.
use crate::symbolic::errors::{ExpressionError, Result};
use crate::symbolic::symbolic_engine::Expression;
use crate::symbolic::utils::linspace;
use gnuplot::{AxesCommon, Caption, Color, Figure, PointSymbol, RGBString};
use log::{info, warn};
use std::error::Error;

/// half width of the range a derivative is plotted over
pub const DERIVATIVE_HALF_RANGE: f64 = 10.0;
/// half width of the range a Taylor polynomial is compared with its function over
pub const TAYLOR_HALF_RANGE: f64 = 2.0;

/// Samples of the derivative of order `n` (0 is the expression itself) at `n_points`
/// evenly spaced points of `[x_min, x_max]`.
///
/// Points where the value is not finite, hits a division by zero or meets a little-o
/// term are dropped. Any other error is returned.
pub fn sample_points(
    expr: &mut Expression,
    n: usize,
    x_min: f64,
    x_max: f64,
    n_points: usize,
) -> Result<(Vec<f64>, Vec<f64>)> {
    if n_points < 2 || !(x_min < x_max) {
        return Err(ExpressionError::InvalidArgument(format!(
            "cannot sample {} points over [{}, {}]",
            n_points, x_min, x_max
        )));
    }
    let mut xs = Vec::with_capacity(n_points);
    let mut ys = Vec::with_capacity(n_points);
    let mut dropped = 0;
    for x in linspace(x_min, x_max, n_points) {
        match expr.evaluate_derivative_at(n, x) {
            Ok(y) if y.is_finite() => {
                xs.push(x);
                ys.push(y);
            }
            Ok(_) => dropped += 1,
            Err(ExpressionError::DivisionByZero | ExpressionError::RemainderEvaluation) => {
                dropped += 1
            }
            Err(e) => return Err(e),
        }
    }
    if dropped > 0 {
        warn!("{} of {} plot samples dropped", dropped, n_points);
    }
    Ok((xs, ys))
}

/// Everything drawn on the Taylor comparison plot.
#[derive(Debug, Clone, PartialEq)]
pub struct TaylorPlotData {
    pub function: (Vec<f64>, Vec<f64>),
    pub approximation: (Vec<f64>, Vec<f64>),
    pub tangent: (Vec<f64>, Vec<f64>),
    /// expansion point (x0, f(x0))
    pub point: (f64, f64),
}

/// Samples the function, its Taylor polynomial (remainder dropped) and the tangent line
/// over `x0 ± TAYLOR_HALF_RANGE`. The first derivative is computed if needed.
pub fn taylor_plot_data(
    expr: &mut Expression,
    taylor: &Expression,
    n_points: usize,
) -> Result<TaylorPlotData> {
    let x0 = expr.diff_variable_value()?;
    let (x_min, x_max) = (x0 - TAYLOR_HALF_RANGE, x0 + TAYLOR_HALF_RANGE);
    expr.derive_nth(1)?;

    let function = sample_points(expr, 0, x_min, x_max, n_points)?;
    let mut polynomial = taylor.without_remainder()?;
    let approximation = sample_points(&mut polynomial, 0, x_min, x_max, n_points)?;

    let y0 = expr.evaluate_derivative_at(0, x0)?;
    let slope = expr.evaluate_derivative_at(1, x0)?;
    let tangent_x = linspace(x_min, x_max, n_points);
    let tangent_y: Vec<f64> = tangent_x.iter().map(|x| y0 + slope * (x - x0)).collect();

    Ok(TaylorPlotData {
        function,
        approximation,
        tangent: (tangent_x, tangent_y),
        point: (x0, y0),
    })
}

/// Plots the derivative of order `n` over `x0 ± DERIVATIVE_HALF_RANGE` into `filename`.
pub fn plot_derivative(
    expr: &mut Expression,
    n: usize,
    n_points: usize,
    filename: &str,
) -> std::result::Result<(), Box<dyn Error>> {
    let x0 = expr.diff_variable_value()?;
    let (x, y) = sample_points(
        expr,
        n,
        x0 - DERIVATIVE_HALF_RANGE,
        x0 + DERIVATIVE_HALF_RANGE,
        n_points,
    )?;
    let name = format!("derivative {}", n);
    let arg = expr.diff_variable_name()?.to_string();

    let mut fg = Figure::new();
    fg.axes2d()
        .set_title(&name, &[])
        .set_x_label(&arg, &[])
        .set_y_label(&name, &[])
        .lines(&x, &y, &[Caption(&name), Color(RGBString("blue"))]);
    fg.save_to_png(filename, 800, 600)
        .map_err(|e| format!("gnuplot failed on {}: {:?}", filename, e))?;
    info!("plot of derivative {} saved to {}", n, filename);
    Ok(())
}

/// Plots the function, its Taylor polynomial, the expansion point and the tangent line.
pub fn plot_taylor(
    expr: &mut Expression,
    taylor: &Expression,
    n_points: usize,
    filename: &str,
) -> std::result::Result<(), Box<dyn Error>> {
    let data = taylor_plot_data(expr, taylor, n_points)?;
    let arg = expr.diff_variable_name()?.to_string();

    let mut fg = Figure::new();
    fg.axes2d()
        .set_title("Taylor series", &[])
        .set_x_label(&arg, &[])
        .set_y_label("f", &[])
        .lines(
            &data.function.0,
            &data.function.1,
            &[Caption("function"), Color(RGBString("blue"))],
        )
        .lines(
            &data.approximation.0,
            &data.approximation.1,
            &[Caption("Taylor polynomial"), Color(RGBString("red"))],
        )
        .lines(
            &data.tangent.0,
            &data.tangent.1,
            &[Caption("tangent"), Color(RGBString("green"))],
        )
        .points(
            &[data.point.0],
            &[data.point.1],
            &[Caption("x0"), Color(RGBString("black")), PointSymbol('O')],
        );
    fg.save_to_png(filename, 800, 600)
        .map_err(|e| format!("gnuplot failed on {}: {:?}", filename, e))?;
    info!("Taylor plot saved to {}", filename);
    Ok(())
}
