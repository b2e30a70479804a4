//! utility modules around the symbolic engine used by the derivator driver
/// settings of the driver read from a TOML file
pub mod config;
/// terminal and file logging through simplelog
pub mod logger;
/// gnuplot plots of derivatives and Taylor polynomials
pub mod plots;
/// LaTeX report writer
pub mod report;
