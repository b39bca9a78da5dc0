//! Plain-text reference renderer.
//!
//! Writes the normalized series as a table and the correlation matrix as a
//! fixed-width grid to any `io::Write` sink. Useful for examples, smoke tests,
//! and as a template for richer renderers: register only the capabilities you
//! can draw and the driver skips the rest.

use std::io::Write;

use coinlens_core::render::{DashboardRenderer, MatrixRenderer, SeriesRenderer};
use coinlens_core::{CoinlensError, CorrelationMatrix, DashboardState, NormalizedTable};

/// Width of every numeric cell; fits "-0.999999" with a space of padding.
const CELL: usize = 10;

/// Text renderer over an arbitrary writer.
///
/// Implements all three render capabilities; wrap it in a newtype that
/// withholds an `as_*` accessor to exercise partial renderers.
pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    /// Build a renderer writing to `out`.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the renderer and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn sink_err(e: &std::io::Error) -> CoinlensError {
        CoinlensError::Other(format!("render sink: {e}"))
    }
}

impl<W: Write> SeriesRenderer for TextRenderer<W> {
    fn render_series(&mut self, table: &NormalizedTable) -> Result<(), CoinlensError> {
        let mut write = || -> std::io::Result<()> {
            write!(self.out, "{:<12}", "date")?;
            for key in &table.keys {
                write!(self.out, "{:>CELL$}", key.as_str())?;
            }
            writeln!(self.out)?;
            for row in &table.rows {
                write!(self.out, "{:<12}", row.date_label())?;
                for key in &table.keys {
                    let v = row.get(key).unwrap_or(0.0);
                    write!(self.out, "{v:>CELL$.6}")?;
                }
                writeln!(self.out)?;
            }
            Ok(())
        };
        write().map_err(|e| Self::sink_err(&e))
    }
}

impl<W: Write> MatrixRenderer for TextRenderer<W> {
    fn render_matrix(&mut self, matrix: &CorrelationMatrix) -> Result<(), CoinlensError> {
        let mut write = || -> std::io::Result<()> {
            write!(self.out, "{:<CELL$}", "")?;
            for key in matrix.keys() {
                write!(self.out, "{:>CELL$}", key.as_str())?;
            }
            writeln!(self.out)?;
            for (key, row) in matrix.keys().iter().zip(matrix.values()) {
                write!(self.out, "{:<CELL$}", key.as_str())?;
                for v in row {
                    write!(self.out, "{v:>CELL$.6}")?;
                }
                writeln!(self.out)?;
            }
            Ok(())
        };
        write().map_err(|e| Self::sink_err(&e))
    }
}

impl<W: Write> DashboardRenderer for TextRenderer<W> {
    fn name(&self) -> &'static str {
        "text"
    }

    fn as_series_renderer(&mut self) -> Option<&mut dyn SeriesRenderer> {
        Some(self)
    }

    fn as_matrix_renderer(&mut self) -> Option<&mut dyn MatrixRenderer> {
        Some(self)
    }

    fn render_status(&mut self, state: &DashboardState) -> Result<(), CoinlensError> {
        let line = match state {
            DashboardState::Loading => "loading...".to_string(),
            DashboardState::Failed { error } => format!("refresh failed: {error}"),
            _ => return Ok(()),
        };
        writeln!(self.out, "{line}").map_err(|e| Self::sink_err(&e))
    }
}
