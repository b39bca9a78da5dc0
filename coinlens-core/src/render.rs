//! Capability-typed rendering seam.
//!
//! Renderers advertise what they can draw the same way connectors advertise
//! what they can fetch: through `as_*` accessors on a directory trait. A
//! renderer that never registers the matrix capability is simply skipped for
//! that panel; nothing downstream special-cases a disabled view.

use crate::types::{CoinlensError, CorrelationMatrix, DashboardState, NormalizedTable};

/// Focused role trait for renderers that draw normalized series tables.
pub trait SeriesRenderer {
    /// Render the aligned, normalized table (the line-chart view).
    ///
    /// # Errors
    /// Returns an error if the output sink rejects the write.
    fn render_series(&mut self, table: &NormalizedTable) -> Result<(), CoinlensError>;
}

/// Focused role trait for renderers that draw correlation heat-maps.
pub trait MatrixRenderer {
    /// Render the correlation matrix (the heat-map view).
    ///
    /// # Errors
    /// Returns an error if the output sink rejects the write.
    fn render_matrix(&mut self, matrix: &CorrelationMatrix) -> Result<(), CoinlensError>;
}

/// Main renderer trait. Exposes capability discovery for the render driver.
pub trait DashboardRenderer {
    /// A stable identifier for logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Advertise series rendering by returning a usable trait object when supported.
    fn as_series_renderer(&mut self) -> Option<&mut dyn SeriesRenderer> {
        None
    }

    /// Advertise matrix rendering by returning a usable trait object when supported.
    fn as_matrix_renderer(&mut self) -> Option<&mut dyn MatrixRenderer> {
        None
    }

    /// Hook for the non-data states (`Loading`, `Failed`). Default: no output.
    ///
    /// # Errors
    /// Returns an error if the output sink rejects the write.
    fn render_status(&mut self, state: &DashboardState) -> Result<(), CoinlensError> {
        let _ = state;
        Ok(())
    }
}

/// Drive a renderer with the current dashboard state.
///
/// `Ready` fans the snapshot out to whichever data capabilities the renderer
/// advertises; every other state goes to the status hook.
///
/// # Errors
/// Propagates the first renderer error.
pub fn render_dashboard(
    renderer: &mut dyn DashboardRenderer,
    state: &DashboardState,
) -> Result<(), CoinlensError> {
    match state {
        DashboardState::Ready(snapshot) => {
            if let Some(r) = renderer.as_series_renderer() {
                r.render_series(&snapshot.table)?;
            }
            if let Some(r) = renderer.as_matrix_renderer() {
                r.render_matrix(&snapshot.matrix)?;
            }
            Ok(())
        }
        other => renderer.render_status(other),
    }
}
