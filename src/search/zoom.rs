//! Viewer zoom capability
//!
//! Search needs the zoom factor the viewer is currently rendering at so the
//! match rectangles land where the user sees the text. Viewer backends
//! report it differently, so the orchestrator only sees the capability
//! trait; `ViewerState` is the wire-level implementation the browser UI
//! sends along with a search request.

use serde::Deserialize;

/// Scale used when no viewer reports one.
pub const DEFAULT_SCALE: f64 = 1.0;

/// Something that knows the viewer's current zoom factor.
pub trait ZoomProvider: Sync {
    /// The current scale, or `None` if this backend cannot tell.
    fn current_scale(&self) -> Option<f64>;
}

/// Viewer state as reported by the browser UI.
///
/// Older viewer builds expose the scale one level down under `viewer`, so
/// both locations are accepted; the top-level field wins when both are set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViewerState {
    pub scale: Option<f64>,
    pub viewer: Option<NestedViewer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NestedViewer {
    pub scale: Option<f64>,
}

impl ZoomProvider for ViewerState {
    fn current_scale(&self) -> Option<f64> {
        self.scale
            .or_else(|| self.viewer.as_ref().and_then(|v| v.scale))
    }
}

/// Resolve the scale to search at, logging when the viewer could not tell.
pub fn resolve_scale(provider: &dyn ZoomProvider) -> f64 {
    match provider.current_scale() {
        Some(scale) => scale,
        None => {
            tracing::warn!(
                "Unable to determine current zoom, defaulting to {}",
                DEFAULT_SCALE
            );
            DEFAULT_SCALE
        }
    }
}
