//! Surface placement
//!
//! The UI measures the element hosting the web content and reports its
//! border box together with border and padding widths. Placement is the
//! content box in logical pixels, shifted by the chrome offset, with the
//! native minimum height applied.
//!
//! Measurements arrive whenever the container, the window or the element's
//! class/style changes. They are coalesced: only the last measurement seen
//! before a frame is applied.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Edges {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Border box of the hosting element as measured by the UI
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ContainerBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub border: Edges,
    #[serde(default)]
    pub padding: Edges,
}

impl ContainerBox {
    /// Content box with border and padding excluded, rounded to whole
    /// pixels and clamped at zero
    pub fn content_bounds(&self) -> Bounds {
        let inset_left = self.border.left + self.padding.left;
        let inset_top = self.border.top + self.padding.top;
        let inset_x = inset_left + self.border.right + self.padding.right;
        let inset_y = inset_top + self.border.bottom + self.padding.bottom;

        Bounds {
            x: whole(self.x + inset_left),
            y: whole(self.y + inset_top),
            width: whole(self.width - inset_x),
            height: whole(self.height - inset_y),
        }
    }
}

fn whole(value: f64) -> f64 {
    if value.is_finite() {
        value.round().max(0.0)
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometryConfig {
    /// Content narrower or shorter than this cannot host a surface yet
    pub min_surface_size: f64,
    /// Native webviews on macOS refuse to shrink below this height, so
    /// surfaces are pinned to it instead of following a shorter container
    pub min_height: f64,
    /// Shift between the measured container and the native placement region
    pub chrome_offset: Offset,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            min_surface_size: 2.0,
            min_height: 485.0,
            chrome_offset: Offset::default(),
        }
    }
}

impl GeometryConfig {
    /// Whether content bounds are large enough to create a surface in
    pub fn is_placeable(&self, content: &Bounds) -> bool {
        content.width >= self.min_surface_size && content.height >= self.min_surface_size
    }

    /// Native bounds for a surface filling `content`
    pub fn placement(&self, content: Bounds) -> Bounds {
        Bounds {
            x: content.x + self.chrome_offset.x,
            y: content.y + self.chrome_offset.y,
            width: content.width,
            height: content.height.max(self.min_height),
        }
    }
}

pub struct GeometryReconciler {
    config: GeometryConfig,
    /// Latest measurement not yet applied
    pending: Option<ContainerBox>,
    /// Content bounds applied on the last frame
    content: Option<Bounds>,
}

impl GeometryReconciler {
    pub fn new(config: GeometryConfig) -> Self {
        Self {
            config,
            pending: None,
            content: None,
        }
    }

    pub fn config(&self) -> &GeometryConfig {
        &self.config
    }

    /// Queue a measurement for the next frame, replacing any queued one
    pub fn observe(&mut self, container: ContainerBox) {
        if self.pending.replace(container).is_some() {
            tracing::trace!("Superseded queued container measurement");
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Apply the queued measurement. Returns the new content bounds when
    /// they differ from the previous frame.
    pub fn take_frame(&mut self) -> Option<Bounds> {
        let container = self.pending.take()?;
        let content = container.content_bounds();

        if self.content == Some(content) {
            return None;
        }

        tracing::debug!(
            x = content.x,
            y = content.y,
            width = content.width,
            height = content.height,
            "Container content box changed"
        );

        self.content = Some(content);
        Some(content)
    }

    /// Content bounds of the last applied frame
    pub fn content(&self) -> Option<Bounds> {
        self.content
    }
}
