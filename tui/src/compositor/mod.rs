//! Layered Compositor
//!
//! Manages z-ordered layers for rendering. Each region of the Clarify screen
//! (header, editor, tone bar, result panes, status line) draws into its own
//! layer buffer; the loading overlay sits on a higher layer above the editor.
//!
//! The compositor composites all visible layers into a final output buffer.

mod layer;

use std::collections::HashMap;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;

pub use layer::{Blend, Layer};

/// Unique identifier for a layer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayerId(u32);

/// The compositor manages all layers and composites them together
pub struct Compositor {
    /// All layers by ID
    layers: HashMap<LayerId, Layer>,
    /// Layers sorted by z-index for rendering
    render_order: Vec<LayerId>,
    /// Next layer ID to assign
    next_id: u32,
    /// Output buffer (composited result)
    output: Buffer,
    /// Total area
    area: Rect,
}

impl Compositor {
    /// Create a new compositor for the given area
    pub fn new(area: Rect) -> Self {
        Self {
            layers: HashMap::new(),
            render_order: Vec::new(),
            next_id: 0,
            output: Buffer::empty(area),
            area,
        }
    }

    /// Total area covered by the output
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Create a new layer and return its ID
    pub fn create_layer(&mut self, bounds: Rect, z_index: i32) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;

        self.layers.insert(id, Layer::new(id, bounds, z_index));
        self.update_render_order();

        id
    }

    /// Get a layer
    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(&id)
    }

    /// Get mutable access to a layer's buffer for rendering
    ///
    /// The buffer is in layer-local coordinates starting at (0, 0).
    pub fn layer_buffer_mut(&mut self, id: LayerId) -> Option<&mut Buffer> {
        self.layers.get_mut(&id).map(|l| &mut l.buffer)
    }

    /// Set a layer's blend mode
    pub fn set_blend(&mut self, id: LayerId, blend: Blend) {
        if let Some(layer) = self.layers.get_mut(&id) {
            layer.blend = blend;
        }
    }

    /// Move and resize a layer
    ///
    /// The buffer is reallocated only when the size changes.
    pub fn set_bounds(&mut self, id: LayerId, bounds: Rect) {
        if let Some(layer) = self.layers.get_mut(&id) {
            let resized =
                layer.bounds.width != bounds.width || layer.bounds.height != bounds.height;
            layer.bounds = bounds;
            if resized {
                layer.buffer = Buffer::empty(Layer::local_area(bounds));
            }
        }
    }

    /// Set layer visibility
    pub fn set_visible(&mut self, id: LayerId, visible: bool) {
        if let Some(layer) = self.layers.get_mut(&id) {
            layer.visible = visible;
        }
    }

    /// Resize the entire compositor
    pub fn resize(&mut self, area: Rect) {
        self.area = area;
        self.output = Buffer::empty(area);
    }

    /// Composite all visible layers into the output buffer
    pub fn composite(&mut self) -> &Buffer {
        self.output.reset();

        // Back to front
        for id in &self.render_order {
            if let Some(layer) = self.layers.get(id) {
                if layer.visible {
                    Self::blit_layer(&mut self.output, layer);
                }
            }
        }

        &self.output
    }

    /// Blit a layer onto the output buffer, clipped to the output area
    fn blit_layer(output: &mut Buffer, layer: &Layer) {
        let lb = layer.bounds;

        for ly in 0..lb.height {
            for lx in 0..lb.width {
                let Some(src) = layer.buffer.cell((lx, ly)) else {
                    continue;
                };

                if layer.blend == Blend::Transparent && src.symbol() == " " && src.bg == Color::Reset
                {
                    continue;
                }

                let dst_x = lb.x.saturating_add(lx);
                let dst_y = lb.y.saturating_add(ly);
                if let Some(dst) = output.cell_mut((dst_x, dst_y)) {
                    *dst = src.clone();
                }
            }
        }
    }

    /// Update render order based on z-indices
    ///
    /// Ties keep creation order.
    fn update_render_order(&mut self) {
        let mut order: Vec<(i32, u32)> = self
            .layers
            .values()
            .map(|layer| (layer.z_index, layer.id.0))
            .collect();
        order.sort_unstable();
        self.render_order = order.into_iter().map(|(_, id)| LayerId(id)).collect();
    }
}
