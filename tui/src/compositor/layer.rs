//! Layer - A single compositable region of the screen

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use super::LayerId;

/// How a layer's cells combine with what is beneath it
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Blend {
    /// Every cell overwrites the output, blanks included
    #[default]
    Opaque,
    /// Blank cells with no background let lower layers show through
    Transparent,
}

/// A single layer in the compositor
pub struct Layer {
    /// Unique identifier
    pub id: LayerId,
    /// Z-order (higher = in front)
    pub z_index: i32,
    /// Screen position and size
    pub bounds: Rect,
    /// Whether the layer is drawn
    pub visible: bool,
    /// Blend mode
    pub blend: Blend,
    /// Render buffer, in layer-local coordinates
    pub buffer: Buffer,
}

impl Layer {
    /// Create a new opaque, visible layer
    pub fn new(id: LayerId, bounds: Rect, z_index: i32) -> Self {
        Self {
            id,
            z_index,
            bounds,
            visible: true,
            blend: Blend::Opaque,
            buffer: Buffer::empty(Self::local_area(bounds)),
        }
    }

    /// Buffer area for the given screen bounds
    pub(super) fn local_area(bounds: Rect) -> Rect {
        Rect::new(0, 0, bounds.width, bounds.height)
    }

    /// Area to render into, in layer-local coordinates
    pub fn area(&self) -> Rect {
        self.buffer.area
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_is_local() {
        let layer = Layer::new(LayerId(0), Rect::new(5, 3, 10, 4), 0);
        assert_eq!(layer.area(), Rect::new(0, 0, 10, 4));
        assert_eq!(layer.blend, Blend::Opaque);
    }
}
