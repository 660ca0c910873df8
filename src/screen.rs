//! Layer tree for the watch screen.
//!
//! A flat, ordered stack of bitmap and text layers over a fixed canvas.
//! Layers are drawn in attach order, so whatever is attached first sits at
//! the bottom. The tree holds the bitmap handles; slot bookkeeping lives in
//! `slots`.

use embedded_graphics::{
    image::Image,
    mono_font::MonoTextStyle,
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::Rectangle,
    text::{Baseline, Text},
};
use heapless::{String, Vec};
use log::warn;
use profont::PROFONT_10_POINT;

use crate::resources::Bitmap;

/// Upper bound on attached layers: backdrop + gauge + date + 4 digit
/// slots + 3 tile slots, with a little headroom.
pub const MAX_LAYERS: usize = 12;

const TEXT_LEN: usize = 8;

/// Handle to an attached layer.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LayerId(u32);

/// What a layer paints inside its frame.
pub enum LayerContent {
    Image(Bitmap),
    Text(String<TEXT_LEN>),
}

struct Layer {
    id: LayerId,
    frame: Rectangle,
    content: LayerContent,
}

/// Fixed-size layer stack for one screen.
pub struct Screen {
    layers: Vec<Layer, MAX_LAYERS>,
    next_id: u32,
}

impl Screen {
    pub fn new() -> Self {
        Self {
            layers: Vec::new(),
            next_id: 0,
        }
    }

    /// Attach a layer on top of the stack. Returns `None` when the stack
    /// is full.
    pub fn attach(&mut self, frame: Rectangle, content: LayerContent) -> Option<LayerId> {
        let id = LayerId(self.next_id);
        if self.layers.push(Layer { id, frame, content }).is_err() {
            warn!("layer stack full, attach dropped");
            return None;
        }
        self.next_id += 1;
        Some(id)
    }

    /// Detach a layer from the stack; unknown handles are ignored.
    pub fn detach(&mut self, id: LayerId) {
        if let Some(index) = self.layers.iter().position(|layer| layer.id == id) {
            self.layers.remove(index);
        }
    }

    /// Move a layer without touching its content.
    pub fn set_frame(&mut self, id: LayerId, frame: Rectangle) {
        if let Some(layer) = self.layers.iter_mut().find(|layer| layer.id == id) {
            layer.frame = frame;
        }
    }

    /// Replace the string of a text layer; no-op on image layers.
    /// Overlong text is truncated to the layer's capacity.
    pub fn set_text(&mut self, id: LayerId, text: &str) {
        if let Some(layer) = self.layers.iter_mut().find(|layer| layer.id == id) {
            if let LayerContent::Text(buf) = &mut layer.content {
                buf.clear();
                for c in text.chars() {
                    if buf.push(c).is_err() {
                        break;
                    }
                }
            }
        }
    }

    /// Current frame of a layer.
    pub fn frame(&self, id: LayerId) -> Option<Rectangle> {
        self.layers
            .iter()
            .find(|layer| layer.id == id)
            .map(|layer| layer.frame)
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Compose every layer, bottom to top, onto the target.
    pub fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        for layer in &self.layers {
            match &layer.content {
                LayerContent::Image(bitmap) => {
                    Image::new(bitmap, layer.frame.top_left).draw(target)?;
                }
                LayerContent::Text(text) => {
                    let style = MonoTextStyle::new(&PROFONT_10_POINT, BinaryColor::On);
                    Text::with_baseline(text.as_str(), layer.frame.top_left, style, Baseline::Top)
                        .draw(target)?;
                }
            }
        }
        Ok(())
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}
