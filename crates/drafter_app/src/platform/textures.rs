use egui::{ColorImage, Context, TextureHandle, TextureOptions};

/// Decode state of one fetched diagram image, keyed by carousel position.
pub enum TextureSlot {
    /// Download or decode still in flight.
    Pending,
    Ready(TextureHandle),
    /// Bytes arrived but were not decodable into a texture. The carousel
    /// shows a placeholder; exports still write the original bytes.
    Failed,
}

#[derive(Default)]
pub struct TextureCache {
    slots: Vec<TextureSlot>,
}

impl TextureCache {
    /// Drops every texture and reserves slots for a new image set.
    pub fn begin(&mut self, count: usize) {
        self.slots.clear();
        self.slots.resize_with(count, || TextureSlot::Pending);
    }

    pub fn install(&mut self, ctx: &Context, index: usize, bytes: &[u8]) {
        let slot = match decode(bytes) {
            Some(image) => TextureSlot::Ready(ctx.load_texture(
                format!("diagram-{index}"),
                image,
                TextureOptions::LINEAR,
            )),
            None => {
                log::info!(
                    "Diagram image {} is not decodable for display; export remains available",
                    index + 1
                );
                TextureSlot::Failed
            }
        };
        self.put(index, slot);
    }

    pub fn mark_failed(&mut self, index: usize) {
        self.put(index, TextureSlot::Failed);
    }

    pub fn slot(&self, index: usize) -> Option<&TextureSlot> {
        self.slots.get(index)
    }

    fn put(&mut self, index: usize, slot: TextureSlot) {
        if index >= self.slots.len() {
            self.slots.resize_with(index + 1, || TextureSlot::Pending);
        }
        self.slots[index] = slot;
    }
}

/// SVG renders have no raster decoder here and come back `None`.
fn decode(bytes: &[u8]) -> Option<ColorImage> {
    let image = image::load_from_memory(bytes).ok()?.into_rgba8();
    let size = [image.width() as usize, image.height() as usize];
    Some(ColorImage::from_rgba_unmultiplied(size, image.as_raw()))
}
