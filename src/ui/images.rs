use crate::{MapError, Result};
use egui::{ColorImage, Context, TextureHandle};
use fxhash::FxHashMap;
use std::path::{Path, PathBuf};

enum Slot {
    Ready(TextureHandle),
    Failed,
}

/// Card pictures decoded from disk, one texture per asset path.
///
/// Asset paths are written the way the card refers to them (`/1.jpg`) and
/// resolve against the cache root. A failed read or decode is remembered so
/// the file is not retried every frame.
pub struct ImageCache {
    root: PathBuf,
    slots: FxHashMap<String, Slot>,
}

impl ImageCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            slots: FxHashMap::default(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Points the cache at another directory, dropping everything loaded so far
    pub fn set_root(&mut self, root: impl AsRef<Path>) {
        if self.root != root.as_ref() {
            self.root = root.as_ref().to_path_buf();
            self.slots.clear();
        }
    }

    pub fn resolve(&self, source: &str) -> PathBuf {
        self.root.join(source.trim_start_matches('/'))
    }

    /// Texture for `source`, reading and decoding it on first use
    pub fn load(&mut self, ctx: &Context, source: &str) -> Option<TextureHandle> {
        if let Some(slot) = self.slots.get(source) {
            return match slot {
                Slot::Ready(texture) => Some(texture.clone()),
                Slot::Failed => None,
            };
        }

        let path = self.resolve(source);
        let slot = match read_image(&path) {
            Ok(image) => {
                log::debug!("loaded card image {}", path.display());
                Slot::Ready(ctx.load_texture(source, image, egui::TextureOptions::default()))
            }
            Err(err) => {
                log::warn!("cannot load card image {}: {}", path.display(), err);
                Slot::Failed
            }
        };
        let texture = match &slot {
            Slot::Ready(texture) => Some(texture.clone()),
            Slot::Failed => None,
        };
        self.slots.insert(source.to_string(), slot);
        texture
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

fn read_image(path: &Path) -> Result<ColorImage> {
    let bytes = std::fs::read(path)?;
    decode_image(&bytes)
}

pub fn decode_image(bytes: &[u8]) -> Result<ColorImage> {
    let img =
        image::load_from_memory(bytes).map_err(|err| MapError::ImageDecode(err.to_string()))?;
    let rgba_img = img.to_rgba8();
    let (width, height) = rgba_img.dimensions();

    Ok(ColorImage::from_rgba_unmultiplied(
        [width as usize, height as usize],
        rgba_img.as_raw(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 40, 40, 255]));
        let mut bytes = std::io::Cursor::new(Vec::new());
        img.write_to(&mut bytes, image::ImageOutputFormat::Png).unwrap();
        bytes.into_inner()
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("calimap-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_decode_image() {
        let image = decode_image(&png_bytes(3, 2)).unwrap();
        assert_eq!(image.size, [3, 2]);
        assert_eq!(image.pixels[0], egui::Color32::from_rgb(200, 40, 40));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let result = decode_image(b"definitely not an image");
        assert!(matches!(result, Err(MapError::ImageDecode(_))));
    }

    #[test]
    fn test_resolve_strips_leading_slash() {
        let cache = ImageCache::new("public");
        assert_eq!(cache.resolve("/1.jpg"), Path::new("public").join("1.jpg"));
        assert_eq!(cache.resolve("2.jpg"), Path::new("public").join("2.jpg"));
    }

    #[test]
    fn test_load_caches_textures_and_failures() {
        let dir = scratch_dir("image-cache");
        std::fs::write(dir.join("1.jpg"), png_bytes(4, 4)).unwrap();

        let ctx = Context::default();
        let mut cache = ImageCache::new(&dir);

        let first = cache.load(&ctx, "/1.jpg").unwrap();
        assert_eq!(first.size(), [4, 4]);
        let again = cache.load(&ctx, "/1.jpg").unwrap();
        assert_eq!(first.id(), again.id());

        assert!(cache.load(&ctx, "/missing.jpg").is_none());
        assert!(cache.load(&ctx, "/missing.jpg").is_none());
        assert_eq!(cache.len(), 2);

        cache.set_root(dir.join("elsewhere"));
        assert!(cache.is_empty());
        assert!(cache.load(&ctx, "/1.jpg").is_none());

        std::fs::remove_dir_all(&dir).ok();
    }
}
