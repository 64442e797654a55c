//! Sprite loading.
//!
//! Every frame of every catalog block is requested up front, then the
//! decode promises are joined with `Promise.all`. The atlas only exists once
//! all images are ready, so the renderer never sees a half-loaded sprite.

use js_sys::{Array, Promise};
use lev_core::{BlockCatalog, BlockId};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlImageElement;

/// Decoded sprite images, indexed by block then frame.
pub struct SpriteAtlas {
    frames: Vec<Vec<HtmlImageElement>>,
}

impl SpriteAtlas {
    pub fn get(&self, block: BlockId, frame: usize) -> Option<&HtmlImageElement> {
        self.frames.get(block as usize)?.get(frame)
    }
}

/// URL of a sprite frame under `base`, e.g. `blocks/` + `lava-1` + `.png`.
pub fn sprite_url(base: &str, name: &str) -> String {
    if base.is_empty() || base.ends_with('/') {
        format!("{base}{name}.png")
    } else {
        format!("{base}/{name}.png")
    }
}

/// Load every sprite the catalog names and wait until all are decoded.
///
/// Fails if any image fails to load; there is no partial atlas.
pub async fn load_sprite_atlas(catalog: &BlockCatalog, base: &str) -> Result<SpriteAtlas, JsValue> {
    let pending = Array::new();
    let mut frames = Vec::with_capacity(catalog.len());

    for block in 0..catalog.len() as BlockId {
        let names = catalog.meta(block).map(|m| m.animation_frames.as_slice()).unwrap_or_default();
        let mut images = Vec::with_capacity(names.len());
        for name in names {
            let img = HtmlImageElement::new()?;
            img.set_src(&sprite_url(base, name));
            pending.push(&img.decode());
            images.push(img);
        }
        frames.push(images);
    }

    log::debug!("waiting for {} sprite frames", pending.length());
    JsFuture::from(Promise::all(&pending)).await?;
    log::info!("sprite atlas ready: {} blocks", frames.len());
    Ok(SpriteAtlas { frames })
}
