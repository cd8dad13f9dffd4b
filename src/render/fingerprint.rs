use xxhash_rust::xxh3::Xxh3;

use crate::{
    foundation::error::CadenceResult,
    render::tree::{RenderLayer, RenderTree},
};

const XXH3_SEED: u64 = 0x8b5ad4a0c7d8e9f1;

/// 128-bit digest of a render tree; equal trees give equal fingerprints on every platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FrameFingerprint {
    /// High 64 bits.
    pub hi: u64,
    /// Low 64 bits.
    pub lo: u64,
}

impl std::fmt::Display for FrameFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

/// Fingerprint `tree`, including its composition id and frame.
pub fn fingerprint_tree(tree: &RenderTree) -> CadenceResult<FrameFingerprint> {
    let mut h = StableHasher::new();
    h.write_str(&tree.composition);
    h.write_u64(tree.frame.0);
    h.write_u32(tree.canvas.width);
    h.write_u32(tree.canvas.height);
    h.write_u64(tree.layers.len() as u64);
    for layer in &tree.layers {
        write_layer(&mut h, layer)?;
    }
    h.write_u64(tree.errors.len() as u64);
    for err in &tree.errors {
        h.write_str(&err.path);
        h.write_str(&err.message);
    }
    Ok(h.finish())
}

/// Fingerprint only what is drawn, so identical stills at different frames match.
pub fn fingerprint_content(tree: &RenderTree) -> CadenceResult<FrameFingerprint> {
    let mut h = StableHasher::new();
    h.write_u64(tree.layers.len() as u64);
    for layer in &tree.layers {
        write_layer(&mut h, layer)?;
    }
    Ok(h.finish())
}

fn write_layer(h: &mut StableHasher, layer: &RenderLayer) -> CadenceResult<()> {
    h.write_str(&layer.path);
    h.write_f64(layer.opacity);
    let t = layer.transform;
    for v in [
        t.translate.x,
        t.translate.y,
        t.rotation_rad,
        t.scale.x,
        t.scale.y,
        t.anchor.x,
        t.anchor.y,
    ] {
        h.write_f64(v);
    }
    // Leaf payloads are open-ended; their JSON form is deterministic.
    h.write_bytes(&serde_json::to_vec(&layer.content)?);
    Ok(())
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_str(&mut self, s: &str) {
        self.write_u64(s.len() as u64);
        self.write_bytes(s.as_bytes());
    }

    fn finish(self) -> FrameFingerprint {
        let v = self.inner.digest128();
        FrameFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/fingerprint.rs"]
mod tests;
