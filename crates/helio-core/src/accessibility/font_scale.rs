use tracing::warn;

use crate::constants::{
    FONT_SCALE_DEFAULT, FONT_SCALE_KEY, FONT_SCALE_MAX, FONT_SCALE_MIN, FONT_SCALE_STEP,
};
use crate::store::KeyValueStore;

/// Persisted font scale factor, always within [0.8, 1.5]
pub struct FontScale<S: KeyValueStore> {
    kv: S,
    scale: f64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn parse_scale(raw: Option<String>) -> f64 {
    match raw.and_then(|s| s.trim().parse::<f64>().ok()) {
        Some(v) if v.is_finite() && v != 0.0 => v.clamp(FONT_SCALE_MIN, FONT_SCALE_MAX),
        _ => FONT_SCALE_DEFAULT,
    }
}

impl<S: KeyValueStore> FontScale<S> {
    /// Load the stored scale and apply it (which writes it back)
    pub fn load(kv: S) -> Self {
        let raw = kv.get(FONT_SCALE_KEY).unwrap_or_else(|e| {
            warn!("Failed to read font scale: {}", e);
            None
        });
        let mut font = Self {
            kv,
            scale: FONT_SCALE_DEFAULT,
        };
        font.apply(parse_scale(raw));
        font
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Scale as a whole percentage, e.g. 110
    pub fn percent(&self) -> u32 {
        (self.scale * 100.0).round() as u32
    }

    pub fn increase(&mut self) -> f64 {
        let next = round2(self.scale + FONT_SCALE_STEP).min(FONT_SCALE_MAX);
        self.apply(next);
        self.scale
    }

    pub fn decrease(&mut self) -> f64 {
        let next = round2(self.scale - FONT_SCALE_STEP).max(FONT_SCALE_MIN);
        self.apply(next);
        self.scale
    }

    fn apply(&mut self, scale: f64) {
        self.scale = scale;
        // A failed write only loses persistence; the scale still applies
        if let Err(e) = self.kv.set(FONT_SCALE_KEY, &scale.to_string()) {
            warn!("Failed to persist font scale: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_default_when_absent_or_garbage() {
        let kv = MemoryStore::new();
        let font = FontScale::load(kv.clone());
        assert_eq!(font.scale(), 1.0);
        assert_eq!(kv.raw(FONT_SCALE_KEY).as_deref(), Some("1"));

        let mut kv = MemoryStore::new();
        kv.set(FONT_SCALE_KEY, "big").unwrap();
        assert_eq!(FontScale::load(kv.clone()).scale(), 1.0);

        kv.set(FONT_SCALE_KEY, "0").unwrap();
        assert_eq!(FontScale::load(kv).scale(), 1.0);
    }

    #[test]
    fn test_loaded_value_is_clamped() {
        let mut kv = MemoryStore::new();
        kv.set(FONT_SCALE_KEY, "3.0").unwrap();
        assert_eq!(FontScale::load(kv.clone()).scale(), 1.5);
        kv.set(FONT_SCALE_KEY, "0.2").unwrap();
        assert_eq!(FontScale::load(kv).scale(), 0.8);
    }

    #[test]
    fn test_steps_round_and_clamp() {
        let kv = MemoryStore::new();
        let mut font = FontScale::load(kv.clone());
        assert_eq!(font.increase(), 1.1);
        assert_eq!(font.increase(), 1.2);
        assert_eq!(font.percent(), 120);
        for _ in 0..10 {
            font.increase();
        }
        assert_eq!(font.scale(), 1.5);
        for _ in 0..20 {
            font.decrease();
        }
        assert_eq!(font.scale(), 0.8);
        assert_eq!(kv.raw(FONT_SCALE_KEY).as_deref(), Some("0.8"));
    }

    #[test]
    fn test_scale_survives_reload() {
        let kv = MemoryStore::new();
        let mut font = FontScale::load(kv.clone());
        font.increase();
        font.increase();
        font.increase();
        assert_eq!(FontScale::load(kv).scale(), 1.3);
    }
}
