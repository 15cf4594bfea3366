//! The loaded font: every size tier, smallest first
//!
//! A [`FontArchive`] owns its atlases and their textures outright. Once
//! built it is never mutated, so any number of threads may measure and lay
//! out text against the same archive.

use crate::atlas::GlyphAtlas;
use crate::error::LoadError;

/// Ordered, non-empty set of size tiers with unique nominal sizes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontArchive {
    atlases: Vec<GlyphAtlas>,
}

impl FontArchive {
    /// Sorts the tiers by nominal size and keeps the first tier of each size.
    ///
    /// Fails when no atlas is given.
    pub fn new(mut atlases: Vec<GlyphAtlas>) -> Result<Self, LoadError> {
        if atlases.is_empty() {
            return Err(LoadError::NoUsableAtlases("empty atlas set".into()));
        }

        atlases.sort_by_key(GlyphAtlas::nominal_size);
        let before = atlases.len();
        atlases.dedup_by(|later, earlier| later.nominal_size() == earlier.nominal_size());
        if atlases.len() != before {
            log::warn!(
                "Dropped {} atlas(es) sharing a nominal size with another tier",
                before - atlases.len()
            );
        }

        Ok(Self { atlases })
    }

    pub fn atlases(&self) -> &[GlyphAtlas] {
        &self.atlases
    }

    /// Nominal sizes in ascending order
    pub fn sizes(&self) -> Vec<u32> {
        self.atlases.iter().map(GlyphAtlas::nominal_size).collect()
    }

    pub fn len(&self) -> usize {
        self.atlases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atlases.is_empty()
    }

    pub fn smallest(&self) -> &GlyphAtlas {
        &self.atlases[0]
    }

    pub fn largest(&self) -> &GlyphAtlas {
        &self.atlases[self.atlases.len() - 1]
    }

    /// Picks the tier whose nominal size is closest to `target_height`.
    ///
    /// Heights outside the available range clamp to the smallest or largest
    /// tier. Between two tiers at equal distance the smaller one wins.
    pub fn select_atlas(&self, target_height: f32) -> &GlyphAtlas {
        let smallest = self.smallest();
        let largest = self.largest();
        if target_height.is_nan() || target_height <= smallest.nominal_size() as f32 {
            return smallest;
        }
        if target_height >= largest.nominal_size() as f32 {
            return largest;
        }

        let search = self
            .atlases
            .binary_search_by(|atlas| (atlas.nominal_size() as f32).total_cmp(&target_height));

        let atlas = match search {
            Ok(exact) => &self.atlases[exact],
            Err(insert_at) => {
                // Strictly inside the range, so both neighbours exist.
                let below = &self.atlases[insert_at - 1];
                let above = &self.atlases[insert_at];
                let to_below = target_height - below.nominal_size() as f32;
                let to_above = above.nominal_size() as f32 - target_height;
                if to_below <= to_above {
                    below
                } else {
                    above
                }
            },
        };

        log::debug!(
            "Selected atlas {} for height {}",
            atlas.nominal_size(),
            target_height
        );
        atlas
    }

    /// Releases every texture and returns how many were freed
    pub fn dispose(self) -> usize {
        let count = self.atlases.len();
        let bytes: usize = self
            .atlases
            .into_iter()
            .map(|atlas| atlas.into_texture().byte_len())
            .sum();
        log::info!("Released {} atlas texture(s), {} bytes", count, bytes);
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::AtlasTexture;
    use crate::glyph::GlyphTable;

    fn atlas(size: u32) -> GlyphAtlas {
        let texture = AtlasTexture::from_rgba(4, size, vec![0; 4 * size as usize * 4]).unwrap();
        GlyphAtlas::new(texture, GlyphTable::default())
    }

    fn archive(sizes: &[u32]) -> FontArchive {
        FontArchive::new(sizes.iter().copied().map(atlas).collect()).unwrap()
    }

    #[test]
    fn empty_set_is_rejected() {
        assert!(matches!(
            FontArchive::new(Vec::new()),
            Err(LoadError::NoUsableAtlases(_))
        ));
    }

    #[test]
    fn tiers_are_sorted_and_deduplicated() {
        let archive = archive(&[96, 12, 48, 12]);
        assert_eq!(archive.sizes(), vec![12, 48, 96]);
    }

    #[test]
    fn clamps_outside_range() {
        let archive = archive(&[12, 48, 96]);
        assert_eq!(archive.select_atlas(1.0).nominal_size(), 12);
        assert_eq!(archive.select_atlas(12.0).nominal_size(), 12);
        assert_eq!(archive.select_atlas(96.0).nominal_size(), 96);
        assert_eq!(archive.select_atlas(500.0).nominal_size(), 96);
        assert_eq!(archive.select_atlas(-3.0).nominal_size(), 12);
    }

    #[test]
    fn exact_match_wins() {
        let archive = archive(&[8, 12, 16, 24, 48, 96]);
        for size in [8, 12, 16, 24, 48, 96] {
            assert_eq!(archive.select_atlas(size as f32).nominal_size(), size);
        }
    }

    #[test]
    fn nearest_neighbour_wins() {
        let archive = archive(&[12, 48, 96]);
        assert_eq!(archive.select_atlas(40.0).nominal_size(), 48);
        assert_eq!(archive.select_atlas(20.0).nominal_size(), 12);
        assert_eq!(archive.select_atlas(80.0).nominal_size(), 96);
        assert_eq!(archive.select_atlas(71.9).nominal_size(), 48);
    }

    #[test]
    fn ties_prefer_the_smaller_tier() {
        let archive = archive(&[12, 48, 96]);
        assert_eq!(archive.select_atlas(30.0).nominal_size(), 12);
        assert_eq!(archive.select_atlas(72.0).nominal_size(), 48);
    }

    #[test]
    fn single_tier_always_selected() {
        let archive = archive(&[32]);
        assert_eq!(archive.select_atlas(5.0).nominal_size(), 32);
        assert_eq!(archive.select_atlas(32.0).nominal_size(), 32);
        assert_eq!(archive.select_atlas(64.0).nominal_size(), 32);
    }

    #[test]
    fn dispose_releases_every_tier() {
        assert_eq!(archive(&[12, 48, 96]).dispose(), 3);
    }
}
