// Copyright 2026 the Skelpen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A keyed collection of glyph skeletons sharing one processor.

use alloc::collections::btree_map::{BTreeMap, Keys};

use crate::{GlyphOutline, GlyphSkeleton, Params, ProcessorConfig, SkeletonError, SkeletonProcessor};

/// Glyph skeletons stored by key, typically a character.
///
/// Outlines are not cached: [`recompute`](GlyphLibrary::recompute) runs the
/// pipeline from the stored skeleton every time, so the stored data is never
/// changed by processing.
#[derive(Clone, Debug)]
pub struct GlyphLibrary<K> {
    glyphs: BTreeMap<K, GlyphSkeleton>,
    processor: SkeletonProcessor,
}

impl<K: Ord> Default for GlyphLibrary<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> GlyphLibrary<K> {
    /// An empty library using the default constants.
    pub fn new() -> Self {
        Self::with_config(ProcessorConfig::default())
    }

    /// An empty library using custom constants.
    pub fn with_config(config: ProcessorConfig) -> Self {
        GlyphLibrary {
            glyphs: BTreeMap::new(),
            processor: SkeletonProcessor::with_config(config),
        }
    }

    /// The processor used for recomputation.
    pub fn processor(&self) -> &SkeletonProcessor {
        &self.processor
    }

    /// Store a glyph, returning the one previously stored under `key`.
    pub fn insert(&mut self, key: K, glyph: GlyphSkeleton) -> Option<GlyphSkeleton> {
        self.glyphs.insert(key, glyph)
    }

    /// Remove a glyph.
    pub fn remove(&mut self, key: &K) -> Option<GlyphSkeleton> {
        self.glyphs.remove(key)
    }

    /// The glyph stored under `key`.
    pub fn get(&self, key: &K) -> Option<&GlyphSkeleton> {
        self.glyphs.get(key)
    }

    /// The keys in order.
    pub fn keys(&self) -> Keys<'_, K, GlyphSkeleton> {
        self.glyphs.keys()
    }

    /// Number of glyphs.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Is the library empty?
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Recompute the outline of the glyph under `key`.
    ///
    /// Returns `None` if there is no such glyph.
    pub fn recompute(
        &self,
        key: &K,
        params: &Params,
    ) -> Option<Result<GlyphOutline, SkeletonError>> {
        let glyph = self.glyphs.get(key)?;
        Some(self.processor.process(glyph, params))
    }
}

impl<K: Ord> FromIterator<(K, GlyphSkeleton)> for GlyphLibrary<K> {
    fn from_iter<T: IntoIterator<Item = (K, GlyphSkeleton)>>(iter: T) -> Self {
        let mut library = Self::new();
        library.glyphs.extend(iter);
        library
    }
}
