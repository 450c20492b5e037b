//! Scent field: the live set of trail markers.
//!
//! Markers are kept in a flat arena. `tick` decays and prunes them in one
//! `retain` pass, so removal never disturbs an in-flight iteration, and then
//! re-files the survivors in a spatial grid for range queries.

use crate::spatial_hash::SpatialHash;
use myrmex_data::{ScentChannel, ScentMarker, Vec2};

/// A marker to be added once the current agent pass finishes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScentDeposit {
    pub position: Vec2,
    pub channel: ScentChannel,
    pub strength: f64,
}

#[derive(Debug, Clone)]
pub struct ScentField {
    markers: Vec<ScentMarker>,
    decay_rate: f64,
    index: SpatialHash,
    /// Positions backing `index`, reused between rebuilds.
    index_positions: Vec<Vec2>,
    /// True while `index` matches `markers`.
    index_fresh: bool,
}

impl ScentField {
    /// Creates an empty field. `cell_size` should match the perception radius.
    pub fn new(decay_rate: f64, cell_size: f64, width: f64, height: f64) -> Self {
        Self {
            markers: Vec::new(),
            decay_rate: decay_rate.max(0.0),
            index: SpatialHash::new(cell_size, width, height),
            index_positions: Vec::new(),
            index_fresh: true,
        }
    }

    /// Inserts a marker using the field's current decay rate.
    pub fn deposit(&mut self, position: Vec2, channel: ScentChannel, strength: f64) {
        self.markers
            .push(ScentMarker::new(position, channel, strength, self.decay_rate));
        self.index_fresh = false;
    }

    pub fn apply_deposits(&mut self, deposits: impl IntoIterator<Item = ScentDeposit>) {
        for d in deposits {
            self.deposit(d.position, d.channel, d.strength);
        }
        self.rebuild_index();
    }

    /// Decays every marker by its rate and drops the exhausted ones.
    ///
    /// Returns how many markers were pruned.
    pub fn tick(&mut self) -> usize {
        let before = self.markers.len();
        self.markers.retain_mut(|m| {
            m.strength = (m.strength - m.decay_rate).max(0.0);
            !m.is_exhausted()
        });
        let pruned = before - self.markers.len();
        self.rebuild_index();
        pruned
    }

    /// Markers of `channel` within `radius` of `position`.
    ///
    /// The sequence is computed lazily from the current state and must be
    /// consumed before the field changes.
    pub fn query(
        &self,
        position: Vec2,
        radius: f64,
        channel: ScentChannel,
    ) -> impl Iterator<Item = &ScentMarker> + '_ {
        let radius_sq = radius * radius;
        let matches = move |m: &&ScentMarker| {
            m.channel == channel && m.position.distance_squared(position) <= radius_sq
        };
        let (indexed, linear) = if self.index_fresh {
            (
                Some(
                    self.index
                        .query_iter(position.x, position.y, radius)
                        .map(move |i| &self.markers[i])
                        .filter(matches),
                ),
                None,
            )
        } else {
            (None, Some(self.markers.iter().filter(matches)))
        };
        indexed
            .into_iter()
            .flatten()
            .chain(linear.into_iter().flatten())
    }

    /// True if any marker of `channel` lies within `radius`.
    pub fn any_within(&self, position: Vec2, radius: f64, channel: ScentChannel) -> bool {
        self.query(position, radius, channel).next().is_some()
    }

    /// Changes the decay rate for future deposits and live markers alike.
    pub fn set_decay_rate(&mut self, rate: f64) {
        let rate = rate.max(0.0);
        self.decay_rate = rate;
        for m in &mut self.markers {
            m.decay_rate = rate;
        }
    }

    /// Re-keys the index to a new cell size (perception radius) or world size.
    pub fn resize_index(&mut self, cell_size: f64, width: f64, height: f64) {
        self.index = SpatialHash::new(cell_size, width, height);
        self.rebuild_index();
    }

    fn rebuild_index(&mut self) {
        self.index_positions.clear();
        self.index_positions
            .extend(self.markers.iter().map(|m| m.position));
        self.index.build(&self.index_positions);
        self.index_fresh = true;
    }

    #[must_use]
    pub fn markers(&self) -> &[ScentMarker] {
        &self.markers
    }

    #[must_use]
    pub fn decay_rate(&self) -> f64 {
        self.decay_rate
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    #[must_use]
    pub fn count(&self, channel: ScentChannel) -> usize {
        self.markers.iter().filter(|m| m.channel == channel).count()
    }

    pub fn clear(&mut self) {
        self.markers.clear();
        self.rebuild_index();
    }
}
