//! Store statistics tracking and reporting.

/// Access counters maintained by the tile cache.
#[derive(Debug, Clone, Default)]
pub struct StoreStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl StoreStats {
    /// Create a zeroed counter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculate the hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Record a cache hit.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// Record a cache miss.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Record an eviction.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }
}

/// Snapshot of store statistics for reporting.
///
/// Combines the cache's access counters with the swapper's memory
/// accounting into one consistent view, taken under the cache lock.
#[derive(Debug, Clone)]
pub struct StoreStatistics {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub resident_tiles: usize,
    pub memory_size: usize,
    pub peak_memory_size: usize,
    pub hit_rate_percent: f64,
}

impl StoreStatistics {
    /// Build a snapshot from the cache counters and memory accounting.
    pub fn new(
        stats: &StoreStats,
        resident_tiles: usize,
        memory_size: usize,
        peak_memory_size: usize,
    ) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            resident_tiles,
            memory_size,
            peak_memory_size,
            hit_rate_percent: stats.hit_rate() * 100.0,
        }
    }

    /// The statistics as flat name/value pairs.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("resident tiles", self.resident_tiles.to_string()),
            ("current size", self.memory_size.to_string()),
            ("peak size", self.peak_memory_size.to_string()),
            ("hits", self.hits.to_string()),
            ("misses", self.misses.to_string()),
            ("hit rate", format!("{:.1}%", self.hit_rate_percent)),
            ("evictions", self.evictions.to_string()),
        ]
    }

    /// Format the statistics as a human-readable block.
    pub fn format(&self) -> String {
        format!(
            r#"Texture Store Statistics

  Resident Tiles:  {}
  Current Size:    {:.2} MB
  Peak Size:       {:.2} MB
  Hits:            {}
  Misses:          {}
  Hit Rate:        {:.1}%
  Evictions:       {}
"#,
            self.resident_tiles,
            self.memory_size as f64 / (1024.0 * 1024.0),
            self.peak_memory_size as f64 / (1024.0 * 1024.0),
            self.hits,
            self.misses,
            self.hit_rate_percent,
            self.evictions,
        )
    }
}
