//! Historical parameter distributions.
//!
//! Statistics are an immutable snapshot loaded once at startup; a future
//! learning pipeline would sit behind the same [`StatisticsSource`] seam.

use std::collections::HashMap;

/// Distribution summary of one parameter across shipped skills.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParameterStatistics {
    pub action_type: String,
    pub parameter: String,
    pub sample_count: u32,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub p25: f64,
    pub p75: f64,
}

impl ParameterStatistics {
    /// The lookup key, `action_type.parameter`.
    pub fn key(&self) -> String {
        stats_key(&self.action_type, &self.parameter)
    }
}

/// Composes the canonical statistics lookup key.
pub fn stats_key(action_type: &str, parameter: &str) -> String {
    format!("{action_type}.{parameter}")
}

/// Read-only provider of parameter distributions.
///
/// Pluggable so the inferencer can be fed from embedded seed data, a file,
/// or a future learned store without changing.
pub trait StatisticsSource: Send + Sync {
    fn get(&self, action_type: &str, parameter: &str) -> Option<ParameterStatistics>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Map-backed statistics source.
#[derive(Clone, Debug, Default)]
pub struct MemoryStatistics {
    entries: HashMap<String, ParameterStatistics>,
}

impl MemoryStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry, replacing any previous snapshot for the same key.
    pub fn insert(&mut self, stats: ParameterStatistics) {
        self.entries.insert(stats.key(), stats);
    }
}

impl FromIterator<ParameterStatistics> for MemoryStatistics {
    fn from_iter<I: IntoIterator<Item = ParameterStatistics>>(iter: I) -> Self {
        let mut source = Self::new();
        for stats in iter {
            source.insert(stats);
        }
        source
    }
}

impl StatisticsSource for MemoryStatistics {
    fn get(&self, action_type: &str, parameter: &str) -> Option<ParameterStatistics> {
        self.entries.get(&stats_key(action_type, parameter)).cloned()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
