use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The three tracked categories. Order is significant: it fixes the
/// left-to-right order of day dots and wins indicators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HabitCategory {
    Physical,
    Intellectual,
    Spiritual,
}

pub const ALL_CATEGORIES: [HabitCategory; 3] = [
    HabitCategory::Physical,
    HabitCategory::Intellectual,
    HabitCategory::Spiritual,
];

impl HabitCategory {
    pub fn label(self) -> &'static str {
        match self {
            HabitCategory::Physical => "Physical",
            HabitCategory::Intellectual => "Intellectual",
            HabitCategory::Spiritual => "Spiritual",
        }
    }
}

/// Completion flags for a single day. A missing record is equivalent to
/// all-false, so `Default` doubles as the "no entry" value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitRecord {
    #[serde(default)]
    pub physical: bool,
    #[serde(default)]
    pub intellectual: bool,
    #[serde(default)]
    pub spiritual: bool,
}

impl HabitRecord {
    pub fn is_done(self, category: HabitCategory) -> bool {
        match category {
            HabitCategory::Physical => self.physical,
            HabitCategory::Intellectual => self.intellectual,
            HabitCategory::Spiritual => self.spiritual,
        }
    }

    pub fn toggle(&mut self, category: HabitCategory) {
        match category {
            HabitCategory::Physical => self.physical = !self.physical,
            HabitCategory::Intellectual => self.intellectual = !self.intellectual,
            HabitCategory::Spiritual => self.spiritual = !self.spiritual,
        }
    }

    pub fn any(self) -> bool {
        self.physical || self.intellectual || self.spiritual
    }

    /// Completed categories in display order.
    pub fn active_categories(self) -> Vec<HabitCategory> {
        ALL_CATEGORIES
            .into_iter()
            .filter(|&c| self.is_done(c))
            .collect()
    }
}

/// Date key -> record map. Grows by upsert-on-toggle, never pruned.
/// BTreeMap keeps serialized output stably ordered by date.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitLog {
    entries: BTreeMap<String, HabitRecord>,
}

impl HabitLog {
    pub fn get(&self, key: &str) -> Option<&HabitRecord> {
        self.entries.get(key)
    }

    /// Record for a date, treating absence as all-false.
    pub fn record_for(&self, key: &str) -> HabitRecord {
        self.entries.get(key).copied().unwrap_or_default()
    }

    pub fn upsert(&mut self, key: impl Into<String>, record: HabitRecord) {
        self.entries.insert(key.into(), record);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_record_is_all_false() {
        let log = HabitLog::default();
        let record = log.record_for("2024-03-15");
        assert!(!record.any());
        assert_eq!(record, HabitRecord::default());
    }

    #[test]
    fn test_active_categories_preserve_order() {
        let record = HabitRecord {
            physical: true,
            intellectual: false,
            spiritual: true,
        };
        assert_eq!(
            record.active_categories(),
            vec![HabitCategory::Physical, HabitCategory::Spiritual]
        );
    }

    #[test]
    fn test_toggle_flips_single_flag() {
        let mut record = HabitRecord::default();
        record.toggle(HabitCategory::Intellectual);
        assert!(record.intellectual);
        assert!(!record.physical);
        assert!(!record.spiritual);
        record.toggle(HabitCategory::Intellectual);
        assert!(!record.any());
    }

    #[test]
    fn test_upsert_replaces_existing() {
        let mut log = HabitLog::default();
        log.upsert(
            "2024-03-01",
            HabitRecord {
                physical: true,
                ..Default::default()
            },
        );
        log.upsert(
            "2024-03-01",
            HabitRecord {
                spiritual: true,
                ..Default::default()
            },
        );
        assert_eq!(log.len(), 1);
        assert!(log.record_for("2024-03-01").spiritual);
        assert!(!log.record_for("2024-03-01").physical);
    }

    #[test]
    fn test_log_json_round_trip() {
        let mut log = HabitLog::default();
        log.upsert(
            "2024-02-29",
            HabitRecord {
                physical: true,
                intellectual: true,
                spiritual: false,
            },
        );
        log.upsert("2024-03-01", HabitRecord::default());

        let json = serde_json::to_string(&log).unwrap();
        let back: HabitLog = serde_json::from_str(&json).unwrap();
        assert_eq!(log, back);
    }

    #[test]
    fn test_log_serializes_as_plain_object() {
        let mut log = HabitLog::default();
        log.upsert(
            "2024-03-05",
            HabitRecord {
                physical: true,
                ..Default::default()
            },
        );
        let json = serde_json::to_string(&log).unwrap();
        assert!(json.starts_with('{'));
        assert!(json.contains("\"2024-03-05\""));
        assert!(json.contains("\"physical\":true"));
    }

    #[test]
    fn test_record_deserializes_with_missing_fields() {
        // Older files may omit flags; serde defaults fill them as false
        let record: HabitRecord = serde_json::from_str(r#"{"physical":true}"#).unwrap();
        assert!(record.physical);
        assert!(!record.intellectual);
        assert!(!record.spiritual);
    }
}
