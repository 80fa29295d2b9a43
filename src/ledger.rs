use crate::models::{AttendanceRecord, Course, Ledger};
use serde_json::Value;

impl Ledger {
    /// Every catalog course at zero sessions.
    pub fn fresh(catalog: &[Course]) -> Self {
        let courses = catalog
            .iter()
            .map(|course| (course.code.clone(), AttendanceRecord::default()))
            .collect();
        Self { courses }
    }

    /// Rebuilds a ledger from a previously persisted blob.
    ///
    /// The catalog drives the result: every catalog course gets exactly one
    /// entry, blob keys for retired courses are dropped, and malformed counts
    /// coerce to zero. Absent or unparseable input yields the fresh state.
    pub fn load(catalog: &[Course], raw: Option<&str>) -> Self {
        let Some(root) = raw.and_then(|raw| serde_json::from_str::<Value>(raw).ok()) else {
            return Self::fresh(catalog);
        };
        Self::from_blob(catalog, &root)
    }

    pub fn from_blob(catalog: &[Course], root: &Value) -> Self {
        let courses = catalog
            .iter()
            .map(|course| (course.code.clone(), coerce_record(root.get(&course.code))))
            .collect();
        Self { courses }
    }

    pub fn get(&self, code: &str) -> Option<AttendanceRecord> {
        self.courses.get(code).copied()
    }

    /// Marks `count` sessions as attended. Returns `None` for a course code
    /// outside the catalog; the ledger never grows new entries.
    pub fn record_attended(&mut self, code: &str, count: u64) -> Option<AttendanceRecord> {
        let entry = self.courses.get_mut(code)?;
        entry.attended = entry.attended.saturating_add(count);
        entry.total = entry.total.saturating_add(count);
        Some(*entry)
    }

    /// Marks `count` sessions as missed: only the session total moves.
    pub fn record_missed(&mut self, code: &str, count: u64) -> Option<AttendanceRecord> {
        let entry = self.courses.get_mut(code)?;
        entry.total = entry.total.saturating_add(count);
        Some(*entry)
    }

    /// Steps one session back out of the course: `total` drops by one and
    /// `attended` follows only while it is above zero. A course with no
    /// recorded sessions is left untouched. Always one unit, even right
    /// after a batch recording.
    pub fn undo(&mut self, code: &str) -> Option<AttendanceRecord> {
        let entry = self.courses.get_mut(code)?;
        if entry.total == 0 {
            return Some(*entry);
        }
        entry.total -= 1;
        if entry.attended > 0 {
            entry.attended -= 1;
        }
        Some(*entry)
    }
}

fn coerce_record(entry: Option<&Value>) -> AttendanceRecord {
    let field = |name: &str| {
        entry
            .and_then(|value| value.get(name))
            .and_then(Value::as_u64)
            .unwrap_or(0)
    };
    let total = field("total");
    AttendanceRecord {
        attended: field("attended").min(total),
        total,
    }
}

/// Attended share of recorded sessions, rounded to one decimal. A course
/// with nothing recorded reads as 0, never NaN.
pub fn percentage(record: &AttendanceRecord) -> f64 {
    if record.total == 0 {
        return 0.0;
    }
    let pct = record.attended as f64 / record.total as f64 * 100.0;
    if !pct.is_finite() {
        return 0.0;
    }
    (pct * 10.0).round() / 10.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTier {
    Excellent,
    Good,
    Average,
    Low,
    Critical,
}

impl StatusTier {
    /// Five bands evaluated highest-first; lower bounds are inclusive, so
    /// exactly 85.0 is Excellent and 84.9 is Good.
    pub fn from_percentage(pct: f64) -> Self {
        if pct >= 85.0 {
            Self::Excellent
        } else if pct >= 75.0 {
            Self::Good
        } else if pct >= 65.0 {
            Self::Average
        } else if pct >= 50.0 {
            Self::Low
        } else {
            Self::Critical
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Average => "Average",
            Self::Low => "Low",
            Self::Critical => "Critical",
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Average => "average",
            Self::Low => "low",
            Self::Critical => "critical",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Course> {
        vec![
            Course {
                code: "CS23601".to_string(),
                name: "CRYPTOGRAPHY AND SYSTEM SECURITY".to_string(),
                color: "#6366f1".to_string(),
            },
            Course {
                code: "CS23602".to_string(),
                name: "COMPILER DESIGN".to_string(),
                color: "#8b5cf6".to_string(),
            },
        ]
    }

    fn record(attended: u64, total: u64) -> AttendanceRecord {
        AttendanceRecord { attended, total }
    }

    #[test]
    fn fresh_has_one_zero_entry_per_catalog_course() {
        let ledger = Ledger::fresh(&catalog());
        assert_eq!(ledger.courses.len(), 2);
        assert_eq!(ledger.get("CS23601"), Some(record(0, 0)));
        assert_eq!(ledger.get("CS23602"), Some(record(0, 0)));
    }

    #[test]
    fn record_attended_moves_both_counters() {
        let mut ledger = Ledger::fresh(&catalog());
        let updated = ledger.record_attended("CS23601", 1).unwrap();
        assert_eq!(updated, record(1, 1));
        assert_eq!(ledger.get("CS23602"), Some(record(0, 0)));
    }

    #[test]
    fn record_missed_moves_only_total() {
        let mut ledger = Ledger::fresh(&catalog());
        ledger.record_attended("CS23601", 2).unwrap();
        ledger.record_missed("CS23601", 1).unwrap();
        let updated = ledger.record_missed("CS23601", 2).unwrap();
        assert_eq!(updated, record(2, 5));
        assert_eq!(percentage(&updated), 40.0);
        assert_eq!(StatusTier::from_percentage(40.0), StatusTier::Critical);
    }

    #[test]
    fn unknown_course_is_rejected_without_creating_an_entry() {
        let mut ledger = Ledger::fresh(&catalog());
        assert!(ledger.record_attended("CS99999", 1).is_none());
        assert!(ledger.record_missed("CS99999", 1).is_none());
        assert!(ledger.undo("CS99999").is_none());
        assert_eq!(ledger.courses.len(), 2);
    }

    #[test]
    fn undo_reverts_a_single_unit_even_after_a_batch() {
        let mut ledger = Ledger::fresh(&catalog());
        ledger.record_attended("CS23601", 4).unwrap();
        assert_eq!(ledger.get("CS23601"), Some(record(4, 4)));
        let updated = ledger.undo("CS23601").unwrap();
        assert_eq!(updated, record(3, 3));
    }

    #[test]
    fn undo_on_empty_course_is_identity() {
        let mut ledger = Ledger::fresh(&catalog());
        let before = ledger.clone();
        let updated = ledger.undo("CS23601").unwrap();
        assert_eq!(updated, record(0, 0));
        assert_eq!(ledger, before);
    }

    #[test]
    fn undo_never_drives_attended_negative() {
        let mut ledger = Ledger::fresh(&catalog());
        ledger.record_missed("CS23601", 2).unwrap();
        assert_eq!(ledger.undo("CS23601"), Some(record(0, 1)));
        assert_eq!(ledger.undo("CS23601"), Some(record(0, 0)));
        assert_eq!(ledger.undo("CS23601"), Some(record(0, 0)));
    }

    #[test]
    fn invariant_holds_across_mixed_operations() {
        let mut ledger = Ledger::fresh(&catalog());
        ledger.record_attended("CS23601", 4).unwrap();
        ledger.record_missed("CS23601", 2).unwrap();
        ledger.undo("CS23601").unwrap();
        ledger.record_attended("CS23602", 1).unwrap();
        for _ in 0..10 {
            ledger.undo("CS23602").unwrap();
        }
        for entry in ledger.courses.values() {
            assert!(entry.attended <= entry.total);
        }
        assert_eq!(ledger.get("CS23602"), Some(record(0, 0)));
    }

    #[test]
    fn percentage_is_zero_for_an_empty_record() {
        assert_eq!(percentage(&record(0, 0)), 0.0);
    }

    #[test]
    fn percentage_rounds_to_one_decimal() {
        assert_eq!(percentage(&record(3, 4)), 75.0);
        assert_eq!(percentage(&record(1, 3)), 33.3);
        assert_eq!(percentage(&record(2, 3)), 66.7);
    }

    #[test]
    fn status_band_lower_bounds_are_inclusive() {
        assert_eq!(StatusTier::from_percentage(85.0), StatusTier::Excellent);
        assert_eq!(StatusTier::from_percentage(84.9), StatusTier::Good);
        assert_eq!(StatusTier::from_percentage(75.0), StatusTier::Good);
        assert_eq!(StatusTier::from_percentage(65.0), StatusTier::Average);
        assert_eq!(StatusTier::from_percentage(50.0), StatusTier::Low);
        assert_eq!(StatusTier::from_percentage(49.9), StatusTier::Critical);
        assert_eq!(StatusTier::from_percentage(0.0), StatusTier::Critical);
        assert_eq!(StatusTier::from_percentage(100.0), StatusTier::Excellent);
    }

    #[test]
    fn serialized_state_round_trips_under_the_same_catalog() {
        let mut ledger = Ledger::fresh(&catalog());
        ledger.record_attended("CS23601", 3).unwrap();
        ledger.record_missed("CS23601", 1).unwrap();
        ledger.record_missed("CS23602", 2).unwrap();

        let blob = serde_json::to_string(&ledger).unwrap();
        let reloaded = Ledger::load(&catalog(), Some(&blob));
        assert_eq!(reloaded, ledger);
    }

    #[test]
    fn load_of_garbage_or_nothing_yields_the_fresh_state() {
        let fresh = Ledger::fresh(&catalog());
        assert_eq!(Ledger::load(&catalog(), Some("not valid data")), fresh);
        assert_eq!(Ledger::load(&catalog(), None), fresh);
        assert_eq!(Ledger::load(&catalog(), Some("")), fresh);
        assert_eq!(Ledger::load(&catalog(), Some("[1, 2, 3]")), fresh);
    }

    #[test]
    fn load_coerces_malformed_counts_to_zero() {
        let blob = r#"{
            "CS23601": {"attended": "three", "total": -4},
            "CS23602": {"attended": 2.5}
        }"#;
        let ledger = Ledger::load(&catalog(), Some(blob));
        assert_eq!(ledger.get("CS23601"), Some(record(0, 0)));
        assert_eq!(ledger.get("CS23602"), Some(record(0, 0)));
    }

    #[test]
    fn load_drops_courses_missing_from_the_catalog() {
        let blob = r#"{"CS23601": {"attended": 1, "total": 2}, "OLD101": {"attended": 9, "total": 9}}"#;
        let ledger = Ledger::load(&catalog(), Some(blob));
        assert_eq!(ledger.courses.len(), 2);
        assert_eq!(ledger.get("CS23601"), Some(record(1, 2)));
        assert_eq!(ledger.get("CS23602"), Some(record(0, 0)));
        assert!(ledger.get("OLD101").is_none());
    }

    #[test]
    fn load_clamps_attended_to_total() {
        let blob = r#"{"CS23601": {"attended": 7, "total": 3}}"#;
        let ledger = Ledger::load(&catalog(), Some(blob));
        assert_eq!(ledger.get("CS23601"), Some(record(3, 3)));
    }
}
