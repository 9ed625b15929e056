//! §4.7: per-entity state histories. A history is an ordered run of non-overlapping records, with
//! at most one "open" tail record (`ts_end = None`) still in effect when the plan ends.

/// Shared timestamp accessors so [`History::get_state_at`] doesn't need one copy per record type.
pub trait TimeSpan {
    fn ts_start(&self) -> f64;
    fn ts_end(&self) -> Option<f64>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct MachineStateRecord {
    pub ts_start: f64,
    pub ts_end: Option<f64>,
    pub location: String,
    pub mass_start: f64,
    pub mass_end: f64,
}

impl TimeSpan for MachineStateRecord {
    fn ts_start(&self) -> f64 {
        self.ts_start
    }
    fn ts_end(&self) -> Option<f64> {
        self.ts_end
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldStateRecord {
    pub ts_start: f64,
    pub ts_end: Option<f64>,
    pub harvester: Option<String>,
    pub harvested_percentage: f64,
}

impl TimeSpan for FieldStateRecord {
    fn ts_start(&self) -> f64 {
        self.ts_start
    }
    fn ts_end(&self) -> Option<f64> {
        self.ts_end
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SiloStateRecord {
    pub ts_start: f64,
    pub ts_end: Option<f64>,
    pub mass_in_silo: f64,
}

impl TimeSpan for SiloStateRecord {
    fn ts_start(&self) -> f64 {
        self.ts_start
    }
    fn ts_end(&self) -> Option<f64> {
        self.ts_end
    }
}

/// An append-ordered run of records for one entity. Records are pushed in increasing `ts_start`
/// order as the decoder walks the plan; nothing here re-sorts them.
#[derive(Clone, Debug, Default)]
pub struct History<T> {
    records: Vec<T>,
}

impl<T: TimeSpan> History<T> {
    pub fn new() -> Self {
        History { records: Vec::new() }
    }

    pub fn push(&mut self, record: T) {
        self.records.push(record);
    }

    pub fn last(&self) -> Option<&T> {
        self.records.last()
    }

    pub fn last_mut(&mut self) -> Option<&mut T> {
        self.records.last_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Linear scan for the record active at time `t`, optionally starting from `hint` (an index
    /// returned by a previous call, per §4.7 "by linear scan with an optional hint index"). Falls
    /// back to a full scan from the start if the hint misses.
    pub fn get_state_at(&self, t: f64, hint: Option<usize>) -> Option<(usize, &T)> {
        let start = hint.unwrap_or(0).min(self.records.len().saturating_sub(1));
        if let Some((idx, record)) = self.scan_from(start, t) {
            return Some((idx, record));
        }
        if start != 0 {
            return self.scan_from(0, t);
        }
        None
    }

    fn scan_from(&self, start: usize, t: f64) -> Option<(usize, &T)> {
        for (idx, record) in self.records.iter().enumerate().skip(start) {
            let in_range = t >= record.ts_start() && record.ts_end().map(|end| t < end).unwrap_or(true);
            if in_range {
                return Some((idx, record));
            }
        }
        // A hint past the matching record; also try scanning backward from it.
        for idx in (0..start).rev() {
            let record = &self.records[idx];
            let in_range = t >= record.ts_start() && record.ts_end().map(|end| t < end).unwrap_or(true);
            if in_range {
                return Some((idx, record));
            }
        }
        None
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_state_at_finds_the_active_record() {
        let mut h = History::new();
        h.push(MachineStateRecord {
            ts_start: 0.0,
            ts_end: Some(10.0),
            location: "street".to_string(),
            mass_start: 0.0,
            mass_end: 0.0,
        });
        h.push(MachineStateRecord {
            ts_start: 10.0,
            ts_end: None,
            location: "field_1".to_string(),
            mass_start: 0.0,
            mass_end: 0.0,
        });
        assert_eq!(h.get_state_at(5.0, None).unwrap().1.location, "street");
        assert_eq!(h.get_state_at(15.0, None).unwrap().1.location, "field_1");
        assert_eq!(h.get_state_at(10.0, None).unwrap().1.location, "field_1");
    }

    #[test]
    fn open_tail_record_matches_any_time_after_its_start() {
        let mut h = History::new();
        h.push(FieldStateRecord {
            ts_start: 0.0,
            ts_end: None,
            harvester: None,
            harvested_percentage: 0.0,
        });
        assert!(h.get_state_at(1_000_000.0, None).is_some());
    }
}
