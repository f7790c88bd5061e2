//! Ordered, de-duplicated set of configured stations

use serde::{Deserialize, Serialize};

use super::StationId;
use crate::errors::DomainError;

/// The stations an integration instance polls for
///
/// Order follows the configuration; the first occurrence of a duplicate wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationSet {
    stations: Vec<StationId>,
}

impl StationSet {
    /// Build a set from raw configuration strings
    ///
    /// Blank entries are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error for the first entry that is not a valid identifier.
    pub fn parse<I, S>(raw: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for entry in raw {
            if entry.as_ref().trim().is_empty() {
                continue;
            }
            set.insert(StationId::new(entry)?);
        }
        Ok(set)
    }

    /// Add a station unless it is already present
    ///
    /// Returns `true` if the station was added.
    pub fn insert(&mut self, station: StationId) -> bool {
        if self.stations.contains(&station) {
            return false;
        }
        self.stations.push(station);
        true
    }

    /// Comma-joined identifiers, as expected by the `ids` query parameter
    #[must_use]
    pub fn joined(&self) -> String {
        self.stations
            .iter()
            .map(StationId::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Whether no stations are configured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Number of configured stations
    #[must_use]
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Iterate stations in configuration order
    pub fn iter(&self) -> std::slice::Iter<'_, StationId> {
        self.stations.iter()
    }
}

impl FromIterator<StationId> for StationSet {
    fn from_iter<T: IntoIterator<Item = StationId>>(iter: T) -> Self {
        let mut set = Self::default();
        for station in iter {
            set.insert(station);
        }
        set
    }
}

impl<'a> IntoIterator for &'a StationSet {
    type Item = &'a StationId;
    type IntoIter = std::slice::Iter<'a, StationId>;

    fn into_iter(self) -> Self::IntoIter {
        self.stations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_normalizes_and_dedups() {
        let set = StationSet::parse(["klax", " KSFO ", "KLAX", "ksfo"]).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.joined(), "KLAX,KSFO");
    }

    #[test]
    fn parse_skips_blank_entries() {
        let set = StationSet::parse(["", "  ", "eddf"]).unwrap();
        assert_eq!(set.joined(), "EDDF");
    }

    #[test]
    fn parse_rejects_invalid_entry() {
        assert!(StationSet::parse(["KLAX", "K LAX"]).is_err());
    }

    #[test]
    fn empty_set() {
        let set = StationSet::parse(Vec::<String>::new()).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.joined(), "");
    }

    #[test]
    fn insert_reports_duplicates() {
        let mut set = StationSet::default();
        assert!(set.insert(StationId::new("EGLL").unwrap()));
        assert!(!set.insert(StationId::new("egll").unwrap()));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn iteration_keeps_configuration_order() {
        let set = StationSet::parse(["KSFO", "KLAX", "EDDF"]).unwrap();
        let ids: Vec<&str> = set.iter().map(StationId::as_str).collect();
        assert_eq!(ids, vec!["KSFO", "KLAX", "EDDF"]);
    }

    #[test]
    fn collect_from_station_ids() {
        let set: StationSet = ["KLAX", "KLAX", "KJFK"]
            .into_iter()
            .map(|s| StationId::new(s).unwrap())
            .collect();
        assert_eq!(set.joined(), "KLAX,KJFK");
    }
}
