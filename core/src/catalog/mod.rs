//! Latitude-ordered machine catalog and its loaders.

pub mod geojson;
pub mod record;

use std::path::Path;

pub use record::{MachineRecord, MachineStatus, VisitedStatus};

/// Errors raised while building a catalog from external data.
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("reading catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid feature at index {index}: {reason}")]
    InvalidFeature { index: usize, reason: String },
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Machine records kept in non-decreasing latitude order.
///
/// The engine relies on this ordering for its pruned scan and never checks
/// it, so every constructor sorts.
#[derive(Debug, Clone, Default)]
pub struct MachineCatalog {
    records: Vec<MachineRecord>,
}

impl MachineCatalog {
    pub fn new(mut records: Vec<MachineRecord>) -> Self {
        records.sort_by(|a, b| a.latitude.total_cmp(&b.latitude));
        Self { records }
    }

    pub fn load_geojson<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        let path_ref = path.as_ref();
        let contents = std::fs::read_to_string(path_ref).map_err(|source| CatalogError::Io {
            path: path_ref.display().to_string(),
            source,
        })?;
        Self::from_geojson_str(&contents)
    }

    pub fn from_geojson_str(contents: &str) -> CatalogResult<Self> {
        geojson::parse_records(contents).map(Self::new)
    }

    pub fn records(&self) -> &[MachineRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&MachineRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Updates the visited status of `id` in place. Latitude order is
    /// untouched. Returns `false` for unknown ids.
    pub fn set_status(&mut self, id: &str, status: VisitedStatus) -> bool {
        match self.records.iter_mut().find(|record| record.id == id) {
            Some(record) => {
                record.visited_status = status;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_sorts_by_latitude_on_construction() {
        let catalog = MachineCatalog::new(vec![
            MachineRecord::new("north", 52.0, 13.0),
            MachineRecord::new("south", -33.0, 151.0),
            MachineRecord::new("middle", 47.0, 8.0),
        ]);
        let ids: Vec<_> = catalog.records().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["south", "middle", "north"]);
    }

    #[test]
    fn equal_latitudes_keep_insertion_order() {
        let catalog = MachineCatalog::new(vec![
            MachineRecord::new("b", 47.0, 9.0),
            MachineRecord::new("a", 47.0, 8.0),
        ]);
        assert_eq!(catalog.records()[0].id, "b");
        assert_eq!(catalog.records()[1].id, "a");
    }

    #[test]
    fn set_status_changes_only_the_named_record() {
        let mut catalog = MachineCatalog::new(vec![
            MachineRecord::new("1", 47.0, 8.0),
            MachineRecord::new("2", 48.0, 8.0),
        ]);
        assert!(catalog.set_status("2", VisitedStatus::Visited));
        assert!(!catalog.set_status("404", VisitedStatus::Visited));
        assert_eq!(catalog.get("1").unwrap().visited_status, VisitedStatus::Unvisited);
        assert_eq!(catalog.get("2").unwrap().visited_status, VisitedStatus::Visited);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = MachineCatalog::load_geojson("/nonexistent/all_locations.json").unwrap_err();
        assert!(err.to_string().contains("all_locations.json"));
    }
}
