use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// The user's own relationship to a machine.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum VisitedStatus {
    #[default]
    Unvisited,
    Visited,
    Marked,
    Retired,
}

/// Operational state reported by the upstream machine data set.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum MachineStatus {
    #[default]
    Available,
    OutOfOrder,
    Retired,
}

/// A single penny press machine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MachineRecord {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub visited_status: VisitedStatus,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub machine_status: MachineStatus,
}

impl MachineStatus {
    /// Lenient parse used for upstream data; unknown labels count as available.
    pub fn from_label(label: &str) -> Self {
        match label {
            "out-of-order" => Self::OutOfOrder,
            "retired" => Self::Retired,
            _ => Self::Available,
        }
    }
}

impl MachineRecord {
    pub fn new(id: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: id.into(),
            latitude,
            longitude,
            visited_status: VisitedStatus::Unvisited,
            title: String::new(),
            machine_status: MachineStatus::Available,
        }
    }

    pub fn with_status(mut self, status: VisitedStatus) -> Self {
        self.visited_status = status;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    pub fn is_unvisited(&self) -> bool {
        self.visited_status == VisitedStatus::Unvisited
    }
}
