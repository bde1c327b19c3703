//! Building and layout types.

use campusloop_common::{BuildingId, PlanarPoint};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BuildingKind {
    ResearchLab,
    Dormitory,
    LectureHall,
    Cafeteria,
    AdminBlock,
}

impl BuildingKind {
    pub const ALL: [BuildingKind; 5] = [
        Self::ResearchLab,
        Self::Dormitory,
        Self::LectureHall,
        Self::Cafeteria,
        Self::AdminBlock,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::ResearchLab => "Research Lab",
            Self::Dormitory => "Dormitory",
            Self::LectureHall => "Lecture Hall",
            Self::Cafeteria => "Cafeteria",
            Self::AdminBlock => "Admin Block",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BuildingStatus {
    Active,
    Maintenance,
    Restricted,
}

impl BuildingStatus {
    pub const ALL: [BuildingStatus; 3] = [Self::Active, Self::Maintenance, Self::Restricted];
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Building {
    pub id: BuildingId,
    pub position: Position,
    pub dimensions: Dimensions,
    pub name: String,
    pub kind: BuildingKind,
    pub status: BuildingStatus,
    /// Percent, 0-99.
    pub occupancy: u8,
}

impl Building {
    /// Ground-plane position used for routes and errand points.
    pub fn planar(&self) -> PlanarPoint {
        PlanarPoint::new(self.position.x, self.position.z)
    }
}

/// One immutable generation of buildings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub(super) generation: u64,
    pub(super) buildings: Vec<Building>,
    pub(super) emergency_target: Option<BuildingId>,
}

impl Layout {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    /// Ids are dense (`0..len`), so lookup is an index.
    pub fn get(&self, id: BuildingId) -> Option<&Building> {
        self.buildings.get(id.0 as usize).filter(|b| b.id == id)
    }

    pub fn contains(&self, id: BuildingId) -> bool {
        self.get(id).is_some()
    }

    pub fn emergency_target(&self) -> Option<BuildingId> {
        self.emergency_target
    }

    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }
}
