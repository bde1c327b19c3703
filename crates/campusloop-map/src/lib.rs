//! Campus map state: the building arena and the selection mode machine.
//!
//! Both are pure and synchronous. Rendering reads positions and selection
//! roles from here; nothing in this crate does I/O.

pub mod layout;
pub mod selection;

pub use layout::{Building, BuildingArena, BuildingKind, BuildingStatus, Layout, LayoutParams};
pub use selection::{PickOutcome, PickRole, SelectionMode, SelectionModeMachine};
