//! Domain types for SigScan

pub mod bar;
pub mod ids;
pub mod signal;
pub mod structure;
pub mod ticker;

pub use bar::{is_strictly_ascending, Bar};
pub use ids::{ConfigHash, ScanId, SignalId};
pub use signal::{
    Classification, EntryType, Rating, Signal, SignalStatus, StopType, StructureSnapshot,
};
pub use structure::{
    Direction, FairValueGap, OrderBlock, StructureBreak, StructureKind, SwingKind, SwingPoint,
};
pub use ticker::Ticker;

/// Symbol type alias
pub type Symbol = String;
