pub mod color;
pub mod error;
pub mod ids;
pub mod prefs;
pub mod scan;
pub mod scene;
pub mod tags;

pub use color::Color;
pub use error::*;
pub use ids::NodeID;
pub use prefs::{FinderPrefs, PREFS_VERSION};
pub use scan::*;
pub use scene::*;
pub use tags::*;
