pub mod arena;
pub mod doc;
pub mod graph;
pub mod node;

pub use arena::NodeArena;
pub use doc::{NodeEntry, SceneDoc};
pub use graph::{SceneQuery, SceneTree};
pub use node::SceneNode;
