//! An in-memory host world with sphere and box parts, used by the demo and tests.
mod boundary;
mod sandbox_world;

pub use boundary::{BoxBoundary, ColliderBoundary, SphereBoundary};
pub use sandbox_world::{SandboxPart, SandboxWorld};
