pub mod aabb;
pub mod plane;
pub mod winding;

pub use aabb::Aabb;
pub use plane::{Plane3, PlaneSide};
pub use winding::{plane_basis, planes_concave, SplitCounts, Winding};
