pub mod classify;
pub mod hollow;
mod merge;
mod offset;
pub mod query;
mod split;
mod subtract;

pub use classify::{classify_brush, classify_plane, test_plane, BrushClassification};
pub use hollow::{ExclusionFilter, Hollow, HollowSettings, HollowShaders, HollowType};
pub use merge::Merge;
pub use offset::OffsetFaces;
pub use split::{ClipperPoints, SplitByPlane, SplitMode, SplitOutcome};
pub use subtract::{Subtract, SubtractOutcome};
