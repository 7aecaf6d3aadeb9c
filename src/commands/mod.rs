mod hollow;
mod merge;
mod offset;
mod split;
mod subtract;

pub use hollow::{CsgHollow, HollowReport, MakeRoom};
pub use merge::CsgMerge;
pub use offset::{OffsetReport, OffsetSelected};
pub use split::{CsgSplit, SplitReport};
pub use subtract::{CsgSubtract, SubtractReport};

use crate::scene::{SceneGraph, ShaderSource, UndoSystem};

/// The collaborators a command works against.
pub struct CsgContext<'a, S: SceneGraph> {
    pub scene: &'a mut S,
    pub undo: &'a mut dyn UndoSystem,
    pub shaders: &'a dyn ShaderSource,
}

impl<'a, S: SceneGraph> CsgContext<'a, S> {
    /// Bundles the collaborators for one or more commands.
    #[must_use]
    pub fn new(
        scene: &'a mut S,
        undo: &'a mut dyn UndoSystem,
        shaders: &'a dyn ShaderSource,
    ) -> Self {
        Self {
            scene,
            undo,
            shaders,
        }
    }
}

fn plural(count: usize, singular: &'static str, plural: &'static str) -> &'static str {
    if count == 1 {
        singular
    } else {
        plural
    }
}
