//! Brush CSG walkthrough: builds a small room and runs every tool on it.
//!
//! Usage:
//! ```text
//! cargo run --example csg_tool                                   # default settings
//! cargo run --example csg_tool -- '{"offset": 8, "exclusion": {"projection": "XY"}}'
//! ```

use brushcsg::brush::Brush;
use brushcsg::commands::{CsgContext, CsgHollow, CsgMerge, CsgSplit, CsgSubtract, MakeRoom, OffsetSelected};
use brushcsg::config::CsgToolConfig;
use brushcsg::math::Point3;
use brushcsg::operations::query::{BoundingBox, Volume};
use brushcsg::operations::{ClipperPoints, HollowType, SplitMode};
use brushcsg::scene::{Scene, SceneGraph, ShaderDefaults, UndoLog};
use brushcsg::CsgError;

fn main() -> Result<(), CsgError> {
    // Default: WARN for everything, INFO for brushcsg.
    // Override with RUST_LOG env var (e.g. RUST_LOG=brushcsg=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("brushcsg=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = match std::env::args().nth(1) {
        Some(json) => serde_json::from_str(&json).unwrap_or_else(|err| {
            tracing::warn!("ignoring settings: {err}");
            CsgToolConfig::default()
        }),
        None => CsgToolConfig::default(),
    };

    let mut scene = Scene::new();
    let mut undo = UndoLog::new();
    let shaders = ShaderDefaults::default();
    let world = scene.world();

    // A room around a 256 unit cube.
    let room = scene.insert_brush(world, cuboid([0.0; 3], [256.0; 3]))?;
    scene.set_selected(room, true)?;
    {
        let mut ctx = CsgContext::new(&mut scene, &mut undo, &shaders);
        MakeRoom::new(16.0).execute(&mut ctx)?;
    }

    // A doorway through the west wall.
    let door = scene.insert_brush(world, cuboid([-32.0, 96.0, 0.0], [32.0, 160.0, 128.0]))?;
    scene.clear_selection();
    scene.set_selected(door, true)?;
    {
        let mut ctx = CsgContext::new(&mut scene, &mut undo, &shaders);
        CsgSubtract::new().execute(&mut ctx)?;
    }
    scene.remove(door)?;

    // A pillar from two stacked blocks, trimmed at an angle and thickened.
    let lower = scene.insert_brush(world, cuboid([96.0, 96.0, 0.0], [160.0, 160.0, 64.0]))?;
    let upper = scene.insert_brush(world, cuboid([96.0, 96.0, 64.0], [160.0, 160.0, 256.0]))?;
    scene.clear_selection();
    scene.set_selected(lower, true)?;
    scene.set_selected(upper, true)?;
    {
        let mut ctx = CsgContext::new(&mut scene, &mut undo, &shaders);
        let pillar = CsgMerge::new().execute(&mut ctx)?;
        let cut = ClipperPoints::new(
            Point3::new(96.0, 96.0, 224.0),
            Point3::new(160.0, 96.0, 256.0),
            Point3::new(96.0, 160.0, 224.0),
        );
        CsgSplit::new(cut, SplitMode::Clip, config.caulk).execute(&mut ctx)?;
        OffsetSelected::expand(&config).execute(&mut ctx)?;
        ctx.scene.set_selected(pillar, false)?;
    }

    // A hollow crate in the corner.
    let crate_brush = scene.insert_brush(world, cuboid([192.0, 192.0, 0.0], [240.0, 240.0, 48.0]))?;
    scene.set_selected(crate_brush, true)?;
    {
        let mut ctx = CsgContext::new(&mut scene, &mut undo, &shaders);
        CsgHollow::new(HollowType::Diag, &config).execute(&mut ctx)?;
    }

    for id in scene.all_brushes() {
        let brush = scene.brush(id)?;
        if let Some(aabb) = BoundingBox::new(brush).execute() {
            tracing::info!(
                faces = brush.len(),
                volume = Volume::new(brush).execute(),
                "brush {:?} .. {:?}",
                aabb.min.coords.as_slice(),
                aabb.max.coords.as_slice(),
            );
        }
    }
    tracing::info!(steps = ?undo.committed(), "{} brushes", scene.all_brushes().len());
    Ok(())
}

fn cuboid(min: [f64; 3], max: [f64; 3]) -> Brush {
    Brush::cuboid(Point3::from(min), Point3::from(max), "textures/base/wall")
}
