use thiserror::Error;

/// Top-level error type for brush CSG operations.
#[derive(Debug, Error)]
pub enum CsgError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate plane: points {0} are collinear or coincident")]
    DegeneratePlane(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors raised by the scene collaborator.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("node not found in scene")]
    NodeNotFound,

    #[error("node is not a brush")]
    NotABrush,

    #[error("node is not a container")]
    NotAContainer,
}

/// Errors that abort a driving operation before the scene is touched.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("{operation}: no brushes selected")]
    NoSelection { operation: &'static str },

    #[error("{operation}: at least {required} brushes have to be selected, found {found}")]
    TooFewSelected {
        operation: &'static str,
        required: usize,
        found: usize,
    },

    #[error("result would not be convex")]
    NotConvex,

    #[error("result would have more than {max} faces")]
    TooManyFaces { max: usize },

    #[error("coincident faces have different shaders: '{first}' and '{second}'")]
    ShaderMismatch { first: String, second: String },
}

/// Convenience type alias for results using [`CsgError`].
pub type Result<T> = std::result::Result<T, CsgError>;
