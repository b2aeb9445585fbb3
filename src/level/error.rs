//! Error types for level discovery, parsing, and composition.

use thiserror::Error;

/// Errors that can occur when discovering or loading a level description.
#[derive(Debug, Error)]
pub enum LevelLoadError {
    /// The levels directory could not be enumerated.
    #[error("Cannot access level directory '{path}': {details}")]
    CatalogAccess { path: String, details: String },

    /// The level file could not be read.
    #[error("Failed to read level file '{path}': {details}")]
    Read { path: String, details: String },

    /// The document is not structurally valid JSON for a level description.
    #[error("Malformed level description '{path}': {details}")]
    Malformed { path: String, details: String },

    /// A required attribute is absent from the document.
    #[error("Level description is missing required field '{field}'")]
    MissingField { field: &'static str },
}

/// Fatal failures while composing a parsed level into the scene.
///
/// Unresolvable prefabs and camera targets are deliberately not here; they are
/// non-fatal and only counted on the composition report.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// The scene has no player entity to place at the start position.
    #[error("No player entity found in the scene; cannot place at level start")]
    PlayerEntityNotFound,
}
