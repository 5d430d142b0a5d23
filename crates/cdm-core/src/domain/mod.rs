/// Folder tree of a mounted namespace
pub mod folder;

/// Manifest definitions and entity declarations
pub mod manifest;

/// Documents and schema imports
pub mod document;

/// Entity definitions
pub mod entity;

/// Type attribute definitions
pub mod attribute;

/// Trait references
pub mod trait_reference;
