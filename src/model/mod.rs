//! Core data model: the note record.

pub mod note;
