//! Export of decoded notes as plain text files.

pub mod text;
