//! `vnt2txt` — convert `.vnt` notes (vNote) into plain UTF-8 text files.
//!
//! This crate provides the core library for parsing note records, decoding
//! their bodies, and writing one text file per note.

pub mod config;
pub mod convert;
pub mod decoder;
pub mod error;
pub mod export;
pub mod model;
pub mod parser;
