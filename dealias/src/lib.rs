#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # dealias
//!
//! A library for converting macOS Finder alias files to symbolic links.
//!
//! Finder aliases are macOS's legacy link format, distinct from POSIX
//! symlinks. This library walks a directory tree, identifies alias files,
//! resolves each to its original item, and replaces the alias with a
//! standard symlink, keeping a hidden backup of the original alias.
//!
//! ## Core Types
//!
//! - [`Converter`] and [`ConvertOptions`]: the directory tree walker
//! - [`AliasClassifier`] and [`MdlsClassifier`]: alias detection
//! - [`AliasResolver`] and [`FinderScriptSource`]: alias resolution
//! - [`RunTally`]: per-run conversion counters
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```no_run
//! use dealias::{ConvertOptions, Converter, Logger};
//! use std::path::Path;
//!
//! let converter = Converter::new(ConvertOptions::default(), Logger::default());
//! let tally = converter.convert(Path::new("~/Documents/shortcuts")).unwrap();
//! println!("{} converted, {} failed", tally.converted, tally.failed);
//! ```

pub mod classify;
pub mod convert;
pub mod error;
pub mod logging;
pub mod path;
pub mod resolve;

// Re-export key types at crate root for convenience
pub use classify::{AliasClassifier, MdlsClassifier, MockClassifier};
pub use convert::{ConvertOptions, Converter, RunTally};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use path::PathRelationship;
pub use resolve::{AliasResolver, FinderScriptSource, MockOriginalItemSource, OriginalItemSource};
