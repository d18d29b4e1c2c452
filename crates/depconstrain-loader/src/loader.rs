//! Loader facade with boundary logging.
//!
//! Picks the constraints file of a directory, dispatches to the reader for
//! its encoding and wraps every reader failure once with the file's path.
//!
//! ## Logging Ownership
//!
//! The facade owns lifecycle logging (`log_op_start!`, `log_op_end!`,
//! `log_op_error!`); the readers below it only emit `tracing::debug!`.

#![allow(clippy::result_large_err)]

use crate::errors::{ambiguous_source, io_error, load_failed, unknown_encoding, Result};
use crate::json::read_from_json;
use crate::xml::read_from_xml;
use depconstrain_core::config::LoaderConfig;
use depconstrain_core::core_types::schema::{ENCODING_SCHEMA_TREE, ENCODING_TAG_STREAM};
use depconstrain_core::model::ConstraintSet;
use depconstrain_core::{log_op_end, log_op_error, log_op_start};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// The two supported file encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Nested markup (`constraints.xml`)
    TagStream,
    /// Schema-validated, canonically formatted document (`dependency-constraints.json`)
    SchemaTree,
}

impl Encoding {
    /// Encoding implied by a file extension, case-insensitively
    pub fn from_path(path: &Path) -> Option<Encoding> {
        let extension = path.extension()?.to_str()?;
        if extension.eq_ignore_ascii_case("xml") {
            Some(Encoding::TagStream)
        } else if extension.eq_ignore_ascii_case("json") {
            Some(Encoding::SchemaTree)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::TagStream => ENCODING_TAG_STREAM,
            Encoding::SchemaTree => ENCODING_SCHEMA_TREE,
        }
    }
}

/// A constraints file found in a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintsFile {
    pub path: PathBuf,
    pub encoding: Encoding,
}

/// Find the constraints file of `dir`, if there is one
///
/// # Errors
///
/// `AmbiguousSource` when files for both encodings are present.
pub fn locate_constraints_file(dir: &Path, config: &LoaderConfig) -> Result<Option<ConstraintsFile>> {
    let xml = dir.join(&config.xml_file_name);
    let json = dir.join(&config.json_file_name);

    match (xml.is_file(), json.is_file()) {
        (true, true) => Err(ambiguous_source(dir, &xml, &json)),
        (true, false) => Ok(Some(ConstraintsFile {
            path: xml,
            encoding: Encoding::TagStream,
        })),
        (false, true) => Ok(Some(ConstraintsFile {
            path: json,
            encoding: Encoding::SchemaTree,
        })),
        (false, false) => Ok(None),
    }
}

/// Load the constraints of a directory
///
/// A directory without a constraints file yields the empty set.
///
/// # Errors
///
/// `AmbiguousSource`, or `LoadFailed` wrapping the reader's error with the
/// path of the file that failed.
pub fn load_constraints(dir: &Path, config: &LoaderConfig) -> Result<ConstraintSet> {
    log_op_start!("load_constraints", dir = %dir.display());
    let start = Instant::now();

    let result = locate_constraints_file(dir, config).and_then(|found| match found {
        Some(file) => read_constraints_file(&file, config),
        None => {
            tracing::debug!(dir = %dir.display(), "No constraints file present");
            Ok(ConstraintSet::empty())
        }
    });

    finish_op("load_constraints", &result, start);
    result
}

/// Load one constraints file, choosing the reader from its extension
///
/// # Errors
///
/// `Config` for an extension other than `.xml` / `.json`, otherwise as for
/// [`load_constraints`].
pub fn load_constraints_from_file(path: &Path, config: &LoaderConfig) -> Result<ConstraintSet> {
    log_op_start!("load_constraints_file", file = %path.display());
    let start = Instant::now();

    let result = Encoding::from_path(path)
        .ok_or_else(|| unknown_encoding(path))
        .and_then(|encoding| {
            let file = ConstraintsFile {
                path: path.to_path_buf(),
                encoding,
            };
            read_constraints_file(&file, config)
        });

    finish_op("load_constraints_file", &result, start);
    result
}

fn read_constraints_file(file: &ConstraintsFile, config: &LoaderConfig) -> Result<ConstraintSet> {
    tracing::debug!(
        file = %file.path.display(),
        encoding = file.encoding.as_str(),
        "Reading constraints file"
    );

    let label = file
        .path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.path.display().to_string());

    File::open(&file.path)
        .map_err(|e| io_error("open_constraints_file", e))
        .and_then(|input| match file.encoding {
            Encoding::TagStream => read_from_xml(input, config.sort_policy),
            Encoding::SchemaTree => read_from_json(input, &label),
        })
        .map_err(|cause| load_failed(&file.path, cause))
}

fn finish_op(op: &str, result: &Result<ConstraintSet>, start: Instant) {
    let duration_ms = start.elapsed().as_millis() as u64;
    match result {
        Ok(set) => {
            log_op_end!(op, duration_ms = duration_ms, constraint_count = set.len());
        }
        Err(err) => {
            log_op_error!(op, err, duration_ms = duration_ms);
        }
    }
}
