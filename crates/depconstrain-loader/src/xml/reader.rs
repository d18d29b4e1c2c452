//! constraints.xml reader

use crate::errors::Result;
use crate::xml::events::drive;
use crate::xml::handler::ConstraintsHandler;
use depconstrain_core::model::{ConstraintSet, SortPolicy};
use quick_xml::Reader;
use std::io::{BufReader, Read};

/// Read a constraint set from a tag-stream encoded input
///
/// `input` is consumed and dropped exactly once before this returns, on
/// success and on every failure path.
///
/// # Errors
///
/// `MalformedDocument`, `Io`, `NestingViolation`, `DuplicateRegion`,
/// `EmptyField`, `MissingField`, or `SortOrderViolation` under
/// [`SortPolicy::Strict`].
pub fn read_from_xml<R: Read>(input: R, policy: SortPolicy) -> Result<ConstraintSet> {
    let mut handler = ConstraintsHandler::new();
    drive(Reader::from_reader(BufReader::new(input)), &mut handler)?;

    tracing::debug!(
        constraint_count = handler.len(),
        sort_policy = ?policy,
        "Parsed constraints document"
    );
    handler.finish(policy)
}

/// Read a constraint set from an in-memory document
///
/// # Errors
///
/// As for [`read_from_xml`].
pub fn read_from_xml_str(xml: &str, policy: SortPolicy) -> Result<ConstraintSet> {
    read_from_xml(xml.as_bytes(), policy)
}
