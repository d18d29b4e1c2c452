//! Constraint domain model
//!
//! A [`Constraint`] forces a suggested version of one dependency, rejects a
//! list of other versions, and always carries a human-readable reason. It
//! can only be produced by [`ConstraintBuilder::build`], which refuses to
//! finalize until every required field has been supplied.

use crate::errors::ModelError;
use std::fmt;

/// Region that every constraint field belongs under in diagnostics
pub const CONSTRAINT_REGION: &str = "constraint";

/// The fields of a constraint, named the way diagnostics refer to them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Group,
    Name,
    SuggestedVersion,
    RejectedVersion,
    Reason,
}

impl Field {
    /// The region name (tag) a field is read from
    pub fn tag(&self) -> &'static str {
        match self {
            Field::Group => "group",
            Field::Name => "name",
            Field::SuggestedVersion => "suggested-version",
            Field::RejectedVersion => "reject",
            Field::Reason => "because",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One dependency version constraint
///
/// Immutable once built. Equality compares every field; ordering checks use
/// [`Constraint::coordinate`] only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    group: String,
    name: String,
    suggested_version: String,
    rejected_versions: Vec<String>,
    reason: String,
}

impl Constraint {
    /// Start staging a new constraint
    pub fn builder() -> ConstraintBuilder {
        ConstraintBuilder::default()
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn suggested_version(&self) -> &str {
        &self.suggested_version
    }

    /// Rejected version ranges, in the order they were supplied
    pub fn rejected_versions(&self) -> &[String] {
        &self.rejected_versions
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Derived `group:name:suggestedVersion` key used for ordering checks
    pub fn coordinate(&self) -> String {
        format!("{}:{}:{}", self.group, self.name, self.suggested_version)
    }

    /// Compact record used when listing constraints in diagnostics
    pub fn compact_notation(&self) -> String {
        format!(
            "{{\"group\":\"{}\", \"name\":\"{}\", \"suggestedVersion\":\"{}\"}}",
            self.group, self.name, self.suggested_version
        )
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.name, self.suggested_version)
    }
}

/// Prefix `reason` with `"<advisory>: "`
///
/// A blank `reason` is returned unchanged so that the builder still rejects
/// it; an advisory alone is not a reason.
pub fn with_advisory_prefix(advisory: &str, reason: &str) -> String {
    if reason.trim().is_empty() {
        return reason.to_string();
    }
    format!("{}: {}", advisory, reason)
}

/// Prefix `reason` with `"[ID-1, ID-2]: "`; an empty list or a blank
/// `reason` leaves it verbatim
pub fn with_advisory_list<S: AsRef<str>>(identifiers: &[S], reason: &str) -> String {
    if identifiers.is_empty() || reason.trim().is_empty() {
        return reason.to_string();
    }
    let joined: Vec<&str> = identifiers.iter().map(AsRef::as_ref).collect();
    format!("[{}]: {}", joined.join(", "), reason)
}

/// Staging builder for [`Constraint`]
///
/// Fields may arrive in any order. Every setter rejects empty or
/// whitespace-only values; `build` rejects a builder with any required field
/// still unset.
#[derive(Debug, Clone, Default)]
pub struct ConstraintBuilder {
    group: Option<String>,
    name: Option<String>,
    suggested_version: Option<String>,
    rejected_versions: Vec<String>,
    reason: Option<String>,
}

fn require_value(field: Field, value: String) -> Result<String, ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::EmptyField { field: field.tag() });
    }
    Ok(value)
}

impl ConstraintBuilder {
    /// # Errors
    ///
    /// [`ModelError::EmptyField`] if `group` is empty or whitespace.
    pub fn set_group(&mut self, group: impl Into<String>) -> Result<(), ModelError> {
        self.group = Some(require_value(Field::Group, group.into())?);
        Ok(())
    }

    pub fn is_group_set(&self) -> bool {
        self.group.is_some()
    }

    /// # Errors
    ///
    /// [`ModelError::EmptyField`] if `name` is empty or whitespace.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ModelError> {
        self.name = Some(require_value(Field::Name, name.into())?);
        Ok(())
    }

    pub fn is_name_set(&self) -> bool {
        self.name.is_some()
    }

    /// # Errors
    ///
    /// [`ModelError::EmptyField`] if `version` is empty or whitespace.
    pub fn set_suggested_version(&mut self, version: impl Into<String>) -> Result<(), ModelError> {
        self.suggested_version = Some(require_value(Field::SuggestedVersion, version.into())?);
        Ok(())
    }

    pub fn is_suggested_version_set(&self) -> bool {
        self.suggested_version.is_some()
    }

    /// Append one rejected version range; call order is preserved
    ///
    /// # Errors
    ///
    /// [`ModelError::EmptyField`] if `range` is empty or whitespace.
    pub fn add_rejected_version(&mut self, range: impl Into<String>) -> Result<(), ModelError> {
        self.rejected_versions
            .push(require_value(Field::RejectedVersion, range.into())?);
        Ok(())
    }

    /// # Errors
    ///
    /// [`ModelError::EmptyField`] if `reason` is empty or whitespace.
    pub fn set_reason(&mut self, reason: impl Into<String>) -> Result<(), ModelError> {
        self.reason = Some(require_value(Field::Reason, reason.into())?);
        Ok(())
    }

    pub fn is_reason_set(&self) -> bool {
        self.reason.is_some()
    }

    /// The first required field that has not been supplied yet
    pub fn first_missing_field(&self) -> Option<Field> {
        if !self.is_group_set() {
            Some(Field::Group)
        } else if !self.is_name_set() {
            Some(Field::Name)
        } else if !self.is_suggested_version_set() {
            Some(Field::SuggestedVersion)
        } else if !self.is_reason_set() {
            Some(Field::Reason)
        } else {
            None
        }
    }

    /// Finalize the constraint
    ///
    /// # Errors
    ///
    /// [`ModelError::MissingField`] naming the first unset required field and
    /// the `constraint` region it was expected under.
    pub fn build(self) -> Result<Constraint, ModelError> {
        let missing = |field: Field| ModelError::MissingField {
            field: field.tag(),
            region: CONSTRAINT_REGION,
        };
        if let Some(field) = self.first_missing_field() {
            return Err(missing(field));
        }

        Ok(Constraint {
            group: self.group.ok_or_else(|| missing(Field::Group))?,
            name: self.name.ok_or_else(|| missing(Field::Name))?,
            suggested_version: self
                .suggested_version
                .ok_or_else(|| missing(Field::SuggestedVersion))?,
            rejected_versions: self.rejected_versions,
            reason: self.reason.ok_or_else(|| missing(Field::Reason))?,
        })
    }
}

/// Build a constraint from already-extracted raw fields
///
/// Shared by every encoding so that field validation and model construction
/// happen in exactly one place.
///
/// # Errors
///
/// Any [`ModelError`] raised by the builder.
pub fn constraint_from_fields<I>(
    group: &str,
    name: &str,
    suggested_version: &str,
    rejected_versions: I,
    reason: &str,
) -> Result<Constraint, ModelError>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut builder = Constraint::builder();
    builder.set_group(group)?;
    builder.set_name(name)?;
    builder.set_suggested_version(suggested_version)?;
    for range in rejected_versions {
        builder.add_rejected_version(range)?;
    }
    builder.set_reason(reason)?;
    builder.build()
}
