//! Nesting state machine assembling constraints from region events

use crate::errors::{duplicate_region, internal, nested_region, nesting_violation, Result};
use crate::xml::events::{RegionAttributes, RegionHandler};
use crate::xml::tags::{Region, ADVISORY, CONSTRAINT};
use depconstrain_core::model::{
    with_advisory_prefix, Constraint, ConstraintBuilder, ConstraintSet, ConstraintSetBuilder,
    SortPolicy,
};

/// Builds a [`ConstraintSet`] from the region events of one document
///
/// Holds one "inside" flag per region kind. A region may only start while
/// its required parent is open, text fragments are concatenated into the
/// buffer of every open text region, and a buffer is committed to the
/// current [`ConstraintBuilder`] only when its region ends.
#[derive(Debug, Default)]
pub struct ConstraintsHandler {
    constraints: ConstraintSetBuilder,
    current: Option<ConstraintBuilder>,
    inside: [bool; Region::COUNT],
    seen_in_constraint: [bool; Region::COUNT],
    text: [Option<String>; Region::COUNT],
    advisory: Option<String>,
}

impl ConstraintsHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of constraints completed so far
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Finalize the set under `policy`
    ///
    /// # Errors
    ///
    /// `SortOrderViolation` when `policy` is strict and the constraints are
    /// out of order.
    pub fn finish(self, policy: SortPolicy) -> Result<ConstraintSet> {
        Ok(self.constraints.build(policy)?)
    }

    fn is_inside(&self, region: Region) -> bool {
        self.inside[region.index()]
    }

    fn current_builder(&mut self, region: Region) -> Result<&mut ConstraintBuilder> {
        self.current.as_mut().ok_or_else(|| {
            internal(
                "read_xml",
                format!("<{}> closed without an open <{}>", region.tag(), CONSTRAINT),
            )
        })
    }

    fn commit_text(&mut self, region: Region) -> Result<()> {
        let mut value = self.text[region.index()].take().unwrap_or_default();
        if region == Region::Because {
            if let Some(advisory) = self.advisory.take() {
                value = with_advisory_prefix(&advisory, &value);
            }
        }
        let builder = self.current_builder(region)?;
        match region {
            Region::Group => builder.set_group(value)?,
            Region::Name => builder.set_name(value)?,
            Region::SuggestedVersion => builder.set_suggested_version(value)?,
            Region::Reject => builder.add_rejected_version(value)?,
            Region::Because => builder.set_reason(value)?,
            Region::Constraints | Region::Constraint | Region::Rejected => {}
        }
        Ok(())
    }

    fn finish_constraint(&mut self) -> Result<()> {
        let builder = self
            .current
            .take()
            .ok_or_else(|| internal("read_xml", "no constraint in progress"))?;
        let constraint: Constraint = builder.build()?;
        tracing::debug!(constraint = %constraint, "Read constraint");
        self.constraints.add(constraint);
        Ok(())
    }
}

impl RegionHandler for ConstraintsHandler {
    fn start_region(&mut self, name: &str, attributes: &RegionAttributes) -> Result<()> {
        let Some(region) = Region::from_tag(name) else {
            return Ok(());
        };

        if self.is_inside(region) {
            return Err(nested_region(region.tag()));
        }
        if let Some(parent) = region.required_parent() {
            if !self.is_inside(parent) {
                return Err(nesting_violation(region.tag(), parent.tag()));
            }
        }
        if region.is_singular() {
            if self.seen_in_constraint[region.index()] {
                return Err(duplicate_region(region.tag(), CONSTRAINT));
            }
            self.seen_in_constraint[region.index()] = true;
        }

        match region {
            Region::Constraint => {
                self.current = Some(Constraint::builder());
                self.seen_in_constraint = [false; Region::COUNT];
            }
            Region::Because => {
                self.advisory = attributes.get(ADVISORY).map(str::to_string);
            }
            _ => {}
        }

        self.inside[region.index()] = true;
        Ok(())
    }

    fn end_region(&mut self, name: &str) -> Result<()> {
        let Some(region) = Region::from_tag(name) else {
            return Ok(());
        };
        self.inside[region.index()] = false;

        match region {
            Region::Constraint => self.finish_constraint(),
            Region::Constraints | Region::Rejected => Ok(()),
            _ => self.commit_text(region),
        }
    }

    fn characters(&mut self, text: &str) -> Result<()> {
        for region in TEXT_REGIONS {
            if self.is_inside(region) {
                self.text[region.index()]
                    .get_or_insert_with(String::new)
                    .push_str(text);
            }
        }
        Ok(())
    }
}

const TEXT_REGIONS: [Region; 5] = [
    Region::Group,
    Region::Name,
    Region::SuggestedVersion,
    Region::Reject,
    Region::Because,
];
