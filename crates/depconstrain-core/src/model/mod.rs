pub mod constraint;
pub mod constraint_set;

pub use constraint::{
    constraint_from_fields, with_advisory_list, with_advisory_prefix, Constraint,
    ConstraintBuilder, Field, CONSTRAINT_REGION,
};
pub use constraint_set::{ConstraintSet, ConstraintSetBuilder, SortPolicy};
