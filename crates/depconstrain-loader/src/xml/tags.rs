//! Region (tag) vocabulary of the constraints.xml format

pub const CONSTRAINTS: &str = "constraints";
pub const CONSTRAINT: &str = "constraint";
pub const GROUP: &str = "group";
pub const NAME: &str = "name";
pub const SUGGESTED_VERSION: &str = "suggested-version";
pub const REJECTED: &str = "rejected";
pub const REJECT: &str = "reject";
pub const BECAUSE: &str = "because";

/// Attribute of `<because>` carrying an advisory identifier
pub const ADVISORY: &str = "advisory";

/// Every region the reader understands; anything else is ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Constraints,
    Constraint,
    Group,
    Name,
    SuggestedVersion,
    Rejected,
    Reject,
    Because,
}

impl Region {
    pub const COUNT: usize = 8;

    pub fn from_tag(tag: &str) -> Option<Region> {
        match tag {
            CONSTRAINTS => Some(Region::Constraints),
            CONSTRAINT => Some(Region::Constraint),
            GROUP => Some(Region::Group),
            NAME => Some(Region::Name),
            SUGGESTED_VERSION => Some(Region::SuggestedVersion),
            REJECTED => Some(Region::Rejected),
            REJECT => Some(Region::Reject),
            BECAUSE => Some(Region::Because),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Region::Constraints => CONSTRAINTS,
            Region::Constraint => CONSTRAINT,
            Region::Group => GROUP,
            Region::Name => NAME,
            Region::SuggestedVersion => SUGGESTED_VERSION,
            Region::Rejected => REJECTED,
            Region::Reject => REJECT,
            Region::Because => BECAUSE,
        }
    }

    /// The region that must already be open for this one to start
    pub fn required_parent(&self) -> Option<Region> {
        match self {
            Region::Constraints => None,
            Region::Constraint => Some(Region::Constraints),
            Region::Group
            | Region::Name
            | Region::SuggestedVersion
            | Region::Rejected
            | Region::Because => Some(Region::Constraint),
            Region::Reject => Some(Region::Rejected),
        }
    }

    /// Regions that may appear at most once per constraint
    pub fn is_singular(&self) -> bool {
        matches!(
            self,
            Region::Group
                | Region::Name
                | Region::SuggestedVersion
                | Region::Rejected
                | Region::Because
        )
    }

    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}
