use strum_macros::{Display, EnumIter};

/// One of the two disjoint slot groups serviced as alternating lanes.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Display, EnumIter)]
pub enum Phase {
    #[strum(serialize = "phase 1")]
    One,
    #[strum(serialize = "phase 2")]
    Two,
}

impl Phase {
    /// Returns the lane that has to be served after this one.
    pub fn opposite(self) -> Self {
        match self {
            Phase::One => Phase::Two,
            Phase::Two => Phase::One,
        }
    }
}
