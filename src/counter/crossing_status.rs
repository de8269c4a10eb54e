/// Crossing classification assigned to a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CrossingStatus {
    /// Not yet seen near either line
    #[default]
    Unset,
    /// First seen near the entry line
    Entered,
    /// First seen near the exit line
    Exited,
}

impl CrossingStatus {
    /// Whether a terminal classification has been assigned.
    #[inline]
    pub fn is_classified(self) -> bool {
        !matches!(self, Self::Unset)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unset => "unset",
            Self::Entered => "entered",
            Self::Exited => "exited",
        }
    }
}
