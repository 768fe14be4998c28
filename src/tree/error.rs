//! Common error types for command tree operations

/// A common error type for command tree navigation and validation.
///
/// Selection and navigation errors are caller mistakes against the static
/// tree; they are surfaced immediately as typed results and never retried
/// internally. Validation errors mean the compiled-in tree data itself is
/// malformed and must be fixed, not tolerated.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// An entry index beyond the block's declared entry count.
    IndexOutOfRange,
    /// The entry is a title (or a submenu) and carries no command.
    NotInvocable,
    /// The entry does not reference a child block.
    NotSubmenu,
    /// A block's first entry is not a title entry.
    MissingTitle,
    /// A title entry appears somewhere other than the start of a block.
    MisplacedTitle,
    /// A title's declared entry count does not match the entries present.
    CountMismatch,
    /// Menu nesting exceeds the navigation stack capacity.
    DepthExceeded,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::IndexOutOfRange => defmt::write!(f, "IndexOutOfRange"),
            Error::NotInvocable => defmt::write!(f, "NotInvocable"),
            Error::NotSubmenu => defmt::write!(f, "NotSubmenu"),
            Error::MissingTitle => defmt::write!(f, "MissingTitle"),
            Error::MisplacedTitle => defmt::write!(f, "MisplacedTitle"),
            Error::CountMismatch => defmt::write!(f, "CountMismatch"),
            Error::DepthExceeded => defmt::write!(f, "DepthExceeded"),
        }
    }
}
