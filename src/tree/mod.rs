//! Static, read-only hierarchical command tree.
//!
//! The tree is compiled-in data: ordered [`Block`]s of labelled [`Entry`]s,
//! where each entry is either the block's title (declaring how many entries
//! the block holds, itself included), a leaf bound to a command advance
//! function, or a submenu referencing a child block. The payload kinds are
//! mutually exclusive by construction, and the declared count is an explicit
//! field that validation checks against the entries physically present.
//!
//! Blocks do not self-describe their parent; returning to a parent is the
//! job of an explicit [`Navigator`] stack (push on descend, pop on ascend).
//!
//! # Label convention
//!
//! An entry's label is free-form display text whose first whitespace token
//! is the invocation name; for leaves taking arguments the rest of the
//! label documents the expected syntax, e.g. `"flash N - flash the LED 'N'
//! times"`. The root block's title is by convention the device name shown
//! in the shell prompt.
//!
//! # Examples
//!
//! ```rust
//! use tickshell::engine::{Context, Step, TickIo};
//! use tickshell::tree::{Block, Entry, Navigator};
//!
//! fn beep(_ctx: &mut Context, _io: &mut TickIo<'_>, _platform: &mut ()) -> Step {
//!     Step::Complete
//! }
//!
//! static SUB_ENTRIES: [Entry<()>; 2] = [
//!     Entry::title("Submenu 1", 2),
//!     Entry::command("beep - one-shot example", beep),
//! ];
//! static SUB: Block<()> = Block::new(&SUB_ENTRIES);
//!
//! static ROOT_ENTRIES: [Entry<()>; 3] = [
//!     Entry::title("device", 3),
//!     Entry::submenu("sm1 - submenu example", &SUB),
//!     Entry::command("beep - one-shot example", beep),
//! ];
//! static ROOT: Block<()> = Block::new(&ROOT_ENTRIES);
//!
//! ROOT.validate().unwrap();
//! assert_eq!(ROOT.entry_count(), 3);
//!
//! let mut nav = Navigator::new(&ROOT);
//! nav.descend(1).unwrap();
//! assert_eq!(nav.current().title(), "Submenu 1");
//! assert!(nav.ascend());
//! assert!(!nav.ascend()); // already at the root
//! ```

use core::fmt;

use crate::engine::CommandFn;

pub mod error;

pub use error::Error;

/// Maximum menu nesting depth the navigation stack can hold.
pub const MAX_MENU_DEPTH: usize = 8;

/// The payload of a tree entry.
///
/// Exactly one of the three kinds applies to a given entry; a title can
/// never be invoked and a leaf can never be descended into.
pub enum EntryKind<P: 'static> {
    /// Marks the start of a block and declares the number of entries that
    /// belong to it, including the title itself.
    Title {
        /// Declared entry count for the enclosing block.
        count: usize,
    },
    /// A leaf bound to a command advance function.
    Command(CommandFn<P>),
    /// A submenu descending into a child block.
    Submenu(&'static Block<P>),
}

impl<P> fmt::Debug for EntryKind<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Title { count } => f.debug_struct("Title").field("count", count).finish(),
            EntryKind::Command(_) => f.write_str("Command"),
            EntryKind::Submenu(_) => f.write_str("Submenu"),
        }
    }
}

/// One element of a command block: a display label plus its payload.
pub struct Entry<P: 'static> {
    label: &'static str,
    kind: EntryKind<P>,
}

impl<P> Entry<P> {
    /// A title entry declaring the enclosing block's entry count.
    pub const fn title(label: &'static str, count: usize) -> Self {
        Self {
            label,
            kind: EntryKind::Title { count },
        }
    }

    /// A leaf entry bound to a command advance function.
    pub const fn command(label: &'static str, command: CommandFn<P>) -> Self {
        Self {
            label,
            kind: EntryKind::Command(command),
        }
    }

    /// A submenu entry referencing a child block.
    pub const fn submenu(label: &'static str, block: &'static Block<P>) -> Self {
        Self {
            label,
            kind: EntryKind::Submenu(block),
        }
    }

    /// The full display label.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// The invocation name: the first whitespace token of the label.
    pub fn name(&self) -> &'static str {
        self.label.split_ascii_whitespace().next().unwrap_or("")
    }

    /// Whether this entry is a block title.
    pub fn is_title(&self) -> bool {
        matches!(self.kind, EntryKind::Title { .. })
    }

    /// The child block, if this entry is a submenu.
    pub fn descend(&self) -> Option<&'static Block<P>> {
        match self.kind {
            EntryKind::Submenu(block) => Some(block),
            _ => None,
        }
    }

    /// The bound command, if this entry is a leaf.
    pub fn select(&self) -> Option<CommandFn<P>> {
        match self.kind {
            EntryKind::Command(command) => Some(command),
            _ => None,
        }
    }
}

impl<P> fmt::Debug for Entry<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("label", &self.label)
            .field("kind", &self.kind)
            .finish()
    }
}

/// An ordered sequence of entries representing one menu level.
///
/// The first entry must be a [title](Entry::title) whose declared count
/// equals the number of entries physically present;
/// [`validate`](Block::validate) checks this for the whole subtree and must
/// be run by the application's tests or startup code, since a mismatched
/// count corrupts navigation.
pub struct Block<P: 'static> {
    entries: &'static [Entry<P>],
}

impl<P> Block<P> {
    /// Wrap a static entry slice as a block.
    ///
    /// Structural invariants are checked by [`validate`](Block::validate),
    /// not here, so that blocks can be built in `static` initializers.
    pub const fn new(entries: &'static [Entry<P>]) -> Self {
        Self { entries }
    }

    /// The block's title label; the root block's title is the device name.
    pub fn title(&self) -> &'static str {
        match self.entries.first() {
            Some(entry) => entry.label,
            None => "",
        }
    }

    /// The entry count declared by the title, including the title itself.
    ///
    /// O(1): read from the title entry, never derived by scanning. Returns
    /// 0 for a block whose first entry is not a title (caught by
    /// [`validate`](Block::validate)).
    pub fn entry_count(&self) -> usize {
        match self.entries.first() {
            Some(Entry {
                kind: EntryKind::Title { count },
                ..
            }) => *count,
            _ => 0,
        }
    }

    /// Bounds-checked entry access.
    ///
    /// Index 0 is the title. Indices at or beyond the declared entry count
    /// fail with [`Error::IndexOutOfRange`].
    pub fn child(&self, index: usize) -> Result<&Entry<P>, Error> {
        if index >= self.entry_count() {
            return Err(Error::IndexOutOfRange);
        }
        self.entries.get(index).ok_or(Error::IndexOutOfRange)
    }

    /// Iterate over the entries physically present in this block.
    pub fn iter(&self) -> core::slice::Iter<'static, Entry<P>> {
        self.entries.iter()
    }

    /// Recursively check the structural invariants of this subtree.
    ///
    /// Verifies that every block starts with a title, that no title
    /// appears past the start of a block, that every declared count
    /// matches the entries present, and that nesting stays within
    /// [`MAX_MENU_DEPTH`] (which also catches cyclic submenu references).
    pub fn validate(&self) -> Result<(), Error> {
        self.validate_at(0)
    }

    fn validate_at(&self, depth: usize) -> Result<(), Error> {
        if depth >= MAX_MENU_DEPTH {
            return Err(Error::DepthExceeded);
        }
        let declared = match self.entries.first() {
            Some(Entry {
                kind: EntryKind::Title { count },
                ..
            }) => *count,
            _ => return Err(Error::MissingTitle),
        };
        if declared != self.entries.len() {
            return Err(Error::CountMismatch);
        }
        for entry in &self.entries[1..] {
            match entry.kind {
                EntryKind::Title { .. } => return Err(Error::MisplacedTitle),
                EntryKind::Submenu(child) => child.validate_at(depth + 1)?,
                EntryKind::Command(_) => {}
            }
        }
        Ok(())
    }
}

impl<P> fmt::Debug for Block<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block")
            .field("title", &self.title())
            .field("declared", &self.entry_count())
            .field("present", &self.entries.len())
            .finish()
    }
}

/// Explicit navigation stack over a command tree.
///
/// The tree stores no parent references; the navigator remembers the path
/// taken instead. [`descend`](Navigator::descend) pushes the child block,
/// [`ascend`](Navigator::ascend) pops back towards the root.
pub struct Navigator<P: 'static> {
    root: &'static Block<P>,
    stack: heapless::Vec<&'static Block<P>, MAX_MENU_DEPTH>,
}

impl<P> Navigator<P> {
    /// Start navigating at the given root block.
    pub fn new(root: &'static Block<P>) -> Self {
        Self {
            root,
            stack: heapless::Vec::new(),
        }
    }

    /// The root block this navigator was seeded with.
    pub fn root(&self) -> &'static Block<P> {
        self.root
    }

    /// The block the user is currently looking at.
    pub fn current(&self) -> &'static Block<P> {
        self.stack.last().copied().unwrap_or(self.root)
    }

    /// How many levels below the root the current block sits.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Enter the submenu at `index` in the current block.
    ///
    /// Fails with [`Error::IndexOutOfRange`] for a bad index,
    /// [`Error::NotSubmenu`] when the entry is a title or a leaf, and
    /// [`Error::DepthExceeded`] when the stack is full.
    pub fn descend(&mut self, index: usize) -> Result<&'static Block<P>, Error> {
        let entry = self.current().child(index)?;
        let child = entry.descend().ok_or(Error::NotSubmenu)?;
        self.stack.push(child).map_err(|_| Error::DepthExceeded)?;
        Ok(child)
    }

    /// Return to the parent block.
    ///
    /// Returns `false` when already at the root, which is a no-op.
    pub fn ascend(&mut self) -> bool {
        self.stack.pop().is_some()
    }

    /// Jump back to the root block.
    pub fn reset(&mut self) {
        self.stack.clear();
    }
}

impl<P> fmt::Debug for Navigator<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigator")
            .field("depth", &self.depth())
            .field("current", &self.current().title())
            .finish()
    }
}
