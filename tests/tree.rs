use tickshell::commands::{self, SimBoard};
use tickshell::engine::{Context, Step, TickIo};
use tickshell::tree::{Block, Entry, Error, MAX_MENU_DEPTH, Navigator};

fn noop(_ctx: &mut Context, _io: &mut TickIo<'_>, _platform: &mut SimBoard) -> Step {
    Step::Complete
}

#[test]
fn demo_tree_validates() {
    commands::demo_tree().validate().unwrap();
}

#[test]
fn root_block_layout() {
    // Root: 1 title + 4 invocable entries.
    let root = commands::demo_tree();
    assert_eq!(root.entry_count(), 5);
    assert_eq!(root.title(), "demo");

    let submenu = root.child(1).unwrap();
    let child = submenu.descend().expect("entry 1 should be a submenu");
    assert_eq!(child.entry_count(), 3);
    child.validate().unwrap();
}

#[test]
fn child_is_bounds_checked() {
    let root = commands::demo_tree();
    assert!(root.child(4).is_ok());
    assert_eq!(root.child(5).unwrap_err(), Error::IndexOutOfRange);
    assert_eq!(root.child(usize::MAX).unwrap_err(), Error::IndexOutOfRange);
}

#[test]
fn title_entry_is_not_invocable() {
    let title = commands::demo_tree().child(0).unwrap();
    assert!(title.is_title());
    assert!(title.select().is_none());
    assert!(title.descend().is_none());
}

#[test]
fn entry_kinds_are_exclusive() {
    fn walk(block: &'static Block<SimBoard>) {
        for entry in block.iter() {
            assert!(!(entry.descend().is_some() && entry.select().is_some()));
            if let Some(child) = entry.descend() {
                walk(child);
            }
        }
    }
    walk(commands::demo_tree());
}

#[test]
fn entry_names_are_first_label_token() {
    let root = commands::demo_tree();
    assert_eq!(root.child(1).unwrap().name(), "sm1");
    assert_eq!(root.child(3).unwrap().name(), "flash");
    assert_eq!(root.child(3).unwrap().label(), "flash N - flash the LED 'N' times");
}

#[test]
fn count_mismatch_is_rejected() {
    static ENTRIES: [Entry<SimBoard>; 2] = [
        Entry::title("bad", 3),
        Entry::command("noop - does nothing", noop),
    ];
    static BAD: Block<SimBoard> = Block::new(&ENTRIES);
    assert_eq!(BAD.validate().unwrap_err(), Error::CountMismatch);
}

#[test]
fn missing_title_is_rejected() {
    static ENTRIES: [Entry<SimBoard>; 1] = [Entry::command("noop - does nothing", noop)];
    static HEADLESS: Block<SimBoard> = Block::new(&ENTRIES);
    assert_eq!(HEADLESS.validate().unwrap_err(), Error::MissingTitle);

    static EMPTY: Block<SimBoard> = Block::new(&[]);
    assert_eq!(EMPTY.validate().unwrap_err(), Error::MissingTitle);
    assert_eq!(EMPTY.entry_count(), 0);
    assert_eq!(EMPTY.title(), "");
}

#[test]
fn misplaced_title_is_rejected() {
    static ENTRIES: [Entry<SimBoard>; 3] = [
        Entry::title("bad", 3),
        Entry::command("noop - does nothing", noop),
        Entry::title("stray", 1),
    ];
    static BAD: Block<SimBoard> = Block::new(&ENTRIES);
    assert_eq!(BAD.validate().unwrap_err(), Error::MisplacedTitle);
}

#[test]
fn nested_violations_are_caught() {
    static CHILD_ENTRIES: [Entry<SimBoard>; 2] = [
        Entry::title("child", 5),
        Entry::command("noop - does nothing", noop),
    ];
    static CHILD: Block<SimBoard> = Block::new(&CHILD_ENTRIES);
    static ENTRIES: [Entry<SimBoard>; 2] = [
        Entry::title("parent", 2),
        Entry::submenu("sub - broken child", &CHILD),
    ];
    static PARENT: Block<SimBoard> = Block::new(&ENTRIES);
    assert_eq!(PARENT.validate().unwrap_err(), Error::CountMismatch);
}

// Two blocks referencing each other; legal to construct, caught by the
// depth limit instead of hanging validation or navigation.
static CYCLE_A_ENTRIES: [Entry<SimBoard>; 2] = [
    Entry::title("a", 2),
    Entry::submenu("b - goes down forever", &CYCLE_B),
];
static CYCLE_A: Block<SimBoard> = Block::new(&CYCLE_A_ENTRIES);
static CYCLE_B_ENTRIES: [Entry<SimBoard>; 2] = [
    Entry::title("b", 2),
    Entry::submenu("a - goes down forever", &CYCLE_A),
];
static CYCLE_B: Block<SimBoard> = Block::new(&CYCLE_B_ENTRIES);

#[test]
fn cyclic_tree_exceeds_depth() {
    assert_eq!(CYCLE_A.validate().unwrap_err(), Error::DepthExceeded);

    let mut nav = Navigator::new(&CYCLE_A);
    for _ in 0..MAX_MENU_DEPTH {
        nav.descend(1).unwrap();
    }
    assert_eq!(nav.descend(1).unwrap_err(), Error::DepthExceeded);
}

#[test]
fn navigator_tracks_the_path() {
    let mut nav = Navigator::new(commands::demo_tree());
    assert_eq!(nav.depth(), 0);
    assert_eq!(nav.current().title(), "demo");

    let level_1 = nav.descend(1).unwrap();
    assert_eq!(level_1.title(), "Submenu 1");
    assert_eq!(nav.current().title(), "Submenu 1");

    let level_2 = nav.descend(2).unwrap();
    assert_eq!(level_2.title(), "Submenu 2");
    assert_eq!(nav.depth(), 2);

    assert!(nav.ascend());
    assert_eq!(nav.current().title(), "Submenu 1");
    assert!(nav.ascend());
    assert_eq!(nav.current().title(), "demo");
    assert!(!nav.ascend());
    assert_eq!(nav.current().title(), "demo");
}

#[test]
fn navigator_rejects_bad_descents() {
    let mut nav = Navigator::new(commands::demo_tree());
    assert_eq!(nav.descend(9).unwrap_err(), Error::IndexOutOfRange);
    // Entry 2 is a leaf, entry 0 the title.
    assert_eq!(nav.descend(2).unwrap_err(), Error::NotSubmenu);
    assert_eq!(nav.descend(0).unwrap_err(), Error::NotSubmenu);
    assert_eq!(nav.depth(), 0);
}

#[test]
fn navigator_reset_returns_to_root() {
    let mut nav = Navigator::new(commands::demo_tree());
    nav.descend(1).unwrap();
    nav.descend(2).unwrap();
    nav.reset();
    assert_eq!(nav.depth(), 0);
    assert_eq!(nav.current().title(), "demo");
}
