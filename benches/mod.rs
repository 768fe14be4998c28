use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tickshell::commands::{self, SimBoard};
use tickshell::engine::{Engine, OUTPUT_CAPACITY, Tick, TickIo};
use tickshell::shell::{Phase, Shell};

/// One full run of `flash 3`: parse, three on/off pairs with their delay
/// self-loops, exit. Measures the cost of a complete cooperative command,
/// dominated by per-tick dispatch.
fn bench_flash_run(c: &mut Criterion) {
    c.bench_function("engine/flash_3_full_run", |b| {
        b.iter(|| {
            let mut engine: Engine<SimBoard> = Engine::new();
            let mut board = SimBoard::default();
            let mut output: heapless::String<OUTPUT_CAPACITY> = heapless::String::new();
            engine.select(commands::flash::<SimBoard>).unwrap();
            loop {
                let mut io = TickIo::new(black_box("flash 3"), &mut output, false);
                if engine.tick(&mut io, &mut board) == Tick::Finished {
                    break;
                }
            }
            black_box(board.on_count)
        })
    });
}

/// A single delay-state tick, the step a scheduling loop pays most often.
fn bench_single_tick(c: &mut Criterion) {
    c.bench_function("engine/flash_delay_tick", |b| {
        let mut engine: Engine<SimBoard> = Engine::new();
        let mut board = SimBoard::default();
        let mut output: heapless::String<OUTPUT_CAPACITY> = heapless::String::new();
        engine.select(commands::flash::<SimBoard>).unwrap();
        // Advance past parse and LED-on into the first delay self-loop.
        for _ in 0..2 {
            let mut io = TickIo::new("flash 1000000", &mut output, false);
            engine.tick(&mut io, &mut board);
        }
        b.iter(|| {
            let mut io = TickIo::new(black_box("flash 1000000"), &mut output, false);
            if engine.tick(&mut io, &mut board) == Tick::Finished {
                engine.select(commands::flash::<SimBoard>).unwrap();
            }
            black_box(engine.context().state())
        })
    });
}

/// Bounds-checked entry lookup through the declared block count.
fn bench_tree_lookup(c: &mut Criterion) {
    let root = commands::demo_tree();
    c.bench_function("tree/child_lookup", |b| {
        b.iter(|| {
            let entry = root.child(black_box(3)).unwrap();
            black_box(entry.name())
        })
    });
}

/// Line resolution against the current block, including navigation.
fn bench_submit_resolve(c: &mut Criterion) {
    c.bench_function("shell/submit_and_toggle", |b| {
        let mut shell = Shell::new(commands::demo_tree(), SimBoard::default());
        b.iter(|| {
            shell.submit(black_box("led")).unwrap();
            while shell.phase() != Phase::AwaitInput {
                shell.tick();
            }
            black_box(shell.platform().toggles)
        })
    });
}

criterion_group!(
    benches,
    bench_flash_run,
    bench_single_tick,
    bench_tree_lookup,
    bench_submit_resolve
);
criterion_main!(benches);
