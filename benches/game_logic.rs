use criterion::{black_box, criterion_group, criterion_main, Criterion};
use block_stacking::core::{Frame, GameState, Grid};
use block_stacking::types::{GameCommand, ShapeId, GRID_WIDTH};

fn running(seed: u32) -> GameState {
    let mut state = GameState::new(seed);
    state.apply_command(GameCommand::TogglePause);
    state
}

fn bench_tick(c: &mut Criterion) {
    let mut state = running(12345);

    c.bench_function("gravity_tick", |b| {
        b.iter(|| {
            black_box(state.tick());
        })
    });
}

fn bench_place(c: &mut Criterion) {
    let mut state = running(12345);

    c.bench_function("hard_drop_place", |b| {
        b.iter(|| {
            state.apply_command(black_box(GameCommand::Place));
            if state.paused() {
                state.apply_command(GameCommand::TogglePause);
            }
        })
    });
}

fn bench_row_clear(c: &mut Criterion) {
    let mut grid = Grid::new();
    for row in 16..20 {
        for col in 0..GRID_WIDTH as i32 {
            if col != 4 {
                grid.set(row, col, ShapeId::L);
            }
        }
    }
    let prepared = running(12345).with_grid(grid);

    c.bench_function("clear_4_rows", |b| {
        b.iter(|| {
            let mut state = prepared.clone();
            state.spawn(ShapeId::I);
            state.apply_command(GameCommand::Place);
            black_box(state.score())
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut state = running(12345);
    state.spawn(ShapeId::L);

    c.bench_function("rotate", |b| {
        b.iter(|| {
            state.apply_command(black_box(GameCommand::Rotate));
        })
    });
}

fn bench_frame(c: &mut Criterion) {
    let state = running(12345);
    let mut frame = Frame::default();

    c.bench_function("frame_into_and_paint", |b| {
        b.iter(|| {
            state.frame_into(&mut frame);
            black_box(frame.paint())
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_place,
    bench_row_clear,
    bench_rotate,
    bench_frame
);
criterion_main!(benches);
