use criterion::{black_box, criterion_group, criterion_main, Criterion};
use checkmate::perft::perft;
use checkmate::GameState;

fn bench_perft(c: &mut Criterion) {
    let start = GameState::new();
    c.bench_function("perft3_startpos", |ben| {
        ben.iter(|| {
            let mut g = start.clone();
            black_box(perft(&mut g, black_box(3)))
        })
    });
}

criterion_group!(benches, bench_perft);
criterion_main!(benches);
