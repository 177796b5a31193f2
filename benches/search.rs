use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use grid_duel::core::{Board, ManualClock, Marker, SearchConfig};
use grid_duel::games::{RaceGame, RowGame};
use grid_duel::search::{AlphaBetaSearch, MinimaxSearch};

fn bench_row_game(c: &mut Criterion) {
    let board = Board::new(3);

    let mut minimax = MinimaxSearch::new(RowGame, SearchConfig::for_minimax().with_seed(1));
    c.bench_function("row/minimax_full_depth", |b| {
        b.iter(|| black_box(minimax.search(black_box(&board), Marker::AI, Marker::PLAYER)))
    });

    let mut alphabeta = AlphaBetaSearch::new(RowGame, SearchConfig::for_minimax().with_seed(1))
        .with_clock(ManualClock::new());
    c.bench_function("row/alphabeta_full_depth", |b| {
        b.iter(|| black_box(alphabeta.search(black_box(&board), Marker::AI, Marker::PLAYER)))
    });
}

fn bench_race_game(c: &mut Criterion) {
    let board = RaceGame::initial_board(6);

    for depth in [3, 5] {
        let config = SearchConfig::default().with_max_depth(depth).with_seed(7);
        let mut search = AlphaBetaSearch::new(RaceGame, config).with_clock(ManualClock::new());
        c.bench_function(&format!("race/alphabeta_depth_{depth}"), |b| {
            b.iter(|| black_box(search.search(black_box(&board), Marker::AI, Marker::PLAYER)))
        });
    }

    let mut sampler = AlphaBetaSearch::new(RaceGame, SearchConfig::default().with_seed(7))
        .with_clock(ManualClock::new());
    c.bench_function("race/search_stats_sample", |b| {
        b.iter(|| black_box(sampler.get_search_stats(black_box(&board), Marker::AI, Marker::PLAYER)))
    });
}

criterion_group!(benches, bench_row_game, bench_race_game);
criterion_main!(benches);
