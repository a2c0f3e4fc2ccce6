//! Benchmarks for projecting and drawing the editor.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use reverie::app::Model;
use reverie::config::InputMode;
use reverie::editor::EditorState;
use reverie::journal::JournalBoard;

fn long_entry() -> String {
    let mut html = String::new();
    for i in 0..200 {
        html.push_str(&format!(
            "<p>Paragraph {i} with <strong>bold</strong> and <mark>highlighted</mark> words.</p>"
        ));
    }
    html
}

fn bench_project(c: &mut Criterion) {
    let state = EditorState::from_html(&long_entry());
    c.bench_function("project_200_paragraphs", |b| {
        b.iter(|| reverie::ui::project(black_box(&state), black_box(60)))
    });
}

fn bench_draw(c: &mut Criterion) {
    let model = Model::new(JournalBoard::with_samples(), InputMode::Auto, (100, 30));
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    c.bench_function("draw_frame", |b| {
        b.iter(|| terminal.draw(|frame| reverie::ui::render(&model, frame)).unwrap())
    });
}

criterion_group!(benches, bench_project, bench_draw);
criterion_main!(benches);
