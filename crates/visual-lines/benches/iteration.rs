use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use visual_lines::{EditorView, InlayKind, ViewConfig};

fn large_text(line_count: usize) -> String {
    let mut out = String::with_capacity(line_count * 64);
    for i in 0..line_count {
        out.push_str(&format!(
            "{i:06} the quick brown fox jumps over the lazy dog (visual-lines benchmark line)\n"
        ));
    }
    // Remove the final '\n' to avoid creating an extra trailing empty line.
    out.pop();
    out
}

fn decorated_view(line_count: usize) -> EditorView {
    let mut view = EditorView::new(&large_text(line_count), ViewConfig::default()).unwrap();
    for first in (0..line_count.saturating_sub(10)).step_by(200) {
        view.fold_lines(first + 2, first + 8, true).unwrap();
    }
    for line in (0..line_count).step_by(100) {
        let offset = view.document().line_start(line);
        view.add_inlay(offset, 20, InlayKind::Block).unwrap();
    }
    view
}

fn bench_full_walk(c: &mut Criterion) {
    let view = decorated_view(20_000);
    c.bench_function("full_walk/20k_lines", |b| {
        b.iter(|| black_box(view.visual_lines(0).count()))
    });
}

fn bench_viewport_mid_document(c: &mut Criterion) {
    let view = decorated_view(20_000);
    let y_top = view.total_height() / 2;
    c.bench_function("viewport/mid_document_1000px", |b| {
        b.iter(|| black_box(view.viewport(black_box(y_top), 1000)))
    });
}

fn bench_relayout_on_resize(c: &mut Criterion) {
    c.bench_function("relayout/resize_5k_lines", |b| {
        b.iter_batched(
            || decorated_view(5_000),
            |mut view| {
                view.set_viewport_width(40);
                black_box(view.total_height());
            },
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(
    benches,
    bench_full_walk,
    bench_viewport_mid_document,
    bench_relayout_on_resize
);
criterion_main!(benches);
