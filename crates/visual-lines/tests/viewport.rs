use pretty_assertions::assert_eq;
use visual_lines::{EditorView, InlayKind, ViewConfig, ViewMetrics, VisualLine, WrapMode};

fn config(viewport_width: usize) -> ViewConfig {
    ViewConfig {
        line_height: 10,
        viewport_width,
        wrap_mode: WrapMode::Char,
        ..ViewConfig::default()
    }
}

fn sample_text() -> String {
    [
        "fn main() {",
        "    let greeting = \"hello, wide world\";",
        "    println!(\"{greeting}\");",
        "",
        "    for i in 0..10 {",
        "        println!(\"{i}\");",
        "    }",
        "}",
    ]
    .join("\n")
}

#[test]
fn test_cursor_started_mid_document_matches_full_walk() {
    let mut view = EditorView::new(&sample_text(), config(12)).unwrap();
    view.fold_lines(4, 6, true).unwrap();
    view.add_inlay(15, 6, InlayKind::Block).unwrap();
    view.add_inlay(30, 22, InlayKind::Inline).unwrap();

    let all: Vec<VisualLine> = view.visual_lines(0).collect();
    assert_eq!(all.len(), view.visible_line_count());

    for start in 0..all.len() {
        let tail: Vec<VisualLine> = view.visual_lines(start).collect();
        assert_eq!(tail, all[start..].to_vec(), "walk started at row {start}");
    }
}

#[test]
fn test_viewport_returns_intersecting_rows() {
    let view = EditorView::new(&sample_text(), config(0)).unwrap();

    let rows = view.viewport(25, 20);
    let indices: Vec<usize> = rows.iter().map(|l| l.index).collect();
    assert_eq!(indices, vec![2, 3, 4]);
    assert_eq!(rows[0].y, 20);

    let last: Vec<usize> = view.viewport(75, 10).iter().map(|l| l.index).collect();
    assert_eq!(last, vec![7]);
    assert!(view.viewport(80, 10).is_empty());
    assert!(view.viewport(10_000, 10).is_empty());
    assert!(view.viewport(0, 0).is_empty());
}

#[test]
fn test_viewport_accounts_for_block_inlays() {
    let mut view = EditorView::new("a\nb\nc\nd", config(0)).unwrap();
    view.add_inlay(0, 100, InlayKind::Block).unwrap();

    // Row 1 starts below the 100px block attached to row 0.
    assert_eq!(view.y_of_visual_line(1), 110);
    let rows: Vec<usize> = view.viewport(50, 20).iter().map(|l| l.index).collect();
    assert_eq!(rows, vec![0]);
    let rows: Vec<usize> = view.viewport(105, 10).iter().map(|l| l.index).collect();
    assert_eq!(rows, vec![0, 1]);
}

#[test]
fn test_total_height_includes_trailing_block_inlay() {
    let mut view = EditorView::new("a\nb", config(0)).unwrap();
    assert_eq!(view.total_height(), 20);
    view.add_inlay(3, 7, InlayKind::Block).unwrap();
    assert_eq!(view.total_height(), 27);
    view.add_inlay(2, 30, InlayKind::Inline).unwrap();
    assert_eq!(view.total_height(), 47);
}

#[test]
fn test_total_height_counts_inline_inlay_at_end_of_last_row() {
    let mut view = EditorView::new("ab\ncd", config(0)).unwrap();
    view.add_inlay(5, 30, InlayKind::Inline).unwrap();
    assert_eq!(view.total_height(), 40);

    // Same geometry as the y of a row that would follow it.
    let mut longer = EditorView::new("ab\ncd\n", config(0)).unwrap();
    longer.add_inlay(5, 30, InlayKind::Inline).unwrap();
    assert_eq!(longer.y_of_visual_line(2), view.total_height());
}

#[test]
fn test_empty_document_viewport() {
    let view = EditorView::new("", config(0)).unwrap();
    assert_eq!(view.total_height(), 10);
    assert_eq!(view.viewport(0, 5).len(), 1);
    assert!(view.viewport(10, 5).is_empty());
}

#[test]
fn test_narrowing_viewport_adds_rows() {
    let mut view = EditorView::new(&sample_text(), config(0)).unwrap();
    assert_eq!(view.visible_line_count(), 8);

    view.set_viewport_width(12);
    let wrapped = view.visible_line_count();
    assert!(wrapped > 8);
    assert_eq!(view.visual_lines(0).count(), wrapped);

    let line1_rows: Vec<VisualLine> = view
        .visual_lines(0)
        .filter(|l| l.logical_line == 1)
        .collect();
    assert!(line1_rows.len() > 1);
    assert!(line1_rows.windows(2).all(|w| w[0].end_offset == w[1].start_offset));
}

#[test]
fn test_visual_line_of_offset_inside_fold() {
    let mut view = EditorView::new(&sample_text(), config(0)).unwrap();
    view.fold_lines(4, 6, true).unwrap();

    let folded_start = view.document().line_start(5);
    assert_eq!(view.visual_line_of_offset(folded_start), Some(4));
    let after = view.document().line_start(7);
    assert_eq!(view.visual_line_of_offset(after), Some(5));
}

#[test]
fn test_remove_inlay_restores_layout() {
    let mut view = EditorView::new("a\nb\nc", config(0)).unwrap();
    let before: Vec<u32> = view.visual_lines(0).map(|l| l.y).collect();

    let id = view.add_inlay(1, 40, InlayKind::Block).unwrap();
    assert_ne!(view.visual_lines(0).map(|l| l.y).collect::<Vec<_>>(), before);

    assert!(view.remove_inlay(id));
    assert!(!view.remove_inlay(id));
    assert_eq!(view.visual_lines(0).map(|l| l.y).collect::<Vec<_>>(), before);

    view.add_inlay(1, 40, InlayKind::Block).unwrap();
    view.clear_inlays();
    assert_eq!(view.visual_lines(0).map(|l| l.y).collect::<Vec<_>>(), before);
}

#[test]
fn test_view_from_json_config() {
    let config = ViewConfig::from_json(
        r#"{ "line_height": 20, "viewport_width": 6, "wrap_mode": "word" }"#,
    )
    .unwrap();
    let view = EditorView::new("hello world\nok", config).unwrap();

    let rows: Vec<(usize, usize, u32)> = view
        .visual_lines(0)
        .map(|l| (l.start_offset, l.end_offset, l.y))
        .collect();
    assert_eq!(rows, vec![(0, 6, 0), (6, 11, 20), (12, 14, 40)]);
    assert_eq!(view.total_height(), 60);

    assert!(ViewConfig::from_json(r#"{ "line_height": 0 }"#).is_err());
}
