//! Print the visual lines of a file (or a built-in sample).
//!
//! ```text
//! RUST_LOG=visual_lines=debug cargo run -p visual-lines --example dump_layout -- path/to/file 40
//! ```

use tracing_subscriber::EnvFilter;
use visual_lines::{EditorView, InlayKind, ViewConfig, WrapMode};

const SAMPLE: &str = "fn main() {\n    let message = \"a fairly long line that will wrap in a narrow viewport\";\n    if message.is_empty() {\n        return;\n    }\n    println!(\"{message}\");\n}";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let text = match args.next() {
        Some(path) => std::fs::read_to_string(path)?,
        None => SAMPLE.to_string(),
    };
    let width = match args.next() {
        Some(width) => width.parse()?,
        None => 32,
    };

    let config = ViewConfig {
        line_height: 16,
        viewport_width: width,
        wrap_mode: WrapMode::Word,
        ..ViewConfig::default()
    };
    let mut view = EditorView::new(&text, config)?;
    if text == SAMPLE {
        view.fold_lines(2, 4, true)?;
        let first_line_end = view.document().line_end(0);
        view.add_inlay(first_line_end, 24, InlayKind::Block)?;
    }

    let document = view.document();
    let chars: Vec<char> = document.text().chars().collect();
    let mut lines = view.visual_lines(0);
    while !lines.at_end() {
        let line = lines.current();
        let fold = view
            .folding()
            .top_level_collapsed()
            .get(line.fold_region_index)
            .filter(|region| region.start == line.start_offset);
        let shown = match fold {
            Some(region) => {
                let head_end = document.line_end(line.logical_line).min(line.end_offset);
                let head: String = chars[line.start_offset..head_end].iter().collect();
                format!("{head} {}", region.placeholder)
            }
            None => chars[line.start_offset..line.end_offset]
                .iter()
                .map(|&c| if c == '\n' { '⏎' } else { c })
                .collect(),
        };
        println!(
            "{:>4} y={:<5} h={:<3} L{:<4} {:>5}..{:<5} {}",
            line.index,
            line.y,
            line.height,
            line.logical_line,
            line.start_offset,
            line.end_offset,
            shown
        );
        lines.advance();
    }
    println!("total height: {}px", view.total_height());
    Ok(())
}
