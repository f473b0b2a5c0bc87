//! Utility helpers shared across integration tests.

use mdweave::{RenderOptions, render};

/// Build a source document from a list of lines.
macro_rules! doc {
    ($($line:expr),* $(,)?) => {
        [$($line),*].join("\n")
    };
}

/// Render `source` without the stylesheet and return the bare fragment.
pub fn render_html(source: &str) -> String {
    render(
        source,
        RenderOptions {
            include_css: false,
        },
    )
    .expect("render should succeed")
    .html
}
