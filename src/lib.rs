//! Library for rendering a constrained Markdown dialect to HTML.
//!
//! Every marker in the dialect has exactly one role. A single [`render()`]
//! call runs the whole pipeline: backslash escapes are protected first,
//! structurally complex spans (code, images, internal links, admonitions,
//! tables) are lifted into a side-table, the remaining text is scanned line
//! by line into block elements, and the spans are spliced back in before the
//! fragment is wrapped with its companion stylesheet.

#[macro_use]
mod macros;

pub mod admonitions;
pub mod escape;
pub mod fences;
pub mod figures;
pub mod inline;
pub mod lists;
pub mod placeholder;
pub mod quotes;
pub mod render;
pub mod scan;
pub mod style;
pub mod table;

mod error;

pub use error::RenderError;
pub use inline::format_inline;
pub use lists::{CheckboxIds, render_list};
pub use quotes::render_blockquote;
pub use render::{Rendered, RenderOptions, render};
pub use style::STYLESHEET;
pub use table::TableModel;
