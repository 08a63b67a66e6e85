//! Transient values produced during a single generation run

mod chapter;
mod document;
mod toc;

pub use chapter::Chapter;
pub use document::Document;
pub use toc::NavLink;
