//! Content Module - the document and its text conventions
//!
//! - **Section** - immutable section record
//! - **Store** - ordered sections with indexed and id lookup
//! - **Parser** - raw body text to render nodes
//! - **Document** - built-in whitepaper and JSON loading

pub mod document;
mod parser;
mod section;
mod store;

pub use parser::*;
pub use section::Section;
pub use store::SectionStore;
