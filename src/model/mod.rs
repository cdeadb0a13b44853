//! Data model types.
//!
//! [`raw`] describes what the conversion backend hands back, with every
//! field optional. The remaining types form the fixed output schema that
//! the flattener always fills completely.

mod figure;
mod layout;
pub mod raw;
mod result;
mod table;

pub use figure::{FigureKind, FigureRecord};
pub use layout::{BoundingBox, ElementMetadata, ElementType, LayoutElement};
pub use raw::{RawBBox, RawDocument, RawElement, RawFigure, RawImage, RawTable};
pub use result::{DocumentMetadata, Extraction, ProcessingResult};
pub use table::{TableRecord, TABLE_CONFIDENCE};
