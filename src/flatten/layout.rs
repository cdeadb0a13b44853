//! Layout flattening.

use crate::error::Result;
use crate::model::{BoundingBox, ElementType, LayoutElement, RawElement};

/// Flatten every layout element, preserving order.
pub fn flatten_layout(elements: &[RawElement]) -> Result<Vec<LayoutElement>> {
    elements.iter().map(flatten_element).collect()
}

/// Flatten one layout element.
///
/// Elements without a reported type are paragraphs. A heading level is only
/// kept on header elements.
pub fn flatten_element(element: &RawElement) -> Result<LayoutElement> {
    let kind = element
        .kind_text()
        .map(|label| ElementType::classify(&label))
        .unwrap_or_default();

    let content = element.content_text();
    let mut flat = if kind.is_header() {
        LayoutElement::header(content, element.level()?)
    } else {
        LayoutElement::new(kind, content)
    };

    if let Some(ref bbox) = element.bbox {
        flat = flat.with_bbox(BoundingBox::from(bbox));
    }
    if let Some(page) = element.page()? {
        flat = flat.with_page(page);
    }

    Ok(flat)
}
