pub mod classify;
pub mod html;
pub mod markers;
pub mod noise;
pub mod river;

use crate::fetch::RiverLink;
use crate::model::{MileMarker, River};
use html::PageDocument;
use river::PageMeta;

pub struct PageData {
    pub river: River,
    pub markers: Vec<MileMarker>,
}

/// Two independent passes over one page: river metadata from the parsed
/// text, mile markers from the raw markup.
pub fn process_page(link: &RiverLink, html: &str) -> PageData {
    let doc = PageDocument::parse(html);
    let meta = PageMeta {
        id: &link.id,
        name: &link.name,
        url: &link.url,
        og_description: doc.og_description.as_deref(),
    };

    PageData {
        river: river::extract(&doc.text, &meta),
        markers: markers::extract(html, &link.id),
    }
}

// ── Tests ──
