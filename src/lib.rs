//! Renders blockchain anchoring records (`anchors.json`) as HTML transaction cards.
//!
//! One pass reads the anchors resource once, parses it whole, and injects either the cards, a
//! "no data" placeholder, or a "load failed" placeholder into an HTML page.
#![forbid(unsafe_code)]

pub mod config;
pub mod dashboard;
pub mod datefmt;
pub mod error;
pub mod model;
pub mod page;
pub mod pipeline;
pub mod render;
pub mod source;
pub mod verify;

pub use config::BoardConfig;
pub use datefmt::{DateFormatter, Locale};
pub use error::{BoardError, BoardResult};
pub use model::{Anchor, AnchorDocument};
pub use page::{Element, Page};
pub use pipeline::{
    PageTemplate, RenderOutcome, RenderedPage, inject, load_document, render_cards_fragment,
    render_page,
};
pub use render::{RenderSettings, render_card, render_cards};
pub use source::AnchorSource;
pub use verify::{Verification, sha256_hex, verify_bytes};
