//! HTML markup for the result grid and the detail modal.
//!
//! # Design
//! Renderers are pure functions from parsed records to [`Markup`]. They never
//! see raw response bodies, and every provider value they interpolate goes
//! through `escape_html` first. The host inserts the markup verbatim.

mod detail;
mod results;

use std::fmt;

use crate::escape::escape_html;
use crate::types::Poster;

pub use detail::render_detail;
pub use results::render_results;

/// Image shown when the provider has no poster or the poster fails to load.
pub const DEFAULT_FALLBACK_POSTER: &str = "/public/images/cinema.webp";

/// A fragment of generated HTML.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup(String);

impl Markup {
    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Knobs shared by both renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub fallback_poster: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            fallback_poster: DEFAULT_FALLBACK_POSTER.to_string(),
        }
    }
}

/// `<img>` for a poster, or the placeholder block when there is none.
///
/// The `onerror` handler swaps a broken image for the fallback once.
fn poster_markup(poster: Poster<'_>, alt_title: &str, class: &str, options: &RenderOptions) -> String {
    let fallback = escape_html(&options.fallback_poster);
    let src = match poster {
        Poster::Url(url) => escape_html(url),
        Poster::NotApplicable => fallback.clone(),
        Poster::Missing => {
            return r#"<div class="poster-placeholder">🎬<br>No Image</div>"#.to_string();
        }
    };
    format!(
        r#"<img src="{src}" alt="{alt} poster" class="{class}" loading="lazy" onerror="this.onerror=null; this.src='{fallback}';">"#,
        alt = escape_html(alt_title),
    )
}
