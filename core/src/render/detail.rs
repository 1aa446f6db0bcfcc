//! Detail modal markup.

use std::fmt::Write;

use super::{poster_markup, Markup, RenderOptions};
use crate::escape::{escape_html, escape_opt};
use crate::types::{present, DetailRecord};

/// Render the modal body: poster on the left, metadata on the right.
///
/// Spec rows whose value is absent or `"N/A"` are left out entirely.
pub fn render_detail(detail: &DetailRecord, options: &RenderOptions) -> Markup {
    let title = detail.title.as_deref().unwrap_or_default();
    let poster = poster_markup(detail.poster(), title, "detail-poster", options);

    let mut rows = String::new();
    for (label, value) in detail.spec_rows() {
        if let Some(value) = present(value) {
            let _ = write!(
                rows,
                r#"
            <div class="spec-row">
                <div class="spec-label">{label}:</div>
                <div class="spec-value">{value}</div>
            </div>"#,
                value = escape_html(value),
            );
        }
    }

    Markup(format!(
        r#"<div class="detail-grid">
    <div class="detail-poster-container">
        {poster}
    </div>
    <div class="detail-info">
        <h2>{title}</h2>
        <div class="detail-meta">
            <span class="meta-item">{year}</span>
            <span class="meta-item">{rated}</span>
            <span class="meta-item">{runtime}</span>
            <span class="meta-item">⭐ {rating}/10</span>
        </div>
        <p class="detail-plot">{plot}</p>
        <div class="detail-specs">{rows}
        </div>
    </div>
</div>
"#,
        title = escape_html(title),
        year = escape_opt(detail.year.as_deref()),
        rated = escape_opt(detail.rated.as_deref()),
        runtime = escape_opt(detail.runtime.as_deref()),
        rating = escape_opt(detail.rating.as_deref()),
        plot = escape_opt(detail.plot.as_deref()),
    ))
}
