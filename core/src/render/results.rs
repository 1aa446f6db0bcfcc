//! Result grid markup.

use std::fmt::Write;

use super::{poster_markup, Markup, RenderOptions};
use crate::escape::escape_html;
use crate::types::ResultSummary;

/// Render the result grid. Each card carries its IMDb id in `data-imdb-id`
/// for the click and keyboard handlers; an empty list clears the grid.
pub fn render_results(results: &[ResultSummary], options: &RenderOptions) -> Markup {
    let mut html = String::new();
    for movie in results {
        let title = escape_html(&movie.title);
        let poster = poster_markup(movie.poster(), &movie.title, "movie-poster", options);
        let _ = write!(
            html,
            r#"<div class="movie-card" data-imdb-id="{id}" tabindex="0" role="button" aria-label="View details for {title}">
    <div class="movie-poster-container">
        {poster}
    </div>
    <div class="movie-info">
        <h3 class="movie-title">{title}</h3>
        <p class="movie-year">{year}</p>
        <span class="movie-type">{kind}</span>
    </div>
</div>
"#,
            id = escape_html(&movie.imdb_id),
            year = escape_html(&movie.year),
            kind = escape_html(&movie.kind),
        );
    }
    Markup(html)
}
