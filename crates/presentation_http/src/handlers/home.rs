//! Landing page listing the available routes

use axum::response::Html;

/// Route listing served at `/`
pub const ROUTE_LISTING: &str = "Hawaii Climate API.<br/>\
Available Routes:<br/>\
/api/v1.0/precipitation<br/>\
/api/v1.0/stations<br/>\
/api/v1.0/tobs<br/>\
/api/v1.0/&lt;start&gt;<br/>\
/api/v1.0/&lt;start&gt;/&lt;end&gt;<br/>";

/// List all the available routes
#[utoipa::path(
    get,
    path = "/",
    tag = "climate",
    responses(
        (status = 200, description = "HTML route listing", body = String, content_type = "text/html")
    )
)]
pub async fn home() -> Html<&'static str> {
    Html(ROUTE_LISTING)
}
