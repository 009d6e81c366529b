//! Page shells of the admin area.
//!
//! The pages only bootstrap the admin panel, all the data is loaded via the
//! [REST API](crate::api).

use axum::{
    extract::Path,
    response::{Html, IntoResponse as _, Response},
    routing::get,
    Router,
};

use crate::{error::CommonError, guard::Guard, Error};

/// Sections of the admin area.
const SECTIONS: &[(&str, &str)] = &[
    ("profile", "Profile"),
    ("projects", "Projects"),
    ("skills", "Skills"),
    ("tech-stack", "Tech stack"),
];

/// Builds the [`Router`] serving the admin area pages.
pub fn router(guard: &Guard) -> Router {
    Router::new()
        .route(guard.landing(), get(|| async { shell("Dashboard") }))
        .route(guard.login(), get(|| async { shell("Sign in") }))
        .route(
            &format!("{}/:section", guard.landing().trim_end_matches('/')),
            get(section),
        )
}

/// Serves the page of the requested admin area section.
#[expect(
    clippy::unused_async,
    reason = "`async` is required to match signature"
)]
async fn section(Path(section): Path<String>) -> Response {
    SECTIONS
        .iter()
        .find(|(path, _)| *path == section)
        .map_or_else(
            || Error::from(CommonError::NotFound).into_response(),
            |(_, title)| shell(title).into_response(),
        )
}

/// Renders a page shell with the provided `title`.
fn shell(title: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\
         <html lang=\"en\">\
         <head>\
         <meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{title} | Admin</title>\
         </head>\
         <body><div id=\"admin\" data-page=\"{title}\"></div></body>\
         </html>",
    ))
}

#[cfg(test)]
mod spec {
    use super::shell;

    #[test]
    fn renders_title() {
        let html = shell("Projects").0;

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Projects | Admin</title>"));
    }
}
