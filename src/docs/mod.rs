//! API documentation endpoints.
//!
//! - `{prefix}/openapi.json`: OpenAPI 3.1 document
//! - `{prefix}/docs`: Swagger UI page that loads the document

pub mod openapi;

use axum::{
    extract::State,
    response::Html,
    Json,
};
use serde_json::Value;

use crate::http::server::AppState;

pub use openapi::openapi_document;

const SWAGGER_UI_VERSION: &str = "5";

pub async fn get_openapi(State(state): State<AppState>) -> Json<Value> {
    Json(state.openapi.as_ref().clone())
}

pub async fn get_docs(State(state): State<AppState>) -> Html<String> {
    Html(state.docs_page.to_string())
}

/// Render the Swagger UI page pointing at `openapi_url`.
pub fn swagger_page(title: &str, openapi_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<link type="text/css" rel="stylesheet" href="https://cdn.jsdelivr.net/npm/swagger-ui-dist@{version}/swagger-ui.css">
<title>{title} - Swagger UI</title>
</head>
<body>
<div id="swagger-ui"></div>
<script src="https://cdn.jsdelivr.net/npm/swagger-ui-dist@{version}/swagger-ui-bundle.js"></script>
<script>
const ui = SwaggerUIBundle({{
    url: '{openapi_url}',
    dom_id: '#swagger-ui',
    layout: 'BaseLayout',
    deepLinking: true,
    presets: [SwaggerUIBundle.presets.apis, SwaggerUIBundle.SwaggerUIStandalonePreset],
}})
</script>
</body>
</html>
"#,
        version = SWAGGER_UI_VERSION,
        title = title,
        openapi_url = openapi_url,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_points_at_document() {
        let page = swagger_page("FastAPI", "/api/py/openapi.json");
        assert!(page.contains("url: '/api/py/openapi.json'"));
        assert!(page.contains("<title>FastAPI - Swagger UI</title>"));
    }
}
