//! OpenAPI document (`/openapi.json`) と Swagger UI (`/swagger`)。どちらも認証なし。

use axum::Router;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

/// Adds the `bearer_auth` (JWT) security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "HMAC-signed JWT. Send `Authorization: Bearer <token>`.",
                        ))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Article API",
        version = "1.0.0",
        description = "Sample API serving articles behind JWT bearer authentication."
    ),
    servers((url = "http://localhost:8080", description = "Local development server")),
    paths(crate::api::v1::handlers::articles::get_article),
    components(schemas(
        crate::api::v1::dto::articles::ArticleResponse,
        crate::error::ErrorResponse,
    )),
    modifiers(&SecurityAddon),
    tags((name = "articles", description = "Article lookup"))
)]
pub struct ApiDoc;

pub const SWAGGER_UI_PATH: &str = "/swagger";
pub const OPENAPI_JSON_PATH: &str = "/openapi.json";

/// Swagger UI を `/swagger` 配下に、UI が読む JSON を `/openapi.json` に載せる。
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_article_path() {
        let spec = ApiDoc::openapi();
        assert_eq!(spec.info.title, "Article API");
        assert!(spec.paths.paths.contains_key("/api/v1/articles/{id}"));
    }

    #[test]
    fn has_schemas_and_bearer_scheme() {
        let spec = ApiDoc::openapi();
        let components = spec.components.as_ref().unwrap();

        for name in ["ArticleResponse", "ErrorResponse"] {
            assert!(components.schemas.contains_key(name), "schema {name}");
        }
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }

    #[test]
    fn article_path_requires_bearer_auth() {
        let json = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let security = &json["paths"]["/api/v1/articles/{id}"]["get"]["security"];
        assert_eq!(security, &serde_json::json!([{ "bearer_auth": [] }]));
    }
}
