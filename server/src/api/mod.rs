pub mod meal_plan;
pub mod public;
pub mod recipes;
pub mod smart_recipe;
pub mod testing;
pub mod users;
pub mod whole_number;

use serde::Serialize;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{OpenApi, ToSchema};

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Returned when the request payload fails validation.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct InvalidInputResponse {
    pub error: String,
    pub details: String,
}

/// Returned when the provider answered with something that could not be used.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnusableContentResponse {
    pub error: String,
    pub reason: String,
    /// The provider's reply, verbatim.
    pub raw_text: String,
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    // Base spec with shared components and security
    #[derive(OpenApi)]
    #[openapi(components(schemas(ErrorResponse, InvalidInputResponse, UnusableContentResponse)))]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    if let Some(components) = spec.components.as_mut() {
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }

    let modules: Vec<utoipa::openapi::OpenApi> = vec![
        public::ApiDoc::openapi(),
        testing::ApiDoc::openapi(),
        smart_recipe::ApiDoc::openapi(),
        meal_plan::ApiDoc::openapi(),
        recipes::ApiDoc::openapi(),
        users::ApiDoc::openapi(),
    ];

    for module_spec in modules {
        spec.paths.paths.extend(module_spec.paths.paths);

        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let spec = openapi();
        for path in [
            "/ping",
            "/api/auth/signup",
            "/api/auth/login",
            "/api/smart-recipe",
            "/api/meal-plan",
            "/api/meal-plan/save",
            "/api/meal-plan/{plan_id}",
            "/api/recipes/save",
            "/api/recipes/saved",
            "/api/recipes/remove/{recipe_id}",
            "/api/users/me",
            "/api/users/me/preferences",
        ] {
            assert!(spec.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_openapi_has_bearer_scheme() {
        let spec = openapi();
        let components = spec.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
        assert!(components.schemas.contains_key("UnusableContentResponse"));
    }
}
