//! OpenAPI documentation for the public API, served by Scalar at `/docs`.

use utoipa::OpenApi;

use crate::api;
use crate::errors::ErrorBody;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "bizdir",
        description = "Business directory API. Businesses, reviews and photos, each identified by a sequential integer id."
    ),
    paths(
        api::handlers::healthz,
        api::handlers::businesses::list_businesses,
        api::handlers::businesses::create_business,
        api::handlers::businesses::get_business,
        api::handlers::businesses::update_business,
        api::handlers::businesses::delete_business,
        api::handlers::reviews::list_reviews,
        api::handlers::reviews::create_review,
        api::handlers::reviews::get_review,
        api::handlers::reviews::update_review,
        api::handlers::reviews::delete_review,
        api::handlers::photos::list_photos,
        api::handlers::photos::create_photo,
        api::handlers::photos::get_photo,
        api::handlers::photos::update_photo,
        api::handlers::photos::delete_photo,
        api::handlers::users::list_user_businesses,
        api::handlers::users::list_user_reviews,
        api::handlers::users::list_user_photos,
    ),
    components(
        schemas(
            ErrorBody,
            api::models::pagination::PageLinks,
            api::models::businesses::BusinessCreate,
            api::models::businesses::BusinessUpdate,
            api::models::businesses::BusinessResponse,
            api::models::businesses::BusinessLinks,
            api::models::businesses::BusinessWriteResponse,
            api::models::businesses::BusinessPage,
            api::models::reviews::ReviewCreate,
            api::models::reviews::ReviewUpdate,
            api::models::reviews::ReviewResponse,
            api::models::reviews::ReviewLinks,
            api::models::reviews::ReviewWriteResponse,
            api::models::reviews::ReviewPage,
            api::models::photos::PhotoCreate,
            api::models::photos::PhotoUpdate,
            api::models::photos::PhotoResponse,
            api::models::photos::PhotoLinks,
            api::models::photos::PhotoWriteResponse,
            api::models::photos::PhotoPage,
            api::models::users::UserBusinesses,
            api::models::users::UserReviews,
            api::models::users::UserPhotos,
        )
    ),
    tags(
        (name = "businesses", description = "Business listings. Names are unique per address."),
        (name = "reviews", description = "Reviews of businesses. A user can review a given business once."),
        (name = "photos", description = "Photos of businesses, with optional captions."),
        (name = "users", description = "Everything a single user owns or has written."),
        (name = "health", description = "Liveness probe."),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/healthz",
            "/businesses",
            "/businesses/{id}",
            "/reviews",
            "/reviews/{id}",
            "/photos",
            "/photos/{id}",
            "/users/{userid}/businesses",
            "/users/{userid}/reviews",
            "/users/{userid}/photos",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{path} missing from OpenAPI document");
        }
    }
}
