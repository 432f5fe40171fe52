//! Per-user listings. Users are not stored, so an unknown user simply owns nothing.

use crate::api::extract::PathId;
use crate::api::models::businesses::BusinessResponse;
use crate::api::models::photos::PhotoResponse;
use crate::api::models::reviews::ReviewResponse;
use crate::api::models::users::{UserBusinesses, UserPhotos, UserReviews};
use crate::db::handlers::{Businesses, Photos, Repository, Reviews};
use crate::db::handlers::{businesses::BusinessFilter, photos::PhotoFilter, reviews::ReviewFilter};
use crate::errors::{ErrorBody, Result};
use crate::types::UserId;
use crate::AppState;
use axum::{Json, extract::State};

#[utoipa::path(
    get,
    path = "/users/{userid}/businesses",
    tag = "users",
    summary = "List a user's businesses",
    params(("userid" = i64, Path, description = "Owner user ID")),
    responses(
        (status = 200, description = "Every business owned by the user", body = UserBusinesses),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_user_businesses(State(state): State<AppState>, PathId(user_id): PathId<UserId>) -> Result<Json<UserBusinesses>> {
    let businesses = Businesses::new(state.store.as_ref())
        .list(&BusinessFilter::for_owner(user_id))
        .await?;

    Ok(Json(UserBusinesses {
        businesses: businesses.into_iter().map(BusinessResponse::from).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/users/{userid}/reviews",
    tag = "users",
    summary = "List a user's reviews",
    params(("userid" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "Every review written by the user", body = UserReviews),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_user_reviews(State(state): State<AppState>, PathId(user_id): PathId<UserId>) -> Result<Json<UserReviews>> {
    let reviews = Reviews::new(state.store.as_ref()).list(&ReviewFilter::for_user(user_id)).await?;

    Ok(Json(UserReviews {
        reviews: reviews.into_iter().map(ReviewResponse::from).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/users/{userid}/photos",
    tag = "users",
    summary = "List a user's photos",
    params(("userid" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "Every photo uploaded by the user", body = UserPhotos),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_user_photos(State(state): State<AppState>, PathId(user_id): PathId<UserId>) -> Result<Json<UserPhotos>> {
    let photos = Photos::new(state.store.as_ref()).list(&PhotoFilter::for_user(user_id)).await?;

    Ok(Json(UserPhotos {
        photos: photos.into_iter().map(PhotoResponse::from).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use crate::test_utils::*;
    use serde_json::{Value, json};

    #[tokio::test]
    #[test_log::test]
    async fn test_user_listings() {
        let (app, store) = create_test_app().await;
        for id in 1..=12 {
            seed_business(store.as_ref(), id, 7, &format!("Shop {id}")).await;
        }
        seed_business(store.as_ref(), 13, 8, "Not mine").await;
        seed_review(store.as_ref(), 1, 7, 13).await;
        seed_review(store.as_ref(), 2, 8, 1).await;
        seed_photo(store.as_ref(), 1, 7, 2).await;

        // Not paged
        let body: Value = app.get("/users/7/businesses").await.json();
        let ids: Vec<i64> = body["businesses"]
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, (1..=12).collect::<Vec<_>>());
        assert!(body.get("pageNumber").is_none());

        let body: Value = app.get("/users/7/reviews").await.json();
        assert_eq!(body["reviews"].as_array().unwrap().len(), 1);
        assert_eq!(body["reviews"][0]["businessid"], 13);

        let body: Value = app.get("/users/7/photos").await.json();
        assert_eq!(body["photos"][0]["id"], 1);
    }

    #[tokio::test]
    #[test_log::test]
    async fn test_unknown_user_owns_nothing() {
        let (app, _store) = create_test_app().await;

        let response = app.get("/users/404/businesses").await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>(), json!({"businesses": []}));
        assert_eq!(app.get("/users/404/reviews").await.json::<Value>(), json!({"reviews": []}));
        assert_eq!(app.get("/users/404/photos").await.json::<Value>(), json!({"photos": []}));
    }

    #[tokio::test]
    #[test_log::test]
    async fn test_non_numeric_user_id_is_a_json_bad_request() {
        let (app, _store) = create_test_app().await;

        let response = app.get("/users/abc/businesses").await;
        response.assert_status_bad_request();
        assert!(response.json::<Value>()["error"].as_str().unwrap().contains("abc"));
    }
}
