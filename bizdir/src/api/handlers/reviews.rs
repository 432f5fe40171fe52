use crate::api::extract::{PathId, ValidatedJson};
use crate::api::models::pagination::{PAGE_SIZE, Page, PageQuery};
use crate::api::models::reviews::{ReviewCreate, ReviewPage, ReviewResponse, ReviewUpdate, ReviewWriteResponse};
use crate::db::handlers::{Repository, Reviews, reviews::ReviewFilter};
use crate::db::models::reviews::{ReviewCreateDBRequest, ReviewUpdateDBRequest};
use crate::db::sequence::next_id;
use crate::errors::{Error, ErrorBody, Result};
use crate::integrity::{assert_business_exists, assert_immutable_fields, assert_no_duplicate_review};
use crate::types::{Collection, ReviewId};
use crate::AppState;
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};

#[utoipa::path(
    get,
    path = "/reviews",
    tag = "reviews",
    summary = "List reviews",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of reviews", body = ReviewPage),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_reviews(State(state): State<AppState>, Query(query): Query<PageQuery>) -> Result<Json<ReviewPage>> {
    let repo = Reviews::new(state.store.as_ref());

    let total_count = repo.count(&ReviewFilter::default()).await?;
    let page = Page::new(total_count, PAGE_SIZE, query.effective_page(), &Collection::Reviews.path());
    let reviews = repo.list(&ReviewFilter::new(page.skip, page.limit())).await?;

    Ok(Json(ReviewPage {
        reviews: reviews.into_iter().map(ReviewResponse::from).collect(),
        page,
    }))
}

#[utoipa::path(
    post,
    path = "/reviews",
    tag = "reviews",
    summary = "Post review",
    request_body = ReviewCreate,
    responses(
        (status = 201, description = "Review created", body = ReviewWriteResponse),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 404, description = "Business not found", body = ErrorBody),
        (status = 409, description = "This user already reviewed this business", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_review(
    State(state): State<AppState>,
    ValidatedJson(create): ValidatedJson<ReviewCreate>,
) -> Result<(StatusCode, Json<ReviewWriteResponse>)> {
    let store = state.store.as_ref();

    assert_business_exists(store, create.business_id).await?;
    assert_no_duplicate_review(store, create.user_id, create.business_id).await?;

    let id = next_id(store, Collection::Reviews).await?;
    let review = Reviews::new(store).create(&ReviewCreateDBRequest::new(id, create)).await?;

    tracing::info!(review_id = review.id, business_id = review.business_id, "Created review");
    Ok((StatusCode::CREATED, Json(ReviewWriteResponse::new(review.id, review.business_id))))
}

#[utoipa::path(
    get,
    path = "/reviews/{id}",
    tag = "reviews",
    summary = "Get review",
    params(("id" = i64, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Review details", body = ReviewResponse),
        (status = 404, description = "Review not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_review(State(state): State<AppState>, PathId(id): PathId<ReviewId>) -> Result<Json<ReviewResponse>> {
    let review = Reviews::new(state.store.as_ref())
        .get_by_id(id)
        .await?
        .ok_or_else(|| Error::not_found("Review"))?;

    Ok(Json(ReviewResponse::from(review)))
}

#[utoipa::path(
    put,
    path = "/reviews/{id}",
    tag = "reviews",
    summary = "Update review",
    description = "Only `dollars`, `stars` and `review` can change. Sending a different `userid` or `businessid` is forbidden.",
    params(("id" = i64, Path, description = "Review ID")),
    request_body = ReviewUpdate,
    responses(
        (status = 200, description = "Review updated", body = ReviewWriteResponse),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 403, description = "Attempt to change the review's user or business", body = ErrorBody),
        (status = 404, description = "Review not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_review(
    State(state): State<AppState>,
    PathId(id): PathId<ReviewId>,
    ValidatedJson(update): ValidatedJson<ReviewUpdate>,
) -> Result<Json<ReviewWriteResponse>> {
    let repo = Reviews::new(state.store.as_ref());

    let existing = repo.get_by_id(id).await?.ok_or_else(|| Error::not_found("Review"))?;
    assert_immutable_fields(&existing, &update)?;

    let review = repo.update(id, &ReviewUpdateDBRequest::from(update)).await?;

    Ok(Json(ReviewWriteResponse::new(review.id, review.business_id)))
}

#[utoipa::path(
    delete,
    path = "/reviews/{id}",
    tag = "reviews",
    summary = "Delete review",
    params(("id" = i64, Path, description = "Review ID")),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 404, description = "Review not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_review(State(state): State<AppState>, PathId(id): PathId<ReviewId>) -> Result<StatusCode> {
    if !Reviews::new(state.store.as_ref()).delete(id).await? {
        return Err(Error::not_found("Review"));
    }

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::api::models::reviews::{ReviewResponse, ReviewWriteResponse};
    use crate::db::handlers::{Repository, Reviews};
    use crate::test_utils::*;
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    #[tokio::test]
    #[test_log::test]
    async fn test_create_review() {
        let (app, store) = create_test_app().await;
        seed_business(store.as_ref(), 2, 9, "Block 15").await;

        let response = app
            .post("/reviews")
            .json(&json!({"userid": 5, "businessid": 2, "dollars": 1, "stars": 4, "review": "Solid"}))
            .await;
        response.assert_status(StatusCode::CREATED);
        assert_eq!(
            response.json::<Value>(),
            json!({"id": 1, "links": {"review": "/reviews/1", "business": "/businesses/2"}})
        );

        let review: ReviewResponse = app.get("/reviews/1").await.json();
        assert_eq!((review.user_id, review.business_id, review.stars), (5, 2, 4));
        assert_eq!(review.review.as_deref(), Some("Solid"));
    }

    #[tokio::test]
    #[test_log::test]
    async fn test_review_for_missing_business_is_not_found() {
        let (app, store) = create_test_app().await;

        let response = app
            .post("/reviews")
            .json(&json!({"userid": 5, "businessid": 2, "dollars": 1, "stars": 4}))
            .await;
        response.assert_status_not_found();
        assert_eq!(response.json::<Value>(), json!({"error": "Business not found"}));

        let count = Reviews::new(store.as_ref()).count(&Default::default()).await.unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    #[test_log::test]
    async fn test_one_review_per_user_and_business() {
        let (app, store) = create_test_app().await;
        seed_business(store.as_ref(), 2, 9, "Block 15").await;
        seed_business(store.as_ref(), 3, 9, "Block 16").await;
        seed_review(store.as_ref(), 1, 5, 2).await;

        let response = app
            .post("/reviews")
            .json(&json!({"userid": 5, "businessid": 2, "dollars": 2, "stars": 1}))
            .await;
        response.assert_status(StatusCode::CONFLICT);
        assert_eq!(
            response.json::<Value>(),
            json!({"error": "Review already posted by this user for this business"})
        );

        let response = app
            .post("/reviews")
            .json(&json!({"userid": 5, "businessid": 3, "dollars": 2, "stars": 1}))
            .await;
        response.assert_status(StatusCode::CREATED);
        assert_eq!(response.json::<ReviewWriteResponse>().id, 2);
    }

    #[tokio::test]
    #[test_log::test]
    async fn test_update_review() {
        let (app, store) = create_test_app().await;
        seed_business(store.as_ref(), 2, 9, "Block 15").await;
        seed_review(store.as_ref(), 1, 5, 2).await;

        // Repeating the linkage fields is allowed
        let response = app
            .put("/reviews/1")
            .json(&json!({"userid": 5, "businessid": "2", "stars": 1, "review": "Went downhill"}))
            .await;
        response.assert_status_ok();
        assert_eq!(
            response.json::<Value>(),
            json!({"id": 1, "links": {"review": "/reviews/1", "business": "/businesses/2"}})
        );

        let review: ReviewResponse = app.get("/reviews/1").await.json();
        assert_eq!(review.stars, 1);
        assert_eq!(review.dollars, 2);
        assert_eq!(review.review.as_deref(), Some("Went downhill"));
    }

    #[tokio::test]
    #[test_log::test]
    async fn test_update_cannot_move_review() {
        let (app, store) = create_test_app().await;
        seed_business(store.as_ref(), 2, 9, "Block 15").await;
        let original = seed_review(store.as_ref(), 1, 5, 2).await;

        let response = app.put("/reviews/1").json(&json!({"businessid": 3, "stars": 1})).await;
        response.assert_status_forbidden();
        assert_eq!(
            response.json::<Value>(),
            json!({"error": "Cannot change the business or user ID associated with this review"})
        );

        app.put("/reviews/1")
            .json(&json!({"userid": 6}))
            .await
            .assert_status_forbidden();

        let stored = Reviews::new(store.as_ref()).get_by_id(1).await.unwrap().unwrap();
        assert_eq!(stored, original);
    }

    #[tokio::test]
    #[test_log::test]
    async fn test_missing_review() {
        let (app, _store) = create_test_app().await;

        app.get("/reviews/3").await.assert_status_not_found();
        app.put("/reviews/3").json(&json!({"stars": 2})).await.assert_status_not_found();
        let response = app.delete("/reviews/3").await;
        response.assert_status_not_found();
        assert_eq!(response.json::<Value>(), json!({"error": "Review not found"}));
    }

    #[tokio::test]
    #[test_log::test]
    async fn test_list_and_delete_reviews() {
        let (app, store) = create_test_app().await;
        seed_business(store.as_ref(), 1, 9, "Block 15").await;
        for id in 1..=12 {
            seed_review(store.as_ref(), id, id, 1).await;
        }

        let body: Value = app.get("/reviews?page=2").await.json();
        assert_eq!(body["reviews"].as_array().unwrap().len(), 2);
        assert_eq!(body["totalCount"], 12);
        assert_eq!(body["links"], json!({"prevPage": "/reviews?page=1", "firstPage": "/reviews?page=1"}));

        app.delete("/reviews/12").await.assert_status(StatusCode::NO_CONTENT);
        let body: Value = app.get("/reviews").await.json();
        assert_eq!(body["totalCount"], 11);
    }

    #[tokio::test]
    #[test_log::test]
    async fn test_fractional_id_is_a_json_bad_request() {
        let (app, _store) = create_test_app().await;

        let response = app.get("/reviews/1.5").await;
        response.assert_status_bad_request();
        assert!(response.json::<Value>()["error"].is_string());
    }
}
