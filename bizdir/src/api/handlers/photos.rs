use crate::api::extract::{PathId, ValidatedJson};
use crate::api::models::pagination::{PAGE_SIZE, Page, PageQuery};
use crate::api::models::photos::{PhotoCreate, PhotoPage, PhotoResponse, PhotoUpdate, PhotoWriteResponse};
use crate::db::handlers::{Photos, Repository, photos::PhotoFilter};
use crate::db::models::photos::{PhotoCreateDBRequest, PhotoUpdateDBRequest};
use crate::db::sequence::next_id;
use crate::errors::{Error, ErrorBody, Result};
use crate::integrity::assert_business_exists;
use crate::types::{Collection, PhotoId};
use crate::AppState;
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};

#[utoipa::path(
    get,
    path = "/photos",
    tag = "photos",
    summary = "List photos",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of photos", body = PhotoPage),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_photos(State(state): State<AppState>, Query(query): Query<PageQuery>) -> Result<Json<PhotoPage>> {
    let repo = Photos::new(state.store.as_ref());

    let total_count = repo.count(&PhotoFilter::default()).await?;
    let page = Page::new(total_count, PAGE_SIZE, query.effective_page(), &Collection::Photos.path());
    let photos = repo.list(&PhotoFilter::new(page.skip, page.limit())).await?;

    Ok(Json(PhotoPage {
        photos: photos.into_iter().map(PhotoResponse::from).collect(),
        page,
    }))
}

#[utoipa::path(
    post,
    path = "/photos",
    tag = "photos",
    summary = "Add photo",
    request_body = PhotoCreate,
    responses(
        (status = 201, description = "Photo created", body = PhotoWriteResponse),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 404, description = "Business not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_photo(
    State(state): State<AppState>,
    ValidatedJson(create): ValidatedJson<PhotoCreate>,
) -> Result<(StatusCode, Json<PhotoWriteResponse>)> {
    let store = state.store.as_ref();

    assert_business_exists(store, create.business_id).await?;

    let id = next_id(store, Collection::Photos).await?;
    let photo = Photos::new(store).create(&PhotoCreateDBRequest::new(id, create)).await?;

    tracing::info!(photo_id = photo.id, business_id = photo.business_id, "Created photo");
    Ok((StatusCode::CREATED, Json(PhotoWriteResponse::new(photo.id, photo.business_id))))
}

#[utoipa::path(
    get,
    path = "/photos/{id}",
    tag = "photos",
    summary = "Get photo",
    params(("id" = i64, Path, description = "Photo ID")),
    responses(
        (status = 200, description = "Photo details", body = PhotoResponse),
        (status = 404, description = "Photo not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_photo(State(state): State<AppState>, PathId(id): PathId<PhotoId>) -> Result<Json<PhotoResponse>> {
    let photo = Photos::new(state.store.as_ref())
        .get_by_id(id)
        .await?
        .ok_or_else(|| Error::not_found("Photo"))?;

    Ok(Json(PhotoResponse::from(photo)))
}

#[utoipa::path(
    put,
    path = "/photos/{id}",
    tag = "photos",
    summary = "Update photo",
    description = "Change the caption, or move the photo to another existing business.",
    params(("id" = i64, Path, description = "Photo ID")),
    request_body = PhotoUpdate,
    responses(
        (status = 200, description = "Photo updated", body = PhotoWriteResponse),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 404, description = "Photo or target business not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_photo(
    State(state): State<AppState>,
    PathId(id): PathId<PhotoId>,
    ValidatedJson(update): ValidatedJson<PhotoUpdate>,
) -> Result<Json<PhotoWriteResponse>> {
    let store = state.store.as_ref();
    let repo = Photos::new(store);

    let existing = repo.get_by_id(id).await?.ok_or_else(|| Error::not_found("Photo"))?;
    if let Some(business_id) = update.business_id.filter(|b| *b != existing.business_id) {
        assert_business_exists(store, business_id).await?;
    }

    let photo = repo.update(id, &PhotoUpdateDBRequest::from(update)).await?;

    Ok(Json(PhotoWriteResponse::new(photo.id, photo.business_id)))
}

#[utoipa::path(
    delete,
    path = "/photos/{id}",
    tag = "photos",
    summary = "Delete photo",
    params(("id" = i64, Path, description = "Photo ID")),
    responses(
        (status = 204, description = "Photo deleted"),
        (status = 404, description = "Photo not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_photo(State(state): State<AppState>, PathId(id): PathId<PhotoId>) -> Result<StatusCode> {
    if !Photos::new(state.store.as_ref()).delete(id).await? {
        return Err(Error::not_found("Photo"));
    }

    Ok(StatusCode::NO_CONTENT)
}
