use crate::api::extract::{PathId, ValidatedJson};
use crate::api::models::businesses::{BusinessCreate, BusinessPage, BusinessResponse, BusinessUpdate, BusinessWriteResponse};
use crate::api::models::pagination::{PAGE_SIZE, Page, PageQuery};
use crate::db::errors::DbError;
use crate::db::handlers::{Businesses, Repository, businesses::BusinessFilter};
use crate::db::models::businesses::{BusinessCreateDBRequest, BusinessUpdateDBRequest};
use crate::db::sequence::next_id;
use crate::errors::{Error, ErrorBody, Result};
use crate::integrity::assert_no_duplicate_business;
use crate::types::{BusinessId, Collection};
use crate::AppState;
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};

#[utoipa::path(
    get,
    path = "/businesses",
    tag = "businesses",
    summary = "List businesses",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of businesses", body = BusinessPage),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_businesses(State(state): State<AppState>, Query(query): Query<PageQuery>) -> Result<Json<BusinessPage>> {
    let repo = Businesses::new(state.store.as_ref());

    let total_count = repo.count(&BusinessFilter::default()).await?;
    let page = Page::new(total_count, PAGE_SIZE, query.effective_page(), &Collection::Businesses.path());
    let businesses = repo.list(&BusinessFilter::new(page.skip, page.limit())).await?;

    Ok(Json(BusinessPage {
        businesses: businesses.into_iter().map(BusinessResponse::from).collect(),
        page,
    }))
}

#[utoipa::path(
    post,
    path = "/businesses",
    tag = "businesses",
    summary = "Create business",
    request_body = BusinessCreate,
    responses(
        (status = 201, description = "Business created", body = BusinessWriteResponse),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 409, description = "A business with this name and address already exists", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_business(
    State(state): State<AppState>,
    ValidatedJson(create): ValidatedJson<BusinessCreate>,
) -> Result<(StatusCode, Json<BusinessWriteResponse>)> {
    let store = state.store.as_ref();

    assert_no_duplicate_business(store, &create.name, &create.address).await?;

    let id = next_id(store, Collection::Businesses).await?;
    let business = Businesses::new(store).create(&BusinessCreateDBRequest::new(id, create)).await?;

    tracing::info!(business_id = business.id, "Created business");
    Ok((StatusCode::CREATED, Json(BusinessWriteResponse::new(business.id))))
}

#[utoipa::path(
    get,
    path = "/businesses/{id}",
    tag = "businesses",
    summary = "Get business",
    params(("id" = i64, Path, description = "Business ID")),
    responses(
        (status = 200, description = "Business details", body = BusinessResponse),
        (status = 404, description = "Business not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_business(State(state): State<AppState>, PathId(id): PathId<BusinessId>) -> Result<Json<BusinessResponse>> {
    let business = Businesses::new(state.store.as_ref())
        .get_by_id(id)
        .await?
        .ok_or_else(|| Error::not_found("Business"))?;

    Ok(Json(BusinessResponse::from(business)))
}

#[utoipa::path(
    put,
    path = "/businesses/{id}",
    tag = "businesses",
    summary = "Update business",
    params(("id" = i64, Path, description = "Business ID")),
    request_body = BusinessUpdate,
    responses(
        (status = 200, description = "Business updated", body = BusinessWriteResponse),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 404, description = "Business not found", body = ErrorBody),
        (status = 409, description = "Another business has this name and address", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_business(
    State(state): State<AppState>,
    PathId(id): PathId<BusinessId>,
    ValidatedJson(update): ValidatedJson<BusinessUpdate>,
) -> Result<Json<BusinessWriteResponse>> {
    let business = match Businesses::new(state.store.as_ref())
        .update(id, &BusinessUpdateDBRequest::from(update))
        .await
    {
        Ok(business) => business,
        Err(DbError::NotFound) => return Err(Error::not_found("Business")),
        Err(e) => return Err(e.into()),
    };

    Ok(Json(BusinessWriteResponse::new(business.id)))
}

#[utoipa::path(
    delete,
    path = "/businesses/{id}",
    tag = "businesses",
    summary = "Delete business",
    description = "Reviews and photos of the business are left in place.",
    params(("id" = i64, Path, description = "Business ID")),
    responses(
        (status = 204, description = "Business deleted"),
        (status = 404, description = "Business not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_business(State(state): State<AppState>, PathId(id): PathId<BusinessId>) -> Result<StatusCode> {
    if !Businesses::new(state.store.as_ref()).delete(id).await? {
        return Err(Error::not_found("Business"));
    }

    Ok(StatusCode::NO_CONTENT)
}
