//! User resources.
//!
//! ```text
//! GET    /api/v1/users
//! POST   /api/v1/users {"first_name":"Ada","last_name":"Lovelace","email":"ada@example.com","password":"secret1"}
//! GET    /api/v1/users/{id}
//! PUT    /api/v1/users/{id} {"last_name":"Byron"}
//! DELETE /api/v1/users/{id}
//! GET    /api/v1/users/{id}/reviews
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde_json::Value;

use super::ApiResult;
use super::entities;
use super::payload::path_id;
use super::schemas::{ErrorSchema, ReviewSchema, UserInputSchema, UserSchema};
use super::state::HttpState;
use crate::domain::{Review, User};

#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Users", body = [UserSchema]),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    entities::list(state.users.as_ref()).await
}

/// Register a user.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = UserInputSchema,
    responses(
        (status = 201, description = "User created", body = UserSchema),
        (status = 400, description = "Missing or invalid field", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    body: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    entities::create(state.users.as_ref(), body.into_inner()).await
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = UserSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    entities::get(state.users.as_ref(), &id).await
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User id")),
    request_body = UserInputSchema,
    responses(
        (status = 200, description = "Updated user", body = UserSchema),
        (status = 400, description = "Invalid field", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    id: web::Path<String>,
    body: web::Json<Value>,
) -> ApiResult<web::Json<User>> {
    entities::update(state.users.as_ref(), &id, body.into_inner()).await
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "Unknown user", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<HttpResponse> {
    entities::delete(state.users.as_ref(), &id).await
}

/// Reviews written by a user.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/reviews",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Reviews by the user", body = [ReviewSchema]),
        (status = 404, description = "Unknown user", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUserReviews"
)]
#[get("/users/{id}/reviews")]
pub async fn list_user_reviews(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<web::Json<Vec<Review>>> {
    let id = path_id::<User>(&id)?;
    Ok(web::Json(state.query.reviews_by_user(&id).await?))
}

#[cfg(test)]
mod tests;
