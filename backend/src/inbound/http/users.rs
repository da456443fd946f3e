//! User resource handlers.
//!
//! ```text
//! POST   /user            {"name":"Ada","location":"London","title":"Analyst"}
//! GET    /user/{userId}
//! PUT    /user/{userId}   {"name":"Ada","location":"Paris","title":"Analyst"}
//! DELETE /user/{userId}
//! GET    /users
//! ```
//!
//! Each handler parses its input, validates it, makes one driving-port call
//! and formats the outcome through [`envelope::success`]. Failures are
//! returned as domain errors and formatted by the `ResponseError` impl.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, UserProfile};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::{self, SUCCESS};
use crate::inbound::http::schemas::{
    ErrorEnvelope, UserCreatedEnvelope, UserDeletedEnvelope, UserEnvelope, UserUpdatedEnvelope,
    UsersEnvelope,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    Validate, decode_and_validate, map_user_validation_error, parse_user_id,
};

/// Request body for creating or replacing a user.
///
/// Unknown keys, including any client-supplied `id`, are ignored.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UserRequest {
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
    #[schema(example = "London")]
    pub location: Option<String>,
    #[schema(example = "Analyst")]
    pub title: Option<String>,
}

impl Validate for UserRequest {
    type Output = UserProfile;

    fn validate(self) -> Result<UserProfile, Error> {
        UserProfile::try_new(self.name, self.location, self.title)
            .map_err(map_user_validation_error)
    }
}

/// Create a user with a server-assigned id.
#[utoipa::path(
    post,
    path = "/user",
    request_body = UserRequest,
    responses(
        (status = 201, description = "User created", body = UserCreatedEnvelope),
        (status = 400, description = "Malformed or invalid payload", body = ErrorEnvelope),
        (status = 500, description = "Store failure", body = ErrorEnvelope),
        (status = 503, description = "Store unreachable", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/user")]
pub async fn create_user(
    state: web::Data<HttpState>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let profile = decode_and_validate::<UserRequest>(&body)?;
    let created = state.users_command.create_user(profile).await?;
    Ok(envelope::success(StatusCode::CREATED, SUCCESS, created))
}

/// Fetch one user by id.
#[utoipa::path(
    get,
    path = "/user/{userId}",
    params(("userId" = String, Path, description = "24 character hex ObjectId")),
    responses(
        (status = 200, description = "User", body = UserEnvelope),
        (status = 400, description = "Malformed id", body = ErrorEnvelope),
        (status = 404, description = "No such user", body = ErrorEnvelope),
        (status = 500, description = "Store failure", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/user/{userId}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&path)?;
    let user = state.users_query.fetch_user(&id).await?;
    Ok(envelope::success(StatusCode::OK, SUCCESS, user))
}

/// Replace every descriptive field of a user.
///
/// Sending the stored values again succeeds with `modifiedCount` 0.
#[utoipa::path(
    put,
    path = "/user/{userId}",
    params(("userId" = String, Path, description = "24 character hex ObjectId")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User updated", body = UserUpdatedEnvelope),
        (status = 400, description = "Malformed id or invalid payload", body = ErrorEnvelope),
        (status = 404, description = "No such user", body = ErrorEnvelope),
        (status = 500, description = "Store failure", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/user/{userId}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&path)?;
    let profile = decode_and_validate::<UserRequest>(&body)?;
    let updated = state.users_command.update_user(&id, profile).await?;
    Ok(envelope::success(StatusCode::OK, SUCCESS, updated))
}

/// Delete a user by id.
#[utoipa::path(
    delete,
    path = "/user/{userId}",
    params(("userId" = String, Path, description = "24 character hex ObjectId")),
    responses(
        (status = 200, description = "User deleted", body = UserDeletedEnvelope),
        (status = 400, description = "Malformed id", body = ErrorEnvelope),
        (status = 404, description = "No such user", body = ErrorEnvelope),
        (status = 500, description = "Store failure", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/user/{userId}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&path)?;
    let deleted = state.users_command.delete_user(&id).await?;
    Ok(envelope::success(StatusCode::OK, SUCCESS, deleted))
}

/// List every stored user in store order.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_service::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Users", body = UsersEnvelope),
        (status = 500, description = "Store failure", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let users = state.users_query.list_users().await?;
    Ok(envelope::success(StatusCode::OK, SUCCESS, users))
}
