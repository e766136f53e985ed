use super::UserService;
use crate::errors::Result;
use crate::models::PaginationQuery;
use crate::models::users::responses::UserListResponse;

pub async fn list_users(service: &UserService, query: PaginationQuery) -> Result<UserListResponse> {
    service.storage().list_users_with_pagination(query).await
}
