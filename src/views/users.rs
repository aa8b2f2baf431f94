use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use userapi_conf::UserConfig;
use userapi_core::Result;
use userapi_http::{Handler, Request, Response};

/// A user as returned by `GET /users/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
	pub id: u64,
	pub username: String,
}

impl From<&UserConfig> for User {
	fn from(config: &UserConfig) -> Self {
		Self {
			id: config.id,
			username: config.username.clone(),
		}
	}
}

/// Lists the users the application was configured with
///
/// # Examples
///
/// ```
/// use userapi::views::{User, UserListView};
///
/// let view = UserListView::new(vec![User { id: 1, username: "alice".into() }]);
/// assert_eq!(view.users().len(), 1);
/// ```
pub struct UserListView {
	users: Vec<User>,
}

impl UserListView {
	pub fn new(users: Vec<User>) -> Self {
		Self { users }
	}

	pub fn users(&self) -> &[User] {
		&self.users
	}
}

#[async_trait]
impl Handler for UserListView {
	async fn handle(&self, _request: Request) -> Result<Response> {
		Response::ok().with_json(&self.users)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use http::StatusCode;
	use rstest::rstest;

	fn get_users() -> Request {
		Request::builder().uri("/users/").build().unwrap()
	}

	#[rstest]
	#[tokio::test]
	async fn test_empty_listing() {
		let response = UserListView::new(Vec::new()).handle(get_users()).await.unwrap();
		assert_eq!(response.status, StatusCode::OK);
		assert_eq!(response.body, "[]");
		assert_eq!(response.headers.get("content-type").unwrap(), "application/json");
	}

	#[rstest]
	#[tokio::test]
	async fn test_listing_keeps_configured_order() {
		let users = vec![
			User::from(&UserConfig {
				id: 2,
				username: "bob".to_string(),
			}),
			User::from(&UserConfig {
				id: 1,
				username: "alice".to_string(),
			}),
		];
		let response = UserListView::new(users.clone()).handle(get_users()).await.unwrap();
		let listed: Vec<User> = serde_json::from_slice(&response.body).unwrap();
		assert_eq!(listed, users);
	}
}
