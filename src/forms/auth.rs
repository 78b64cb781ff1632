use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate)]
/// Credentials submitted by the login page.
pub struct LoginForm {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Form data for registering a new tourist account.
pub struct RegisterForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub surname: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 3))]
    pub username: String,
    #[validate(length(min = 6))]
    pub password: String,
    /// Catalog interest ids picked during registration.
    #[serde(default)]
    pub interests_ids: Vec<i32>,
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Profile fields a tourist may change.
pub struct ProfileForm {
    #[serde(default)]
    pub interest_ids: Vec<i32>,
    pub receive_recommendations: bool,
}
