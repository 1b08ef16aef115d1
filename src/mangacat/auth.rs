use crate::{
    mangacat::ApiClient,
    types::{Credentials, LoginRequest},
};

pub const LOGIN: &str = "auth/login";

/// Logs into MangaCat and returns the authentication token.
///
/// Returns `None` if the request failed or the response does not contain a
/// `user.token` string. The reason is logged in both cases.
pub async fn login(client: &ApiClient, creds: &Credentials) -> Option<String> {
    let Some(res) = client
        .submit_json(LOGIN, &LoginRequest::from(creds), None)
        .await
    else {
        log::error!("Empty response");
        return None;
    };

    match res["user"]["token"].as_str() {
        Some(token) => Some(token.to_string()),
        None => {
            log::error!("No token in response: {}", res);
            None
        }
    }
}
