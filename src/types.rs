use serde::{Deserialize, Serialize};

/// Login credentials in the order e-mail, username, password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub confirmed_password: String,
    pub email: String,
    pub password: String,
    pub username: String,
}

impl From<&Credentials> for LoginRequest {
    // The API expects the password twice; there is no separate confirmation.
    fn from(creds: &Credentials) -> Self {
        LoginRequest {
            confirmed_password: creds.password.clone(),
            email: creds.email.clone(),
            password: creds.password.clone(),
            username: creds.username.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterRequest {
    pub title: String,
    pub series: u64,
    pub number_absolute: f64,
    pub number_volume: f64,
    pub volume_number: u64,
    pub groups: Vec<Group>,
    pub language: String,
    pub published: bool,
    pub delay: Option<String>,
}
