//! Login and signup against the auth service.
//!
//! Responses carry `{ token, user, message }`; a response without a
//! token is a rejection and the server message is surfaced as-is.
//! Demo mode fabricates a local session instead of calling out.

use anyhow::{Result, anyhow};
use serde::Deserialize;
use serde_json::json;

use crate::core::models::now_ms;
use crate::core::session::{Session, SessionUser};

pub struct AuthClient {
    base_url: String,
    demo: bool,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    token: Option<String>,
    user: Option<SessionUser>,
    message: Option<String>,
}

impl AuthClient {
    pub fn new(base_url: String, demo: bool) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            demo,
            client: reqwest::Client::new(),
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        if self.demo {
            let name = email.split('@').next().unwrap_or("Demo User");
            return Ok(demo_session(name, email));
        }

        let body = json!({ "email": email, "password": password });
        self.authenticate("login", body).await
    }

    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Result<Session> {
        if self.demo {
            return Ok(demo_session(name, email));
        }

        let body = json!({ "name": name, "email": email, "password": password });
        self.authenticate("signup", body).await
    }

    async fn authenticate(&self, endpoint: &str, body: serde_json::Value) -> Result<Session> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let response: AuthResponse = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await?
            .json()
            .await?;

        match (response.token, response.user) {
            (Some(token), Some(user)) => Ok(Session { token, user }),
            _ => Err(anyhow!(
                response
                    .message
                    .unwrap_or_else(|| "Invalid credentials".to_string())
            )),
        }
    }
}

fn demo_session(name: &str, email: &str) -> Session {
    Session {
        token: format!("demo-token-{}", now_ms()),
        user: SessionUser {
            id: "1".to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role: "user".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn demo_login_derives_name_from_email() {
        let auth = AuthClient::new("http://unused".into(), true);
        let session = auth.login("alice@example.com", "pw").await.unwrap();

        assert_eq!(session.user.name, "alice");
        assert_eq!(session.user.email, "alice@example.com");
        assert!(session.token.starts_with("demo-token-"));
    }

    #[tokio::test]
    async fn demo_signup_keeps_given_name() {
        let auth = AuthClient::new("http://unused".into(), true);
        let session = auth.signup("Bob", "bob@example.com", "pw").await.unwrap();

        assert_eq!(session.user.name, "Bob");
    }
}
