use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;

use crate::client::amp_json_protocol::{ListInstancesResponse, LoginResponse};
use crate::config::config_model::AppSettings;

/// Opaque panel session token. Obtained fresh for every cycle and never stored
/// anywhere; it is threaded as a parameter into the calls that need it.
pub type SessionId = String;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("failed to encode request payload: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("http call failed: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("failed to decode login response: {0}")]
    Decode(#[source] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum EnumerationError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("malformed instance listing: {0}")]
    Decode(#[source] serde_json::Error),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AmpClient: Send + Sync {
    async fn login(&self) -> Result<SessionId, AuthError>;

    async fn list_instances(
        &self,
        session: &SessionId,
    ) -> Result<ListInstancesResponse, EnumerationError>;
}

#[derive(Clone)]
pub struct AmpClientImpl {
    configs: &'static AppSettings,
    client: reqwest::Client,
}

impl AmpClientImpl {
    pub fn new(configs: &'static AppSettings, client: reqwest::Client) -> Self {
        Self { configs, client }
    }

    /// One POST against a panel endpoint, returning the body unparsed.
    /// The panel reports failures inside the JSON body rather than via the
    /// status line, so no status check happens here; callers decode and let a
    /// malformed body surface as their own error kind.
    async fn api_call(
        &self,
        endpoint: &str,
        payload: HashMap<&str, String>,
    ) -> Result<Bytes, TransportError> {
        let url = {
            let base = self.configs.amp.url.trim_end_matches('/');
            format!("{base}{endpoint}")
        };
        let body = serde_json::to_vec(&payload).map_err(TransportError::Encode)?;

        let response = self
            .client
            .post(url)
            .header(reqwest::header::ACCEPT, "application/json; charset=UTF-8")
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let bytes = response.bytes().await?;
        Ok(bytes)
    }
}

#[async_trait]
impl AmpClient for AmpClientImpl {
    async fn login(&self) -> Result<SessionId, AuthError> {
        let payload = HashMap::from([
            ("username", self.configs.amp.username.clone()),
            ("password", self.configs.amp.password.clone()),
            ("token", String::new()),
            ("rememberMe", "false".to_string()),
        ]);

        let body = self.api_call("/API/Core/Login", payload).await?;
        let login: LoginResponse = serde_json::from_slice(&body).map_err(AuthError::Decode)?;
        Ok(login.session_id)
    }

    async fn list_instances(
        &self,
        session: &SessionId,
    ) -> Result<ListInstancesResponse, EnumerationError> {
        let payload = HashMap::from([("SESSIONID", session.clone())]);

        let body = self.api_call("/API/ADSModule/GetInstances", payload).await?;
        let listing = serde_json::from_slice(&body).map_err(EnumerationError::Decode)?;
        Ok(listing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::config_model::{AmpSettings, AppSettings};
    use mockito::Matcher;
    use serde_json::json;

    fn create_test_config(url: String) -> &'static AppSettings {
        let config = AppSettings {
            amp: AmpSettings {
                url,
                username: "stats".to_string(),
                password: "hunter2".to_string(),
                controller_name: "ADS01".to_string(),
            },
            ..Default::default()
        };
        Box::leak(Box::new(config))
    }

    #[tokio::test]
    async fn login_returns_session_from_response() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/API/Core/Login")
            .match_header("accept", "application/json; charset=UTF-8")
            .match_body(Matcher::Json(json!({
                "username": "stats",
                "password": "hunter2",
                "token": "",
                "rememberMe": "false",
            })))
            .with_body(r#"{"sessionID":"abc-123","success":true}"#)
            .create_async()
            .await;

        let config = create_test_config(server.url());
        let client = AmpClientImpl::new(config, reqwest::Client::new());

        let session = client.login().await.unwrap();
        assert_eq!(session, "abc-123");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn login_with_undecodable_body_is_an_auth_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/API/Core/Login")
            .with_body("<html>login page</html>")
            .create_async()
            .await;

        let config = create_test_config(server.url());
        let client = AmpClientImpl::new(config, reqwest::Client::new());

        let result = client.login().await;
        assert!(matches!(result, Err(AuthError::Decode(_))));
    }

    #[tokio::test]
    async fn login_with_unreachable_panel_is_a_transport_error() {
        // nothing listens on port 1
        let config = create_test_config("http://127.0.0.1:1".to_string());
        let client = AmpClientImpl::new(config, reqwest::Client::new());

        let result = client.login().await;
        assert!(matches!(result, Err(AuthError::Transport(_))));
    }

    #[tokio::test]
    async fn non_2xx_with_decodable_body_is_not_an_error() {
        // the panel signals failure in the body, not the status line
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/API/Core/Login")
            .with_status(500)
            .with_body(r#"{"sessionID":"still-a-session"}"#)
            .create_async()
            .await;

        let config = create_test_config(server.url());
        let client = AmpClientImpl::new(config, reqwest::Client::new());

        let session = client.login().await.unwrap();
        assert_eq!(session, "still-a-session");
    }

    #[tokio::test]
    async fn list_instances_sends_session_and_decodes_hosts() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/API/ADSModule/GetInstances")
            .match_body(Matcher::Json(json!({"SESSIONID": "abc-123"})))
            .with_body(
                r#"{"result":[{"Id":1,"InstanceId":"h1","FriendlyName":"node01","AvailableInstances":[{"InstanceName":"Survival1","Module":"Minecraft","Running":true}]}]}"#,
            )
            .create_async()
            .await;

        let config = create_test_config(server.url());
        let client = AmpClientImpl::new(config, reqwest::Client::new());

        let session: SessionId = "abc-123".to_string();
        let listing = client.list_instances(&session).await.unwrap();
        assert_eq!(listing.result.len(), 1);
        assert_eq!(listing.result[0].friendly_name, "node01");
        assert_eq!(
            listing.result[0].available_instances[0].instance_name,
            "Survival1"
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn list_instances_without_result_key_is_an_enumeration_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/API/ADSModule/GetInstances")
            .with_body(r#"{"success":false,"resultReason":"Session expired"}"#)
            .create_async()
            .await;

        let config = create_test_config(server.url());
        let client = AmpClientImpl::new(config, reqwest::Client::new());

        let session: SessionId = "expired".to_string();
        let result = client.list_instances(&session).await;
        assert!(matches!(result, Err(EnumerationError::Decode(_))));
    }
}
