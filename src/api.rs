#![allow(async_fn_in_trait)] // futures stay on the UI thread, no Send bound needed

use gloo_net::http::{Request, Response};

use crate::error::{BoardError, Result};
use crate::model::{Catalog, ErrorReply, MutationReply};

/// The three calls the board makes against the backend.
pub trait ActivityApi {
    /// `GET /activities`
    async fn fetch_catalog(&self) -> Result<Catalog>;

    /// `POST /activities/{activity}/signup?email={email}`, returning the server's message.
    async fn signup(&self, activity: &str, email: &str) -> Result<String>;

    /// `DELETE /activities/{activity}/unregister?email={email}`, returning the server's message.
    async fn unregister(&self, activity: &str, email: &str) -> Result<String>;
}

/// URL builder. Names and emails are percent-encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn activities(&self) -> String {
        format!("{}/activities", self.base)
    }

    pub fn signup(&self, activity: &str, email: &str) -> String {
        self.member_action(activity, "signup", email)
    }

    pub fn unregister(&self, activity: &str, email: &str) -> String {
        self.member_action(activity, "unregister", email)
    }

    fn member_action(&self, activity: &str, action: &str, email: &str) -> String {
        format!(
            "{}/activities/{}/{}?email={}",
            self.base,
            urlencoding::encode(activity),
            action,
            urlencoding::encode(email)
        )
    }
}

/// Interpret a `GET /activities` response.
pub fn read_catalog(status: u16, ok: bool, body: &str) -> Result<Catalog> {
    if !ok {
        return Err(server_error(status, body));
    }
    Ok(serde_json::from_str(body)?)
}

/// Interpret a signup/unregister response. `None` means the server sent no message.
pub fn read_mutation(status: u16, ok: bool, body: &str) -> Result<Option<String>> {
    if !ok {
        return Err(server_error(status, body));
    }
    let reply: MutationReply = serde_json::from_str(body)?;
    Ok(reply.message)
}

// A non-2xx body that isn't JSON can't carry a detail; treat it as malformed.
fn server_error(status: u16, body: &str) -> BoardError {
    match serde_json::from_str::<ErrorReply>(body) {
        Ok(reply) => BoardError::Server {
            status,
            detail: reply.detail,
        },
        Err(e) => BoardError::Malformed {
            reason: format!("status {status}: {e}"),
        },
    }
}

/// Browser fetch implementation over gloo-net.
#[derive(Debug, Clone)]
pub struct HttpApi {
    endpoints: Endpoints,
}

impl HttpApi {
    pub fn new(base: &str) -> Self {
        Self {
            endpoints: Endpoints::new(base),
        }
    }

    async fn read_body(url: &str, resp: Response) -> Result<(u16, bool, String)> {
        let status = resp.status();
        let ok = resp.ok();
        let body = resp.text().await.map_err(|e| network(url, e))?;
        log::debug!("{url} answered {status} ({} bytes)", body.len());
        Ok((status, ok, body))
    }
}

fn network(url: &str, e: gloo_net::Error) -> BoardError {
    BoardError::Network {
        url: url.to_string(),
        reason: e.to_string(),
    }
}

impl ActivityApi for HttpApi {
    async fn fetch_catalog(&self) -> Result<Catalog> {
        let url = self.endpoints.activities();
        let resp = Request::get(&url)
            .send()
            .await
            .map_err(|e| network(&url, e))?;
        let (status, ok, body) = Self::read_body(&url, resp).await?;
        read_catalog(status, ok, &body)
    }

    async fn signup(&self, activity: &str, email: &str) -> Result<String> {
        let url = self.endpoints.signup(activity, email);
        let resp = Request::post(&url)
            .send()
            .await
            .map_err(|e| network(&url, e))?;
        let (status, ok, body) = Self::read_body(&url, resp).await?;
        let message = read_mutation(status, ok, &body)?;
        Ok(message.unwrap_or_else(|| format!("Signed up {email} for {activity}")))
    }

    async fn unregister(&self, activity: &str, email: &str) -> Result<String> {
        let url = self.endpoints.unregister(activity, email);
        let resp = Request::delete(&url)
            .send()
            .await
            .map_err(|e| network(&url, e))?;
        let (status, ok, body) = Self::read_body(&url, resp).await?;
        let message = read_mutation(status, ok, &body)?;
        Ok(message.unwrap_or_else(|| format!("Unregistered {email} from {activity}")))
    }
}
