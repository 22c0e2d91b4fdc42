use crate::requests::api::SyncHttpRequest;
use crate::requests::entities::{HttpRequestData, HttpRequestMethod};
use anyhow::{bail, Context, Result};
use std::time::Duration;
use ureq::{Agent, AgentBuilder, Error};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

impl HttpRequestMethod {
    fn as_str(&self) -> &'static str {
        match self {
            HttpRequestMethod::Get => "GET",
            HttpRequestMethod::Post => "POST",
        }
    }
}

/// Blocking HTTP client. A single attempt is made per call.
#[derive(Clone)]
pub struct UreqRequestApi {
    agent: Agent,
}

impl Default for UreqRequestApi {
    fn default() -> Self {
        Self::with_timeout(DEFAULT_REQUEST_TIMEOUT)
    }
}

impl UreqRequestApi {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            agent: AgentBuilder::new().timeout(timeout).build(),
        }
    }
}

impl SyncHttpRequest for UreqRequestApi {
    fn call(&self, req: HttpRequestData) -> Result<String> {
        let mut request = self.agent.request(req.method.as_str(), &req.url);

        for (header, value) in req.headers.iter().flatten() {
            request = request.set(header, value);
        }

        let res = match req.body {
            Some(body) => request.send_json(body),
            None => request.call(),
        };

        match res {
            Ok(resp) => resp
                .into_string()
                .context(format!("an error on reading the response of {}", req.url)),
            Err(Error::Status(code, resp)) => bail!(
                "{} {} responded with a code {}: {}",
                req.method.as_str(),
                req.url,
                code,
                resp.into_string().unwrap_or_default()
            ),
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("{} {} failed", req.method.as_str(), req.url))),
        }
    }
}
