use crate::requests::api::SyncHttpRequest;
use crate::requests::entities::HttpRequestData;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

pub mod api;
pub mod entities;
pub mod ureq;

/// Performs the request once and deserializes its JSON body into `T`.
pub fn http_request<T, R>(
    req_data: HttpRequestData,
    req_entity_name: &str,
    request_api: &R,
) -> Result<T>
where
    T: DeserializeOwned,
    R: SyncHttpRequest + ?Sized,
{
    let url = req_data.url.clone();

    let body = request_api
        .call(req_data)
        .context(format!(
            "an error occurred on requesting {} from {}",
            req_entity_name, url
        ))?;

    log::debug!(
        "received {} bytes of {} from {}",
        body.len(),
        req_entity_name,
        url
    );

    serde_json::from_str(&body)
        .context(format!("an error occurred on deserializing {}", req_entity_name))
}
