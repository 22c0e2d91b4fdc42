use crate::requests::api::SyncHttpRequest;
use crate::requests::entities::{HttpRequestData, HttpRequestMethod};
use anyhow::Result;
use serde::Serialize;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationVariant {
    Error,
    Success,
}

impl Display for NotificationVariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            NotificationVariant::Error => write!(f, "error"),
            NotificationVariant::Success => write!(f, "success"),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub variant: NotificationVariant,
}

impl Notification {
    pub fn error(title: &str, message: &str) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
            variant: NotificationVariant::Error,
        }
    }

    pub fn success(title: &str, message: &str) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
            variant: NotificationVariant::Success,
        }
    }
}

/// Fire-and-forget delivery of a toast-like message.
pub trait Notifier {
    fn send_notification(&self, notification: &Notification) -> Result<()>;
}

/// Prints success notifications to stdout and error notifications to stderr.
#[derive(Default, Debug, Clone, Copy)]
pub struct ConsoleNotifier {}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Default::default()
    }
}

impl Notifier for ConsoleNotifier {
    fn send_notification(&self, notification: &Notification) -> Result<()> {
        match notification.variant {
            NotificationVariant::Success => {
                println!("[{}] {}", notification.title, notification.message)
            }
            NotificationVariant::Error => {
                eprintln!("[{}] {}", notification.title, notification.message)
            }
        }

        Ok(())
    }
}

pub struct WebhookNotifier<R: SyncHttpRequest> {
    url: String,
    request_api: R,
}

impl<R: SyncHttpRequest> WebhookNotifier<R> {
    pub fn new(url: String, request_api: R) -> WebhookNotifier<R> {
        WebhookNotifier { url, request_api }
    }
}

impl<R: SyncHttpRequest> Notifier for WebhookNotifier<R> {
    fn send_notification(&self, notification: &Notification) -> Result<()> {
        let req = HttpRequestData::new(HttpRequestMethod::Post, &self.url)
            .with_json_body(serde_json::to_value(notification)?);

        self.request_api.call(req)?;
        Ok(())
    }
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn send_notification(&self, notification: &Notification) -> Result<()> {
        (**self).send_notification(notification)
    }
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn send_notification(&self, notification: &Notification) -> Result<()> {
        (**self).send_notification(notification)
    }
}
