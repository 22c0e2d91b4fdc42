pub mod entities;
pub mod helpers;
pub mod notifier;
pub mod requests;
