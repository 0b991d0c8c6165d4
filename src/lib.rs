//! Forwards GitLab webhook events to chat group robots as markdown messages.
//!
//! The [`gitlab`] module turns a raw webhook body into a [`message::Message`];
//! [`server`] receives webhooks over HTTP and [`chat`] delivers the result.

pub mod chat;
pub mod cli;
pub mod error;
pub mod gitlab;
pub mod message;
pub mod server;
