mod client;
mod platform;
mod target;

pub use client::ChatClient;
pub use platform::Platform;
pub use target::{TargetUrl, Targets};
