mod events;
mod format;
mod hooks;
mod status;
mod translator;

pub use events::object_kind;
pub use hooks::{is_known_hook, GITLAB_EVENT_HEADER};
pub use status::{status_style, Color, StatusStyle};
pub use translator::{translate_payload, Translation};
