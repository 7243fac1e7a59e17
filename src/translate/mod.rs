pub mod client;
pub mod error;
pub mod interface;
pub mod presenter;
pub mod session;

pub use client::{ProxyClient, REQUEST_TIMEOUT};
pub use error::TranslateError;
pub use interface::{TranslateInterface, TranslateRequest};
pub use presenter::{TranslatorView, ViewSnapshot};
pub use session::{ViewEvent, ViewSession};
