//! Encyclopedia lookups: locales, URLs, transport and fetchers.

mod client;
pub mod endpoints;
pub mod locale;
pub mod transport;

pub use client::{NO_SUMMARY, WikiClient};
pub use endpoints::{Endpoints, normalize_topic};
pub use locale::{Locale, describe, is_supported, list_all, print_locales, validate_locale};
pub use transport::{HttpResponse, ReqwestTransport, Transport, TransportOptions};
