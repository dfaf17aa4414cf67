//! Service-specific helpers: locker session tokens and landing-page scraping

pub mod gofile_api;
pub mod moddb_page;

pub use gofile_api::{GoFileAuthenticator, SessionAuthenticator, SessionToken};
pub use moddb_page::parse_download_link;
