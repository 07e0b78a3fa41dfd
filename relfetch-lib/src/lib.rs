pub mod checksum;
pub mod config;
pub mod download_client;
pub mod encoding;
pub mod error;
pub mod fetch;
pub mod http;
pub mod locator;
pub mod logging;
pub mod transfer;

#[cfg(test)]
pub mod test_helpers;
