//! Command line configuration for the server.

use std::path::PathBuf;

use clap::Parser;
use reqwest::Url;

use crate::{Error, api::HttpExpenseApi};

/// A web dashboard for tracking expenses stored by a remote expense API.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// The base URL of the remote expense API, e.g. "https://example.com/prod".
    #[arg(long)]
    pub api_url: String,

    /// The user whose expenses are shown.
    #[arg(long, default_value = "demo_user")]
    pub user_id: String,

    /// The port to serve the dashboard from.
    #[arg(short, long, default_value_t = 3000)]
    pub port: u16,

    /// The canonical name of the local timezone, e.g. "Pacific/Auckland".
    ///
    /// Decides which expenses are shown as "Today" and "Yesterday".
    #[arg(long, default_value = "Etc/UTC")]
    pub timezone: String,

    /// The file to write debug logs to.
    #[arg(long, default_value = "debug.log")]
    pub log_path: PathBuf,
}

impl Args {
    /// The client for the configured expense API.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidApiUrl] if the API URL cannot be parsed or
    /// cannot be used as a base URL.
    pub fn expense_api(&self) -> Result<HttpExpenseApi, Error> {
        let url = Url::parse(&self.api_url).map_err(|error| {
            tracing::error!("could not parse API URL {}: {error}", self.api_url);
            Error::InvalidApiUrl(self.api_url.clone())
        })?;

        HttpExpenseApi::new(url).map_err(|error| {
            tracing::error!("{error}");
            Error::InvalidApiUrl(self.api_url.clone())
        })
    }
}
