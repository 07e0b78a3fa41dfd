use crate::cli::GlobalArgs;
use crate::ui;
use anyhow::Result;
use clap::Args;
use relfetch_lib::config::Config;
use relfetch_lib::fetch::{FetchOutcome, fetch_url};
use relfetch_lib::http::HttpClient;

#[derive(Args)]
pub struct GetCommand {
    /// URL of the file to download
    pub url: String,

    /// Expected MD5 of the file, as lowercase hex
    pub md5: String,
}

impl GetCommand {
    pub async fn run(self, global_args: GlobalArgs) -> Result<()> {
        let config = Config::setup(global_args.output_dir.as_deref())?;
        let client = HttpClient::new()?;

        match fetch_url(&self.url, &self.md5, &config.output_dir, &client).await? {
            FetchOutcome::AlreadyVerified(path) => {
                ui::info(&format!("{} is up to date", path.display()));
            }
            FetchOutcome::Downloaded(path) => {
                ui::success(&format!("Saved to {}", path.display()));
            }
        }

        Ok(())
    }
}
