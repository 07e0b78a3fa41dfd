use crate::cli::GlobalArgs;
use crate::ui;
use anyhow::Result;
use clap::Args;
use relfetch_lib::checksum;
use relfetch_lib::config::{Config, ReleaseConfig};
use relfetch_lib::http::HttpClient;
use relfetch_lib::locator::{LocateOutcome, locate_and_fetch};

#[derive(Args)]
pub struct ReleaseCommand {
    /// Package to fetch [default: libskia]
    #[arg(long)]
    pub package: Option<String>,

    /// Release tag [default: m67]
    #[arg(long)]
    pub tag: Option<String>,

    /// Architecture suffix of the tarball [default: host architecture]
    #[arg(long)]
    pub arch: Option<String>,

    /// Expected MD5 of the tarball [default: the pinned digest]
    #[arg(long)]
    pub md5: Option<String>,

    /// Account or organisation that publishes the releases [default: wiztk]
    #[arg(long)]
    pub owner: Option<String>,

    /// Release hosting site [default: https://github.com]
    #[arg(long)]
    pub base_url: Option<String>,
}

impl ReleaseCommand {
    pub async fn run(self, global_args: GlobalArgs) -> Result<()> {
        let config = Config::setup(global_args.output_dir.as_deref())?;
        let release = self.release_config(&config);
        let client = HttpClient::new()?;

        match locate_and_fetch(&release, &config.output_dir, &client).await? {
            LocateOutcome::AlreadyVerified(path) => {
                ui::info(&format!("{} is up to date", path.display()));
            }
            LocateOutcome::Fetched(path) => {
                if checksum::verify(&path, &release.md5)? {
                    ui::success(&format!("Saved to {}", path.display()));
                } else {
                    ui::warning(&format!(
                        "Saved to {}, but its MD5 does not match {}",
                        path.display(),
                        release.md5
                    ));
                }
            }
            LocateOutcome::NotFound => {
                ui::warning(&format!(
                    "The latest {} release does not provide {}-{} for {}",
                    release.package, release.package, release.version, release.arch
                ));
                ui::tip("Pass --tag or --arch to pick another tarball.");
            }
        }

        Ok(())
    }

    fn release_config(&self, config: &Config) -> ReleaseConfig {
        let defaults = ReleaseConfig::new(config);
        ReleaseConfig {
            base_url: self.base_url.clone().unwrap_or(defaults.base_url),
            owner: self.owner.clone().unwrap_or(defaults.owner),
            package: self.package.clone().unwrap_or(defaults.package),
            version: self.tag.clone().unwrap_or(defaults.version),
            arch: self.arch.clone().unwrap_or(defaults.arch),
            md5: self.md5.clone().unwrap_or(defaults.md5),
        }
    }
}
