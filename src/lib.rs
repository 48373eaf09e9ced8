pub mod cli;
pub mod config;
pub mod error;
pub mod forge;
pub mod manifest;
pub mod workflow;

pub use error::{DepBumpError, Result};

use log::*;

use crate::{
    cli::Args,
    forge::{bitbucket::Bitbucket, config::RemoteConfig, manager::ForgeManager},
    workflow::Outcome,
};

/// Resolve options for `args` and run the update against Bitbucket.
pub async fn run(args: &Args) -> Result<Outcome> {
    let options = config::resolve(args)?;

    info!(
        "updating {} to {} in {}/{} ({})",
        options.package,
        options.version,
        options.repo_user_or_org,
        options.repo_name,
        options.repo_branch
    );

    let forge = Bitbucket::new(RemoteConfig::from(&options))?;
    let manager = ForgeManager::new(Box::new(forge));

    workflow::execute(&options, &manager).await
}

#[cfg(test)]
pub mod test_helpers;
