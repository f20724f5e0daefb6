use std::net::{Ipv4Addr, SocketAddr};

use kiln_config::{BuildConfig, BuildMode, ProjectLayout};

use crate::cli::ServeArgs;
use crate::dev::{DevConfig, DevServer};
use crate::error::{CliError, Result};

/// Serve the output directory according to the mode's dev-server policy.
pub async fn execute(args: ServeArgs, mode: BuildMode, layout: &ProjectLayout) -> Result<()> {
    let config = dev_config(&args, mode, layout)?;
    DevServer::new(config).start().await
}

fn dev_config(args: &ServeArgs, mode: BuildMode, layout: &ProjectLayout) -> Result<DevConfig> {
    let build = BuildConfig::assemble(mode, layout);
    let policy = build.dev_server.ok_or_else(|| {
        CliError::InvalidArgument(format!(
            "mode '{mode}' has no dev server; use --mode development"
        ))
    })?;

    let port = args.port.unwrap_or(policy.port);
    if port == 0 {
        return Err(CliError::InvalidArgument("port must be non-zero".to_string()));
    }

    Ok(DevConfig {
        addr: SocketAddr::from((Ipv4Addr::LOCALHOST, port)),
        content_base: policy.content_base,
        index: layout.html_filename.clone(),
        hot: policy.hot,
    })
}
