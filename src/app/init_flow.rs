//! `mlssh init`: scaffold an example hosts file and, on request, the user
//! settings file.

use std::path::PathBuf;

use crate::config::{
    create_hosts_file, create_settings_file, default_global_settings_path, default_hosts_path,
    resolve_workspace,
};
use crate::error::{ConfigError, MlsshError};
use crate::ui::render::RenderSink;

#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Hosts file to write; `<workspace>/mlssh.json` when `None`.
    pub path: Option<PathBuf>,
    /// Also write the commented settings template to the user config dir.
    pub settings: bool,
}

/// Write the requested files and return their paths.
pub fn run_init(
    renderer: &dyn RenderSink,
    workspace: Option<&std::path::Path>,
    options: &InitOptions,
) -> Result<Vec<PathBuf>, MlsshError> {
    let hosts_path = match &options.path {
        Some(path) => path.clone(),
        None => default_hosts_path(&resolve_workspace(workspace)?),
    };
    create_hosts_file(&hosts_path)?;
    renderer.activity(&format!("created {}", hosts_path.display()));
    let mut written = vec![hosts_path];

    if options.settings {
        let settings_path = default_global_settings_path().ok_or_else(|| {
            ConfigError::Invalid(
                "unable to resolve config path for ~/.config/mlssh/mlssh.toml".to_string(),
            )
        })?;
        create_settings_file(&settings_path)?;
        renderer.activity(&format!("created {}", settings_path.display()));
        written.push(settings_path);
    }
    Ok(written)
}
