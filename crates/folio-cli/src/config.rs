use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use folio_io::prelude::{BuildOptions, OrphanPolicy, RenderOptions};

/// Contents of the `--config` file. Every section and field is optional.
///
/// ```json
/// { "build": { "orphan_policy": "collect" }, "render": { "structured": true } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub build: BuildOptions,
    pub render: RenderOptions,
}

impl CliConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("invalid config {}", path.display()))
    }

    /// File values, with `--collect-orphans` taking precedence.
    pub fn build_options(&self, collect_orphans: bool) -> BuildOptions {
        let mut opts = self.build;
        if collect_orphans {
            opts.orphan_policy = OrphanPolicy::Collect;
        }
        opts
    }

    /// File values, with `--structured` taking precedence.
    pub fn render_options(&self, structured: bool) -> RenderOptions {
        let mut opts = self.render.clone();
        opts.structured |= structured;
        opts
    }
}
