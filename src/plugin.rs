//! Host boundary
//!
//! A host loads the plugin with a [`LoadContext`]. Loading runs the install
//! exactly once and only then asks the [`HookProvider`] for the hook set the
//! host will call into.

use std::path::PathBuf;

use crate::config::InstallConfig;
use crate::error::Result;
use crate::manifest::Manifest;
use crate::operations::{InstallOperation, RunSummary};

/// What the host passes in at load time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadContext {
    /// Project directory the host session runs in
    pub directory: PathBuf,
    pub config: InstallConfig,
}

impl LoadContext {
    pub fn new(directory: impl Into<PathBuf>, config: InstallConfig) -> Self {
        Self {
            directory: directory.into(),
            config,
        }
    }
}

/// Produces the host's hook set once installation has finished
pub trait HookProvider {
    type Hooks;

    fn hooks(&self, ctx: &LoadContext) -> Self::Hooks;
}

impl<F, H> HookProvider for F
where
    F: Fn(&LoadContext) -> H,
{
    type Hooks = H;

    fn hooks(&self, ctx: &LoadContext) -> H {
        self(ctx)
    }
}

/// Result of a plugin load
#[derive(Debug)]
pub struct Loaded<H> {
    pub summary: RunSummary,
    pub hooks: H,
}

pub struct Plugin<P> {
    manifest: Manifest,
    provider: P,
}

impl<P: HookProvider> Plugin<P> {
    pub fn new(manifest: Manifest, provider: P) -> Self {
        Self { manifest, provider }
    }

    /// Plugin with the manifest shipped in the crate
    pub fn embedded(provider: P) -> Result<Self> {
        Ok(Self::new(Manifest::embedded()?, provider))
    }

    /// Install, log the outcome, then build the hook set
    pub fn load(&self, ctx: &LoadContext) -> Result<Loaded<P::Hooks>> {
        let summary = InstallOperation::new(&ctx.config, &self.manifest).execute()?;
        log_summary(&summary, &ctx.config);

        let hooks = self.provider.hooks(ctx);
        Ok(Loaded { summary, hooks })
    }
}

fn log_summary(summary: &RunSummary, config: &InstallConfig) {
    if summary.installed > 0 {
        tracing::info!(
            "Gyoshu: Installed {} files to {}",
            summary.installed,
            config.target_root.display()
        );
    }

    if summary.has_errors() {
        tracing::warn!("Gyoshu: Some files failed to install:");
        for error in &summary.errors {
            tracing::warn!("   - {error}");
        }
    }

    for warning in &summary.warnings {
        tracing::warn!("Gyoshu: {warning}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tempfile::TempDir;

    fn context(temp: &TempDir) -> LoadContext {
        let source = temp.path().join("assets");
        std::fs::create_dir_all(source.join("agent")).unwrap();
        std::fs::write(source.join("agent/a.md"), "agent").unwrap();
        LoadContext::new(
            temp.path().join("project"),
            InstallConfig::new(temp.path().join("opencode"), source),
        )
    }

    #[test]
    fn test_hooks_built_after_install() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);
        let manifest = Manifest::new("1.0.0").with_category("agent", ["a.md"]);

        let plugin = Plugin::new(manifest, |ctx: &LoadContext| {
            ctx.config.target_root.join("agent/a.md").exists()
        });
        let loaded = plugin.load(&ctx).unwrap();

        assert!(loaded.hooks);
        assert_eq!(loaded.summary.installed, 1);
    }

    struct Counting(Cell<usize>);

    impl HookProvider for Counting {
        type Hooks = usize;

        fn hooks(&self, _ctx: &LoadContext) -> usize {
            self.0.set(self.0.get() + 1);
            self.0.get()
        }
    }

    #[test]
    fn test_entry_errors_still_yield_hooks() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);
        let manifest = Manifest::new("1.0.0").with_category("agent", ["../x.md"]);

        let plugin = Plugin::new(manifest, Counting(Cell::new(0)));
        let loaded = plugin.load(&ctx).unwrap();

        assert_eq!(loaded.hooks, 1);
        assert_eq!(loaded.summary.errors.len(), 1);
    }

    #[test]
    fn test_embedded_manifest_plugin() {
        let plugin = Plugin::embedded(|_: &LoadContext| ()).unwrap();
        assert!(!plugin.manifest.is_empty());
    }
}
