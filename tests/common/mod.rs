//! Common test utilities for Gyoshu integration tests

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// A scratch OpenCode configuration directory plus a private asset tree
#[allow(dead_code)]
pub struct TestWorkspace {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Target root the installer writes into
    pub root: PathBuf,
    /// Source root holding the assets
    pub source: PathBuf,
}

impl TestWorkspace {
    /// Create a new test workspace with an empty source tree
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().join("opencode");
        let source = temp.path().join("assets");
        std::fs::create_dir_all(&source).expect("Failed to create source directory");
        Self { temp, root, source }
    }

    /// Create a workspace whose source tree is the crate's bundled assets
    #[allow(dead_code)]
    pub fn with_bundled_assets() -> Self {
        let mut workspace = Self::new();
        workspace.source = bundled_assets();
        workspace
    }

    /// Write an asset file under the source root
    #[allow(dead_code)]
    pub fn write_source(&self, path: &str, content: &str) {
        write(&self.source.join(path), content);
    }

    /// Write a file under the target root
    #[allow(dead_code)]
    pub fn write_file(&self, path: &str, content: &str) {
        write(&self.root.join(path), content);
    }

    /// Write a manifest into the temp dir and return its path
    #[allow(dead_code)]
    pub fn write_manifest(&self, json: &str) -> PathBuf {
        let path = self.temp.path().join("manifest.json");
        std::fs::write(&path, json).expect("Failed to write manifest");
        path
    }

    /// Read a file from the target root
    #[allow(dead_code)]
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.root.join(path)).expect("Failed to read file")
    }

    /// Check if a file exists in the target root
    #[allow(dead_code)]
    pub fn file_exists(&self, path: &str) -> bool {
        self.root.join(path).exists()
    }

    /// Parsed install state, if any
    #[allow(dead_code)]
    pub fn state(&self) -> Option<serde_json::Value> {
        let content = std::fs::read_to_string(self.root.join(".gyoshu/install.json")).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// `gyoshu` pointed at this workspace, isolated from the caller's env
    #[allow(deprecated)]
    pub fn gyoshu(&self) -> Command {
        let mut cmd = Command::cargo_bin("gyoshu").expect("Failed to find gyoshu binary");
        cmd.env_remove("GYOSHU_LOG")
            .env("OPENCODE_CONFIG_DIR", &self.root)
            .env("GYOSHU_SOURCE_DIR", &self.source);
        cmd
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// The asset directory shipped with the crate
pub fn bundled_assets() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets")
}

fn write(path: &std::path::Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    std::fs::write(path, content).expect("Failed to write file");
}
