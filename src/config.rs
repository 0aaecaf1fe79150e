//! Compiler configuration.

use std::path::PathBuf;

/// Default directory scanned for rule lists.
pub const DEFAULT_DATA_PATH: &str = "./";

/// Default directory the outputs are written to.
pub const DEFAULT_OUTPUT_DIR: &str = ".";

/// Configuration for one compiler run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerConfig {
    /// Directory walked recursively for rule list files
    pub data_path: PathBuf,
    /// Directory receiving `v2site.dat`, `v2ip.dat`, `v2map.txt` and `v2yaml.yaml`
    pub output_dir: PathBuf,
}

impl CompilerConfig {
    /// Create a config reading from `data_path` and writing to the current directory.
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_PATH)
    }
}
