use super::compiler_system::CompilerSystem;
use crate::logging::Logger;
use std::path::Path;
use std::sync::Arc;

/// System backed by the running process.
///
/// The working directory is sampled once at construction.
#[derive(Debug, Clone)]
pub struct OsSystem {
    current_directory: String,
}

impl OsSystem {
    pub fn new() -> Self {
        let current_directory = std::env::current_dir()
            .map(|dir| normalize_path(&dir))
            .unwrap_or_else(|_| "/".to_string());
        OsSystem { current_directory }
    }
}

impl Default for OsSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl CompilerSystem for OsSystem {
    fn name(&self) -> &str {
        "os"
    }

    fn get_current_directory(&self) -> String {
        self.current_directory.clone()
    }
}

/// System factory used when neither the user config nor the bootstrap seed
/// supplies one.
pub fn create_system(logger: Option<&Arc<dyn Logger>>) -> Arc<dyn CompilerSystem> {
    let sys = OsSystem::new();
    if let Some(logger) = logger {
        logger.debug(&format!("created os system, cwd: {}", sys.current_directory));
    }
    Arc::new(sys)
}

/// Forward-slash form of a host path.
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
