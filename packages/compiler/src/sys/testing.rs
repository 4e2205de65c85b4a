//! Deterministic system for tests and embedders that must not consult the
//! running process.

use super::compiler_system::CompilerSystem;

#[derive(Debug, Clone)]
pub struct TestingSystem {
    current_directory: String,
}

impl TestingSystem {
    pub fn new(current_directory: impl Into<String>) -> Self {
        TestingSystem {
            current_directory: current_directory.into(),
        }
    }
}

impl Default for TestingSystem {
    fn default() -> Self {
        Self::new("/")
    }
}

impl CompilerSystem for TestingSystem {
    fn name(&self) -> &str {
        "testing"
    }

    fn get_current_directory(&self) -> String {
        self.current_directory.clone()
    }
}
