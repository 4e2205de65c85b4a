use std::fmt::Debug;

/// Host services the config pipelines consult.
pub trait CompilerSystem: Send + Sync + Debug {
    /// Short identifier of the implementation (`"os"`, `"testing"`, ...).
    fn name(&self) -> &str;

    /// Working directory used to resolve relative config paths.
    fn get_current_directory(&self) -> String;
}
