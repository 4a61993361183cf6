//! Compile notifications for applications that embed the code server.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Hook invoked by the build pipeline when a compile starts and ends.
///
/// Never configured from the command line; attach one with
/// [`Options::with_recompile_listener`](crate::config::Options::with_recompile_listener).
pub trait RecompileListener: Send + Sync {
    /// Called before compiling `module`. `output_dir` is where results will land.
    fn started_compile(&self, module: &str, compile_id: u32, output_dir: &Path);

    /// Called once the compile of `module` finished, successfully or not.
    fn finished_compile(&self, module: &str, compile_id: u32, success: bool);
}

/// Listener that ignores every notification. This is the default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRecompileListener;

impl RecompileListener for NoopRecompileListener {
    fn started_compile(&self, _module: &str, _compile_id: u32, _output_dir: &Path) {}

    fn finished_compile(&self, _module: &str, _compile_id: u32, _success: bool) {}
}

/// Shared handle stored in the configuration.
#[derive(Clone)]
pub struct ListenerHandle(Arc<dyn RecompileListener>);

impl ListenerHandle {
    pub fn new(listener: Arc<dyn RecompileListener>) -> Self {
        Self(listener)
    }

    pub fn get(&self) -> &dyn RecompileListener {
        self.0.as_ref()
    }
}

impl Default for ListenerHandle {
    fn default() -> Self {
        Self(Arc::new(NoopRecompileListener))
    }
}

impl fmt::Debug for ListenerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ListenerHandle(..)")
    }
}
