//! The configuration object shared with the rest of the code server.
//!
//! Parsing mutates an [`OptionsBuilder`]; once cross-field validation passes
//! the builder is frozen into an [`Options`], which only exposes accessors.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::args::{AddressResolver, ArgError, ArgProcessor, SystemResolver};
use crate::config::types::{LogLevel, SourceLevel};
use crate::listener::{ListenerHandle, RecompileListener};

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
pub const DEFAULT_PREFERRED_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 9876;

/// Mutable record the option handlers write into during a single parse pass.
#[derive(Debug, Clone)]
pub struct OptionsBuilder {
    pub(crate) work_dir: Option<PathBuf>,
    pub(crate) module_names: Vec<String>,
    pub(crate) source_path: Vec<PathBuf>,
    pub(crate) bind_address: String,
    pub(crate) preferred_host: String,
    pub(crate) port: u16,
    pub(crate) log_level: LogLevel,
    pub(crate) source_level: SourceLevel,
    pub(crate) compile_incremental: bool,
    pub(crate) no_precompile: bool,
    pub(crate) is_compile_test: bool,
    pub(crate) compile_test_recompiles: u32,
    pub(crate) allow_missing_source_dir: bool,
    pub(crate) fail_on_error: bool,
    pub(crate) strict_resources: bool,
}

impl Default for OptionsBuilder {
    fn default() -> Self {
        Self {
            work_dir: None,
            module_names: Vec::new(),
            source_path: Vec::new(),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            preferred_host: DEFAULT_PREFERRED_HOST.to_string(),
            port: DEFAULT_PORT,
            log_level: LogLevel::default(),
            source_level: SourceLevel::default(),
            compile_incremental: false,
            no_precompile: false,
            is_compile_test: false,
            compile_test_recompiles: 0,
            allow_missing_source_dir: false,
            fail_on_error: false,
            strict_resources: false,
        }
    }
}

impl OptionsBuilder {
    /// Freeze into the read-only configuration. Only called after validation.
    pub(crate) fn build(self) -> Options {
        Options {
            inner: Arc::new(self),
            recompile_listener: ListenerHandle::default(),
        }
    }
}

/// Validated, read-only code server configuration.
///
/// Cloning is cheap; clones share the same parsed values.
#[derive(Debug, Clone)]
pub struct Options {
    inner: Arc<OptionsBuilder>,
    recompile_listener: ListenerHandle,
}

impl Options {
    /// Parse process arguments (without the program name) into a validated configuration.
    ///
    /// Uses the system resolver for `-bindAddress`.
    pub fn parse_args(args: &[String]) -> Result<Self, ArgError> {
        Self::parse_args_with(args, &SystemResolver)
    }

    /// Like [`Options::parse_args`], resolving bind addresses through `resolver`.
    pub fn parse_args_with(
        args: &[String],
        resolver: &dyn AddressResolver,
    ) -> Result<Self, ArgError> {
        ArgProcessor::new(resolver)?.parse(args)
    }

    /// Attach the hook the build pipeline calls when compiles start and end.
    pub fn with_recompile_listener(mut self, listener: Arc<dyn RecompileListener>) -> Self {
        self.recompile_listener = ListenerHandle::new(listener);
        self
    }

    pub fn recompile_listener(&self) -> &dyn RecompileListener {
        self.recompile_listener.get()
    }

    /// The top of the directory tree where compiler output is written.
    ///
    /// `None` means the caller should pick a temporary directory.
    pub fn work_dir(&self) -> Option<&Path> {
        self.inner.work_dir.as_deref()
    }

    /// Modules to compile, in command-line order.
    pub fn module_names(&self) -> &[String] {
        &self.inner.module_names
    }

    /// Source directories prepended to the compile classpath, in command-line order.
    pub fn source_path(&self) -> &[PathBuf] {
        &self.inner.source_path
    }

    /// The address to listen on, exactly as the user spelled it.
    pub fn bind_address(&self) -> &str {
        &self.inner.bind_address
    }

    /// Hostname to put in URLs pointing at the code server.
    pub fn preferred_host(&self) -> &str {
        &self.inner.preferred_host
    }

    pub fn port(&self) -> u16 {
        self.inner.port
    }

    pub fn log_level(&self) -> LogLevel {
        self.inner.log_level
    }

    pub fn source_level(&self) -> SourceLevel {
        self.inner.source_level
    }

    /// Compile as a set of separately linked libraries.
    pub fn compile_incremental(&self) -> bool {
        self.inner.compile_incremental
    }

    /// Start without precompiling modules.
    pub fn no_precompile(&self) -> bool {
        self.inner.no_precompile
    }

    /// Compile the modules once, then exit.
    pub fn is_compile_test(&self) -> bool {
        self.inner.is_compile_test
    }

    /// Extra recompiles to run during a compile test.
    pub fn compile_test_recompiles(&self) -> u32 {
        self.inner.compile_test_recompiles
    }

    pub fn allow_missing_source_dir(&self) -> bool {
        self.inner.allow_missing_source_dir
    }

    /// Fail the compile on any source file with an error, used or not.
    pub fn fail_on_error(&self) -> bool {
        self.inner.fail_on_error
    }

    /// Don't implicitly depend on `client` and `public` for modules without dependencies.
    pub fn enforce_strict_resources(&self) -> bool {
        self.inner.strict_resources
    }
}

impl fmt::Display for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let work_dir = self
            .work_dir()
            .map(|dir| dir.display().to_string())
            .unwrap_or_else(|| "(temporary)".to_string());
        let source_path: Vec<String> = self
            .source_path()
            .iter()
            .map(|dir| dir.display().to_string())
            .collect();

        writeln!(f, "modules: {}", self.module_names().join(" "))?;
        writeln!(f, "workDir: {}", work_dir)?;
        writeln!(f, "src: {}", source_path.join(" "))?;
        writeln!(f, "bindAddress: {}", self.bind_address())?;
        writeln!(f, "preferredHost: {}", self.preferred_host())?;
        writeln!(f, "port: {}", self.port())?;
        writeln!(f, "logLevel: {}", self.log_level())?;
        writeln!(f, "sourceLevel: {}", self.source_level())?;
        writeln!(f, "precompile: {}", !self.no_precompile())?;
        writeln!(f, "incremental: {}", self.compile_incremental())?;
        writeln!(f, "compileTest: {}", self.is_compile_test())?;
        writeln!(f, "compileTestRecompiles: {}", self.compile_test_recompiles())?;
        writeln!(f, "allowMissingSrc: {}", self.allow_missing_source_dir())?;
        writeln!(f, "failOnError: {}", self.fail_on_error())?;
        write!(f, "enforceStrictResources: {}", self.enforce_strict_resources())
    }
}
