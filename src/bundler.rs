use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Mutex;

use crate::error::{PublishError, Result};

/// Module-resolution preference order handed to the bundler
pub const RESOLUTION_ORDER: [&str; 3] = ["module", "main", "jsnext"];

/// Output bundle formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleFormat {
    /// Universal module definition
    Umd,
    /// ES module
    Es,
}

impl ModuleFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleFormat::Umd => "umd",
            ModuleFormat::Es => "es",
        }
    }
}

/// Handle to a compiled bundle: the inputs the bundler needs to emit any
/// output format from the same compilation.
#[derive(Debug, Clone, PartialEq)]
pub struct Bundle {
    pub entry_point: PathBuf,
    pub resolution_order: Vec<String>,
    pub build_config: PathBuf,
    /// `(identifier, literal)` pairs inlined at bundle time
    pub env_substitutions: Vec<(String, String)>,
}

/// Narrow interface over the external bundler.
///
/// `compile` produces a bundle handle; `write` emits one artifact per call.
/// All exports are named (never default-only).
pub trait Bundler: Send + Sync {
    fn compile(
        &self,
        entry_point: &Path,
        resolution_order: &[&str],
        build_config: &Path,
        env_substitutions: &[(String, String)],
    ) -> Result<Bundle>;

    fn write(
        &self,
        bundle: &Bundle,
        output: &Path,
        format: ModuleFormat,
        export_name: Option<&str>,
    ) -> Result<()>;
}

/// The environment substitution inlined into every bundle: the current
/// runtime-environment marker as a JSON string literal.
pub fn env_substitutions() -> Vec<(String, String)> {
    let node_env = std::env::var("NODE_ENV").unwrap_or_else(|_| "production".to_string());
    vec![(
        "process.env.NODE_ENV".to_string(),
        format!("\"{}\"", node_env),
    )]
}

/// [Bundler] implementation that shells out to a configured bundler command
/// with explicit arguments. Nothing ambient (no cwd mutation) is involved, so
/// invocations cannot interfere with each other.
pub struct ProcessBundler {
    command: String,
}

impl ProcessBundler {
    pub fn new(command: impl Into<String>) -> Self {
        ProcessBundler {
            command: command.into(),
        }
    }
}

impl Bundler for ProcessBundler {
    fn compile(
        &self,
        entry_point: &Path,
        resolution_order: &[&str],
        build_config: &Path,
        env_substitutions: &[(String, String)],
    ) -> Result<Bundle> {
        if !entry_point.exists() {
            return Err(PublishError::bundler(format!(
                "entry point not found: {}",
                entry_point.display()
            )));
        }

        Ok(Bundle {
            entry_point: entry_point.to_path_buf(),
            resolution_order: resolution_order.iter().map(|s| s.to_string()).collect(),
            build_config: build_config.to_path_buf(),
            env_substitutions: env_substitutions.to_vec(),
        })
    }

    fn write(
        &self,
        bundle: &Bundle,
        output: &Path,
        format: ModuleFormat,
        export_name: Option<&str>,
    ) -> Result<()> {
        let mut cmd = Command::new(&self.command);
        cmd.arg("--input")
            .arg(&bundle.entry_point)
            .arg("--format")
            .arg(format.as_str())
            .arg("--file")
            .arg(output)
            .arg("--exports")
            .arg("named")
            .arg("--mainFields")
            .arg(bundle.resolution_order.join(","))
            .arg("--configPlugin")
            .arg(&bundle.build_config);

        if let Some(name) = export_name {
            cmd.arg("--name").arg(name);
        }
        for (key, value) in &bundle.env_substitutions {
            cmd.arg("--define").arg(format!("{}={}", key, value));
        }

        let output_status = cmd
            .output()
            .map_err(|e| PublishError::bundler(format!("cannot run {}: {}", self.command, e)))?;

        if !output_status.status.success() {
            return Err(PublishError::bundler(
                String::from_utf8_lossy(&output_status.stderr).trim().to_string(),
            ));
        }
        Ok(())
    }
}

/// One recorded `write` invocation on a [MockBundler]
#[derive(Debug, Clone, PartialEq)]
pub struct WriteCall {
    pub output: PathBuf,
    pub format: ModuleFormat,
    pub export_name: Option<String>,
}

/// Mock bundler recording compile/write calls; can be set to fail on a
/// chosen compile invocation to exercise the pipeline's fail-fast behavior.
#[derive(Default)]
pub struct MockBundler {
    compiles: Mutex<Vec<PathBuf>>,
    writes: Mutex<Vec<WriteCall>>,
    fail_on_compile: Option<usize>,
}

impl MockBundler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the nth compile call (0-based)
    pub fn fail_on_compile(index: usize) -> Self {
        MockBundler {
            fail_on_compile: Some(index),
            ..Self::default()
        }
    }

    /// Entry points passed to `compile`, in call order
    pub fn compile_calls(&self) -> Vec<PathBuf> {
        self.compiles.lock().unwrap().clone()
    }

    pub fn write_calls(&self) -> Vec<WriteCall> {
        self.writes.lock().unwrap().clone()
    }
}

impl Bundler for MockBundler {
    fn compile(
        &self,
        entry_point: &Path,
        resolution_order: &[&str],
        build_config: &Path,
        env_substitutions: &[(String, String)],
    ) -> Result<Bundle> {
        let mut compiles = self.compiles.lock().unwrap();
        let index = compiles.len();
        compiles.push(entry_point.to_path_buf());

        if self.fail_on_compile == Some(index) {
            return Err(PublishError::bundler(format!(
                "mock compile failure for {}",
                entry_point.display()
            )));
        }

        Ok(Bundle {
            entry_point: entry_point.to_path_buf(),
            resolution_order: resolution_order.iter().map(|s| s.to_string()).collect(),
            build_config: build_config.to_path_buf(),
            env_substitutions: env_substitutions.to_vec(),
        })
    }

    fn write(
        &self,
        _bundle: &Bundle,
        output: &Path,
        format: ModuleFormat,
        export_name: Option<&str>,
    ) -> Result<()> {
        self.writes.lock().unwrap().push(WriteCall {
            output: output.to_path_buf(),
            format,
            export_name: export_name.map(|s| s.to_string()),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_format_strings() {
        assert_eq!(ModuleFormat::Umd.as_str(), "umd");
        assert_eq!(ModuleFormat::Es.as_str(), "es");
    }

    #[test]
    fn test_env_substitutions_shape() {
        let subs = env_substitutions();
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].0, "process.env.NODE_ENV");
        // Inlined as a quoted literal
        assert!(subs[0].1.starts_with('"') && subs[0].1.ends_with('"'));
    }

    #[test]
    fn test_process_bundler_missing_entry() {
        let bundler = ProcessBundler::new("rollup");
        let result = bundler.compile(
            Path::new("/nonexistent/index.ts"),
            &RESOLUTION_ORDER,
            Path::new("/nonexistent/tsconfig.json"),
            &[],
        );
        assert!(matches!(result, Err(PublishError::Bundler(_))));
    }

    #[test]
    fn test_mock_bundler_records_calls() {
        let bundler = MockBundler::new();
        let bundle = bundler
            .compile(
                Path::new("a/index.ts"),
                &RESOLUTION_ORDER,
                Path::new("a/tsconfig.json"),
                &[],
            )
            .unwrap();
        bundler
            .write(&bundle, Path::new("a/dist/index.js"), ModuleFormat::Umd, Some("a"))
            .unwrap();

        assert_eq!(bundler.compile_calls().len(), 1);
        assert_eq!(bundler.write_calls().len(), 1);
        assert_eq!(bundler.write_calls()[0].format, ModuleFormat::Umd);
    }
}
