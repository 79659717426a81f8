//! Package compilation and bundling.

use std::path::Path;

use tracing::debug;

use super::npm::run_npm;

/// Outcome of the compile+package steps. Failures are reported, never
/// thrown; the orchestrator decides whether they are fatal.
#[derive(Debug)]
pub struct BuildOutcome {
    pub success: bool,
    pub output: String,
}

/// Run the compile step then the package step in the plugin directory.
///
/// Executes for real even in dry-run mode so build breakage is caught on
/// every run; dry-run only discards the artifacts downstream.
pub fn build_package(dir: &Path) -> BuildOutcome {
    debug!(dir = %dir.display(), "Running compile step (npm run tsc)");
    let compile = run_npm(dir, &["run", "tsc"]);
    if !compile.success {
        return BuildOutcome {
            success: false,
            output: compile.combined(),
        };
    }

    debug!(dir = %dir.display(), "Running package step (npm run build)");
    let package = run_npm(dir, &["run", "build"]);
    let mut output = compile.combined();
    if !output.is_empty() {
        output.push('\n');
    }
    output.push_str(&package.combined());

    BuildOutcome {
        success: package.success,
        output,
    }
}
