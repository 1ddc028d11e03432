//! JavaScript engine detection for the installer harness

use clap::ValueEnum;
use std::fmt;

/// Engines able to run a template's installer script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Engine {
    Bun,
    Node,
}

impl Engine {
    pub fn command(&self) -> &'static str {
        match self {
            Engine::Bun => "bun",
            Engine::Node => "node",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Engine::Bun => "Bun",
            Engine::Node => "Node.js",
        }
    }

    /// Program and leading arguments for evaluating an ES-module snippet.
    /// The snippet itself is appended as the final argument.
    pub fn harness_command(&self) -> (&'static str, &'static [&'static str]) {
        match self {
            Engine::Bun => ("bun", &["-e"]),
            Engine::Node => ("node", &["--input-type=module", "-e"]),
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Check if an engine is available on PATH
pub fn engine_available(engine: Engine) -> bool {
    std::process::Command::new(engine.command())
        .arg("--version")
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}

/// Pick the engine used when no `--engine` flag was given. Bun is preferred
/// when installed, Node.js otherwise.
pub fn default_engine() -> Engine {
    if engine_available(Engine::Bun) {
        Engine::Bun
    } else {
        Engine::Node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harness_command_shapes() {
        let (program, args) = Engine::Bun.harness_command();
        assert_eq!(program, "bun");
        assert_eq!(args, ["-e"]);

        let (program, args) = Engine::Node.harness_command();
        assert_eq!(program, "node");
        assert_eq!(args, ["--input-type=module", "-e"]);
    }
}
