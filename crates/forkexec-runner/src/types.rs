//! Types used by the runner module

/// How the child resolves the executable named in its command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathResolution {
    /// Search the `PATH` environment variable (`execvp`)
    #[default]
    Search,
    /// Use the given path literally (`execv`)
    Literal,
}

impl PathResolution {
    /// Convert the resolution mode to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Literal => "literal",
        }
    }

    #[must_use]
    pub const fn searches_path(&self) -> bool {
        matches!(self, Self::Search)
    }
}

/// Invocation options for a single launch.
///
/// Parsed once at startup and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LaunchOptions {
    /// Print process id and termination lines to standard output
    pub verbose: bool,
    /// Executable resolution mode for the child
    pub resolution: PathResolution,
}
