use std::ffi::{CString, OsStr, OsString};
use std::os::unix::ffi::OsStrExt;

use crate::error::RunnerError;

// ============================================================================
// CommandSpec - Child Command Specification
// ============================================================================

/// The command the child process becomes: an executable followed by its
/// arguments.
///
/// Arguments are kept as discrete `OsString` elements and handed to `exec`
/// verbatim. No shell is involved, so metacharacters are never interpreted.
///
/// # Example
///
/// ```rust
/// use forkexec_runner::CommandSpec;
/// use std::ffi::OsString;
///
/// let cmd = CommandSpec::new("ls").arg("-l").arg("/tmp");
///
/// assert_eq!(cmd.program, OsString::from("ls"));
/// assert_eq!(cmd.args.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// The executable name or path
    pub program: OsString,
    /// Arguments as discrete elements (NOT shell strings)
    pub args: Vec<OsString>,
}

impl CommandSpec {
    /// Create a new `CommandSpec` with the given program and no arguments.
    #[must_use]
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Build a command from a full argv sequence.
    ///
    /// The first element is the program; the rest are its arguments.
    /// Returns `None` for an empty sequence.
    ///
    /// ```rust
    /// use forkexec_runner::CommandSpec;
    ///
    /// let cmd = CommandSpec::from_argv(["echo", "hi"]).unwrap();
    /// assert_eq!(cmd.args.len(), 1);
    /// assert!(CommandSpec::from_argv(Vec::<String>::new()).is_none());
    /// ```
    pub fn from_argv<I, S>(argv: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let mut argv = argv.into_iter().map(Into::into);
        let program = argv.next()?;
        Some(Self {
            program,
            args: argv.collect(),
        })
    }

    /// Add a single argument to the command.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments to the command.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Iterate over the full argv: program first, then arguments.
    pub fn argv(&self) -> impl Iterator<Item = &OsStr> {
        std::iter::once(self.program.as_os_str()).chain(self.args.iter().map(OsString::as_os_str))
    }

    /// Convert the full argv into NUL-terminated strings for `exec`.
    ///
    /// This allocates, so it must run before forking; the child only borrows
    /// the result.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::InteriorNul`] if an element contains a NUL byte,
    /// which cannot be represented in an exec argv.
    pub fn to_exec_argv(&self) -> Result<Vec<CString>, RunnerError> {
        self.argv()
            .enumerate()
            .map(|(index, element)| {
                CString::new(element.as_bytes()).map_err(|_| RunnerError::InteriorNul { index })
            })
            .collect()
    }

    /// Human-readable rendering for logs.
    #[must_use]
    pub fn display(&self) -> String {
        self.argv()
            .map(|element| element.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
