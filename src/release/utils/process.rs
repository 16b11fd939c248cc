//! External command execution.
//!
//! Both external tools (the build tool and the packaging tool) are run
//! through [`CommandRunner`], which takes an [`Invocation`] and reports how
//! the process exited. The driver awaits every invocation to completion
//! before moving on; there is no timeout.

use crate::release::error::{Error, Result};
use std::{
    ffi::OsString,
    fmt,
    path::{Path, PathBuf},
    process::{ExitStatus, Stdio},
};

/// A fully specified external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: PathBuf,
    args: Vec<OsString>,
}

impl Invocation {
    /// Starts an invocation of `program` with no arguments.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Appends one argument.
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments in order.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Program to execute.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments, in order. Paths are passed through without lossy
    /// conversion.
    pub fn arguments(&self) -> &[OsString] {
        &self.args
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            let arg = arg.to_string_lossy();
            if arg.contains(char::is_whitespace) {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// How an external process finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exit {
    code: Option<i32>,
}

impl Exit {
    /// Exit with the given status code.
    pub fn code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    /// Termination without an exit code (killed by a signal).
    pub fn signaled() -> Self {
        Self { code: None }
    }

    /// Whether the process exited with status zero.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Raw exit code, if the process exited normally.
    pub fn exit_code(&self) -> Option<i32> {
        self.code
    }
}

impl From<ExitStatus> for Exit {
    fn from(status: ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

/// Runs an external command and reports its exit.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Runs `invocation` to completion.
    ///
    /// Returns [`Error::CommandFailed`] only when the process could not be
    /// started or waited on; an unsuccessful exit is reported via [`Exit`].
    async fn run(&self, invocation: &Invocation) -> Result<Exit>;
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    async fn run(&self, invocation: &Invocation) -> Result<Exit> {
        (**self).run(invocation).await
    }
}

/// [`CommandRunner`] that spawns real processes with `tokio::process`.
///
/// Child stdout/stderr are inherited so tool output streams straight to
/// the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioCommandRunner;

impl CommandRunner for TokioCommandRunner {
    async fn run(&self, invocation: &Invocation) -> Result<Exit> {
        log::debug!("Spawning: {invocation}");

        let status = tokio::process::Command::new(invocation.program())
            .args(invocation.arguments())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| Error::CommandFailed {
                command: invocation.program().display().to_string(),
                error: e,
            })?;

        log::debug!("{} exited with {:?}", invocation.program().display(), status.code());
        Ok(Exit::from(status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_quotes_arguments_with_spaces() {
        let invocation = Invocation::new("msbuild")
            .arg("CBP.sln")
            .arg("-p:Configuration=Release MT;OutDir=tmp/Release MT");
        assert_eq!(
            invocation.to_string(),
            "msbuild CBP.sln \"-p:Configuration=Release MT;OutDir=tmp/Release MT\""
        );
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_arguments_are_kept_verbatim() {
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

        let raw = OsStr::from_bytes(b"/proj/\xff/CBP.sln");
        let invocation = Invocation::new("msbuild").arg(raw);
        assert_eq!(invocation.arguments()[0].as_bytes(), raw.as_bytes());
        assert_eq!(invocation.to_string(), "msbuild /proj/\u{FFFD}/CBP.sln");
    }

    #[test]
    fn only_zero_is_success() {
        assert!(Exit::code(0).success());
        assert!(!Exit::code(1).success());
        assert!(!Exit::signaled().success());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn tokio_runner_reports_exit_codes() {
        let ok = TokioCommandRunner
            .run(&Invocation::new("sh").args(["-c", "exit 0"]))
            .await
            .unwrap();
        assert!(ok.success());

        let failed = TokioCommandRunner
            .run(&Invocation::new("sh").args(["-c", "exit 3"]))
            .await
            .unwrap();
        assert_eq!(failed.exit_code(), Some(3));
    }

    #[tokio::test]
    async fn tokio_runner_reports_spawn_failures() {
        let err = TokioCommandRunner
            .run(&Invocation::new("/definitely/not/a/real/tool"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::CommandFailed { .. }));
    }
}
