use std::process::{Command, Stdio};

use crate::error::{Error, Result};

/// Runs external programs attached to the caller's stdio.
pub(crate) trait CommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<()>;
}

/// Spawns real child processes resolved from `PATH`.
pub(crate) struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<()> {
        log::debug!("running {program} {}", args.join(" "));

        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| Error::Spawn {
                program: program.to_string(),
                source,
            })?;

        if !status.success() {
            return Err(Error::ChildProcess {
                program: program.to_string(),
                status,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Records every invocation and fails on the ones listed in `failing`.
    #[derive(Default)]
    pub(crate) struct RecordingRunner {
        pub calls: RefCell<Vec<Vec<String>>>,
        pub failing: Vec<&'static str>,
    }

    impl CommandRunner for RecordingRunner {
        fn run(&self, program: &str, args: &[&str]) -> Result<()> {
            let mut call = vec![program.to_string()];
            call.extend(args.iter().map(|arg| arg.to_string()));
            let joined = call.join(" ");
            self.calls.borrow_mut().push(call);

            if self.failing.iter().any(|failing| *failing == joined) {
                return Err(Error::ChildProcess {
                    program: program.to_string(),
                    status: failed_status(),
                });
            }
            Ok(())
        }
    }

    fn failed_status() -> std::process::ExitStatus {
        use std::os::unix::process::ExitStatusExt;
        std::process::ExitStatus::from_raw(1 << 8)
    }

    #[test]
    fn zero_exit_is_success() {
        SystemRunner.run("true", &[]).unwrap();
    }

    #[test]
    fn nonzero_exit_carries_status() {
        let err = SystemRunner.run("sh", &["-c", "exit 3"]).unwrap_err();

        match err {
            Error::ChildProcess { program, status } => {
                assert_eq!(program, "sh");
                assert_eq!(status.code(), Some(3));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn unknown_program_fails_to_spawn() {
        let err = SystemRunner
            .run("clash-tools-no-such-program", &[])
            .unwrap_err();

        assert!(matches!(err, Error::Spawn { .. }));
    }
}
