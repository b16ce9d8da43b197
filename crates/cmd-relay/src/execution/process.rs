//! Child process spawning with stdout/stderr redirected into pipes

use log::debug;
use nix::errno::Errno;
use nix::sys::wait::waitpid;
use nix::unistd::{AccessFlags, ForkResult, Pid, access, fork};
use relay_core::{ChildResult, FATAL_EXIT_CODE, RelayError, Result};
use std::ffi::CString;
use std::fs;
use std::os::raw::c_char;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

use crate::args::ArgumentVector;
use crate::execution::pipe::{ChildFds, PipePair};

/// Everything the forked child needs, prepared before the fork so the child
/// never allocates.
#[derive(Debug)]
pub struct ChildCommand {
    program: PathBuf,
    argv: Vec<CString>,
    argv_ptrs: Vec<*const c_char>,
    exec_failure: Vec<u8>,
}

impl ChildCommand {
    /// argv[0] is the program path itself, followed by `args`.
    pub fn new(program: &Path, args: &ArgumentVector) -> Result<Self> {
        let program_cstring = CString::new(program.as_os_str().as_bytes()).map_err(|_| {
            RelayError::InvalidArgument("program path contains nul byte".to_string())
        })?;

        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push(program_cstring);
        for arg in args {
            let arg_cstring = CString::new(arg.as_str()).map_err(|_| {
                RelayError::InvalidArgument(format!("argument contains nul byte: {:?}", arg))
            })?;
            argv.push(arg_cstring);
        }

        // CString data lives on the heap, so these stay valid as `self` moves.
        let mut argv_ptrs: Vec<*const c_char> = argv.iter().map(|s| s.as_ptr()).collect();
        argv_ptrs.push(std::ptr::null());

        let exec_failure =
            format!("Failed to execute binary: {}\n", program.display()).into_bytes();

        Ok(Self {
            program: program.to_path_buf(),
            argv,
            argv_ptrs,
            exec_failure,
        })
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn argv(&self) -> &[CString] {
        &self.argv
    }
}

/// Fail early when `program` is not an executable regular file.
pub fn ensure_executable(program: &Path) -> Result<()> {
    let is_file = fs::metadata(program).map(|m| m.is_file()).unwrap_or(false);
    if !is_file || access(program, AccessFlags::X_OK).is_err() {
        return Err(RelayError::BinaryNotFound(program.to_path_buf()));
    }
    Ok(())
}

/// Fork a child that writes into `pipes` and execs `command`.
///
/// Returns the child's pid in the parent. The child never returns from this
/// call: it either becomes `command` or exits with the fatal code.
pub fn spawn_child(command: &ChildCommand, pipes: &PipePair) -> Result<Pid> {
    let fds = pipes.child_fds();

    // SAFETY: the child branch only calls async-signal-safe functions on data
    // prepared before the fork.
    match unsafe { fork() } {
        Ok(ForkResult::Parent { child }) => {
            debug!(
                "Spawned child {} for {}",
                child,
                command.program.display()
            );
            Ok(child)
        }
        Ok(ForkResult::Child) => exec_in_child(command, fds),
        Err(e) => Err(RelayError::Spawn(e.to_string())),
    }
}

/// Child side of [`spawn_child`]
fn exec_in_child(command: &ChildCommand, fds: ChildFds) -> ! {
    // SAFETY: FDs are valid copies inherited from the parent and we're in a
    // single-threaded child about to exec
    unsafe {
        if libc::dup2(fds.stdout_write, libc::STDOUT_FILENO) < 0 {
            libc::_exit(FATAL_EXIT_CODE);
        }
        if libc::dup2(fds.stderr_write, libc::STDERR_FILENO) < 0 {
            libc::_exit(FATAL_EXIT_CODE);
        }

        for fd in fds.all() {
            if fd > libc::STDERR_FILENO {
                libc::close(fd);
            }
        }

        libc::execv(command.argv[0].as_ptr(), command.argv_ptrs.as_ptr());

        // Only reached when exec failed; stderr is already the pipe.
        libc::write(
            libc::STDERR_FILENO,
            command.exec_failure.as_ptr() as *const libc::c_void,
            command.exec_failure.len(),
        );
        libc::_exit(FATAL_EXIT_CODE)
    }
}

/// Block until `pid` terminates and classify how it ended.
pub fn wait_for_child(pid: Pid) -> Result<ChildResult> {
    loop {
        match waitpid(pid, None) {
            Ok(status) => {
                debug!("Child {} reported {:?}", pid, status);
                return Ok(ChildResult::from(status));
            }
            Err(Errno::EINTR) => continue,
            Err(e) => return Err(RelayError::Wait(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serial_guard;
    use std::fs::File;
    use std::io::Read;

    fn read_all(fd: std::os::fd::OwnedFd) -> String {
        let mut contents = String::new();
        File::from(fd).read_to_string(&mut contents).unwrap();
        contents
    }

    #[test]
    fn child_command_prefixes_program_path() {
        let args = ArgumentVector::with_mode("-C", "INFORMIX", "preproc/notice_informix.pgc");
        let command = ChildCommand::new(Path::new("/bin/echo"), &args).unwrap();

        let argv: Vec<&str> = command.argv().iter().map(|s| s.to_str().unwrap()).collect();
        assert_eq!(
            argv,
            vec!["/bin/echo", "-C", "INFORMIX", "preproc/notice_informix.pgc"]
        );
        assert_eq!(command.argv_ptrs.len(), 5);
        assert!(command.argv_ptrs[4].is_null());
    }

    #[test]
    fn child_command_rejects_nul_bytes() {
        let args = ArgumentVector::single("bad\0name");
        let err = ChildCommand::new(Path::new("/bin/echo"), &args).unwrap_err();
        assert!(matches!(err, RelayError::InvalidArgument(_)));
    }

    #[test]
    fn ensure_executable_checks_file_and_mode() {
        assert!(ensure_executable(Path::new("/bin/sh")).is_ok());
        assert!(matches!(
            ensure_executable(Path::new("/nonexistent/ecpg")),
            Err(RelayError::BinaryNotFound(_))
        ));
        assert!(ensure_executable(Path::new("/")).is_err());
    }

    #[test]
    fn wait_for_child_returns_exit_status() {
        let _guard = serial_guard();
        match unsafe { fork() } {
            Ok(ForkResult::Child) => unsafe { libc::_exit(42) },
            Ok(ForkResult::Parent { child }) => {
                let result = wait_for_child(child).unwrap();
                assert_eq!(result, ChildResult::NormalExit { code: 42 });
            }
            Err(e) => panic!("fork failed: {}", e),
        }
    }

    #[test]
    fn wait_for_child_with_signal() {
        let _guard = serial_guard();
        match unsafe { fork() } {
            Ok(ForkResult::Child) => unsafe {
                libc::raise(libc::SIGTERM);
                libc::_exit(1);
            },
            Ok(ForkResult::Parent { child }) => {
                let result = wait_for_child(child).unwrap();
                assert_eq!(
                    result,
                    ChildResult::KilledBySignal {
                        signal: libc::SIGTERM
                    }
                );
            }
            Err(e) => panic!("fork failed: {}", e),
        }
    }

    #[test]
    fn wait_for_unknown_pid_fails() {
        let err = wait_for_child(Pid::from_raw(i32::MAX)).unwrap_err();
        assert!(matches!(err, RelayError::Wait(_)));
    }

    #[test]
    fn spawned_child_writes_into_pipes() {
        let _guard = serial_guard();
        let pipes = PipePair::open().unwrap();
        let args = ArgumentVector::single("captured");
        let command = ChildCommand::new(Path::new("/bin/echo"), &args).unwrap();

        let pid = spawn_child(&command, &pipes).unwrap();
        let (stdout_read, stderr_read) = pipes.into_read_ends();
        let result = wait_for_child(pid).unwrap();

        assert_eq!(result, ChildResult::NormalExit { code: 0 });
        assert_eq!(read_all(stdout_read), "captured\n");
        assert_eq!(read_all(stderr_read), "");
    }

    #[test]
    fn exec_failure_exits_with_fatal_code() {
        let _guard = serial_guard();
        let pipes = PipePair::open().unwrap();
        let args = ArgumentVector::single("preproc/notice.pgc");
        let command = ChildCommand::new(Path::new("/nonexistent/ecpg"), &args).unwrap();

        let pid = spawn_child(&command, &pipes).unwrap();
        let (stdout_read, stderr_read) = pipes.into_read_ends();
        let result = wait_for_child(pid).unwrap();

        assert_eq!(result, ChildResult::NormalExit { code: 2 });
        assert_eq!(read_all(stdout_read), "");
        assert_eq!(
            read_all(stderr_read),
            "Failed to execute binary: /nonexistent/ecpg\n"
        );
    }
}
