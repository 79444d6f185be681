//! Process Credentials via POSIX Calls

use platform_traits::process::ProcessInfo;

#[cfg(not(unix))]
use platform_traits::process::UNSUPPORTED_ID;

/// POSIX process credential queries
///
/// Answers the `getuid(2)` family directly on unix hosts. Every query hits
/// the kernel; nothing is cached, so a credential change (setuid, group
/// membership) is visible on the next call.
///
/// Non-unix builds compile and report the sentinel values, keeping the
/// capability total everywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct PosixProcessInfo;

impl PosixProcessInfo {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(unix)]
impl ProcessInfo for PosixProcessInfo {
    fn uid(&self) -> i64 {
        unsafe { libc::getuid() as i64 }
    }

    fn euid(&self) -> i64 {
        unsafe { libc::geteuid() as i64 }
    }

    fn gid(&self) -> i64 {
        unsafe { libc::getgid() as i64 }
    }

    fn egid(&self) -> i64 {
        unsafe { libc::getegid() as i64 }
    }

    fn groups(&self) -> Vec<u32> {
        // getgroups is a two-call protocol: a zero-length query returns the
        // count, the second call fills the buffer. A membership change in
        // between makes the second call fail; treat that as no groups.
        let count = unsafe { libc::getgroups(0, std::ptr::null_mut()) };
        if count <= 0 {
            return Vec::new();
        }

        let mut gids = vec![0 as libc::gid_t; count as usize];
        let written = unsafe { libc::getgroups(count, gids.as_mut_ptr()) };
        if written < 0 {
            return Vec::new();
        }

        gids.truncate(written as usize);
        gids.into_iter().map(|gid| gid as u32).collect()
    }
}

#[cfg(not(unix))]
impl ProcessInfo for PosixProcessInfo {
    fn uid(&self) -> i64 {
        UNSUPPORTED_ID
    }

    fn euid(&self) -> i64 {
        UNSUPPORTED_ID
    }

    fn gid(&self) -> i64 {
        UNSUPPORTED_ID
    }

    fn egid(&self) -> i64 {
        UNSUPPORTED_ID
    }

    fn groups(&self) -> Vec<u32> {
        Vec::new()
    }
}
