//! Shared test utilities.

#![allow(dead_code)]

use std::io;
use std::net::{IpAddr, Ipv4Addr};

use codeserver::args::AddressResolver;
use codeserver::{ArgError, Options};
use tempfile::TempDir;

/// Hostname reported for this machine by [`FakeResolver`].
pub const LOCAL_HOSTNAME: &str = "buildhost.example.com";

/// Resolver with a fixed host table, so tests never touch DNS.
pub struct FakeResolver;

impl AddressResolver for FakeResolver {
    fn resolve(&self, host: &str) -> io::Result<IpAddr> {
        match host {
            "devbox" => Ok(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 20))),
            _ => host
                .parse()
                .map_err(|_| io::Error::new(io::ErrorKind::NotFound, "unknown host")),
        }
    }

    fn local_hostname(&self) -> io::Result<String> {
        Ok(LOCAL_HOSTNAME.to_string())
    }
}

pub fn raw_args(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

pub fn parse(args: &[&str]) -> Result<Options, ArgError> {
    Options::parse_args_with(&raw_args(args), &FakeResolver)
}

/// Temporary directory holding the named subdirectories.
pub fn temp_dirs(names: &[&str]) -> TempDir {
    let root = TempDir::new().expect("Failed to create temp dir");
    for name in names {
        std::fs::create_dir(root.path().join(name)).expect("Failed to create subdir");
    }
    root
}

/// Path of `name` under `root`, as a command-line token.
pub fn path_arg(root: &TempDir, name: &str) -> String {
    root.path().join(name).display().to_string()
}
