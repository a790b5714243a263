//! Fake `sispmctl` for end-to-end tests
//!
//! A POSIX shell script imitating the real tool's flags and output. Outlet
//! states live in files next to the script; every invocation is appended to
//! `calls.log`.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use gembird_core::application::{
    device_queue, shutdown_channel, ControllerConfig, DeviceQueue, ShutdownSender,
    SocketController,
};
use gembird_core::port::time_provider::SystemTimeProvider;
use gembird_infra_system::SispmctlRunner;
use tempfile::TempDir;

const SCRIPT: &str = r#"#!/bin/sh
DIR=$(dirname "$0")
echo "$*" >> "$DIR/calls.log"

SOCKETS=__SOCKETS__
DEVICE=__DEVICE__

outlets() {
    if [ "$1" = "all" ]; then
        i=1
        while [ $i -le $SOCKETS ]; do echo $i; i=$((i+1)); done
    elif [ "$1" -ge 1 ] 2>/dev/null && [ "$1" -le $SOCKETS ]; then
        echo "$1"
    else
        echo "Invalid outlet number given: $1" >&2
        exit 2
    fi
}

state() {
    if [ -f "$DIR/outlet$1" ]; then cat "$DIR/outlet$1"; else echo off; fi
}

dev=""
while [ $# -gt 0 ]; do
    case "$1" in
        -d)
            dev="$2"
            shift 2
            if [ "$dev" != "$DEVICE" ]; then
                echo "Accessing Gembird #$dev failed: no such device" >&2
                exit 1
            fi
            ;;
        -s)
            echo "Gembird #$DEVICE"
            echo "USB information:  bus 001, device 004"
            if [ $SOCKETS -eq 4 ]; then
                echo "device type:      4-socket SiS-PM"
            else
                echo "device type:      1-socket mSiS-PM"
            fi
            exit 0
            ;;
        -o|-f)
            if [ -f "$DIR/fail" ]; then
                cat "$DIR/fail" >&2
                exit 1
            fi
            value=on
            [ "$1" = "-f" ] && value=off
            list=$(outlets "$2") || exit 2
            for n in $list; do
                echo $value > "$DIR/outlet$n"
                echo "Switched outlet $n $value"
            done
            shift 2
            ;;
        -q)
            list=$(outlets "$2") || exit 2
            for n in $list; do state $n; done
            shift 2
            ;;
        -g)
            list=$(outlets "$2") || exit 2
            for n in $list; do printf 'Status of outlet %s:\t%s\n' $n "$(state $n)"; done
            shift 2
            ;;
        *)
            echo "Unknown option $1" >&2
            exit 1
            ;;
    esac
done
exit 0
"#;

pub struct FakeTool {
    dir: TempDir,
    path: PathBuf,
}

impl FakeTool {
    /// Install a fake tool serving device `device` with `sockets` outlets
    pub fn install(device: &str, sockets: u32) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("sispmctl");
        let script = SCRIPT
            .replace("__SOCKETS__", &sockets.to_string())
            .replace("__DEVICE__", device);
        std::fs::write(&path, script).expect("write fake tool");
        make_executable(&path);
        Self { dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Argument lines of every invocation so far
    pub fn calls(&self) -> Vec<String> {
        std::fs::read_to_string(self.dir.path().join("calls.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Make switching fail with `message` on stderr
    pub fn fail_switching(&self, message: &str) {
        std::fs::write(self.dir.path().join("fail"), format!("{}\n", message)).expect("fail file");
    }

    pub fn set_outlet(&self, outlet: u32, on: bool) {
        let value = if on { "on\n" } else { "off\n" };
        std::fs::write(self.dir.path().join(format!("outlet{}", outlet)), value)
            .expect("outlet file");
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).expect("chmod");
}

pub fn controller(tool: &Path, device_id: &str) -> SocketController {
    let runner = SispmctlRunner::new(tool, Arc::new(SystemTimeProvider)).with_debug(true);
    SocketController::new(
        ControllerConfig::new(device_id).with_debug(true),
        Arc::new(runner),
    )
}

/// Spawn a device worker; keep the sender alive for the worker's lifetime
pub fn spawn_queue(tool: &Path, device_id: &str) -> (DeviceQueue, ShutdownSender) {
    let (queue, worker) = device_queue(controller(tool, device_id), 8);
    let (shutdown_tx, shutdown_rx) = shutdown_channel();
    tokio::spawn(worker.run(shutdown_rx));
    (queue, shutdown_tx)
}
