//! Local hostname resolution.
//!
//! A datagram whose payload equals this machine's name reboots it, so the
//! name is resolved once at startup in this order:
//!
//! 1. The `relay.hostname` config override.
//! 2. `COMPUTERNAME` (Windows), then `HOSTNAME` (Unix shells).
//! 3. `/etc/hostname` (systemd services usually have no `HOSTNAME` variable).
//!
//! Surrounding whitespace is trimmed.  If nothing yields a name the result is
//! empty, and an empty name never matches a payload.

use std::path::Path;

/// Resolves the hostname, preferring `override_name` when set.
pub fn resolve_hostname(override_name: Option<&str>) -> String {
    resolve_from(
        override_name,
        |key| std::env::var(key).ok(),
        Path::new("/etc/hostname"),
    )
}

fn resolve_from(
    override_name: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
    hostname_file: &Path,
) -> String {
    let candidates = override_name
        .map(str::to_string)
        .into_iter()
        .chain(env("COMPUTERNAME"))
        .chain(env("HOSTNAME"))
        .chain(std::fs::read_to_string(hostname_file).ok());

    candidates
        .map(|name| name.trim().to_string())
        .find(|name| !name.is_empty())
        .unwrap_or_default()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
