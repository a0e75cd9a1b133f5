//! Runtime detection for Docker and Docker Compose

use std::process::Command;

/// Compose commands in order of preference, with the arguments that print their version
const COMPOSE_COMMANDS: &[(&str, &[&str], &str)] = &[
    ("docker", &["compose", "version", "--short"], "docker compose"),
    ("docker-compose", &["version", "--short"], "docker-compose"),
];

/// Runtime detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

/// Run `program args...` and return its trimmed stdout if it exits successfully
fn probe(program: &str, args: &[&str]) -> Option<String> {
    match Command::new(program).args(args).output() {
        Ok(out) if out.status.success() => {
            Some(String::from_utf8_lossy(&out.stdout).trim().to_string())
        }
        _ => None,
    }
}

/// Check if the Docker engine CLI is available
pub fn check_docker() -> RuntimeInfo {
    let version = probe("docker", &["--version"]);
    RuntimeInfo {
        name: "Docker",
        available: version.is_some(),
        version,
    }
}

/// Check for a Compose implementation, preferring the `docker compose` plugin
pub fn check_compose() -> RuntimeInfo {
    for (program, args, label) in COMPOSE_COMMANDS {
        if let Some(version) = probe(program, args) {
            return RuntimeInfo {
                name: *label,
                version: Some(version),
                available: true,
            };
        }
    }
    RuntimeInfo {
        name: "Docker Compose",
        version: None,
        available: false,
    }
}

/// Command to print in instructions for a `check_compose` result;
/// falls back to the plugin form when nothing was found
pub fn compose_command(compose: &RuntimeInfo) -> &'static str {
    if compose.available {
        compose.name
    } else {
        COMPOSE_COMMANDS[0].2
    }
}

/// Check everything needed to run the generated project. Results are advisory:
/// missing tools are reported, never treated as failure.
pub fn check_container_runtime() -> Vec<RuntimeInfo> {
    let docker = check_docker();
    let compose = check_compose();
    tracing::debug!(
        docker = docker.available,
        compose = compose.available,
        "container runtime detected"
    );
    vec![docker, compose]
}
