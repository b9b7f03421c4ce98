use std::path::Path;
use std::process::Command;

fn main() {
    // Declare custom cfg for cargo check-cfg
    println!("cargo::rustc-check-cfg=cfg(distribute)");

    // Inject git version info
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=GIT_VERSION={}", output);

    // Enable cfg(distribute) for distribute profile. PROFILE only reports
    // "release" for inherited profiles, so read it off target/<profile>/.
    if is_distribute_profile() {
        println!("cargo:rustc-cfg=distribute");
    }

    println!("cargo:rerun-if-changed=.git/HEAD");

    // Embedded templates are picked up by include_dir, which cargo does not track
    println!("cargo:rerun-if-changed=templates");
}

/// OUT_DIR is target/<profile>/build/<pkg>-<hash>/out (with an extra
/// target-triple level when cross compiling).
fn is_distribute_profile() -> bool {
    std::env::var("OUT_DIR").is_ok_and(|dir| {
        Path::new(&dir)
            .ancestors()
            .nth(3)
            .and_then(Path::file_name)
            .is_some_and(|profile| profile == "distribute")
    })
}
