use std::process::Command;

fn main() {
    // Short git commit hash, shown by `--version`
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok();

    let git_hash = output
        .and_then(|o| {
            if o.status.success() {
                String::from_utf8(o.stdout).ok()
            } else {
                None
            }
        })
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    println!(
        "cargo:rustc-env=EXPLORER_VERSION={}-{}",
        std::env::var("CARGO_PKG_VERSION").unwrap_or_default(),
        git_hash
    );

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads/");
}
