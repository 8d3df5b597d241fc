use std::process::Command;

/// First line of a command's stdout, or "unknown" when it cannot be run.
fn command_output(program: &str, args: &[&str]) -> String {
    Command::new(program)
        .args(args)
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

fn main() {
    // Release builds pass these in; local builds ask git and date
    let git_sha = std::env::var("GIT_SHA")
        .unwrap_or_else(|_| command_output("git", &["rev-parse", "--short", "HEAD"]));
    let build_date = std::env::var("BUILD_DATE")
        .unwrap_or_else(|_| command_output("date", &["+%Y-%m-%d"]));

    println!("cargo:rustc-env=GIT_SHA={}", git_sha);
    println!("cargo:rustc-env=BUILD_DATE={}", build_date);
    println!("cargo:rerun-if-env-changed=GIT_SHA");
    println!("cargo:rerun-if-env-changed=BUILD_DATE");
}
