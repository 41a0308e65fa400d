#![forbid(unsafe_code)]

// Build information logged by hello_server at startup.  Source trees outside
// of git still build; the git values are then reported as unknown.
const UNKNOWN: &str = "unknown";

fn main() {
    set_env("GIT_BRANCH", build_data::get_git_branch());
    set_env("GIT_COMMIT_SHORT", build_data::get_git_commit_short());
    set_env("GIT_DIRTY", build_data::get_git_dirty().map(|d| d.to_string()));
    set_env("SOURCE_TIMESTAMP", build_data::get_source_time().map(build_data::format_timestamp));
    set_env("RUSTC_VERSION", build_data::get_rustc_version());
}

fn set_env(name: &str, value: Result<String, String>) {
    let value = value.unwrap_or_else(|_| UNKNOWN.to_string());
    println!("cargo:rustc-env={}={}", name, value);
}
