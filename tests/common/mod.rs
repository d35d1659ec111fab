use assert_cmd::Command;
use tempfile::TempDir;

/// A `tally` command whose data directory is an isolated temp dir
pub fn tally_cmd(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tally").unwrap();
    cmd.env("TALLY_DATA_DIR", data_dir.path());
    cmd.env("NO_COLOR", "1");
    cmd.env("CLICOLOR", "0");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Run `tally` with `args` and require success
pub fn tally_ok(data_dir: &TempDir, args: &[&str]) {
    tally_cmd(data_dir).args(args).assert().success();
}
