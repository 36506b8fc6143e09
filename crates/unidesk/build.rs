use std::fs;
use std::path::Path;

use clap::CommandFactory;

#[path = "src/cli.rs"]
#[allow(dead_code)]
mod cli;

fn main() {
    println!("cargo::rerun-if-changed=src/cli.rs");

    let Some(out_dir) = std::env::var_os("OUT_DIR") else {
        return;
    };
    let man_dir = Path::new(&out_dir).join("man");
    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo::warning=cannot create {}: {e}", man_dir.display());
        return;
    }

    generate_manpages(&cli::Cli::command(), &man_dir);
}

/// Render one page per command, recursing into visible subcommands.
fn generate_manpages(cmd: &clap::Command, dir: &Path) {
    let name = cmd.get_name().to_owned();
    let path = dir.join(format!("{name}.1"));

    let mut buf = Vec::new();
    if let Err(e) = clap_mangen::Man::new(cmd.clone()).render(&mut buf) {
        println!("cargo::warning=man page for `{name}` failed: {e}");
        return;
    }
    if let Err(e) = fs::write(&path, buf) {
        println!("cargo::warning=cannot write {}: {e}", path.display());
        return;
    }

    for sub in cmd.get_subcommands().filter(|s| !s.is_hide_set()) {
        let sub = sub.clone().name(format!("{name}-{}", sub.get_name()));
        generate_manpages(&sub, dir);
    }
}
