use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod manifest;
mod rewrite;
mod sync;

use manifest::Manifest;
use sync::Synchronizer;

#[derive(Parser, Debug)]
#[command(
    name = "sync-versions",
    version,
    about = "Sync pinned NetBox/plugin versions from versions.yaml into build artifacts"
)]
struct Cli {
    /// Only verify files are in sync; exit non-zero listing any drift
    #[arg(long)]
    check: bool,

    /// Repository root containing versions.yaml and the netbox/ directory
    #[arg(long, value_name = "DIR", default_value = ".")]
    root: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    run(&cli.root, cli.check)
}

fn run(root: &Path, check: bool) -> Result<()> {
    let manifest = Manifest::load(&root.join("versions.yaml"))?;

    let dockerfile_path = root.join("netbox").join("Dockerfile");
    let build_yaml_path = root.join("netbox").join("build.yaml");
    let changelog_path = root.join("netbox").join("CHANGELOG.md");

    let mut sync = Synchronizer::new(check);

    let dockerfile = read_target(&dockerfile_path)?;
    sync.apply(&dockerfile_path, &rewrite::dockerfile(&manifest, &dockerfile)?)?;

    let build_yaml = read_target(&build_yaml_path)?;
    sync.apply(&build_yaml_path, &rewrite::build_manifest(&manifest, &build_yaml))?;

    sync.apply(&changelog_path, &rewrite::changelog(&manifest)?)?;

    sync.finish(root)
}

fn read_target(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}
