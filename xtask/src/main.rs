//! Build automation tasks for Reality Collapsing
//!
//! Usage:
//!   cargo xtask package          # Release build + dist/RealityCollapsing[.exe] + dist/assets
//!   cargo xtask package --target x86_64-pc-windows-gnu
//!   cargo xtask clean-dist       # Remove dist/

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Cargo binary name of the game
const BIN_NAME: &str = "reality-collapsing";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for Reality Collapsing")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a release executable and stage it with its assets
    Package {
        /// Target triple to cross-compile for (defaults to the host)
        #[arg(long)]
        target: Option<String>,
        /// Executable name inside the dist folder
        #[arg(long, default_value = "RealityCollapsing")]
        name: String,
        /// Output folder, relative to the project root
        #[arg(long, default_value = "dist")]
        dist: PathBuf,
    },
    /// Remove the dist folder
    CleanDist {
        #[arg(long, default_value = "dist")]
        dist: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Package { target, name, dist } => package(target.as_deref(), &name, &dist),
        Commands::CleanDist { dist } => {
            let root = project_root()?;
            clean_dist(&root, &root.join(dist))
        }
    }
}

/// Get the project root directory
fn project_root() -> Result<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("xtask manifest has no parent directory")
}

/// Run a command and check for success
fn run_cmd(cmd: &mut Command) -> Result<()> {
    let status = cmd.status().context("Failed to execute command")?;
    if !status.success() {
        anyhow::bail!("Command failed with status: {}", status);
    }
    Ok(())
}

/// Whether the build output is a Windows executable
fn targets_windows(target: Option<&str>) -> bool {
    match target {
        Some(triple) => triple.contains("windows"),
        None => cfg!(windows),
    }
}

/// `name` with `.exe` appended for Windows builds
fn exe_name(name: &str, target: Option<&str>) -> String {
    if targets_windows(target) {
        format!("{}.exe", name)
    } else {
        name.to_string()
    }
}

/// Where cargo leaves the release binary
fn release_binary(root: &Path, target: Option<&str>) -> PathBuf {
    let mut dir = root.join("target");
    if let Some(triple) = target {
        dir = dir.join(triple);
    }
    dir.join("release").join(exe_name(BIN_NAME, target))
}

/// Copy directory recursively
fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    std::fs::create_dir_all(dst)?;
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)
                .with_context(|| format!("Failed to copy {}", src_path.display()))?;
        }
    }
    Ok(())
}

/// Refuse to remove `dist` unless it is a folder strictly inside `root`
/// that holds none of `keep`
fn check_dist(root: &Path, dist: &Path, keep: &[&Path]) -> Result<()> {
    if !dist.exists() {
        return Ok(());
    }
    let root = root
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", root.display()))?;
    let dist = dist
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", dist.display()))?;

    if dist == root || !dist.starts_with(&root) {
        anyhow::bail!("Refusing to remove {}: dist must be a folder inside {}", dist.display(), root.display());
    }
    for path in keep {
        if let Ok(kept) = path.canonicalize() {
            if kept.starts_with(&dist) {
                anyhow::bail!("Refusing to remove {}: it contains {}", dist.display(), kept.display());
            }
        }
    }
    Ok(())
}

/// Recreate `dist` holding `exe_file_name` and a copy of `assets`
fn stage_dist(root: &Path, binary: &Path, assets: &Path, dist: &Path, exe_file_name: &str) -> Result<PathBuf> {
    if !assets.is_dir() {
        anyhow::bail!("Assets folder not found at {}", assets.display());
    }
    check_dist(root, dist, &[assets, binary])?;

    if dist.exists() {
        std::fs::remove_dir_all(dist).with_context(|| format!("Failed to remove {}", dist.display()))?;
    }
    std::fs::create_dir_all(dist)?;

    let exe = dist.join(exe_file_name);
    std::fs::copy(binary, &exe)
        .with_context(|| format!("Failed to copy {} (did the build succeed?)", binary.display()))?;

    copy_dir_recursive(assets, &dist.join("assets"))?;
    Ok(exe)
}

/// Build a release executable and stage it next to `assets/`
fn package(target: Option<&str>, name: &str, dist: &Path) -> Result<()> {
    let root = project_root()?;
    let dist = root.join(dist);

    println!("Building release{}...", target.map(|t| format!(" for {}", t)).unwrap_or_default());
    let mut cmd = Command::new("cargo");
    cmd.current_dir(&root).args(["build", "--release", "--bin", BIN_NAME]);
    if let Some(triple) = target {
        cmd.args(["--target", triple]);
    }
    run_cmd(&mut cmd)?;

    println!("Staging {}...", dist.display());
    let exe = stage_dist(
        &root,
        &release_binary(&root, target),
        &root.join("assets"),
        &dist,
        &exe_name(name, target),
    )?;

    println!("\nDone! Packaged:");
    println!("  {}", exe.display());
    println!("  {}", dist.join("assets").display());
    Ok(())
}

fn clean_dist(root: &Path, dist: &Path) -> Result<()> {
    check_dist(root, dist, &[&root.join("assets")])?;
    if dist.exists() {
        std::fs::remove_dir_all(dist).with_context(|| format!("Failed to remove {}", dist.display()))?;
        println!("Removed {}", dist.display());
    } else {
        println!("Nothing to clean at {}", dist.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(path: &Path, contents: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_exe_name_follows_target() {
        assert_eq!(exe_name("RealityCollapsing", Some("x86_64-pc-windows-msvc")), "RealityCollapsing.exe");
        assert_eq!(exe_name("RealityCollapsing", Some("x86_64-unknown-linux-gnu")), "RealityCollapsing");
        let host = exe_name("RealityCollapsing", None);
        assert_eq!(host.ends_with(".exe"), cfg!(windows));
    }

    #[test]
    fn test_release_binary_path() {
        let root = Path::new("/proj");
        assert_eq!(
            release_binary(root, Some("x86_64-pc-windows-gnu")),
            root.join("target/x86_64-pc-windows-gnu/release/reality-collapsing.exe")
        );
        assert_eq!(
            release_binary(root, Some("aarch64-apple-darwin")),
            root.join("target/aarch64-apple-darwin/release/reality-collapsing")
        );
    }

    #[test]
    fn test_copy_dir_recursive() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        write(&src.join("music/title.ogg"), "ogg");
        write(&src.join("branding/logo.png"), "png");

        let dst = tmp.path().join("dst");
        copy_dir_recursive(&src, &dst).unwrap();
        assert_eq!(std::fs::read_to_string(dst.join("music/title.ogg")).unwrap(), "ogg");
        assert!(dst.join("branding/logo.png").is_file());
    }

    #[test]
    fn test_stage_dist_layout() {
        let tmp = TempDir::new().unwrap();
        let binary = tmp.path().join("target/release/reality-collapsing");
        write(&binary, "binary");
        let assets = tmp.path().join("assets");
        write(&assets.join("sfx/menu_move.wav"), "wav");
        let dist = tmp.path().join("dist");
        // Stale output is replaced
        write(&dist.join("old.txt"), "stale");

        let exe = stage_dist(tmp.path(), &binary, &assets, &dist, "RealityCollapsing.exe").unwrap();
        assert_eq!(exe, dist.join("RealityCollapsing.exe"));
        assert_eq!(std::fs::read_to_string(&exe).unwrap(), "binary");
        assert!(dist.join("assets/sfx/menu_move.wav").is_file());
        assert!(!dist.join("old.txt").exists());
    }

    #[test]
    fn test_stage_dist_requires_assets() {
        let tmp = TempDir::new().unwrap();
        let binary = tmp.path().join("bin");
        write(&binary, "binary");
        let err = stage_dist(tmp.path(), &binary, &tmp.path().join("assets"), &tmp.path().join("dist"), "Game").unwrap_err();
        assert!(err.to_string().contains("Assets folder not found"));
        assert!(!tmp.path().join("dist").exists());
    }

    #[test]
    fn test_stage_dist_refuses_project_root() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("proj");
        write(&root.join("src/main.rs"), "fn main() {}");
        let binary = root.join("target/release/reality-collapsing");
        write(&binary, "binary");
        let assets = root.join("assets");
        write(&assets.join("music/title.ogg"), "ogg");

        for dist in [root.join("."), root.join(".."), root.join("target")] {
            let err = stage_dist(&root, &binary, &assets, &dist, "Game").unwrap_err();
            assert!(err.to_string().contains("Refusing to remove"));
        }
        assert!(root.join("src/main.rs").is_file());
        assert!(assets.join("music/title.ogg").is_file());
        assert!(binary.is_file());
    }

    #[test]
    fn test_stage_dist_missing_binary() {
        let tmp = TempDir::new().unwrap();
        let assets = tmp.path().join("assets");
        std::fs::create_dir_all(&assets).unwrap();
        let result = stage_dist(tmp.path(), &tmp.path().join("nope"), &assets, &tmp.path().join("dist"), "Game");
        assert!(result.is_err());
    }

    #[test]
    fn test_clean_dist() {
        let tmp = TempDir::new().unwrap();
        let dist = tmp.path().join("dist");
        write(&dist.join("Game"), "x");
        clean_dist(tmp.path(), &dist).unwrap();
        assert!(!dist.exists());
        // Already clean is fine
        clean_dist(tmp.path(), &dist).unwrap();
    }

    #[test]
    fn test_clean_dist_refuses_project_and_parents() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("proj");
        write(&root.join("src/main.rs"), "fn main() {}");
        write(&root.join("assets/branding/logo.png"), "png");

        for dist in [root.join("."), root.join(".."), root.join("assets"), tmp.path().to_path_buf()] {
            assert!(clean_dist(&root, &dist).is_err(), "{} was accepted", dist.display());
        }
        assert!(root.join("src/main.rs").is_file());
        assert!(root.join("assets/branding/logo.png").is_file());
    }
}
