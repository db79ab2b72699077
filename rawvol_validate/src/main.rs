use anyhow::{Result, anyhow};
use clap::Parser;
use rawvol_core::apparmor::SnippetSet;
use rawvol_core::config::{SlotManifest, is_manifest_file};
use rawvol_core::host::{Attrs, ConnectedPlug, ConnectedSlot, PlugInfo, SlotInfo};
use rawvol_core::registry::Registry;
use rawvol_core::udev::TagSet;
use serde_json::json;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{error, info, instrument};

/// Raw volume slot manifest validator
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = "Validates raw-volume slot declarations and optionally prints the access-control and device tag artifacts a connection would receive."
)]
struct Cli {
    /// Directory containing slot manifests (.json or .toml), a comma-separated list of files, or blank to validate '.rawvol/slots'.
    #[arg(default_value = ".rawvol/slots")]
    validation_target: String,

    /// Print the artifacts generated for every valid slot as JSON on stdout.
    #[arg(long)]
    render: bool,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    debug: bool,
}

#[instrument]
fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.debug { "debug" } else { "info" };
    rawvol_core::utils::logging::init_logging(log_level, false)?;

    if run_validation_mode(&cli)? {
        info!("All slot declarations are valid.");
        Ok(())
    } else {
        Err(anyhow!(
            "Some slot declarations are invalid. Please check the error messages above."
        ))
    }
}

fn run_validation_mode(cli: &Cli) -> Result<bool> {
    let mut all_valid = true;
    let registry = Registry::with_builtins();

    let targets: Vec<String> = cli
        .validation_target
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let mut files_to_validate = Vec::new();
    for target in targets {
        let path = PathBuf::from(target);
        if path.is_dir() {
            files_to_validate.extend(get_manifest_files(&path)?);
        } else if path.is_file() {
            files_to_validate.push(path);
        } else {
            error!("Validation target not found: {}", path.display());
            all_valid = false;
        }
    }

    let mut rendered = Vec::new();
    for file_path in files_to_validate {
        let manifest = match SlotManifest::load_from_file(&file_path) {
            Ok(m) => m,
            Err(e) => {
                error!("{}", e);
                all_valid = false;
                continue;
            }
        };

        for declaration in &manifest.slots {
            let slot = declaration.to_slot_info();
            match registry.prepare_slot(&slot) {
                Ok(()) => {
                    info!(
                        "{}: slot {}:{} is valid.",
                        file_path.display(),
                        slot.snap,
                        slot.name
                    );
                    if cli.render {
                        rendered.push(render_artifacts(&registry, &file_path, slot)?);
                    }
                }
                Err(e) => {
                    error!(
                        "{}: slot {}:{} rejected ({}): {}",
                        file_path.display(),
                        slot.snap,
                        slot.name,
                        e.kind(),
                        e
                    );
                    all_valid = false;
                }
            }
        }
    }

    if cli.render {
        println!("{}", serde_json::to_string_pretty(&rendered)?);
    }

    Ok(all_valid)
}

/// Connect a placeholder plug to `slot` and collect what each subsystem receives.
fn render_artifacts(
    registry: &Registry,
    file_path: &Path,
    slot: SlotInfo,
) -> Result<serde_json::Value> {
    let iface = registry
        .get(&slot.interface)
        .ok_or_else(|| anyhow!("interface {} disappeared", slot.interface))?;

    let plug = ConnectedPlug::new(
        PlugInfo::new("consumer", slot.name.clone(), slot.interface.clone()),
        Attrs::new(),
    );
    let snap = slot.snap.clone();
    let name = slot.name.clone();
    let slot = ConnectedSlot::new(slot, Attrs::new());

    let mut apparmor = SnippetSet::new();
    let mut udev = TagSet::new();
    iface.apparmor_connected_plug(&mut apparmor, &plug, &slot)?;
    iface.udev_connected_plug(&mut udev, &plug, &slot)?;

    Ok(json!({
        "manifest": file_path.display().to_string(),
        "snap": snap,
        "slot": name,
        "interface": iface.name(),
        "apparmor": apparmor.snippets(),
        "udev": udev.rules(),
    }))
}

fn get_manifest_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && is_manifest_file(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
