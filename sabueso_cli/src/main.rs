use std::collections::HashSet;
use std::env;
use std::path::PathBuf;

use sabueso_core::{
    display_info, scan, Color, ComponentTag, FinderPrefs, ScanRequest, SceneDoc, SceneQuery,
    SceneTree,
};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();

    let Some(command) = args.get(1).map(String::as_str) else {
        print_usage();
        std::process::exit(2);
    };

    let result = match command {
        "scan" => scan_command(&args),
        "tags" => tags_command(),
        "enable" => toggle_command(&args, true),
        "disable" => toggle_command(&args, false),
        _ => {
            print_usage();
            Err(format!("unknown command `{command}`"))
        }
    };

    if let Err(err) = result {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  sabueso_cli scan <scene.json> [--root <name>] [--tags <key,key,..>] [--all] [--linked|--no-linked]");
    eprintln!("  sabueso_cli tags                 # list registry tags and selection state");
    eprintln!("  sabueso_cli enable <tag_key>     # persist a tag as selected");
    eprintln!("  sabueso_cli disable <tag_key>    # persist a tag as deselected");
}

fn parse_flag_value(args: &[String], flag: &str) -> Option<String> {
    let idx = args.iter().position(|a| a == flag)?;
    args.get(idx + 1).cloned()
}

fn prefs_path() -> Result<PathBuf, String> {
    FinderPrefs::default_path().map_err(|e| e.to_string())
}

fn scan_command(args: &[String]) -> Result<(), String> {
    let Some(scene_path) = args.get(2).filter(|a| !a.starts_with("--")) else {
        print_usage();
        return Err("scan: missing <scene.json>".to_string());
    };

    let doc = SceneDoc::load(scene_path).map_err(|e| format!("{scene_path}: {e}"))?;
    let tree = doc.build().map_err(|e| format!("{scene_path}: {e}"))?;

    let path = prefs_path()?;
    let mut prefs = FinderPrefs::load(&path).map_err(|e| e.to_string())?;

    let root = resolve_root(args, &tree, &prefs)?;
    let tags = resolve_tags(args, &prefs)?;
    let include_linked = if args.iter().any(|a| a == "--no-linked") {
        false
    } else if args.iter().any(|a| a == "--linked") {
        true
    } else {
        prefs.include_linked_roots
    };

    let request = ScanRequest {
        root: Some(root),
        tags,
        include_linked_roots: include_linked,
    };
    let hits = scan(&tree, &request).map_err(|e| e.to_string())?;

    for hit in &hits {
        let color = display_info(hit.tag)
            .map(|info| info.color)
            .unwrap_or(Color::WHITE);
        println!("{}", paint(&hit.describe(&tree), color));
    }
    println!("{} hit(s)", hits.len());

    prefs.last_root = Some(tree.node_name(root).to_string());
    if let Err(err) = prefs.save(&path) {
        log::warn!("could not save prefs to {}: {err}", path.display());
    }
    Ok(())
}

/// `--root <name>` wins; otherwise the remembered root, if it still names a
/// node in this document; otherwise the document root.
fn resolve_root(
    args: &[String],
    tree: &SceneTree,
    prefs: &FinderPrefs,
) -> Result<sabueso_core::NodeID, String> {
    if let Some(name) = parse_flag_value(args, "--root") {
        return tree
            .find_by_name(&name)
            .ok_or(format!("no node named `{name}` in this scene"));
    }
    if let Some(name) = &prefs.last_root {
        if let Some(id) = tree.find_by_name(name) {
            return Ok(id);
        }
        log::debug!("remembered root `{name}` not in this scene, using document root");
    }
    Ok(tree.root())
}

fn resolve_tags(args: &[String], prefs: &FinderPrefs) -> Result<HashSet<ComponentTag>, String> {
    if args.iter().any(|a| a == "--all") {
        return Ok(ComponentTag::ALL.into_iter().collect());
    }
    if let Some(list) = parse_flag_value(args, "--tags") {
        return list
            .split(',')
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(|key| ComponentTag::parse(key).map_err(|e| e.to_string()))
            .collect();
    }
    Ok(prefs.selected_tags())
}

fn tags_command() -> Result<(), String> {
    let prefs = FinderPrefs::load(prefs_path()?).map_err(|e| e.to_string())?;

    for tag in ComponentTag::ALL {
        let info = display_info(tag).map_err(|e| e.to_string())?;
        let mark = if prefs.selected(tag) { "x" } else { " " };
        println!(
            "[{mark}] {:<22} {}  {}",
            tag.key(),
            paint(info.label, info.color),
            info.color
        );
    }
    let linked = display_info(ComponentTag::LinkedRoot).map_err(|e| e.to_string())?;
    let mark = if prefs.include_linked_roots { "x" } else { " " };
    println!(
        "[{mark}] {:<22} {}  {}  (via --linked/--no-linked)",
        ComponentTag::LinkedRoot.key(),
        paint(linked.label, linked.color),
        linked.color
    );
    Ok(())
}

fn toggle_command(args: &[String], selected: bool) -> Result<(), String> {
    let Some(key) = args.get(2) else {
        print_usage();
        return Err("missing <tag_key>".to_string());
    };
    let tag = ComponentTag::parse(key).map_err(|e| e.to_string())?;
    if tag.is_sentinel() {
        return Err("linked-root reporting is controlled per scan with --linked/--no-linked".to_string());
    }

    let path = prefs_path()?;
    let mut prefs = FinderPrefs::load(&path).map_err(|e| e.to_string())?;
    prefs.set_selected(tag, selected);
    prefs.save(&path).map_err(|e| e.to_string())?;
    println!(
        "{} is now {}",
        tag.key(),
        if selected { "selected" } else { "deselected" }
    );
    Ok(())
}

fn paint(text: &str, color: Color) -> String {
    format!("\x1b[38;2;{};{};{}m{text}\x1b[0m", color.r, color.g, color.b)
}
