//! Stateless rewriters: each takes the manifest (and, where relevant, the
//! current file content) and produces the content the file should have.
//!
//! Substitutions are textual and first-match-only; everything outside the
//! matched regions passes through byte-identical.

use anyhow::Result;
use regex::{Captures, NoExpand, Regex};

use crate::manifest::Manifest;

/// Internal plugin key -> pip distribution name. Slice order is the pin
/// rewrite order for the Dockerfile; the changelog sorts by key instead.
pub const PLUGIN_PIP_NAMES: &[(&str, &str)] = &[
    ("netbox_topology_views", "netbox-topology-views"),
    ("netbox_ping", "netbox-ping"),
    ("netbox_napalm_plugin", "netbox-napalm-plugin"),
];

/// Rewrites the base-image pin and each plugin's pip pin in the Dockerfile.
///
/// A plugin whose pin line is absent is skipped rather than failing, so a
/// renamed or removed line silently stops being kept in sync; the skip is
/// logged at warn level to keep the gap observable.
pub fn dockerfile(manifest: &Manifest, content: &str) -> Result<String> {
    let base = Regex::new(r"ARG BUILD_FROM=.*").expect("regex for base image line");
    let pinned = format!(
        "ARG BUILD_FROM=ghcr.io/netbox-community/netbox:{}@{}",
        manifest.platform.version, manifest.platform.digest_index
    );
    let mut text = base.replace(content, NoExpand(&pinned)).into_owned();

    for &(key, pip_name) in PLUGIN_PIP_NAMES {
        let version = &manifest.plugin(key)?.version;
        let pattern = format!(r"({}==)[^\s\\]+", regex::escape(pip_name));
        let pin = Regex::new(&pattern).expect("regex for plugin pin line");
        if !pin.is_match(&text) {
            tracing::warn!(plugin = pip_name, "no pin line found, skipping");
            continue;
        }
        text = pin
            .replace(&text, |caps: &Captures| format!("{}{}", &caps[1], version))
            .into_owned();
    }
    Ok(text)
}

/// Rewrites the per-architecture image tags in build.yaml to the platform
/// version. Both substitutions are independent and first-match-only.
pub fn build_manifest(manifest: &Manifest, content: &str) -> String {
    let version = &manifest.platform.version;
    let mut text = content.to_string();
    for arch in ["amd64", "aarch64"] {
        let pattern = format!(r"({arch}:\s+ghcr\.io/netbox-community/netbox:)\S+");
        let tag = Regex::new(&pattern).expect("regex for arch tag line");
        text = tag
            .replace(&text, |caps: &Captures| format!("{}{}", &caps[1], version))
            .into_owned();
    }
    text
}

/// Regenerates CHANGELOG.md from scratch. Pure in the manifest, so rerunning
/// with the same manifest always yields byte-identical output.
pub fn changelog(manifest: &Manifest) -> Result<String> {
    let version = &manifest.platform.version;
    let release = version.split('-').next().unwrap_or(version);

    let mut lines = vec![
        "# Changelog".to_string(),
        String::new(),
        "## [1.0.0] - Upcoming".to_string(),
        String::new(),
        format!("- Ships NetBox {release} (container tag `{version}`)."),
        "- Bundled plugins:".to_string(),
    ];

    let mut table = PLUGIN_PIP_NAMES.to_vec();
    table.sort_unstable_by_key(|&(key, _)| key);
    for (key, display_name) in table {
        let pin = manifest.plugin(key)?;
        lines.push(format!(
            "  - [`{display_name}`]({}) v{}",
            pin.pypi, pin.version
        ));
    }
    lines.push(String::new());
    Ok(lines.join("\n"))
}
