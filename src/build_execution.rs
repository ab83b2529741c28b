use crate::config::{BuildConfig, FileConfig, PlatformConfig};
use crate::errors::{TokenError, TokenResult};
use crate::tokens::Dictionary;
use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use tracing::{debug, error, info, warn};

use anyhow::{anyhow, Result};

/// Directory the config's relative paths are resolved against
fn config_dir(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default()
}

/// Renders one file of a platform and writes it below the build path
fn export_file(
    dictionary: &Dictionary,
    platform: &PlatformConfig,
    file: &FileConfig,
    base_dir: &Path,
) -> TokenResult<PathBuf> {
    let destination = base_dir
        .join(platform.get_build_path())
        .join(&file.destination);
    info!(
        "Starting export to file: {} using format {:?}",
        destination.display(),
        file.format
    );

    let output = crate::export::render(
        file.format,
        dictionary,
        platform.transform_group,
        &file.get_options(),
    )?;
    crate::common::write_string_to_file(&destination, &output)?;
    Ok(destination)
}

/// Builds every platform of the config. Returns the files written.
///
/// Dictionary errors abort the build; a failing file is logged and skipped.
pub fn build(config: &BuildConfig, base_dir: &Path) -> TokenResult<Vec<PathBuf>> {
    if config.platforms.is_empty() {
        return Err(TokenError::Config("no platforms configured".to_string()));
    }

    let dictionary = Dictionary::load(&config.source, base_dir)?;

    let mut written = Vec::new();
    for (name, platform) in &config.platforms {
        info!(
            "Building platform {} with transform group {:?}",
            name, platform.transform_group
        );
        for file in &platform.files {
            match export_file(&dictionary, platform, file, base_dir) {
                Ok(path) => written.push(path),
                Err(e) => error!("Failed to export file {}: {}", file.destination, e),
            }
        }
    }

    info!("Build finished, {} file(s) written", written.len());
    Ok(written)
}

pub fn load_config(config_path: &Path) -> TokenResult<BuildConfig> {
    let content = std::fs::read_to_string(config_path)?;
    let config: BuildConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Main function to execute a build, with optional file watching
pub fn execute_build(config: String, watch: bool) -> Result<()> {
    info!("Executing build {}", config);

    let config_path = Path::new(&config);
    let build_config = load_config(config_path)?;
    let base_dir = config_dir(config_path);

    debug!("Executing build: {:?}", build_config);
    build(&build_config, &base_dir)?;

    if watch {
        watch_for_changes(&build_config, &base_dir)?;
    }

    Ok(())
}

/// Leading path of a glob pattern that contains no wildcards
fn glob_root(pattern: &str) -> PathBuf {
    Path::new(pattern)
        .components()
        .take_while(|component| {
            let part = component.as_os_str().to_string_lossy();
            !part.contains(['*', '?', '[', '{'])
        })
        .collect()
}

/// Resolves `base_dir` to an absolute path and compiles the source globs
/// against it. Notify reports absolute event paths.
fn watch_sources(config: &BuildConfig, base_dir: &Path) -> Result<(PathBuf, Vec<glob::Pattern>)> {
    let base_dir = std::env::current_dir()?.join(base_dir).canonicalize()?;
    let escaped = PathBuf::from(glob::Pattern::escape(&base_dir.to_string_lossy()));
    let sources: Vec<glob::Pattern> = config
        .source
        .iter()
        .map(|pattern| glob::Pattern::new(&escaped.join(pattern).to_string_lossy()))
        .collect::<Result<_, _>>()?;
    Ok((base_dir, sources))
}

fn is_source_change(sources: &[glob::Pattern], paths: &[PathBuf]) -> bool {
    paths
        .iter()
        .any(|path| sources.iter().any(|source| source.matches_path(path)))
}

/// Re-runs the build whenever a source file changes
fn watch_for_changes(config: &BuildConfig, base_dir: &Path) -> Result<()> {
    info!("Watching for changes");
    let (base_dir, sources) = watch_sources(config, base_dir)?;

    let (tx, rx) = channel();
    let mut watcher = RecommendedWatcher::new(tx, Config::default())?;
    for pattern in &config.source {
        let root = base_dir.join(glob_root(pattern));
        debug!("Watching {}", root.display());
        watcher.watch(&root, RecursiveMode::Recursive)?;
    }

    loop {
        match rx.recv() {
            Ok(Ok(event)) => {
                if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                    continue;
                }
                if is_source_change(&sources, &event.paths) {
                    debug!("File modified {:?}", event.paths);
                    info!("Change detected, rebuilding tokens");
                    if let Err(e) = build(config, &base_dir) {
                        error!("Build failed: {}", e);
                    }
                }
            }
            Ok(Err(e)) => warn!("Watch error: {:?}", e),
            Err(e) => return Err(anyhow!("Watch channel closed: {}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn glob_root_stops_at_first_wildcard() {
        assert_eq!(glob_root("tokens/**/*.json"), PathBuf::from("tokens"));
        assert_eq!(glob_root("design/tokens/*.json"), PathBuf::from("design/tokens"));
        assert_eq!(glob_root("*.json"), PathBuf::new());
    }

    #[test]
    fn config_dir_of_bare_file_is_empty() {
        assert_eq!(config_dir(Path::new("tokens.yaml")), PathBuf::new());
        assert_eq!(config_dir(Path::new("web/tokens.yaml")), PathBuf::from("web"));
    }

    #[test]
    fn relative_config_dir_watches_absolute_sources() {
        let (base_dir, sources) = watch_sources(&BuildConfig::default(), Path::new("")).unwrap();
        let cwd = std::env::current_dir().unwrap().canonicalize().unwrap();
        assert_eq!(base_dir, cwd);
        assert!(is_source_change(
            &sources,
            &[cwd.join("tokens/color/primitive.json")]
        ));
        assert!(is_source_change(&sources, &[cwd.join("tokens/a.json")]));
        assert!(!is_source_change(&sources, &[cwd.join("dist/tokens.css")]));
        assert!(!is_source_change(
            &sources,
            &[PathBuf::from("tokens/color/primitive.json")]
        ));
    }

    #[test]
    fn watch_rebuilds_when_a_source_changes() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("tokens/color.json");
        std::fs::create_dir_all(source.parent().unwrap()).unwrap();
        std::fs::write(&source, r##"{"color":{"red":{"value":"#ff0000"}}}"##).unwrap();

        let base_dir = dir.path().to_path_buf();
        std::thread::spawn(move || watch_for_changes(&BuildConfig::default(), &base_dir));
        std::thread::sleep(Duration::from_millis(500));

        std::fs::write(&source, r##"{"color":{"green":{"value":"#00ff00"}}}"##).unwrap();

        let css = dir.path().join("dist/tokens.css");
        let deadline = Instant::now() + Duration::from_secs(10);
        let mut rebuilt = false;
        while Instant::now() < deadline {
            if let Ok(content) = std::fs::read_to_string(&css) {
                if content.contains("--color-green: #00ff00;") {
                    rebuilt = true;
                    break;
                }
            }
            std::thread::sleep(Duration::from_millis(100));
        }
        assert!(rebuilt, "no rebuild after the source changed");
    }

    #[test]
    fn empty_platforms_are_rejected() {
        let config = BuildConfig {
            source: vec![],
            platforms: Default::default(),
        };
        let err = build(&config, Path::new(".")).unwrap_err();
        assert!(matches!(err, TokenError::Config(_)));
    }
}
