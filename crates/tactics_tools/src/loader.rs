//! Scenario loading from disk.
//!
//! Chapters live at `<root>/<scenario>/<chapter>_map.ron`. All validation
//! happens at load time; a chapter that fails to load produces no battle.

use std::io::Read;
use std::path::{Path, PathBuf};

use tactics_core::battle::Battle;
use tactics_core::data::ScenarioData;
use tactics_core::error::MapError;
use thiserror::Error;

/// Errors that can occur while loading a scenario chapter.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Failed to read file.
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        /// Path to the file.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse RON file.
    #[error("Failed to parse RON file '{path}': {source}")]
    ParseError {
        /// Path to the file.
        path: String,
        /// Underlying parse error.
        #[source]
        source: ron::error::SpannedError,
    },

    /// Scenario data validation failed.
    #[error("Validation failed for '{path}': {errors:?}")]
    ValidationError {
        /// Path to the file.
        path: String,
        /// List of validation errors.
        errors: Vec<String>,
    },

    /// Map construction failed, or the chapter does not exist.
    #[error(transparent)]
    Map(#[from] MapError),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Path of a chapter file under `root`.
#[must_use]
pub fn scenario_path(root: &Path, scenario: &str, chapter: u32) -> PathBuf {
    root.join(scenario).join(format!("{chapter}_map.ron"))
}

/// Read, parse and validate one chapter.
///
/// # Errors
///
/// - [`MapError::ResourceNotFound`] (wrapped in [`LoadError::Map`]) if the
///   chapter file does not exist.
/// - [`LoadError::IoError`] / [`LoadError::ParseError`] for unreadable or
///   malformed files.
/// - [`LoadError::ValidationError`] for broken cross-references, or a file
///   whose header names a different scenario or chapter.
pub fn load_scenario_data(root: &Path, scenario: &str, chapter: u32) -> LoadResult<ScenarioData> {
    let path = scenario_path(root, scenario, chapter);
    let path_str = path.display().to_string();

    let mut file = std::fs::File::open(&path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            LoadError::Map(MapError::ResourceNotFound(path_str.clone()))
        } else {
            LoadError::IoError {
                path: path_str.clone(),
                source: e,
            }
        }
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| LoadError::IoError {
            path: path_str.clone(),
            source: e,
        })?;

    let data: ScenarioData = ron::from_str(&contents).map_err(|e| LoadError::ParseError {
        path: path_str.clone(),
        source: e,
    })?;

    let mut errors = data.validate();
    if data.name != scenario {
        errors.push(format!(
            "File declares scenario '{}', expected '{scenario}'",
            data.name
        ));
    }
    if data.chapter != chapter {
        errors.push(format!(
            "File declares chapter {}, expected {chapter}",
            data.chapter
        ));
    }
    if !errors.is_empty() {
        return Err(LoadError::ValidationError {
            path: path_str,
            errors,
        });
    }

    tracing::debug!(path = %path_str, "Read scenario file");
    Ok(data)
}

/// Load a chapter and build its opening battle.
///
/// # Errors
///
/// Everything [`load_scenario_data`] reports, plus [`MapError`]s raised
/// while building, e.g. [`MapError::UnknownTerrain`].
pub fn load_battle(root: &Path, scenario: &str, chapter: u32) -> LoadResult<Battle> {
    let data = load_scenario_data(root, scenario, chapter)?;
    let battle = data.build()?;
    tracing::info!(
        "Loaded {scenario} chapter {chapter}: {}x{} map, {} fighters",
        battle.map().width(),
        battle.map().height(),
        battle.roster().len()
    );
    Ok(battle)
}

/// Chapter numbers present for `scenario`, ascending.
///
/// # Errors
///
/// Returns [`MapError::ResourceNotFound`] if the scenario directory does not
/// exist.
pub fn list_chapters(root: &Path, scenario: &str) -> LoadResult<Vec<u32>> {
    let dir = root.join(scenario);
    if !dir.is_dir() {
        return Err(MapError::ResourceNotFound(dir.display().to_string()).into());
    }

    let entries = std::fs::read_dir(&dir).map_err(|e| LoadError::IoError {
        path: dir.display().to_string(),
        source: e,
    })?;

    let mut chapters = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| LoadError::IoError {
            path: dir.display().to_string(),
            source: e,
        })?;
        let name = entry.file_name();
        let chapter = name
            .to_str()
            .and_then(|n| n.strip_suffix("_map.ron"))
            .and_then(|n| n.parse::<u32>().ok());
        if let Some(chapter) = chapter {
            chapters.push(chapter);
        }
    }
    chapters.sort_unstable();
    Ok(chapters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::coord::Coord;
    use tactics_core::terrain::Terrain;

    const CHAPTER_ONE: &str = r#"
        ScenarioData(
            name: "border",
            chapter: 1,
            legend: {
                '.': 0xFFBDFE98,
                'f': 0xFF319D20,
                'm': 0xFF8A4F07,
            },
            layout: [
                ".f..",
                ".m..",
                "....",
            ],
            deployments: [
                Deployment(name: "Lyn", class: Mercenary, x: 0, y: 0, weapon: Some("Iron Sword")),
                Deployment(name: "Bandit", class: Brigand, x: 3, y: 2, weapon: Some("Iron Axe")),
            ],
        )
    "#;

    fn write_chapter(root: &Path, scenario: &str, chapter: u32, text: &str) {
        let path = scenario_path(root, scenario, chapter);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, text).unwrap();
    }

    #[test]
    fn test_scenario_path_layout() {
        let path = scenario_path(Path::new("data"), "border", 3);
        assert_eq!(path, Path::new("data").join("border").join("3_map.ron"));
    }

    #[test]
    fn test_load_battle() {
        let dir = tempfile::tempdir().unwrap();
        write_chapter(dir.path(), "border", 1, CHAPTER_ONE);

        let battle = load_battle(dir.path(), "border", 1).unwrap();
        assert_eq!(battle.map().terrain_at(1, 1), Terrain::Mountain);
        assert_eq!(
            battle.fighter_at(Coord::new(3, 2)).map(|f| f.name()),
            Some("Bandit")
        );
    }

    #[test]
    fn test_missing_chapter_is_resource_not_found() {
        let dir = tempfile::tempdir().unwrap();
        write_chapter(dir.path(), "border", 1, CHAPTER_ONE);

        let err = load_battle(dir.path(), "border", 2).unwrap_err();
        assert!(matches!(err, LoadError::Map(MapError::ResourceNotFound(_))));
    }

    #[test]
    fn test_parse_error_names_file() {
        let dir = tempfile::tempdir().unwrap();
        write_chapter(dir.path(), "border", 1, "ScenarioData(");

        let err = load_scenario_data(dir.path(), "border", 1).unwrap_err();
        match err {
            LoadError::ParseError { path, .. } => assert!(path.ends_with("1_map.ron")),
            other => panic!("expected parse error, got {other}"),
        }
    }

    #[test]
    fn test_header_mismatch_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        write_chapter(dir.path(), "border", 2, CHAPTER_ONE);

        let err = load_scenario_data(dir.path(), "border", 2).unwrap_err();
        match err {
            LoadError::ValidationError { errors, .. } => {
                assert_eq!(errors, vec!["File declares chapter 1, expected 2".to_string()]);
            }
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn test_unknown_terrain_produces_no_battle() {
        let dir = tempfile::tempdir().unwrap();
        let text = CHAPTER_ONE.replace("0xFF8A4F07", "0xFF8A4F08");
        write_chapter(dir.path(), "border", 1, &text);

        let err = load_battle(dir.path(), "border", 1).unwrap_err();
        match err {
            LoadError::ValidationError { errors, .. } => {
                assert_eq!(
                    errors,
                    vec!["Legend character 'm' maps to unknown terrain code 0xFF8A4F08".to_string()]
                );
            }
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn test_list_chapters() {
        let dir = tempfile::tempdir().unwrap();
        write_chapter(dir.path(), "border", 10, CHAPTER_ONE);
        write_chapter(dir.path(), "border", 2, CHAPTER_ONE);
        std::fs::write(dir.path().join("border").join("notes.txt"), "").unwrap();

        assert_eq!(list_chapters(dir.path(), "border").unwrap(), vec![2, 10]);
        assert!(matches!(
            list_chapters(dir.path(), "coast"),
            Err(LoadError::Map(MapError::ResourceNotFound(_)))
        ));
    }
}
