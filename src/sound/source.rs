//! Alert sound selection.
//!
//! An alert is either a sound file given by the user, a sound found in the
//! platform sound directories, or the built-in tone.

use std::path::{Path, PathBuf};

use tracing::warn;

use super::error::SoundError;

/// Where the alert sound comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundSource {
    /// A sound file given by path.
    File {
        /// Path to the file.
        path: PathBuf,
    },
    /// A sound discovered in a platform sound directory.
    System {
        /// The name of the sound (e.g., "Glass").
        name: String,
        /// The full path to the sound file.
        path: PathBuf,
    },
    /// The built-in synthesized tone.
    Tone,
}

impl SoundSource {
    /// Creates a file sound source.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File { path: path.into() }
    }

    /// Creates a system sound source.
    #[must_use]
    pub fn system(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::System {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Resolves a `--sound` argument.
    ///
    /// Anything that looks like a path is taken as a file; otherwise the
    /// value is looked up by name among the system sounds. An unknown name
    /// falls back to the built-in tone.
    #[must_use]
    pub fn resolve(value: &str) -> Self {
        let path = Path::new(value);
        if path.components().count() > 1 || path.extension().is_some() {
            return Self::file(path);
        }

        match find_system_sound(value) {
            Ok(source) => source,
            Err(e) => {
                warn!("{}; using built-in tone", e);
                Self::Tone
            }
        }
    }

    /// Returns a short name for logs and display.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::File { path } => path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            Self::System { name, .. } => name.clone(),
            Self::Tone => "tone".to_string(),
        }
    }

    /// Returns the file path, if the source is file backed.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File { path } | Self::System { path, .. } => Some(path),
            Self::Tone => None,
        }
    }
}

/// Directories to search for system sounds, in order of priority.
const SYSTEM_SOUND_DIRS: &[&str] = &[
    "/System/Library/Sounds",
    "/Library/Sounds",
    "/usr/share/sounds/freedesktop/stereo",
];

/// Supported audio file extensions.
const SUPPORTED_EXTENSIONS: &[&str] = &["aiff", "wav", "mp3", "oga", "ogg", "flac"];

/// Sound names to try for the default alert, in order of preference.
const DEFAULT_SOUND_NAMES: &[&str] = &["Glass", "Ping", "complete", "bell"];

/// Lists sounds found in the system sound directories, sorted by name.
#[must_use]
pub fn discover_system_sounds() -> Vec<SoundSource> {
    let mut sounds: Vec<SoundSource> = SYSTEM_SOUND_DIRS
        .iter()
        .filter_map(|dir| std::fs::read_dir(dir).ok())
        .flat_map(|entries| entries.flatten())
        .map(|entry| entry.path())
        .filter(|path| has_supported_extension(path))
        .filter_map(|path| {
            let name = path.file_stem()?.to_string_lossy().into_owned();
            Some(SoundSource::System { name, path })
        })
        .collect();

    sounds.sort_by_key(SoundSource::name);
    sounds
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}

/// Picks the default alert: a preferred system sound, else the built-in tone.
#[must_use]
pub fn get_default_sound() -> SoundSource {
    let system_sounds = discover_system_sounds();

    DEFAULT_SOUND_NAMES
        .iter()
        .find_map(|preferred| {
            system_sounds
                .iter()
                .find(|s| s.name() == *preferred)
                .cloned()
        })
        .unwrap_or(SoundSource::Tone)
}

/// Finds a system sound by name, ignoring case.
///
/// # Errors
///
/// Returns `SoundError::FileNotFound` if no sound with the given name exists.
pub fn find_system_sound(name: &str) -> Result<SoundSource, SoundError> {
    discover_system_sounds()
        .into_iter()
        .find(|s| s.name().eq_ignore_ascii_case(name))
        .ok_or_else(|| SoundError::FileNotFound(format!("System sound '{}' not found", name)))
}
