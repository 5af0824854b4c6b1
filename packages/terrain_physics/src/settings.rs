//! Tunable physics parameters, read from a JSON file.

use std::{
    path::Path,
    fs::File,
    io::{
        BufReader,
        BufWriter,
    },
};
use block_geom::AaBox;
use serde::{Serialize, Deserialize};
use anyhow::{
    Context,
    Result,
};


pub const SETTINGS_FILE_NAME: &'static str = "physics_settings.json";


/// Physics settings. Missing fields take their default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Height above the bottom of a hitbox that blocks are always scanned up
    /// to.
    pub step_height: f64,
    /// Depth below the bottom of a hitbox that blocks are scanned down to.
    pub y_extra: f64,
    /// Scale applied to entity motion each tick.
    pub dt_fac: f64,
    /// Maximum distance at which blocks can be selected.
    pub pick_range: f64,
    /// Ladder fix given to newly spawned bodies.
    pub ladder_fix_delta: f64,
    /// Downward acceleration, in blocks per tick per tick.
    pub gravity: f64,
    /// Hitbox given to newly spawned bodies.
    pub body_hitbox: AaBox,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        PhysicsSettings {
            step_height: 1.0,
            y_extra: 1.0,
            dt_fac: 1.0,
            pick_range: 4.5,
            ladder_fix_delta: 0.0,
            gravity: 0.08,
            body_hitbox: AaBox::footprint(0.6, 1.8),
        }
    }
}

impl PhysicsSettings {
    /// Read settings from `path`, falling back to the defaults if that fails
    /// for any reason.
    pub fn read(path: impl AsRef<Path>) -> Self {
        Self::try_read(path).unwrap_or_else(|e| {
            debug!("using default physics settings: {:#}", e);
            Self::default()
        })
    }

    pub fn try_read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("unable to open {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("malformed physics settings in {}", path.display()))
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("unable to create {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        env,
        fs,
        process,
    };

    fn temp_path(name: &str) -> std::path::PathBuf {
        env::temp_dir().join(format!("terrain_physics_{}_{}", process::id(), name))
    }

    #[test]
    fn write_then_read() {
        let path = temp_path("roundtrip.json");
        let mut settings = PhysicsSettings::default();
        settings.step_height = 0.6;
        settings.pick_range = 6.0;
        settings.write(&path).unwrap();
        assert_eq!(PhysicsSettings::try_read(&path).unwrap(), settings);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_fields_default() {
        let settings: PhysicsSettings = serde_json::from_str(r#"{ "gravity": 0.04 }"#).unwrap();
        assert_eq!(settings.gravity, 0.04);
        assert_eq!(settings.step_height, PhysicsSettings::default().step_height);
    }

    #[test]
    fn bad_files_fall_back() {
        let missing = temp_path("missing.json");
        assert!(PhysicsSettings::try_read(&missing).is_err());
        assert_eq!(PhysicsSettings::read(&missing), PhysicsSettings::default());

        let garbage = temp_path("garbage.json");
        fs::write(&garbage, "{ not json").unwrap();
        let err = PhysicsSettings::try_read(&garbage).unwrap_err();
        assert!(format!("{:#}", err).contains("malformed"));
        assert_eq!(PhysicsSettings::read(&garbage), PhysicsSettings::default());
        fs::remove_file(&garbage).unwrap();
    }
}
