// Keeps the session snapshot in a JSON file between two invocations.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use log::debug;
use podium_tally::store::{SnapshotStore, StoreError};
use podium_tally::SessionSnapshot;

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: &str) -> JsonFileStore {
        JsonFileStore {
            path: PathBuf::from(path),
        }
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Result<Option<SessionSnapshot>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("load: no file at {:?}", self.path);
                return Ok(None);
            }
            Err(e) => {
                return Err(StoreError::new(format!(
                    "cannot read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };
        debug!("load: read content: {:?}", contents);
        let snapshot: SessionSnapshot = serde_json::from_str(&contents).map_err(|e| {
            StoreError::new(format!("cannot parse {}: {}", self.path.display(), e))
        })?;
        Ok(Some(snapshot))
    }

    fn save(&mut self, snapshot: &SessionSnapshot) -> Result<(), StoreError> {
        let contents = serde_json::to_string_pretty(snapshot)
            .map_err(|e| StoreError::new(format!("cannot serialize the session: {}", e)))?;
        fs::write(&self.path, contents).map_err(|e| {
            StoreError::new(format!("cannot write {}: {}", self.path.display(), e))
        })?;
        debug!("save: wrote {:?}", self.path);
        Ok(())
    }
}
