//! CBOR snapshots of the whole bank.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{info, warn};

use crate::bank::QuestionBank;
use crate::error::BankError;

pub const SNAPSHOT_VERSION: u16 = 1;

#[derive(Serialize, Deserialize)]
struct Snapshot<B> {
    version: u16,
    bank: B,
}

impl QuestionBank {
    pub fn to_bytes(&self) -> Result<Vec<u8>, BankError> {
        let snapshot = Snapshot {
            version: SNAPSHOT_VERSION,
            bank: self,
        };
        let mut buf = Vec::new();
        ciborium::ser::into_writer(&snapshot, &mut buf)
            .map_err(|e| BankError::Encode(e.to_string()))?;
        Ok(buf)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BankError> {
        let snapshot: Snapshot<QuestionBank> =
            ciborium::de::from_reader(bytes).map_err(|e| BankError::Decode(e.to_string()))?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(BankError::SnapshotVersion(snapshot.version));
        }
        Ok(snapshot.bank)
    }

    /// Write the snapshot next to `path` and rename it into place.
    pub fn save(&self, path: &Path) -> Result<(), BankError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, self.to_bytes()?)?;
        fs::rename(&tmp, path)?;
        info!("Saved {} questions to {}", self.len(), path.display());
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, BankError> {
        let bank = Self::from_bytes(&fs::read(path)?)?;
        info!("Loaded {} questions from {}", bank.len(), path.display());
        Ok(bank)
    }

    /// Load `path`, or start empty when it does not exist yet.
    pub fn load_or_default(path: &Path) -> Result<Self, BankError> {
        match fs::read(path) {
            Ok(bytes) => Self::from_bytes(&bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("Snapshot {} not found, starting empty", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }
}
