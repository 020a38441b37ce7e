//! Saving and loading JSON documents: genomes, training parameters and fitness histories.

use crate::error::PersistError;
use serde::{de::DeserializeOwned, Serialize};
use std::{fs, path::Path};

pub trait Persist: Serialize + DeserializeOwned {
    fn to_json(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn from_json(s: &str) -> Result<Self, PersistError> {
        Ok(serde_json::from_str(s)?)
    }

    fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), PersistError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistError> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}
