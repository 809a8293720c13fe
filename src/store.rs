//! JSON file persistence for pipeline stages
//!
//! Stages communicate only through these files. Writes go to a temp file
//! in the destination directory and are renamed into place, so a failed
//! run never leaves a partial file behind.

use crate::bands::Histogram;
use crate::chart::ChartDocument;
use crate::member::{Member, MembersFile};
use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

/// On-disk shape of the reference population file: `{"bands": {...}}`
#[derive(Debug, Deserialize)]
struct UkPopulationFile {
    bands: Histogram,
}

pub fn save_members(members: &[Member], path: &Path) -> Result<()> {
    let file = MembersFile {
        members: members.to_vec(),
    };
    write_json_atomically(&file, path)
}

pub fn load_members(path: &Path, phase: &'static str) -> Result<Vec<Member>> {
    let file: MembersFile = read_json(path, phase)?;
    Ok(file.members)
}

pub fn load_uk_population(path: &Path, phase: &'static str) -> Result<Histogram> {
    let file: UkPopulationFile = read_json(path, phase)?;
    Ok(file.bands)
}

pub fn save_chart(chart: &ChartDocument, path: &Path) -> Result<()> {
    write_json_atomically(chart, path)
}

fn read_json<T: DeserializeOwned>(path: &Path, phase: &'static str) -> Result<T> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::MissingFile {
                path: path.to_path_buf(),
                phase,
            }
        } else {
            Error::Io(e)
        }
    })?;
    Ok(serde_json::from_str(&text)?)
}

fn write_json_atomically<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;

    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(dir) = dir {
        std::fs::create_dir_all(dir)?;
    }

    // Temp file must live in the destination directory so the rename
    // stays on one filesystem.
    let mut tmp = tempfile::Builder::new()
        .prefix(".parliament-ages-")
        .suffix(".json")
        .tempfile_in(dir.unwrap_or_else(|| Path::new(".")))?;
    tmp.write_all(json.as_bytes())?;
    tmp.write_all(b"\n")?;
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}
