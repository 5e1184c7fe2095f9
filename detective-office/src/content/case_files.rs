use std::collections::HashSet;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{OfficeError, OfficeResult};

/// Asset path of the content table, relative to the asset root.
pub const CASE_FILES_PATH: &str = "content/case_files.json";

const BUILTIN_CASE_FILES: &str = include_str!("../../assets/content/case_files.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    #[serde(default)]
    pub reference: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CryptoEvidenceItem {
    pub id: String,
    pub title: String,
    pub token: String,
    pub description: String,
    pub image: String,
    /// Offset of the photo on the bulletin board face.
    pub board_position: [f32; 2],
    #[serde(default)]
    pub article_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileDrawerItem {
    pub id: String,
    pub title: String,
    pub token: String,
    pub article_url: String,
}

impl FileDrawerItem {
    pub fn summary(&self) -> String {
        format!(
            "This file contains detailed information about the {} presale investigation.",
            self.token
        )
    }
}

/// Flat content table loaded once per session.
#[derive(Asset, TypePath, Resource, Debug, Clone, Serialize, Deserialize)]
pub struct CaseFileTable {
    pub evidence: Vec<EvidenceItem>,
    pub crypto: Vec<CryptoEvidenceItem>,
    /// Ordered top to bottom as they sit in the cabinet.
    pub drawers: Vec<FileDrawerItem>,
}

impl CaseFileTable {
    pub fn from_json(json: &str) -> OfficeResult<Self> {
        let table: Self = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    /// Copy compiled into the binary.
    pub fn builtin() -> OfficeResult<Self> {
        Self::from_json(BUILTIN_CASE_FILES)
    }

    pub fn validate(&self) -> OfficeResult<()> {
        let mut seen = HashSet::new();
        let ids = self
            .evidence
            .iter()
            .map(|e| e.id.as_str())
            .chain(self.crypto.iter().map(|c| c.id.as_str()))
            .chain(self.drawers.iter().map(|d| d.id.as_str()));
        for id in ids {
            if !seen.insert(id) {
                return Err(OfficeError::DuplicateContent(id.to_string()));
            }
        }
        Ok(())
    }

    pub fn evidence(&self, id: &str) -> Option<&EvidenceItem> {
        self.evidence.iter().find(|e| e.id == id)
    }

    pub fn crypto(&self, id: &str) -> Option<&CryptoEvidenceItem> {
        self.crypto.iter().find(|c| c.id == id)
    }

    pub fn drawer(&self, id: &str) -> Option<&FileDrawerItem> {
        self.drawers.iter().find(|d| d.id == id)
    }
}
