use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::content::case_files::{CASE_FILES_PATH, CaseFileTable};
use crate::error::OfficeError;

#[derive(Resource, Default)]
pub struct ContentLoader {
    handle: Option<Handle<CaseFileTable>>,
    settled: bool,
}

impl ContentLoader {
    pub fn is_settled(&self) -> bool {
        self.settled
    }
}

pub fn start_content_load(mut loader: ResMut<ContentLoader>, asset_server: Res<AssetServer>) {
    loader.handle = Some(asset_server.load(CASE_FILES_PATH));
}

/// Install the loaded table, or the compiled-in copy when loading or
/// validation fails.
pub fn poll_content_load(
    mut commands: Commands,
    mut loader: ResMut<ContentLoader>,
    asset_server: Res<AssetServer>,
    tables: Res<Assets<CaseFileTable>>,
) {
    if loader.settled {
        return;
    }
    let Some(handle) = loader.handle.clone() else {
        return;
    };

    let loaded = match tables.get(&handle) {
        Some(table) => match table.validate() {
            Ok(()) => Some(table.clone()),
            Err(err) => {
                warn!("Content table rejected: {}", err);
                None
            }
        },
        None => match asset_server.get_load_state(&handle) {
            Some(LoadState::Failed(err)) => {
                warn!(
                    "{}",
                    OfficeError::AssetLoad {
                        path: CASE_FILES_PATH.to_string(),
                        reason: err.to_string(),
                    }
                );
                None
            }
            _ => return,
        },
    };

    let table = match loaded {
        Some(table) => {
            println!("✓ Case files loaded from {}", CASE_FILES_PATH);
            Some(table)
        }
        None => match CaseFileTable::builtin() {
            Ok(table) => {
                println!("✓ Using built-in case files");
                Some(table)
            }
            Err(err) => {
                error!("Built-in case files invalid: {}", err);
                None
            }
        },
    };

    if let Some(table) = table {
        commands.insert_resource(table);
    }
    loader.settled = true;
}
