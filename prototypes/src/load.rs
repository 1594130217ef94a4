use crate::{ItemPrototype, ItemPrototypeJSON, Prototypes, SpeciesPrototype, SpeciesPrototypeJSON};
use crate::{Prototype, PROTOTYPES};
use serde::Deserialize;
use std::io;
use std::sync::Once;
use thiserror::Error;

static LOAD_ONCE: Once = Once::new();

#[derive(Deserialize)]
struct PrototypesFileJSON {
    #[serde(default)]
    items: Vec<ItemPrototypeJSON>,
    #[serde(default)]
    species: Vec<SpeciesPrototypeJSON>,
}

/// Loads prototypes in tests from an inline data string
pub fn test_prototypes(data: &str) {
    load_prototypes_str(data).unwrap();
}

/// Loads the prototypes from the assets/prototypes.json data file.
/// Only the first load in a process takes effect, later calls are no-ops.
pub fn load_prototypes(base: &str) -> Result<(), PrototypeLoadError> {
    log::info!("loading prototypes from {}", base);
    let data = common::saveload::load_string(format!("{}assets/prototypes.json", base))?;
    load_prototypes_str(&data)
}

fn load_prototypes_str(data: &str) -> Result<(), PrototypeLoadError> {
    let mut result = Ok(());

    LOAD_ONCE.call_once(|| {
        result = do_load(data);
    });

    result
}

fn do_load(data: &str) -> Result<(), PrototypeLoadError> {
    let parsed: PrototypesFileJSON = serde_json::from_str(data)?;

    let mut p = Box::<Prototypes>::default();

    for json in parsed.items {
        let proto = ItemPrototype::from_json(json);
        if let Some(old) = p.items.insert(proto.id, proto) {
            log::warn!("duplicate {} with name: {}", ItemPrototype::KIND, old.name);
        }
    }

    for json in parsed.species {
        let proto = SpeciesPrototype::from_json(json);
        if let Some(old) = p.species.insert(proto.id, proto) {
            log::warn!(
                "duplicate {} with name: {}",
                SpeciesPrototype::KIND,
                old.name
            );
        }
    }

    p.print_stats();

    unsafe {
        PROTOTYPES = Some(Box::leak(p));
    }

    Ok(())
}

#[derive(Error, Debug)]
pub enum PrototypeLoadError {
    #[error("loading prototypes.json: {0}")]
    LoadingFile(#[from] io::Error),
    #[error("parsing prototypes.json: {0}")]
    Parsing(#[from] serde_json::Error),
}
