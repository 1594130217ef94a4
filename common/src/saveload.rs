use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Error, ErrorKind, Read, Result, Write};
use std::path::Path;

fn create_file(path: &str) -> Option<File> {
    File::create(path).map_err(|e| log::error!("{}", e)).ok()
}

fn open_file(path: &str) -> Option<File> {
    File::open(path).ok()
}

pub fn load_string(path: impl AsRef<Path>) -> Result<String> {
    let mut s = String::new();
    BufReader::new(File::open(path)?).read_to_string(&mut s)?;
    Ok(s)
}

fn erase_err<E: std::error::Error + Send + Sync + 'static>(e: E) -> Error {
    Error::new(ErrorKind::Other, e)
}

/// An encoder knows how to turn a serializable value into bytes and back,
/// and where save files of its format live on disk.
pub trait Encoder {
    const EXTENSION: &'static str;

    fn encode<T: Serialize>(x: &T) -> Result<Vec<u8>>;
    fn decode<T: DeserializeOwned>(x: &[u8]) -> Result<T>;

    fn encode_writer<T: Serialize>(x: &T, w: impl Write) -> Result<()>;
    fn decode_reader<T: DeserializeOwned>(r: impl Read) -> Result<T>;

    fn filename(name: &str) -> String {
        format!("world/{}.{}", name, Self::EXTENSION)
    }

    fn save<T: Serialize>(x: &T, name: &str) -> Option<()> {
        Self::save_silent(x, name)?;
        log::info!("successfully saved {}", name);
        Some(())
    }

    fn save_silent<T: Serialize>(x: &T, name: &str) -> Option<()> {
        let _ = std::fs::create_dir("world");

        let file = create_file(&Self::filename(name))?;
        let w = BufWriter::new(file);

        Self::encode_writer(x, w)
            .map_err(|e| log::error!("failed serializing {}: {}", name, e))
            .ok()?;
        Some(())
    }

    fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let file = open_file(&Self::filename(name))
            .ok_or_else(|| Error::new(ErrorKind::NotFound, name.to_string()))?;
        let v = Self::decode_reader(BufReader::new(file))
            .map_err(|e| {
                log::error!("failed deserializing {}: {}", name, e);
                e
            })?;
        log::info!("successfully loaded {}", name);
        Ok(v)
    }

    fn load_or_default<T: DeserializeOwned + Default>(name: &str) -> T {
        Self::load(name).unwrap_or_default()
    }
}

pub struct Bincode;

impl Encoder for Bincode {
    const EXTENSION: &'static str = "bc";

    fn encode<T: Serialize>(x: &T) -> Result<Vec<u8>> {
        bincode::serialize(x).map_err(erase_err)
    }

    fn decode<T: DeserializeOwned>(x: &[u8]) -> Result<T> {
        bincode::deserialize(x).map_err(erase_err)
    }

    fn encode_writer<T: Serialize>(x: &T, w: impl Write) -> Result<()> {
        bincode::serialize_into(w, x).map_err(erase_err)
    }

    fn decode_reader<T: DeserializeOwned>(r: impl Read) -> Result<T> {
        bincode::deserialize_from(r).map_err(erase_err)
    }
}

pub struct JSON;

impl Encoder for JSON {
    const EXTENSION: &'static str = "json";

    fn encode<T: Serialize>(x: &T) -> Result<Vec<u8>> {
        serde_json::to_vec(x).map_err(erase_err)
    }

    fn decode<T: DeserializeOwned>(x: &[u8]) -> Result<T> {
        serde_json::from_slice(x).map_err(erase_err)
    }

    fn encode_writer<T: Serialize>(x: &T, w: impl Write) -> Result<()> {
        serde_json::to_writer(w, x).map_err(erase_err)
    }

    fn decode_reader<T: DeserializeOwned>(r: impl Read) -> Result<T> {
        serde_json::from_reader(r).map_err(erase_err)
    }
}

pub struct JSONPretty;

impl Encoder for JSONPretty {
    const EXTENSION: &'static str = "json";

    fn encode<T: Serialize>(x: &T) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(x).map_err(erase_err)
    }

    fn decode<T: DeserializeOwned>(x: &[u8]) -> Result<T> {
        serde_json::from_slice(x).map_err(erase_err)
    }

    fn encode_writer<T: Serialize>(x: &T, w: impl Write) -> Result<()> {
        serde_json::to_writer_pretty(w, x).map_err(erase_err)
    }

    fn decode_reader<T: DeserializeOwned>(r: impl Read) -> Result<T> {
        serde_json::from_reader(r).map_err(erase_err)
    }
}
