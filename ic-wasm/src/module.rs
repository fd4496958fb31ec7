use std::path::{Path, PathBuf};
use thiserror::Error;

const WASM_MAGIC: &[u8] = b"\0asm";
const GZIP_MAGIC: &[u8] = &[0x1f, 0x8b];

/// Errors from validating the path of a Wasm module.
#[derive(Error, Clone, Debug, Eq, PartialEq)]
pub enum WasmPathError {
    /// The file name ends in neither `.wasm` nor `.wasm.gz`.
    #[error("The file must be a .wasm or .wasm.gz file.")]
    InvalidExtension(PathBuf),
}

/// How a module file is stored, as claimed by its file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// A plain `.wasm` module.
    Raw,
    /// A gzip-compressed `.wasm.gz` module. The bytes are never decompressed.
    Gzip,
}

impl Encoding {
    /// The magic bytes a file of this encoding starts with.
    pub fn magic(self) -> &'static [u8] {
        match self {
            Encoding::Raw => WASM_MAGIC,
            Encoding::Gzip => GZIP_MAGIC,
        }
    }
}

/// A path whose file name ends in `.wasm` or `.wasm.gz`.
///
/// Only the name is checked; the contents are never inspected here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WasmPath {
    path: PathBuf,
    encoding: Encoding,
}

impl WasmPath {
    /// Validates the suffix of `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, WasmPathError> {
        let path = path.as_ref();
        let name = path.to_string_lossy();
        let encoding = if name.ends_with(".wasm") {
            Encoding::Raw
        } else if name.ends_with(".wasm.gz") {
            Encoding::Gzip
        } else {
            return Err(WasmPathError::InvalidExtension(path.to_path_buf()));
        };
        Ok(Self {
            path: path.to_path_buf(),
            encoding,
        })
    }

    /// The encoding claimed by the file name.
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// The validated path.
    pub fn as_path(&self) -> &Path {
        &self.path
    }
}

/// The full contents of a module file.
#[derive(Debug, Clone)]
pub struct WasmModule {
    encoding: Encoding,
    bytes: Vec<u8>,
}

impl WasmModule {
    /// Reads the whole file. The file is closed before this returns, whether or not the read
    /// succeeded.
    pub fn read(path: &WasmPath) -> std::io::Result<Self> {
        let bytes = std::fs::read(path.as_path())?;
        Ok(Self {
            encoding: path.encoding(),
            bytes,
        })
    }

    /// Whether the contents start with the magic bytes of the claimed encoding.
    pub fn has_expected_magic(&self) -> bool {
        self.bytes.starts_with(self.encoding.magic())
    }

    /// The encoding claimed by the file name.
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// The raw file contents.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Backslash-joined hex of the raw file contents.
    pub fn hex_dump(&self) -> String {
        crate::hex_dump(&self.bytes)
    }
}
