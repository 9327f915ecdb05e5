//! Raw binary persistence for set arrays.
//!
//! Layout, native-endian, no padding:
//!
//! ```text
//! i32           N         number of sets
//! N × i32       counts    per-set lengths
//! i32           total     number of elements
//! total × T     values    raw bytes of each element, in set order
//! ```
//!
//! Offsets are never stored; they are rebuilt from the counts on load.
//! Any failure while reading leaves the array empty.

use std::any::type_name;
use std::fs::File;
use std::io::{BufWriter, ErrorKind, Read, Write};
use std::mem::size_of;
use std::path::Path;

use bytemuck::Pod;
use zeta_types::{ZetaError, ZetaResult};

use crate::set_array::SetArray;

const LEN_BYTES: usize = size_of::<i32>();

impl<T: Pod> SetArray<T> {
    /// Writes the counts block followed by the values block.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> ZetaResult<()> {
        let counts = self
            .counts()
            .iter()
            .map(|&n| to_len(n))
            .collect::<ZetaResult<Vec<i32>>>()?;

        writer.write_all(&to_len(counts.len())?.to_ne_bytes())?;
        writer.write_all(bytemuck::cast_slice(&counts))?;
        writer.write_all(&to_len(self.num_total_elements())?.to_ne_bytes())?;
        writer.write_all(bytemuck::cast_slice(self.values()))?;
        Ok(())
    }

    /// Replaces the contents with an array read from `reader`.
    ///
    /// On failure the array is reset to empty and the error is returned.
    pub fn read_from<R: Read>(&mut self, reader: &mut R) -> ZetaResult<()> {
        let decoded = decode::<T, R>(reader);
        self.finish_read(decoded, "<stream>")
    }

    /// Saves to `path`, creating or truncating the file.
    pub fn save(&self, path: impl AsRef<Path>) -> ZetaResult<()> {
        let path = path.as_ref();
        let result = File::create(path)
            .map_err(ZetaError::from)
            .and_then(|file| {
                let mut writer = BufWriter::new(file);
                self.write_to(&mut writer)?;
                writer.flush()?;
                Ok(())
            });

        if let Err(ref e) = result {
            tracing::warn!(path = %path.display(), error = %e, "failed to save set array");
        }
        result
    }

    /// Replaces the contents with the array stored at `path`.
    ///
    /// A missing or truncated file yields `Io`; a value block longer than
    /// the declared elements of `T` (written with a wider element type)
    /// yields `TypeMismatch`. Either way the array is left empty.
    pub fn load(&mut self, path: impl AsRef<Path>) -> ZetaResult<()> {
        let path = path.as_ref();
        let decoded = std::fs::read(path)
            .map_err(ZetaError::from)
            .and_then(|bytes| {
                check_value_block::<T>(&bytes)?;
                decode::<T, _>(&mut bytes.as_slice())
            });
        self.finish_read(decoded, &path.display().to_string())
    }

    /// Loads a new array from `path`.
    pub fn from_file(path: impl AsRef<Path>) -> ZetaResult<Self> {
        let mut array = Self::new();
        array.load(path)?;
        Ok(array)
    }

    fn finish_read(
        &mut self,
        decoded: ZetaResult<(Vec<usize>, Vec<T>)>,
        source: &str,
    ) -> ZetaResult<()> {
        match decoded.and_then(|(counts, values)| SetArray::from_parts(counts, values)) {
            Ok(array) => {
                *self = array;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(source, element = type_name::<T>(), error = %e, "failed to read set array");
                self.reset();
                Err(e)
            }
        }
    }
}

fn to_len(n: usize) -> ZetaResult<i32> {
    i32::try_from(n)
        .map_err(|_| ZetaError::Serialization(format!("length {n} does not fit in an i32 field")))
}

fn from_len(raw: i32, what: &str) -> ZetaResult<usize> {
    usize::try_from(raw)
        .map_err(|_| ZetaError::Serialization(format!("negative {what}: {raw}")))
}

fn read_len<R: Read>(reader: &mut R, what: &str) -> ZetaResult<usize> {
    let mut buf = [0u8; LEN_BYTES];
    reader.read_exact(&mut buf)?;
    from_len(i32::from_ne_bytes(buf), what)
}

fn decode<T: Pod, R: Read>(reader: &mut R) -> ZetaResult<(Vec<usize>, Vec<T>)> {
    let num_sets = read_len(reader, "set count")?;

    let raw = read_block(reader, num_sets * LEN_BYTES)?;
    let counts = raw
        .chunks_exact(LEN_BYTES)
        .map(|chunk| {
            let mut buf = [0u8; LEN_BYTES];
            buf.copy_from_slice(chunk);
            from_len(i32::from_ne_bytes(buf), "set length")
        })
        .collect::<ZetaResult<Vec<usize>>>()?;

    let total = read_len(reader, "element count")?;
    let declared: usize = counts.iter().sum();
    if declared != total {
        return Err(ZetaError::Serialization(format!(
            "set lengths sum to {declared} but the value block holds {total} elements"
        )));
    }

    let width = size_of::<T>();
    let raw = read_block(reader, total * width)?;
    let values = if width == 0 {
        vec![T::zeroed(); total]
    } else {
        raw.chunks_exact(width)
            .map(bytemuck::pod_read_unaligned)
            .collect()
    };
    Ok((counts, values))
}

/// Reads exactly `len` bytes, growing the buffer only as data arrives so a
/// corrupt length field cannot force a huge up-front allocation.
fn read_block<R: Read>(reader: &mut R, len: usize) -> ZetaResult<Vec<u8>> {
    let mut raw = Vec::new();
    reader.by_ref().take(len as u64).read_to_end(&mut raw)?;
    if raw.len() != len {
        return Err(ZetaError::Io(std::io::Error::new(
            ErrorKind::UnexpectedEof,
            format!("expected {len} bytes, stream ended after {}", raw.len()),
        )));
    }
    Ok(raw)
}

/// Compares the size of a whole file's value block against `T`.
///
/// A block longer than `total` elements of `T` was written with a wider
/// element type. A shorter one is a truncated file, even when its length
/// happens to fit a narrower type. Headers that are themselves short are
/// left for `decode` to report.
fn check_value_block<T: Pod>(bytes: &[u8]) -> ZetaResult<()> {
    let Some(num_sets) = peek_len(bytes, 0) else {
        return Ok(());
    };
    let total_at = LEN_BYTES + num_sets * LEN_BYTES;
    let Some(total) = peek_len(bytes, total_at) else {
        return Ok(());
    };

    let value_bytes = bytes.len() - (total_at + LEN_BYTES);
    let expected = total * size_of::<T>();
    if value_bytes == expected {
        return Ok(());
    }

    if value_bytes > expected {
        return Err(ZetaError::TypeMismatch {
            expected: format!("{} ({} bytes per element)", type_name::<T>(), size_of::<T>()),
            found: format!("{value_bytes} value bytes for {total} elements"),
        });
    }

    Err(ZetaError::Io(std::io::Error::new(
        ErrorKind::UnexpectedEof,
        format!("value block truncated: {value_bytes} of {expected} bytes"),
    )))
}

fn peek_len(bytes: &[u8], at: usize) -> Option<usize> {
    let chunk = bytes.get(at..at.checked_add(LEN_BYTES)?)?;
    let mut buf = [0u8; LEN_BYTES];
    buf.copy_from_slice(chunk);
    usize::try_from(i32::from_ne_bytes(buf)).ok()
}
