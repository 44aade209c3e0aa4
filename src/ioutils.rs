use crate::error::{Error, Result};

/// Reads everything from `reader` as UTF-8 text.
pub fn read_from(mut reader: impl std::io::Read) -> Result<String> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf).map_err(Error::Io)?;
    Ok(buf)
}
