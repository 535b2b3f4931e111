//! Fixed-width string fields.

use crate::{Error, Result};

/// Interprets NUL-padded bytes as a `&str`.
///
/// LAS says string fields are ASCII and NUL filled, but data in the wild often has garbage after
/// the first NUL, so everything from the first NUL on is ignored.
pub(crate) trait AsLasStr {
    fn as_las_str(&self) -> Result<&str>;
}

/// Copies a string into a fixed-width field, NUL filling the remainder.
pub(crate) trait FromLasStr {
    fn from_las_str(&mut self, s: &str) -> Result<()>;
}

impl AsLasStr for [u8] {
    fn as_las_str(&self) -> Result<&str> {
        let s = if let Some(position) = self.iter().position(|c| *c == 0) {
            std::str::from_utf8(&self[..position])?
        } else {
            std::str::from_utf8(self)?
        };
        Ok(s)
    }
}

impl FromLasStr for [u8] {
    fn from_las_str(&mut self, s: &str) -> Result<()> {
        if self.len() < s.len() {
            return Err(Error::StringTooLong {
                string: s.to_string(),
                len: self.len(),
            });
        }
        if !s.is_ascii() {
            return Err(Error::NotAscii(s.to_string()));
        }
        for (a, b) in self.iter_mut().zip(s.bytes().chain(std::iter::repeat(0))) {
            *a = b;
        }
        Ok(())
    }
}

pub(crate) fn some_or_none_if_zero<T: Default + PartialEq>(n: T) -> Option<T> {
    if n == T::default() { None } else { Some(n) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_las_str() {
        assert_eq!("", b"".as_las_str().unwrap());
        assert_eq!("", b"\0".as_las_str().unwrap());
        assert_eq!("A", b"A".as_las_str().unwrap());
        assert_eq!("A", b"A\0".as_las_str().unwrap());
        assert_eq!("A", b"A\0B".as_las_str().unwrap());
    }

    #[test]
    fn from_las_str() {
        let mut buf = [1u8; 5];
        buf.from_las_str("Beer").unwrap();
        assert_eq!([66, 101, 101, 114, 0], buf);
        assert!(buf.from_las_str("Beers!").is_err());
        assert!(buf.from_las_str("Bïer").is_err());
    }
}
