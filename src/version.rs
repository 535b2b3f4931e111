use crate::{Error, Result, feature::Feature, point::Format};
use std::fmt;

/// LAS version.
///
/// Defaults to 1.2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    /// The major version.
    ///
    /// Should always be 1.
    pub major: u8,

    /// The minor version.
    ///
    /// Should be between 0 and 4.
    pub minor: u8,
}

impl Version {
    /// Creates a new version.
    ///
    /// Doesn't do any checking that it's an actual las version.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::Version;
    /// let version = Version::new(1, 2);
    /// assert_eq!(1, version.major);
    /// assert_eq!(2, version.minor);
    /// ```
    pub fn new(major: u8, minor: u8) -> Version {
        Version { major, minor }
    }

    /// Checks whether this version supports the feature, returning an error if not.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::Version;
    /// use las_stream::feature::Waveforms;
    /// assert!(Version::new(1, 4).verify_support_for::<Waveforms>().is_ok());
    /// assert!(Version::new(1, 2).verify_support_for::<Waveforms>().is_err());
    /// ```
    pub fn verify_support_for<F: Feature>(&self) -> Result<()> {
        if self.supports::<F>() {
            Ok(())
        } else {
            Err(Error::UnsupportedFeature {
                version: *self,
                feature: F::name(),
            })
        }
    }

    /// Does this version support the feature?
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::Version;
    /// use las_stream::feature::Waveforms;
    /// assert!(Version::new(1, 4).supports::<Waveforms>());
    /// assert!(!Version::new(1, 2).supports::<Waveforms>());
    /// ```
    pub fn supports<F: Feature>(&self) -> bool {
        F::is_supported_by(*self)
    }

    /// Returns this version's header size.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::Version;
    /// assert_eq!(227, Version::new(1, 2).header_size());
    /// assert_eq!(235, Version::new(1, 3).header_size());
    /// assert_eq!(375, Version::new(1, 4).header_size());
    /// ```
    pub fn header_size(&self) -> u16 {
        match self.minor {
            0..=2 => 227,
            3 => 235,
            _ => 375,
        }
    }

    /// Does this version support the point format?
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::Version;
    /// use las_stream::point::Format;
    /// let format = Format::new(6).unwrap();
    /// assert!(!Version::new(1, 2).supports_point_format(format));
    /// assert!(Version::new(1, 4).supports_point_format(format));
    /// ```
    pub fn supports_point_format(&self, format: Format) -> bool {
        let minor = match format.to_u8() {
            0 | 1 => 0,
            2 | 3 => 2,
            4 | 5 => 3,
            _ => 4,
        };
        *self >= Version::new(1, minor)
    }

    /// Does this version require the point data start signature (0xDDCC) before the points?
    pub fn requires_point_data_start_signature(&self) -> bool {
        *self == Version::new(1, 0)
    }
}

impl Default for Version {
    fn default() -> Version {
        Version::new(1, 2)
    }
}

impl From<(u8, u8)> for Version {
    fn from((major, minor): (u8, u8)) -> Version {
        Version { major, minor }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering() {
        assert!(Version::new(1, 2) < Version::new(1, 4));
        assert!(Version::new(1, 4) >= Version::new(1, 3));
    }

    #[test]
    fn point_formats() {
        let v = Version::new(1, 3);
        for n in 0..=5 {
            assert!(v.supports_point_format(Format::new(n).unwrap()));
        }
        for n in 6..=10 {
            assert!(!v.supports_point_format(Format::new(n).unwrap()));
        }
        assert!(!Version::new(1, 1).supports_point_format(Format::new(2).unwrap()));
    }

    #[test]
    fn display() {
        assert_eq!("1.4", Version::new(1, 4).to_string());
    }
}
