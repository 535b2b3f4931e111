//! Full waveform data.
//!
//! Points in formats 4, 5, 9 and 10 reference a packet of digitized waveform samples. How to
//! interpret a packet is described by one of up to 255 wave packet descriptors, stored in the
//! `LASF_Spec` vlrs with record ids 100 through 354. The packets themselves are stored in the
//! waveform data packet record at the end of the file (internal) or in a sibling `.wdp` file
//! (external).
//!
//! ```
//! use las_stream::{Builder, point::Format};
//! use las_stream::waveform::WavePacketDescriptor;
//!
//! let descriptor = WavePacketDescriptor {
//!     bits_per_sample: 8,
//!     number_of_samples: 256,
//!     ..Default::default()
//! };
//! let mut builder = Builder::from((1, 3));
//! builder.point_format = Format::new(4).unwrap();
//! builder.vlrs.push(descriptor.to_vlr(1).unwrap());
//! let header = builder.into_header().unwrap();
//!
//! let descriptors = header.waveform_packet_descriptors();
//! assert_eq!(Some(&descriptor), descriptors.descriptor_for(1));
//! assert_eq!(None, descriptors.descriptor_for(0));
//! ```

use crate::{
    Error, Header, Result, Vlr,
    raw::{point::Waveform, vlr::EVLR_HEADER_LEN},
    vlr::{WAVEFORM_DATA_PACKETS_RECORD_ID, WAVEFORM_PACKET_DESCRIPTOR_RECORD_IDS},
};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use log::warn;
use std::{
    io::{Cursor, Write},
    path::{Path, PathBuf},
};

/// The size of a wave packet descriptor's payload.
pub const DESCRIPTOR_LEN: usize = 26;

const NUMBER_OF_SLOTS: usize = 255;

/// Describes how to interpret the samples of a waveform packet.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WavePacketDescriptor {
    /// Bits per sample, 2 through 32.
    pub bits_per_sample: u8,

    /// The compression type, zero for uncompressed.
    pub compression_type: u8,

    /// The number of samples in a packet.
    pub number_of_samples: u32,

    /// The temporal sample spacing in picoseconds.
    pub temporal_sample_spacing: u32,

    /// The gain used to convert raw samples to volts.
    pub digitizer_gain: f64,

    /// The offset used to convert raw samples to volts.
    pub digitizer_offset: f64,
}

impl WavePacketDescriptor {
    /// Reads a descriptor from a vlr payload.
    pub fn read_from(data: &[u8]) -> Result<WavePacketDescriptor> {
        let mut cursor = Cursor::new(data);
        Ok(WavePacketDescriptor {
            bits_per_sample: cursor.read_u8()?,
            compression_type: cursor.read_u8()?,
            number_of_samples: cursor.read_u32::<LittleEndian>()?,
            temporal_sample_spacing: cursor.read_u32::<LittleEndian>()?,
            digitizer_gain: cursor.read_f64::<LittleEndian>()?,
            digitizer_offset: cursor.read_f64::<LittleEndian>()?,
        })
    }

    /// Writes this descriptor's 26 bytes.
    pub fn write_to<W: Write>(&self, mut write: W) -> Result<()> {
        write.write_u8(self.bits_per_sample)?;
        write.write_u8(self.compression_type)?;
        write.write_u32::<LittleEndian>(self.number_of_samples)?;
        write.write_u32::<LittleEndian>(self.temporal_sample_spacing)?;
        write.write_f64::<LittleEndian>(self.digitizer_gain)?;
        write.write_f64::<LittleEndian>(self.digitizer_offset)?;
        Ok(())
    }

    /// Creates the vlr for this descriptor, as referenced by points with the one-based
    /// `descriptor_index`.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_stream::waveform::WavePacketDescriptor;
    /// let vlr = WavePacketDescriptor::default().to_vlr(1).unwrap();
    /// assert_eq!(100, vlr.record_id);
    /// assert!(WavePacketDescriptor::default().to_vlr(0).is_err());
    /// ```
    pub fn to_vlr(&self, descriptor_index: u8) -> Result<Vlr> {
        if descriptor_index == 0 {
            return Err(Error::WaveformLayout {
                index: 0,
                offset: 0,
                reason: "descriptor index zero means no waveform packet",
            });
        }
        let mut data = Vec::with_capacity(DESCRIPTOR_LEN);
        self.write_to(&mut data)?;
        Ok(Vlr {
            user_id: "LASF_Spec".to_string(),
            record_id: WAVEFORM_PACKET_DESCRIPTOR_RECORD_IDS.start() + u16::from(descriptor_index)
                - 1,
            description: "Waveform Packet Descriptor".to_string(),
            data,
        })
    }
}

/// The 255 wave packet descriptor slots of a header.
///
/// Slot `n` holds the descriptor of the vlr with record id `100 + n`.
#[derive(Clone, Debug, PartialEq)]
pub struct WavePacketDescriptors {
    slots: Vec<Option<WavePacketDescriptor>>,
}

impl WavePacketDescriptors {
    /// Returns the descriptor in a zero-based slot.
    pub fn get(&self, slot: usize) -> Option<&WavePacketDescriptor> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Returns the descriptor for a point's one-based descriptor index.
    ///
    /// Index zero means the point has no waveform packet.
    pub fn descriptor_for(&self, index: u8) -> Option<&WavePacketDescriptor> {
        if index == 0 {
            None
        } else {
            self.get(usize::from(index - 1))
        }
    }

    /// Returns the number of defined descriptors.
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Returns true if no descriptor is defined.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Header {
    /// Returns this header's wave packet descriptors.
    ///
    /// Descriptor records whose payload is too short are skipped with a warning.
    pub fn waveform_packet_descriptors(&self) -> WavePacketDescriptors {
        let mut slots = vec![None; NUMBER_OF_SLOTS];
        for vlr in self.all_vlrs().filter(|vlr| vlr.is_waveform_packet_descriptor()) {
            let slot = usize::from(vlr.record_id - WAVEFORM_PACKET_DESCRIPTOR_RECORD_IDS.start());
            if vlr.data.len() < DESCRIPTOR_LEN {
                warn!(
                    "wave packet descriptor {} has {} bytes, expected {}",
                    vlr.record_id,
                    vlr.data.len(),
                    DESCRIPTOR_LEN
                );
                continue;
            }
            match WavePacketDescriptor::read_from(&vlr.data) {
                Ok(descriptor) => slots[slot] = Some(descriptor),
                Err(err) => warn!("could not read wave packet descriptor {}: {err}", vlr.record_id),
            }
        }
        WavePacketDescriptors { slots }
    }

    /// Returns the waveform data packet record, if the packets are stored in this file.
    pub fn waveform_data(&self) -> Option<&Vlr> {
        self.find_vlr("LASF_Spec", WAVEFORM_DATA_PACKETS_RECORD_ID)
    }
}

/// Tolerances when checking the packet references of points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WaveformPolicy {
    /// Allow unreferenced bytes between consecutive packets.
    pub allow_gaps: bool,

    /// Allow a packet to start before the end of the previous one.
    ///
    /// Consecutive points that share one packet are always allowed.
    pub allow_unordered: bool,
}

/// Checks that points reference waveform packets in order and inside the waveform data.
///
/// Packet offsets are relative to the start of the waveform data packet record, so the first
/// packet is expected right after the record's 60-byte header.
///
/// ```
/// use las_stream::raw::point::Waveform;
/// use las_stream::waveform::{WaveformChecker, WaveformPolicy};
///
/// let mut checker = WaveformChecker::new(WaveformPolicy::default(), Some(100));
/// let mut waveform = Waveform {
///     wave_packet_descriptor_index: 1,
///     byte_offset_to_waveform_data: 60,
///     waveform_packet_size_in_bytes: 20,
///     ..Default::default()
/// };
/// checker.check(0, &waveform).unwrap();
/// waveform.byte_offset_to_waveform_data = 90;
/// assert!(checker.check(1, &waveform).is_err());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct WaveformChecker {
    policy: WaveformPolicy,
    data_len: Option<u64>,
    next_offset: u64,
    last_offset: Option<u64>,
}

impl WaveformChecker {
    /// Creates a new checker.
    ///
    /// `data_len` is the payload length of the waveform data packet record, if known.
    pub fn new(policy: WaveformPolicy, data_len: Option<u64>) -> WaveformChecker {
        WaveformChecker {
            policy,
            data_len: data_len.map(|n| n + EVLR_HEADER_LEN),
            next_offset: EVLR_HEADER_LEN,
            last_offset: None,
        }
    }

    /// Checks the packet reference of the point with the zero-based `index`.
    ///
    /// Points with descriptor index zero have no packet, and always pass.
    pub fn check(&mut self, index: u64, waveform: &Waveform) -> Result<()> {
        if waveform.wave_packet_descriptor_index == 0 {
            return Ok(());
        }
        let offset = waveform.byte_offset_to_waveform_data;
        let error = |reason| Error::WaveformLayout {
            index,
            offset,
            reason,
        };
        if offset < EVLR_HEADER_LEN {
            return Err(error("packet starts inside the record header"));
        }
        let end = offset
            .checked_add(u64::from(waveform.waveform_packet_size_in_bytes))
            .filter(|&end| self.data_len.is_none_or(|len| end <= len))
            .ok_or_else(|| error("packet ends past the waveform data"))?;
        if self.last_offset != Some(offset) {
            if offset < self.next_offset && !self.policy.allow_unordered {
                return Err(error("packet starts before the end of the previous packet"));
            }
            if offset > self.next_offset && !self.policy.allow_gaps {
                return Err(error("gap before packet"));
            }
        }
        self.next_offset = self.next_offset.max(end);
        self.last_offset = Some(offset);
        Ok(())
    }
}

/// Returns the path of the `.wdp` file next to a las file.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use las_stream::waveform::wdp_path;
/// assert_eq!(Path::new("points.wdp"), wdp_path("points.las"));
/// ```
pub fn wdp_path<P: AsRef<Path>>(path: P) -> PathBuf {
    path.as_ref().with_extension("wdp")
}

/// Writes the waveform data packet record as a `.wdp` file.
///
/// The record keeps its 60-byte header, so packet offsets stay valid.
pub fn write_wdp<W: Write>(record: &Vlr, mut write: W) -> Result<()> {
    record.clone().into_raw(true)?.write_to(&mut write)?;
    write.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Builder, point::Format};

    fn waveform(offset: u64, size: u32) -> Waveform {
        Waveform {
            wave_packet_descriptor_index: 1,
            byte_offset_to_waveform_data: offset,
            waveform_packet_size_in_bytes: size,
            ..Default::default()
        }
    }

    #[test]
    fn descriptor_slots() {
        let descriptor = WavePacketDescriptor {
            bits_per_sample: 16,
            number_of_samples: 64,
            digitizer_gain: 0.5,
            ..Default::default()
        };
        let mut builder = Builder::from((1, 4));
        builder.point_format = Format::new(9).unwrap();
        builder.vlrs.push(descriptor.to_vlr(255).unwrap());
        let mut short = descriptor.to_vlr(2).unwrap();
        short.data.truncate(10);
        builder.vlrs.push(short);
        let header = builder.into_header().unwrap();
        let descriptors = header.waveform_packet_descriptors();
        assert_eq!(1, descriptors.len());
        assert_eq!(Some(&descriptor), descriptors.get(254));
        assert_eq!(Some(&descriptor), descriptors.descriptor_for(255));
        assert_eq!(None, descriptors.descriptor_for(2));
    }

    #[test]
    fn waveform_data() {
        let mut builder = Builder::from((1, 4));
        builder.evlrs.push(Vlr {
            user_id: "LASF_Spec".to_string(),
            record_id: 65535,
            description: String::new(),
            data: vec![1, 2, 3],
        });
        let header = builder.into_header().unwrap();
        assert_eq!(vec![1, 2, 3], header.waveform_data().unwrap().data);
        assert!(Header::default().waveform_data().is_none());
    }

    #[test]
    fn ordered_packets() {
        let mut checker = WaveformChecker::new(WaveformPolicy::default(), Some(30));
        checker.check(0, &waveform(60, 10)).unwrap();
        checker.check(1, &waveform(60, 10)).unwrap();
        checker.check(2, &waveform(70, 20)).unwrap();
        assert!(checker.check(3, &waveform(90, 1)).is_err());
    }

    #[test]
    fn no_packet() {
        let mut checker = WaveformChecker::new(WaveformPolicy::default(), Some(0));
        let mut waveform = waveform(1000, 10);
        waveform.wave_packet_descriptor_index = 0;
        checker.check(0, &waveform).unwrap();
    }

    #[test]
    fn gaps() {
        let mut checker = WaveformChecker::new(WaveformPolicy::default(), None);
        checker.check(0, &waveform(60, 10)).unwrap();
        assert!(matches!(
            checker.check(1, &waveform(80, 10)),
            Err(Error::WaveformLayout { index: 1, offset: 80, .. })
        ));

        let policy = WaveformPolicy {
            allow_gaps: true,
            ..Default::default()
        };
        let mut checker = WaveformChecker::new(policy, None);
        checker.check(0, &waveform(60, 10)).unwrap();
        checker.check(1, &waveform(80, 10)).unwrap();
    }

    #[test]
    fn unordered() {
        let mut checker = WaveformChecker::new(WaveformPolicy::default(), None);
        checker.check(0, &waveform(60, 10)).unwrap();
        checker.check(1, &waveform(70, 10)).unwrap();
        assert!(checker.check(2, &waveform(60, 10)).is_err());

        let policy = WaveformPolicy {
            allow_unordered: true,
            ..Default::default()
        };
        let mut checker = WaveformChecker::new(policy, None);
        checker.check(0, &waveform(60, 10)).unwrap();
        checker.check(1, &waveform(70, 10)).unwrap();
        checker.check(2, &waveform(60, 10)).unwrap();
    }

    #[test]
    fn packet_end_overflows() {
        let policy = WaveformPolicy {
            allow_gaps: true,
            allow_unordered: true,
        };
        let mut checker = WaveformChecker::new(policy, None);
        assert!(matches!(
            checker.check(0, &waveform(u64::MAX - 5, 10)),
            Err(Error::WaveformLayout {
                index: 0,
                reason: "packet ends past the waveform data",
                ..
            })
        ));
    }

    #[test]
    fn wdp_keeps_the_record_header() {
        let record = Vlr {
            user_id: "LASF_Spec".to_string(),
            record_id: 65535,
            description: String::new(),
            data: vec![0; 10],
        };
        let mut bytes = Vec::new();
        write_wdp(&record, &mut bytes).unwrap();
        assert_eq!(70, bytes.len());
    }
}
