//! Minimal EXIF writer (and reader) for JPEG files.
//!
//! Writes six descriptive tags into a fresh APP1 segment:
//!
//! | IFD | Tag | Type |
//! |---|---|---|
//! | 0 | ImageDescription (`0x010E`) | ASCII |
//! | 0 | Software (`0x0131`) | ASCII |
//! | 0 | Artist (`0x013B`) | ASCII |
//! | 0 | Copyright (`0x8298`) | ASCII |
//! | Exif | DateTimeOriginal (`0x9003`) | ASCII |
//! | Exif | UserComment (`0x9286`) | UNDEFINED, 8-byte charset prefix |
//!
//! Layout of the segment (big-endian TIFF):
//!
//! ```text
//! FF E1 <len>  "Exif\0\0"
//!   "MM" 002A 00000008
//!   IFD0: count, entries (sorted by tag), next=0, data area
//!   Exif IFD: count, entries, next=0, data area
//! ```
//!
//! ASCII tags carry UTF-8 bytes as-is; UserComment switches to the `UNICODE`
//! charset when the text is not plain ASCII.
//!
//! Insertion keeps the stream intact: everything from the first SOS marker on
//! is copied verbatim, an existing Exif APP1 is dropped, and the new segment
//! lands right after any leading APP0 (JFIF) segments.

use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExifError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("not a JPEG file")]
    NotJpeg,
    #[error("truncated JPEG segment at offset {0}")]
    Truncated(usize),
    #[error("EXIF segment too large ({0} bytes, max 65535)")]
    SegmentTooLarge(usize),
}

/// Tags written to (or read from) a JPEG. `None` fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExifFields {
    pub image_description: Option<String>,
    pub software: Option<String>,
    pub artist: Option<String>,
    pub copyright: Option<String>,
    pub date_time_original: Option<String>,
    pub user_comment: Option<String>,
}

/// Writes EXIF fields into an image file in place.
pub trait MetadataWriter: Sync {
    fn write(&self, path: &Path, fields: &ExifFields) -> Result<(), ExifError>;
}

/// [`MetadataWriter`] for baseline and progressive JPEG files.
#[derive(Debug, Default)]
pub struct JpegExifWriter;

impl MetadataWriter for JpegExifWriter {
    fn write(&self, path: &Path, fields: &ExifFields) -> Result<(), ExifError> {
        let bytes = std::fs::read(path)?;
        let segment = encode_app1(fields)?;
        let patched = insert_app1(&bytes, &segment)?;
        std::fs::write(path, patched)?;
        Ok(())
    }
}

const SOI: [u8; 2] = [0xFF, 0xD8];
const APP0: u8 = 0xE0;
const APP1: u8 = 0xE1;
const SOS: u8 = 0xDA;
const EOI: u8 = 0xD9;
const EXIF_HEADER: &[u8] = b"Exif\0\0";
const MAX_SEGMENT_LEN: usize = 0xFFFF;

const TAG_IMAGE_DESCRIPTION: u16 = 0x010E;
const TAG_SOFTWARE: u16 = 0x0131;
const TAG_ARTIST: u16 = 0x013B;
const TAG_COPYRIGHT: u16 = 0x8298;
const TAG_EXIF_IFD: u16 = 0x8769;
const TAG_DATE_TIME_ORIGINAL: u16 = 0x9003;
const TAG_USER_COMMENT: u16 = 0x9286;

const TYPE_ASCII: u16 = 2;
const TYPE_SHORT: u16 = 3;
const TYPE_LONG: u16 = 4;
const TYPE_UNDEFINED: u16 = 7;

const CHARSET_ASCII: &[u8; 8] = b"ASCII\0\0\0";
const CHARSET_UNICODE: &[u8; 8] = b"UNICODE\0";

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

struct Entry {
    tag: u16,
    kind: u16,
    count: u32,
    data: Vec<u8>,
}

impl Entry {
    fn ascii(tag: u16, text: &str) -> Self {
        let mut data = text.as_bytes().to_vec();
        data.push(0);
        Self {
            tag,
            kind: TYPE_ASCII,
            count: data.len() as u32,
            data,
        }
    }

    fn long(tag: u16, value: u32) -> Self {
        Self {
            tag,
            kind: TYPE_LONG,
            count: 1,
            data: value.to_be_bytes().to_vec(),
        }
    }

    fn user_comment(text: &str) -> Self {
        let mut data = Vec::with_capacity(8 + text.len() * 2);
        if text.is_ascii() {
            data.extend_from_slice(CHARSET_ASCII);
            data.extend_from_slice(text.as_bytes());
        } else {
            data.extend_from_slice(CHARSET_UNICODE);
            for unit in text.encode_utf16() {
                data.extend_from_slice(&unit.to_be_bytes());
            }
        }
        Self {
            tag: TAG_USER_COMMENT,
            kind: TYPE_UNDEFINED,
            count: data.len() as u32,
            data,
        }
    }
}

/// Bytes an IFD occupies: header, entries, next pointer, and its data area.
fn ifd_len(entries: &[Entry]) -> usize {
    let data: usize = entries
        .iter()
        .filter(|e| e.data.len() > 4)
        .map(|e| e.data.len().next_multiple_of(2))
        .sum();
    2 + entries.len() * 12 + 4 + data
}

/// Append an IFD that starts at TIFF offset `offset`. Entries must be sorted.
fn write_ifd(out: &mut Vec<u8>, entries: &[Entry], offset: usize) {
    let mut data_offset = offset + 2 + entries.len() * 12 + 4;
    let mut data_area = Vec::new();

    out.extend_from_slice(&(entries.len() as u16).to_be_bytes());
    for entry in entries {
        out.extend_from_slice(&entry.tag.to_be_bytes());
        out.extend_from_slice(&entry.kind.to_be_bytes());
        out.extend_from_slice(&entry.count.to_be_bytes());
        if entry.data.len() <= 4 {
            let mut inline = [0u8; 4];
            inline[..entry.data.len()].copy_from_slice(&entry.data);
            out.extend_from_slice(&inline);
        } else {
            out.extend_from_slice(&(data_offset as u32).to_be_bytes());
            data_area.extend_from_slice(&entry.data);
            if entry.data.len() % 2 == 1 {
                data_area.push(0);
            }
            data_offset += entry.data.len().next_multiple_of(2);
        }
    }
    out.extend_from_slice(&0u32.to_be_bytes());
    out.extend_from_slice(&data_area);
}

/// Serialize `fields` as a big-endian TIFF structure.
pub fn encode_tiff(fields: &ExifFields) -> Vec<u8> {
    let mut ifd0: Vec<Entry> = [
        (TAG_IMAGE_DESCRIPTION, &fields.image_description),
        (TAG_SOFTWARE, &fields.software),
        (TAG_ARTIST, &fields.artist),
        (TAG_COPYRIGHT, &fields.copyright),
    ]
    .into_iter()
    .filter_map(|(tag, value)| value.as_deref().map(|v| Entry::ascii(tag, v)))
    .collect();

    let mut exif_ifd = Vec::new();
    if let Some(date) = &fields.date_time_original {
        exif_ifd.push(Entry::ascii(TAG_DATE_TIME_ORIGINAL, date));
    }
    if let Some(comment) = &fields.user_comment {
        exif_ifd.push(Entry::user_comment(comment));
    }

    if !exif_ifd.is_empty() {
        // Pointer value is patched below once IFD0's size is known
        ifd0.push(Entry::long(TAG_EXIF_IFD, 0));
    }
    ifd0.sort_by_key(|e| e.tag);

    let exif_offset = 8 + ifd_len(&ifd0);
    if let Some(pointer) = ifd0.iter_mut().find(|e| e.tag == TAG_EXIF_IFD) {
        pointer.data = (exif_offset as u32).to_be_bytes().to_vec();
    }

    let mut out = Vec::with_capacity(exif_offset + ifd_len(&exif_ifd));
    out.extend_from_slice(b"MM");
    out.extend_from_slice(&42u16.to_be_bytes());
    out.extend_from_slice(&8u32.to_be_bytes());
    write_ifd(&mut out, &ifd0, 8);
    if !exif_ifd.is_empty() {
        write_ifd(&mut out, &exif_ifd, exif_offset);
    }
    out
}

/// Build a complete APP1 segment (marker, length, `Exif\0\0`, TIFF).
pub fn encode_app1(fields: &ExifFields) -> Result<Vec<u8>, ExifError> {
    let tiff = encode_tiff(fields);
    let len = 2 + EXIF_HEADER.len() + tiff.len();
    if len > MAX_SEGMENT_LEN {
        return Err(ExifError::SegmentTooLarge(len));
    }

    let mut segment = Vec::with_capacity(2 + len);
    segment.extend_from_slice(&[0xFF, APP1]);
    segment.extend_from_slice(&(len as u16).to_be_bytes());
    segment.extend_from_slice(EXIF_HEADER);
    segment.extend_from_slice(&tiff);
    Ok(segment)
}

// ---------------------------------------------------------------------------
// JPEG segment handling
// ---------------------------------------------------------------------------

/// A marker segment before the scan data, as a byte range of the file.
struct Segment<'a> {
    marker: u8,
    bytes: &'a [u8],
}

impl Segment<'_> {
    fn payload(&self) -> &[u8] {
        self.bytes.get(4..).unwrap_or(&[])
    }

    fn is_exif(&self) -> bool {
        self.marker == APP1 && self.payload().starts_with(EXIF_HEADER)
    }
}

/// Split a JPEG into its header segments and the remainder (SOS onward).
fn split_segments(data: &[u8]) -> Result<(Vec<Segment<'_>>, &[u8]), ExifError> {
    if !data.starts_with(&SOI) {
        return Err(ExifError::NotJpeg);
    }

    let mut segments = Vec::new();
    let mut pos = 2;
    loop {
        if pos + 1 >= data.len() {
            return Err(ExifError::Truncated(pos));
        }
        if data[pos] != 0xFF {
            return Err(ExifError::Truncated(pos));
        }
        // Fill bytes before a marker
        if data[pos + 1] == 0xFF {
            pos += 1;
            continue;
        }

        let marker = data[pos + 1];
        if marker == SOS || marker == EOI {
            return Ok((segments, &data[pos..]));
        }
        // Standalone markers carry no length
        if marker == 0x01 || (0xD0..=0xD7).contains(&marker) {
            segments.push(Segment {
                marker,
                bytes: &data[pos..pos + 2],
            });
            pos += 2;
            continue;
        }

        let Some(len_bytes) = data.get(pos + 2..pos + 4) else {
            return Err(ExifError::Truncated(pos));
        };
        let len = u16::from_be_bytes([len_bytes[0], len_bytes[1]]) as usize;
        let end = pos + 2 + len;
        if len < 2 || end > data.len() {
            return Err(ExifError::Truncated(pos));
        }
        segments.push(Segment {
            marker,
            bytes: &data[pos..end],
        });
        pos = end;
    }
}

/// Return a copy of `jpeg` with `segment` as its only Exif APP1.
pub fn insert_app1(jpeg: &[u8], segment: &[u8]) -> Result<Vec<u8>, ExifError> {
    let (segments, rest) = split_segments(jpeg)?;

    let mut out = Vec::with_capacity(jpeg.len() + segment.len());
    out.extend_from_slice(&SOI);

    let mut inserted = false;
    for seg in segments.iter().filter(|s| !s.is_exif()) {
        if !inserted && seg.marker != APP0 {
            out.extend_from_slice(segment);
            inserted = true;
        }
        out.extend_from_slice(seg.bytes);
    }
    if !inserted {
        out.extend_from_slice(segment);
    }
    out.extend_from_slice(rest);
    Ok(out)
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// Read the descriptive tags back from a JPEG. `None` if it has no Exif APP1.
pub fn read_exif(jpeg: &[u8]) -> Result<Option<ExifFields>, ExifError> {
    let (segments, _) = split_segments(jpeg)?;
    Ok(segments
        .iter()
        .find(|s| s.is_exif())
        .and_then(|s| parse_tiff(&s.payload()[EXIF_HEADER.len()..])))
}

/// Reads JPEG files with [`read_exif`].
pub fn read_exif_file(path: &Path) -> Result<Option<ExifFields>, ExifError> {
    read_exif(&std::fs::read(path)?)
}

struct Tiff<'a> {
    data: &'a [u8],
    big_endian: bool,
}

impl Tiff<'_> {
    fn u16_at(&self, pos: usize) -> Option<u16> {
        let b: [u8; 2] = self.data.get(pos..pos + 2)?.try_into().ok()?;
        Some(if self.big_endian {
            u16::from_be_bytes(b)
        } else {
            u16::from_le_bytes(b)
        })
    }

    fn u32_at(&self, pos: usize) -> Option<u32> {
        let b: [u8; 4] = self.data.get(pos..pos + 4)?.try_into().ok()?;
        Some(self.u32_from(b))
    }

    fn u32_from(&self, b: [u8; 4]) -> u32 {
        if self.big_endian {
            u32::from_be_bytes(b)
        } else {
            u32::from_le_bytes(b)
        }
    }

    /// `(tag, value bytes)` for every entry of the IFD at `offset`.
    fn entries(&self, offset: usize) -> Vec<(u16, &[u8])> {
        let Some(count) = self.u16_at(offset) else {
            return Vec::new();
        };
        (0..count as usize)
            .filter_map(|i| {
                let at = offset + 2 + i * 12;
                let tag = self.u16_at(at)?;
                let unit = match self.u16_at(at + 2)? {
                    TYPE_ASCII | TYPE_UNDEFINED => 1,
                    TYPE_SHORT => 2,
                    TYPE_LONG => 4,
                    _ => return None,
                };
                let len = self.u32_at(at + 4)? as usize * unit;
                let start = if len <= 4 {
                    at + 8
                } else {
                    self.u32_at(at + 8)? as usize
                };
                Some((tag, self.data.get(start..start + len)?))
            })
            .collect()
    }
}

fn parse_tiff(data: &[u8]) -> Option<ExifFields> {
    let big_endian = match data.get(..2)? {
        b"MM" => true,
        b"II" => false,
        _ => return None,
    };
    let tiff = Tiff { data, big_endian };
    if tiff.u16_at(2)? != 42 {
        return None;
    }

    let mut fields = ExifFields::default();
    let mut exif_offset = None;
    for (tag, value) in tiff.entries(tiff.u32_at(4)? as usize) {
        match tag {
            TAG_IMAGE_DESCRIPTION => fields.image_description = Some(ascii(value)),
            TAG_SOFTWARE => fields.software = Some(ascii(value)),
            TAG_ARTIST => fields.artist = Some(ascii(value)),
            TAG_COPYRIGHT => fields.copyright = Some(ascii(value)),
            TAG_EXIF_IFD => {
                exif_offset = value.try_into().ok().map(|b| tiff.u32_from(b) as usize)
            }
            _ => {}
        }
    }

    if let Some(offset) = exif_offset {
        for (tag, value) in tiff.entries(offset) {
            match tag {
                TAG_DATE_TIME_ORIGINAL => fields.date_time_original = Some(ascii(value)),
                TAG_USER_COMMENT => fields.user_comment = Some(user_comment(value, big_endian)),
                _ => {}
            }
        }
    }

    Some(fields)
}

fn ascii(value: &[u8]) -> String {
    let end = value.iter().position(|&b| b == 0).unwrap_or(value.len());
    String::from_utf8_lossy(&value[..end]).to_string()
}

fn user_comment(value: &[u8], big_endian: bool) -> String {
    let (code, text) = value.split_at(value.len().min(8));
    if code == CHARSET_UNICODE {
        let units: Vec<u16> = text
            .chunks_exact(2)
            .map(|c| {
                if big_endian {
                    u16::from_be_bytes([c[0], c[1]])
                } else {
                    u16::from_le_bytes([c[0], c[1]])
                }
            })
            .collect();
        String::from_utf16_lossy(&units)
            .trim_end_matches('\0')
            .to_string()
    } else {
        String::from_utf8_lossy(text).trim_end_matches('\0').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::write_jpeg;
    use tempfile::TempDir;

    fn sample_fields() -> ExifFields {
        ExifFields {
            image_description: Some("Night Hours".into()),
            software: Some("Lulu Tracy".into()),
            artist: Some("Lulu Tracy".into()),
            copyright: Some("© 2026 Lulu Tracy. All rights reserved.".into()),
            date_time_original: Some("2023:01:01 00:00:00".into()),
            user_comment: Some("Blue hour | Medium: Oil on linen".into()),
        }
    }

    /// SOI, JFIF APP0, a DQT stub, SOS and a few scan bytes, EOI.
    fn minimal_jpeg() -> Vec<u8> {
        let mut data = vec![0xFF, 0xD8];
        data.extend_from_slice(&[0xFF, 0xE0, 0x00, 0x10]);
        data.extend_from_slice(b"JFIF\0\x01\x01\0\0\x01\0\x01\0\0");
        data.extend_from_slice(&[0xFF, 0xDB, 0x00, 0x04, 0xAA, 0xBB]);
        data.extend_from_slice(&[0xFF, 0xDA, 0x00, 0x02, 0x12, 0x34, 0xFF, 0x00, 0x56]);
        data.extend_from_slice(&[0xFF, 0xD9]);
        data
    }

    fn markers(jpeg: &[u8]) -> Vec<u8> {
        let (segments, _) = split_segments(jpeg).unwrap();
        segments.iter().map(|s| s.marker).collect()
    }

    #[test]
    fn tiff_header_is_big_endian() {
        let tiff = encode_tiff(&sample_fields());
        assert_eq!(&tiff[..8], &[b'M', b'M', 0x00, 0x2A, 0, 0, 0, 8]);
    }

    #[test]
    fn ifd0_entries_are_sorted_by_tag() {
        let tiff = encode_tiff(&sample_fields());
        let count = u16::from_be_bytes([tiff[8], tiff[9]]) as usize;
        assert_eq!(count, 5);
        let tags: Vec<u16> = (0..count)
            .map(|i| u16::from_be_bytes([tiff[10 + i * 12], tiff[11 + i * 12]]))
            .collect();
        assert_eq!(
            tags,
            vec![
                TAG_IMAGE_DESCRIPTION,
                TAG_SOFTWARE,
                TAG_ARTIST,
                TAG_COPYRIGHT,
                TAG_EXIF_IFD
            ]
        );
    }

    #[test]
    fn encode_then_read_recovers_fields() {
        let segment = encode_app1(&sample_fields()).unwrap();
        let jpeg = insert_app1(&minimal_jpeg(), &segment).unwrap();
        assert_eq!(read_exif(&jpeg).unwrap(), Some(sample_fields()));
    }

    #[test]
    fn short_values_are_stored_inline() {
        let fields = ExifFields {
            artist: Some("Lu".into()),
            ..Default::default()
        };
        let tiff = encode_tiff(&fields);
        // header + count + one entry + next pointer, no data area
        assert_eq!(tiff.len(), 8 + 2 + 12 + 4);
        assert_eq!(&tiff[18..22], b"Lu\0\0");
    }

    #[test]
    fn odd_length_values_are_word_aligned() {
        let fields = ExifFields {
            image_description: Some("abcde".into()), // 6 bytes with NUL
            artist: Some("abcdef".into()),           // 7 bytes with NUL, padded
            copyright: Some("xyzzy".into()),
            ..Default::default()
        };
        let tiff = encode_tiff(&fields);
        let offsets: Vec<u32> = (0..3)
            .map(|i| {
                let at = 10 + i * 12 + 8;
                u32::from_be_bytes(tiff[at..at + 4].try_into().unwrap())
            })
            .collect();
        assert!(offsets.iter().all(|o| o % 2 == 0));
        assert_eq!(offsets[2] - offsets[1], 8);
        assert_eq!(
            read_exif(&insert_app1(&minimal_jpeg(), &encode_app1(&fields).unwrap()).unwrap())
                .unwrap()
                .unwrap(),
            fields
        );
    }

    #[test]
    fn ascii_user_comment_prefix() {
        let entry = Entry::user_comment("Oil on linen");
        assert_eq!(&entry.data[..8], CHARSET_ASCII);
        assert_eq!(&entry.data[8..], b"Oil on linen");
    }

    #[test]
    fn unicode_user_comment_is_utf16be() {
        let entry = Entry::user_comment("油画");
        assert_eq!(&entry.data[..8], CHARSET_UNICODE);
        assert_eq!(&entry.data[8..], &[0x6C, 0xB9, 0x75, 0x3B]);

        let fields = ExifFields {
            user_comment: Some("河上的蓝色时刻 | Year: 2023".into()),
            ..Default::default()
        };
        let jpeg = insert_app1(&minimal_jpeg(), &encode_app1(&fields).unwrap()).unwrap();
        assert_eq!(read_exif(&jpeg).unwrap().unwrap(), fields);
    }

    #[test]
    fn no_exif_ifd_without_exif_fields() {
        let fields = ExifFields {
            artist: Some("Lulu Tracy".into()),
            ..Default::default()
        };
        let tiff = encode_tiff(&fields);
        assert_eq!(u16::from_be_bytes([tiff[8], tiff[9]]), 1);
    }

    #[test]
    fn segment_goes_after_app0() {
        let segment = encode_app1(&sample_fields()).unwrap();
        let jpeg = insert_app1(&minimal_jpeg(), &segment).unwrap();
        assert_eq!(markers(&jpeg), vec![APP0, APP1, 0xDB]);
    }

    #[test]
    fn segment_goes_first_without_app0() {
        let mut jpeg = vec![0xFF, 0xD8];
        jpeg.extend_from_slice(&[0xFF, 0xDB, 0x00, 0x03, 0x01]);
        jpeg.extend_from_slice(&[0xFF, 0xDA, 0x00, 0x02, 0xFF, 0xD9]);

        let out = insert_app1(&jpeg, &encode_app1(&sample_fields()).unwrap()).unwrap();
        assert_eq!(markers(&out), vec![APP1, 0xDB]);
    }

    #[test]
    fn existing_exif_is_replaced() {
        let first = ExifFields {
            artist: Some("Someone Else".into()),
            ..Default::default()
        };
        let once = insert_app1(&minimal_jpeg(), &encode_app1(&first).unwrap()).unwrap();
        let twice = insert_app1(&once, &encode_app1(&sample_fields()).unwrap()).unwrap();

        assert_eq!(markers(&twice), vec![APP0, APP1, 0xDB]);
        assert_eq!(read_exif(&twice).unwrap(), Some(sample_fields()));
    }

    #[test]
    fn non_exif_app1_is_kept() {
        let mut jpeg = vec![0xFF, 0xD8];
        let xmp = b"http://ns.adobe.com/xap/1.0/\0<x/>";
        jpeg.extend_from_slice(&[0xFF, APP1]);
        jpeg.extend_from_slice(&((xmp.len() + 2) as u16).to_be_bytes());
        jpeg.extend_from_slice(xmp);
        jpeg.extend_from_slice(&[0xFF, 0xDA, 0x00, 0x02, 0xFF, 0xD9]);

        let out = insert_app1(&jpeg, &encode_app1(&sample_fields()).unwrap()).unwrap();
        assert_eq!(markers(&out), vec![APP1, APP1]);
        assert!(out.windows(xmp.len()).any(|w| w == xmp));
    }

    #[test]
    fn scan_data_is_copied_verbatim() {
        let original = minimal_jpeg();
        let out = insert_app1(&original, &encode_app1(&sample_fields()).unwrap()).unwrap();
        let sos = original.iter().position(|&b| b == SOS).unwrap() - 1;
        assert!(out.ends_with(&original[sos..]));
    }

    #[test]
    fn rejects_non_jpeg() {
        let err = insert_app1(b"\x89PNG\r\n", &[]).unwrap_err();
        assert!(matches!(err, ExifError::NotJpeg));
    }

    #[test]
    fn rejects_truncated_segment() {
        let data = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x20, 0x00];
        assert!(matches!(
            insert_app1(&data, &[]),
            Err(ExifError::Truncated(2))
        ));
    }

    #[test]
    fn rejects_oversized_segment() {
        let fields = ExifFields {
            user_comment: Some("x".repeat(70_000)),
            ..Default::default()
        };
        assert!(matches!(
            encode_app1(&fields),
            Err(ExifError::SegmentTooLarge(_))
        ));
    }

    #[test]
    fn read_exif_none_when_absent() {
        assert_eq!(read_exif(&minimal_jpeg()).unwrap(), None);
    }

    #[test]
    fn writer_patches_real_jpeg_in_place() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("night-hours.jpg");
        write_jpeg(&path, 32, 24);

        JpegExifWriter.write(&path, &sample_fields()).unwrap();

        assert_eq!(read_exif_file(&path).unwrap(), Some(sample_fields()));
        let dims = image::image_dimensions(&path).unwrap();
        assert_eq!(dims, (32, 24));
    }
}
