//! EXIF capture metadata
//!
//! Reads the primary IFD (with its Exif and GPS sub-IFDs) of a JPEG, TIFF,
//! HEIF, PNG or WebP file. Every field is optional; a file without EXIF yields
//! an empty [`ExifData`] rather than an error from [`read_exif_file`].

use std::fs::File;
use std::io::{BufRead, BufReader, Seek};
use std::path::{Path, PathBuf};

use chrono::{FixedOffset, NaiveDate, SecondsFormat, TimeZone};
use exif::{Exif, In, Tag, Value};
use thiserror::Error;
use wedshots_core::PhotoMetadata;

#[derive(Debug, Error)]
pub enum ExifError {
    #[error("EXIF decode error: {0}")]
    Decode(#[from] exif::Error),
}

/// Capture metadata, already formatted the way photo records store it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExifData {
    pub date_taken: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub altitude: Option<f64>,
    pub focal_length: Option<String>,
    pub f_number: Option<String>,
    pub exposure_time: Option<String>,
    pub iso: Option<i64>,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub orientation: Option<i64>,
}

impl ExifData {
    pub fn is_empty(&self) -> bool {
        *self == ExifData::default()
    }

    /// Copy every extracted field onto a photo record.
    pub fn apply_to(self, metadata: &mut PhotoMetadata) {
        metadata.date_taken = self.date_taken;
        metadata.make = self.make;
        metadata.model = self.model;
        metadata.latitude = self.latitude;
        metadata.longitude = self.longitude;
        metadata.altitude = self.altitude;
        metadata.focal_length = self.focal_length;
        metadata.f_number = self.f_number;
        metadata.exposure_time = self.exposure_time;
        metadata.iso = self.iso;
        metadata.width = self.width;
        metadata.height = self.height;
        metadata.orientation = self.orientation;
    }
}

/// Read EXIF from a file on disk. Missing or undecodable EXIF is logged and
/// yields empty data.
pub fn read_exif_file(path: &Path) -> ExifData {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            tracing::warn!(error = %e, path = %path.display(), "Failed to open file for EXIF");
            return ExifData::default();
        }
    };

    let mut reader = BufReader::new(file);
    match extract_exif(&mut reader) {
        Ok(data) => data,
        Err(e) => {
            tracing::debug!(error = %e, path = %path.display(), "No EXIF data found");
            ExifData::default()
        }
    }
}

/// [`read_exif_file`] on the blocking pool, keeping file I/O and decoding off
/// the async workers. A failed read task yields empty data.
pub async fn read_exif(path: PathBuf) -> ExifData {
    tokio::task::spawn_blocking(move || read_exif_file(&path))
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "EXIF read task failed");
            ExifData::default()
        })
}

/// Parse EXIF from any seekable container.
pub fn extract_exif<R: BufRead + Seek>(reader: &mut R) -> Result<ExifData, ExifError> {
    let exif = exif::Reader::new().read_from_container(reader)?;

    let focal_length = rational(&exif, Tag::FocalLength).map(format_focal_length);
    let f_number = rational(&exif, Tag::FNumber).map(format_f_number);
    let exposure_time = match exif.get_field(Tag::ExposureTime, In::PRIMARY) {
        Some(field) => match &field.value {
            Value::Rational(values) => values
                .first()
                .and_then(|r| format_exposure_time(r.num, r.denom)),
            _ => None,
        },
        None => None,
    };

    let (latitude, longitude) = match gps_coordinates(&exif) {
        Some((lat, lon)) => (Some(lat), Some(lon)),
        None => (None, None),
    };

    Ok(ExifData {
        date_taken: date_taken(&exif),
        make: ascii(&exif, Tag::Make),
        model: ascii(&exif, Tag::Model),
        latitude,
        longitude,
        altitude: gps_altitude(&exif),
        focal_length,
        f_number,
        exposure_time,
        iso: uint(&exif, Tag::PhotographicSensitivity),
        width: uint(&exif, Tag::PixelXDimension),
        height: uint(&exif, Tag::PixelYDimension),
        orientation: uint(&exif, Tag::Orientation),
    })
}

/// `"50.0mm"`
pub fn format_focal_length(mm: f64) -> String {
    format!("{:.1}mm", mm)
}

/// `"f/1.8"`
pub fn format_f_number(value: f64) -> String {
    format!("f/{:.1}", value)
}

/// Exact exposure fraction in lowest terms, e.g. `"1/500"`. Never a decimal.
pub fn format_exposure_time(num: u32, denom: u32) -> Option<String> {
    if denom == 0 {
        return None;
    }
    let divisor = gcd(num, denom);
    Some(format!("{}/{}", num / divisor, denom / divisor))
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

fn ascii(exif: &Exif, tag: Tag) -> Option<String> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    match &field.value {
        Value::Ascii(values) => {
            let raw = values.first()?;
            let text = String::from_utf8_lossy(raw);
            let text = text.trim_matches(char::from(0)).trim();
            if text.is_empty() {
                None
            } else {
                Some(text.to_string())
            }
        }
        _ => None,
    }
}

fn uint(exif: &Exif, tag: Tag) -> Option<i64> {
    exif.get_field(tag, In::PRIMARY)?
        .value
        .get_uint(0)
        .map(i64::from)
}

fn rational(exif: &Exif, tag: Tag) -> Option<f64> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    match &field.value {
        Value::Rational(values) => {
            let r = values.first()?;
            if r.denom == 0 {
                None
            } else {
                Some(r.to_f64())
            }
        }
        _ => None,
    }
}

fn dms_to_decimal(degrees: f64, minutes: f64, seconds: f64) -> f64 {
    degrees + minutes / 60.0 + seconds / 3600.0
}

fn gps_component(exif: &Exif, value_tag: Tag) -> Option<f64> {
    let field = exif.get_field(value_tag, In::PRIMARY)?;
    match &field.value {
        Value::Rational(values) if values.len() >= 3 => {
            if values.iter().take(3).any(|r| r.denom == 0) {
                return None;
            }
            Some(dms_to_decimal(
                values[0].to_f64(),
                values[1].to_f64(),
                values[2].to_f64(),
            ))
        }
        _ => None,
    }
}

fn gps_coordinates(exif: &Exif) -> Option<(f64, f64)> {
    let lat = gps_component(exif, Tag::GPSLatitude)?;
    let lon = gps_component(exif, Tag::GPSLongitude)?;
    let lat_ref = ascii(exif, Tag::GPSLatitudeRef)?;
    let lon_ref = ascii(exif, Tag::GPSLongitudeRef)?;

    let lat = if lat_ref.starts_with('S') { -lat } else { lat };
    let lon = if lon_ref.starts_with('W') { -lon } else { lon };
    Some((lat, lon))
}

fn gps_altitude(exif: &Exif) -> Option<f64> {
    let altitude = rational(exif, Tag::GPSAltitude)?;
    // Ref 1 means below sea level
    let below_sea_level = exif
        .get_field(Tag::GPSAltitudeRef, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        == Some(1);
    Some(if below_sea_level { -altitude } else { altitude })
}

/// DateTimeOriginal (falling back to DateTime) as RFC 3339. The matching
/// OffsetTime tag supplies the zone when present, otherwise UTC is assumed.
fn date_taken(exif: &Exif) -> Option<String> {
    parse_datetime(exif, Tag::DateTimeOriginal, Tag::OffsetTimeOriginal)
        .or_else(|| parse_datetime(exif, Tag::DateTime, Tag::OffsetTime))
}

fn parse_datetime(exif: &Exif, tag: Tag, offset_tag: Tag) -> Option<String> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    let raw = match &field.value {
        Value::Ascii(values) => values.first()?,
        _ => return None,
    };
    let mut datetime = exif::DateTime::from_ascii(raw).ok()?;

    if let Some(offset_field) = exif.get_field(offset_tag, In::PRIMARY) {
        if let Value::Ascii(values) = &offset_field.value {
            if let Some(offset) = values.first() {
                // An unparseable offset leaves the timestamp in UTC
                let _ = datetime.parse_offset(offset);
            }
        }
    }

    let naive = NaiveDate::from_ymd_opt(
        i32::from(datetime.year),
        u32::from(datetime.month),
        u32::from(datetime.day),
    )?
    .and_hms_opt(
        u32::from(datetime.hour),
        u32::from(datetime.minute),
        u32::from(datetime.second),
    )?;

    let offset_secs = i32::from(datetime.offset.unwrap_or(0)) * 60;
    let zone = FixedOffset::east_opt(offset_secs)?;
    let local = zone.from_local_datetime(&naive).single()?;

    Some(local.to_rfc3339_opts(SecondsFormat::Secs, true))
}
