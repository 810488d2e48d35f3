use crate::domain::model::InputRecord;
use crate::utils::error::RowError;

pub const LATITUDE_ALIASES: [&str; 5] = ["lat", "latitude", "Lat", "Latitude", "Y"];
pub const LONGITUDE_ALIASES: [&str; 6] = ["lon", "longitude", "Long", "Longitude", "lng", "X"];

/// Raw latitude/longitude text of a record, before numeric coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawCoordinates<'a> {
    pub lat: &'a str,
    pub lon: &'a str,
}

pub fn extract_coordinates(record: &InputRecord) -> Result<RawCoordinates<'_>, RowError> {
    match (
        record.first_of(&LATITUDE_ALIASES),
        record.first_of(&LONGITUDE_ALIASES),
    ) {
        (Some(lat), Some(lon)) => Ok(RawCoordinates { lat, lon }),
        _ => Err(RowError::MissingCoordinates),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    /// Best-effort coercion, see [`coerce_degrees`].
    pub fn parse(raw: RawCoordinates<'_>) -> Self {
        Self {
            lat: coerce_degrees(raw.lat),
            lon: coerce_degrees(raw.lon),
        }
    }

    pub fn validate(&self) -> Result<(), RowError> {
        if (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon) {
            Ok(())
        } else {
            Err(RowError::InvalidCoordinates {
                lat: self.lat,
                lon: self.lon,
            })
        }
    }

    pub fn google_maps_link(&self) -> String {
        format!(
            "https://www.google.com/maps?q={},{}",
            format_degrees(&self.lat),
            format_degrees(&self.lon)
        )
    }

    pub fn street_view_link(&self) -> String {
        format!(
            "https://www.google.com/maps?q={lat},{lon}&layer=c&cbll={lat},{lon}",
            lat = format_degrees(&self.lat),
            lon = format_degrees(&self.lon)
        )
    }
}

/// Reads the leading decimal number of `text` (`"40.7128°"` -> 40.7128).
/// Text without one, and non-finite results, become 0.0.
pub fn coerce_degrees(text: &str) -> f64 {
    let text = text.trim();
    let bytes = text.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first().copied(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_end = digits_from(end);
    let mut has_digits = int_end > end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        if frac_end > end + 1 {
            has_digits = true;
            end = frac_end;
        }
    }
    if !has_digits {
        return 0.0;
    }

    // exponent only counts when digits follow it
    if matches!(bytes.get(end).copied(), Some(b'e' | b'E')) {
        let mut exp_start = end + 1;
        if matches!(bytes.get(exp_start).copied(), Some(b'+' | b'-')) {
            exp_start += 1;
        }
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }

    text[..end]
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Whole numbers keep a trailing `.0` (`40.0`, not `40`).
pub fn format_degrees(value: &f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_priority() {
        let record = InputRecord::from_pairs([
            ("Y", "10.0"),
            ("latitude", "20.5"),
            ("X", "30.0"),
            ("lng", "40.25"),
        ]);
        let raw = extract_coordinates(&record).unwrap();
        assert_eq!(raw.lat, "20.5");
        assert_eq!(raw.lon, "40.25");
    }

    #[test]
    fn test_aliases_are_case_sensitive() {
        let record = InputRecord::from_pairs([("LAT", "1"), ("LON", "2")]);
        assert_eq!(extract_coordinates(&record), Err(RowError::MissingCoordinates));
    }

    #[test]
    fn test_missing_longitude() {
        let record = InputRecord::from_pairs([("lat", "51.5"), ("lon", "")]);
        assert_eq!(extract_coordinates(&record), Err(RowError::MissingCoordinates));
    }

    #[test]
    fn test_parse_failure_yields_zero() {
        let coords = Coordinates::parse(RawCoordinates {
            lat: "north",
            lon: " 12.5 ",
        });
        assert_eq!(coords, Coordinates { lat: 0.0, lon: 12.5 });
        assert!(coords.validate().is_ok());
    }

    #[test]
    fn test_non_finite_text_coerces_to_zero() {
        assert_eq!(coerce_degrees("NaN"), 0.0);
        assert_eq!(coerce_degrees("inf"), 0.0);
        assert_eq!(coerce_degrees("-infinity"), 0.0);
        assert_eq!(coerce_degrees("1e999"), 0.0);

        let coords = Coordinates::parse(RawCoordinates { lat: "NaN", lon: "5.0" });
        assert_eq!(coords, Coordinates { lat: 0.0, lon: 5.0 });
        assert!(coords.validate().is_ok());
    }

    #[test]
    fn test_leading_number_is_kept() {
        let coords = Coordinates::parse(RawCoordinates {
            lat: "40.7128°",
            lon: " -74.006 W",
        });
        assert_eq!(coords, Coordinates { lat: 40.7128, lon: -74.006 });

        assert_eq!(coerce_degrees("+12.5abc"), 12.5);
        assert_eq!(coerce_degrees(".5"), 0.5);
        assert_eq!(coerce_degrees("7."), 7.0);
        assert_eq!(coerce_degrees("1.5e2x"), 150.0);
        assert_eq!(coerce_degrees("3e"), 3.0);
        assert_eq!(coerce_degrees("-"), 0.0);
        assert_eq!(coerce_degrees("N40"), 0.0);
    }

    #[test]
    fn test_format_degrees() {
        assert_eq!(format_degrees(&40.0), "40.0");
        assert_eq!(format_degrees(&-74.0), "-74.0");
        assert_eq!(format_degrees(&40.7128), "40.7128");
    }

    #[test]
    fn test_validate_bounds() {
        assert!(Coordinates { lat: 90.0, lon: -180.0 }.validate().is_ok());
        assert_eq!(
            Coordinates { lat: 90.5, lon: 0.0 }.validate(),
            Err(RowError::InvalidCoordinates { lat: 90.5, lon: 0.0 })
        );
        assert!(Coordinates { lat: 0.0, lon: 180.1 }.validate().is_err());
        assert!(Coordinates { lat: f64::NAN, lon: 0.0 }.validate().is_err());
    }

    #[test]
    fn test_links_keep_decimal_point_on_whole_numbers() {
        let coords = Coordinates { lat: 40.0, lon: -74.0 };
        assert_eq!(coords.google_maps_link(), "https://www.google.com/maps?q=40.0,-74.0");
        assert_eq!(
            coords.street_view_link(),
            "https://www.google.com/maps?q=40.0,-74.0&layer=c&cbll=40.0,-74.0"
        );
    }

    #[test]
    fn test_links() {
        let coords = Coordinates { lat: 40.7128, lon: -74.006 };
        assert_eq!(
            coords.google_maps_link(),
            "https://www.google.com/maps?q=40.7128,-74.006"
        );
        assert_eq!(
            coords.street_view_link(),
            "https://www.google.com/maps?q=40.7128,-74.006&layer=c&cbll=40.7128,-74.006"
        );
    }
}
