use crate::domain::model::{EnrichedRecord, ReviewStatus};
use chrono::{DateTime, Local};
use std::fmt::Write;

const REVIEW_STYLE_CSS: &str = include_str!("../../templates/review_style.css");
const REVIEW_INSTRUCTIONS_HTML: &str = include_str!("../../templates/review_instructions.html");

// No X/Y fallback here, unlike the lookup aliases. A row geocoded from X/Y
// shows blank coordinates on the page.
pub const REVIEW_LATITUDE_ALIASES: [&str; 4] = ["lat", "latitude", "Lat", "Latitude"];
pub const REVIEW_LONGITUDE_ALIASES: [&str; 5] = ["lon", "longitude", "Long", "Longitude", "lng"];

/// CSS class for a `review_status` cell; unknown or missing text renders as pending.
pub fn status_class(status: Option<&str>) -> &'static str {
    status
        .and_then(|s| s.parse::<ReviewStatus>().ok())
        .unwrap_or(ReviewStatus::Pending)
        .css_class()
}

pub fn render_review_page(records: &[EnrichedRecord], generated_at: DateTime<Local>) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n  <meta charset=\"utf-8\">\n");
    html.push_str("  <title>Address Review</title>\n  <style>\n");
    html.push_str(REVIEW_STYLE_CSS);
    html.push_str("  </style>\n</head>\n<body>\n");
    let _ = writeln!(
        html,
        "  <h1>Address Review - {} locations</h1>",
        records.len()
    );
    let _ = writeln!(
        html,
        "  <p class=\"generated\">Generated {}</p>",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    );
    html.push_str(
        "  <p>Click the links to verify each location, then update the review status.</p>\n",
    );
    html.push_str(concat!(
        "  <table>\n",
        "    <thead>\n",
        "      <tr>\n",
        "        <th>Coordinates</th>\n",
        "        <th>Address</th>\n",
        "        <th>Links</th>\n",
        "        <th>Status</th>\n",
        "        <th>Notes</th>\n",
        "      </tr>\n",
        "    </thead>\n",
        "    <tbody>\n",
    ));

    for record in records {
        render_row(&mut html, record);
    }

    html.push_str("    </tbody>\n  </table>\n\n");
    html.push_str(REVIEW_INSTRUCTIONS_HTML);
    html.push_str("</body>\n</html>\n");
    html
}

fn render_row(html: &mut String, record: &EnrichedRecord) {
    let lat = record
        .source
        .first_of(&REVIEW_LATITUDE_ALIASES)
        .unwrap_or_default();
    let lon = record
        .source
        .first_of(&REVIEW_LONGITUDE_ALIASES)
        .unwrap_or_default();
    let status = record.review_status.as_str();

    let _ = writeln!(html, "      <tr class=\"{}\">", status_class(Some(status)));
    let _ = writeln!(
        html,
        "        <td class=\"coordinates\">{}, {}</td>",
        escape_html(lat),
        escape_html(lon)
    );
    let _ = writeln!(html, "        <td>{}</td>", escape_html(&record.address));
    html.push_str("        <td class=\"links\">\n");
    if !record.google_maps_link.is_empty() {
        let _ = writeln!(
            html,
            "          <a href=\"{}\" target=\"_blank\">Maps</a>",
            escape_html(&record.google_maps_link)
        );
    }
    if !record.street_view_link.is_empty() {
        let _ = writeln!(
            html,
            "          <a href=\"{}\" target=\"_blank\">Street View</a>",
            escape_html(&record.street_view_link)
        );
    }
    html.push_str("        </td>\n");
    let _ = writeln!(html, "        <td>{}</td>", status);
    let _ = writeln!(html, "        <td>{}</td>", escape_html(&record.notes));
    html.push_str("      </tr>\n");
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::coordinates::Coordinates;
    use crate::domain::model::InputRecord;
    use crate::utils::error::RowError;

    fn resolved(lat: &str, lon: &str, address: &str) -> EnrichedRecord {
        let coords = Coordinates {
            lat: lat.parse().unwrap(),
            lon: lon.parse().unwrap(),
        };
        EnrichedRecord::resolved(
            InputRecord::from_pairs([("lat", lat), ("lon", lon)]),
            address.to_string(),
            coords.google_maps_link(),
            coords.street_view_link(),
        )
    }

    #[test]
    fn test_status_class_defaults_to_pending() {
        assert_eq!(status_class(Some("ERROR")), "error");
        assert_eq!(status_class(Some("APPROVED")), "approved");
        assert_eq!(status_class(Some("NEEDS_UPDATE")), "pending");
        assert_eq!(status_class(None), "pending");
    }

    #[test]
    fn test_rows_carry_status_class_and_links() {
        let records = vec![
            resolved("48.8584", "2.2945", "Eiffel Tower, Paris"),
            EnrichedRecord::failed(
                InputRecord::from_pairs([("lat", "10.0"), ("lon", "")]),
                &RowError::MissingCoordinates,
            ),
        ];

        let html = render_review_page(&records, Local::now());

        assert!(html.contains("<h1>Address Review - 2 locations</h1>"));
        assert_eq!(html.matches("<tr class=").count(), 2);
        assert!(html.contains("<tr class=\"pending\">"));
        assert!(html.contains("<tr class=\"error\">"));
        assert!(html.contains("<td class=\"coordinates\">48.8584, 2.2945</td>"));
        assert_eq!(html.matches(">Maps</a>").count(), 1);
        assert_eq!(html.matches(">Street View</a>").count(), 1);
        assert!(html.contains("Missing lat/long coordinates"));
        assert!(html.contains("<h2>Instructions:</h2>"));
    }

    #[test]
    fn test_review_ignores_xy_columns() {
        let record = EnrichedRecord::resolved(
            InputRecord::from_pairs([("Y", "1.5"), ("X", "2.5")]),
            "Somewhere".to_string(),
            String::new(),
            String::new(),
        );

        let html = render_review_page(&[record], Local::now());
        assert!(html.contains("<td class=\"coordinates\">, </td>"));
    }

    #[test]
    fn test_text_is_escaped() {
        let record = resolved("1.0", "2.0", "Fish & Chips <Shop>");
        let html = render_review_page(&[record], Local::now());
        assert!(html.contains("Fish &amp; Chips &lt;Shop&gt;"));
        assert!(html.contains("href=\"https://www.google.com/maps?q=1.0,2.0&amp;layer=c&amp;cbll=1.0,2.0\""));
    }
}
