//! CRS identifier normalization
//!
//! GML documents name a CRS in several equivalent forms. Resolution works on
//! the abbreviated `AUTHORITY:CODE` form.

use once_cell::sync::Lazy;
use regex::Regex;

// urn:ogc:def:crs:EPSG::4326, urn:ogc:def:crs:EPSG:6.6:4326
static EPSG_URN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)urn:ogc:def:crs:EPSG:[^:]*:(\d+)$").unwrap());

// http://www.opengis.net/def/crs/EPSG/0/4326
static EPSG_HTTP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i)https?://www\.opengis\.net/def/crs/EPSG/[^/]+/(\d+)$").unwrap()
});

// http://www.opengis.net/gml/srs/epsg.xml#4326
static EPSG_GML_SRS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i)https?://www\.opengis\.net/gml/srs/epsg\.xml#(\d+)$").unwrap()
});

static EPSG_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?i)EPSG:(\d+)$").unwrap());

static OGC_CRS84: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?i)(urn:ogc:def:crs:OGC:[^:]*:CRS84|https?://www\.opengis\.net/def/crs/OGC/[^/]+/CRS84|CRS:84)$",
    )
    .unwrap()
});

/// Abbreviate a CRS identifier to `EPSG:<code>` or `CRS:84`. Identifiers in
/// any other form are returned trimmed but otherwise unchanged.
pub fn abbreviate_crs_identifier(identifier: &str) -> String {
    let identifier = identifier.trim();
    if OGC_CRS84.is_match(identifier) {
        return "CRS:84".to_string();
    }
    for pattern in [&*EPSG_URN, &*EPSG_HTTP, &*EPSG_GML_SRS, &*EPSG_CODE] {
        if let Some(code) = pattern.captures(identifier).and_then(|caps| caps.get(1)) {
            return format!("EPSG:{}", code.as_str());
        }
    }
    identifier.to_string()
}
