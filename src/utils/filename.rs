use crate::models::DateRange;
use std::path::PathBuf;

/// Default export path: `output/{station}-{YYYYMMDD}-{YYYYMMDD}.{extension}`
///
/// The station name is lowercased and every non-alphanumeric run becomes a
/// single `-`; accented letters are kept.
pub fn generate_default_export_filename(station: &str, range: Option<&DateRange>, extension: &str) -> PathBuf {
    let mut slug = String::new();
    for c in station.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    let slug = if slug.is_empty() { "station" } else { slug };

    let filename = match range {
        Some(range) => format!(
            "{}-{}-{}.{}",
            slug,
            range.from().format("%Y%m%d"),
            range.to().format("%Y%m%d"),
            extension
        ),
        None => format!("{}.{}", slug, extension),
    };
    PathBuf::from("output").join(filename)
}
