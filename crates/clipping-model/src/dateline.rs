//! Marathi dateline for the masthead.
//!
//! Format: `<day> <month> <year>, <weekday> (शुक्ल पक्ष / तिथी)` with every
//! number written in Devanagari digits.

use chrono::Datelike;

const MONTHS: [&str; 12] = [
    "जानेवारी",
    "फेब्रुवारी",
    "मार्च",
    "एप्रिल",
    "मे",
    "जून",
    "जुलै",
    "ऑगस्ट",
    "सप्टेंबर",
    "ऑक्टोबर",
    "नोव्हेंबर",
    "डिसेंबर",
];

const WEEKDAYS: [&str; 7] = [
    "रविवार",
    "सोमवार",
    "मंगळवार",
    "बुधवार",
    "गुरुवार",
    "शुक्रवार",
    "शनिवार",
];

const DIGITS: [char; 10] = ['०', '१', '२', '३', '४', '५', '६', '७', '८', '९'];

// No lunar calendar is computed; the tithi slot is a fixed label.
const TITHI: &str = "शुक्ल पक्ष / तिथी";

/// Rewrite every ASCII digit in `n` as a Devanagari digit.
pub fn devanagari_digits(n: i64) -> String {
    n.to_string()
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => DIGITS[d as usize],
            None => c,
        })
        .collect()
}

/// Format a calendar date as a Marathi dateline.
pub fn marathi_dateline(date: &impl Datelike) -> String {
    let day = devanagari_digits(i64::from(date.day()));
    let month = MONTHS[date.month0() as usize];
    let year = devanagari_digits(i64::from(date.year()));
    let weekday = WEEKDAYS[date.weekday().num_days_from_sunday() as usize];
    format!("{day} {month} {year}, {weekday} ({TITHI})")
}
