//! Fama-French industry-portfolio returns.
//!
//! Parses the Ken French "10 Industry Portfolios" monthly CSV as published
//! on the data library site: a free-text preamble, a header row naming the
//! industries, then `YYYYMM` rows of percent returns. The monthly
//! value-weighted section comes first; parsing stops at the end of that
//! section. Missing values are flagged with -99.99 (or -999) and any row
//! containing one is dropped, matching the study's treatment of incomplete
//! observations. Returns are scaled from percent to fractional units.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;

use fremantle::ScenarioSet;

use crate::error::DataError;

/// Sentinel threshold: the source files mark missing data with -99.99 or
/// -999, far below any plausible monthly percent return.
const MISSING_SENTINEL: f64 = -99.0;

/// Historical industry returns over a date range.
#[derive(Debug, Clone)]
pub struct IndustryReturns {
    /// First-of-month date for every retained observation, in order.
    pub dates: Vec<NaiveDate>,
    /// Industry names from the file header.
    pub industries: Vec<String>,
    /// Fractional returns, one row per retained month.
    pub returns: ScenarioSet,
}

/// Load industry returns from a Ken French CSV on disk, retaining complete
/// observations within `[start, end]`.
pub fn load_industry_returns(
    path: &Path,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<IndustryReturns, DataError> {
    let text = fs::read_to_string(path)?;
    parse_industry_returns(&text, start, end)
}

/// Parse industry returns from CSV text. See [`load_industry_returns`].
pub fn parse_industry_returns(
    text: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<IndustryReturns, DataError> {
    if start > end {
        return Err(DataError::InvalidDateRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }

    let mut lines = text.lines().enumerate();
    let industries = find_header(&mut lines)?;
    let width = industries.len();

    let mut dates = Vec::new();
    let mut rows = Vec::new();
    for (line_no, line) in lines {
        let trimmed = line.trim();
        let mut fields = trimmed.split(',');
        let Some(date) = fields.next().and_then(|f| parse_yyyymm(f.trim())) else {
            // End of the monthly section (blank line or a new sub-table).
            break;
        };

        let values: Vec<f64> = fields
            .map(|f| {
                f.trim().parse::<f64>().map_err(|_| {
                    DataError::Parse(format!("line {}: bad value {:?}", line_no + 1, f.trim()))
                })
            })
            .collect::<Result<_, _>>()?;
        if values.len() != width {
            return Err(DataError::Parse(format!(
                "line {}: expected {} industries, got {}",
                line_no + 1,
                width,
                values.len()
            )));
        }

        if values.iter().any(|&v| v <= MISSING_SENTINEL) {
            continue;
        }
        if date < start || date > end {
            continue;
        }

        dates.push(date);
        rows.push(values.iter().map(|v| v / 100.0).collect());
    }

    if rows.is_empty() {
        return Err(DataError::NoObservations {
            start: start.to_string(),
            end: end.to_string(),
        });
    }

    Ok(IndustryReturns {
        dates,
        industries,
        returns: ScenarioSet::from_rows(&rows)?,
    })
}

/// Scan for the header row: an empty leading field followed by the industry
/// names, immediately preceding the data rows.
fn find_header<'a>(
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
) -> Result<Vec<String>, DataError> {
    for (_, line) in lines {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() >= 2
            && fields[0].is_empty()
            && fields[1..]
                .iter()
                .all(|f| !f.is_empty() && f.parse::<f64>().is_err())
        {
            return Ok(fields[1..].iter().map(|f| f.to_string()).collect());
        }
    }
    Err(DataError::Parse(
        "no industry header row found".to_string(),
    ))
}

/// Parse a 6-digit YYYYMM stamp into the first of that month.
fn parse_yyyymm(field: &str) -> Option<NaiveDate> {
    if field.len() != 6 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = field[..4].parse().ok()?;
    let month: u32 = field[4..].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write;

    const SAMPLE: &str = "\
This file was created from the 10 Industry Portfolios dataset.
Missing data are indicated by -99.99.

  Average Value Weighted Returns -- Monthly
,NoDur,Durbl,Manuf
192607,  1.45, 15.55,  4.69
192608,  3.97,  3.68,  2.81
192609, -99.99,  1.25,  1.18
192610, -1.69, -2.14, -3.29

  Average Equal Weighted Returns -- Monthly
,NoDur,Durbl,Manuf
192607,  9.99,  9.99,  9.99
";

    fn date(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    #[test]
    fn test_parse_drops_incomplete_rows_and_scales() {
        let data = parse_industry_returns(SAMPLE, date(1926, 1), date(1927, 1)).unwrap();
        assert_eq!(data.industries, vec!["NoDur", "Durbl", "Manuf"]);
        // 192609 has a missing sentinel and is dropped.
        assert_eq!(data.returns.n_scenarios(), 3);
        assert_eq!(data.dates[0], date(1926, 7));
        assert_relative_eq!(data.returns.scenario(0)[0], 0.0145, epsilon = 1e-12);
        assert_relative_eq!(data.returns.scenario(2)[2], -0.0329, epsilon = 1e-12);
    }

    #[test]
    fn test_parse_stops_before_second_section() {
        // The equal-weighted section repeats the header; its 9.99 rows must
        // not leak into the value-weighted data.
        let data = parse_industry_returns(SAMPLE, date(1926, 1), date(1927, 1)).unwrap();
        assert!(data.returns.iter_scenarios().all(|row| row[0] < 0.05));
    }

    #[test]
    fn test_date_range_filter() {
        let data = parse_industry_returns(SAMPLE, date(1926, 8), date(1926, 8)).unwrap();
        assert_eq!(data.returns.n_scenarios(), 1);
        assert_eq!(data.dates, vec![date(1926, 8)]);
    }

    #[test]
    fn test_invalid_range_rejected() {
        assert!(matches!(
            parse_industry_returns(SAMPLE, date(1927, 1), date(1926, 1)),
            Err(DataError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn test_empty_range_rejected() {
        assert!(matches!(
            parse_industry_returns(SAMPLE, date(2000, 1), date(2001, 1)),
            Err(DataError::NoObservations { .. })
        ));
    }

    #[test]
    fn test_missing_header_rejected() {
        assert!(matches!(
            parse_industry_returns("no header here\n1,2,3\n", date(1926, 1), date(1927, 1)),
            Err(DataError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let data = load_industry_returns(file.path(), date(1926, 1), date(1927, 1)).unwrap();
        assert_eq!(data.returns.n_assets(), 3);
    }
}
