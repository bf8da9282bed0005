use crate::dial::POINT_COUNT;
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub type Year = i32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SectionError {
    #[error("Invalid year range '{0}', expected START-END")]
    InvalidRange(String),
    #[error("Year range {start}-{end} ends before it starts")]
    InvertedRange { start: Year, end: Year },
    #[error("Expected six sections, found {0}")]
    SectionCount(usize),
}

/// Inclusive span of years shown by the counter, written `1999-2004` in config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
pub struct YearRange {
    pub start: Year,
    pub end: Year,
}

impl YearRange {
    pub fn new(start: Year, end: Year) -> Result<Self, SectionError> {
        if start > end {
            return Err(SectionError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn span(&self) -> Year {
        self.end.saturating_sub(self.start)
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for YearRange {
    type Err = SectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SectionError::InvalidRange(s.to_owned());
        let s = s.trim();
        // a leading '-' is the sign of a BCE start year, not the separator
        let sep = s
            .char_indices()
            .skip(1)
            .find(|&(_, c)| c == '-')
            .map(|(i, _)| i)
            .ok_or_else(invalid)?;
        let (start, end) = (&s[..sep], &s[sep + 1..]);
        let start = start.trim().parse().map_err(|_| invalid())?;
        let end = end.trim().parse().map_err(|_| invalid())?;
        Self::new(start, end)
    }
}

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct SectionLabel(String);

crate::impl_text_newtype!(SectionLabel);

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct EventText(String);

crate::impl_text_newtype!(EventText);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub year: Year,
    pub text: EventText,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub label: SectionLabel,
    pub years: YearRange,
    #[serde(default)]
    pub events: Vec<Event>,
}

/// The six sections behind the dial. Immutable once built; a reload replaces
/// the whole table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionTable {
    sections: Vec<Section>,
}

impl SectionTable {
    pub fn new(sections: Vec<Section>) -> Result<Self, SectionError> {
        if sections.len() != POINT_COUNT {
            return Err(SectionError::SectionCount(sections.len()));
        }
        Ok(Self { sections })
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    pub fn years(&self, index: usize) -> Option<YearRange> {
        self.get(index).map(|s| s.years)
    }

    pub fn label(&self, index: usize) -> Option<&SectionLabel> {
        self.get(index).map(|s| &s.label)
    }

    /// Events of a section, or nothing when the index is out of range.
    pub fn events(&self, index: usize) -> &[Event] {
        self.get(index).map(|s| s.events.as_slice()).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }
}

#[cfg(test)]
pub(crate) fn fixture() -> SectionTable {
    let rows: [(&str, Year, Year); POINT_COUNT] = [
        ("Театр", 1999, 2004),
        ("Кино", 1987, 1991),
        ("Литература", 1992, 1997),
        ("Музыка", 2008, 2013),
        ("Кино", 1987, 1991),
        ("Наука", 2015, 2022),
    ];
    let sections = rows
        .into_iter()
        .map(|(label, start, end)| Section {
            label: SectionLabel::from(label),
            years: YearRange { start, end },
            events: (start..=end)
                .step_by(2)
                .map(|year| Event {
                    year,
                    text: EventText::new(format!("{label} {year}")),
                })
                .collect(),
        })
        .collect();
    SectionTable::new(sections).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_range_parsing() {
        let cases = vec![
            ("1999-2004", YearRange { start: 1999, end: 2004 }),
            (" 1987 - 1991 ", YearRange { start: 1987, end: 1991 }),
            ("2000-2000", YearRange { start: 2000, end: 2000 }),
            ("-500-100", YearRange { start: -500, end: 100 }),
            ("-753 - -509", YearRange { start: -753, end: -509 }),
        ];

        for (text, expected) in cases {
            assert_eq!(text.parse::<YearRange>().unwrap(), expected);
        }
    }

    #[test]
    fn test_year_range_rejects_bad_input() {
        assert_eq!(
            "2004-1999".parse::<YearRange>(),
            Err(SectionError::InvertedRange {
                start: 2004,
                end: 1999
            })
        );
        assert!(matches!(
            "1999".parse::<YearRange>(),
            Err(SectionError::InvalidRange(_))
        ));
        assert!(matches!(
            "abc-2004".parse::<YearRange>(),
            Err(SectionError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_bce_years_survive_text_form() {
        let range = YearRange::new(-44, 14).unwrap();
        assert_eq!(range.to_string(), "-44-14");
        assert_eq!(range.to_string().parse::<YearRange>(), Ok(range));

        let json = serde_json::to_string(&YearRange::new(-753, -509).unwrap()).unwrap();
        assert_eq!(json, "\"-753--509\"");
        let back: YearRange = serde_json::from_str(&json).unwrap();
        assert_eq!(back, YearRange { start: -753, end: -509 });

        assert!(matches!(
            "-500".parse::<YearRange>(),
            Err(SectionError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_span_saturates_on_extreme_ranges() {
        let range = YearRange::new(-2_000_000_000, 2_000_000_000).unwrap();
        assert_eq!(range.span(), Year::MAX);
    }

    #[test]
    fn test_section_deserialization() {
        let json = r#"{
            "label": "Наука",
            "years": "2015-2022",
            "events": [{ "year": 2015, "text": "Первый снимок гравитационных волн" }]
        }"#;
        let section: Section = serde_json::from_str(json).unwrap();
        assert_eq!(section.label.as_str(), "Наука");
        assert_eq!(section.years.span(), 7);
        assert_eq!(section.events.len(), 1);
        assert_eq!(section.events[0].year, 2015);
    }

    #[test]
    fn test_table_requires_six_sections() {
        let table = fixture();
        let mut sections: Vec<Section> = table.iter().cloned().collect();
        sections.pop();
        assert_eq!(
            SectionTable::new(sections),
            Err(SectionError::SectionCount(POINT_COUNT - 1))
        );
    }

    #[test]
    fn test_out_of_range_events_are_empty() {
        let table = fixture();
        assert!(table.events(99).is_empty());
        assert!(!table.events(0).is_empty());
        assert_eq!(table.years(99), None);
    }
}
