//! Long-format TextGrid parser.

use crate::error::{Result, SyllexError};
use std::path::Path;

/// A single labeled time span on an interval tier.
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    pub xmin: f64,
    pub xmax: f64,
    /// Annotation text. Empty for silent/unlabeled intervals.
    pub text: String,
}

impl Interval {
    /// Duration of the interval in seconds.
    pub fn duration(&self) -> f64 {
        self.xmax - self.xmin
    }

    /// Midpoint of the interval in seconds.
    pub fn midpoint(&self) -> f64 {
        (self.xmin + self.xmax) / 2.0
    }
}

/// A named tier of non-overlapping intervals, ordered by start time.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalTier {
    pub name: String,
    pub intervals: Vec<Interval>,
}

impl IntervalTier {
    /// Returns the interval containing the given time point, if any.
    pub fn interval_at(&self, time: f64) -> Option<&Interval> {
        self.intervals
            .iter()
            .find(|iv| iv.xmin <= time && time < iv.xmax)
    }
}

/// A parsed TextGrid: the annotation layer of one recording.
#[derive(Debug, Clone, PartialEq)]
pub struct TextGrid {
    pub xmin: f64,
    pub xmax: f64,
    pub tiers: Vec<IntervalTier>,
}

impl TextGrid {
    /// Parse a TextGrid file from disk.
    pub fn parse_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::parse(&raw, &path.display().to_string())
    }

    /// Parse long-format TextGrid text.
    ///
    /// `path` is used only for error messages. A leading UTF-8 BOM and CRLF
    /// line endings are tolerated.
    pub fn parse(text: &str, path: &str) -> Result<Self> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut cursor = Cursor::new(text, path);

        let header = cursor.find_value("Object class")?;
        if unquote(header) != "TextGrid" {
            return Err(cursor.error("not a TextGrid object"));
        }

        let xmin = cursor.find_number("xmin")?;
        let xmax = cursor.find_number("xmax")?;
        let tier_count = cursor.find_number("size")? as usize;

        let mut tiers = Vec::new();
        for _ in 0..tier_count {
            let class = unquote(cursor.find_value("class")?);
            match class.as_str() {
                "IntervalTier" => tiers.push(cursor.parse_interval_tier()?),
                "TextTier" => cursor.skip_point_tier()?,
                other => {
                    let message = format!("unknown tier class '{}'", other);
                    return Err(cursor.error(&message));
                }
            }
        }

        if tiers.is_empty() {
            return Err(SyllexError::TextGridNoTiers {
                path: path.to_string(),
            });
        }

        // Praat writes intervals in order, but guard against hand-edited files
        for tier in &mut tiers {
            tier.intervals
                .sort_by(|a, b| a.xmin.partial_cmp(&b.xmin).unwrap_or(std::cmp::Ordering::Equal));
        }

        Ok(Self { xmin, xmax, tiers })
    }
}

/// Line-oriented parse cursor over a TextGrid body.
struct Cursor<'a> {
    lines: Vec<&'a str>,
    pos: usize,
    path: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str, path: &'a str) -> Self {
        Self {
            lines: text.lines().collect(),
            pos: 0,
            path,
        }
    }

    fn error(&self, message: &str) -> SyllexError {
        SyllexError::TextGridParse {
            path: self.path.to_string(),
            line: self.pos, // 1-based: pos already advanced past the line
            message: message.to_string(),
        }
    }

    /// Advance to the next line whose key (text before '=') matches, and
    /// return the value after '='.
    fn find_value(&mut self, key: &str) -> Result<&'a str> {
        while self.pos < self.lines.len() {
            let line = self.lines[self.pos].trim();
            self.pos += 1;
            if let Some((lhs, rhs)) = line.split_once('=')
                && lhs.trim() == key
            {
                return Ok(rhs.trim());
            }
        }
        let message = format!("expected '{}'", key);
        Err(self.error(&message))
    }

    fn find_number(&mut self, key: &str) -> Result<f64> {
        let value = self.find_value(key)?;
        value.parse::<f64>().map_err(|_| {
            let message = format!("invalid number '{}' for '{}'", value, key);
            self.error(&message)
        })
    }

    fn parse_interval_tier(&mut self) -> Result<IntervalTier> {
        let name = unquote(self.find_value("name")?);
        // Tier-level xmin/xmax precede the interval count
        self.find_number("xmin")?;
        self.find_number("xmax")?;
        let count = self.find_value("intervals: size")?;
        let count = count.parse::<usize>().map_err(|_| {
            let message = format!("invalid interval count '{}'", count);
            self.error(&message)
        })?;

        let mut intervals = Vec::with_capacity(count);
        for _ in 0..count {
            let xmin = self.find_number("xmin")?;
            let xmax = self.find_number("xmax")?;
            let text = unquote(self.find_value("text")?);
            if xmax < xmin {
                return Err(self.error("interval xmax before xmin"));
            }
            intervals.push(Interval { xmin, xmax, text });
        }

        Ok(IntervalTier { name, intervals })
    }

    /// Consume a point tier without keeping its contents.
    fn skip_point_tier(&mut self) -> Result<()> {
        self.find_value("name")?;
        self.find_number("xmin")?;
        self.find_number("xmax")?;
        let count = self.find_value("points: size")?;
        let count = count.parse::<usize>().map_err(|_| {
            let message = format!("invalid point count '{}'", count);
            self.error(&message)
        })?;
        for _ in 0..count {
            self.find_number("number")?;
            self.find_value("mark")?;
        }
        Ok(())
    }
}

/// Strip surrounding quotes and unescape Praat's doubled-quote convention.
fn unquote(value: &str) -> String {
    let inner = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value);
    inner.replace("\"\"", "\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_grid() -> String {
        r#"File type = "ooTextFile"
Object class = "TextGrid"

xmin = 0
xmax = 1.5
tiers? <exists>
size = 2
item []:
    item [1]:
        class = "IntervalTier"
        name = "words"
        xmin = 0
        xmax = 1.5
        intervals: size = 2
        intervals [1]:
            xmin = 0
            xmax = 0.8
            text = "ni3hao3"
        intervals [2]:
            xmin = 0.8
            xmax = 1.5
            text = ""
    item [2]:
        class = "IntervalTier"
        name = "phones"
        xmin = 0
        xmax = 1.5
        intervals: size = 3
        intervals [1]:
            xmin = 0
            xmax = 0.4
            text = "n"
        intervals [2]:
            xmin = 0.4
            xmax = 0.8
            text = "i"
        intervals [3]:
            xmin = 0.8
            xmax = 1.5
            text = "sil"
"#
        .to_string()
    }

    #[test]
    fn parses_two_interval_tiers() {
        let grid = TextGrid::parse(&sample_grid(), "test.TextGrid").unwrap();
        assert_eq!(grid.xmin, 0.0);
        assert_eq!(grid.xmax, 1.5);
        assert_eq!(grid.tiers.len(), 2);
        assert_eq!(grid.tiers[0].name, "words");
        assert_eq!(grid.tiers[1].name, "phones");
        assert_eq!(grid.tiers[0].intervals.len(), 2);
        assert_eq!(grid.tiers[1].intervals.len(), 3);
    }

    #[test]
    fn preserves_interval_contents() {
        let grid = TextGrid::parse(&sample_grid(), "test.TextGrid").unwrap();
        let word = &grid.tiers[0].intervals[0];
        assert_eq!(word.text, "ni3hao3");
        assert_eq!(word.xmin, 0.0);
        assert_eq!(word.xmax, 0.8);
    }

    #[test]
    fn empty_text_parses_as_empty_string() {
        let grid = TextGrid::parse(&sample_grid(), "test.TextGrid").unwrap();
        assert_eq!(grid.tiers[0].intervals[1].text, "");
    }

    #[test]
    fn tolerates_utf8_bom() {
        let text = format!("\u{feff}{}", sample_grid());
        let grid = TextGrid::parse(&text, "test.TextGrid").unwrap();
        assert_eq!(grid.tiers.len(), 2);
    }

    #[test]
    fn tolerates_crlf_line_endings() {
        let text = sample_grid().replace('\n', "\r\n");
        let grid = TextGrid::parse(&text, "test.TextGrid").unwrap();
        assert_eq!(grid.tiers.len(), 2);
        assert_eq!(grid.tiers[0].intervals[0].text, "ni3hao3");
    }

    #[test]
    fn skips_point_tier() {
        let text = r#"File type = "ooTextFile"
Object class = "TextGrid"

xmin = 0
xmax = 1.0
tiers? <exists>
size = 2
item []:
    item [1]:
        class = "TextTier"
        name = "clicks"
        xmin = 0
        xmax = 1.0
        points: size = 2
        points [1]:
            number = 0.25
            mark = "x"
        points [2]:
            number = 0.75
            mark = "y"
    item [2]:
        class = "IntervalTier"
        name = "phones"
        xmin = 0
        xmax = 1.0
        intervals: size = 1
        intervals [1]:
            xmin = 0
            xmax = 1.0
            text = "a"
"#;
        let grid = TextGrid::parse(text, "points.TextGrid").unwrap();
        assert_eq!(grid.tiers.len(), 1);
        assert_eq!(grid.tiers[0].name, "phones");
    }

    #[test]
    fn rejects_non_textgrid_object() {
        let text = "File type = \"ooTextFile\"\nObject class = \"Pitch\"\n";
        let result = TextGrid::parse(text, "pitch.TextGrid");
        match result {
            Err(SyllexError::TextGridParse { message, .. }) => {
                assert!(message.contains("not a TextGrid"));
            }
            other => panic!("Expected TextGridParse error, got {:?}", other),
        }
    }

    #[test]
    fn rejects_truncated_file() {
        let text = "File type = \"ooTextFile\"\nObject class = \"TextGrid\"\nxmin = 0\n";
        let result = TextGrid::parse(text, "short.TextGrid");
        assert!(result.is_err());
    }

    #[test]
    fn parse_error_reports_path_and_line() {
        let text = "File type = \"ooTextFile\"\nObject class = \"TextGrid\"\nxmin = abc\n";
        match TextGrid::parse(text, "bad.TextGrid") {
            Err(SyllexError::TextGridParse { path, line, .. }) => {
                assert_eq!(path, "bad.TextGrid");
                assert!(line > 0);
            }
            other => panic!("Expected TextGridParse error, got {:?}", other),
        }
    }

    #[test]
    fn rejects_interval_with_reversed_bounds() {
        let text = r#"File type = "ooTextFile"
Object class = "TextGrid"
xmin = 0
xmax = 1.0
size = 1
        class = "IntervalTier"
        name = "phones"
        xmin = 0
        xmax = 1.0
        intervals: size = 1
            xmin = 0.9
            xmax = 0.1
            text = "a"
"#;
        assert!(TextGrid::parse(text, "rev.TextGrid").is_err());
    }

    #[test]
    fn rejects_grid_with_only_point_tiers() {
        let text = r#"File type = "ooTextFile"
Object class = "TextGrid"
xmin = 0
xmax = 1.0
size = 1
        class = "TextTier"
        name = "tones"
        xmin = 0
        xmax = 1.0
        points: size = 0
"#;
        match TextGrid::parse(text, "points_only.TextGrid") {
            Err(SyllexError::TextGridNoTiers { path }) => {
                assert_eq!(path, "points_only.TextGrid");
            }
            other => panic!("Expected TextGridNoTiers, got {:?}", other),
        }
    }

    #[test]
    fn unquote_handles_doubled_quotes() {
        assert_eq!(unquote("\"say \"\"hi\"\"\""), "say \"hi\"");
        assert_eq!(unquote("\"plain\""), "plain");
        assert_eq!(unquote("\"\""), "");
        assert_eq!(unquote("bare"), "bare");
    }

    #[test]
    fn interval_duration_and_midpoint() {
        let iv = Interval {
            xmin: 0.4,
            xmax: 0.8,
            text: "i".to_string(),
        };
        assert!((iv.duration() - 0.4).abs() < 1e-9);
        assert!((iv.midpoint() - 0.6).abs() < 1e-9);
    }

    #[test]
    fn interval_at_finds_containing_interval() {
        let grid = TextGrid::parse(&sample_grid(), "test.TextGrid").unwrap();
        let tier = &grid.tiers[1];
        assert_eq!(tier.interval_at(0.2).unwrap().text, "n");
        assert_eq!(tier.interval_at(0.5).unwrap().text, "i");
        assert_eq!(tier.interval_at(1.0).unwrap().text, "sil");
        assert!(tier.interval_at(2.0).is_none());
    }

    #[test]
    fn interval_at_boundary_belongs_to_right_interval() {
        let grid = TextGrid::parse(&sample_grid(), "test.TextGrid").unwrap();
        let tier = &grid.tiers[1];
        // Half-open convention: a boundary time belongs to the following interval
        assert_eq!(tier.interval_at(0.4).unwrap().text, "i");
    }
}
