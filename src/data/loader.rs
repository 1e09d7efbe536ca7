// ============================================================
// Layer 4 — Review Loader
// ============================================================
// Loads the review corpus from a CSV file, locally or over HTTP.
//
// The corpus format is a plain CSV with a header row. Only one
// column matters (by default "text"); everything else is carried
// by the file but ignored here. Review text may contain commas,
// quotes and line breaks, so fields follow the usual CSV quoting
// rules:
//   - fields may be wrapped in double quotes
//   - a quoted field may contain commas and newlines
//   - a literal quote inside a quoted field is doubled ("")
//
// Remote sources are downloaded once into the data directory and
// reused on later runs.
//
// The full corpus is far bigger than one training run needs, so
// the loader keeps only a seeded random fraction of the rows.
// Same seed, same corpus, same subset.

use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use std::io;
use std::{fs, path::PathBuf};

use crate::domain::review::Review;
use crate::domain::traits::ReviewSource;

/// Where remote corpus files are cached between runs
const DOWNLOAD_DIR: &str = "data";

/// Loads review text from a CSV source.
/// Implements the ReviewSource trait from Layer 3.
pub struct CsvReviewLoader {
    /// Local path or http(s) URL of the corpus file
    source: String,

    /// Name of the CSV column holding the review text
    text_column: String,

    /// Fraction of rows kept for training (0.0 to 1.0)
    sample_frac: f64,

    /// Seed for the row subsample
    seed: u64,
}

impl CsvReviewLoader {
    pub fn new(
        source:      impl Into<String>,
        text_column: impl Into<String>,
        sample_frac: f64,
        seed:        u64,
    ) -> Self {
        Self {
            source:      source.into(),
            text_column: text_column.into(),
            sample_frac,
            seed,
        }
    }

    /// Resolve the source to a local file, downloading it first
    /// if it is a URL.
    fn resolve(&self) -> Result<PathBuf> {
        if is_remote(&self.source) {
            fetch_remote(&self.source)
        } else {
            Ok(PathBuf::from(&self.source))
        }
    }
}

impl ReviewSource for CsvReviewLoader {
    fn load_all(&self) -> Result<Vec<Review>> {
        let path = self.resolve()?;

        if !path.exists() {
            bail!(
                "Corpus file '{}' does not exist. \
                 Pass --reviews with a CSV path or URL.",
                path.display()
            );
        }

        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read corpus file '{}'", path.display()))?;

        let rows    = parse_csv(&raw);
        let reviews = extract_column(rows, &self.text_column)?;

        tracing::info!("Loaded {} reviews from '{}'", reviews.len(), path.display());

        let sampled = sample_fraction(reviews, self.sample_frac, self.seed);

        if sampled.is_empty() {
            tracing::warn!("Corpus is empty after sampling");
        } else {
            tracing::info!(
                "Kept {} reviews (sample fraction {})",
                sampled.len(),
                self.sample_frac
            );
        }

        Ok(sampled)
    }
}

/// True for sources that must be downloaded first
fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Download a remote corpus file into the data directory.
/// Already-downloaded files are reused as-is.
fn fetch_remote(url: &str) -> Result<PathBuf> {
    let filename = url
        .rsplit('/')
        .next()
        .and_then(|seg| seg.split('?').next())
        .filter(|seg| !seg.is_empty())
        .unwrap_or("reviews.csv");

    let target = PathBuf::from(DOWNLOAD_DIR).join(filename);

    if target.exists() {
        tracing::info!("Using cached corpus '{}'", target.display());
        return Ok(target);
    }

    fs::create_dir_all(DOWNLOAD_DIR)
        .with_context(|| format!("Cannot create download directory '{DOWNLOAD_DIR}'"))?;

    tracing::info!("Downloading corpus from {url}");

    let client = reqwest::blocking::Client::builder()
        .timeout(None)
        .build()
        .context("Cannot build HTTP client")?;

    let response = client
        .get(url)
        .send()
        .with_context(|| format!("Request to '{url}' failed"))?
        .error_for_status()
        .with_context(|| format!("Server rejected download of '{url}'"))?;

    let total = response.content_length().unwrap_or(0);
    let bar = if total > 0 {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40.cyan/blue} {bytes}/{total_bytes} {msg}")?,
        );
        pb
    } else {
        ProgressBar::new_spinner()
    };

    let mut reader = bar.wrap_read(response);
    let mut file = fs::File::create(&target)
        .with_context(|| format!("Cannot create '{}'", target.display()))?;

    io::copy(&mut reader, &mut file)
        .with_context(|| format!("Download of '{url}' was interrupted"))?;

    bar.finish_with_message("download complete");
    tracing::info!("Corpus saved to '{}'", target.display());

    Ok(target)
}

/// Parse CSV text into rows of fields.
/// Handles quoted fields, doubled quotes and embedded newlines.
/// Blank lines are dropped; anything else malformed simply
/// parses to whatever fields it yields.
fn parse_csv(input: &str) -> Vec<Vec<String>> {
    let mut rows:  Vec<Vec<String>> = Vec::new();
    let mut row:   Vec<String>      = Vec::new();
    let mut field                   = String::new();
    let mut in_quotes               = false;

    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    // A doubled quote is a literal quote;
                    // a lone quote closes the field
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                _ => field.push(c),
            }
        } else {
            match c {
                '"'  => in_quotes = true,
                ','  => row.push(std::mem::take(&mut field)),
                '\r' => {}
                '\n' => {
                    row.push(std::mem::take(&mut field));
                    // A row of one empty field is a blank line
                    if row.len() == 1 && row[0].is_empty() {
                        row.clear();
                    } else {
                        rows.push(std::mem::take(&mut row));
                    }
                }
                _ => field.push(c),
            }
        }
    }

    // Flush the last row if the file has no trailing newline
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}

/// Pull one named column out of parsed CSV rows.
/// The first row is the header. Rows too short to contain the
/// column are skipped with a warning, not treated as fatal.
fn extract_column(rows: Vec<Vec<String>>, column: &str) -> Result<Vec<Review>> {
    let mut iter = rows.into_iter();

    let header = match iter.next() {
        Some(h) => h,
        None    => return Ok(Vec::new()),
    };

    let col_idx = header
        .iter()
        .position(|h| h.trim_start_matches('\u{FEFF}').trim() == column);

    let col_idx = match col_idx {
        Some(i) => i,
        None => bail!(
            "Column '{}' not found in corpus header. Available columns: {}",
            column,
            header.join(", ")
        ),
    };

    let mut reviews = Vec::new();
    let mut short   = 0usize;

    for row in iter {
        match row.into_iter().nth(col_idx) {
            Some(text) => reviews.push(Review::new(text)),
            None       => short += 1,
        }
    }

    if short > 0 {
        tracing::warn!("Skipped {} rows shorter than the header", short);
    }

    Ok(reviews)
}

/// Keep a seeded random fraction of the reviews.
/// A fraction of 1.0 or more keeps everything.
fn sample_fraction(mut reviews: Vec<Review>, frac: f64, seed: u64) -> Vec<Review> {
    if frac >= 1.0 {
        return reviews;
    }

    let keep = ((reviews.len() as f64) * frac).round() as usize;

    let mut rng = StdRng::seed_from_u64(seed);
    reviews.shuffle(&mut rng);
    reviews.truncate(keep);

    reviews
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_rows() {
        let rows = parse_csv("a,b\nc,d\n");
        assert_eq!(rows, vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn test_parse_quoted_comma() {
        let rows = parse_csv("\"hello, world\",2\n");
        assert_eq!(rows, vec![vec!["hello, world", "2"]]);
    }

    #[test]
    fn test_parse_doubled_quote() {
        let rows = parse_csv("\"say \"\"hi\"\"\",x\n");
        assert_eq!(rows, vec![vec!["say \"hi\"", "x"]]);
    }

    #[test]
    fn test_parse_newline_inside_quotes() {
        let rows = parse_csv("\"line1\nline2\",x\n");
        assert_eq!(rows, vec![vec!["line1\nline2", "x"]]);
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let rows = parse_csv("a,b\n\nc,d\n");
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_parse_without_trailing_newline() {
        let rows = parse_csv("a,b\nc,d");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec!["c", "d"]);
    }

    #[test]
    fn test_extract_named_column() {
        let rows = parse_csv("stars,text\n5,Great food\n1,Awful\n");
        let reviews = extract_column(rows, "text").unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].text, "Great food");
        assert_eq!(reviews[1].text, "Awful");
    }

    #[test]
    fn test_extract_handles_bom_on_header() {
        let rows = parse_csv("\u{FEFF}text\nhello\n");
        let reviews = extract_column(rows, "text").unwrap();
        assert_eq!(reviews[0].text, "hello");
    }

    #[test]
    fn test_extract_missing_column_fails() {
        let rows = parse_csv("stars,text\n5,ok\n");
        assert!(extract_column(rows, "body").is_err());
    }

    #[test]
    fn test_extract_skips_short_rows() {
        let rows = parse_csv("stars,text\n5\n4,Fine\n");
        let reviews = extract_column(rows, "text").unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].text, "Fine");
    }

    #[test]
    fn test_sample_keeps_rounded_fraction() {
        let reviews: Vec<Review> =
            (0..10).map(|i| Review::new(format!("r{i}"))).collect();
        assert_eq!(sample_fraction(reviews, 0.25, 42).len(), 3);
    }

    #[test]
    fn test_sample_is_reproducible() {
        let make = || -> Vec<Review> {
            (0..20).map(|i| Review::new(format!("r{i}"))).collect()
        };
        let a = sample_fraction(make(), 0.5, 7);
        let b = sample_fraction(make(), 0.5, 7);
        let texts = |v: &[Review]| v.iter().map(|r| r.text.clone()).collect::<Vec<_>>();
        assert_eq!(texts(&a), texts(&b));
    }

    #[test]
    fn test_full_fraction_keeps_everything() {
        let reviews: Vec<Review> =
            (0..5).map(|i| Review::new(format!("r{i}"))).collect();
        assert_eq!(sample_fraction(reviews, 1.0, 1).len(), 5);
    }

    #[test]
    fn test_remote_detection() {
        assert!(is_remote("https://example.com/reviews.csv"));
        assert!(is_remote("http://example.com/reviews.csv"));
        assert!(!is_remote("data/reviews.csv"));
    }
}
