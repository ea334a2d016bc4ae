//! Two-page report: transcribe the front and back of the form and list the
//! numbered questions found on each.

use crate::extractor::{TextExtractor, Transcription};
use crate::questions::{self, QuestionEntry};
use std::io::{self, Write};
use std::path::Path;

const RULE_WIDTH: usize = 80;
/// Characters of each question body shown in the listing
const PREVIEW_CHARS: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Front,
    Back,
}

impl Side {
    fn heading(self) -> &'static str {
        match self {
            Self::Front => "FRONT PAGE",
            Self::Back => "BACK PAGE",
        }
    }

    fn missing_notice(self) -> &'static str {
        match self {
            Self::Front => "Front image not found",
            Self::Back => "Back image not found",
        }
    }
}

/// What happened to one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageReport {
    Missing {
        side: Side,
    },
    Extracted {
        side: Side,
        transcription: Transcription,
        questions: Vec<QuestionEntry>,
    },
}

/// Process the front and back pages in order, writing the report to `out`.
///
/// Page failures are part of the report; only a failed write is an error.
pub fn run<W: Write>(
    front: &Path,
    back: &Path,
    extractor: &TextExtractor,
    out: &mut W,
) -> io::Result<Vec<PageReport>> {
    let double = "=".repeat(RULE_WIDTH);

    writeln!(out, "{}", double)?;
    writeln!(out, "EXTRACTING TEXT FROM HTS FORM IMAGES")?;
    writeln!(out, "{}", double)?;

    let mut reports = Vec::with_capacity(2);
    for (side, path) in [(Side::Front, front), (Side::Back, back)] {
        reports.push(process_page(side, path, extractor, out)?);
        writeln!(out, "\n{}", double)?;
    }

    writeln!(out, "EXTRACTION COMPLETE")?;
    writeln!(out, "{}", double)?;

    Ok(reports)
}

fn process_page<W: Write>(
    side: Side,
    path: &Path,
    extractor: &TextExtractor,
    out: &mut W,
) -> io::Result<PageReport> {
    writeln!(out, "\n📄 {}: {}", side.heading(), path.display())?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;

    if !path.exists() {
        tracing::warn!("{:?} does not exist, skipping", path);
        writeln!(out, "❌ {}", side.missing_notice())?;
        return Ok(PageReport::Missing { side });
    }

    let transcription = extractor.extract(path);
    let printed = transcription.to_string();
    writeln!(out, "{}", printed)?;

    // A failure description is scanned like any other text
    let questions = questions::locate(&printed);

    writeln!(out, "\n{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "NUMBERED QUESTIONS ON {}:", side.heading())?;
    if questions.is_empty() {
        writeln!(out, "  (none found)")?;
    }
    for entry in &questions {
        writeln!(out, "  {}. {}...", entry.ordinal, entry.preview(PREVIEW_CHARS))?;
    }

    Ok(PageReport::Extracted {
        side,
        transcription,
        questions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OcrError;
    use crate::extractor::tests::{fake_extractor, write_png};

    fn run_to_string(
        front: &Path,
        back: &Path,
        extractor: &TextExtractor,
    ) -> (Vec<PageReport>, String) {
        let mut out = Vec::new();
        let reports = run(front, back, extractor, &mut out).unwrap();
        (reports, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_both_pages_missing() {
        let dir = tempfile::tempdir().unwrap();
        let front = dir.path().join("front.jpg");
        let back = dir.path().join("back.jpg");

        let (reports, output) = run_to_string(&front, &back, &fake_extractor("1. Name"));

        assert_eq!(
            reports,
            vec![
                PageReport::Missing { side: Side::Front },
                PageReport::Missing { side: Side::Back },
            ]
        );
        assert!(output.contains("❌ Front image not found"));
        assert!(output.contains("❌ Back image not found"));
        assert!(output.starts_with(&"=".repeat(80)));
        assert!(output.contains("EXTRACTION COMPLETE"));
    }

    #[test]
    fn test_missing_front_does_not_affect_back() {
        let dir = tempfile::tempdir().unwrap();
        let front = dir.path().join("front.jpg");
        let back = write_png(dir.path(), "back.png");

        let (reports, output) =
            run_to_string(&front, &back, &fake_extractor("HTS\n1. Name\n2) Sex\n"));

        assert_eq!(reports[0], PageReport::Missing { side: Side::Front });
        match &reports[1] {
            PageReport::Extracted { side, questions, .. } => {
                assert_eq!(*side, Side::Back);
                assert_eq!(questions.len(), 2);
            }
            other => panic!("unexpected report {:?}", other),
        }
        assert!(output.contains("NUMBERED QUESTIONS ON BACK PAGE:"));
        assert!(output.contains("  1. Name..."));
        assert!(output.contains("  2. Sex..."));
        assert!(!output.contains("NUMBERED QUESTIONS ON FRONT PAGE:"));
    }

    #[test]
    fn test_question_bodies_are_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let front = write_png(dir.path(), "front.png");
        let back = dir.path().join("back.jpg");
        let long_body = "x".repeat(75);

        let (_, output) =
            run_to_string(&front, &back, &fake_extractor(&format!("12. {}", long_body)));

        assert!(output.contains(&format!("  12. {}...\n", "x".repeat(60))));
    }

    #[test]
    fn test_raw_text_is_printed() {
        let dir = tempfile::tempdir().unwrap();
        let front = write_png(dir.path(), "front.png");
        let back = write_png(dir.path(), "back.png");
        let text = "HIV TESTING SERVICES\n1. Client code\n";

        let (_, output) = run_to_string(&front, &back, &fake_extractor(text));

        assert_eq!(output.matches(text).count(), 2);
    }

    #[test]
    fn test_no_questions_is_reported_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let front = write_png(dir.path(), "front.png");
        let back = dir.path().join("back.jpg");

        let (reports, output) = run_to_string(&front, &back, &fake_extractor("no numbers here"));

        match &reports[0] {
            PageReport::Extracted { questions, .. } => assert!(questions.is_empty()),
            other => panic!("unexpected report {:?}", other),
        }
        assert!(output.contains("  (none found)"));
    }

    #[test]
    fn test_extraction_failure_is_printed_inline() {
        let dir = tempfile::tempdir().unwrap();
        let front = dir.path().join("front.jpg");
        std::fs::write(&front, b"not an image").unwrap();
        let back = write_png(dir.path(), "back.png");

        let extractor = TextExtractor::unavailable(OcrError::InitializationError(
            "no models".to_string(),
        ));
        let (reports, output) = run_to_string(&front, &back, &extractor);

        assert_eq!(reports.len(), 2);
        for report in &reports {
            match report {
                PageReport::Extracted {
                    transcription,
                    questions,
                    ..
                } => {
                    assert!(transcription.is_failure());
                    assert!(questions.is_empty());
                }
                other => panic!("unexpected report {:?}", other),
            }
        }
        assert_eq!(output.matches("Error: OCR engine unavailable").count(), 2);
    }
}
