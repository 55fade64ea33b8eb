//! Running, order-preserving, duplicate-free sequence of captured cells.
//!
//! Consecutive frames overlap on purpose (the planner under-swipes), so
//! the same cell text shows up in more than one frame. The accumulator
//! keeps the first occurrence and drops the rest, with one wrinkle: the
//! capture loop retracts the previous frame's final record before
//! accumulating a continuing frame, because that cell was only partially
//! visible and is about to be recaptured whole. Retraction also unmarks
//! the text as seen, so the full recapture is not mistaken for a
//! duplicate.

use std::collections::HashSet;

use crate::vision::ColorLabel;

/// One captured cell: extracted text, background color, height in rows.
///
/// Empty text marks a placeholder - a cell that carried no readable text,
/// kept transiently for positional accounting and filtered from the final
/// output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureRecord {
    pub text: String,
    pub color: ColorLabel,
    pub height: u32,
}

impl CaptureRecord {
    pub fn is_placeholder(&self) -> bool {
        self.text.is_empty()
    }
}

/// Accumulates capture records across frames, deduplicating by text.
#[derive(Debug, Default)]
pub struct Accumulator {
    records: Vec<CaptureRecord>,
    seen: HashSet<String>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one cell.
    ///
    /// Non-empty text is appended only on first sight and marked seen.
    /// Empty text always appends a placeholder (white, height 0) without
    /// touching the seen set.
    pub fn record(&mut self, text: String, color: ColorLabel, height: u32) {
        if text.is_empty() {
            self.records.push(CaptureRecord {
                text,
                color: ColorLabel::White,
                height: 0,
            });
            return;
        }

        if self.seen.contains(&text) {
            return;
        }

        self.seen.insert(text.clone());
        self.records.push(CaptureRecord {
            text,
            color,
            height,
        });
    }

    /// Removes the most recently appended record, unmarking its text as
    /// seen so an identical cell captured later is recorded again.
    pub fn retract_last(&mut self) -> Option<CaptureRecord> {
        let record = self.records.pop()?;
        if !record.is_placeholder() {
            self.seen.remove(&record.text);
        }
        Some(record)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[CaptureRecord] {
        &self.records
    }

    /// Materializes the output sequence: placeholders filtered, relative
    /// order preserved.
    pub fn finalize(self) -> Vec<CaptureRecord> {
        self.records
            .into_iter()
            .filter(|record| !record.is_placeholder())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_kept_in_order() {
        let mut acc = Accumulator::new();
        acc.record("first".into(), ColorLabel::Purple, 40);
        acc.record("second".into(), ColorLabel::Red, 30);

        let out = acc.finalize();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].text, "first");
        assert_eq!(out[1].text, "second");
    }

    #[test]
    fn test_duplicate_text_recorded_once() {
        let mut acc = Accumulator::new();
        acc.record("row".into(), ColorLabel::White, 40);
        acc.record("row".into(), ColorLabel::White, 38);

        assert_eq!(acc.len(), 1);
        assert_eq!(acc.records()[0].height, 40);
    }

    #[test]
    fn test_placeholder_forced_white_zero_height() {
        let mut acc = Accumulator::new();
        acc.record(String::new(), ColorLabel::Red, 25);

        assert_eq!(acc.len(), 1);
        let record = &acc.records()[0];
        assert!(record.is_placeholder());
        assert_eq!(record.color, ColorLabel::White);
        assert_eq!(record.height, 0);
    }

    #[test]
    fn test_placeholders_do_not_deduplicate() {
        let mut acc = Accumulator::new();
        acc.record(String::new(), ColorLabel::White, 0);
        acc.record(String::new(), ColorLabel::White, 0);

        assert_eq!(acc.len(), 2);
        assert!(acc.finalize().is_empty());
    }

    #[test]
    fn test_retract_restores_prior_state() {
        let mut acc = Accumulator::new();
        acc.record("kept".into(), ColorLabel::Green, 50);

        acc.record("transient".into(), ColorLabel::Blue, 20);
        let retracted = acc.retract_last().unwrap();
        assert_eq!(retracted.text, "transient");

        // Same text again must not be treated as a duplicate.
        acc.record("transient".into(), ColorLabel::Blue, 45);

        let out = acc.finalize();
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].text, "transient");
        assert_eq!(out[1].height, 45);
    }

    #[test]
    fn test_retract_placeholder_leaves_seen_set_alone() {
        let mut acc = Accumulator::new();
        acc.record("text".into(), ColorLabel::White, 10);
        acc.record(String::new(), ColorLabel::White, 0);

        acc.retract_last();

        // "text" is still seen; recording it again is a no-op.
        acc.record("text".into(), ColorLabel::White, 10);
        assert_eq!(acc.len(), 1);
    }

    #[test]
    fn test_retract_on_empty_is_none() {
        let mut acc = Accumulator::new();
        assert!(acc.retract_last().is_none());
    }

    #[test]
    fn test_finalize_filters_placeholders_preserving_order() {
        let mut acc = Accumulator::new();
        acc.record("a".into(), ColorLabel::White, 10);
        acc.record(String::new(), ColorLabel::White, 0);
        acc.record("b".into(), ColorLabel::Purple, 20);

        let out = acc.finalize();
        let texts: Vec<&str> = out.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b"]);
    }
}
