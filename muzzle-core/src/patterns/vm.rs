// muzzle-core/src/patterns/vm.rs
//! A small backtracking interpreter for compiled pattern programs.
//!
//! The program is executed directly over a codepoint slice, which keeps
//! wildcard and optional semantics fully specified instead of inheriting
//! them from a host regex dialect: optionals are greedy (the consuming
//! branch is tried first) and `AnyChar` matches every codepoint including
//! line separators. Backtracking depth is bounded by the number of `Split`
//! instructions, which the grammar keeps small.
//!
//! License: MIT OR APACHE 2.0

/// One instruction of a compiled pattern program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Inst {
    /// Match exactly this codepoint.
    Char(char),
    /// Match exactly one arbitrary codepoint.
    AnyChar,
    /// Try the following instruction first; on failure resume at `alt`.
    Split { alt: usize },
    /// Assert a word boundary without consuming.
    WordBoundary,
    /// Accept.
    Match,
}

/// An executable search program for one blacklisted term.
#[derive(Debug, Clone)]
pub struct Program {
    insts: Vec<Inst>,
}

impl Program {
    pub(crate) fn new(insts: Vec<Inst>) -> Self {
        Self { insts }
    }

    /// Iterates over all matches in one left-to-right scan, inclusive span
    /// per item. The scan resumes past each match, so occurrences are
    /// non-overlapping by construction.
    pub fn find_iter<'p, 'i>(&'p self, input: &'i [char]) -> Matches<'p, 'i> {
        Matches { program: self, input, at: 0 }
    }

    /// Collects `find_iter`.
    pub fn find_all(&self, input: &[char]) -> Vec<(usize, usize)> {
        self.find_iter(input).collect()
    }

    /// Attempts an anchored match at `start`; returns the exclusive end on
    /// success.
    fn match_at(&self, input: &[char], start: usize) -> Option<usize> {
        self.step(input, 0, start)
    }

    fn step(&self, input: &[char], mut pc: usize, mut pos: usize) -> Option<usize> {
        loop {
            match self.insts[pc] {
                Inst::Char(expected) => {
                    if input.get(pos) == Some(&expected) {
                        pc += 1;
                        pos += 1;
                    } else {
                        return None;
                    }
                }
                Inst::AnyChar => {
                    if pos < input.len() {
                        pc += 1;
                        pos += 1;
                    } else {
                        return None;
                    }
                }
                Inst::Split { alt } => {
                    if let Some(end) = self.step(input, pc + 1, pos) {
                        return Some(end);
                    }
                    pc = alt;
                }
                Inst::WordBoundary => {
                    if is_word_boundary(input, pos) {
                        pc += 1;
                    } else {
                        return None;
                    }
                }
                Inst::Match => return Some(pos),
            }
        }
    }
}

/// Iterator over the non-overlapping matches of a program.
pub struct Matches<'p, 'i> {
    program: &'p Program,
    input: &'i [char],
    at: usize,
}

impl Iterator for Matches<'_, '_> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<(usize, usize)> {
        while self.at < self.input.len() {
            match self.program.match_at(self.input, self.at) {
                Some(end) if end > self.at => {
                    let span = (self.at, end - 1);
                    self.at = end;
                    return Some(span);
                }
                _ => self.at += 1,
            }
        }
        None
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// A boundary sits wherever word-ness flips, with both ends of the input
/// counting as non-word.
fn is_word_boundary(input: &[char], pos: usize) -> bool {
    let before = pos
        .checked_sub(1)
        .and_then(|i| input.get(i))
        .map(|&c| is_word_char(c))
        .unwrap_or(false);
    let after = input.get(pos).map(|&c| is_word_char(c)).unwrap_or(false);
    before != after
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::compiler::compile;
    use crate::patterns::parser::parse;

    fn spans(pattern: &str, input: &str) -> Vec<(usize, usize)> {
        let chars: Vec<char> = input.chars().collect();
        compile(&parse(pattern).unwrap()).find_all(&chars)
    }

    #[test]
    fn test_optional_wildcard_matches_with_and_without_filler() {
        assert_eq!(spans("f[?]ck", "fuck"), vec![(0, 3)]);
        assert_eq!(spans("f[?]ck", "fck"), vec![(0, 2)]);
        assert_eq!(spans("f[?]ck", "f?ck"), vec![(0, 3)]);
    }

    #[test]
    fn test_optional_literal_is_letter_specific() {
        assert_eq!(spans("f[u]ck", "fuck"), vec![(0, 3)]);
        assert_eq!(spans("f[u]ck", "fck"), vec![(0, 2)]);
        assert!(spans("f[u]ck", "fack").is_empty());
    }

    #[test]
    fn test_wildcard_matches_any_codepoint_including_newline() {
        assert_eq!(spans("a?c", "abc"), vec![(0, 2)]);
        assert_eq!(spans("a?c", "a\nc"), vec![(0, 2)]);
        assert_eq!(spans("a?c", "a💩c"), vec![(0, 2)]);
        assert!(spans("a?c", "ac").is_empty());
    }

    #[test]
    fn test_scan_is_global_and_non_overlapping() {
        assert_eq!(spans("aa", "aaaa"), vec![(0, 1), (2, 3)]);
        assert_eq!(spans("ab", "ab ab"), vec![(0, 1), (3, 4)]);
    }

    #[test]
    fn test_optional_is_greedy() {
        // The greedy branch consumes the 's'; the scan then resumes after it.
        assert_eq!(spans("as[s]", "asss"), vec![(0, 2)]);
    }

    #[test]
    fn test_word_boundaries() {
        assert_eq!(spans("|ass|", "ass"), vec![(0, 2)]);
        assert_eq!(spans("|ass|", "an ass."), vec![(3, 5)]);
        assert!(spans("|ass|", "bass").is_empty());
        assert!(spans("|ass|", "assassin").is_empty());
        assert_eq!(spans("|ass", "ass bass"), vec![(0, 2)]);
        assert_eq!(spans("ass|", "bass ass"), vec![(1, 3), (5, 7)]);
    }

    #[test]
    fn test_underscore_and_digits_are_word_chars() {
        assert!(spans("|ass|", "_ass").is_empty());
        assert!(spans("|ass|", "ass1").is_empty());
    }

    #[test]
    fn test_matches_across_lines() {
        assert_eq!(spans("ass", "no\nass\nhere"), vec![(3, 5)]);
    }

    #[test]
    fn test_sequential_optionals() {
        assert_eq!(spans("bitch[e][s]", "bitches"), vec![(0, 6)]);
        assert_eq!(spans("bitch[e][s]", "bitchs"), vec![(0, 5)]);
        assert_eq!(spans("bitch[e][s]", "bitch"), vec![(0, 4)]);
    }
}
