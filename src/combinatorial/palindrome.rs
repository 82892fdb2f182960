//! Partitioning a string into palindromic pieces

use crate::config::SearchConfig;
use crate::engine::{search, SearchMode, SearchProblem, SearchReport};
use crate::error::Result;

/// Cut `chars[start..end]` off as the next piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cut {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PalindromePartition {
    chars: Vec<char>,
    cursor: usize,
    pieces: Vec<String>,
}

impl PalindromePartition {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            cursor: 0,
            pieces: Vec::new(),
        }
    }

    pub fn pieces(&self) -> &[String] {
        &self.pieces
    }
}

/// Two-pointer check from both ends towards the middle.
pub fn is_palindrome(chars: &[char]) -> bool {
    if chars.is_empty() {
        return true;
    }
    let (mut left, mut right) = (0, chars.len() - 1);
    while left < right {
        if chars[left] != chars[right] {
            return false;
        }
        left += 1;
        right -= 1;
    }
    true
}

impl SearchProblem for PalindromePartition {
    type Move = Cut;
    type Solution = Vec<String>;

    fn is_complete(&self) -> bool {
        self.cursor == self.chars.len()
    }

    fn candidates(&self) -> Vec<Cut> {
        (self.cursor + 1..=self.chars.len())
            .map(|end| Cut {
                start: self.cursor,
                end,
            })
            .collect()
    }

    fn is_feasible(&self, cut: &Cut) -> bool {
        is_palindrome(&self.chars[cut.start..cut.end])
    }

    fn apply(&mut self, cut: &Cut) {
        self.pieces.push(self.chars[cut.start..cut.end].iter().collect());
        self.cursor = cut.end;
    }

    fn undo(&mut self, cut: &Cut) {
        self.pieces.pop();
        self.cursor = cut.start;
    }

    fn snapshot(&self) -> Vec<String> {
        self.pieces.clone()
    }

    fn name(&self) -> &str {
        "palindrome-partition"
    }
}

/// Every way to split `text` into palindromes, shortest first piece first.
pub fn palindrome_partitions(text: &str, config: &SearchConfig) -> Result<SearchReport<Vec<String>>> {
    let mut problem = PalindromePartition::new(text);
    search(&mut problem, config, SearchMode::CollectAll)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Searcher;

    fn pieces(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|part| part.to_string()).collect()
    }

    #[test]
    fn test_is_palindrome() {
        let check = |s: &str| is_palindrome(&s.chars().collect::<Vec<_>>());
        assert!(check(""));
        assert!(check("a"));
        assert!(check("aa"));
        assert!(check("aba"));
        assert!(check("abba"));
        assert!(!check("ab"));
        assert!(!check("abca"));
    }

    #[test]
    fn test_aab() {
        let config = SearchConfig::default();
        let report = palindrome_partitions("aab", &config).unwrap();
        assert_eq!(report.solutions, vec![pieces(&["a", "a", "b"]), pieces(&["aa", "b"])]);
    }

    #[test]
    fn test_single_character_and_empty() {
        let config = SearchConfig::default();
        assert_eq!(
            palindrome_partitions("z", &config).unwrap().solutions,
            vec![pieces(&["z"])]
        );
        assert_eq!(
            palindrome_partitions("", &config).unwrap().solutions,
            vec![Vec::<String>::new()]
        );
    }

    #[test]
    fn test_whole_word_palindrome() {
        let config = SearchConfig::default();
        let report = palindrome_partitions("racecar", &config).unwrap();
        assert!(report.solutions.contains(&pieces(&["racecar"])));
        assert!(report.solutions.contains(&pieces(&["r", "aceca", "r"])));
        assert_eq!(report.first(), Some(&pieces(&["r", "a", "c", "e", "c", "a", "r"])));
    }

    #[test]
    fn test_multibyte_characters() {
        let config = SearchConfig::default();
        let report = palindrome_partitions("éxé", &config).unwrap();
        assert_eq!(report.solutions, vec![pieces(&["é", "x", "é"]), pieces(&["éxé"])]);
    }

    #[test]
    fn test_state_restored() {
        let config = SearchConfig::default();
        let mut problem = PalindromePartition::new("abacaba");
        let before = problem.clone();
        let report = Searcher::collect_all(&config).run(&mut problem).unwrap();
        assert!(!report.is_empty());
        assert_eq!(problem, before);
        assert!(problem.pieces().is_empty());
    }
}
