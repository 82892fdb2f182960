//! Demonstration of driving the search engine directly
//!
//! Defines a small problem of its own, runs it through `Searcher` in both
//! modes, then solves a sudoku through the library entry point.

use backtrack_search::config::SearchConfig;
use backtrack_search::engine::{SearchProblem, Searcher};
use backtrack_search::grid::{parse_sudoku, solve_sudoku, sudoku_to_string};
use backtrack_search::utils::SolutionFormatter;

/// Orderings of some letters where no two vowels sit next to each other.
#[derive(Debug, Clone)]
struct VowelSpacing {
    letters: Vec<char>,
    used: Vec<bool>,
    word: Vec<char>,
}

impl VowelSpacing {
    fn new(letters: &str) -> Self {
        let letters: Vec<char> = letters.chars().collect();
        Self {
            used: vec![false; letters.len()],
            letters,
            word: Vec::new(),
        }
    }
}

fn is_vowel(ch: char) -> bool {
    matches!(ch, 'a' | 'e' | 'i' | 'o' | 'u')
}

impl SearchProblem for VowelSpacing {
    type Move = usize;
    type Solution = String;

    fn is_complete(&self) -> bool {
        self.word.len() == self.letters.len()
    }

    fn candidates(&self) -> Vec<usize> {
        (0..self.letters.len()).filter(|&i| !self.used[i]).collect()
    }

    fn is_feasible(&self, &i: &usize) -> bool {
        let next = self.letters[i];
        !(is_vowel(next) && self.word.last().is_some_and(|&prev| is_vowel(prev)))
    }

    fn apply(&mut self, &i: &usize) {
        self.used[i] = true;
        self.word.push(self.letters[i]);
    }

    fn undo(&mut self, &i: &usize) {
        self.word.pop();
        self.used[i] = false;
    }

    fn snapshot(&self) -> String {
        self.word.iter().collect()
    }

    fn name(&self) -> &str {
        "vowel-spacing"
    }
}

const PUZZLE: &str = "\
53..7....
6..195...
.98....6.
8...6...3
4..8.3..1
7...2...6
.6....28.
...419..5
....8..79
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Search Engine Demonstration ===\n");

    let config = SearchConfig::default();
    let mut problem = VowelSpacing::new("aebc");

    println!("Test 1: every spacing of \"aebc\"");
    let report = Searcher::collect_all(&config).run(&mut problem)?;
    let lengths = report.map(|word| word.len());
    println!("    {} arrangements, all of length {:?}", lengths.len(), lengths.first());

    let report = Searcher::collect_all(&config).run(&mut problem)?;
    println!("{}", report.statistics);
    for word in report.into_solutions().into_iter().take(4) {
        println!("    {}", word);
    }

    println!("\nTest 2: first arrangement only");
    let report = Searcher::first_solution(&config).run(&mut problem)?;
    print!(
        "{}",
        SolutionFormatter::format_report(&report, |word| word.clone())
    );

    println!("\nTest 3: capped at two arrangements");
    let capped = SearchConfig {
        max_solutions: Some(2),
        ..SearchConfig::default()
    };
    let report = Searcher::collect_all(&capped).run(&mut problem)?;
    print!("{}", SolutionFormatter::format_outcome(&report));

    println!("\nTest 4: sudoku");
    let puzzle = parse_sudoku(PUZZLE)?;
    let report = solve_sudoku(&puzzle, &config)?;
    match report.into_first() {
        Some(solved) => println!("{}", sudoku_to_string(&solved)),
        None => return Err("Expected the puzzle to be solvable".into()),
    }

    println!("All demonstrations completed successfully!");
    Ok(())
}
