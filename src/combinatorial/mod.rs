//! Combinatorial generation over an input sequence
//!
//! Subsets, target-sum combinations and palindrome partitions, each a
//! cursor-based [`SearchProblem`](crate::engine::SearchProblem).

pub mod combination_sum;
pub mod digits;
pub mod palindrome;
pub mod siblings;
pub mod subsets;

pub use combination_sum::{
    combination_sum, combination_sum_unique, combinations_with_size, has_subset_with_sum,
    CombinationSum, MovePolicy,
};
pub use digits::{digit_combinations, BoundedAlphabet, DIGIT_MAX};
pub use palindrome::{is_palindrome, palindrome_partitions, PalindromePartition};
pub use siblings::{distinct_sibling_starts, next_distinct};
pub use subsets::{power_set, unique_subsets, PowerSet};
