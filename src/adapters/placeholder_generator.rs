use std::time::Duration;

use crate::core::models::ImageAsset;

struct CannedProblem {
    keywords: &'static [&'static str],
    statement: &'static str,
}

const FACTORIAL_PROBLEM: &str = "Write a function to calculate the factorial of a number. The factorial of n (denoted as n!) is the product of all positive integers less than or equal to n. For example, 5! = 5 × 4 × 3 × 2 × 1 = 120.";

const FIBONACCI_PROBLEM: &str = "Write a function that returns the n-th Fibonacci number. The sequence starts with 0 and 1, and every following number is the sum of the two before it. For example, the first ten numbers are 0, 1, 1, 2, 3, 5, 8, 13, 21, 34.";

const PALINDROME_PROBLEM: &str = "Write a function that checks whether a given string is a palindrome, reading the same forwards and backwards. Ignore case and non-alphanumeric characters. For example, 'A man, a plan, a canal: Panama' is a palindrome.";

const REVERSE_PROBLEM: &str = "Create a function that takes a string as input and returns the string reversed. For example, if the input is 'hello', the output should be 'olleh'.";

const PRIME_PROBLEM: &str = "Write a function to check if a given number is prime. A prime number is a natural number greater than 1 that has no positive divisors other than 1 and itself.";

const SORT_PROBLEM: &str = "Implement a sorting algorithm to sort an array of integers in ascending order. You can use any sorting algorithm like bubble sort, quick sort, or merge sort.";

const MAXIMUM_SUBARRAY_PROBLEM: &str = "Write a function to solve the following coding problem:

Given an array of integers, find the maximum sum of a contiguous subarray. This is known as the Maximum Subarray Problem.

Example:
Input: [-2, 1, -3, 4, -1, 2, 1, -5, 4]
Output: 6 (subarray [4, -1, 2, 1] has the maximum sum)

Please implement an efficient solution with optimal time complexity.";

// First match wins.
const CANNED_PROBLEMS: &[CannedProblem] = &[
    CannedProblem {
        keywords: &["factorial", "fact"],
        statement: FACTORIAL_PROBLEM,
    },
    CannedProblem {
        keywords: &["fibonacci", "fib"],
        statement: FIBONACCI_PROBLEM,
    },
    CannedProblem {
        keywords: &["palindrome"],
        statement: PALINDROME_PROBLEM,
    },
    CannedProblem {
        keywords: &["reverse", "string"],
        statement: REVERSE_PROBLEM,
    },
    CannedProblem {
        keywords: &["prime", "number"],
        statement: PRIME_PROBLEM,
    },
    CannedProblem {
        keywords: &["sort", "array"],
        statement: SORT_PROBLEM,
    },
];

/// Canned problem statements used when no backend could read the image.
pub struct PlaceholderGenerator {
    delay: Duration,
}

impl PlaceholderGenerator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Pure function of the file name.
    pub fn generate(&self, image: &ImageAsset) -> String {
        statement_for_file_name(image.file_name()).to_string()
    }

    /// Same as [`generate`](Self::generate) after the configured cosmetic delay.
    pub async fn produce(&self, image: &ImageAsset) -> String {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let statement = self.generate(image);
        log::info!(
            "[PLACEHOLDER] Using canned problem for '{}' ({} characters)",
            image.file_name(),
            statement.len()
        );
        statement
    }
}

fn statement_for_file_name(file_name: &str) -> &'static str {
    let file_name = file_name.to_lowercase();

    CANNED_PROBLEMS
        .iter()
        .find(|problem| {
            problem
                .keywords
                .iter()
                .any(|keyword| file_name.contains(keyword))
        })
        .map(|problem| problem.statement)
        .unwrap_or(MAXIMUM_SUBARRAY_PROBLEM)
}
