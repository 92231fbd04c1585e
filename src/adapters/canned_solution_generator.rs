use async_trait::async_trait;

use crate::core::errors::GenerationError;
use crate::core::interfaces::adapters::SolutionGenerator;
use crate::core::models::{Language, Solution};

const FACTORIAL_PYTHON: &str = r#"def factorial(n):
    if n < 0:
        raise ValueError("Factorial is not defined for negative numbers")
    elif n == 0 or n == 1:
        return 1
    else:
        return n * factorial(n - 1)

if __name__ == "__main__":
    number = 5
    result = factorial(number)
    print(f"Factorial of {number} is {result}")"#;

const FACTORIAL_JAVA: &str = r#"public class Factorial {

    public static long factorial(int n) {
        if (n < 0) {
            throw new IllegalArgumentException("Factorial is not defined for negative numbers");
        } else if (n == 0 || n == 1) {
            return 1;
        } else {
            return n * factorial(n - 1);
        }
    }

    public static void main(String[] args) {
        int number = 5;
        long result = factorial(number);
        System.out.println("Factorial of " + number + " is " + result);
    }
}"#;

const GENERIC_PYTHON: &str = r#"def solve_problem():
    print("Solving the problem...")
    pass

if __name__ == "__main__":
    solve_problem()"#;

const GENERIC_JAVA: &str = r#"public class ProblemSolver {

    public static void solveProblem() {
        System.out.println("Solving the problem...");
    }

    public static void main(String[] args) {
        solveProblem();
    }
}"#;

/// Offline solutions shown when no language model is configured or reachable.
pub struct CannedSolutionGenerator;

impl CannedSolutionGenerator {
    pub fn solution_for(problem: &str, language: Language) -> Solution {
        let is_factorial = problem.to_lowercase().contains("factorial");

        let (code, explanation) = match (is_factorial, language) {
            (true, Language::Python) => (
                FACTORIAL_PYTHON,
                "This Python solution implements factorial using recursion. It handles edge cases for negative numbers and base cases for 0 and 1. For any other positive integer, it recursively multiplies the number by the factorial of (n-1).".to_string(),
            ),
            (true, Language::Java) => (
                FACTORIAL_JAVA,
                "This Java solution implements factorial using recursion. It includes proper exception handling for negative numbers and handles base cases for 0 and 1. The method returns a long to handle larger factorial values.".to_string(),
            ),
            (false, Language::Python) => (GENERIC_PYTHON, Self::generic_explanation(language)),
            (false, Language::Java) => (GENERIC_JAVA, Self::generic_explanation(language)),
        };

        Solution {
            code: code.to_string(),
            explanation,
            language,
        }
    }

    fn generic_explanation(language: Language) -> String {
        format!(
            "This is a generic {} solution template. Please provide more specific requirements for a complete implementation.",
            language
        )
    }
}

#[async_trait]
impl SolutionGenerator for CannedSolutionGenerator {
    fn name(&self) -> &'static str {
        "canned"
    }

    async fn generate(
        &self,
        problem: &str,
        language: Language,
    ) -> Result<Solution, GenerationError> {
        Ok(Self::solution_for(problem, language))
    }
}
