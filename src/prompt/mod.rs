//! Review prompt template and assembly.
//!
//! One fixed instruction template with two placeholders: the annotated
//! patch and the commit message. Substitution is verbatim; prompt length
//! is not validated here (oversized prompts are an API-side failure).

/// System primer sent with every request.
pub const SYSTEM_PRIMER: &str =
    "You are an expert reviewer for source code, with experience on source code reviews.";

/// The label taxonomy the model must choose from.
///
/// `label` is the category, `label_justification` the subcategory; both
/// are carried through to the report verbatim.
const LABEL_TAXONOMY: &str = r#"1. Readability:
Focus: Making the code easier to read and understand.
Subcategories include:
    * Refactoring - Consistency: Uniform coding styles and practices.
    * Refactoring - Naming Convention: Clear, descriptive identifiers.
    * Refactoring - Readability: General clarity improvements.
    * Refactoring - Simplification: Reducing unnecessary complexity.
    * Refactoring - Visual Representation: Improving code layout and formatting.
2. Design and Maintainability:
Focus: Improving structure and long-term upkeep.
Subcategories include:
    * Discussion - Design discussion: Architectural or structural decisions.
    * Functional - Support: Adding or enhancing support functionality.
    * Refactoring - Alternate Output: Changing what the code returns or prints.
    * Refactoring - Code Duplication: Removing repeated code.
    * Refactoring - Code Simplification: Streamlining logic.
    * Refactoring - Magic Numbers: Replacing hard-coded values with named constants.
    * Refactoring - Organization of the code: Logical structuring of code.
    * Refactoring - Solution approach: Rethinking problem-solving approaches.
    * Refactoring - Unused Variables: Removing variables not in use.
    * Refactoring - Variable Declarations: Improving how variables are declared or initialized.
3. Performance:
Focus: Making the code faster or more efficient.
Subcategories include:
    * Functional - Performance: General performance improvements.
    * Functional - Performance Optimization: Specific performance-focused refactoring.
    * Functional - Performance and Safety: Balancing speed and reliability.
    * Functional - Resource: Efficient use of memory, CPU, etc.
    * Refactoring - Performance Optimization: Improving performance through code changes.
4. Defect:
Focus: Fixing bugs and potential issues.
Subcategories include:
    * Functional - Conditional Compilation
    * Functional - Consistency and Thread Safety
    * Functional - Error Handling
    * Functional - Exception Handling
    * Functional - Initialization
    * Functional - Interface
    * Functional - Lambda Usage
    * Functional - Logical
    * Functional - Null Handling
    * Functional - Security
    * Functional - Serialization
    * Functional - Syntax
    * Functional - Timing
    * Functional - Type Safety
    * Functional - Validation
5. Other:
Use only if none of the above apply:
Subcategories include:
    * None of the above
    * Does not apply"#;

/// Build the review-generation prompt for one commit.
pub fn build_review_prompt(annotated_patch: &str, commit_message: &str) -> String {
    format!(
        r#"You're asked to generate high-quality code review comments for the patch provided below.

1. **Analyze the Changes**:

   * Understand the intent and structure of the changes in the patch.

2. **Identify Issues**:

   * Detect bugs, logical errors, performance concerns, security issues, or violations of coding standards.
   * Focus only on **new or changed lines** (lines beginning with `+`).

3. **Write Clear, Constructive Comments**:

   * Use **direct, declarative language**.
   * Keep comments **short and specific**.
   * Focus strictly on code-related concerns.
   * Avoid hedging language (don't use "maybe", "might want to", or form questions).
   * Avoid repeating what the code is doing unless it supports your critique.

4. **Associate comments with appropriate categories, reported below.**

Categories and Subcategories:
{taxonomy}

Keep it focused: limit your comments to the issues that relate to the bug this
commit fixes and are directly related to the changes made in the patch.

**Avoid Comments That**:

* Refer to unmodified code (lines without a `+` prefix).
* Ask for verification or confirmation (e.g., "Check if...").
* Provide praise or restate obvious facts.
* Focus on testing.

---

**Output Format**:

* `"filename"`: The relative path to the file the comment applies to.
* `"code_line"`: The number of the specific changed line of code that the comment refers to.
* `"comment"`: A concise review comment.
* `"label"`: One of the categories previously informed.
* `"label_justification"`: A subcategory associated with the previously selected category.

Respond only with a **JSON list**. Each object must contain the following fields:

    ```json
    [
        {{
            "filename": "netwerk/streamconv/converters/mozTXTToHTMLConv.cpp",
            "code_line": 1211,
            "comment": "The lack of input validation in this line could lead to an unexpected crash. Consider validating `tempString` length before using it.",
            "label": "Defect",
            "label_justification": "Functional - Validation"
        }}
    ]
    ```

Below, you can find the `patch` for the commit {commit_message}:
{patch}
"#,
        taxonomy = LABEL_TAXONOMY,
        commit_message = commit_message,
        patch = annotated_patch,
    )
}
