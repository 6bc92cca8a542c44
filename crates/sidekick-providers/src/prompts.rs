//! Prompt templates for the completion service operations

/// System message injected when a request carries none
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a code completion assistant. \
    Provide concise, accurate code completions based on the context.";

/// Sentinel answer for import analysis when nothing is missing
pub const NO_MISSING_IMPORTS: &str = "NONE";

/// Prompt for a general code completion
pub fn completion_prompt(context: &str) -> String {
    format!(
        "Complete the following code. Provide only the code completion \
         without any explanations:\n\n{context}"
    )
}

/// Prompt for an inline (ghost text) completion at the cursor
pub fn inline_completion_prompt(context: &str) -> String {
    format!(
        "Complete the following code. Provide only the next line or few \
         lines of code, without any explanations or Markdown formatting:\n\n\
         {context}\n\nCompletion:"
    )
}

/// Prompt for explaining a code snippet
pub fn explain_prompt(code: &str) -> String {
    format!("Explain the following code in a clear, concise manner:\n\n{code}\n\nExplanation:")
}

/// Prompt for generating documentation for a snippet
pub fn documentation_prompt(code: &str, language: &str) -> String {
    format!(
        "Generate documentation for the following {language} code. Include:\n\
         - Brief description\n\
         - Parameters (if any)\n\
         - Return value (if any)\n\
         - Usage example\n\n\
         Code:\n{code}\n\nDocumentation:"
    )
}

/// Prompt for suggesting a refactoring given surrounding context
pub fn refactoring_prompt(code: &str, context: &str) -> String {
    format!(
        "Analyze the following code and suggest improvements based on this \
         context: \"{context}\"\n\n\
         Code:\n{code}\n\nProvide specific refactoring suggestions:"
    )
}

/// Prompt for detecting missing external imports
pub fn import_analysis_prompt(code: &str, language: &str) -> String {
    format!(
        "Analyze the following {language} code and identify external module \
         imports that might be missing. Return only the import statements, \
         one per line, in the correct format.\n\n\
         Code:\n{code}\n\n\
         Missing imports (or \"{NO_MISSING_IMPORTS}\" if no missing imports detected):"
    )
}
