//! Per-language toolchain commands
//!
//! Each supported language maps to a source file name, an optional compile
//! step, and a run command. Commands are argv vectors executed with the
//! sandbox workspace as the working directory, so paths stay relative and
//! concurrent workspaces never collide.

use crate::models::Language;

/// Name of the compiled program inside the workspace
pub const PROGRAM_NAME: &str = "solution";

/// File name the submitted source is written as
pub fn source_file_name(language: Language) -> &'static str {
    match language {
        Language::C => "main.c",
        Language::Cpp => "main.cpp",
        Language::Python => "main.py",
    }
}

/// Compile command for the language, if it has a compile step
///
/// Python gets a syntax check so broken submissions still surface as a
/// compile failure instead of failing every test case at runtime.
pub fn compile_command(language: Language) -> Option<Vec<String>> {
    let argv: Vec<&str> = match language {
        Language::C => vec![
            "gcc",
            "-std=c11",
            "-O2",
            "-Wall",
            "-o",
            PROGRAM_NAME,
            "main.c",
        ],
        Language::Cpp => vec![
            "g++",
            "-std=c++17",
            "-O2",
            "-Wall",
            "-o",
            PROGRAM_NAME,
            "main.cpp",
        ],
        Language::Python => vec!["python3", "-m", "py_compile", "main.py"],
    };
    Some(argv.into_iter().map(String::from).collect())
}

/// Run command for the language
pub fn run_command(language: Language) -> Vec<String> {
    let argv: Vec<&str> = match language {
        Language::C | Language::Cpp => vec!["./solution"],
        Language::Python => vec!["python3", "main.py"],
    };
    argv.into_iter().map(String::from).collect()
}
