//! String transformation utilities for code generation
//!
//! Identifiers in the wizard input are free text; these helpers turn them
//! into names that are valid in the generated Python source.

/// Converts a string to snake_case.
///
/// Handles camelCase, PascalCase, kebab-case and space separated input.
/// Characters that cannot appear in an identifier are dropped.
///
/// # Examples
/// ```
/// use mcp_forge::generation::utils::to_snake_case;
///
/// assert_eq!(to_snake_case("findPetsByStatus"), "find_pets_by_status");
/// assert_eq!(to_snake_case("find-pets-by-status"), "find_pets_by_status");
/// assert_eq!(to_snake_case("get HTTP Response"), "get_http_response");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    let mut prev_is_lowercase = false;

    for ch in s.chars() {
        if ch.is_ascii_uppercase() {
            if prev_is_lowercase {
                result.push('_');
            }
            result.push(ch.to_ascii_lowercase());
            prev_is_lowercase = false;
        } else if ch.is_ascii_alphanumeric() {
            result.push(ch);
            prev_is_lowercase = ch.is_lowercase() || ch.is_ascii_digit();
        } else if matches!(ch, '-' | '_' | ' ' | '.' | '/' | ':') {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            prev_is_lowercase = false;
        }
    }

    // Collapse repeated underscores
    let mut collapsed = String::with_capacity(result.len());
    for ch in result.chars() {
        if ch == '_' && collapsed.ends_with('_') {
            continue;
        }
        collapsed.push(ch);
    }

    collapsed.trim_matches('_').to_string()
}

/// Converts a string to a Title Case heading.
///
/// ```
/// use mcp_forge::generation::utils::to_title_case;
///
/// assert_eq!(to_title_case("calculator-server"), "Calculator Server");
/// ```
pub fn to_title_case(s: &str) -> String {
    to_snake_case(s)
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield", "match", "case", "type",
];

/// Lowercase names from Python's `builtins` module. The generated module refers
/// to several of them (`list`, `dict`, `str`, `isinstance`), so a tool function
/// must never rebind one.
const PYTHON_BUILTINS: &[&str] = &[
    "abs", "aiter", "all", "anext", "any", "ascii", "bin", "bool", "breakpoint", "bytearray",
    "bytes", "callable", "chr", "classmethod", "compile", "complex", "copyright", "credits",
    "delattr", "dict", "dir", "divmod", "enumerate", "eval", "exec", "exit", "filter", "float",
    "format", "frozenset", "getattr", "globals", "hasattr", "hash", "help", "hex", "id", "input",
    "int", "isinstance", "issubclass", "iter", "len", "license", "list", "locals", "map", "max",
    "memoryview", "min", "next", "object", "oct", "open", "ord", "pow", "print", "property",
    "quit", "range", "repr", "reversed", "round", "set", "setattr", "slice", "sorted",
    "staticmethod", "str", "sum", "super", "tuple", "vars", "zip",
];

/// Names the generated module defines at top level; user identifiers must not shadow them.
const RESERVED_MODULE_NAMES: &[&str] = &[
    "asyncio", "json", "main", "server", "stdio_server", "list_tools", "call_tool",
    "list_resources", "read_resource", "list_prompts", "get_prompt",
];

/// Sanitizes a string to be a valid Python identifier.
///
/// Returns `None` when nothing usable is left after normalization.
///
/// ```
/// use mcp_forge::generation::utils::to_python_identifier;
///
/// assert_eq!(to_python_identifier("firstName").as_deref(), Some("first_name"));
/// assert_eq!(to_python_identifier("class").as_deref(), Some("class_"));
/// assert_eq!(to_python_identifier("2fa").as_deref(), Some("_2fa"));
/// assert_eq!(to_python_identifier("!!!"), None);
/// ```
pub fn to_python_identifier(s: &str) -> Option<String> {
    let snake = to_snake_case(s);
    if snake.is_empty() {
        return None;
    }

    let ident = if snake.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{snake}")
    } else {
        snake
    };

    let name = ident.as_str();
    if PYTHON_KEYWORDS.contains(&name)
        || PYTHON_BUILTINS.contains(&name)
        || RESERVED_MODULE_NAMES.contains(&name)
    {
        Some(format!("{ident}_"))
    } else {
        Some(ident)
    }
}
