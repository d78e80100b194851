//! Structural query parsing.
//!
//! A deliberately small frontend: it recognizes the operation keyword, the
//! selection-set shape, and the root field names — enough to separate
//! syntax errors from validation errors and to tell the executor which root
//! fields were requested. It is not a query-execution engine and does not
//! understand fragments, directives, or type conditions.

/// Operation kind of a query document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
}

/// Structurally parsed query document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    pub operation: OperationKind,
    pub operation_name: Option<String>,
    /// Root field names in document order, aliases resolved away.
    pub root_fields: Vec<String>,
}

/// Parse a query document. The error string is the syntax diagnostic shown
/// to the client.
pub fn parse_query(text: &str) -> Result<ParsedQuery, String> {
    let mut rest = text.trim();
    if rest.is_empty() {
        return Err("query document is empty".to_string());
    }

    let mut operation = OperationKind::Query;
    let mut operation_name = None;
    let mut had_keyword = false;

    if let Some(after) = strip_keyword(rest, "mutation") {
        operation = OperationKind::Mutation;
        rest = after;
        had_keyword = true;
    } else if let Some(after) = strip_keyword(rest, "query") {
        rest = after;
        had_keyword = true;
    }

    if had_keyword {
        rest = rest.trim_start();
        if let Some((name, after)) = take_identifier(rest) {
            operation_name = Some(name);
            rest = after;
        }
        rest = rest.trim_start();
        // Variable definitions: skip the parenthesized header.
        if rest.starts_with('(') {
            rest = skip_group(rest, '(', ')')
                .ok_or_else(|| "unbalanced parentheses in operation header".to_string())?;
            rest = rest.trim_start();
        }
    }

    if !rest.starts_with('{') {
        return Err("expected a selection set".to_string());
    }

    let (root_fields, after) = parse_selection_set(rest)?;
    if !after.trim().is_empty() {
        return Err("unexpected characters after selection set".to_string());
    }
    if root_fields.is_empty() {
        return Err("selection set is empty".to_string());
    }

    Ok(ParsedQuery {
        operation,
        operation_name,
        root_fields,
    })
}

/// Walk a brace-delimited selection set, collecting depth-1 field names.
/// Returns the names and the remainder of the input after the closing brace.
fn parse_selection_set(input: &str) -> Result<(Vec<String>, &str), String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut chars = input.char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            '{' => {
                flush(&mut current, &mut fields, depth);
                depth += 1;
            }
            '}' => {
                flush(&mut current, &mut fields, depth);
                depth -= 1;
                if depth == 0 {
                    return Ok((fields, &input[i + c.len_utf8()..]));
                }
            }
            '(' => {
                flush(&mut current, &mut fields, depth);
                let mut parens = 1usize;
                while let Some((_, c)) = chars.next() {
                    match c {
                        '(' => parens += 1,
                        ')' => {
                            parens -= 1;
                            if parens == 0 {
                                break;
                            }
                        }
                        '"' => skip_string(&mut chars)?,
                        _ => {}
                    }
                }
                if parens != 0 {
                    return Err("unbalanced parentheses in query".to_string());
                }
            }
            '"' => skip_string(&mut chars)?,
            ':' => {
                // Alias: the name just seen labels the next field.
                if current.is_empty() && depth == 1 {
                    fields.pop();
                }
                current.clear();
            }
            c if c.is_alphanumeric() || c == '_' => current.push(c),
            _ => flush(&mut current, &mut fields, depth),
        }
    }

    Err("unbalanced braces in query".to_string())
}

fn flush(current: &mut String, fields: &mut Vec<String>, depth: usize) {
    if !current.is_empty() {
        if depth == 1 {
            fields.push(current.clone());
        }
        current.clear();
    }
}

fn skip_string(chars: &mut std::str::CharIndices<'_>) -> Result<(), String> {
    let mut escaped = false;
    for (_, c) in chars.by_ref() {
        match c {
            '\\' if !escaped => escaped = true,
            '"' if !escaped => return Ok(()),
            _ => escaped = false,
        }
    }
    Err("unterminated string in query".to_string())
}

/// Skip a balanced `open`..`close` group, returning the remainder after it.
fn skip_group(input: &str, open: char, close: char) -> Option<&str> {
    let mut depth = 0usize;
    let mut chars = input.char_indices();
    while let Some((i, c)) = chars.next() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Some(&input[i + c.len_utf8()..]);
            }
        } else if c == '"' {
            skip_string(&mut chars).ok()?;
        }
    }
    None
}

fn strip_keyword<'a>(input: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = input.strip_prefix(keyword)?;
    match rest.chars().next() {
        Some(c) if c.is_alphanumeric() || c == '_' => None,
        _ => Some(rest),
    }
}

fn take_identifier(input: &str) -> Option<(String, &str)> {
    let end = input
        .char_indices()
        .find(|(_, c)| !c.is_alphanumeric() && *c != '_')
        .map(|(i, _)| i)
        .unwrap_or(input.len());
    if end == 0 {
        return None;
    }
    Some((input[..end].to_string(), &input[end..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_query() {
        let parsed = parse_query("query users{ users { userId userName } }").unwrap();
        assert_eq!(parsed.operation, OperationKind::Query);
        assert_eq!(parsed.operation_name.as_deref(), Some("users"));
        assert_eq!(parsed.root_fields, vec!["users"]);
    }

    #[test]
    fn parses_shorthand_query() {
        let parsed = parse_query("{ users { userId } }").unwrap();
        assert_eq!(parsed.operation, OperationKind::Query);
        assert!(parsed.operation_name.is_none());
        assert_eq!(parsed.root_fields, vec!["users"]);
    }

    #[test]
    fn parses_mutation() {
        let parsed = parse_query("mutation logout{ logout { result } }").unwrap();
        assert_eq!(parsed.operation, OperationKind::Mutation);
        assert_eq!(parsed.root_fields, vec!["logout"]);
    }

    #[test]
    fn arguments_do_not_leak_into_fields() {
        let parsed = parse_query(r#"query user{ user(id: "1") { userId userName } }"#).unwrap();
        assert_eq!(parsed.root_fields, vec!["user"]);
    }

    #[test]
    fn aliases_resolve_to_field_names() {
        let parsed = parse_query("{ first: user { userId } users { userId } }").unwrap();
        assert_eq!(parsed.root_fields, vec!["user", "users"]);
    }

    #[test]
    fn variable_definitions_are_skipped() {
        let parsed = parse_query("query user($id: String!) { user(id: $id) { userId } }").unwrap();
        assert_eq!(parsed.operation_name.as_deref(), Some("user"));
        assert_eq!(parsed.root_fields, vec!["user"]);
    }

    #[test]
    fn multiple_root_fields() {
        let parsed = parse_query("{ users { userId } returnError { userId } }").unwrap();
        assert_eq!(parsed.root_fields, vec!["users", "returnError"]);
    }

    #[test]
    fn bare_word_is_a_syntax_error() {
        assert!(parse_query("unknown").is_err());
    }

    #[test]
    fn unbalanced_braces_are_a_syntax_error() {
        assert!(parse_query("query users{ users { userId }").is_err());
        assert!(parse_query("{ users } }").is_err());
    }

    #[test]
    fn empty_selection_set_is_a_syntax_error() {
        assert!(parse_query("query users{ }").is_err());
    }

    #[test]
    fn empty_document_is_a_syntax_error() {
        assert!(parse_query("   ").is_err());
    }

    #[test]
    fn string_arguments_may_contain_braces() {
        let parsed = parse_query(r#"{ user(id: "{weird}") { userId } }"#).unwrap();
        assert_eq!(parsed.root_fields, vec!["user"]);
    }
}
