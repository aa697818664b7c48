// Expression evaluator - Substitutes series aliases into a math expression
use crate::domain::series::{ProcessedSeries, ValueName};

/// Evaluate `expression` with every series alias replaced by its `value_name`
/// statistic.
///
/// Aliases are matched as case-insensitive raw substrings, not tokens, so an
/// alias contained in a longer name also replaces that part of it. Letters
/// left over after substitution become `0`. Returns `None` for an empty
/// expression, a parse failure or a non-finite result.
pub fn evaluate_math_expression(
    expression: &str,
    series: &[ProcessedSeries],
    value_name: ValueName,
) -> Option<f64> {
    if expression.trim().is_empty() {
        return None;
    }

    let mut substituted = expression.to_string();
    for item in series {
        if item.alias.is_empty() {
            continue;
        }
        let replacement = item
            .stats
            .value(value_name)
            .map(|v| v.to_string())
            .unwrap_or_else(|| "0".to_string());
        substituted = replace_ignore_case(&substituted, &item.alias, &replacement);
    }

    let literals = promote_integer_literals(&zero_remaining_identifiers(&substituted));
    let arithmetic = group_power_chains(&literals);

    evalexpr::eval_number(&arithmetic)
        .ok()
        .filter(|result| result.is_finite())
}

/// Replace every case-insensitive occurrence of `needle`, scanning left to right
fn replace_ignore_case(haystack: &str, needle: &str, replacement: &str) -> String {
    let needle: Vec<char> = needle.chars().collect();
    let chars: Vec<char> = haystack.chars().collect();
    let mut result = String::with_capacity(haystack.len());
    let mut i = 0;

    while i < chars.len() {
        let matched = i + needle.len() <= chars.len()
            && chars[i..i + needle.len()]
                .iter()
                .zip(&needle)
                .all(|(a, b)| a.to_lowercase().eq(b.to_lowercase()));

        if matched {
            result.push_str(replacement);
            i += needle.len();
        } else {
            result.push(chars[i]);
            i += 1;
        }
    }

    result
}

/// Every run of ASCII letters becomes a single `0`
fn zero_remaining_identifiers(expression: &str) -> String {
    let mut result = String::with_capacity(expression.len());
    let mut in_word = false;

    for c in expression.chars() {
        if c.is_ascii_alphabetic() {
            if !in_word {
                result.push('0');
            }
            in_word = true;
        } else {
            result.push(c);
            in_word = false;
        }
    }

    result
}

/// Rewrite numeric literals as floats so `/` divides exactly (`5/2` is 2.5)
fn promote_integer_literals(expression: &str) -> String {
    let mut result = String::with_capacity(expression.len() + 8);
    let mut literal = String::new();

    let flush = |literal: &mut String, result: &mut String| {
        if literal.is_empty() {
            return;
        }
        if literal.starts_with('.') {
            result.push('0');
        }
        result.push_str(literal);
        if !literal.contains('.') {
            result.push_str(".0");
        } else if literal.ends_with('.') {
            result.push('0');
        }
        literal.clear();
    };

    for c in expression.chars() {
        if c.is_ascii_digit() || c == '.' {
            literal.push(c);
        } else {
            flush(&mut literal, &mut result);
            result.push(c);
        }
    }
    flush(&mut literal, &mut result);

    result
}

/// Parenthesize the right side of every `^` so chains group to the right:
/// `2 ^ 3 ^ 2` becomes `2 ^( 3 ^( 2))`.
fn group_power_chains(expression: &str) -> String {
    let chars: Vec<char> = expression.chars().collect();
    let mut result = String::with_capacity(expression.len() + 8);
    let mut i = 0;

    while i < chars.len() {
        result.push(chars[i]);
        if chars[i] == '^' {
            let end = power_chain_end(&chars, i + 1);
            let operand: String = chars[i + 1..end].iter().collect();
            result.push('(');
            result.push_str(&group_power_chains(&operand));
            result.push(')');
            i = end;
        } else {
            i += 1;
        }
    }

    result
}

/// End of the operand starting at `start` plus any `^ operand` that follows it
fn power_chain_end(chars: &[char], start: usize) -> usize {
    let mut end = operand_end(chars, start);
    loop {
        let next = skip_whitespace(chars, end);
        if chars.get(next) != Some(&'^') {
            return end;
        }
        end = operand_end(chars, next + 1);
    }
}

fn operand_end(chars: &[char], start: usize) -> usize {
    let mut i = skip_whitespace(chars, start);
    while matches!(chars.get(i), Some('-' | '+')) {
        i = skip_whitespace(chars, i + 1);
    }

    if chars.get(i) == Some(&'(') {
        let mut depth = 0usize;
        while let Some(&c) = chars.get(i) {
            i += 1;
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
        }
        return i;
    }

    while chars
        .get(i)
        .is_some_and(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_'))
    {
        i += 1;
    }
    i
}

fn skip_whitespace(chars: &[char], mut i: usize) -> usize {
    while chars.get(i).is_some_and(|c| c.is_whitespace()) {
        i += 1;
    }
    i
}
