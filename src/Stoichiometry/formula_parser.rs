//! # Chemical Formula Parser
//!
//! Turns a formula string like `Ca(OH)2`, `K4[Fe(CN)6]` or `CuSO4·5H2O` into a map
//! element symbol -> number of atoms.
//!
//! ## Logic
//! Single left-to-right scan with an explicit stack of partial maps:
//! - `(`, `[`, `{` push the current map and start a new empty one
//! - `)`, `]`, `}` read the following integer (default 1), multiply the current map
//!   by it and merge it into the map popped from the stack
//! - an uppercase letter plus an optional lowercase letter is an element symbol,
//!   the following digits are its count (default 1)
//! - anything else (charges, phase letters, stray digits) is skipped
//!
//! Hydrate separators (`·`, `•`, `*`, `_`, `.`) end a segment on the current bracket level;
//! the next segment may start with a multiplier (`CuSO4_5H2O` is CuSO4 + 5 H2O). Inside
//! brackets the separator works the same way, so `(CuSO4·5H2O)2` doubles the whole hydrate.
//! Phase marks like `(g)` or `(aq)` contain no element symbol and add nothing.
use super::errors::{StoichError, StoichResult};
use std::collections::BTreeMap;

/// element symbol -> atom count, ordered by symbol
pub type ElementCountMap = BTreeMap<String, usize>;

const HYDRATE_SEPARATORS: [char; 5] = ['·', '•', '*', '_', '.'];

/// one bracket level: finished segments plus the segment being read
#[derive(Default)]
struct Level {
    finished: ElementCountMap,
    segment: ElementCountMap,
    segment_multiplier: usize,
}

impl Level {
    fn new() -> Self {
        Level {
            segment_multiplier: 1,
            ..Default::default()
        }
    }

    fn close_segment(&mut self, formula: &str) -> StoichResult<()> {
        let segment = std::mem::take(&mut self.segment);
        merge_into(&mut self.finished, &segment, self.segment_multiplier, formula)?;
        self.segment_multiplier = 1;
        Ok(())
    }

    fn finish(mut self, formula: &str) -> StoichResult<ElementCountMap> {
        self.close_segment(formula)?;
        Ok(self.finished)
    }
}

/// parses a chemical formula into an element -> count map.
/// Empty formula gives an empty map. Unmatched brackets fail with `MalformedFormula`.
pub fn parse_formula(formula: &str) -> StoichResult<ElementCountMap> {
    let chars: Vec<char> = formula.chars().filter(|c| !c.is_whitespace()).collect();
    let mut total = scan(&chars, formula)?;
    total.retain(|_, count| *count > 0);
    Ok(total)
}

fn scan(chars: &[char], formula: &str) -> StoichResult<ElementCountMap> {
    let mut stack: Vec<Level> = Vec::new();
    let mut current = Level::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            '(' | '[' | '{' => {
                stack.push(std::mem::replace(&mut current, Level::new()));
                i += 1;
            }
            ')' | ']' | '}' => {
                let outer = stack.pop().ok_or_else(|| {
                    StoichError::MalformedFormula(format!(
                        "unmatched closing '{}' in '{}'",
                        c, formula
                    ))
                })?;
                let group = std::mem::replace(&mut current, outer).finish(formula)?;
                i += 1;
                let multiplier = read_count(chars, &mut i, formula)?.unwrap_or(1);
                merge_into(&mut current.segment, &group, multiplier, formula)?;
            }
            c if HYDRATE_SEPARATORS.contains(&c) => {
                current.close_segment(formula)?;
                i += 1;
                if let Some(n) = read_count(chars, &mut i, formula)? {
                    current.segment_multiplier = n;
                }
            }
            c if c.is_ascii_uppercase() => {
                let mut symbol = c.to_string();
                i += 1;
                if i < chars.len() && chars[i].is_ascii_lowercase() {
                    symbol.push(chars[i]);
                    i += 1;
                }
                let count = read_count(chars, &mut i, formula)?.unwrap_or(1);
                let entry = current.segment.entry(symbol).or_insert(0);
                *entry = entry.checked_add(count).ok_or_else(|| overflow(formula))?;
            }
            _ => i += 1,
        }
    }
    if !stack.is_empty() {
        return Err(StoichError::MalformedFormula(format!(
            "{} unclosed bracket(s) in '{}'",
            stack.len(),
            formula
        )));
    }
    current.finish(formula)
}

/// reads digits starting at `*pos`, advancing it; `None` if there are no digits
fn read_count(chars: &[char], pos: &mut usize, formula: &str) -> StoichResult<Option<usize>> {
    let start = *pos;
    let mut value: usize = 0;
    while *pos < chars.len() {
        let Some(digit) = chars[*pos].to_digit(10) else {
            break;
        };
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(digit as usize))
            .ok_or_else(|| overflow(formula))?;
        *pos += 1;
    }
    Ok(if *pos > start { Some(value) } else { None })
}

fn merge_into(
    target: &mut ElementCountMap,
    source: &ElementCountMap,
    multiplier: usize,
    formula: &str,
) -> StoichResult<()> {
    for (element, count) in source {
        let add = count.checked_mul(multiplier).ok_or_else(|| overflow(formula))?;
        let entry = target.entry(element.clone()).or_insert(0);
        *entry = entry.checked_add(add).ok_or_else(|| overflow(formula))?;
    }
    Ok(())
}

fn overflow(formula: &str) -> StoichError {
    StoichError::MalformedFormula(format!("atom count overflow in '{}'", formula))
}

/// canonical re-serialization in Hill order: C, then H, then the rest alphabetically
/// (alphabetically throughout when there is no carbon). Counts of 1 are omitted.
pub fn to_formula_string(counts: &ElementCountMap) -> String {
    let mut ordered: Vec<(&String, &usize)> = Vec::with_capacity(counts.len());
    if let Some(c) = counts.get_key_value("C") {
        ordered.push(c);
        if let Some(h) = counts.get_key_value("H") {
            ordered.push(h);
        }
        ordered.extend(counts.iter().filter(|(el, _)| el.as_str() != "C" && el.as_str() != "H"));
    } else {
        ordered.extend(counts.iter());
    }
    let mut formula = String::new();
    for (element, &count) in ordered {
        if count == 0 {
            continue;
        }
        formula.push_str(element);
        if count > 1 {
            formula.push_str(&count.to_string());
        }
    }
    formula
}
