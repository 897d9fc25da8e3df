use crate::Result;
use std::path::Path;

/// Result of comparing two snapshots
pub struct CompareResult {
    /// Similarity score from 0.0 to 1.0
    pub similarity: f64,
    /// Index of the first differing markup token, if any
    pub first_mismatch: Option<usize>,
}

/// Split markup after every closing angle bracket so each tag is one token
fn tokens(markup: &str) -> Vec<&str> {
    markup.trim_end().split_inclusive('>').collect()
}

/// Compare two snapshots token by token
pub fn compare_markup(reference: &Path, captured: &Path) -> Result<CompareResult> {
    let reference = std::fs::read_to_string(reference)?;
    let captured = std::fs::read_to_string(captured)?;

    let ref_tokens = tokens(&reference);
    let cap_tokens = tokens(&captured);

    let total = ref_tokens.len().max(cap_tokens.len());
    if total == 0 {
        return Ok(CompareResult {
            similarity: 1.0,
            first_mismatch: None,
        });
    }

    let matching = ref_tokens
        .iter()
        .zip(&cap_tokens)
        .filter(|(a, b)| a == b)
        .count();
    let first_mismatch = (0..total).find(|&i| ref_tokens.get(i) != cap_tokens.get(i));

    Ok(CompareResult {
        similarity: matching as f64 / total as f64,
        first_mismatch,
    })
}

/// Write a token-level diff of two snapshots
pub fn generate_diff(reference: &Path, captured: &Path, output: &Path) -> Result<()> {
    let reference = std::fs::read_to_string(reference)?;
    let captured = std::fs::read_to_string(captured)?;

    let ref_tokens = tokens(&reference);
    let cap_tokens = tokens(&captured);

    let mut diff = String::new();
    for i in 0..ref_tokens.len().max(cap_tokens.len()) {
        match (ref_tokens.get(i), cap_tokens.get(i)) {
            (Some(a), Some(b)) if a == b => {
                diff.push_str("  ");
                diff.push_str(a);
            }
            (a, b) => {
                if let Some(a) = a {
                    diff.push_str("- ");
                    diff.push_str(a);
                    diff.push('\n');
                }
                if let Some(b) = b {
                    diff.push_str("+ ");
                    diff.push_str(b);
                }
            }
        }
        diff.push('\n');
    }

    std::fs::write(output, diff)?;
    Ok(())
}
