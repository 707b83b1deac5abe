pub mod diagnostics;
pub mod folding_ranges;
pub mod semantic_tokens;

#[cfg(test)]
pub(crate) mod test_support;
