//! Display names for variable slots.
//!
//! The codec uses these names in grammar failures and the verifier reuses them,
//! so a slot is always described the same way:
//!
//! - scalar: `A`
//! - sequence element: `V[1]`
//! - table cell: `M[1][0]`

/// Name of a scalar slot.
pub fn scalar(name: &str) -> String {
    name.to_string()
}

/// Name of a sequence element (0-based).
pub fn sequence_element(name: &str, index: usize) -> String {
    format!("{name}[{index}]")
}

/// Name of a table cell (0-based).
pub fn table_cell(name: &str, row: usize, column: usize) -> String {
    format!("{name}[{row}][{column}]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_names() {
        assert_eq!(scalar("A"), "A");
        assert_eq!(sequence_element("V", 1), "V[1]");
        assert_eq!(table_cell("M", 1, 0), "M[1][0]");
    }
}
