//! CDS qualifier extraction from GenBank flat-file text
//!
//! The record text is scanned with patterns rather than parsed into features. A
//! locus tag selects the span running from its `/locus_tag` (or `/old_locus_tag`)
//! qualifier up to the next `/translation`; `product` and `protein_id` are then
//! read from inside that span.

use crate::error::{CliError, Result};
use regex::Regex;

/// Product name and protein accession of one CDS. Missing qualifiers are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionResult {
    pub product: String,
    pub protein_id: String,
}

impl ExtractionResult {
    pub fn new(product: impl Into<String>, protein_id: impl Into<String>) -> Self {
        Self {
            product: product.into(),
            protein_id: protein_id.into(),
        }
    }
}

/// Extract `product` and `protein_id` for `locus_tag` from `record_text`.
///
/// Fails with [`CliError::NotFound`] when no `/translation` follows the locus
/// tag, or when the captured block between them is empty. A block with neither
/// qualifier is still a match and yields an empty result.
pub fn extract(locus_tag: &str, record_text: &str) -> Result<ExtractionResult> {
    let block_pattern = Regex::new(&format!(
        r#"(?s)/(?:old_)?locus_tag="{}"(.*?)/translation"#,
        regex::escape(locus_tag)
    ))
    .map_err(|e| CliError::Other(e.into()))?;

    let cds_block = block_pattern
        .captures(record_text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|block| !block.is_empty())
        .ok_or_else(|| CliError::not_found(locus_tag))?;

    Ok(ExtractionResult {
        product: qualifier(cds_block, "product")?,
        protein_id: qualifier(cds_block, "protein_id")?,
    })
}

/// First quoted value of `/<name>="..."` in `block`, or empty.
fn qualifier(block: &str, name: &str) -> Result<String> {
    let pattern = Regex::new(&format!(r#"(?s)/{}="(.*?)""#, regex::escape(name)))
        .map_err(|e| CliError::Other(e.into()))?;

    Ok(pattern
        .captures(block)
        .and_then(|caps| caps.get(1))
        .map(|m| unfold(m.as_str()))
        .unwrap_or_default())
}

/// Join a value wrapped over several flat-file lines back into one line.
///
/// Continuation lines lose their indentation and are joined with a space,
/// except after a trailing `-` where the wrap split a hyphenated token.
fn unfold(value: &str) -> String {
    if !value.contains('\n') {
        return value.to_string();
    }

    let mut unfolded = String::with_capacity(value.len());
    for (i, line) in value.split('\n').enumerate() {
        let line = if i == 0 { line.trim_end() } else { line.trim() };
        if line.is_empty() {
            continue;
        }
        if !unfolded.is_empty() && !unfolded.ends_with('-') {
            unfolded.push(' ');
        }
        unfolded.push_str(line);
    }
    unfolded
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORD: &str = r#"FEATURES             Location/Qualifiers
     source          1..4641652
                     /organism="Escherichia coli str. K-12 substr. MG1655"
     gene            190..255
                     /gene="thrL"
                     /locus_tag="b0001"
     CDS             190..255
                     /gene="thrL"
                     /locus_tag="b0001"
                     /codon_start=1
                     /transl_table=11
                     /product="thr operon leader peptide"
                     /protein_id="NP_414542.1"
                     /translation="MKRISTTITTTITITTGNGAG"
     gene            337..2799
                     /gene="thrA"
                     /locus_tag="b0002"
                     /old_locus_tag="ECK0002"
     CDS             337..2799
                     /gene="thrA"
                     /locus_tag="b0002"
                     /old_locus_tag="ECK0002"
                     /product="fused aspartate kinase/homoserine
                     dehydrogenase 1"
                     /protein_id="NP_414543.1"
                     /translation="MRVLKFGGTSVANAERFLRVADILESNARQ"
     CDS             2801..3733
                     /locus_tag="b0003"
                     /protein_id="NP_414544.1"
                     /translation="MVKVYAPASSANMSVGFDVLGAAVTPVDG"
     gene            3734..3800
                     /locus_tag="b0004"
"#;

    #[test]
    fn test_extracts_product_and_protein_id() {
        let result = extract("b0001", RECORD).unwrap();
        assert_eq!(result, ExtractionResult::new("thr operon leader peptide", "NP_414542.1"));
    }

    #[test]
    fn test_old_locus_tag_accepted() {
        let result = extract("ECK0002", RECORD).unwrap();
        assert_eq!(result.protein_id, "NP_414543.1");
    }

    #[test]
    fn test_multiline_product_is_unfolded() {
        let result = extract("b0002", RECORD).unwrap();
        assert_eq!(result.product, "fused aspartate kinase/homoserine dehydrogenase 1");
    }

    #[test]
    fn test_missing_product_defaults_to_empty() {
        let result = extract("b0003", RECORD).unwrap();
        assert_eq!(result, ExtractionResult::new("", "NP_414544.1"));
    }

    #[test]
    fn test_no_translation_after_tag_is_not_found() {
        let err = extract("b0004", RECORD).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_unknown_tag_is_not_found() {
        assert!(extract("b9999", RECORD).unwrap_err().is_not_found());
    }

    #[test]
    fn test_empty_block_is_not_found() {
        let text = r#"/locus_tag="tight"/translation="MK""#;
        assert!(extract("tight", text).unwrap_err().is_not_found());
    }

    #[test]
    fn test_block_without_qualifiers_is_empty_match() {
        let text = "/locus_tag=\"bare\"\n                     /codon_start=1\n                     /translation=\"MK\"";
        let result = extract("bare", text).unwrap();
        assert_eq!(result, ExtractionResult::default());
    }

    #[test]
    fn test_locus_tag_matched_literally() {
        let text = "/locus_tag=\"axb\"\n/product=\"wrong\"\n/translation=\"M\"";
        assert!(extract("a.b", text).unwrap_err().is_not_found());
    }

    #[test]
    fn test_unfold_single_line_unchanged() {
        assert_eq!(unfold("  spaced  value "), "  spaced  value ");
        assert_eq!(unfold("first\n      second"), "first second");
    }

    #[test]
    fn test_unfold_keeps_leading_space_of_first_line() {
        assert_eq!(unfold(" lead\n      tail"), " lead tail");
    }

    #[test]
    fn test_unfold_joins_hyphen_wrap_without_space() {
        assert_eq!(
            unfold("3-oxoacyl-[acyl-carrier-\n                     protein] synthase"),
            "3-oxoacyl-[acyl-carrier-protein] synthase"
        );
    }
}
