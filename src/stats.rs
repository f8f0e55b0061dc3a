//! Compression statistics and human-readable reports.

use std::fmt::Write as _;

use crate::huffman::{CodeTable, FrequencyTable};

/// Bits each character is charged in the "original" size.
pub const BITS_PER_CHAR: u64 = 8;

/// Number of rows in [`frequency_chart`].
pub const CHART_ROWS: usize = 15;

const CHART_WIDTH: usize = 40;

/// Size figures for one compression run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompressionStats {
    /// Number of characters in the input.
    pub chars: u64,
    /// Number of distinct characters.
    pub unique_symbols: usize,
    /// Uncompressed size, at [`BITS_PER_CHAR`] per character.
    pub original_bits: u64,
    /// Length of the encoded bit sequence.
    pub compressed_bits: u64,
}

impl CompressionStats {
    /// Gather statistics from a frequency table and the encoded length.
    pub fn new(frequencies: &FrequencyTable, compressed_bits: u64) -> Self {
        let chars = frequencies.total();
        Self {
            chars,
            unique_symbols: frequencies.len(),
            original_bits: chars * BITS_PER_CHAR,
            compressed_bits,
        }
    }

    /// Bits saved; negative when the encoding is larger than the original.
    pub fn saved_bits(&self) -> i64 {
        self.original_bits as i64 - self.compressed_bits as i64
    }

    /// Saved bits as a percentage of the original, 0 for empty input.
    pub fn saved_percent(&self) -> f64 {
        if self.original_bits == 0 {
            return 0.0;
        }
        self.saved_bits() as f64 / self.original_bits as f64 * 100.0
    }

    /// Compressed size as a percentage of the original.
    pub fn compressed_percent(&self) -> f64 {
        if self.original_bits == 0 {
            return 0.0;
        }
        self.compressed_bits as f64 / self.original_bits as f64 * 100.0
    }

    /// Average code length in bits per character.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.chars == 0 {
            return 0.0;
        }
        self.compressed_bits as f64 / self.chars as f64
    }
}

/// Format a bit count, switching to bytes, KB and MB as it grows.
pub fn format_bits(bits: u64) -> String {
    const BYTE: u64 = 8;
    const KB: u64 = 1024 * BYTE;
    const MB: u64 = 1024 * KB;

    if bits >= MB {
        format!("{:.2} MB", bits as f64 / MB as f64)
    } else if bits >= KB {
        format!("{:.2} KB", bits as f64 / KB as f64)
    } else if bits >= 1024 {
        format!("{:.2} bytes", bits as f64 / BYTE as f64)
    } else {
        format!("{} bits", bits)
    }
}

/// Format a byte count.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Printable name for a symbol; whitespace gets a visible label.
pub fn display_symbol(symbol: char) -> String {
    match symbol {
        ' ' => "Space".to_string(),
        '\n' => "\\n".to_string(),
        '\t' => "\\t".to_string(),
        '\r' => "\\r".to_string(),
        c if c.is_control() => format!("U+{:04X}", c as u32),
        c => c.to_string(),
    }
}

/// One line of the frequency report.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyRow {
    /// The character.
    pub symbol: char,
    /// Occurrences in the input.
    pub count: u64,
    /// Share of all characters, in percent.
    pub percent: f64,
}

/// Frequencies sorted by descending count.
pub fn frequency_rows(frequencies: &FrequencyTable) -> Vec<FrequencyRow> {
    let total = frequencies.total().max(1) as f64;
    frequencies
        .sorted_by_count()
        .into_iter()
        .map(|(symbol, count)| FrequencyRow {
            symbol,
            count,
            percent: count as f64 / total * 100.0,
        })
        .collect()
}

/// One line of the code report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeRow {
    /// The character.
    pub symbol: char,
    /// Occurrences in the input.
    pub count: u64,
    /// Code as a string of `0` and `1`.
    pub code: String,
}

/// Codes sorted by length, then by symbol.
pub fn code_rows(codes: &CodeTable, frequencies: &FrequencyTable) -> Vec<CodeRow> {
    codes
        .sorted_by_length()
        .into_iter()
        .map(|(symbol, code)| CodeRow {
            symbol,
            count: frequencies.get(symbol).unwrap_or(0),
            code: code.to_bit_string(),
        })
        .collect()
}

/// Render the most frequent symbols as a text bar chart.
///
/// Bars are scaled against the most frequent symbol.
pub fn frequency_chart(frequencies: &FrequencyTable) -> String {
    let rows = frequencies.sorted_by_count();
    let Some(&(_, max)) = rows.first() else {
        return String::new();
    };

    let mut out = String::new();
    for (symbol, count) in rows.into_iter().take(CHART_ROWS) {
        let width = ((count as f64 / max as f64) * CHART_WIDTH as f64).round() as usize;
        let _ = writeln!(
            out,
            "{:>8} | {:<w$} {} times",
            display_symbol(symbol),
            "#".repeat(width.max(1)),
            count,
            w = CHART_WIDTH
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::huffman::HuffmanTree;

    #[test]
    fn test_stats_for_known_text() {
        let frequencies = FrequencyTable::from_text("aab");
        let stats = CompressionStats::new(&frequencies, 3);
        assert_eq!(stats.chars, 3);
        assert_eq!(stats.unique_symbols, 2);
        assert_eq!(stats.original_bits, 24);
        assert_eq!(stats.saved_bits(), 21);
        assert!((stats.saved_percent() - 87.5).abs() < 1e-9);
        assert!((stats.compressed_percent() - 12.5).abs() < 1e-9);
        assert!((stats.bits_per_symbol() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_stats_empty() {
        let stats = CompressionStats::new(&FrequencyTable::from_text(""), 0);
        assert_eq!(stats.saved_percent(), 0.0);
        assert_eq!(stats.bits_per_symbol(), 0.0);
    }

    #[test]
    fn test_format_bits() {
        assert_eq!(format_bits(0), "0 bits");
        assert_eq!(format_bits(1023), "1023 bits");
        assert_eq!(format_bits(1024), "128.00 bytes");
        assert_eq!(format_bits(8 * 1024), "1.00 KB");
        assert_eq!(format_bits(8 * 1024 * 1024 * 3), "3.00 MB");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(10 * 1024 * 1024), "10.00 MB");
    }

    #[test]
    fn test_display_symbol() {
        assert_eq!(display_symbol(' '), "Space");
        assert_eq!(display_symbol('\n'), "\\n");
        assert_eq!(display_symbol('\t'), "\\t");
        assert_eq!(display_symbol('\r'), "\\r");
        assert_eq!(display_symbol('\0'), "U+0000");
        assert_eq!(display_symbol('é'), "é");
    }

    #[test]
    fn test_frequency_rows_sorted() {
        let rows = frequency_rows(&FrequencyTable::from_text("abbccc"));
        let symbols: Vec<char> = rows.iter().map(|r| r.symbol).collect();
        assert_eq!(symbols, vec!['c', 'b', 'a']);
        assert!((rows[0].percent - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_code_rows() {
        let frequencies = FrequencyTable::from_text("aab");
        let tree = HuffmanTree::from_frequencies(&frequencies).unwrap();
        let codes = CodeTable::from_tree(&tree).unwrap();
        let rows = code_rows(&codes, &frequencies);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.code.len() == 1));
        assert_eq!(rows.iter().map(|r| r.count).sum::<u64>(), 3);
    }

    #[test]
    fn test_chart_limits_rows() {
        let text: String = ('a'..='z').collect();
        let chart = frequency_chart(&FrequencyTable::from_text(&text));
        assert_eq!(chart.lines().count(), CHART_ROWS);
        assert!(frequency_chart(&FrequencyTable::from_text("")).is_empty());
    }

    #[test]
    fn test_chart_scales_to_max() {
        let chart = frequency_chart(&FrequencyTable::from_text("aaaab"));
        let first = chart.lines().next().unwrap();
        assert!(first.contains(&"#".repeat(CHART_WIDTH)));
        assert!(first.ends_with("4 times"));
    }
}
