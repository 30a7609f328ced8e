use std::fmt;

/// Size and ratio metrics for one encode.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Statistics {
    /// Symbol count times the baseline symbol width.
    pub original_bits: usize,
    /// Length of the encoded bit sequence, end marker included.
    pub compressed_bits: usize,
    /// `original_bits / compressed_bits`.
    pub compression_ratio: f64,
    /// Share of the baseline size saved, in percent. Negative when the encoded
    /// form is larger.
    pub space_saving_percent: f64,
    /// `compressed_bits / symbol_count`.
    pub avg_bits_per_symbol: f64,
}

impl Statistics {
    /// Derives the metrics from the encoded symbol count and bit count.
    ///
    /// Everything is zero when either count is zero.
    pub fn from_counts(symbol_count: usize, compressed_bits: usize, baseline_bits: usize) -> Self {
        if symbol_count == 0 || compressed_bits == 0 || baseline_bits == 0 {
            return Self::default();
        }
        let original_bits = symbol_count.saturating_mul(baseline_bits);
        let original = original_bits as f64;
        let compressed = compressed_bits as f64;
        Self {
            original_bits,
            compressed_bits,
            compression_ratio: original / compressed,
            space_saving_percent: (original - compressed) / original * 100.0,
            avg_bits_per_symbol: compressed / symbol_count as f64,
        }
    }

    /// `true` when no encode has contributed to these statistics.
    pub fn is_empty(&self) -> bool {
        self.original_bits == 0
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "original size:     {} bits", self.original_bits)?;
        writeln!(f, "compressed size:   {} bits", self.compressed_bits)?;
        writeln!(f, "compression ratio: {:.2}:1", self.compression_ratio)?;
        writeln!(f, "space saving:      {:.2}%", self.space_saving_percent)?;
        write!(f, "efficiency:        {:.2} bits/symbol", self.avg_bits_per_symbol)
    }
}
