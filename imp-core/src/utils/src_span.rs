use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SrcSpan {
    pub start: u32,
    pub end: u32,
}

impl SrcSpan {
	pub fn from(start: u32, end: u32) -> Self {
		Self { start, end }
	}
}

impl Display for SrcSpan {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}..{}", self.start, self.end)
	}
}

/// Maps byte offsets back to 1-based line/column pairs.
///
/// Tokens and AST nodes carry byte spans; line and column are only
/// materialized at reporting time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineNumbers {
    line_starts: Vec<u32>,
}

impl LineNumbers {
    pub fn new(src: &str) -> Self {
        Self {
            line_starts: std::iter::once(0)
                .chain(src.match_indices('\n').map(|(i, _)| i as u32 + 1))
                .collect(),
        }
    }

    pub fn line_and_column(&self, byte_index: u32) -> (u32, u32) {
        let line = self
            .line_starts
            .partition_point(|&start| start <= byte_index) as u32;
        let column = byte_index - self.line_starts[line as usize - 1] + 1;

        (line, column)
    }
}

#[cfg(test)]
mod tests {
    use super::LineNumbers;

    #[test]
    fn test_line_and_column() {
        let src = "int x = 1;\nx = 2;\n\nprint(x);";
        let lines = LineNumbers::new(src);

        assert_eq!(lines.line_and_column(0), (1, 1));
        assert_eq!(lines.line_and_column(4), (1, 5));
        assert_eq!(lines.line_and_column(11), (2, 1));
        assert_eq!(lines.line_and_column(15), (2, 5));
        assert_eq!(lines.line_and_column(19), (4, 1));
    }
}
