#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// A simple text-based table generator for Discord messages using code blocks
pub struct Table {
    headers: Vec<String>,
    aligns: Vec<Align>,
    rows: Vec<Vec<String>>,
    col_widths: Vec<usize>,
}

impl Table {
    /// Create a new table with the given headers, all left aligned
    pub fn new(headers: Vec<&str>) -> Self {
        let col_widths = headers.iter().map(|h| h.chars().count()).collect();
        let aligns = vec![Align::Left; headers.len()];
        let headers = headers.iter().map(|h| h.to_string()).collect();
        Table {
            headers,
            aligns,
            rows: Vec::new(),
            col_widths,
        }
    }

    /// Right align a column (amounts)
    pub fn align_right(mut self, column: usize) -> Self {
        if let Some(align) = self.aligns.get_mut(column) {
            *align = Align::Right;
        }
        self
    }

    /// Add a row; missing cells render empty, extra cells are dropped
    pub fn add_row(&mut self, row: Vec<String>) {
        let mut row: Vec<String> = row.into_iter().take(self.headers.len()).collect();
        row.resize(self.headers.len(), String::new());

        for (i, col) in row.iter().enumerate() {
            self.col_widths[i] = self.col_widths[i].max(col.chars().count());
        }

        self.rows.push(row);
    }

    /// Render the table as a formatted string for Discord
    pub fn render(&self) -> String {
        let mut output = String::from("```\n");

        output.push_str(&self.render_row(&self.headers));
        output.push('\n');
        output.push_str(&self.render_separator());
        output.push('\n');

        for row in &self.rows {
            output.push_str(&self.render_row(row));
            output.push('\n');
        }

        output.push_str("```");
        output
    }

    fn render_row(&self, row: &[String]) -> String {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let width = self.col_widths[i];
                match self.aligns[i] {
                    Align::Left => format!("{:<width$}", col, width = width),
                    Align::Right => format!("{:>width$}", col, width = width),
                }
            })
            .collect();
        cells.join(" | ").trim_end().to_string()
    }

    fn render_separator(&self) -> String {
        self.col_widths
            .iter()
            .map(|&width| "-".repeat(width))
            .collect::<Vec<_>>()
            .join("-+-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_table() {
        let mut table = Table::new(vec!["Code", "Amount"]).align_right(1);
        table.add_row(vec!["USD".to_string(), "1.00".to_string()]);
        table.add_row(vec!["JPY".to_string(), "150.00".to_string()]);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "```");
        assert_eq!(lines[1], "Code | Amount");
        assert_eq!(lines[2], "-----+-------");
        assert_eq!(lines[3], "USD  |   1.00");
        assert_eq!(lines[4], "JPY  | 150.00");
        assert_eq!(lines[5], "```");
    }

    #[test]
    fn test_width_counts_characters_not_bytes() {
        let mut table = Table::new(vec!["Name", "Code"]);
        table.add_row(vec!["Icelandic Króna".to_string(), "ISK".to_string()]);
        table.add_row(vec!["Euro".to_string()]);

        let rendered = table.render();
        assert!(rendered.contains("Icelandic Króna | ISK"));
        assert!(rendered.contains("Euro            |"));
    }
}
