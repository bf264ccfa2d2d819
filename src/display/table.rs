//! Column-aligned plain text tables

/// Gap between columns
const PADDING: usize = 2;

/// Text table with a header row and a dashed underline
#[derive(Debug, Default)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            header: header.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn add_row<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    fn widths(&self) -> Vec<usize> {
        let columns = self
            .rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.header.len()))
            .max()
            .unwrap_or(0);

        (0..columns)
            .map(|col| {
                std::iter::once(&self.header)
                    .chain(self.rows.iter())
                    .filter_map(|row| row.get(col))
                    .map(|cell| cell.chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    fn render_line(cells: &[String], widths: &[usize], out: &mut String) {
        let mut line = String::new();
        for (col, width) in widths.iter().enumerate() {
            let cell = cells.get(col).map(String::as_str).unwrap_or("");
            line.push_str(cell);
            if col + 1 < widths.len() {
                let pad = width - cell.chars().count() + PADDING;
                line.extend(std::iter::repeat(' ').take(pad));
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    /// Render the table, one line per row
    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut out = String::new();

        Self::render_line(&self.header, &widths, &mut out);
        let underline: Vec<String> = self
            .header
            .iter()
            .map(|title| "-".repeat(title.chars().count()))
            .collect();
        Self::render_line(&underline, &widths, &mut out);

        for row in &self.rows {
            Self::render_line(row, &widths, &mut out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_aligns_columns() {
        let mut table = Table::new(["GROUP", "HOURS"]);
        table.add_row(["Mon Apr 01", "1.5"]);
        table.add_row(["Backlog", "10"]);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "GROUP       HOURS");
        assert_eq!(lines[1], "-----       -----");
        assert_eq!(lines[2], "Mon Apr 01  1.5");
        assert_eq!(lines[3], "Backlog     10");
    }

    #[test]
    fn test_render_header_only() {
        let table = Table::new(["A", "B"]);
        assert_eq!(table.render(), "A  B\n-  -\n");
    }

    #[test]
    fn test_render_counts_chars_not_bytes() {
        let mut table = Table::new(["NAME", "X"]);
        table.add_row(["Café", "1"]);
        let rendered = table.render();
        assert_eq!(rendered.lines().nth(2), Some("Café  1"));
    }

    #[test]
    fn test_render_trims_trailing_space() {
        let mut table = Table::new(["A", "B", "C"]);
        table.add_row(["x", "y", ""]);
        for line in table.render().lines() {
            assert_eq!(line, line.trim_end());
        }
    }
}
