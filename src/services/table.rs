//! Box-drawn grid tables.
//!
//! ```text
//! ╒══════╤═══════════╕
//! │ id   │ Leak Site │
//! ╞══════╪═══════════╡
//! │ 1    │ alpha     │
//! ├──────┼───────────┤
//! │ 2    │ beta      │
//! ╘══════╧═══════════╛
//! ```
//!
//! Cells may span several lines; every line is padded to the column width.

use unicode_width::UnicodeWidthStr;

#[derive(Debug, Default, Clone)]
pub struct Table {
    headers: Option<Vec<String>>,
    rows: Vec<Vec<String>>,
}

struct Rule {
    left: char,
    fill: char,
    join: char,
    right: char,
}

const TOP: Rule = Rule {
    left: '╒',
    fill: '═',
    join: '╤',
    right: '╕',
};
const HEADER: Rule = Rule {
    left: '╞',
    fill: '═',
    join: '╪',
    right: '╡',
};
const ROW: Rule = Rule {
    left: '├',
    fill: '─',
    join: '┼',
    right: '┤',
};
const BOTTOM: Rule = Rule {
    left: '╘',
    fill: '═',
    join: '╧',
    right: '╛',
};

impl Table {
    pub fn with_headers<S: AsRef<str>>(headers: &[S]) -> Self {
        Self {
            headers: Some(headers.iter().map(|h| h.as_ref().to_string()).collect()),
            rows: Vec::new(),
        }
    }

    /// Table without a header row, used for field/value detail views.
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn column_count(&self) -> usize {
        self.headers
            .iter()
            .chain(self.rows.iter())
            .map(Vec::len)
            .max()
            .unwrap_or(0)
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths = vec![0; self.column_count()];
        for row in self.headers.iter().chain(self.rows.iter()) {
            for (i, cell) in row.iter().enumerate() {
                let w = cell.lines().map(UnicodeWidthStr::width).max().unwrap_or(0);
                widths[i] = widths[i].max(w);
            }
        }
        widths
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        if widths.is_empty() {
            return String::new();
        }

        let mut lines = vec![rule(&TOP, &widths)];
        if let Some(headers) = &self.headers {
            push_cells(&mut lines, headers, &widths);
            if !self.rows.is_empty() {
                lines.push(rule(&HEADER, &widths));
            }
        }
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                lines.push(rule(&ROW, &widths));
            }
            push_cells(&mut lines, row, &widths);
        }
        lines.push(rule(&BOTTOM, &widths));
        lines.join("\n")
    }
}

fn rule(r: &Rule, widths: &[usize]) -> String {
    let segments: Vec<String> = widths
        .iter()
        .map(|w| r.fill.to_string().repeat(w + 2))
        .collect();
    format!(
        "{}{}{}",
        r.left,
        segments.join(&r.join.to_string()),
        r.right
    )
}

fn push_cells(lines: &mut Vec<String>, row: &[String], widths: &[usize]) {
    let split: Vec<Vec<&str>> = widths
        .iter()
        .enumerate()
        .map(|(i, _)| match row.get(i) {
            Some(cell) if !cell.is_empty() => cell.lines().collect(),
            _ => vec![""],
        })
        .collect();
    let height = split.iter().map(Vec::len).max().unwrap_or(1);

    for line_no in 0..height {
        let cells: Vec<String> = split
            .iter()
            .zip(widths)
            .map(|(cell_lines, w)| {
                let text = cell_lines.get(line_no).copied().unwrap_or("");
                let pad = w.saturating_sub(text.width());
                format!(" {}{} ", text, " ".repeat(pad))
            })
            .collect();
        lines.push(format!("│{}│", cells.join("│")));
    }
}
