//! Fixed-width table view of courses.

use crate::error::{Error, Result};
use crate::record::{Course, Field};

/// Which rows of the data set to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowWindow {
    All,
    Top(usize),
    Bottom(usize),
}

/// Headings plus display text for every cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    headings: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn from_courses(courses: &[Course], window: RowWindow) -> Result<Self> {
        let visible = match window {
            RowWindow::All => courses,
            RowWindow::Top(count) => &courses[..checked_count(count, courses.len())?],
            RowWindow::Bottom(count) => {
                let count = checked_count(count, courses.len())?;
                &courses[courses.len() - count..]
            }
        };

        let headings = Field::ALL.iter().map(|field| field.name()).collect();
        let rows = visible
            .iter()
            .map(|course| Field::ALL.iter().map(|field| field.display(course)).collect())
            .collect();
        Ok(Self { headings, rows })
    }

    pub fn headings(&self) -> &[&'static str] {
        &self.headings
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Render up to `max_columns` columns starting at `first_column`, fitted to `width`.
    pub fn render(&self, width: usize, first_column: usize, max_columns: usize) -> Result<String> {
        let total = self.headings.len();
        if first_column >= total || max_columns == 0 {
            return Err(Error::invalid(format!(
                "column window starting at {} is outside the {} available columns",
                first_column, total
            )));
        }
        let last_column = first_column.saturating_add(max_columns).min(total);
        let shown = last_column - first_column;

        // One '|' between neighbouring columns.
        let column_width = width.saturating_sub(shown - 1) / shown;
        if column_width <= 3 {
            return Err(Error::invalid(format!(
                "a width of {} is too narrow for {} columns",
                width, shown
            )));
        }

        let rule = "-".repeat(width);
        let mut out = String::new();
        let headings: Vec<&str> = self.headings[first_column..last_column].to_vec();
        out.push_str(&format_line(&headings, column_width));
        out.push('\n');
        out.push_str(&rule);
        out.push('\n');
        for row in &self.rows {
            let cells: Vec<&str> = row[first_column..last_column].iter().map(String::as_str).collect();
            out.push_str(&format_line(&cells, column_width));
            out.push('\n');
        }
        out.push_str(&rule);
        out.push('\n');
        out.push_str(&format!("Total data rows: {}", self.rows.len()));
        Ok(out)
    }
}

fn checked_count(count: usize, len: usize) -> Result<usize> {
    if count > len {
        return Err(Error::invalid(format!(
            "cannot show {} rows of a data set with {} rows",
            count, len
        )));
    }
    Ok(count)
}

fn format_line(cells: &[&str], width: usize) -> String {
    cells
        .iter()
        .map(|cell| fit(cell, width))
        .collect::<Vec<_>>()
        .join("|")
}

/// Pad to `width`, or cut and mark with "..." when longer.
fn fit(cell: &str, width: usize) -> String {
    let len = cell.chars().count();
    if len <= width {
        format!("{:<width$}", cell, width = width)
    } else {
        let mut cut: String = cell.chars().take(width - 3).collect();
        cut.push_str("...");
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn courses() -> Vec<Course> {
        (1..=4)
            .map(|id| Course::builder().id(id).name(format!("Course number {}", id)).build())
            .collect()
    }

    #[test]
    fn test_row_windows() {
        let data = courses();
        assert_eq!(Table::from_courses(&data, RowWindow::All).unwrap().rows().len(), 4);

        let top = Table::from_courses(&data, RowWindow::Top(2)).unwrap();
        assert_eq!(top.rows()[1][0], "2");

        let bottom = Table::from_courses(&data, RowWindow::Bottom(1)).unwrap();
        assert_eq!(bottom.rows().len(), 1);
        assert_eq!(bottom.rows()[0][0], "4");

        assert!(Table::from_courses(&data, RowWindow::Top(5)).is_err());
        assert_eq!(Table::from_courses(&data, RowWindow::Bottom(0)).unwrap().rows().len(), 0);
    }

    #[test]
    fn test_cells_use_null_marker() {
        let table = Table::from_courses(&courses(), RowWindow::Top(1)).unwrap();
        assert_eq!(table.headings()[2], "instructor");
        assert_eq!(table.rows()[0][2], "Null");
        assert_eq!(table.rows()[0][6], "");
    }

    #[test]
    fn test_render_truncates_and_counts() {
        let table = Table::from_courses(&courses(), RowWindow::All).unwrap();
        // 2 columns in 21 characters: (21 - 1) / 2 = 10 per column.
        let text = table.render(21, 0, 2).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "course_id |course_...");
        assert_eq!(lines[1], "-".repeat(21));
        assert_eq!(lines[2], "1         |Course ...");
        assert_eq!(lines.last(), Some(&"Total data rows: 4"));
    }

    #[test]
    fn test_render_rejects_bad_windows() {
        let table = Table::from_courses(&courses(), RowWindow::All).unwrap();
        assert!(table.render(120, 7, 3).is_err());
        assert!(table.render(8, 0, 3).is_err());
        // The window is clipped at the last column.
        let text = table.render(40, 6, 3).unwrap();
        assert!(text.starts_with("students"));
    }

    #[test]
    fn test_render_clips_unbounded_column_count() {
        let table = Table::from_courses(&courses(), RowWindow::Top(1)).unwrap();
        // Six columns from index 1 in 6 * 12 + 5 characters.
        let text = table.render(77, 1, usize::MAX).unwrap();
        let heading = text.lines().next().unwrap();
        assert!(heading.starts_with("course_name |instructor  |"));
        assert_eq!(heading.matches('|').count(), 5);
    }
}
