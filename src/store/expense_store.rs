use crate::error::{Error, Result};
use crate::models::category::Category;
use crate::models::expense::{Expense, at_amount_scale};
use csv::StringRecord;
use rust_decimal::Decimal;
use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Append-only expense log, one `name, amount, category` record per line.
///
/// Line order is chronological order; the last line is the most recent expense.
#[derive(Debug, Clone)]
pub struct ExpenseStore {
    path: PathBuf,
}

impl ExpenseStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, expense: &Expense) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)?;
        let separator = if missing_trailing_newline(&mut file)? { "\n" } else { "" };
        writeln!(file, "{}{}", separator, expense.to_line())?;
        info!(path = %self.path.display(), expense = %expense, "appended expense");
        Ok(())
    }

    /// Drops the most recent record and rewrites the log in place.
    ///
    /// Returns the removed expense if its line was well formed.
    pub fn remove_last(&self) -> Result<Option<Expense>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(Error::NoExpenses),
            Err(e) => return Err(e.into()),
        };

        let mut lines: Vec<&str> = content.lines().collect();
        while lines.last().is_some_and(|line| line.trim().is_empty()) {
            lines.pop();
        }
        let removed = lines.pop().ok_or(Error::NoExpenses)?;

        let mut rewritten = String::with_capacity(content.len());
        for line in &lines {
            rewritten.push_str(line);
            rewritten.push('\n');
        }
        self.replace_contents(&rewritten)?;

        debug!(line = removed, remaining = lines.len(), "removed last expense line");
        Ok(parse_line(removed))
    }

    /// Every well-formed record, in file order. A missing log reads as empty.
    pub fn read_all(&self) -> Result<Vec<Expense>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        read_expenses(file)
    }

    /// The last `limit` non-blank lines as written, most recent first.
    pub fn recent_lines(&self, limit: usize) -> Result<Vec<String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .rev()
            .take(limit)
            .map(|line| line.trim_end().to_string())
            .collect())
    }

    fn replace_contents(&self, contents: &str) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(contents.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| Error::Persist {
            path: self.path.display().to_string(),
            source: e.error,
        })?;
        Ok(())
    }
}

fn missing_trailing_newline(file: &mut File) -> io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All);
    builder
}

pub(crate) fn read_expenses<R: Read>(reader: R) -> Result<Vec<Expense>> {
    let mut csv_reader = reader_builder().from_reader(reader);
    let mut expenses = Vec::new();
    for result in csv_reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                debug!(error = %e, "skipping unreadable expense line");
                continue;
            }
        };
        match parse_record(&record) {
            Some(expense) => expenses.push(expense),
            None => {
                let line = record.position().map(|p| p.line()).unwrap_or_default();
                debug!(line, "skipping malformed expense line");
            }
        }
    }
    Ok(expenses)
}

fn parse_line(line: &str) -> Option<Expense> {
    let mut csv_reader = reader_builder().from_reader(line.as_bytes());
    let record = csv_reader.records().next()?.ok()?;
    parse_record(&record)
}

fn parse_record(record: &StringRecord) -> Option<Expense> {
    if record.len() != 3 {
        return None;
    }
    let name = record.get(0)?;
    if name.is_empty() {
        return None;
    }
    let amount = at_amount_scale(Decimal::from_str(record.get(1)?).ok()?)?;
    if amount.is_sign_negative() {
        return None;
    }
    let category = Category::from_str(record.get(2)?).ok()?;
    Some(Expense::new(name.to_string(), amount, category))
}
