//! Data
//!
//! Categorical datasets, the label domain derived from them, and per-label counts.
use crate::errors::TreeError;
use crate::utils::items_to_strings;
use csv::{ReaderBuilder, Trim};
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::Path;

/// A table of categorical values.
///
/// The header holds one name per column, the last column is the label.
/// Every row has exactly as many fields as the header.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Create a dataset, checking that every row matches the header length.
    ///
    /// # Errors
    ///
    /// * [`TreeError::EmptyHeader`] if the header has no columns.
    /// * [`TreeError::DuplicateColumn`] if two columns share a name.
    /// * [`TreeError::Format`] for the first row whose length differs from the header,
    ///   rows are numbered from 1.
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, TreeError> {
        if header.is_empty() {
            return Err(TreeError::EmptyHeader);
        }
        let mut seen = BTreeSet::new();
        if let Some(name) = header.iter().find(|name| !seen.insert(name.as_str())) {
            return Err(TreeError::DuplicateColumn(name.clone()));
        }
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != header.len()) {
            return Err(TreeError::Format {
                row: i + 1,
                expected: header.len(),
                found: row.len(),
            });
        }
        Ok(Dataset { header, rows })
    }

    /// Read a dataset from CSV, the first record being the header.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, TreeError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);
        let mut records = reader.records();
        let header: Vec<String> = match records.next() {
            Some(record) => record?.iter().map(String::from).collect(),
            None => return Err(TreeError::EmptyHeader),
        };
        let mut rows: Vec<Vec<String>> = Vec::new();
        for record in records {
            rows.push(record?.iter().map(String::from).collect());
        }
        Dataset::new(header, rows)
    }

    /// Read a dataset from a CSV file, the first record being the header.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TreeError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|e| TreeError::UnableToRead(format!("{}: {}", path.display(), e)))?;
        Dataset::from_reader(io::BufReader::new(file))
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the label column.
    pub fn label_index(&self) -> usize {
        self.header.len() - 1
    }

    pub fn label_name(&self) -> &str {
        &self.header[self.label_index()]
    }

    /// Attribute names, i.e. the header without the label column.
    pub fn attributes(&self) -> &[String] {
        &self.header[..self.label_index()]
    }

    pub fn attribute_index(&self, name: &str) -> Option<usize> {
        self.attributes().iter().position(|a| a == name)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        let idx = self.label_index();
        self.rows.iter().map(move |r| r[idx].as_str())
    }

    /// Count the labels of all rows.
    pub fn class_counts(&self, domain: &LabelDomain) -> ClassCounts {
        let mut counts = ClassCounts::new(domain);
        self.labels().for_each(|l| counts.add(l));
        counts
    }

    /// Count the labels of the rows sharing each value of an attribute.
    /// Values are visited in ascending order.
    pub fn value_class_counts(&self, attribute: usize, domain: &LabelDomain) -> BTreeMap<&str, ClassCounts> {
        let label = self.label_index();
        let mut by_value: BTreeMap<&str, ClassCounts> = BTreeMap::new();
        for row in &self.rows {
            by_value
                .entry(row[attribute].as_str())
                .or_insert_with(|| ClassCounts::new(domain))
                .add(&row[label]);
        }
        by_value
    }

    /// Split the rows by the value of an attribute, removing that column
    /// from the header and from every row. Only values that occur are returned.
    pub fn partition(&self, attribute: usize) -> BTreeMap<String, Dataset> {
        let mut header = self.header.clone();
        header.remove(attribute);
        let mut subsets: BTreeMap<String, Dataset> = BTreeMap::new();
        for row in &self.rows {
            let mut reduced = row.clone();
            let value = reduced.remove(attribute);
            subsets
                .entry(value)
                .or_insert_with(|| Dataset {
                    header: header.clone(),
                    rows: Vec::new(),
                })
                .rows
                .push(reduced);
        }
        subsets
    }
}

/// The labels observed in a training set, in ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelDomain {
    labels: Vec<String>,
}

impl LabelDomain {
    /// Derive the label domain from a dataset's label column.
    ///
    /// # Errors
    ///
    /// [`TreeError::NonBinaryLabels`] if more than two distinct labels are present.
    pub fn from_dataset(data: &Dataset) -> Result<Self, TreeError> {
        let labels: BTreeSet<&str> = data.labels().collect();
        if labels.len() > 2 {
            return Err(TreeError::NonBinaryLabels(items_to_strings(labels.into_iter().collect())));
        }
        Ok(LabelDomain {
            labels: labels.into_iter().map(String::from).collect(),
        })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

}

/// Number of rows per label, with an entry for every label of the domain.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassCounts {
    counts: BTreeMap<String, usize>,
}

impl ClassCounts {
    pub fn new(domain: &LabelDomain) -> Self {
        ClassCounts {
            counts: domain.labels().iter().map(|l| (l.clone(), 0)).collect(),
        }
    }

    pub fn add(&mut self, label: &str) {
        match self.counts.get_mut(label) {
            Some(c) => *c += 1,
            None => {
                self.counts.insert(label.to_string(), 1);
            }
        }
    }

    pub fn get(&self, label: &str) -> usize {
        self.counts.get(label).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Number of labels tracked, including those with a zero count.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(l, c)| (l.as_str(), *c))
    }

    /// The most frequent label. Ties go to the smallest label.
    pub fn majority(&self) -> Option<&str> {
        let mut best: Option<(&str, usize)> = None;
        for (label, count) in self.iter() {
            match best {
                Some((_, c)) if count <= c => {}
                _ => best = Some((label, count)),
            }
        }
        best.map(|(l, _)| l)
    }

    /// The label shared by every counted row, if there is exactly one.
    pub fn pure_label(&self) -> Option<&str> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        self.iter().find(|(_, c)| *c == total).map(|(l, _)| l)
    }
}
