//! Continent Table Module
//! In-memory grouping of CSV rows by continent, in first-seen order.

use std::collections::HashMap;

/// One CSV record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub continent: String,
    pub year: i64,
    pub total_population: i64,
    pub internet_population: i64,
}

/// Per-continent sequences in CSV row order.
///
/// The three sequences always have the same length: the only mutator is
/// [`ContinentSeries::push`], which appends to all of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContinentSeries {
    continent: String,
    years: Vec<i64>,
    total_population: Vec<i64>,
    internet_population: Vec<i64>,
}

impl ContinentSeries {
    pub fn new(continent: impl Into<String>) -> Self {
        Self {
            continent: continent.into(),
            ..Self::default()
        }
    }

    pub fn push(&mut self, year: i64, total_population: i64, internet_population: i64) {
        self.years.push(year);
        self.total_population.push(total_population);
        self.internet_population.push(internet_population);
    }

    pub fn continent(&self) -> &str {
        &self.continent
    }

    pub fn years(&self) -> &[i64] {
        &self.years
    }

    pub fn total_population(&self) -> &[i64] {
        &self.total_population
    }

    pub fn internet_population(&self) -> &[i64] {
        &self.internet_population
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

/// Continent name -> series, iterated in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContinentTable {
    series: Vec<ContinentSeries>,
    index: HashMap<String, usize>,
}

impl ContinentTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row, creating the continent's series on first occurrence.
    pub fn push_row(&mut self, row: Row) {
        let idx = match self.index.get(&row.continent) {
            Some(&idx) => idx,
            None => {
                let idx = self.series.len();
                self.series.push(ContinentSeries::new(row.continent.clone()));
                self.index.insert(row.continent, idx);
                idx
            }
        };
        self.series[idx].push(row.year, row.total_population, row.internet_population);
    }

    pub fn get(&self, continent: &str) -> Option<&ContinentSeries> {
        self.index.get(continent).map(|&idx| &self.series[idx])
    }

    /// Continent names in first-seen order.
    pub fn continents(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.continent()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContinentSeries> {
        self.series.iter()
    }

    /// Number of continents.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Total number of rows across all continents.
    pub fn row_count(&self) -> usize {
        self.series.iter().map(ContinentSeries::len).sum()
    }
}

impl FromIterator<Row> for ContinentTable {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        let mut table = Self::new();
        for row in iter {
            table.push_row(row);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(continent: &str, year: i64, total: i64, internet: i64) -> Row {
        Row {
            continent: continent.to_string(),
            year,
            total_population: total,
            internet_population: internet,
        }
    }

    #[test]
    fn keeps_first_seen_continent_order() {
        let table: ContinentTable = vec![
            row("World", 1991, 10, 1),
            row("Asia", 1991, 5, 0),
            row("World", 1994, 11, 2),
            row("Africa", 1991, 3, 0),
        ]
        .into_iter()
        .collect();

        assert_eq!(table.continents(), vec!["World", "Asia", "Africa"]);
        assert_eq!(table.row_count(), 4);
        assert_eq!(table.get("World").map(|s| s.years().to_vec()), Some(vec![1991, 1994]));
    }

    #[test]
    fn duplicate_years_are_appended_not_merged() {
        let table: ContinentTable = vec![row("Asia", 2000, 1, 0), row("Asia", 2000, 2, 1)]
            .into_iter()
            .collect();

        let asia = table.get("Asia").expect("asia present");
        assert_eq!(asia.years(), &[2000, 2000]);
        assert_eq!(asia.total_population(), &[1, 2]);
    }

    #[test]
    fn unknown_continent_is_absent() {
        let table = ContinentTable::new();
        assert!(table.get("Asia").is_none());
        assert!(table.is_empty());
    }
}
