// src/schema.rs
//
// The column contract with the spreadsheet exporter.
//
// - `Column`: the fixed, ordered list of fields we expect.
// - `ColumnMap`: built once per payload from the header row; tells the row
//   constructor which cell holds which field.
// - `ResultEntry::from_row`: never fails. Missing cells become "".
//
// Header cells are matched loosely ("Chest No", "chest_no" and "CHESTNO" are
// the same column). If nothing in the header matches, the header is assumed to
// be in canonical order and mapped by position.

use crate::error::FetchError;
use crate::model::ResultEntry;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Column {
    Position,
    ChestNo,
    CandidateName,
    TeamCode,
    Grade,
    ProgramCode,
    ProgramName,
    ProgramSection,
}

impl Column {
    /// Canonical order; also the positional fallback order.
    pub const ALL: [Column; 8] = [
        Column::Position,
        Column::ChestNo,
        Column::CandidateName,
        Column::TeamCode,
        Column::Grade,
        Column::ProgramCode,
        Column::ProgramName,
        Column::ProgramSection,
    ];

    #[inline]
    fn slot(self) -> usize {
        self as usize
    }

    /// Header text the exporter is expected to emit.
    pub fn header(self) -> &'static str {
        match self {
            Column::Position => "Position",
            Column::ChestNo => "Chest No",
            Column::CandidateName => "Candidate Name",
            Column::TeamCode => "Team Code",
            Column::Grade => "Grade",
            Column::ProgramCode => "Program Code",
            Column::ProgramName => "Program Name",
            Column::ProgramSection => "Program Section",
        }
    }

    /// Accepted spellings, already normalized (see `normalize_header`).
    fn aliases(self) -> &'static [&'static str] {
        match self {
            Column::Position => &["position", "pos", "rank", "place"],
            Column::ChestNo => &["chestno", "chestnumber", "chestnum", "chest"],
            Column::CandidateName => &["candidatename", "candidate", "name", "participant", "participantname"],
            Column::TeamCode => &["teamcode", "team", "teamid"],
            Column::Grade => &["grade"],
            Column::ProgramCode => &["programcode", "programmecode", "programid", "progcode", "eventcode", "code", "category"],
            Column::ProgramName => &["programname", "programmename", "program", "programme", "eventname", "event"],
            Column::ProgramSection => &["programsection", "programmesection", "section"],
        }
    }

    pub fn from_header(cell: &str) -> Option<Column> {
        let key = normalize_header(cell);
        if key.is_empty() {
            return None;
        }
        Column::ALL.into_iter().find(|c| c.aliases().contains(&key.as_str()))
    }
}

/// Lowercase letters and digits only: "Chest No." → "chestno".
pub fn normalize_header(cell: &str) -> String {
    cell.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Canonical header row for exports.
pub fn canonical_headers() -> Vec<String> {
    Column::ALL.iter().map(|c| s!(c.header())).collect()
}

/// Field → cell index, resolved once per payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnMap {
    slots: [Option<usize>; 8],
    positional: bool,
}

impl ColumnMap {
    /// Validate the header row and resolve column positions.
    /// A header with no non-blank cell is malformed.
    pub fn from_header(header: &[String]) -> Result<Self, FetchError> {
        if header.iter().all(|h| h.trim().is_empty()) {
            return Err(FetchError::EmptyOrMalformed(s!("the header row is empty")));
        }

        let mut slots = [None; 8];
        for (ix, cell) in header.iter().enumerate() {
            if let Some(col) = Column::from_header(cell) {
                // First occurrence wins on duplicate headers
                if slots[col.slot()].is_none() {
                    slots[col.slot()] = Some(ix);
                }
            }
        }

        if slots.iter().all(Option::is_none) {
            logd!("Schema: no known header in {:?}, mapping by position", header);
            return Ok(Self::positional());
        }

        let map = Self { slots, positional: false };
        let missing = map.missing();
        if !missing.is_empty() {
            logd!("Schema: header lacks {:?}; those fields stay empty", missing);
        }
        Ok(map)
    }

    /// Canonical order, cell i → `Column::ALL[i]`.
    pub fn positional() -> Self {
        let mut slots = [None; 8];
        for (i, slot) in slots.iter_mut().enumerate() {
            *slot = Some(i);
        }
        Self { slots, positional: true }
    }

    #[inline]
    pub fn is_positional(&self) -> bool { self.positional }

    pub fn index_of(&self, col: Column) -> Option<usize> {
        self.slots[col.slot()]
    }

    /// Schema columns the header did not provide.
    pub fn missing(&self) -> Vec<Column> {
        Column::ALL.into_iter().filter(|c| self.index_of(*c).is_none()).collect()
    }

    /// Cells a row needs to fill every mapped field.
    pub fn width(&self) -> usize {
        self.slots.iter().flatten().map(|ix| ix + 1).max().unwrap_or(0)
    }

    /// Trimmed cell for `col`, or "" when absent (short row / unmapped column).
    pub fn cell<'a>(&self, row: &'a [String], col: Column) -> &'a str {
        self.index_of(col)
            .and_then(|ix| row.get(ix))
            .map(|c| c.trim())
            .unwrap_or("")
    }
}

impl ResultEntry {
    /// Typed constructor over a raw row. Infallible by construction.
    pub fn from_row(map: &ColumnMap, row: &[String]) -> Self {
        let get = |col| s!(map.cell(row, col));
        Self {
            position: get(Column::Position),
            chest_no: get(Column::ChestNo),
            candidate_name: get(Column::CandidateName),
            team_code: get(Column::TeamCode),
            grade: get(Column::Grade),
            program_code: get(Column::ProgramCode),
            program_name: get(Column::ProgramName),
            program_section: get(Column::ProgramSection),
        }
    }

    /// Cells in canonical column order (export side).
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.position.clone(),
            self.chest_no.clone(),
            self.candidate_name.clone(),
            self.team_code.clone(),
            self.grade.clone(),
            self.program_code.clone(),
            self.program_name.clone(),
            self.program_section.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn normalize_strips_case_space_and_punctuation() {
        assert_eq!(normalize_header("Chest No."), "chestno");
        assert_eq!(normalize_header(" program_code "), "programcode");
        assert_eq!(normalize_header("TEAM-CODE"), "teamcode");
    }

    #[test]
    fn header_aliases_resolve() {
        assert_eq!(Column::from_header("Rank"), Some(Column::Position));
        assert_eq!(Column::from_header("Chest Number"), Some(Column::ChestNo));
        assert_eq!(Column::from_header("Name"), Some(Column::CandidateName));
        assert_eq!(Column::from_header("Team"), Some(Column::TeamCode));
        assert_eq!(Column::from_header("Section"), Some(Column::ProgramSection));
        assert_eq!(Column::from_header("Category"), Some(Column::ProgramCode));
        assert_eq!(Column::from_header("Remarks"), None);
        assert_eq!(Column::from_header(""), None);
    }

    #[test]
    fn canonical_header_maps_in_order() {
        let map = ColumnMap::from_header(&canonical_headers()).unwrap();
        assert!(!map.is_positional());
        assert!(map.missing().is_empty());
        for (i, col) in Column::ALL.iter().enumerate() {
            assert_eq!(map.index_of(*col), Some(i));
        }
        assert_eq!(map.width(), 8);
    }

    #[test]
    fn reordered_header_maps_by_name() {
        let header = row(&["Program Code", "Candidate Name", "Team Code", "Position"]);
        let map = ColumnMap::from_header(&header).unwrap();
        let e = ResultEntry::from_row(&map, &row(&["P1", "Alice", "A", "1"]));
        assert_eq!(e.program_code, "P1");
        assert_eq!(e.candidate_name, "Alice");
        assert_eq!(e.team_code, "A");
        assert_eq!(e.position, "1");
        assert_eq!(e.grade, "");
        assert_eq!(
            map.missing(),
            vec![Column::ChestNo, Column::Grade, Column::ProgramName, Column::ProgramSection]
        );
    }

    #[test]
    fn unknown_header_falls_back_to_positions() {
        let header = row(&["a", "b", "c", "d", "e", "f", "g", "h"]);
        let map = ColumnMap::from_header(&header).unwrap();
        assert!(map.is_positional());
        let e = ResultEntry::from_row(&map, &row(&["1", "101", "Alice", "A", "A", "P1", "Quiz", "Senior"]));
        assert_eq!(e.chest_no, "101");
        assert_eq!(e.program_section, "Senior");
    }

    #[test]
    fn blank_header_is_malformed() {
        let err = ColumnMap::from_header(&row(&["", "  ", ""])).unwrap_err();
        assert!(matches!(err, FetchError::EmptyOrMalformed(_)));
    }

    #[test]
    fn short_row_pads_with_empty_and_cells_are_trimmed() {
        let map = ColumnMap::positional();
        let e = ResultEntry::from_row(&map, &row(&[" 2 ", " 102 ", " Bob "]));
        assert_eq!(e.position, "2");
        assert_eq!(e.chest_no, "102");
        assert_eq!(e.candidate_name, "Bob");
        assert_eq!(e.program_code, "");
    }

    #[test]
    fn duplicate_header_keeps_first() {
        let header = row(&["Team", "Team Code"]);
        let map = ColumnMap::from_header(&header).unwrap();
        assert_eq!(map.index_of(Column::TeamCode), Some(0));
    }
}
