// src/model.rs
//
// One row of competition results. Built once by the parser and never mutated;
// the store hands out shared `Arc<[ResultEntry]>` snapshots.

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ResultEntry {
    /// Rank as text; empty when unranked
    pub position: String,
    pub chest_no: String,
    pub candidate_name: String,
    pub team_code: String,
    /// Single letter (A/B/C) or empty
    pub grade: String,
    /// Grouping key
    pub program_code: String,
    pub program_name: String,
    pub program_section: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GradeTier { A, B, C, Other, None }

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Podium { First, Second, Third }

impl ResultEntry {
    #[inline]
    pub fn has_program(&self) -> bool { !self.program_code.is_empty() }

    /// A row where every field is empty carries nothing worth showing.
    pub fn is_blank(&self) -> bool {
        self.position.is_empty()
            && self.chest_no.is_empty()
            && self.candidate_name.is_empty()
            && self.team_code.is_empty()
            && self.grade.is_empty()
            && self.program_code.is_empty()
            && self.program_name.is_empty()
            && self.program_section.is_empty()
    }

    pub fn grade_tier(&self) -> GradeTier {
        match self.grade.trim().to_ascii_uppercase().as_str() {
            "" => GradeTier::None,
            "A" => GradeTier::A,
            "B" => GradeTier::B,
            "C" => GradeTier::C,
            _ => GradeTier::Other,
        }
    }

    pub fn podium(&self) -> Option<Podium> {
        match self.position.trim() {
            "1" => Some(Podium::First),
            "2" => Some(Podium::Second),
            "3" => Some(Podium::Third),
            _ => None,
        }
    }

    /// Unranked rows show a dash.
    pub fn display_position(&self) -> &str {
        if self.position.is_empty() { "-" } else { &self.position }
    }
}

impl Podium {
    pub fn symbol(&self) -> &'static str {
        match self {
            Podium::First => "🏆",
            Podium::Second => "🥈",
            Podium::Third => "🥉",
        }
    }
}
