/// Fixed, non-overlapping age bands used for percentile grouping.
/// Assignment is a pure function of age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AgeBand {
    Teens,
    Twenties,
    Thirties,
    Forties,
    Fifties,
    SixtiesPlus,
}

impl AgeBand {
    pub const ALL: [AgeBand; 6] = [
        AgeBand::Teens,
        AgeBand::Twenties,
        AgeBand::Thirties,
        AgeBand::Forties,
        AgeBand::Fifties,
        AgeBand::SixtiesPlus,
    ];

    pub fn from_age(age: u32) -> AgeBand {
        if age < 20 {
            AgeBand::Teens
        } else if age < 30 {
            AgeBand::Twenties
        } else if age < 40 {
            AgeBand::Thirties
        } else if age < 50 {
            AgeBand::Forties
        } else if age < 60 {
            AgeBand::Fifties
        } else {
            AgeBand::SixtiesPlus
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AgeBand::Teens => "10s",
            AgeBand::Twenties => "20s",
            AgeBand::Thirties => "30s",
            AgeBand::Forties => "40s",
            AgeBand::Fifties => "50s",
            AgeBand::SixtiesPlus => "60s+",
        }
    }

    pub fn index(self) -> usize {
        match self {
            AgeBand::Teens => 0,
            AgeBand::Twenties => 1,
            AgeBand::Thirties => 2,
            AgeBand::Forties => 3,
            AgeBand::Fifties => 4,
            AgeBand::SixtiesPlus => 5,
        }
    }
}

impl std::fmt::Display for AgeBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
