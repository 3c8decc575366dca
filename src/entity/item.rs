use strum_macros::AsRefStr;

/// Something edible resting on a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Item {
    Dot,
    /// Eating one frightens every ghost that has left the holding area.
    Pellet,
}

impl Item {
    pub fn score(self) -> u32 {
        match self {
            Item::Dot => 10,
            Item::Pellet => 50,
        }
    }
}
