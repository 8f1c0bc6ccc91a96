use serde::Deserialize;

pub type TeamId = u32;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    #[serde(default)]
    pub organization: String,
}
