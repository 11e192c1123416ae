use super::ids::PlayerHandle;

/// Titled players in the order the API returned them. Duplicates are kept.
pub type Roster = Vec<PlayerHandle>;
