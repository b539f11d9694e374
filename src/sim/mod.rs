//! Game state and resources: word packs on disk, the running session,
//! and the across-rounds tally.

pub mod session;
pub mod words;
