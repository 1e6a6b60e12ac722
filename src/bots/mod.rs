pub mod base;
pub mod hunter;
pub mod random;
pub mod scholar;

pub use base::Bot;
pub use hunter::CategoryHunterBot;
pub use random::RandomBot;
pub use scholar::ScholarBot;
