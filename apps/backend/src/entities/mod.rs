pub mod players;
pub mod round_records;

pub use players::Entity as Players;
pub use round_records::Entity as RoundRecords;
