//! Repository functions for the domain layer (generic over `ConnectionTrait`).

pub mod players;
pub mod progression;
pub mod rounds;
