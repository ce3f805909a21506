pub mod states;
pub mod forces;
pub mod contact;
pub mod links;
pub mod world;
pub mod scenario;
