pub mod quote;
pub mod serve;
pub mod setup;
pub mod ui;
